pub mod leaderboard;
pub mod organizations;
