//! Domain logic for the tahfidz leaderboard: validated point records, the
//! ranking engine, store traits and the leaderboard/join services.

pub mod error;
pub mod memory;
pub mod organization;
pub mod points;
pub mod profile;
pub mod ranking;
pub mod roles;
pub mod service;
pub mod store;
pub mod types;
