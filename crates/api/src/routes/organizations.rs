//! Route definitions for organizations, leaderboards and points.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{leaderboard, organizations};
use crate::state::AppState;

/// Organization routes mounted at `/organizations`.
///
/// ```text
/// POST /join                                 -> join_organization (siswa, ortu)
/// GET  /{id}/leaderboard                     -> get_leaderboard
/// POST /{id}/students/{student_id}/points    -> award_points (guru, admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/join", post(organizations::join_organization))
        .route("/{id}/leaderboard", get(leaderboard::get_leaderboard))
        .route(
            "/{id}/students/{student_id}/points",
            post(organizations::award_points),
        )
}
