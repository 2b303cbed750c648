pub mod health;
pub mod organizations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /organizations/join                               join by class code
/// /organizations/{id}/leaderboard                   ranking + caller's entry
/// /organizations/{id}/students/{student_id}/points  award points
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/organizations", organizations::router())
}
