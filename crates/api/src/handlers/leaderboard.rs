//! Handler for the per-organization leaderboard.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use tahfidz_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/organizations/{id}/leaderboard
///
/// Returns the organization's full ranking plus the caller's own entry.
/// Students and parents may only view the organization they belong to.
pub async fn get_leaderboard(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(organization_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state
        .service
        .ensure_can_view(auth.user_id, &auth.role, organization_id)
        .await?;

    let board = state
        .service
        .get_leaderboard(organization_id, auth.user_id)
        .await?;

    Ok(Json(DataResponse { data: board }))
}
