//! Handlers for joining organizations and awarding points.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tahfidz_core::points::PointsDelta;
use tahfidz_core::types::DbId;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireGrader, RequireJoiner};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /organizations/join`.
///
/// Only a raw length cap here; trimming and the character set are
/// enforced by `normalize_class_code`.
#[derive(Debug, Deserialize, Validate)]
pub struct JoinOrganizationRequest {
    #[validate(length(min = 1, max = 32, message = "class_code must be 1-32 characters"))]
    pub class_code: String,
}

/// POST /api/v1/organizations/join
///
/// Joins the caller to the active organization with the given class code.
/// Returns 201 on a first join and 200 when the caller was already a member.
pub async fn join_organization(
    RequireJoiner(auth): RequireJoiner,
    State(state): State<AppState>,
    Json(input): Json<JoinOrganizationRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let outcome = state
        .service
        .join_organization(auth.user_id, &input.class_code)
        .await?;

    let status = if outcome.newly_joined {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(DataResponse { data: outcome })))
}

/// POST /api/v1/organizations/{id}/students/{student_id}/points
///
/// Adds hafalan and/or quiz points to a student's record. Teachers and admins only.
pub async fn award_points(
    RequireGrader(auth): RequireGrader,
    State(state): State<AppState>,
    Path((organization_id, student_id)): Path<(DbId, DbId)>,
    Json(delta): Json<PointsDelta>,
) -> AppResult<impl IntoResponse> {
    let record = state
        .service
        .award_points(student_id, organization_id, delta)
        .await?;

    tracing::debug!(grader_id = %auth.user_id, %student_id, "Points award recorded");

    Ok(Json(DataResponse { data: record }))
}
