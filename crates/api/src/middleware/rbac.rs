//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role is not
//! allowed for the operation.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tahfidz_core::error::CoreError;
use tahfidz_core::roles::{can_award_points, can_join_organization};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a role that can join organizations (`siswa` or `ortu`).
///
/// ```ignore
/// async fn join(RequireJoiner(user): RequireJoiner) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireJoiner(pub AuthUser);

impl FromRequestParts<AppState> for RequireJoiner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_join_organization(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Only students and parents can join a class".into(),
            )));
        }
        Ok(RequireJoiner(user))
    }
}

/// Requires `guru` or `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireGrader(pub AuthUser);

impl FromRequestParts<AppState> for RequireGrader {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_award_points(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Teacher or Admin role required".into(),
            )));
        }
        Ok(RequireGrader(user))
    }
}
