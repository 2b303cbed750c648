//! PostgreSQL implementation of the `tahfidz_core` store traits.

use async_trait::async_trait;
use tahfidz_core::error::CoreError;
use tahfidz_core::organization::Organization;
use tahfidz_core::points::{PointsDelta, PointsRecord};
use tahfidz_core::profile::UserProfile;
use tahfidz_core::store::{OrganizationStore, PointsStore, Store};
use tahfidz_core::types::DbId;

use crate::repositories::{OrganizationRepo, PointsRepo, UserRepo};
use crate::DbPool;

/// PostgreSQL SQLSTATE for `numeric_value_out_of_range`.
const SQLSTATE_OUT_OF_RANGE: &str = "22003";
/// PostgreSQL SQLSTATE for `check_violation`.
const SQLSTATE_CHECK_VIOLATION: &str = "23514";

/// [`Store`] backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx error onto the domain taxonomy.
///
/// Constraint and range violations are caller errors; everything else is
/// treated as a transient backend failure.
pub fn classify_sqlx_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some(SQLSTATE_OUT_OF_RANGE) => {
                return CoreError::InvalidInput("Points value out of range".into());
            }
            Some(SQLSTATE_CHECK_VIOLATION) => {
                return CoreError::InvalidInput(format!(
                    "Constraint violated: {}",
                    db_err.constraint().unwrap_or("unknown")
                ));
            }
            _ => {}
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::StoreUnavailable(err.to_string())
}

fn into_record(row: crate::models::points::StudentPointsRow) -> Result<PointsRecord, CoreError> {
    PointsRecord::try_from(row).map_err(|e| {
        tracing::error!(error = %e, "Corrupt student_points row");
        CoreError::Internal(e.to_string())
    })
}

#[async_trait]
impl PointsStore for PgStore {
    async fn read_all(&self, organization_id: DbId) -> Result<Vec<PointsRecord>, CoreError> {
        PointsRepo::list_by_organization(&self.pool, organization_id)
            .await
            .map_err(classify_sqlx_error)?
            .into_iter()
            .map(into_record)
            .collect()
    }

    async fn read_one(
        &self,
        student_id: DbId,
        organization_id: DbId,
    ) -> Result<Option<PointsRecord>, CoreError> {
        PointsRepo::find(&self.pool, student_id, organization_id)
            .await
            .map_err(classify_sqlx_error)?
            .map(into_record)
            .transpose()
    }

    async fn upsert_if_absent(
        &self,
        student_id: DbId,
        organization_id: DbId,
    ) -> Result<PointsRecord, CoreError> {
        let row = PointsRepo::insert_if_absent(&self.pool, student_id, organization_id)
            .await
            .map_err(classify_sqlx_error)?;
        into_record(row)
    }

    async fn increment_points(
        &self,
        student_id: DbId,
        organization_id: DbId,
        delta: PointsDelta,
    ) -> Result<Option<PointsRecord>, CoreError> {
        PointsRepo::increment(&self.pool, student_id, organization_id, delta)
            .await
            .map_err(classify_sqlx_error)?
            .map(into_record)
            .transpose()
    }
}

#[async_trait]
impl OrganizationStore for PgStore {
    async fn find_organization(&self, id: DbId) -> Result<Option<Organization>, CoreError> {
        Ok(OrganizationRepo::find_by_id(&self.pool, id)
            .await
            .map_err(classify_sqlx_error)?
            .map(Organization::from))
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<Organization>, CoreError> {
        Ok(OrganizationRepo::find_active_by_code(&self.pool, code)
            .await
            .map_err(classify_sqlx_error)?
            .map(Organization::from))
    }

    async fn find_profile(&self, user_id: DbId) -> Result<Option<UserProfile>, CoreError> {
        Ok(UserRepo::find_by_id(&self.pool, user_id)
            .await
            .map_err(classify_sqlx_error)?
            .map(UserProfile::from))
    }

    async fn record_membership(
        &self,
        user_id: DbId,
        organization_id: DbId,
    ) -> Result<bool, CoreError> {
        UserRepo::set_organization(&self.pool, user_id, organization_id)
            .await
            .map_err(classify_sqlx_error)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }

    async fn enroll(
        &self,
        student_id: DbId,
        organization_id: DbId,
    ) -> Result<Option<PointsRecord>, CoreError> {
        PointsRepo::enroll(&self.pool, student_id, organization_id)
            .await
            .map_err(classify_sqlx_error)?
            .map(into_record)
            .transpose()
    }
}
