//! Repository for the `organizations` table.

use sqlx::PgPool;
use tahfidz_core::types::DbId;

use crate::models::organization::{CreateOrganization, OrganizationRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, is_active, created_at, updated_at";

/// Provides lookups and inserts for organizations.
pub struct OrganizationRepo;

impl OrganizationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateOrganization,
    ) -> Result<OrganizationRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO organizations (name, code, is_active) \
             VALUES ($1, $2, COALESCE($3, TRUE)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrganizationRow>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OrganizationRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations WHERE id = $1");
        sqlx::query_as::<_, OrganizationRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active organization by class code (expects uppercase input).
    pub async fn find_active_by_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<OrganizationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM organizations WHERE code = $1 AND is_active = TRUE"
        );
        sqlx::query_as::<_, OrganizationRow>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }
}
