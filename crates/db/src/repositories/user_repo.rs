//! Repository for the `users` table.

use sqlx::PgPool;
use tahfidz_core::types::DbId;

use crate::models::user::{CreateUser, UserRow};

const COLUMNS: &str = "id, name, role, organization_id, created_at, updated_at";

/// Provides profile lookups and membership updates.
pub struct UserRepo;

impl UserRepo {
    /// Insert a profile for an auth user, or refresh its name and role.
    pub async fn upsert(pool: &PgPool, input: &CreateUser) -> Result<UserRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, name, role) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, role = EXCLUDED.role \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set the user's organization unless they belong to a different one.
    ///
    /// Returns `true` if the user now belongs to `organization_id`.
    pub async fn set_organization(
        pool: &PgPool,
        id: DbId,
        organization_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET organization_id = $2 \
             WHERE id = $1 AND (organization_id IS NULL OR organization_id = $2)",
        )
        .bind(id)
        .bind(organization_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
