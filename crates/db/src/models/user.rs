//! User profile entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tahfidz_core::profile::UserProfile;
use tahfidz_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRow {
    pub id: DbId,
    pub name: Option<String>,
    pub role: String,
    pub organization_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for mirroring an auth user into `users`.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub id: DbId,
    pub name: Option<String>,
    pub role: String,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        UserProfile {
            id: row.id,
            name: row.name,
            role: row.role,
            organization_id: row.organization_id,
        }
    }
}
