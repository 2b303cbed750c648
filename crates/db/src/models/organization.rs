//! Organization entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tahfidz_core::organization::Organization;
use tahfidz_core::types::{DbId, Timestamp};

/// A row from the `organizations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrganizationRow {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an organization. `code` must already be normalized.
#[derive(Debug, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub code: String,
    pub is_active: Option<bool>,
}

impl From<OrganizationRow> for Organization {
    fn from(row: OrganizationRow) -> Self {
        Organization {
            id: row.id,
            name: row.name,
            code: row.code,
            is_active: row.is_active,
        }
    }
}
