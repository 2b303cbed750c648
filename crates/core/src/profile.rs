//! User profile as seen by the leaderboard and join flows.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: DbId,
    pub name: Option<String>,
    pub role: String,
    /// The organization the user belongs to, if any.
    pub organization_id: Option<DbId>,
}

impl UserProfile {
    pub fn is_member_of(&self, organization_id: DbId) -> bool {
        self.organization_id == Some(organization_id)
    }
}
