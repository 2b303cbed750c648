//! Storage seams for points, organizations and profiles.
//!
//! Implemented by `tahfidz_db::PgStore` for PostgreSQL and by
//! [`MemoryStore`](crate::memory::MemoryStore) for tests and local runs.
//! Implementations report transient backend failures as
//! [`CoreError::StoreUnavailable`].

use async_trait::async_trait;

use crate::error::CoreError;
use crate::organization::Organization;
use crate::points::{PointsDelta, PointsRecord};
use crate::profile::UserProfile;
use crate::types::DbId;

/// Read/write access to per-student point records.
#[async_trait]
pub trait PointsStore: Send + Sync {
    /// All records of an organization in one read, ordered by total points
    /// descending then student id ascending.
    async fn read_all(&self, organization_id: DbId) -> Result<Vec<PointsRecord>, CoreError>;

    async fn read_one(
        &self,
        student_id: DbId,
        organization_id: DbId,
    ) -> Result<Option<PointsRecord>, CoreError>;

    /// Create a zeroed record unless one exists; returns the stored record.
    ///
    /// Must be idempotent under concurrent calls for the same pair.
    async fn upsert_if_absent(
        &self,
        student_id: DbId,
        organization_id: DbId,
    ) -> Result<PointsRecord, CoreError>;

    /// Atomically add `delta` to a record. Returns `None` if no record exists.
    async fn increment_points(
        &self,
        student_id: DbId,
        organization_id: DbId,
        delta: PointsDelta,
    ) -> Result<Option<PointsRecord>, CoreError>;
}

/// Lookups for organizations and their members.
#[async_trait]
pub trait OrganizationStore: Send + Sync {
    async fn find_organization(&self, id: DbId) -> Result<Option<Organization>, CoreError>;

    /// Find an active organization by its (uppercase) class code.
    async fn find_active_by_code(&self, code: &str) -> Result<Option<Organization>, CoreError>;

    async fn find_profile(&self, user_id: DbId) -> Result<Option<UserProfile>, CoreError>;

    /// Set the user's organization unless they already belong to another one.
    ///
    /// Returns `false` when the user is a member of a different organization
    /// (or does not exist), `true` when membership is now `organization_id`.
    async fn record_membership(
        &self,
        user_id: DbId,
        organization_id: DbId,
    ) -> Result<bool, CoreError>;
}

/// Everything the leaderboard service needs from a backend.
#[async_trait]
pub trait Store: PointsStore + OrganizationStore {
    /// Cheap liveness probe.
    async fn ping(&self) -> Result<(), CoreError>;

    /// Record membership and ensure the points record exists.
    ///
    /// The default runs the two steps separately; a failure in between is
    /// repaired the next time the student joins. Backends with transactions
    /// should override this to make both steps atomic.
    async fn enroll(
        &self,
        student_id: DbId,
        organization_id: DbId,
    ) -> Result<Option<PointsRecord>, CoreError> {
        if !self.record_membership(student_id, organization_id).await? {
            return Ok(None);
        }
        self.upsert_if_absent(student_id, organization_id)
            .await
            .map(Some)
    }
}
