//! In-memory [`Store`] used by tests and local development.
//!
//! Mirrors the PostgreSQL semantics the services rely on: one points record
//! per `(student, organization)`, `read_all` ordered by total descending then
//! student id, and membership that cannot be overwritten by another
//! organization. Failures and latency can be injected to exercise the
//! `StoreUnavailable` paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::organization::Organization;
use crate::points::{PointsDelta, PointsRecord};
use crate::profile::UserProfile;
use crate::store::{OrganizationStore, PointsStore, Store};
use crate::types::DbId;

#[derive(Default)]
struct Inner {
    organizations: HashMap<DbId, Organization>,
    profiles: HashMap<DbId, UserProfile>,
    /// Kept in insertion order.
    points: Vec<PointsRecord>,
}

/// Thread-safe in-memory backend.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    unavailable: AtomicBool,
    delay_ms: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_organization(&self, organization: Organization) {
        self.inner
            .write()
            .await
            .organizations
            .insert(organization.id, organization);
    }

    pub async fn insert_profile(&self, profile: UserProfile) {
        self.inner.write().await.profiles.insert(profile.id, profile);
    }

    /// Insert or replace a points record as-is, without validation.
    pub async fn insert_points(&self, record: PointsRecord) {
        let mut inner = self.inner.write().await;
        inner.points.retain(|r| {
            !(r.student_id == record.student_id && r.organization_id == record.organization_id)
        });
        inner.points.push(record);
    }

    /// Number of points records stored for a student in an organization.
    pub async fn points_count(&self, student_id: DbId, organization_id: DbId) -> usize {
        self.inner
            .read()
            .await
            .points
            .iter()
            .filter(|r| r.student_id == student_id && r.organization_id == organization_id)
            .count()
    }

    /// Make every subsequent call fail with `StoreUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Delay every subsequent call by `delay`.
    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    async fn check(&self) -> Result<(), CoreError> {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CoreError::StoreUnavailable(
                "memory store marked unavailable".into(),
            ));
        }
        Ok(())
    }

    fn with_name(inner: &Inner, record: &PointsRecord) -> PointsRecord {
        let name = inner
            .profiles
            .get(&record.student_id)
            .and_then(|p| p.name.clone());
        record.clone().with_display_name(name)
    }

    /// Stored records are re-validated on read; a broken one is corrupt data.
    fn checked(inner: &Inner, record: &PointsRecord) -> Result<PointsRecord, CoreError> {
        record.validate().map_err(|e| {
            tracing::error!(
                student_id = %record.student_id,
                organization_id = %record.organization_id,
                error = %e,
                "Corrupt points record"
            );
            CoreError::Internal(e.to_string())
        })?;
        Ok(Self::with_name(inner, record))
    }
}

#[async_trait]
impl PointsStore for MemoryStore {
    async fn read_all(&self, organization_id: DbId) -> Result<Vec<PointsRecord>, CoreError> {
        self.check().await?;
        let inner = self.inner.read().await;
        let mut records = inner
            .points
            .iter()
            .filter(|r| r.organization_id == organization_id)
            .map(|r| Self::checked(&inner, r))
            .collect::<Result<Vec<_>, _>>()?;
        records.sort_by(|a, b| {
            b.total_points
                .cmp(&a.total_points)
                .then_with(|| a.student_id.cmp(&b.student_id))
        });
        Ok(records)
    }

    async fn read_one(
        &self,
        student_id: DbId,
        organization_id: DbId,
    ) -> Result<Option<PointsRecord>, CoreError> {
        self.check().await?;
        let inner = self.inner.read().await;
        inner
            .points
            .iter()
            .find(|r| r.student_id == student_id && r.organization_id == organization_id)
            .map(|r| Self::checked(&inner, r))
            .transpose()
    }

    async fn upsert_if_absent(
        &self,
        student_id: DbId,
        organization_id: DbId,
    ) -> Result<PointsRecord, CoreError> {
        self.check().await?;
        let mut inner = self.inner.write().await;
        let existing = inner
            .points
            .iter()
            .find(|r| r.student_id == student_id && r.organization_id == organization_id)
            .cloned();
        let record = match existing {
            Some(record) => record,
            None => {
                let record = PointsRecord::zeroed(student_id, organization_id);
                inner.points.push(record.clone());
                record
            }
        };
        Ok(Self::with_name(&inner, &record))
    }

    async fn increment_points(
        &self,
        student_id: DbId,
        organization_id: DbId,
        delta: PointsDelta,
    ) -> Result<Option<PointsRecord>, CoreError> {
        self.check().await?;
        let mut inner = self.inner.write().await;
        let Some(record) = inner
            .points
            .iter_mut()
            .find(|r| r.student_id == student_id && r.organization_id == organization_id)
        else {
            return Ok(None);
        };
        record.apply(delta)?;
        let updated = record.clone();
        Ok(Some(Self::with_name(&inner, &updated)))
    }
}

#[async_trait]
impl OrganizationStore for MemoryStore {
    async fn find_organization(&self, id: DbId) -> Result<Option<Organization>, CoreError> {
        self.check().await?;
        Ok(self.inner.read().await.organizations.get(&id).cloned())
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<Organization>, CoreError> {
        self.check().await?;
        Ok(self
            .inner
            .read()
            .await
            .organizations
            .values()
            .find(|o| o.is_active && o.code == code)
            .cloned())
    }

    async fn find_profile(&self, user_id: DbId) -> Result<Option<UserProfile>, CoreError> {
        self.check().await?;
        Ok(self.inner.read().await.profiles.get(&user_id).cloned())
    }

    async fn record_membership(
        &self,
        user_id: DbId,
        organization_id: DbId,
    ) -> Result<bool, CoreError> {
        self.check().await?;
        let mut inner = self.inner.write().await;
        let Some(profile) = inner.profiles.get_mut(&user_id) else {
            return Ok(false);
        };
        match profile.organization_id {
            Some(current) if current != organization_id => Ok(false),
            _ => {
                profile.organization_id = Some(organization_id);
                Ok(true)
            }
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), CoreError> {
        self.check().await
    }
}
