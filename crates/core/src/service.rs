//! Leaderboard query, join and points-award operations.
//!
//! [`LeaderboardService`] owns a [`Store`] handle and bounds every store call
//! by `store_timeout`; an elapsed timeout is reported as
//! [`CoreError::StoreUnavailable`] so callers can retry.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::error::{require_id, CoreError};
use crate::organization::normalize_class_code;
use crate::points::{PointsDelta, PointsRecord};
use crate::ranking::{podium, rank, top_by, PointsCategory, RankedEntry};
use crate::roles::{can_view_any_leaderboard, earns_points};
use crate::store::Store;
use crate::types::DbId;

/// Default bound on a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// A computed leaderboard for one organization, from one requester's view.
#[derive(Debug, Clone, Serialize)]
pub struct Leaderboard {
    pub organization_id: DbId,
    pub all: Vec<RankedEntry>,
    /// The requester's own entry, if they have a points record.
    pub mine: Option<RankedEntry>,
    pub top_hafalan: Option<RankedEntry>,
    pub top_quiz: Option<RankedEntry>,
    /// Top three entries; empty when fewer than three students are ranked.
    pub podium: Vec<RankedEntry>,
}

/// Result of a successful join.
#[derive(Debug, Clone, Serialize)]
pub struct JoinOutcome {
    pub organization_id: DbId,
    pub organization_name: String,
    /// `false` when the user was already a member and this was a retry.
    pub newly_joined: bool,
    /// The student's points record; `None` for joiners who are not ranked.
    pub points: Option<PointsRecord>,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct LeaderboardService {
    store: Arc<dyn Store>,
    store_timeout: Duration,
}

impl LeaderboardService {
    pub fn new(store: Arc<dyn Store>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        match tokio::time::timeout(self.store_timeout, fut).await {
            Ok(res) => res,
            Err(_) => {
                tracing::warn!(
                    op,
                    timeout_ms = self.store_timeout.as_millis() as u64,
                    "Store call timed out"
                );
                Err(CoreError::StoreUnavailable(format!("{op} timed out")))
            }
        }
    }

    /// Probe the backing store.
    pub async fn ping(&self) -> Result<(), CoreError> {
        self.bounded("ping", self.store.ping()).await
    }

    /// Check that `viewer_id` with `role` may see `organization_id`'s leaderboard.
    pub async fn ensure_can_view(
        &self,
        viewer_id: DbId,
        role: &str,
        organization_id: DbId,
    ) -> Result<(), CoreError> {
        if can_view_any_leaderboard(role) {
            return Ok(());
        }
        let profile = self
            .bounded("find_profile", self.store.find_profile(viewer_id))
            .await?;
        match profile {
            Some(p) if p.is_member_of(organization_id) => Ok(()),
            _ => Err(CoreError::Forbidden(
                "Leaderboard is only visible to members of the organization".into(),
            )),
        }
    }

    /// Compute the leaderboard of `organization_id` for `requester_id`.
    pub async fn get_leaderboard(
        &self,
        organization_id: DbId,
        requester_id: DbId,
    ) -> Result<Leaderboard, CoreError> {
        require_id(organization_id, "organization_id")?;
        require_id(requester_id, "requester_id")?;

        self.bounded("find_organization", self.store.find_organization(organization_id))
            .await?
            .ok_or_else(|| CoreError::not_found("Organization", organization_id))?;

        let records = self
            .bounded("read_all", self.store.read_all(organization_id))
            .await?;
        let all = rank(&records, organization_id)?;

        let mine = all.iter().find(|e| e.student_id == requester_id).cloned();
        let top_hafalan = top_by(&all, PointsCategory::Hafalan).cloned();
        let top_quiz = top_by(&all, PointsCategory::Quiz).cloned();
        let podium = podium(&all).map(<[_]>::to_vec).unwrap_or_default();

        tracing::debug!(
            %organization_id,
            %requester_id,
            entries = all.len(),
            ranked = mine.is_some(),
            "Leaderboard computed"
        );

        Ok(Leaderboard {
            organization_id,
            all,
            mine,
            top_hafalan,
            top_quiz,
            podium,
        })
    }

    /// Join `user_id` to the active organization identified by `class_code`.
    ///
    /// Students also get a zeroed points record; other joiners only get
    /// membership. Re-joining the same organization succeeds and re-creates a
    /// missing student record; joining while a member elsewhere is a conflict.
    pub async fn join_organization(
        &self,
        user_id: DbId,
        class_code: &str,
    ) -> Result<JoinOutcome, CoreError> {
        require_id(user_id, "user_id")?;
        let code = normalize_class_code(class_code)?;

        let organization = self
            .bounded("find_active_by_code", self.store.find_active_by_code(&code))
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "Active organization with code",
                id: code.clone(),
            })?;

        let profile = self
            .bounded("find_profile", self.store.find_profile(user_id))
            .await?
            .ok_or_else(|| CoreError::not_found("User", user_id))?;
        let ranked = earns_points(&profile.role);

        let conflict =
            || CoreError::Conflict("User already belongs to another organization".into());

        if let Some(current) = profile.organization_id {
            if current != organization.id {
                return Err(conflict());
            }
            let points = if ranked {
                Some(
                    self.bounded(
                        "upsert_if_absent",
                        self.store.upsert_if_absent(user_id, organization.id),
                    )
                    .await?,
                )
            } else {
                None
            };
            tracing::info!(
                %user_id,
                organization_id = %organization.id,
                ranked,
                "Join retried"
            );
            return Ok(JoinOutcome {
                organization_id: organization.id,
                organization_name: organization.name,
                newly_joined: false,
                points,
            });
        }

        let points = if ranked {
            Some(
                self.bounded("enroll", self.store.enroll(user_id, organization.id))
                    .await?
                    .ok_or_else(conflict)?,
            )
        } else {
            let recorded = self
                .bounded(
                    "record_membership",
                    self.store.record_membership(user_id, organization.id),
                )
                .await?;
            if !recorded {
                return Err(conflict());
            }
            None
        };

        tracing::info!(
            %user_id,
            organization_id = %organization.id,
            role = %profile.role,
            "User joined organization"
        );

        Ok(JoinOutcome {
            organization_id: organization.id,
            organization_name: organization.name,
            newly_joined: true,
            points,
        })
    }

    /// Add hafalan/quiz points to an existing record.
    pub async fn award_points(
        &self,
        student_id: DbId,
        organization_id: DbId,
        delta: PointsDelta,
    ) -> Result<PointsRecord, CoreError> {
        require_id(student_id, "student_id")?;
        require_id(organization_id, "organization_id")?;
        delta.validate()?;

        let record = self
            .bounded(
                "increment_points",
                self.store.increment_points(student_id, organization_id, delta),
            )
            .await?
            .ok_or_else(|| CoreError::not_found("Points record for student", student_id))?;

        tracing::info!(
            %student_id,
            %organization_id,
            hafalan = delta.hafalan,
            quiz = delta.quiz,
            total = record.total_points,
            "Points awarded"
        );

        Ok(record)
    }
}
