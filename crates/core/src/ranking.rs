//! Leaderboard ranking engine: ordering, category leaders and the podium.
//!
//! Everything here is a pure function over an in-memory snapshot of
//! [`PointsRecord`]s. Ranks are positional: after a stable sort by total
//! points descending, the entry at index `i` gets rank `i + 1`. Students
//! with equal totals therefore receive distinct ranks in input order.

use serde::{Deserialize, Serialize};

use crate::error::{require_id, CoreError};
use crate::points::PointsRecord;
use crate::types::{DbId, Points};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Name shown for a student whose profile has no name.
pub const UNKNOWN_DISPLAY_NAME: &str = "Unknown";

/// Number of entries shown on the podium.
pub const PODIUM_SIZE: usize = 3;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One row of a computed leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub student_id: DbId,
    pub display_name: String,
    pub total_points: Points,
    pub hafalan_points: Points,
    pub quiz_points: Points,
    /// 1-based position within the organization.
    pub rank: u32,
    /// "Juara 1" to "Juara 3" for the podium ranks, otherwise `None`.
    pub placement: Option<String>,
}

/// Point category used to pick category leaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsCategory {
    Hafalan,
    Quiz,
}

impl PointsCategory {
    pub fn value_of(self, entry: &RankedEntry) -> Points {
        match self {
            Self::Hafalan => entry.hafalan_points,
            Self::Quiz => entry.quiz_points,
        }
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Rank the records belonging to `organization_id`.
///
/// Records from other organizations are dropped before ranking. Any record
/// of the organization that breaks the points invariants fails the call.
pub fn rank(
    records: &[PointsRecord],
    organization_id: DbId,
) -> Result<Vec<RankedEntry>, CoreError> {
    require_id(organization_id, "organization_id")?;

    let mut members: Vec<&PointsRecord> = records
        .iter()
        .filter(|r| r.organization_id == organization_id)
        .collect();

    for record in &members {
        record.validate()?;
    }

    // `sort_by` is stable: equal totals keep their input order.
    members.sort_by(|a, b| b.total_points.cmp(&a.total_points));

    Ok(members
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            let rank = (i + 1) as u32;
            RankedEntry {
                student_id: r.student_id,
                display_name: r
                    .display_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .unwrap_or(UNKNOWN_DISPLAY_NAME)
                    .to_string(),
                total_points: r.total_points,
                hafalan_points: r.hafalan_points,
                quiz_points: r.quiz_points,
                rank,
                placement: placement_label(rank).map(str::to_string),
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Category leaders
// ---------------------------------------------------------------------------

/// The entry with the most points in `category`, or `None` when empty.
///
/// On ties the first entry in the given order wins.
pub fn top_by(entries: &[RankedEntry], category: PointsCategory) -> Option<&RankedEntry> {
    entries.iter().fold(None, |best, entry| match best {
        Some(b) if category.value_of(entry) <= category.value_of(b) => Some(b),
        _ => Some(entry),
    })
}

// ---------------------------------------------------------------------------
// Podium
// ---------------------------------------------------------------------------

/// The top three entries, only when there are at least three.
pub fn podium(entries: &[RankedEntry]) -> Option<&[RankedEntry]> {
    (entries.len() >= PODIUM_SIZE).then(|| &entries[..PODIUM_SIZE])
}

/// Placement label shown next to podium ranks.
pub fn placement_label(rank: u32) -> Option<&'static str> {
    match rank {
        1 => Some("Juara 1"),
        2 => Some("Juara 2"),
        3 => Some("Juara 3"),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
