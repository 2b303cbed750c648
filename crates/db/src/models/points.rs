//! Student points model.

use serde::Serialize;
use sqlx::FromRow;
use tahfidz_core::error::CoreError;
use tahfidz_core::points::PointsRecord;
use tahfidz_core::types::{DbId, Points};

/// A `student_points` row joined with the student's profile name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentPointsRow {
    pub student_id: DbId,
    pub organization_id: DbId,
    pub total_points: Points,
    pub hafalan_points: Points,
    pub quiz_points: Points,
    pub display_name: Option<String>,
}

impl TryFrom<StudentPointsRow> for PointsRecord {
    type Error = CoreError;

    fn try_from(row: StudentPointsRow) -> Result<Self, Self::Error> {
        PointsRecord::new(
            row.student_id,
            row.organization_id,
            row.total_points,
            row.hafalan_points,
            row.quiz_points,
        )
        .map(|r| r.with_display_name(row.display_name))
    }
}
