//! Per-student, per-organization point records and their validation.
//!
//! A [`PointsRecord`] is the validated form of a `student_points` row. Rows
//! coming back from the database are parsed through [`PointsRecord::new`] so
//! negative values and a broken `total = hafalan + quiz` sum never reach the
//! ranking engine.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Points};

/// Accumulated points for one student in one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsRecord {
    pub student_id: DbId,
    pub organization_id: DbId,
    pub total_points: Points,
    pub hafalan_points: Points,
    pub quiz_points: Points,
    /// Profile name joined in at read time; not part of the points row.
    pub display_name: Option<String>,
}

impl PointsRecord {
    /// Build a record, enforcing non-negative fields and the sum invariant.
    pub fn new(
        student_id: DbId,
        organization_id: DbId,
        total_points: Points,
        hafalan_points: Points,
        quiz_points: Points,
    ) -> Result<Self, CoreError> {
        let record = Self {
            student_id,
            organization_id,
            total_points,
            hafalan_points,
            quiz_points,
            display_name: None,
        };
        record.validate()?;
        Ok(record)
    }

    /// A zeroed record, as created when a student joins an organization.
    pub fn zeroed(student_id: DbId, organization_id: DbId) -> Self {
        Self {
            student_id,
            organization_id,
            total_points: 0,
            hafalan_points: 0,
            quiz_points: 0,
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: Option<String>) -> Self {
        self.display_name = name;
        self
    }

    /// Check the construction invariants of a record.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.hafalan_points < 0 || self.quiz_points < 0 || self.total_points < 0 {
            return Err(CoreError::InvalidInput(format!(
                "Points for student {} must not be negative",
                self.student_id
            )));
        }
        let sum = self.hafalan_points.checked_add(self.quiz_points);
        if sum != Some(self.total_points) {
            return Err(CoreError::InvalidInput(format!(
                "Points for student {}: total {} != hafalan {} + quiz {}",
                self.student_id, self.total_points, self.hafalan_points, self.quiz_points
            )));
        }
        Ok(())
    }

    /// Apply a delta, keeping the total equal to the sum of its parts.
    pub fn apply(&mut self, delta: PointsDelta) -> Result<(), CoreError> {
        let overflow = || CoreError::InvalidInput("Points total would overflow".into());
        let hafalan = self
            .hafalan_points
            .checked_add(delta.hafalan)
            .ok_or_else(overflow)?;
        let quiz = self.quiz_points.checked_add(delta.quiz).ok_or_else(overflow)?;
        let total = hafalan.checked_add(quiz).ok_or_else(overflow)?;
        self.hafalan_points = hafalan;
        self.quiz_points = quiz;
        self.total_points = total;
        Ok(())
    }
}

/// Points to add to a record's hafalan and quiz components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointsDelta {
    #[serde(default)]
    pub hafalan: Points,
    #[serde(default)]
    pub quiz: Points,
}

impl PointsDelta {
    /// Awards only add points: both parts non-negative, at least one positive.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.hafalan < 0 || self.quiz < 0 {
            return Err(CoreError::InvalidInput(
                "Point deltas must not be negative".into(),
            ));
        }
        if self.hafalan == 0 && self.quiz == 0 {
            return Err(CoreError::InvalidInput(
                "At least one point delta must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    #[test]
    fn valid_record_is_accepted() {
        let r = PointsRecord::new(Uuid::new_v4(), Uuid::new_v4(), 60, 40, 20).unwrap();
        assert_eq!(r.total_points, 60);
        assert!(r.display_name.is_none());
    }

    #[test]
    fn broken_sum_is_rejected() {
        let res = PointsRecord::new(Uuid::new_v4(), Uuid::new_v4(), 61, 40, 20);
        assert_matches!(res, Err(CoreError::InvalidInput(msg)) if msg.contains("total 61"));
    }

    #[test]
    fn negative_component_is_rejected() {
        let res = PointsRecord::new(Uuid::new_v4(), Uuid::new_v4(), 0, 10, -10);
        assert_matches!(res, Err(CoreError::InvalidInput(_)));
    }

    #[test]
    fn zeroed_record_is_valid() {
        let r = PointsRecord::zeroed(Uuid::new_v4(), Uuid::new_v4());
        assert!(r.validate().is_ok());
        assert_eq!((r.total_points, r.hafalan_points, r.quiz_points), (0, 0, 0));
    }

    #[test]
    fn apply_keeps_total_in_sync() {
        let mut r = PointsRecord::zeroed(Uuid::new_v4(), Uuid::new_v4());
        r.apply(PointsDelta { hafalan: 15, quiz: 5 }).unwrap();
        r.apply(PointsDelta { hafalan: 0, quiz: 10 }).unwrap();
        assert_eq!(r.hafalan_points, 15);
        assert_eq!(r.quiz_points, 15);
        assert_eq!(r.total_points, 30);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn apply_rejects_overflow_without_mutating() {
        let mut r = PointsRecord::new(Uuid::new_v4(), Uuid::new_v4(), i32::MAX, i32::MAX, 0)
            .unwrap();
        let res = r.apply(PointsDelta { hafalan: 1, quiz: 0 });
        assert_matches!(res, Err(CoreError::InvalidInput(_)));
        assert_eq!(r.hafalan_points, i32::MAX);
    }

    #[test]
    fn delta_must_be_positive() {
        assert!(PointsDelta { hafalan: 10, quiz: 0 }.validate().is_ok());
        assert_matches!(
            PointsDelta::default().validate(),
            Err(CoreError::InvalidInput(_))
        );
        assert_matches!(
            PointsDelta { hafalan: 5, quiz: -1 }.validate(),
            Err(CoreError::InvalidInput(_))
        );
    }
}
