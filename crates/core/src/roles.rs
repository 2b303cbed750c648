//! Well-known role name constants.
//!
//! These must match the `role` claim written into access tokens and the
//! CHECK constraint on `users.role` in `20260301000002_create_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TEACHER: &str = "guru";
pub const ROLE_PARENT: &str = "ortu";
pub const ROLE_STUDENT: &str = "siswa";

/// Roles that can join an organization with a class code.
pub const JOINING_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_PARENT];

/// Roles allowed to award hafalan/quiz points.
pub const GRADING_ROLES: &[&str] = &[ROLE_TEACHER, ROLE_ADMIN];

/// Whether `role` is one of the known roles.
pub fn is_known_role(role: &str) -> bool {
    matches!(role, ROLE_ADMIN | ROLE_TEACHER | ROLE_PARENT | ROLE_STUDENT)
}

pub fn can_join_organization(role: &str) -> bool {
    JOINING_ROLES.contains(&role)
}

/// Only students hold a points record and appear on the leaderboard.
/// Other joiners (parents) get membership alone.
pub fn earns_points(role: &str) -> bool {
    role == ROLE_STUDENT
}

pub fn can_award_points(role: &str) -> bool {
    GRADING_ROLES.contains(&role)
}

/// Teachers and admins see every organization's leaderboard; other roles
/// only the one they belong to.
pub fn can_view_any_leaderboard(role: &str) -> bool {
    GRADING_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn students_and_parents_join() {
        assert!(can_join_organization(ROLE_STUDENT));
        assert!(can_join_organization(ROLE_PARENT));
        assert!(!can_join_organization(ROLE_TEACHER));
        assert!(!can_join_organization(ROLE_ADMIN));
    }

    #[test]
    fn teachers_and_admins_grade() {
        assert!(can_award_points(ROLE_TEACHER));
        assert!(can_award_points(ROLE_ADMIN));
        assert!(!can_award_points(ROLE_STUDENT));
    }

    #[test]
    fn only_staff_view_any_leaderboard() {
        assert!(can_view_any_leaderboard(ROLE_TEACHER));
        assert!(!can_view_any_leaderboard(ROLE_PARENT));
        assert!(!can_view_any_leaderboard(ROLE_STUDENT));
    }

    #[test]
    fn only_students_earn_points() {
        assert!(earns_points(ROLE_STUDENT));
        assert!(!earns_points(ROLE_PARENT));
        assert!(!earns_points(ROLE_TEACHER));
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(!is_known_role("authenticated"));
        assert!(is_known_role("ortu"));
    }
}
