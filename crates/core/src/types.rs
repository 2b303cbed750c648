/// All identifiers are UUIDs issued by the auth backend (users) or
/// generated by PostgreSQL (`gen_random_uuid()`).
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Point values as stored in the `student_points` table (PostgreSQL `INTEGER`).
pub type Points = i32;
