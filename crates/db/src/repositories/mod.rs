//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod organization_repo;
pub mod points_repo;
pub mod user_repo;

pub use organization_repo::OrganizationRepo;
pub use points_repo::PointsRepo;
pub use user_repo::UserRepo;
