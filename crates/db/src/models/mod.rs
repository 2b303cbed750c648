//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` struct matching the database row and,
//! where rows feed the domain layer, the conversion into the validated
//! `tahfidz_core` type.

pub mod organization;
pub mod points;
pub mod user;
