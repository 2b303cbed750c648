//! Access-token verification.
//!
//! Tokens are issued by the hosted auth backend; this service only verifies
//! them and never mints tokens outside of tests.

pub mod jwt;
