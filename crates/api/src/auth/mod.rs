//! Authentication primitives.
//!
//! - [`password`] -- Argon2id hashing and constant-shape verification.
//! - [`jwt`] -- HS256 access tokens identifying the caller.

pub mod jwt;
pub mod password;
