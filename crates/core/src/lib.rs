//! Domain layer for the project desk.
//!
//! Pure types and rules shared by the database and HTTP crates: the error
//! taxonomy, project form validation, the ownership policy, and the state of
//! the projects page as seen by the browser client. Nothing in this crate
//! performs I/O.

pub mod error;
pub mod page;
pub mod policy;
pub mod project;
pub mod types;
pub mod validation;
