//! Core types and errors for the abusewatch report engine.
//!
//! This crate provides the foundational pieces shared across the workspace:
//!
//! - **Types**: the check-block wire format and the [`ReportRow`] records
//!   the engine aggregates
//! - **Errors**: the error taxonomy in [`AbuseError`]

mod error;
pub mod types;

pub use error::{AbuseError, Result};
pub use types::*;
