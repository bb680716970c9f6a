//! # abusewatch-cli
//!
//! Command-line frontend for the abusewatch engine:
//!
//! - **Config**: YAML file with per-field defaults and env overrides
//! - **Engine**: deduplicates prefixes and runs the worker pool
//! - **Report**: renders the ranked rows as a standalone HTML page

pub mod cli;
pub mod config;
pub mod report;

pub use cli::run;
