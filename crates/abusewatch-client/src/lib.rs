//! HTTP client for the AbuseIPDB check-block API.
//!
//! This crate provides [`AbuseClient`], which performs one logical
//! `check_block` query per network prefix: key rotation, linear backoff,
//! retry on transport errors and 401, and recency filtering of the rows
//! the API returns.

mod checker;
mod client;
mod config;
mod keys;

pub use checker::BlockChecker;
pub use client::{AbuseClient, AbuseClientBuilder};
pub use config::RetryConfig;
pub use keys::{KeySelector, RandomSelector, RoundRobinSelector};

pub use abusewatch_core::{AbuseError, Result};
