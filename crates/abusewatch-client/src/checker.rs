//! The seam between the query engine and the HTTP client.

use abusewatch_core::{ReportRow, Result};
use async_trait::async_trait;

use crate::AbuseClient;

/// Anything that can resolve a network prefix to its recent report rows.
///
/// The worker pool depends on this trait rather than on [`AbuseClient`]
/// directly, so pool behavior is testable without a live endpoint.
#[async_trait]
pub trait BlockChecker: Send + Sync {
    /// Query one network prefix for recently-reported addresses
    async fn check_block(&self, network: &str) -> Result<Vec<ReportRow>>;
}

#[async_trait]
impl BlockChecker for AbuseClient {
    async fn check_block(&self, network: &str) -> Result<Vec<ReportRow>> {
        Self::check_block(self, network).await
    }
}
