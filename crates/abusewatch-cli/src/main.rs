//! abusewatch - weekly AbuseIPDB abuse reports for your networks.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    abusewatch_cli::run().await
}
