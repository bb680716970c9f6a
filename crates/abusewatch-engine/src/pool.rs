//! Bounded worker pool over the check-block client.

use std::sync::Arc;
use std::time::Duration;

use abusewatch_client::BlockChecker;
use abusewatch_core::ReportRow;
use futures_util::future::join_all;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

/// Worker pool configuration
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of concurrent workers
    pub concurrency: usize,

    /// Delay each worker observes after finishing a job, throttling the
    /// aggregate request rate independent of per-request backoff
    pub job_delay: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            concurrency: 20,
            job_delay: Duration::from_millis(50),
        }
    }
}

/// Dispatches network prefixes to a fixed set of workers and merges the
/// resulting rows into one collection.
///
/// Per-network failures are logged and skipped; one bad network never aborts
/// the pool or hides the results of the others.
pub struct WorkerPool<C> {
    checker: Arc<C>,
    config: PoolConfig,
}

impl<C: BlockChecker + 'static> WorkerPool<C> {
    /// Create a pool with default configuration
    #[must_use]
    pub fn new(checker: C) -> Self {
        Self::with_config(checker, PoolConfig::default())
    }

    /// Create a pool with custom configuration
    #[must_use]
    pub fn with_config(checker: C, config: PoolConfig) -> Self {
        Self {
            checker: Arc::new(checker),
            config,
        }
    }

    /// Query every network and return the merged, unranked rows.
    ///
    /// Jobs flow through a single capacity-1 channel: dispatch blocks until a
    /// worker is free, which is the pool's only backpressure mechanism.
    /// Returns after every worker has drained its jobs and exited.
    pub async fn process_networks(&self, networks: Vec<String>) -> Vec<ReportRow> {
        let (tx, rx) = mpsc::channel::<String>(1);
        let rx = Arc::new(Mutex::new(rx));
        let rows = Arc::new(Mutex::new(Vec::new()));

        let workers = self.config.concurrency.max(1);
        debug!(workers, jobs = networks.len(), "starting worker pool");

        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let rx = Arc::clone(&rx);
            let rows = Arc::clone(&rows);
            let checker = Arc::clone(&self.checker);
            let delay = self.config.job_delay;

            handles.push(tokio::spawn(async move {
                loop {
                    // Hold the receiver lock only while taking the next job.
                    let job = rx.lock().await.recv().await;
                    let Some(network) = job else { break };

                    match checker.check_block(&network).await {
                        Ok(batch) if !batch.is_empty() => {
                            rows.lock().await.extend(batch);
                        }
                        Ok(_) => {}
                        Err(e) => warn!(network = %network, error = %e, "network query failed"),
                    }

                    tokio::time::sleep(delay).await;
                }
            }));
        }

        for network in networks {
            // Only fails if every worker is gone, which means a panic; the
            // remaining jobs have nowhere to go.
            if tx.send(network).await.is_err() {
                warn!("all workers exited before dispatch finished");
                break;
            }
        }
        drop(tx);

        join_all(handles).await;

        let mut rows = rows.lock().await;
        let rows = std::mem::take(&mut *rows);
        debug!(rows = rows.len(), "worker pool finished");
        rows
    }
}
