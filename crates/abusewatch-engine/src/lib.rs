//! Concurrent query engine for abusewatch.
//!
//! Takes a deduplicated list of network prefixes, fans them out to a fixed
//! set of workers querying the check-block API, merges the per-network rows
//! into one collection, and ranks it by abuse confidence score.

mod pool;
mod prefixes;
mod rank;

pub use pool::{PoolConfig, WorkerPool};
pub use prefixes::dedup_prefixes;
pub use rank::rank_rows;
