//! API key selection.
//!
//! Key choice is injected so retry and rotation behavior can be made
//! deterministic in tests; production code uses [`RandomSelector`].

use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Chooses which API key an attempt should use
pub trait KeySelector: Send + Sync {
    /// Return an index in `0..len`; `len` is never zero
    fn pick(&self, len: usize) -> usize;
}

/// Uniform random key selection, one independent draw per attempt
#[derive(Debug, Default)]
pub struct RandomSelector;

impl KeySelector for RandomSelector {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic rotation through the key set in order
#[derive(Debug, Default)]
pub struct RoundRobinSelector {
    next: AtomicUsize,
}

impl KeySelector for RoundRobinSelector {
    fn pick(&self, len: usize) -> usize {
        self.next.fetch_add(1, Ordering::Relaxed) % len
    }
}
