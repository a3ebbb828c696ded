//! How many transport channels a client opens.
//!
//! The CPU count is only a hint; a hint of `0` means unknown and selects the
//! fixed fallback size. Several channels per CPU are opened to increase
//! throughput.

use std::io;
use std::num::NonZeroUsize;

/// Channels opened per reported CPU.
pub const DEFAULT_CHANNELS_PER_CPU: usize = 2;

/// Pool size used when the CPU count is unknown.
pub const DEFAULT_CONNECTION_POOL_SIZE: usize = 4;

/// Tunable connection pool sizing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSizing {
    pub channels_per_cpu: usize,
    pub fallback_pool_size: usize,
}

impl Default for PoolSizing {
    fn default() -> Self {
        Self {
            channels_per_cpu: DEFAULT_CHANNELS_PER_CPU,
            fallback_pool_size: DEFAULT_CONNECTION_POOL_SIZE,
        }
    }
}

impl PoolSizing {
    /// Pool size for a hardware concurrency hint, where `0` means unknown.
    ///
    /// Never returns 0, even with a zero multiplier or fallback.
    pub fn pool_size(&self, concurrency_hint: usize) -> usize {
        let size = if concurrency_hint > 0 {
            concurrency_hint.saturating_mul(self.channels_per_cpu)
        } else {
            self.fallback_pool_size
        };
        size.max(1)
    }
}

/// CPUs available to this process (cgroup quotas included), `0` when the
/// platform cannot tell.
pub fn concurrency_hint() -> usize {
    hint_from(std::thread::available_parallelism())
}

fn hint_from(parallelism: io::Result<NonZeroUsize>) -> usize {
    parallelism.map(NonZeroUsize::get).unwrap_or(0)
}

/// Default pool size for this machine.
pub fn compute_default_pool_size() -> usize {
    PoolSizing::default().pool_size(concurrency_hint())
}
