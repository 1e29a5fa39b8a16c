//! Driven ports (Outbound dependencies)

use crate::domain::{BlockHeader, DiagnosticEvent, Hash};

/// Read-only view of the chain consulted by attached rules
///
/// Implementations must be cheap and non-blocking: headers are expected to
/// be materialized already.
pub trait ChainContext: Send + Sync {
    /// Look up a known header by hash
    fn header_by_hash(&self, hash: &Hash) -> Option<BlockHeader>;

    /// Height of the current chain head
    fn head_number(&self) -> u64;

    /// Current unix timestamp in seconds as seen by this context
    fn now(&self) -> u64;
}

/// Destination for diagnostic events
///
/// `record` must never block and never fail. A sink that cannot keep up
/// drops events.
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: DiagnosticEvent);
}

/// Time source used by chain context adapters
pub trait TimeSource: Send + Sync {
    /// Get current unix timestamp in seconds
    fn now(&self) -> u64;
}

/// Default time source using system time
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Fixed time source for tests and offline tooling
pub struct FixedTimeSource(pub u64);

impl TimeSource for FixedTimeSource {
    fn now(&self) -> u64 {
        self.0
    }
}
