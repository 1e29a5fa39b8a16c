//! Error types for the header validation subsystem
//!
//! Three layers, never mixed:
//! - [`ConfigError`]: bad rule or schedule parameters, fatal at startup
//! - [`HeaderViolation`]: a header broke a consensus rule; carried as data
//!   inside a failing [`Verdict`](super::Verdict), never returned as `Err`
//! - [`EngineFault`]: the engine itself was misused or hit an impossible
//!   state; always surfaced as `Err`

use super::Hash;
use serde::Serialize;

/// Rule and schedule construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {parameter}: {reason}")]
    InvalidConfiguration {
        parameter: &'static str,
        reason: String,
    },

    #[error("Rule set must contain at least one rule")]
    EmptyRuleSet,

    #[error("Rule schedule must contain at least one milestone")]
    EmptySchedule,

    #[error("First milestone must activate at height 0, got {0}")]
    GenesisMilestoneMissing(u64),

    #[error("Milestone {name} activates at {activation_height}, not after previous {previous}")]
    MilestoneOrder {
        name: String,
        activation_height: u64,
        previous: u64,
    },

    #[error("Failed to parse schedule: {0}")]
    Parse(String),
}

impl ConfigError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            parameter,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Consensus rule violations
///
/// The `Display` text is the human-readable rejection reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum HeaderViolation {
    #[error(
        "timestamp {timestamp} is only {delta} seconds newer than parent timestamp \
         {parent_timestamp}. Minimum {minimum_seconds_since_parent} seconds"
    )]
    TimestampTooClose {
        timestamp: u64,
        parent_timestamp: u64,
        delta: i128,
        minimum_seconds_since_parent: i64,
    },

    #[error("Invalid block number: expected {expected}, got {actual}")]
    InvalidNumber { expected: u64, actual: u64 },

    #[error("Parent hash mismatch: header references {referenced:?}, parent is {actual:?}")]
    ParentHashMismatch { referenced: Hash, actual: Hash },

    #[error("Gas used exceeds limit: {used} > {limit}")]
    GasUsedExceedsLimit { used: u64, limit: u64 },

    #[error("Gas limit {limit} outside allowed range [{minimum}, {maximum}]")]
    GasLimitOutOfRange {
        limit: u64,
        minimum: u64,
        maximum: u64,
    },

    #[error("Gas limit {limit} moved {delta} from parent {parent_limit}, bound is below {bound}")]
    GasLimitDeltaTooLarge {
        limit: u64,
        parent_limit: u64,
        delta: u64,
        bound: u64,
    },

    #[error("Extra data too large: {size} bytes > {limit} bytes")]
    ExtraDataTooLarge { size: usize, limit: usize },

    #[error("Unknown parent block: {parent_hash:?}")]
    UnknownParent { parent_hash: Hash },

    #[error("Timestamp too far in future: {timestamp}, current is {current}, max drift {max_drift_secs}")]
    FutureTimestamp {
        timestamp: u64,
        current: u64,
        max_drift_secs: u64,
    },

    #[error("Timestamp {timestamp} not after median {median} of last {window} ancestors")]
    TimestampNotAfterMedian {
        timestamp: u64,
        median: u64,
        window: usize,
    },
}

/// Programming-contract violations inside the engine
///
/// These are never consensus outcomes. Callers must not translate them into
/// accept/reject decisions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineFault {
    #[error("Header {number} is not genesis but no parent was supplied")]
    MissingParent { number: u64 },

    #[error("Rule {rule} requires chain context but none was supplied")]
    MissingContext { rule: &'static str },

    #[error("Arithmetic overflow in rule {rule}: {detail}")]
    ArithmeticOverflow { rule: &'static str, detail: String },
}

/// Result type for rule evaluation
pub type RuleResult<T> = Result<T, EngineFault>;
