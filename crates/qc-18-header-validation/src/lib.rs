//! # qc-18-header-validation
//!
//! Header validation subsystem for Quantum-Chain.
//!
//! ## Architecture
//!
//! Candidate headers are checked against an ordered set of consensus rules
//! before a block may join the canonical chain. The subsystem decides
//! validity only; it never stores, executes or propagates blocks.
//!
//! ```text
//! RuleSchedule ──rules_for(number)──→ RuleSet
//!                                        │
//!                                        ↓
//!     (header, parent, context) ──→ HeaderValidator ──→ Verdict
//!                                        │
//!                                        ↓
//!                                 DiagnosticsSink
//! ```
//!
//! ### Rules
//!
//! Rules come in two shapes. Detached rules see only `(header, parent)`;
//! attached rules also read a [`ChainContext`]. All rules are immutable
//! after construction and shared by `Arc` across concurrent validations.
//!
//! ### Outcomes
//!
//! - A rejected header is a normal [`Verdict`], never an `Err`.
//! - [`EngineFault`] is reserved for contract violations such as a missing
//!   parent or chain context.
//! - [`ConfigError`] is raised while building rules and schedules.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use qc_18_header_validation::{
//!     HeaderValidationApi, HeaderValidationService, RuleSchedule, RuleSet,
//!     TimestampSpacingRule, ValidationConfig,
//! };
//!
//! let config = ValidationConfig::process();
//! let rules = RuleSet::builder()
//!     .detached(TimestampSpacingRule::new(1, config)?)
//!     .build()?;
//! let service = HeaderValidationService::with_tracing(Arc::new(RuleSchedule::single(rules)));
//!
//! let verdict = service.validate_header(&header, Some(&parent), None)?;
//! ```
//!
//! ## Development override
//!
//! Setting `QC_X_DEV_SHORT_BLOCK_PERIOD_MS` disables timestamp spacing for
//! sub-second test networks. Every skipped check is logged at WARN. Never
//! set it in production.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod pipeline;
pub mod ports;
pub mod rules;
pub mod schedule;
pub mod service;

#[cfg(test)]
mod test_support;

// Re-export main types
pub use adapters::{ChannelSink, FanoutSink, InMemoryChain, MemorySink, TracingSink};
pub use config::{
    MilestoneConfig, RuleConfig, ScheduleConfig, ValidationConfig, DEV_SHORT_BLOCK_PERIOD_ENV,
};
pub use domain::{
    BlockHeader, BypassNotice, ConfigError, DiagnosticEvent, DiagnosticKind, DiagnosticLevel,
    EngineFault, Hash, HeaderViolation, RuleFailure, RuleOutcome, Verdict,
};
pub use pipeline::HeaderValidator;
pub use ports::{ChainContext, DiagnosticsSink, HeaderValidationApi, TimeSource};
pub use rules::{
    AncestryRule, AttachedRule, DetachedRule, ExtraDataMaxLengthRule, FutureTimestampRule,
    GasLimitBoundsRule, GasUsageRule, MedianTimePastRule, ParentKnownRule, Rule, RuleSet,
    TimestampSpacingRule,
};
pub use schedule::{Milestone, RuleSchedule};
pub use service::HeaderValidationService;
