//! Rule outcomes and pipeline verdicts

use super::HeaderViolation;
use serde::Serialize;
use std::fmt;

/// Notice returned by a rule that deliberately skipped its check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BypassNotice {
    /// Configuration switch responsible for the bypass
    pub switch: &'static str,
    pub timestamp: u64,
    pub parent_timestamp: u64,
}

impl fmt::Display for BypassNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block timestamp validation disabled by test-mode only {} setting. \
             This should not be set in a production system",
            self.switch
        )
    }
}

/// Result of evaluating a single rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Pass,
    /// The check was skipped. Counts as a pass but must be logged.
    Bypassed(BypassNotice),
    Fail(HeaderViolation),
}

impl RuleOutcome {
    /// Whether this outcome lets the header through
    pub fn is_pass(&self) -> bool {
        !matches!(self, RuleOutcome::Fail(_))
    }
}

/// The first failing rule of a validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleFailure {
    /// Name of the failing rule
    pub rule: &'static str,
    /// Position of the failing rule inside its rule set
    pub index: usize,
    pub violation: HeaderViolation,
}

/// Pass/fail verdict of running a rule set against a header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub passed: bool,
    pub failure: Option<RuleFailure>,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            passed: true,
            failure: None,
        }
    }

    pub fn fail(rule: &'static str, index: usize, violation: HeaderViolation) -> Self {
        Self {
            passed: false,
            failure: Some(RuleFailure {
                rule,
                index,
                violation,
            }),
        }
    }

    /// Human-readable rejection reason, `None` for passing verdicts
    pub fn reason(&self) -> Option<String> {
        self.failure
            .as_ref()
            .map(|failure| format!("{}: {}", failure.rule, failure.violation))
    }

    /// The violation that rejected the header
    pub fn violation(&self) -> Option<&HeaderViolation> {
        self.failure.as_ref().map(|failure| &failure.violation)
    }
}
