//! Structured diagnostic events emitted by the validation pipeline

use super::{BypassNotice, HeaderViolation};
use serde::Serialize;

/// Severity of a diagnostic event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    /// A header was rejected. Normal consensus outcome.
    Info,
    /// A rule skipped its check under a development override.
    Warn,
    /// The engine faulted.
    Error,
}

/// What happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DiagnosticKind {
    Rejected(HeaderViolation),
    Bypassed(BypassNotice),
    Fault(String),
}

/// One diagnostic record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticEvent {
    pub level: DiagnosticLevel,
    /// Rule that produced the event, `None` for pipeline-level faults
    pub rule: Option<&'static str>,
    pub block_number: u64,
    pub kind: DiagnosticKind,
}

impl DiagnosticEvent {
    pub fn rejected(rule: &'static str, block_number: u64, violation: HeaderViolation) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            rule: Some(rule),
            block_number,
            kind: DiagnosticKind::Rejected(violation),
        }
    }

    pub fn bypassed(rule: &'static str, block_number: u64, notice: BypassNotice) -> Self {
        Self {
            level: DiagnosticLevel::Warn,
            rule: Some(rule),
            block_number,
            kind: DiagnosticKind::Bypassed(notice),
        }
    }

    pub fn fault(rule: Option<&'static str>, block_number: u64, fault: String) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            rule,
            block_number,
            kind: DiagnosticKind::Fault(fault),
        }
    }
}
