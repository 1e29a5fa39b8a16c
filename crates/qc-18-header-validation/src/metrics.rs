//! # Header Validation Metrics
//!
//! Prometheus metrics for monitoring header validation.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! qc-18-header-validation = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `header_validation_passed_total` - Counter of headers that passed every rule
//! - `header_validation_rejected_total` - Counter of rejected headers (by rule)
//! - `header_validation_bypassed_total` - Counter of rule checks skipped by a dev override (by rule)
//! - `header_validation_faults_total` - Counter of engine faults
//! - `header_validation_latency_seconds` - Histogram of validation times

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Headers that passed every rule
    pub static ref HEADERS_PASSED: IntCounter = register_int_counter!(
        "header_validation_passed_total",
        "Total number of headers that passed validation"
    )
    .expect("Failed to create HEADERS_PASSED metric");

    /// Headers rejected, labeled by the failing rule
    pub static ref HEADERS_REJECTED: IntCounterVec = register_int_counter_vec!(
        "header_validation_rejected_total",
        "Total number of headers rejected",
        &["rule"]
    )
    .expect("Failed to create HEADERS_REJECTED metric");

    /// Rule checks skipped under a development override
    pub static ref RULES_BYPASSED: IntCounterVec = register_int_counter_vec!(
        "header_validation_bypassed_total",
        "Total number of rule checks bypassed by a development override",
        &["rule"]
    )
    .expect("Failed to create RULES_BYPASSED metric");

    /// Engine faults
    pub static ref ENGINE_FAULTS: IntCounter = register_int_counter!(
        "header_validation_faults_total",
        "Total number of header validation engine faults"
    )
    .expect("Failed to create ENGINE_FAULTS metric");

    /// Histogram of header validation latency
    pub static ref VALIDATION_LATENCY: Histogram = register_histogram!(
        "header_validation_latency_seconds",
        "Time taken to validate a header in seconds",
        vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05]
    )
    .expect("Failed to create VALIDATION_LATENCY metric");
}

#[cfg(feature = "metrics")]
pub fn record_header_passed() {
    HEADERS_PASSED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_header_rejected(rule: &str) {
    HEADERS_REJECTED.with_label_values(&[rule]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_rule_bypassed(rule: &str) {
    RULES_BYPASSED.with_label_values(&[rule]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_engine_fault() {
    ENGINE_FAULTS.inc();
}

#[cfg(feature = "metrics")]
pub fn record_validation_latency(seconds: f64) {
    VALIDATION_LATENCY.observe(seconds);
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_header_passed() {}

#[cfg(not(feature = "metrics"))]
pub fn record_header_rejected(_rule: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_rule_bypassed(_rule: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_engine_fault() {}

#[cfg(not(feature = "metrics"))]
pub fn record_validation_latency(_seconds: f64) {}
