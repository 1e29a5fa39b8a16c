//! Header validation service
//!
//! Resolves the active rule set for a header from the [`RuleSchedule`] and
//! runs it through the [`HeaderValidator`].

use crate::domain::{BlockHeader, EngineFault, Verdict};
use crate::metrics;
use crate::pipeline::HeaderValidator;
use crate::ports::{ChainContext, DiagnosticsSink, HeaderValidationApi};
use crate::schedule::RuleSchedule;
use std::sync::Arc;
use std::time::Instant;

/// Entry point used by the block import path
#[derive(Clone)]
pub struct HeaderValidationService {
    schedule: Arc<RuleSchedule>,
    validator: HeaderValidator,
}

impl HeaderValidationService {
    pub fn new(schedule: Arc<RuleSchedule>, sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self {
            schedule,
            validator: HeaderValidator::new(sink),
        }
    }

    /// Service logging through `tracing`
    pub fn with_tracing(schedule: Arc<RuleSchedule>) -> Self {
        Self {
            schedule,
            validator: HeaderValidator::default(),
        }
    }

    pub fn schedule(&self) -> &RuleSchedule {
        &self.schedule
    }
}

impl HeaderValidationApi for HeaderValidationService {
    fn validate_header(
        &self,
        header: &BlockHeader,
        parent: Option<&BlockHeader>,
        context: Option<&dyn ChainContext>,
    ) -> Result<Verdict, EngineFault> {
        let milestone = self.schedule.milestone_for(header.number);
        let span = tracing::debug_span!(
            "validate_header",
            block_number = header.number,
            milestone = %milestone.name
        );
        let _enter = span.enter();

        let started = Instant::now();
        let result = self
            .validator
            .validate(&milestone.rules, header, parent, context);
        metrics::record_validation_latency(started.elapsed().as_secs_f64());

        if let Ok(verdict) = &result {
            tracing::debug!(passed = verdict.passed, "Header validated");
        }
        result
    }

    fn rules_at(&self, number: u64) -> Vec<&'static str> {
        self.schedule.rules_for(number).names()
    }
}
