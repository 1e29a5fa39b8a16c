//! Validation pipeline
//!
//! Runs an ordered [`RuleSet`] against a header and its parent. Pure
//! composition: logical AND over the rules, stopping at the first failure.
//!
//! ## Diagnostics
//!
//! | Outcome | Level | Effect on verdict |
//! |---------|-------|-------------------|
//! | rule bypassed | WARN | none, evaluation continues |
//! | rule failed | INFO | verdict fails, evaluation stops |
//! | engine fault | ERROR | `Err` returned, no verdict |

use crate::adapters::TracingSink;
use crate::domain::{BlockHeader, DiagnosticEvent, EngineFault, RuleOutcome, Verdict};
use crate::metrics;
use crate::ports::{ChainContext, DiagnosticsSink};
use crate::rules::{Rule, RuleSet};
use std::sync::Arc;

/// Stateless rule-set executor
///
/// Holds only the diagnostics sink; safe to share across threads.
#[derive(Clone)]
pub struct HeaderValidator {
    sink: Arc<dyn DiagnosticsSink>,
}

impl HeaderValidator {
    pub fn new(sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self { sink }
    }

    /// Validate `header` against every rule in `rules`, in order.
    ///
    /// # Arguments
    /// * `parent` - may only be `None` for a genesis header, which then
    ///   bypasses every parent-relative rule
    /// * `context` - required as soon as the rule set holds an attached rule
    ///
    /// # Returns
    /// * `Ok(Verdict)` - the consensus answer, passing or failing
    /// * `Err(EngineFault)` - the engine could not decide
    pub fn validate(
        &self,
        rules: &RuleSet,
        header: &BlockHeader,
        parent: Option<&BlockHeader>,
        context: Option<&dyn ChainContext>,
    ) -> Result<Verdict, EngineFault> {
        let parent = match parent {
            Some(parent) => parent,
            None if header.is_genesis() => {
                tracing::debug!(
                    block_number = header.number,
                    "Genesis header bypasses parent rules"
                );
                metrics::record_header_passed();
                return Ok(Verdict::pass());
            }
            None => {
                let fault = EngineFault::MissingParent {
                    number: header.number,
                };
                return Err(self.fault(None, header.number, fault));
            }
        };

        for (index, rule) in rules.rules().iter().enumerate() {
            let outcome = match Self::evaluate(rule, header, parent, context) {
                Ok(outcome) => outcome,
                Err(fault) => return Err(self.fault(Some(rule.name()), header.number, fault)),
            };

            match outcome {
                RuleOutcome::Pass => {}
                RuleOutcome::Bypassed(notice) => {
                    metrics::record_rule_bypassed(rule.name());
                    self.sink
                        .record(DiagnosticEvent::bypassed(rule.name(), header.number, notice));
                }
                RuleOutcome::Fail(violation) => {
                    metrics::record_header_rejected(rule.name());
                    self.sink.record(DiagnosticEvent::rejected(
                        rule.name(),
                        header.number,
                        violation.clone(),
                    ));
                    return Ok(Verdict::fail(rule.name(), index, violation));
                }
            }
        }

        metrics::record_header_passed();
        Ok(Verdict::pass())
    }

    fn evaluate(
        rule: &Rule,
        header: &BlockHeader,
        parent: &BlockHeader,
        context: Option<&dyn ChainContext>,
    ) -> Result<RuleOutcome, EngineFault> {
        match rule {
            Rule::Detached(rule) => rule.evaluate(header, parent),
            Rule::Attached(rule) => {
                let context = context.ok_or(EngineFault::MissingContext { rule: rule.name() })?;
                rule.evaluate(header, parent, context)
            }
        }
    }

    fn fault(
        &self,
        rule: Option<&'static str>,
        block_number: u64,
        fault: EngineFault,
    ) -> EngineFault {
        metrics::record_engine_fault();
        self.sink
            .record(DiagnosticEvent::fault(rule, block_number, fault.to_string()));
        fault
    }
}

impl Default for HeaderValidator {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}
