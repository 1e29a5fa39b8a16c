//! Rules that read chain state through a [`ChainContext`]

use super::AttachedRule;
use crate::domain::{BlockHeader, ConfigError, HeaderViolation, RuleOutcome, RuleResult};
use crate::ports::ChainContext;

/// Parent must already be known to the chain
#[derive(Debug, Clone, Copy, Default)]
pub struct ParentKnownRule;

impl AttachedRule for ParentKnownRule {
    fn name(&self) -> &'static str {
        "parent_known"
    }

    fn evaluate(
        &self,
        header: &BlockHeader,
        _parent: &BlockHeader,
        context: &dyn ChainContext,
    ) -> RuleResult<RuleOutcome> {
        if context.header_by_hash(&header.parent_hash).is_none() {
            return Ok(RuleOutcome::Fail(HeaderViolation::UnknownParent {
                parent_hash: header.parent_hash,
            }));
        }
        Ok(RuleOutcome::Pass)
    }
}

/// Header timestamp must not run ahead of the context clock by more than
/// `max_drift_secs`
#[derive(Debug, Clone, Copy)]
pub struct FutureTimestampRule {
    max_drift_secs: u64,
}

impl FutureTimestampRule {
    pub fn new(max_drift_secs: u64) -> Self {
        Self { max_drift_secs }
    }
}

impl AttachedRule for FutureTimestampRule {
    fn name(&self) -> &'static str {
        "future_timestamp"
    }

    fn evaluate(
        &self,
        header: &BlockHeader,
        _parent: &BlockHeader,
        context: &dyn ChainContext,
    ) -> RuleResult<RuleOutcome> {
        let now = context.now();
        if header.timestamp > now.saturating_add(self.max_drift_secs) {
            return Ok(RuleOutcome::Fail(HeaderViolation::FutureTimestamp {
                timestamp: header.timestamp,
                current: now,
                max_drift_secs: self.max_drift_secs,
            }));
        }
        Ok(RuleOutcome::Pass)
    }
}

/// Header timestamp must be strictly after the median timestamp of the
/// last `window` ancestors, starting at the parent.
///
/// Near genesis fewer ancestors exist; the median is taken over what the
/// context can supply.
#[derive(Debug, Clone, Copy)]
pub struct MedianTimePastRule {
    window: usize,
}

impl MedianTimePastRule {
    pub fn new(window: usize) -> Result<Self, ConfigError> {
        if window == 0 {
            return Err(ConfigError::invalid("window", "must be greater than zero"));
        }
        Ok(Self { window })
    }

    fn ancestor_timestamps(&self, parent: &BlockHeader, context: &dyn ChainContext) -> Vec<u64> {
        let mut timestamps = Vec::with_capacity(self.window);
        timestamps.push(parent.timestamp);

        let mut cursor = parent.clone();
        while timestamps.len() < self.window && !cursor.is_genesis() {
            match context.header_by_hash(&cursor.parent_hash) {
                Some(ancestor) => {
                    timestamps.push(ancestor.timestamp);
                    cursor = ancestor;
                }
                None => break,
            }
        }
        timestamps
    }
}

impl AttachedRule for MedianTimePastRule {
    fn name(&self) -> &'static str {
        "median_time_past"
    }

    fn evaluate(
        &self,
        header: &BlockHeader,
        parent: &BlockHeader,
        context: &dyn ChainContext,
    ) -> RuleResult<RuleOutcome> {
        let mut timestamps = self.ancestor_timestamps(parent, context);
        timestamps.sort_unstable();
        let median = timestamps[timestamps.len() / 2];

        if header.timestamp <= median {
            return Ok(RuleOutcome::Fail(HeaderViolation::TimestampNotAfterMedian {
                timestamp: header.timestamp,
                median,
                window: timestamps.len(),
            }));
        }
        Ok(RuleOutcome::Pass)
    }
}
