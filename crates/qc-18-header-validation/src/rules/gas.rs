//! Header-level gas field checks

use super::DetachedRule;
use crate::domain::{BlockHeader, ConfigError, HeaderViolation, RuleOutcome, RuleResult};

/// Gas used must not exceed the header's own gas limit
#[derive(Debug, Clone, Copy, Default)]
pub struct GasUsageRule;

impl DetachedRule for GasUsageRule {
    fn name(&self) -> &'static str {
        "gas_usage"
    }

    fn evaluate(&self, header: &BlockHeader, _parent: &BlockHeader) -> RuleResult<RuleOutcome> {
        if header.gas_used > header.gas_limit {
            return Ok(RuleOutcome::Fail(HeaderViolation::GasUsedExceedsLimit {
                used: header.gas_used,
                limit: header.gas_limit,
            }));
        }
        Ok(RuleOutcome::Pass)
    }
}

/// Gas limit must stay within absolute bounds and may only move a bounded
/// fraction away from the parent's limit per block.
///
/// The allowed movement is strictly less than `parent.gas_limit / bound_divisor`.
#[derive(Debug, Clone)]
pub struct GasLimitBoundsRule {
    minimum: u64,
    maximum: u64,
    bound_divisor: u64,
}

impl GasLimitBoundsRule {
    pub fn new(minimum: u64, maximum: u64, bound_divisor: u64) -> Result<Self, ConfigError> {
        if bound_divisor == 0 {
            return Err(ConfigError::invalid("bound_divisor", "must be greater than zero"));
        }
        if minimum > maximum {
            return Err(ConfigError::invalid(
                "minimum",
                format!("{} exceeds maximum {}", minimum, maximum),
            ));
        }
        Ok(Self {
            minimum,
            maximum,
            bound_divisor,
        })
    }
}

impl DetachedRule for GasLimitBoundsRule {
    fn name(&self) -> &'static str {
        "gas_limit_bounds"
    }

    fn evaluate(&self, header: &BlockHeader, parent: &BlockHeader) -> RuleResult<RuleOutcome> {
        let limit = header.gas_limit;
        if limit < self.minimum || limit > self.maximum {
            return Ok(RuleOutcome::Fail(HeaderViolation::GasLimitOutOfRange {
                limit,
                minimum: self.minimum,
                maximum: self.maximum,
            }));
        }

        let delta = limit.abs_diff(parent.gas_limit);
        let bound = parent.gas_limit / self.bound_divisor;
        if delta >= bound && delta != 0 {
            return Ok(RuleOutcome::Fail(HeaderViolation::GasLimitDeltaTooLarge {
                limit,
                parent_limit: parent.gas_limit,
                delta,
                bound,
            }));
        }

        Ok(RuleOutcome::Pass)
    }
}
