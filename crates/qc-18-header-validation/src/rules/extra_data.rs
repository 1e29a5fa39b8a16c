use super::DetachedRule;
use crate::domain::{BlockHeader, HeaderViolation, RuleOutcome, RuleResult};

/// Default limit: 32 bytes (Ethereum standard)
pub const DEFAULT_MAX_EXTRA_DATA: usize = 32;

/// Caps the size of `extra_data` to prevent oversized headers
#[derive(Debug, Clone, Copy)]
pub struct ExtraDataMaxLengthRule {
    max_len: usize,
}

impl ExtraDataMaxLengthRule {
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }
}

impl Default for ExtraDataMaxLengthRule {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_EXTRA_DATA)
    }
}

impl DetachedRule for ExtraDataMaxLengthRule {
    fn name(&self) -> &'static str {
        "extra_data_max_length"
    }

    fn evaluate(&self, header: &BlockHeader, _parent: &BlockHeader) -> RuleResult<RuleOutcome> {
        if header.extra_data.len() > self.max_len {
            return Ok(RuleOutcome::Fail(HeaderViolation::ExtraDataTooLarge {
                size: header.extra_data.len(),
                limit: self.max_len,
            }));
        }
        Ok(RuleOutcome::Pass)
    }
}
