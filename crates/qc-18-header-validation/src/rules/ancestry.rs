use super::DetachedRule;
use crate::domain::{BlockHeader, EngineFault, HeaderViolation, RuleOutcome, RuleResult};

/// Header must directly extend its parent: sequential number and matching
/// parent hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct AncestryRule;

impl DetachedRule for AncestryRule {
    fn name(&self) -> &'static str {
        "ancestry"
    }

    fn evaluate(&self, header: &BlockHeader, parent: &BlockHeader) -> RuleResult<RuleOutcome> {
        let expected = parent
            .number
            .checked_add(1)
            .ok_or_else(|| EngineFault::ArithmeticOverflow {
                rule: self.name(),
                detail: format!("parent number {} has no successor", parent.number),
            })?;

        if header.number != expected {
            return Ok(RuleOutcome::Fail(HeaderViolation::InvalidNumber {
                expected,
                actual: header.number,
            }));
        }

        let parent_hash = parent.hash();
        if header.parent_hash != parent_hash {
            return Ok(RuleOutcome::Fail(HeaderViolation::ParentHashMismatch {
                referenced: header.parent_hash,
                actual: parent_hash,
            }));
        }

        Ok(RuleOutcome::Pass)
    }
}
