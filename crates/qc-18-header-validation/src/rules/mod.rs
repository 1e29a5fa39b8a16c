//! Header validation rules
//!
//! A rule is a single-purpose predicate over a header and its parent. Two
//! capability shapes exist:
//!
//! - [`DetachedRule`]: needs only `(header, parent)`, usable before the
//!   block is attached to any chain
//! - [`AttachedRule`]: additionally consults a [`ChainContext`]
//!
//! The pipeline dispatches on [`Rule`] to supply exactly the inputs each
//! rule declares.

mod ancestry;
mod chain;
mod extra_data;
mod gas;
mod timestamp;

pub use ancestry::AncestryRule;
pub use chain::{FutureTimestampRule, MedianTimePastRule, ParentKnownRule};
pub use extra_data::ExtraDataMaxLengthRule;
pub use gas::{GasLimitBoundsRule, GasUsageRule};
pub use timestamp::TimestampSpacingRule;

use crate::domain::{BlockHeader, ConfigError, RuleOutcome, RuleResult};
use crate::ports::ChainContext;
use std::fmt;
use std::sync::Arc;

/// Rule evaluated from the header and its parent alone
pub trait DetachedRule: Send + Sync {
    /// Stable identifier used in diagnostics and metric labels
    fn name(&self) -> &'static str;

    fn evaluate(&self, header: &BlockHeader, parent: &BlockHeader) -> RuleResult<RuleOutcome>;
}

/// Rule that also reads chain state
pub trait AttachedRule: Send + Sync {
    /// Stable identifier used in diagnostics and metric labels
    fn name(&self) -> &'static str;

    fn evaluate(
        &self,
        header: &BlockHeader,
        parent: &BlockHeader,
        context: &dyn ChainContext,
    ) -> RuleResult<RuleOutcome>;
}

/// A rule tagged with the inputs it needs
#[derive(Clone)]
pub enum Rule {
    Detached(Arc<dyn DetachedRule>),
    Attached(Arc<dyn AttachedRule>),
}

impl Rule {
    pub fn detached<R: DetachedRule + 'static>(rule: R) -> Self {
        Rule::Detached(Arc::new(rule))
    }

    pub fn attached<R: AttachedRule + 'static>(rule: R) -> Self {
        Rule::Attached(Arc::new(rule))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rule::Detached(rule) => rule.name(),
            Rule::Attached(rule) => rule.name(),
        }
    }

    pub fn requires_context(&self) -> bool {
        matches!(self, Rule::Attached(_))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Detached(rule) => write!(f, "Detached({})", rule.name()),
            Rule::Attached(rule) => write!(f, "Attached({})", rule.name()),
        }
    }
}

/// Ordered, non-empty collection of rules
///
/// All rules must pass for a header to be valid. Order only decides which
/// failure gets reported and how early evaluation stops.
#[derive(Clone, Debug)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Result<Self, ConfigError> {
        if rules.is_empty() {
            return Err(ConfigError::EmptyRuleSet);
        }
        Ok(Self { rules })
    }

    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names in evaluation order
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(Rule::name).collect()
    }

    /// Whether any rule needs a chain context
    pub fn requires_context(&self) -> bool {
        self.rules.iter().any(Rule::requires_context)
    }
}

/// Builder preserving insertion order
#[derive(Default)]
pub struct RuleSetBuilder {
    rules: Vec<Rule>,
}

impl RuleSetBuilder {
    pub fn detached<R: DetachedRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Rule::detached(rule));
        self
    }

    pub fn attached<R: AttachedRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Rule::attached(rule));
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn build(self) -> Result<RuleSet, ConfigError> {
        RuleSet::new(self.rules)
    }
}
