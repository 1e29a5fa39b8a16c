//! Rule schedule: which rule set applies at which height
//!
//! Each [`Milestone`] activates a complete rule set at a block height and
//! stays active until the next milestone. The first milestone must activate
//! at genesis so every height resolves to exactly one rule set.

use crate::config::{RuleConfig, ScheduleConfig, ValidationConfig};
use crate::domain::ConfigError;
use crate::rules::{
    AncestryRule, ExtraDataMaxLengthRule, FutureTimestampRule, GasLimitBoundsRule, GasUsageRule,
    MedianTimePastRule, ParentKnownRule, Rule, RuleSet, TimestampSpacingRule,
};
use std::sync::Arc;

/// A protocol upgrade and the rules it activates
#[derive(Clone, Debug)]
pub struct Milestone {
    pub name: String,
    pub activation_height: u64,
    pub rules: RuleSet,
}

impl Milestone {
    pub fn new(name: impl Into<String>, activation_height: u64, rules: RuleSet) -> Self {
        Self {
            name: name.into(),
            activation_height,
            rules,
        }
    }
}

/// Ordered milestones resolving block heights to rule sets
#[derive(Clone, Debug)]
pub struct RuleSchedule {
    milestones: Vec<Milestone>,
}

impl RuleSchedule {
    /// Build a schedule from milestones in activation order.
    ///
    /// Fails if empty, if the first milestone does not activate at 0, or if
    /// activation heights are not strictly increasing.
    pub fn new(milestones: Vec<Milestone>) -> Result<Self, ConfigError> {
        let first = milestones.first().ok_or(ConfigError::EmptySchedule)?;
        if first.activation_height != 0 {
            return Err(ConfigError::GenesisMilestoneMissing(first.activation_height));
        }

        for pair in milestones.windows(2) {
            if pair[1].activation_height <= pair[0].activation_height {
                return Err(ConfigError::MilestoneOrder {
                    name: pair[1].name.clone(),
                    activation_height: pair[1].activation_height,
                    previous: pair[0].activation_height,
                });
            }
        }

        Ok(Self { milestones })
    }

    /// Schedule with a single rule set for every height
    pub fn single(rules: RuleSet) -> Self {
        Self {
            milestones: vec![Milestone::new("genesis", 0, rules)],
        }
    }

    /// Build every rule described by `config`
    pub fn from_config(
        config: &ScheduleConfig,
        validation: Arc<ValidationConfig>,
    ) -> Result<Self, ConfigError> {
        let milestones = config
            .milestones
            .iter()
            .map(|milestone| -> Result<Milestone, ConfigError> {
                let rules = milestone
                    .rules
                    .iter()
                    .map(|rule| build_rule(rule, &validation))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Milestone::new(
                    milestone.name.clone(),
                    milestone.activation_height,
                    RuleSet::new(rules)?,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let schedule = Self::new(milestones)?;
        tracing::info!(
            milestones = schedule.milestones.len(),
            latest = %schedule.milestones[schedule.milestones.len() - 1].name,
            "Header validation schedule loaded"
        );
        Ok(schedule)
    }

    /// The milestone active at `number`
    pub fn milestone_for(&self, number: u64) -> &Milestone {
        let active = self
            .milestones
            .partition_point(|milestone| milestone.activation_height <= number);
        // partition_point >= 1 because the first milestone activates at 0
        &self.milestones[active - 1]
    }

    /// The rule set active at `number`
    pub fn rules_for(&self, number: u64) -> &RuleSet {
        &self.milestone_for(number).rules
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }
}

fn build_rule(config: &RuleConfig, validation: &Arc<ValidationConfig>) -> Result<Rule, ConfigError> {
    let rule = match config {
        RuleConfig::Ancestry => Rule::detached(AncestryRule),
        RuleConfig::TimestampSpacing {
            minimum_seconds_since_parent,
        } => Rule::detached(TimestampSpacingRule::new(
            *minimum_seconds_since_parent,
            validation.clone(),
        )?),
        RuleConfig::GasUsage => Rule::detached(GasUsageRule),
        RuleConfig::GasLimitBounds {
            minimum,
            maximum,
            bound_divisor,
        } => Rule::detached(GasLimitBoundsRule::new(*minimum, *maximum, *bound_divisor)?),
        RuleConfig::ExtraDataMaxLength { max_len } => {
            Rule::detached(ExtraDataMaxLengthRule::new(*max_len))
        }
        RuleConfig::ParentKnown => Rule::attached(ParentKnownRule),
        RuleConfig::FutureTimestamp { max_drift_secs } => {
            Rule::attached(FutureTimestampRule::new(*max_drift_secs))
        }
        RuleConfig::MedianTimePast { window } => Rule::attached(MedianTimePastRule::new(*window)?),
    };
    Ok(rule)
}
