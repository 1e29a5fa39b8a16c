//! Timestamp spacing relative to the parent header

use super::DetachedRule;
use crate::config::{ValidationConfig, DEV_SHORT_BLOCK_PERIOD_ENV};
use crate::domain::{
    BlockHeader, BypassNotice, ConfigError, HeaderViolation, RuleOutcome, RuleResult,
};
use std::sync::Arc;

/// Ensures a header is at least `minimum_seconds_since_parent` newer than
/// its parent.
///
/// Under [`ValidationConfig::dev_short_block_period`] the check is skipped:
/// every such call logs one WARN and returns a [`BypassNotice`].
#[derive(Debug, Clone)]
pub struct TimestampSpacingRule {
    minimum_seconds_since_parent: i64,
    config: Arc<ValidationConfig>,
}

impl TimestampSpacingRule {
    pub fn new(
        minimum_seconds_since_parent: i64,
        config: Arc<ValidationConfig>,
    ) -> Result<Self, ConfigError> {
        if minimum_seconds_since_parent < 0 {
            return Err(ConfigError::invalid(
                "minimum_seconds_since_parent",
                format!("must not be negative, got {}", minimum_seconds_since_parent),
            ));
        }
        Ok(Self {
            minimum_seconds_since_parent,
            config,
        })
    }

    pub fn minimum_seconds_since_parent(&self) -> i64 {
        self.minimum_seconds_since_parent
    }
}

impl DetachedRule for TimestampSpacingRule {
    fn name(&self) -> &'static str {
        "timestamp_spacing"
    }

    fn evaluate(&self, header: &BlockHeader, parent: &BlockHeader) -> RuleResult<RuleOutcome> {
        if self.config.dev_short_block_period {
            let notice = BypassNotice {
                switch: DEV_SHORT_BLOCK_PERIOD_ENV,
                timestamp: header.timestamp,
                parent_timestamp: parent.timestamp,
            };
            tracing::warn!(
                rule = self.name(),
                block_number = header.number,
                switch = notice.switch,
                timestamp = notice.timestamp,
                parent_timestamp = notice.parent_timestamp,
                "{}",
                notice
            );
            return Ok(RuleOutcome::Bypassed(notice));
        }

        let delta = i128::from(header.timestamp) - i128::from(parent.timestamp);
        if delta < i128::from(self.minimum_seconds_since_parent) {
            return Ok(RuleOutcome::Fail(HeaderViolation::TimestampTooClose {
                timestamp: header.timestamp,
                parent_timestamp: parent.timestamp,
                delta,
                minimum_seconds_since_parent: self.minimum_seconds_since_parent,
            }));
        }

        Ok(RuleOutcome::Pass)
    }
}
