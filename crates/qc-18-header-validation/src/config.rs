//! Configuration for the header validation subsystem
//!
//! Two layers:
//! - [`ValidationConfig`]: process-wide switches, read once from the
//!   environment and shared by `Arc` with every rule that consults them
//! - [`ScheduleConfig`]: the serde description of which rules apply from
//!   which height, turned into a [`RuleSchedule`](crate::RuleSchedule)

use serde::{Deserialize, Serialize};
use std::env;
use std::sync::{Arc, OnceLock};

/// Environment variable enabling sub-second block cadences on dev networks.
///
/// Any value (including empty) activates the override.
pub const DEV_SHORT_BLOCK_PERIOD_ENV: &str = "QC_X_DEV_SHORT_BLOCK_PERIOD_MS";

static PROCESS_CONFIG: OnceLock<Arc<ValidationConfig>> = OnceLock::new();

/// Process-wide validation switches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Disables the timestamp spacing check. Test networks only.
    pub dev_short_block_period: bool,
}

impl ValidationConfig {
    /// Configuration with every consensus check enforced
    pub fn production() -> Self {
        Self::default()
    }

    /// Configuration with the development timestamp override active
    pub fn with_dev_override() -> Self {
        Self {
            dev_short_block_period: true,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_X_DEV_SHORT_BLOCK_PERIOD_MS`: presence disables timestamp spacing
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            dev_short_block_period: lookup(DEV_SHORT_BLOCK_PERIOD_ENV).is_some(),
        }
    }

    /// The process-wide configuration.
    ///
    /// Read from the environment on first call; every later call returns
    /// the same instance.
    pub fn process() -> Arc<Self> {
        PROCESS_CONFIG
            .get_or_init(|| {
                let config = Self::from_env();
                if config.dev_short_block_period {
                    tracing::warn!(
                        switch = DEV_SHORT_BLOCK_PERIOD_ENV,
                        "Development override active: timestamp spacing checks are disabled"
                    );
                }
                Arc::new(config)
            })
            .clone()
    }
}

/// Serializable description of a rule schedule
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub milestones: Vec<MilestoneConfig>,
}

impl ScheduleConfig {
    /// Parse a schedule from JSON text
    pub fn from_json(json: &str) -> Result<Self, crate::ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One protocol upgrade in a schedule
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MilestoneConfig {
    pub name: String,
    pub activation_height: u64,
    pub rules: Vec<RuleConfig>,
}

/// Construction parameters for one rule
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleConfig {
    Ancestry,
    TimestampSpacing {
        minimum_seconds_since_parent: i64,
    },
    GasUsage,
    GasLimitBounds {
        minimum: u64,
        maximum: u64,
        bound_divisor: u64,
    },
    ExtraDataMaxLength {
        max_len: usize,
    },
    ParentKnown,
    FutureTimestamp {
        max_drift_secs: u64,
    },
    MedianTimePast {
        window: usize,
    },
}
