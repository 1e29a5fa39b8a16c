//! Driving ports (Inbound API)

use super::ChainContext;
use crate::domain::{BlockHeader, EngineFault, Verdict};

/// Header validation API exposed to the block import path
pub trait HeaderValidationApi: Send + Sync {
    /// Validate `header` against the rule set active at its height
    ///
    /// `Ok(verdict)` is the consensus answer; `Err` means the engine could
    /// not produce one.
    fn validate_header(
        &self,
        header: &BlockHeader,
        parent: Option<&BlockHeader>,
        context: Option<&dyn ChainContext>,
    ) -> Result<Verdict, EngineFault>;

    /// Names of the rules active at `number`, in evaluation order
    fn rules_at(&self, number: u64) -> Vec<&'static str>;
}
