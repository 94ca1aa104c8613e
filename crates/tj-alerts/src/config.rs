//! Evaluator configuration.

use serde::{Deserialize, Serialize};
use tj_core::{Error, Result};

/// Tunables for the evaluation pass and its scheduling.
///
/// Every field carries a serde default, so hosts can deserialize a
/// partial document and get the shipped behavior for the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Master switch; a disabled evaluator emits nothing.
    pub enabled: bool,
    /// Minutes between periodic evaluation passes.
    pub check_interval_minutes: u64,
    /// Cap on alerts emitted per rolling day, checked at pass start.
    pub max_alerts_per_day: u32,
    /// Suppress emissions on non-working days for every rule, not just
    /// those that opt in.
    pub business_days_only: bool,
    /// Forward mailer diagnostics to the notification bus.
    pub debug: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_interval_minutes: 30,
            max_alerts_per_day: 50,
            business_days_only: false,
            debug: false,
        }
    }
}

impl EvaluatorConfig {
    /// Check the configuration invariants.
    pub fn validate(&self) -> Result<()> {
        if self.check_interval_minutes == 0 {
            return Err(Error::Config(
                "check interval must be at least 1 minute".into(),
            ));
        }
        if self.max_alerts_per_day == 0 {
            return Err(Error::Config("daily alert cap must be at least 1".into()));
        }
        Ok(())
    }
}
