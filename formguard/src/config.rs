//! Guard configuration
//!
//! Every setting defaults to the fixed page behaviour, so an empty JSON
//! object (or no configuration at all) reproduces it exactly.

use crate::error::{FormGuardError, Result};
use formguard_core::{Rules, ALERT_MESSAGE, FORM_SELECTOR, TP_MAX, TP_MIN};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a [`FormGuard`](crate::FormGuard)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardConfig {
    /// Text of the blocking alert shown on a rejected submission
    pub alert_message: String,
    /// Selector for the guarded form; the first match is used
    pub form_selector: String,
    /// Earliest accepted peak year
    pub tp_min: f64,
    /// Latest accepted peak year
    pub tp_max: f64,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            alert_message: ALERT_MESSAGE.to_string(),
            form_selector: FORM_SELECTOR.to_string(),
            tp_min: TP_MIN,
            tp_max: TP_MAX,
        }
    }
}

impl GuardConfig {
    /// Parse and check a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GuardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject settings the guard cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.alert_message.trim().is_empty() {
            return Err(FormGuardError::InvalidConfig(
                "alert_message must not be empty".to_string(),
            ));
        }
        if self.form_selector.trim().is_empty() {
            return Err(FormGuardError::InvalidConfig(
                "form_selector must not be empty".to_string(),
            ));
        }
        if !self.tp_min.is_finite() || !self.tp_max.is_finite() || self.tp_min > self.tp_max {
            return Err(FormGuardError::InvalidConfig(format!(
                "peak year range [{}, {}] is invalid",
                self.tp_min, self.tp_max
            )));
        }
        Ok(())
    }

    /// Validation bounds described by this configuration
    pub fn rules(&self) -> Rules {
        Rules {
            tp_min: self.tp_min,
            tp_max: self.tp_max,
        }
    }
}
