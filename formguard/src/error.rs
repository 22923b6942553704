//! Error handling for the form guard hosts

use formguard_core::{Field, GuardError, Violations};
use thiserror::Error;

/// Errors raised while configuring or installing the guard
#[derive(Error, Debug)]
pub enum FormGuardError {
    /// Submission failed validation
    #[error("{0}")]
    Guard(GuardError),

    /// Submission failed validation, with the per-field report
    #[error("Invalid input: {0}")]
    Rejected(Violations),

    /// A parameter is infinite where a curve needs a finite value
    #[error("{0} must be finite")]
    NonFinite(Field),

    /// Rate-target fit inputs are unusable
    #[error("Invalid fit input: {0}")]
    Fit(String),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The submit interceptor was already registered
    #[error("Form guard is already installed")]
    AlreadyInstalled,

    /// The page has no form matching the selector
    #[error("No form matches selector {0:?}")]
    NoForm(String),

    /// JavaScript interop error
    #[error("JavaScript error: {0}")]
    JavaScript(String),
}

impl From<GuardError> for FormGuardError {
    fn from(err: GuardError) -> Self {
        FormGuardError::Guard(err)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for FormGuardError {
    fn from(js_val: wasm_bindgen::JsValue) -> Self {
        let message = js_val
            .as_string()
            .unwrap_or_else(|| format!("{js_val:?}"));
        FormGuardError::JavaScript(message)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<FormGuardError> for wasm_bindgen::JsValue {
    fn from(err: FormGuardError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

/// Result type for form guard hosts
pub type Result<T> = std::result::Result<T, FormGuardError>;
