//! Error types for form guard operations

/// Errors that can occur while checking a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardError {
    /// One or more fields failed the numeric or range checks
    InvalidInput,
    /// An expected input element could not be read
    MissingField,
}

impl core::fmt::Display for GuardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            GuardError::InvalidInput => "Invalid input",
            GuardError::MissingField => "Expected input field is missing",
        };
        write!(f, "{msg}")
    }
}

/// Result type for form guard operations
pub type Result<T> = core::result::Result<T, GuardError>;
