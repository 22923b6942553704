//! Numeric constraints applied to coerced field values
//!
//! Every check is phrased as the condition that must hold, so a NaN value
//! fails it: NaN compares false against any bound.

use super::report::ViolationKind;

/// The condition a field value must satisfy
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    /// Strictly greater than zero
    Positive,
    /// Within `[min, max]`, both ends inclusive
    InRange { min: f64, max: f64 },
}

impl Constraint {
    /// Check a value, returning the kind of failure if it does not hold
    pub fn check(self, value: f64) -> Result<(), ViolationKind> {
        if value.is_nan() {
            return Err(ViolationKind::NotANumber);
        }

        match self {
            Constraint::Positive => {
                if value > 0.0 {
                    Ok(())
                } else {
                    Err(ViolationKind::NotPositive)
                }
            }
            Constraint::InRange { min, max } => {
                if value < min {
                    Err(ViolationKind::BelowMin)
                } else if value > max {
                    Err(ViolationKind::AboveMax)
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Whether a value satisfies the constraint
    pub fn holds(self, value: f64) -> bool {
        self.check(value).is_ok()
    }
}

impl core::fmt::Display for Constraint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Constraint::Positive => write!(f, "> 0"),
            Constraint::InRange { min, max } => write!(f, "in [{min}, {max}]"),
        }
    }
}
