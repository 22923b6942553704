//! Pure validation of the guarded fields
//!
//! Nothing in here touches markup. Values come in as text or as numbers,
//! and a report of violated constraints comes out.

pub mod bounds;
pub mod coerce;
pub mod report;

pub use bounds::Constraint;
pub use coerce::{is_js_whitespace, to_number};
pub use report::{Violation, ViolationKind, Violations};

use crate::constants::{TP_MAX, TP_MIN};
use crate::Field;

/// Bounds applied during validation
///
/// The defaults are the fixed page rules; hosts may narrow or move the
/// peak year range through configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rules {
    pub tp_min: f64,
    pub tp_max: f64,
}

impl Rules {
    pub const DEFAULT: Rules = Rules {
        tp_min: TP_MIN,
        tp_max: TP_MAX,
    };

    /// Constraint for a field under these rules
    pub const fn constraint(&self, field: Field) -> Constraint {
        match field {
            Field::Tp => Constraint::InRange {
                min: self.tp_min,
                max: self.tp_max,
            },
            _ => field.constraint(),
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Coerced values of the four fields
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormValues {
    pub q0: f64,
    pub qmax: f64,
    pub r: f64,
    pub tp: f64,
}

impl FormValues {
    pub const fn new(q0: f64, qmax: f64, r: f64, tp: f64) -> Self {
        Self { q0, qmax, r, tp }
    }

    /// Coerce raw field text into values
    pub fn from_text(q0: &str, qmax: &str, r: &str, tp: &str) -> Self {
        Self::new(to_number(q0), to_number(qmax), to_number(r), to_number(tp))
    }

    /// Value of a single field
    pub const fn get(&self, field: Field) -> f64 {
        match field {
            Field::Q0 => self.q0,
            Field::Qmax => self.qmax,
            Field::R => self.r,
            Field::Tp => self.tp,
        }
    }

    pub fn set(&mut self, field: Field, value: f64) {
        match field {
            Field::Q0 => self.q0 = value,
            Field::Qmax => self.qmax = value,
            Field::R => self.r = value,
            Field::Tp => self.tp = value,
        }
    }
}

/// Validate all four values against their constraints
///
/// Every field is checked, so the error lists each failing field rather
/// than the first one.
pub fn validate(values: &FormValues) -> Result<(), Violations> {
    validate_with(values, &Rules::DEFAULT)
}

/// Validate against custom [`Rules`]
pub fn validate_with(values: &FormValues, rules: &Rules) -> Result<(), Violations> {
    let violations: Violations = Field::ALL
        .into_iter()
        .filter_map(|field| {
            rules
                .constraint(field)
                .check(values.get(field))
                .err()
                .map(|kind| Violation::new(field, kind))
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// `Q0 > 0 && Qmax > 0 && r > 0 && 1972 <= tp <= 2100`
pub fn is_valid(values: &FormValues) -> bool {
    validate(values).is_ok()
}
