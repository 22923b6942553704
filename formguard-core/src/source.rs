//! Reading raw field text and deciding on a submission
//!
//! Hosts (a DOM binding, a CLI, a test fixture) implement [`FieldSource`];
//! [`check_submission`] turns whatever they provide into a [`Decision`].

use crate::validation::{
    to_number, validate_with, FormValues, Rules, Violation, ViolationKind, Violations,
};
use crate::{Field, GuardError};

/// Anything that can hand back the raw text of a guarded field
pub trait FieldSource {
    /// Text type handed back; `&str` for borrowed sources, `String` for DOM reads
    type Text: AsRef<str>;

    /// Current text of a field, or `None` if the field does not exist
    fn field_text(&self, field: Field) -> Option<Self::Text>;
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    type Text = T::Text;

    fn field_text(&self, field: Field) -> Option<Self::Text> {
        (**self).field_text(field)
    }
}

/// Raw texts in [`Field::ALL`] order
impl<'a> FieldSource for [&'a str; 4] {
    type Text = &'a str;

    fn field_text(&self, field: Field) -> Option<Self::Text> {
        Some(self[field.index()])
    }
}

/// Raw texts in [`Field::ALL`] order, `None` for absent elements
impl<'a> FieldSource for [Option<&'a str>; 4] {
    type Text = &'a str;

    fn field_text(&self, field: Field) -> Option<Self::Text> {
        self[field.index()]
    }
}

/// Outcome of one submission attempt
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "decision", rename_all = "snake_case"))]
pub enum Decision {
    /// Let the native submission proceed
    Allow { values: FormValues },
    /// Cancel the submission and alert the user
    Block { violations: Violations },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow { .. })
    }

    pub fn is_blocked(&self) -> bool {
        !self.is_allowed()
    }

    /// Violations behind a blocked decision
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Decision::Allow { .. } => None,
            Decision::Block { violations } => Some(violations),
        }
    }

    /// Collapse to the single user-facing error kind
    ///
    /// Missing fields map to [`GuardError::MissingField`]; every other
    /// failure is [`GuardError::InvalidInput`].
    pub fn into_result(self) -> Result<FormValues, GuardError> {
        match self {
            Decision::Allow { values } => Ok(values),
            Decision::Block { violations } => {
                if violations.iter().any(|v| v.kind == ViolationKind::Missing) {
                    Err(GuardError::MissingField)
                } else {
                    Err(GuardError::InvalidInput)
                }
            }
        }
    }
}

/// Read, coerce and validate every field of a submission
///
/// A field the source cannot provide is reported as
/// [`ViolationKind::Missing`] and blocks the submission.
pub fn check_submission<S: FieldSource + ?Sized>(source: &S) -> Decision {
    check_submission_with(source, &Rules::DEFAULT)
}

/// [`check_submission`] under custom [`Rules`]
pub fn check_submission_with<S: FieldSource + ?Sized>(source: &S, rules: &Rules) -> Decision {
    let mut values = FormValues::new(0.0, 0.0, 0.0, 0.0);
    let mut missing = Violations::new();

    for field in Field::ALL {
        match source.field_text(field) {
            Some(text) => values.set(field, to_number(text.as_ref())),
            None => missing.push(Violation::new(field, ViolationKind::Missing)),
        }
    }

    let mut violations = match validate_with(&values, rules) {
        Ok(()) if missing.is_empty() => return Decision::Allow { values },
        Ok(()) => Violations::new(),
        Err(violations) => violations,
    };

    for violation in missing.iter() {
        violations.push(violation);
    }

    Decision::Block { violations }
}
