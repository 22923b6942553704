//! Violation reporting without allocation
//!
//! A submission can fail on each field at most once, so the report is a
//! fixed array with one slot per [`Field`].

use crate::Field;

/// How a single field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViolationKind {
    /// Value is zero or negative where a positive number is required
    NotPositive,
    /// Value is below the lower bound of its range
    BelowMin,
    /// Value is above the upper bound of its range
    AboveMax,
    /// Text did not coerce to a number
    NotANumber,
    /// The field could not be read at all
    Missing,
}

impl core::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            ViolationKind::NotPositive => "must be greater than zero",
            ViolationKind::BelowMin => "is below the allowed range",
            ViolationKind::AboveMax => "is above the allowed range",
            ViolationKind::NotANumber => "is not a number",
            ViolationKind::Missing => "is missing",
        };
        f.write_str(msg)
    }
}

/// A failed constraint on one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Violation {
    pub field: Field,
    pub kind: ViolationKind,
}

impl Violation {
    pub const fn new(field: Field, kind: ViolationKind) -> Self {
        Self { field, kind }
    }
}

impl core::fmt::Display for Violation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.field, self.kind)
    }
}

/// Every violation found in one submission, in field order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Violations {
    slots: [Option<ViolationKind>; 4],
}

impl Violations {
    /// An empty report
    pub const fn new() -> Self {
        Self { slots: [None; 4] }
    }

    /// Record a violation, replacing any earlier one for the same field
    pub fn push(&mut self, violation: Violation) {
        self.slots[violation.field.index()] = Some(violation.kind);
    }

    /// Violation recorded for a field, if any
    pub fn get(&self, field: Field) -> Option<ViolationKind> {
        self.slots[field.index()]
    }

    pub fn contains_field(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Iterate recorded violations in field order
    pub fn iter(&self) -> impl Iterator<Item = Violation> + '_ {
        Field::ALL
            .iter()
            .zip(self.slots.iter())
            .filter_map(|(field, slot)| slot.map(|kind| Violation::new(*field, kind)))
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        let mut violations = Violations::new();
        for violation in iter {
            violations.push(violation);
        }
        violations
    }
}

impl core::fmt::Display for Violations {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, violation) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Violations {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
