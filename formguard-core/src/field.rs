//! Identifiers for the guarded input fields

use crate::constants::{FIELD_IDS, TP_MAX, TP_MIN};
use crate::validation::Constraint;

/// One of the four guarded inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Field {
    /// Initial cumulative quantity
    Q0,
    /// Ultimate cumulative quantity
    Qmax,
    /// Growth rate
    R,
    /// Peak year
    Tp,
}

impl Field {
    /// All fields in read order
    pub const ALL: [Field; 4] = [Field::Q0, Field::Qmax, Field::R, Field::Tp];

    /// Element id used on the page
    pub const fn id(self) -> &'static str {
        FIELD_IDS[self.index()]
    }

    /// Position of the field in [`Field::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Field::Q0 => 0,
            Field::Qmax => 1,
            Field::R => 2,
            Field::Tp => 3,
        }
    }

    /// Look up a field by its element id (case-sensitive, like `getElementById`)
    pub fn from_id(id: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.id() == id)
    }

    /// The constraint this field's value must satisfy
    pub const fn constraint(self) -> Constraint {
        match self {
            Field::Q0 | Field::Qmax | Field::R => Constraint::Positive,
            Field::Tp => Constraint::InRange {
                min: TP_MIN,
                max: TP_MAX,
            },
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.id())
    }
}
