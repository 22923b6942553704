#![no_std]

//! Form Guard Core - Submission Validation Rules
//!
//! This crate provides the field definitions, text coercion and pure
//! validation used to decide whether a form submission may proceed.
//! It performs no I/O and knows nothing about markup.

#[cfg(any(feature = "alloc", test))]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod constants;
pub mod error;
pub mod field;
pub mod source;
pub mod validation;

pub use constants::*;
pub use error::*;
pub use field::Field;
pub use source::{check_submission, check_submission_with, Decision, FieldSource};
pub use validation::{
    is_valid, to_number, validate, validate_with, Constraint, FormValues, Rules, Violation,
    ViolationKind, Violations,
};

/// Owned field sources (requires alloc)
#[cfg(feature = "alloc")]
mod owned {
    use super::{Field, FieldSource};
    use alloc::string::String;

    /// Raw texts in [`Field::ALL`] order
    impl FieldSource for [String; 4] {
        type Text = String;

        fn field_text(&self, field: Field) -> Option<Self::Text> {
            Some(self[field.index()].clone())
        }
    }
}
