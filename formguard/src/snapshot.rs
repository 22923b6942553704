//! Owned copy of a form's field texts
//!
//! Used by non-browser hosts (the CLI, tests) and anywhere field values
//! arrive as name/value pairs rather than live elements.

use formguard_core::{Field, FieldSource};
use hashbrown::HashMap;

/// Field texts captured at submission time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    values: HashMap<Field, String>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with all four fields present
    pub fn from_texts(q0: &str, qmax: &str, r: &str, tp: &str) -> Self {
        Self::new()
            .with(Field::Q0, q0)
            .with(Field::Qmax, qmax)
            .with(Field::R, r)
            .with(Field::Tp, tp)
    }

    /// Set a field's text (builder form)
    pub fn with(mut self, field: Field, text: impl Into<String>) -> Self {
        self.insert(field, text);
        self
    }

    pub fn insert(&mut self, field: Field, text: impl Into<String>) {
        self.values.insert(field, text.into());
    }

    /// Drop a field, making it read as missing
    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.values.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Build from element id / value pairs, ignoring ids that are not guarded
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut snapshot = Self::new();
        for (id, text) in pairs {
            if let Some(field) = Field::from_id(id) {
                snapshot.insert(field, text);
            }
        }
        snapshot
    }
}

impl FieldSource for FormSnapshot {
    type Text = String;

    fn field_text(&self, field: Field) -> Option<Self::Text> {
        self.values.get(&field).cloned()
    }
}
