//! Fixed values shared by every host of the guard

/// Earliest accepted peak year (inclusive)
pub const TP_MIN: f64 = 1972.0;

/// Latest accepted peak year (inclusive)
pub const TP_MAX: f64 = 2100.0;

/// The single message shown for every rejected submission
pub const ALERT_MESSAGE: &str = "Please enter valid values for all fields.";

/// Selector for the form the guard attaches to (the page's first form)
pub const FORM_SELECTOR: &str = "form";

/// Element ids, in the order the fields are read
pub const FIELD_IDS: [&str; 4] = ["Q0", "Qmax", "r", "tp"];
