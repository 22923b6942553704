//! Form Guard - Submission Interception for the Storage Projection Form
//!
//! This library blocks form submissions whose `Q0`, `Qmax`, `r` and `tp`
//! fields are not valid logistic projection parameters, and shows a
//! single blocking alert instead.
//!
//! ## Architecture
//!
//! - **formguard-core**: field ids, text coercion, pure validation (no I/O)
//! - **formguard**: configuration, logging, the submit interceptor, the
//!   browser binding, the logistic curve for accepted parameters and the
//!   rate-target fit behind the projection form
//!
//! ## Quick Start
//!
//! ```rust
//! use formguard::{FormGuard, FormSnapshot};
//!
//! let guard = FormGuard::default();
//! let snapshot = FormSnapshot::from_texts("10", "100", "0.05", "2024");
//! assert!(guard.check(&snapshot).is_allowed());
//!
//! let snapshot = FormSnapshot::from_texts("0", "100", "0.05", "2024");
//! assert!(guard.check(&snapshot).is_blocked());
//! ```
//!
//! In the browser, build with the `web` feature for `wasm32` and call the
//! exported `install_form_guard()` once the module has loaded.

// Re-export core abstractions and validation rules
pub use formguard_core::{
    // Fields and seams
    Field, FieldSource,
    // Decisions and reports
    Decision, FormValues, Rules, Violation, ViolationKind, Violations,
    // Error handling
    GuardError,
    // Validation utilities
    check_submission, check_submission_with, to_number, validate, validate_with,
    // Fixed values
    ALERT_MESSAGE, FIELD_IDS, TP_MAX, TP_MIN,
};

pub mod config;
pub mod error;
pub mod fit;
pub mod guard;
pub mod logistic;
pub mod snapshot;

#[cfg(target_arch = "wasm32")]
pub mod logging;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub mod web;

pub use config::GuardConfig;
pub use error::{FormGuardError, Result};
pub use fit::{FitReport, FitRequest, FitResult, RateProjection, Sweep};
pub use guard::{FormGuard, Installation, Notifier, SubmitEvent};
pub use logistic::{CurvePoint, CurveSummary, LogisticCurve};
pub use snapshot::FormSnapshot;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use web::{install_form_guard, DomFields, WindowNotifier};
