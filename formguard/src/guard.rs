//! Submission interception
//!
//! [`FormGuard`] is the host-independent half of the page script: given a
//! way to read fields, a cancellable submit event and a way to alert the
//! user, it decides one submission attempt. The browser binding in
//! [`crate::web`] supplies DOM-backed implementations of the three seams.

use crate::config::GuardConfig;
use crate::error::{FormGuardError, Result};
use formguard_core::{check_submission_with, Decision, FieldSource, FormValues, Rules};
use std::cell::Cell;
use tracing::{debug, warn};

/// A submit event whose default action can be suppressed
pub trait SubmitEvent {
    /// Cancel the native form submission
    fn prevent_default(&self);
}

/// Blocking user notification
pub trait Notifier {
    /// Show a modal alert; returns once the user dismisses it
    fn alert(&self, message: &str);
}

/// Proof that the guard's submit interceptor was registered
///
/// Only [`FormGuard::install`] hands these out, and only once per guard.
#[derive(Debug)]
#[must_use = "the installation token marks the one registered interceptor"]
pub struct Installation {
    form_selector: String,
}

impl Installation {
    /// Selector of the form the interceptor is attached to
    pub fn form_selector(&self) -> &str {
        &self.form_selector
    }
}

/// Validates submissions and blocks the invalid ones
#[derive(Debug)]
pub struct FormGuard {
    config: GuardConfig,
    rules: Rules,
    installed: Cell<bool>,
}

impl Default for FormGuard {
    fn default() -> Self {
        Self::new(GuardConfig::default())
    }
}

impl FormGuard {
    /// Create a guard from an already validated configuration
    pub fn new(config: GuardConfig) -> Self {
        let rules = config.rules();
        Self {
            config,
            rules,
            installed: Cell::new(false),
        }
    }

    /// Create a guard, checking the configuration first
    pub fn with_config(config: GuardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Decide a submission without side effects
    pub fn check<S: FieldSource + ?Sized>(&self, source: &S) -> Decision {
        check_submission_with(source, &self.rules)
    }

    /// Coerced values, or the full violation report
    pub fn require_valid<S: FieldSource + ?Sized>(&self, source: &S) -> Result<FormValues> {
        match self.check(source) {
            Decision::Allow { values } => Ok(values),
            Decision::Block { violations } => Err(FormGuardError::Rejected(violations)),
        }
    }

    /// Handle one submission attempt
    ///
    /// On a blocked decision the event's default action is suppressed and
    /// the configured alert is shown. An allowed decision has no side
    /// effects, leaving the host to submit natively.
    pub fn handle_submit<S, E, N>(&self, source: &S, event: &E, notifier: &N) -> Decision
    where
        S: FieldSource + ?Sized,
        E: SubmitEvent + ?Sized,
        N: Notifier + ?Sized,
    {
        let decision = self.check(source);

        match &decision {
            Decision::Allow { values } => {
                debug!(?values, "submission allowed");
            }
            Decision::Block { violations } => {
                warn!(%violations, "submission blocked");
                event.prevent_default();
                notifier.alert(&self.config.alert_message);
            }
        }

        decision
    }

    /// Mark the submit interceptor as registered
    ///
    /// Succeeds exactly once per guard; later calls fail with
    /// [`FormGuardError::AlreadyInstalled`].
    pub fn install(&self) -> Result<Installation> {
        if self.installed.replace(true) {
            return Err(FormGuardError::AlreadyInstalled);
        }
        debug!(selector = %self.config.form_selector, "form guard installed");
        Ok(Installation {
            form_selector: self.config.form_selector.clone(),
        })
    }

    /// Give back an installation whose registration failed
    ///
    /// The guard can then be installed again.
    pub fn release(&self, installation: Installation) {
        debug!(selector = %installation.form_selector, "form guard installation released");
        self.installed.set(false);
    }

    pub fn is_installed(&self) -> bool {
        self.installed.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormSnapshot;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingEvent {
        prevented: Cell<bool>,
    }

    impl SubmitEvent for RecordingEvent {
        fn prevent_default(&self) {
            self.prevented.set(true);
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        alerts: RefCell<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }
    }

    fn submit(guard: &FormGuard, texts: [&str; 4]) -> (Decision, bool, Vec<String>) {
        let event = RecordingEvent::default();
        let notifier = RecordingNotifier::default();
        let decision = guard.handle_submit(&texts, &event, &notifier);
        (decision, event.prevented.get(), notifier.alerts.into_inner())
    }

    #[test]
    fn test_valid_submission_has_no_side_effects() {
        let guard = FormGuard::default();
        let (decision, prevented, alerts) = submit(&guard, ["10", "100", "0.05", "2024"]);
        assert!(decision.is_allowed());
        assert!(!prevented);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_invalid_submission_is_cancelled_and_alerted() {
        let guard = FormGuard::default();
        let (decision, prevented, alerts) = submit(&guard, ["0", "100", "0.05", "2024"]);
        assert!(decision.is_blocked());
        assert!(prevented);
        assert_eq!(alerts, vec!["Please enter valid values for all fields.".to_string()]);
    }

    #[test]
    fn test_single_alert_for_many_failures() {
        let guard = FormGuard::default();
        let (_, prevented, alerts) = submit(&guard, ["", "", "", ""]);
        assert!(prevented);
        assert_eq!(alerts.len(), 1);
    }

    #[test]
    fn test_each_attempt_is_independent() {
        let guard = FormGuard::default();
        let (first, ..) = submit(&guard, ["10", "100", "0.05", "1970"]);
        let (second, ..) = submit(&guard, ["10", "100", "0.05", "1972"]);
        assert!(first.is_blocked());
        assert!(second.is_allowed());
    }

    #[test]
    fn test_configured_message_and_range() {
        let config = GuardConfig {
            alert_message: "Check the projection inputs.".to_string(),
            tp_max: 2050.0,
            ..GuardConfig::default()
        };
        let guard = FormGuard::with_config(config).unwrap();
        let (decision, _, alerts) = submit(&guard, ["10", "100", "0.05", "2060"]);
        assert!(decision.is_blocked());
        assert_eq!(alerts, vec!["Check the projection inputs.".to_string()]);
    }

    #[test]
    fn test_missing_field_blocks() {
        let guard = FormGuard::default();
        let snapshot = FormSnapshot::from_pairs([("Q0", "10"), ("Qmax", "100"), ("r", "0.05")]);
        let event = RecordingEvent::default();
        let notifier = RecordingNotifier::default();

        let decision = guard.handle_submit(&snapshot, &event, &notifier);
        assert!(decision.is_blocked());
        assert!(event.prevented.get());
    }

    #[test]
    fn test_require_valid() {
        let guard = FormGuard::default();
        assert_eq!(
            guard.require_valid(&["10", "100", "0.05", "2024"]).unwrap(),
            FormValues::new(10.0, 100.0, 0.05, 2024.0)
        );
        match guard.require_valid(&["10", "100", "abc", "2024"]) {
            Err(FormGuardError::Rejected(violations)) => {
                assert_eq!(violations.to_string(), "r is not a number");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_install_exactly_once() {
        let guard = FormGuard::default();
        assert!(!guard.is_installed());

        let installation = guard.install().unwrap();
        assert_eq!(installation.form_selector(), "form");
        assert!(guard.is_installed());

        assert!(matches!(
            guard.install(),
            Err(FormGuardError::AlreadyInstalled)
        ));
    }

    #[test]
    fn test_release_allows_retry_after_failed_registration() {
        let guard = FormGuard::default();
        let installation = guard.install().unwrap();

        guard.release(installation);
        assert!(!guard.is_installed());

        let retry = guard.install().unwrap();
        assert_eq!(retry.form_selector(), "form");
        assert!(matches!(
            guard.install(),
            Err(FormGuardError::AlreadyInstalled)
        ));
    }
}
