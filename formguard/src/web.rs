//! DOM binding for the form guard
//!
//! Waits for `DOMContentLoaded` (or runs at once if the document is
//! already parsed), then intercepts `submit` on the first form matching
//! the configured selector.

use crate::config::GuardConfig;
use crate::error::{FormGuardError, Result};
use crate::guard::{FormGuard, Installation, Notifier, SubmitEvent};
use crate::logging::init_logging;
use crate::{console_error, console_log, console_warn};
use formguard_core::{Field, FieldSource};
use std::cell::{Cell, OnceCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Event, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, Window,
};

thread_local! {
    static GUARD: OnceCell<Rc<FormGuard>> = const { OnceCell::new() };
}

/// Reads guarded fields from the live document by element id
pub struct DomFields {
    document: Document,
}

impl DomFields {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl FieldSource for DomFields {
    type Text = String;

    fn field_text(&self, field: Field) -> Option<Self::Text> {
        let element = self.document.get_element_by_id(field.id())?;

        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            return Some(textarea.value());
        }
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            return Some(select.value());
        }

        // Not a form control: there is no value to read
        None
    }
}

impl SubmitEvent for Event {
    fn prevent_default(&self) {
        Event::prevent_default(self);
    }
}

/// Shows `window.alert`
pub struct WindowNotifier {
    window: Window,
}

impl WindowNotifier {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Notifier for WindowNotifier {
    fn alert(&self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            console_error!("alert failed: {err:?}");
        }
    }
}

/// Install the guard on this page
///
/// `config_json` is an optional [`GuardConfig`] as JSON. Only the first
/// call installs anything; later calls return an error.
#[wasm_bindgen]
pub fn install_form_guard(config_json: Option<String>) -> std::result::Result<(), JsValue> {
    init_logging();

    let config = match config_json {
        Some(json) => GuardConfig::from_json_str(&json)?,
        None => GuardConfig::default(),
    };

    install(FormGuard::new(config)).map_err(JsValue::from)
}

fn install(guard: FormGuard) -> Result<()> {
    let guard = GUARD.with(|cell| Rc::clone(cell.get_or_init(|| Rc::new(guard))));
    let installation = guard.install()?;

    // Held until registration settles; handed back to the guard on failure
    let claim = Rc::new(Cell::new(Some(installation)));

    let result = register(Rc::clone(&guard), Rc::clone(&claim));
    if result.is_err() {
        if let Some(installation) = claim.take() {
            guard.release(installation);
        }
    }
    result
}

fn register(guard: Rc<FormGuard>, claim: Rc<Cell<Option<Installation>>>) -> Result<()> {
    let window = web_sys::window()
        .ok_or_else(|| FormGuardError::JavaScript("no global window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| FormGuardError::JavaScript("window has no document".to_string()))?;

    if document.ready_state() != "loading" {
        return attach_claimed(&guard, &claim, window, document);
    }

    let target = document.clone();
    let on_ready = Closure::once(move || {
        if let Err(err) = attach_claimed(&guard, &claim, window, document) {
            console_error!("{err}");
            if let Some(installation) = claim.take() {
                guard.release(installation);
            }
        }
    });

    let options = AddEventListenerOptions::new();
    options.set_once(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        on_ready.as_ref().unchecked_ref(),
        &options,
    )?;
    on_ready.forget();

    console_log!("waiting for DOMContentLoaded");
    Ok(())
}

/// Attach using the pending claim; a page without a form is nothing to guard
fn attach_claimed(
    guard: &Rc<FormGuard>,
    claim: &Cell<Option<Installation>>,
    window: Window,
    document: Document,
) -> Result<()> {
    let Some(installation) = claim.take() else {
        return Err(FormGuardError::AlreadyInstalled);
    };

    match attach(Rc::clone(guard), &installation, window, document) {
        Ok(()) => Ok(()),
        Err(FormGuardError::NoForm(selector)) => {
            console_warn!("no form matches {selector:?}; submissions are not guarded");
            tracing::warn!(%selector, "no form to guard");
            Ok(())
        }
        Err(err) => {
            // Put the claim back so the caller can release it
            claim.set(Some(installation));
            Err(err)
        }
    }
}

/// Register the submit interceptor on the first matching form
fn attach(
    guard: Rc<FormGuard>,
    installation: &Installation,
    window: Window,
    document: Document,
) -> Result<()> {
    let selector = installation.form_selector().to_string();
    let form = document
        .query_selector(&selector)?
        .ok_or_else(|| FormGuardError::NoForm(selector.clone()))?;

    let fields = DomFields::new(document);
    let notifier = WindowNotifier::new(window);
    let on_submit: Closure<dyn Fn(Event)> = Closure::new(move |event: Event| {
        guard.handle_submit(&fields, &event, &notifier);
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    console_log!("guarding submissions of {selector:?}");
    Ok(())
}
