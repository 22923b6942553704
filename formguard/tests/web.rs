//! Browser tests for the DOM binding
//!
//! Run with `wasm-pack test --headless --chrome formguard --features web`.

#![cfg(all(target_arch = "wasm32", feature = "web"))]

use formguard::{DomFields, Field, FieldSource, FormGuard, Notifier, ViolationKind};
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, EventInit, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

#[derive(Default)]
struct Alerts {
    shown: RefCell<Vec<String>>,
}

impl Notifier for Alerts {
    fn alert(&self, message: &str) {
        self.shown.borrow_mut().push(message.to_string());
    }
}

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Replace the body with a form holding the given field values
fn render_form(values: &[(&str, &str)]) -> Document {
    let document = document();
    let body = document.body().unwrap();
    body.set_inner_html("");

    let form = document.create_element("form").unwrap();
    for (id, value) in values {
        let input: HtmlInputElement = document.create_element("input").unwrap().dyn_into().unwrap();
        input.set_id(id);
        input.set_value(value);
        form.append_child(&input).unwrap();
    }
    body.append_child(&form).unwrap();
    document
}

fn submit_event() -> Event {
    let init = EventInit::new();
    init.set_cancelable(true);
    Event::new_with_event_init_dict("submit", &init).unwrap()
}

#[wasm_bindgen_test]
fn reads_input_values_by_id() {
    let document = render_form(&[("Q0", "10"), ("Qmax", "100"), ("r", "0.05"), ("tp", "2024")]);
    let fields = DomFields::new(document);

    assert_eq!(fields.field_text(Field::R).as_deref(), Some("0.05"));
    assert_eq!(fields.field_text(Field::Tp).as_deref(), Some("2024"));
}

#[wasm_bindgen_test]
fn valid_submission_keeps_default_action() {
    let document = render_form(&[("Q0", "10"), ("Qmax", "100"), ("r", "0.05"), ("tp", "2024")]);
    let guard = FormGuard::default();
    let event = submit_event();
    let alerts = Alerts::default();

    let decision = guard.handle_submit(&DomFields::new(document), &event, &alerts);
    assert!(decision.is_allowed());
    assert!(!event.default_prevented());
    assert!(alerts.shown.borrow().is_empty());
}

#[wasm_bindgen_test]
fn invalid_submission_prevents_default() {
    let document = render_form(&[("Q0", "0"), ("Qmax", "100"), ("r", "0.05"), ("tp", "2024")]);
    let guard = FormGuard::default();
    let event = submit_event();
    let alerts = Alerts::default();

    let decision = guard.handle_submit(&DomFields::new(document), &event, &alerts);
    assert!(decision.is_blocked());
    assert!(event.default_prevented());
    assert_eq!(alerts.shown.borrow().len(), 1);
}

#[wasm_bindgen_test]
fn absent_element_is_missing() {
    let document = render_form(&[("Q0", "10"), ("Qmax", "100"), ("tp", "2024")]);
    let guard = FormGuard::default();
    let event = submit_event();
    let alerts = Alerts::default();

    let decision = guard.handle_submit(&DomFields::new(document), &event, &alerts);
    assert_eq!(
        decision.violations().and_then(|v| v.get(Field::R)),
        Some(ViolationKind::Missing)
    );
    assert!(event.default_prevented());
}
