//! Wires the enhancer onto the server-rendered IN Data form.
//!
//! Runs once per page. Everything that does not depend on the cascade
//! selects (styles, tooltips, keyboard, the global fetch helper) is set up
//! even if the form markup turns out to be incomplete.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent};

use crate::bindings::install_global_fetch;
use crate::shared::config::{load_config, EnhancerConfig};
use crate::shared::dom::{controls_with_class, DomControl};
use crate::shared::storage::LocalStore;
use crate::shared::styles::inject_styles;

use super::controller::{EnhancerError, FormController};
use super::keyboard::handle_keydown;
use super::persistence::{load_form_state, save_form_state};
use super::tooltips::add_tooltips;

/// Run [`enhance_page`] now, or on `DOMContentLoaded` if the document is
/// still loading
pub fn init_when_ready() {
    let document = match current_document() {
        Ok(document) => document,
        Err(e) => {
            log::error!("Form enhancer not started: {}", e);
            return;
        }
    };

    if document.ready_state() != "loading" {
        run(&document);
        return;
    }

    let ready_doc = document.clone();
    let on_ready = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        run(&ready_doc);
    }) as Box<dyn FnMut(_)>);

    let attached = document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref());
    if let Err(e) = attached {
        log::error!("Failed to wait for DOMContentLoaded: {:?}", e);
        return;
    }
    on_ready.forget();
}

fn run(document: &Document) {
    if let Err(e) = enhance_page(document) {
        log::error!("Form enhancer stopped: {}", e);
    }
}

fn current_document() -> Result<Document, EnhancerError> {
    web_sys::window()
        .ok_or(EnhancerError::NoWindow)?
        .document()
        .ok_or(EnhancerError::NoDocument)
}

/// Attach all behavior to `document` and return the form controller
pub fn enhance_page(
    document: &Document,
) -> Result<Rc<FormController<DomControl>>, EnhancerError> {
    let config = load_config(document);

    inject_styles(document);
    install_global_fetch();

    let titled = add_tooltips(&config, |id| DomControl::by_id(document, id));
    log::debug!("Tooltips applied to {} elements", titled);

    attach_enter_guard(document, &config.marker_class);

    let controller = Rc::new(FormController::from_document(document, config.clone())?);
    controller.validate_form();
    attach_change_handlers(document, &config, &controller);

    let _ = load_form_state(&LocalStore, &config.storage_key);
    Ok(controller)
}

fn attach_change_handlers(
    document: &Document,
    config: &EnhancerConfig,
    controller: &Rc<FormController<DomControl>>,
) {
    let marked = controls_with_class(document, &config.marker_class);
    log::debug!(
        "Watching {} .{} elements for changes",
        marked.len(),
        config.marker_class
    );

    for control in marked {
        let form = Rc::clone(controller);
        let on_change = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            form.validate_form();
            save_form_state(form.as_ref(), &LocalStore);
            form.update_progress();
        }) as Box<dyn FnMut(_)>);

        let attached = control
            .element()
            .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
        match attached {
            Ok(()) => on_change.forget(),
            Err(e) => log::warn!("Failed to attach change handler: {:?}", e),
        }
    }
}

fn attach_enter_guard(document: &Document, marker_class: &str) {
    let marker = marker_class.to_string();
    let on_keydown = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        let target = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(DomControl::from_element);

        if let Some(target) = target {
            handle_keydown(&event.key(), &target, &marker);
        }
    }) as Box<dyn FnMut(_)>);

    let attached =
        document.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
    match attached {
        Ok(()) => on_keydown.forget(),
        Err(e) => log::warn!("Failed to attach keydown handler: {:?}", e),
    }
}
