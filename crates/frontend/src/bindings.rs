//! Functions exported to the page's own scripts.
//!
//! `enhancedFetch` is additionally installed on `window` so inline scripts
//! written against the old global keep working.

use contracts::shared::notification::{Notification, NotificationKind};
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::shared::api_utils::{enhanced_fetch, ApiError, RequestOptions};
use crate::shared::dom::DomControl;
use crate::shared::notification::{show_notification, DomNotifier, Notify};
use crate::shared::scheduler::TimeoutScheduler;
use crate::usecases::u601_in_data_form::control_state;

const GLOBAL_FETCH_NAME: &str = "enhancedFetch";

fn to_js_error(err: &ApiError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// `enhancedFetch(url, options?) -> Promise<payload>`
#[wasm_bindgen(js_name = enhancedFetch)]
pub async fn enhanced_fetch_js(url: String, options: JsValue) -> Result<JsValue, JsValue> {
    let options = if options.is_undefined() || options.is_null() {
        RequestOptions::default()
    } else {
        match serde_wasm_bindgen::from_value::<RequestOptions>(options) {
            Ok(options) => options,
            Err(e) => {
                let err = ApiError::Transport(format!("Invalid request options: {}", e));
                log::error!("API Error: {}", err);
                if let Some(notifier) = DomNotifier::current() {
                    notifier.notify(Notification::error(err.to_string()));
                }
                return Err(to_js_error(&err));
            }
        }
    };

    let payload = enhanced_fetch(&url, &options)
        .await
        .map_err(|e| to_js_error(&e))?;

    payload
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| js_sys::Error::new(&e.to_string()).into())
}

/// Expose [`enhanced_fetch_js`] as `window.enhancedFetch`
pub fn install_global_fetch() {
    let Some(window) = web_sys::window() else {
        return;
    };

    let fetch = Closure::wrap(Box::new(|url: String, options: JsValue| -> js_sys::Promise {
        wasm_bindgen_futures::future_to_promise(enhanced_fetch_js(url, options))
    }) as Box<dyn FnMut(String, JsValue) -> js_sys::Promise>);

    match js_sys::Reflect::set(&window, &JsValue::from_str(GLOBAL_FETCH_NAME), fetch.as_ref()) {
        Ok(_) => fetch.forget(),
        Err(e) => log::warn!("Failed to install window.{}: {:?}", GLOBAL_FETCH_NAME, e),
    }
}

#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification_js(message: &str, kind: Option<String>) {
    let kind = kind
        .as_deref()
        .map(NotificationKind::parse)
        .unwrap_or_default();
    show_notification(message, kind);
}

#[wasm_bindgen(js_name = addLoadingState)]
pub fn add_loading_state_js(element: HtmlElement) {
    control_state::add_loading_state(&DomControl::new(element));
}

#[wasm_bindgen(js_name = removeLoadingState)]
pub fn remove_loading_state_js(element: HtmlElement) {
    control_state::remove_loading_state(&DomControl::new(element));
}

#[wasm_bindgen(js_name = addSuccessState)]
pub fn add_success_state_js(element: HtmlElement) {
    control_state::add_success_state(&DomControl::new(element), &TimeoutScheduler);
}

#[wasm_bindgen(js_name = addErrorState)]
pub fn add_error_state_js(element: HtmlElement) {
    control_state::add_error_state(&DomControl::new(element), &TimeoutScheduler);
}
