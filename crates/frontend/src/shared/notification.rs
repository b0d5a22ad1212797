//! Toast notifications appended to `document.body`.
//!
//! Each toast removes itself after [`AUTO_DISMISS_MS`] or when its `×`
//! button is clicked, whichever comes first. Several toasts may be on screen
//! at once; they do not know about each other.

use std::cell::RefCell;
use std::rc::Rc;

use contracts::shared::notification::{Notification, NotificationKind, AUTO_DISMISS_MS};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use super::scheduler::{Scheduler, TimeoutScheduler};

/// Anything able to surface a notification to the user
pub trait Notify {
    fn notify(&self, notification: Notification);
}

/// Where toasts are rendered
pub trait ToastHost: Clone + 'static {
    type Toast: 'static;

    /// Render and attach a toast. `dismiss` must run when the user closes it.
    fn append(
        &self,
        notification: &Notification,
        dismiss: Box<dyn FnOnce()>,
    ) -> Result<Self::Toast, String>;

    fn remove(&self, toast: Self::Toast);
}

/// Shows toasts on a host and takes each one down exactly once
#[derive(Clone, Debug)]
pub struct Toaster<H: ToastHost, S: Scheduler> {
    host: H,
    scheduler: S,
}

impl<H: ToastHost, S: Scheduler> Toaster<H, S> {
    pub fn new(host: H, scheduler: S) -> Self {
        Self { host, scheduler }
    }
}

impl<H: ToastHost, S: Scheduler> Notify for Toaster<H, S> {
    fn notify(&self, notification: Notification) {
        // Кто первым заберёт тост из слота (кнопка или таймер), тот и удаляет
        let slot: Rc<RefCell<Option<H::Toast>>> = Rc::new(RefCell::new(None));

        let dismiss = {
            let host = self.host.clone();
            let slot = Rc::clone(&slot);
            Box::new(move || {
                let toast = slot.borrow_mut().take();
                if let Some(toast) = toast {
                    host.remove(toast);
                }
            })
        };

        match self.host.append(&notification, dismiss) {
            Ok(toast) => *slot.borrow_mut() = Some(toast),
            Err(e) => {
                log::error!("Failed to show notification '{}': {}", notification.message, e);
                return;
            }
        }

        let host = self.host.clone();
        self.scheduler.schedule(
            AUTO_DISMISS_MS,
            Box::new(move || {
                let toast = slot.borrow_mut().take();
                if let Some(toast) = toast {
                    host.remove(toast);
                }
            }),
        );
    }
}

/// A rendered toast and the click handler of its `×` button
pub struct DomToast {
    element: Element,
    button: Element,
    on_click: Closure<dyn FnMut(web_sys::MouseEvent)>,
}

/// Renders toasts into the live document
#[derive(Clone, Debug)]
pub struct DomToastHost {
    document: Document,
}

impl DomToastHost {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn render(
        &self,
        notification: &Notification,
    ) -> Result<(Element, Element), wasm_bindgen::JsValue> {
        let doc = &self.document;

        let container = doc.create_element("div")?;
        container.set_class_name(&notification.kind.css_class());
        container.set_attribute("data-notification-id", &uuid::Uuid::new_v4().to_string())?;
        container.set_attribute("role", "status")?;

        let icon = doc.create_element("i")?;
        icon.set_class_name(notification.kind.icon_class());
        container.append_child(&icon)?;

        // Текст сообщения вставляется как текст, не как HTML
        let text = doc.create_element("span")?;
        text.set_text_content(Some(&notification.message));
        container.append_child(&text)?;

        let button = doc.create_element("button")?;
        button.set_attribute("type", "button")?;
        button.set_attribute("aria-label", "Dismiss")?;
        button.set_text_content(Some("\u{00d7}"));
        container.append_child(&button)?;

        Ok((container, button))
    }
}

impl ToastHost for DomToastHost {
    type Toast = DomToast;

    fn append(
        &self,
        notification: &Notification,
        dismiss: Box<dyn FnOnce()>,
    ) -> Result<DomToast, String> {
        let body = self.document.body().ok_or("document has no body")?;
        let (element, button) = self.render(notification).map_err(|e| format!("{:?}", e))?;

        let mut dismiss = Some(dismiss);
        let on_click = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
            if let Some(dismiss) = dismiss.take() {
                dismiss();
            }
        }) as Box<dyn FnMut(_)>);
        button
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(|e| format!("{:?}", e))?;

        body.append_child(&element).map_err(|e| format!("{:?}", e))?;

        Ok(DomToast {
            element,
            button,
            on_click,
        })
    }

    fn remove(&self, toast: DomToast) {
        let _ = toast
            .button
            .remove_event_listener_with_callback("click", toast.on_click.as_ref().unchecked_ref());
        toast.element.remove();
        // on_click освобождается вместе с toast
    }
}

/// Toaster bound to the current document and browser timers
pub type DomNotifier = Toaster<DomToastHost, TimeoutScheduler>;

impl Toaster<DomToastHost, TimeoutScheduler> {
    /// Notifier for the current window, if there is one
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self::new(DomToastHost::new(document), TimeoutScheduler))
    }
}

/// Show a notification in the current document
pub fn show_notification(message: &str, kind: NotificationKind) {
    match DomNotifier::current() {
        Some(notifier) => notifier.notify(Notification::new(message, kind)),
        None => log::warn!("No document available for notification: {}", message),
    }
}
