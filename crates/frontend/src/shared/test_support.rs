//! In-memory stand-ins for the browser, used by unit tests

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use async_trait::async_trait;
use contracts::shared::notification::Notification;

use super::api_utils::{ApiError, HttpTransport, RawResponse, RequestOptions};
use super::dom::FormControl;
use super::notification::{Notify, ToastHost};
use super::scheduler::Scheduler;
use super::storage::{KeyValueStore, StorageError};

#[derive(Debug, Default)]
pub struct FakeControlState {
    pub value: String,
    pub disabled: bool,
    pub classes: BTreeSet<String>,
    pub background: Option<String>,
    pub title: Option<String>,
    pub blurred: u32,
}

/// Clones share state, like two handles to the same DOM node
#[derive(Clone, Debug, Default)]
pub struct FakeControl(pub Rc<RefCell<FakeControlState>>);

impl FakeControl {
    pub fn with_value(value: &str) -> Self {
        let control = Self::default();
        control.set_value(value);
        control
    }

    pub fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = value.to_string();
    }

    pub fn background(&self) -> Option<String> {
        self.0.borrow().background.clone()
    }

    pub fn title(&self) -> Option<String> {
        self.0.borrow().title.clone()
    }

    pub fn blurred(&self) -> u32 {
        self.0.borrow().blurred
    }
}

impl FormControl for FakeControl {
    fn value(&self) -> String {
        self.0.borrow().value.clone()
    }

    fn is_disabled(&self) -> bool {
        self.0.borrow().disabled
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }

    fn add_class(&self, class: &str) {
        self.0.borrow_mut().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.contains(class)
    }

    fn set_background(&self, css: &str) {
        self.0.borrow_mut().background = Some(css.to_string());
    }

    fn set_title(&self, text: &str) {
        self.0.borrow_mut().title = Some(text.to_string());
    }

    fn blur(&self) {
        self.0.borrow_mut().blurred += 1;
    }
}

/// Scheduler driven by a virtual clock
#[derive(Clone, Default)]
pub struct ManualScheduler {
    now: Rc<Cell<u32>>,
    pending: Rc<RefCell<Vec<(u32, Box<dyn FnOnce()>)>>>,
}

impl ManualScheduler {
    /// Move the clock forward and run everything that became due, in order
    pub fn advance(&self, ms: u32) {
        let target = self.now.get() + ms;
        loop {
            let next = {
                let mut pending = self.pending.borrow_mut();
                let due = pending
                    .iter()
                    .enumerate()
                    .filter(|(_, (at, _))| *at <= target)
                    .min_by_key(|(_, (at, _))| *at)
                    .map(|(i, _)| i);
                due.map(|i| pending.remove(i))
            };
            match next {
                Some((at, task)) => {
                    self.now.set(at);
                    task();
                }
                None => break,
            }
        }
        self.now.set(target);
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let at = self.now.get() + delay_ms;
        self.pending.borrow_mut().push((at, task));
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub items: RefCell<HashMap<String, String>>,
    pub fail_writes: Cell<bool>,
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::WriteFailed(key.to_string()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    shown: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.shown.borrow().clone()
    }
}

impl Notify for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.shown.borrow_mut().push(notification);
    }
}

/// Answers known URLs with a fixed status and body; anything else is a
/// transport failure
#[derive(Default)]
pub struct CannedTransport {
    routes: HashMap<String, (u16, String)>,
}

impl CannedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, status: u16, body: &str) -> Self {
        self.routes
            .insert(url.to_string(), (status, body.to_string()));
        self
    }
}

#[async_trait(?Send)]
impl HttpTransport for CannedTransport {
    async fn send(&self, url: &str, _options: &RequestOptions) -> Result<RawResponse, ApiError> {
        let (status, body) = self
            .routes
            .get(url)
            .cloned()
            .ok_or_else(|| ApiError::Transport(format!("Failed to fetch {}", url)))?;
        Ok(RawResponse {
            status,
            ok: (200..300).contains(&status),
            body,
        })
    }
}

#[derive(Default)]
struct FakeToastState {
    next_id: u32,
    live: Vec<(u32, String, Option<Box<dyn FnOnce()>>)>,
    removals: u32,
    fail: bool,
}

/// Toast host that keeps toasts in a list; clones share the list
#[derive(Clone, Default)]
pub struct FakeToastHost(Rc<RefCell<FakeToastState>>);

impl FakeToastHost {
    pub fn count(&self) -> usize {
        self.0.borrow().live.len()
    }

    pub fn messages(&self) -> Vec<String> {
        self.0
            .borrow()
            .live
            .iter()
            .map(|(_, message, _)| message.clone())
            .collect()
    }

    pub fn removals(&self) -> u32 {
        self.0.borrow().removals
    }

    pub fn fail_appends(&self) {
        self.0.borrow_mut().fail = true;
    }

    /// Press the `×` button of the toast at `index` among those on screen
    pub fn click_dismiss(&self, index: usize) {
        let dismiss = self.0.borrow_mut().live[index].2.take();
        if let Some(dismiss) = dismiss {
            dismiss();
        }
    }
}

impl ToastHost for FakeToastHost {
    type Toast = u32;

    fn append(
        &self,
        notification: &Notification,
        dismiss: Box<dyn FnOnce()>,
    ) -> Result<u32, String> {
        let mut state = self.0.borrow_mut();
        if state.fail {
            return Err("append failed".to_string());
        }
        state.next_id += 1;
        let id = state.next_id;
        state
            .live
            .push((id, notification.message.clone(), Some(dismiss)));
        Ok(id)
    }

    fn remove(&self, toast: u32) {
        let mut state = self.0.borrow_mut();
        state.live.retain(|(id, _, _)| *id != toast);
        state.removals += 1;
    }
}
