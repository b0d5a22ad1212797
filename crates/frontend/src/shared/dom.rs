//! Thin abstraction over the form elements the enhancer touches.
//!
//! Handlers are written against [`FormControl`] so they can be exercised
//! natively; [`DomControl`] is the browser implementation.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlSelectElement};

pub trait FormControl {
    /// Current value; empty when nothing is selected
    fn value(&self) -> String;
    fn is_disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    /// Inline `background` style
    fn set_background(&self, css: &str);
    fn set_title(&self, text: &str);
    fn blur(&self);
}

/// A select, input or button on the page
#[derive(Clone, Debug)]
pub struct DomControl {
    element: HtmlElement,
}

impl DomControl {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    /// Wrap an arbitrary element; `None` if it is not an `HtmlElement`
    pub fn from_element(element: Element) -> Option<Self> {
        element.dyn_into::<HtmlElement>().ok().map(Self::new)
    }

    pub fn by_id(document: &Document, id: &str) -> Option<Self> {
        document.get_element_by_id(id).and_then(Self::from_element)
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl FormControl for DomControl {
    fn value(&self) -> String {
        if let Some(select) = self.element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(button) = self.element.dyn_ref::<HtmlButtonElement>() {
            button.value()
        } else {
            String::new()
        }
    }

    fn is_disabled(&self) -> bool {
        if let Some(select) = self.element.dyn_ref::<HtmlSelectElement>() {
            select.disabled()
        } else if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.disabled()
        } else if let Some(button) = self.element.dyn_ref::<HtmlButtonElement>() {
            button.disabled()
        } else {
            self.element.has_attribute("disabled")
        }
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(select) = self.element.dyn_ref::<HtmlSelectElement>() {
            select.set_disabled(disabled);
        } else if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        } else if let Some(button) = self.element.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            let _ = self.element.set_attribute("disabled", "");
        } else {
            let _ = self.element.remove_attribute("disabled");
        }
    }

    fn add_class(&self, class: &str) {
        let _ = self.element.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.element.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn set_background(&self, css: &str) {
        let _ = self.element.style().set_property("background", css);
    }

    fn set_title(&self, text: &str) {
        self.element.set_title(text);
    }

    fn blur(&self) {
        let _ = self.element.blur();
    }
}

/// All elements currently carrying `class`
pub fn controls_with_class(document: &Document, class: &str) -> Vec<DomControl> {
    let mut controls = Vec::new();
    let Ok(nodes) = document.query_selector_all(&format!(".{}", class)) else {
        return controls;
    };

    for i in 0..nodes.length() {
        if let Some(control) = nodes
            .item(i)
            .and_then(|node| node.dyn_into::<Element>().ok())
            .and_then(DomControl::from_element)
        {
            controls.push(control);
        }
    }
    controls
}
