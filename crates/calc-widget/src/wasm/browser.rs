//! Browser bindings
//!
//! [`WebSurface`] renders into the live document, [`LocalStorage`] persists
//! the theme, and [`BrowserCalculator`] is the object page script talks to.
//! Page script forwards clicks and key presses with the target element id.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Storage};

use crate::config::WidgetConfig;
use crate::controller::Calculator;
use crate::surface::{ids, Surface};
use crate::theme::{PreferenceStore, StoreError, StoreResult};
use crate::wasm::dom::{DomElement, DomEvent};

/// Installs the panic hook when the module loads
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// [`Surface`] over the page document
#[derive(Debug, Clone)]
pub struct WebSurface {
    document: Document,
}

impl WebSurface {
    /// Wraps a document
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Wraps the current window's document
    pub fn from_window() -> Result<Self, JsValue> {
        web_sys::window()
            .and_then(|w| w.document())
            .map(Self::new)
            .ok_or_else(|| JsValue::from_str("no document available"))
    }

    fn element(&self, id: &str) -> Option<Element> {
        if id == ids::ROOT {
            return self.document.body().map(Element::from);
        }
        self.document.get_element_by_id(id)
    }

    fn build(&self, node: &DomElement) -> Result<Element, JsValue> {
        let element = self.document.create_element(&node.tag)?;
        if !node.id.is_empty() {
            element.set_id(&node.id);
        }
        if !node.classes.is_empty() {
            element.set_class_name(&node.classes.join(" "));
        }
        for (name, value) in &node.attributes {
            element.set_attribute(name, value)?;
        }
        if !node.text_content.is_empty() {
            element.set_text_content(Some(node.text_content.as_str()));
        }
        for child in &node.children {
            let node = self.build(child)?;
            element.append_child(&node)?;
        }
        Ok(element)
    }
}

impl Surface for WebSurface {
    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn add_class(&mut self, id: &str, class: &str) {
        if let Some(el) = self.element(id) {
            if let Err(err) = el.class_list().add_1(class) {
                tracing::warn!(id, class, ?err, "classList.add failed");
            }
        }
    }

    fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(el) = self.element(id) {
            if let Err(err) = el.class_list().remove_1(class) {
                tracing::warn!(id, class, ?err, "classList.remove failed");
            }
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .is_some_and(|el| el.class_list().contains(class))
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) {
        if let Some(el) = self.element(id) {
            if let Err(err) = el.set_attribute(name, value) {
                tracing::warn!(id, name, ?err, "setAttribute failed");
            }
        }
    }

    fn clear_children(&mut self, id: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(None);
        }
    }

    fn append_child(&mut self, parent_id: &str, child: DomElement) {
        let Some(parent) = self.element(parent_id) else {
            return;
        };
        let appended = self
            .build(&child)
            .and_then(|node| parent.append_child(&node));
        if let Err(err) = appended {
            tracing::warn!(parent_id, ?err, "failed to append child");
        }
    }
}

/// [`PreferenceStore`] over `window.localStorage`
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Opens the current window's local storage
    pub fn open() -> StoreResult<Self> {
        let window = web_sys::window().ok_or_else(|| unavailable("no window"))?;
        let storage = window
            .local_storage()
            .map_err(|err| unavailable(format!("{err:?}")))?
            .ok_or_else(|| unavailable("localStorage disabled"))?;
        Ok(Self { storage })
    }
}

fn unavailable(reason: impl Into<String>) -> StoreError {
    StoreError::Unavailable(reason.into())
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|err| unavailable(format!("{err:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| unavailable(format!("{err:?}")))
    }
}

/// Browser calculator - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    inner: Calculator<WebSurface, LocalStorage>,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Mounts the widget on the current document, formatting numbers in
    /// the browser's language
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<BrowserCalculator, JsValue> {
        Self::mount(WidgetConfig::new().with_user_language(navigator_language().as_deref()))
    }

    /// Mounts with a JSON `WidgetConfig`; without a `locale` field the
    /// browser's language is used
    pub fn with_config(json: &str) -> Result<BrowserCalculator, JsValue> {
        let config = WidgetConfig::from_json_with_language(json, navigator_language().as_deref())
            .map_err(to_js)?;
        Self::mount(config)
    }

    fn mount(config: WidgetConfig) -> Result<BrowserCalculator, JsValue> {
        let surface = WebSurface::from_window()?;
        let store = LocalStorage::open().map_err(to_js)?;
        let mut inner = Calculator::with_config(surface, store, config).map_err(to_js)?;
        inner.mount();
        Ok(Self { inner })
    }

    /// Applies a button `data-value` token; false if rejected
    pub fn press(&mut self, token: &str) -> bool {
        !self.inner.press(token).is_rejected()
    }

    /// Routes a click on the element with this id
    pub fn click(&mut self, element_id: &str) -> bool {
        self.inner.handle_event(&DomEvent::click(element_id))
    }

    /// Routes a document-level key press
    pub fn press_key(&mut self, key: &str) -> bool {
        self.inner.handle_event(&DomEvent::key_press(key))
    }

    /// Routes a key press on a focused element
    pub fn press_key_on(&mut self, element_id: &str, key: &str) -> bool {
        self.inner
            .handle_event(&DomEvent::key_press_on(element_id, key))
    }

    /// Restores the previous buffer
    pub fn replay(&mut self) -> bool {
        self.inner.replay()
    }

    /// Flips the theme, returning `"dark"` or `"light"`
    pub fn toggle_theme(&mut self) -> String {
        self.inner.toggle_theme().as_str().to_string()
    }

    /// Opens or closes the history panel
    pub fn toggle_history(&mut self) {
        self.inner.toggle_history_panel();
    }

    /// Selects the history entry with this `data-idx`
    pub fn select_history(&mut self, index: usize) -> bool {
        self.inner.select_history(index)
    }

    /// Empties the history
    pub fn clear_history(&mut self) {
        self.inner.clear_history();
    }

    /// Document click outside the panel
    pub fn outside_click(&mut self, element_id: &str) -> bool {
        self.inner.outside_click(element_id)
    }

    /// Raw buffer text
    #[wasm_bindgen(getter)]
    pub fn buffer(&self) -> String {
        self.inner.buffer().to_string()
    }

    /// Result view text
    #[wasm_bindgen(getter)]
    pub fn result(&self) -> String {
        self.inner.result_display()
    }

    /// History as JSON, oldest first
    pub fn history_json(&self) -> String {
        self.inner
            .history()
            .to_json()
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// History as plain text, one `expression = result` per line
    pub fn history_text(&self) -> String {
        self.inner.history().export_formatted()
    }

    /// Loads a [`BrowserCalculator::history_json`] export
    pub fn restore_history(&mut self, json: &str) -> Result<usize, JsValue> {
        self.inner.restore_history(json).map_err(to_js)
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn navigator_language() -> Option<String> {
    web_sys::window().and_then(|w| w.navigator().language())
}
