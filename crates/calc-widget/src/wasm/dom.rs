//! Mock DOM for testing the widget without a browser
//!
//! Elements live in a flat id registry; appended children are kept as
//! subtrees on their parent and registered when they carry an id.

use std::collections::HashMap;

use crate::surface::{classes, ids, Surface};

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// First direct child carrying the class
    #[must_use]
    pub fn child_with_class(&self, class: &str) -> Option<&DomElement> {
        self.children.iter().find(|c| c.has_class(class))
    }
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Key press event
    KeyPress {
        /// The key that was pressed (`KeyboardEvent.key`)
        key: String,
        /// The focused element receiving the key, if any
        target: Option<String>,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a key press with no focused target
    #[must_use]
    pub fn key_press(key: &str) -> Self {
        Self::KeyPress {
            key: key.to_string(),
            target: None,
        }
    }

    /// Creates a key press delivered to a focused element
    #[must_use]
    pub fn key_press_on(element_id: &str, key: &str) -> Self {
        Self::KeyPress {
            key: key.to_string(),
            target: Some(element_id.to_string()),
        }
    }
}

/// Mock DOM for testing the calculator without browser
#[derive(Debug, Default)]
pub struct MockDom {
    /// Elements by ID for quick lookup
    elements: HashMap<String, DomElement>,
    /// Event history for verification
    event_history: Vec<DomEvent>,
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the calculator page structure (without keypad buttons)
    #[must_use]
    pub fn calculator() -> Self {
        let mut dom = Self::new();

        let display = [
            DomElement::new("body").with_id(ids::ROOT),
            DomElement::new("div")
                .with_id(ids::CALCULATOR)
                .with_class("calculator"),
            DomElement::new("div")
                .with_id(ids::EXPRESSION)
                .with_class("display-history")
                .with_text("0"),
            DomElement::new("div")
                .with_id(ids::RESULT)
                .with_class("display-result")
                .with_text("0"),
        ];

        let controls = [
            DomElement::new("button")
                .with_id(ids::THEME_BUTTON)
                .with_attr("aria-label", "Toggle theme"),
            DomElement::new("button")
                .with_id(ids::REPLAY_BUTTON)
                .with_attr("aria-label", "Replay"),
            DomElement::new("button")
                .with_id(ids::HISTORY_BUTTON)
                .with_attr("aria-label", "History"),
            DomElement::new("aside")
                .with_id(ids::HISTORY_PANEL)
                .with_class("history-panel")
                .with_attr("aria-hidden", "true"),
            DomElement::new("div")
                .with_id(ids::HISTORY_LIST)
                .with_attr("role", "list"),
            DomElement::new("button")
                .with_id(ids::CLEAR_HISTORY)
                .with_text("Clear"),
        ];

        for element in display.into_iter().chain(controls) {
            dom.register_element(element);
        }

        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Records an event
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Gets an attribute by element ID
    #[must_use]
    pub fn get_attribute(&self, id: &str, name: &str) -> Option<&str> {
        self.elements.get(id).and_then(|e| e.get_attr(name))
    }

    /// Children of an element, in document order
    #[must_use]
    pub fn children_of(&self, id: &str) -> &[DomElement] {
        self.elements
            .get(id)
            .map_or(&[][..], |e| e.children.as_slice())
    }

    /// Text of every rendered history row, top to bottom
    ///
    /// Each row renders as `"<expression> = <value>"`.
    #[must_use]
    pub fn history_rows(&self) -> Vec<String> {
        self.children_of(ids::HISTORY_LIST)
            .iter()
            .filter(|row| row.has_class(classes::HISTORY_ITEM))
            .map(|row| {
                let expr = row
                    .child_with_class(classes::HISTORY_EXPR)
                    .map_or("", |c| c.text_content.as_str());
                let value = row
                    .child_with_class(classes::HISTORY_VALUE)
                    .map_or("", |c| c.text_content.as_str());
                format!("{expr} = {value}")
            })
            .collect()
    }
}

impl Surface for MockDom {
    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    fn add_class(&mut self, id: &str, class: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.add_class(class);
        }
    }

    fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.remove_class(class);
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements.get(id).is_some_and(|e| e.has_class(class))
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn clear_children(&mut self, id: &str) {
        let child_ids: Vec<String> = self
            .children_of(id)
            .iter()
            .filter(|c| !c.id.is_empty())
            .map(|c| c.id.clone())
            .collect();

        for child_id in child_ids {
            self.elements.remove(&child_id);
        }

        if let Some(elem) = self.elements.get_mut(id) {
            elem.children.clear();
        }
    }

    fn append_child(&mut self, parent_id: &str, child: DomElement) {
        let Some(parent) = self.elements.get_mut(parent_id) else {
            return;
        };
        parent.children.push(child.clone());
        self.register_element(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== DomElement tests =====

    #[test]
    fn test_dom_element_new() {
        let elem = DomElement::new("span");
        assert_eq!(elem.tag, "span");
        assert!(elem.id.is_empty());
        assert!(elem.text_content.is_empty());
    }

    #[test]
    fn test_dom_element_default() {
        assert_eq!(DomElement::default().tag, "div");
    }

    #[test]
    fn test_dom_element_builder() {
        let elem = DomElement::new("div")
            .with_id("row")
            .with_text("x")
            .with_class("history-item")
            .with_attr("data-idx", "3")
            .with_child(DomElement::new("span").with_class("history-val"));
        assert_eq!(elem.id, "row");
        assert_eq!(elem.text_content, "x");
        assert!(elem.has_class("history-item"));
        assert_eq!(elem.get_attr("data-idx"), Some("3"));
        assert!(elem.child_with_class("history-val").is_some());
        assert!(elem.child_with_class("history-expr").is_none());
    }

    #[test]
    fn test_dom_element_classes_dedup() {
        let mut elem = DomElement::new("div");
        elem.add_class("foo");
        elem.add_class("bar");
        elem.add_class("foo");
        assert_eq!(elem.classes.len(), 2);
        elem.remove_class("foo");
        assert!(!elem.has_class("foo"));
        assert!(elem.has_class("bar"));
    }

    // ===== DomEvent tests =====

    #[test]
    fn test_dom_event_constructors() {
        assert!(matches!(DomEvent::click("btn"), DomEvent::Click { element_id } if element_id == "btn"));
        assert!(matches!(
            DomEvent::key_press("Enter"),
            DomEvent::KeyPress { key, target: None } if key == "Enter"
        ));
        assert!(matches!(
            DomEvent::key_press_on("history-item-0", " "),
            DomEvent::KeyPress { key, target: Some(t) } if key == " " && t == "history-item-0"
        ));
    }

    // ===== MockDom tests =====

    #[test]
    fn test_mock_dom_calculator_structure() {
        let dom = MockDom::calculator();
        for id in [
            ids::ROOT,
            ids::CALCULATOR,
            ids::EXPRESSION,
            ids::RESULT,
            ids::THEME_BUTTON,
            ids::REPLAY_BUTTON,
            ids::HISTORY_BUTTON,
            ids::HISTORY_PANEL,
            ids::HISTORY_LIST,
            ids::CLEAR_HISTORY,
        ] {
            assert!(dom.get_element(id).is_some(), "missing {id}");
        }
        assert_eq!(dom.get_attribute(ids::HISTORY_PANEL, "aria-hidden"), Some("true"));
    }

    #[test]
    fn test_mock_dom_register_element_no_id() {
        let mut dom = MockDom::new();
        dom.register_element(DomElement::new("span"));
        assert!(dom.elements.is_empty());
    }

    #[test]
    fn test_mock_dom_event_history() {
        let mut dom = MockDom::calculator();
        dom.dispatch_event(DomEvent::click("replay"));
        dom.dispatch_event(DomEvent::key_press("1"));
        assert_eq!(dom.event_history().len(), 2);
        dom.clear_event_history();
        assert!(dom.event_history().is_empty());
    }

    #[test]
    fn test_surface_text_and_classes() {
        let mut dom = MockDom::calculator();
        dom.set_text(ids::RESULT, "42");
        assert_eq!(dom.get_element_text(ids::RESULT), Some("42"));

        dom.set_class(ids::ROOT, classes::DARK, true);
        assert!(Surface::has_class(&dom, ids::ROOT, classes::DARK));
        dom.set_class(ids::ROOT, classes::DARK, false);
        assert!(!Surface::has_class(&dom, ids::ROOT, classes::DARK));

        dom.set_attribute(ids::HISTORY_PANEL, "aria-hidden", "false");
        assert_eq!(dom.get_attribute(ids::HISTORY_PANEL, "aria-hidden"), Some("false"));
    }

    #[test]
    fn test_surface_unknown_id_ignored() {
        let mut dom = MockDom::new();
        dom.set_text("nope", "x");
        dom.add_class("nope", "x");
        dom.append_child("nope", DomElement::new("div").with_id("child"));
        assert!(dom.get_element("child").is_none());
        assert!(!Surface::has_class(&dom, "nope", "x"));
    }

    #[test]
    fn test_append_and_clear_children() {
        let mut dom = MockDom::calculator();
        dom.append_child(ids::HISTORY_LIST, DomElement::new("div").with_id("item1"));
        dom.append_child(ids::HISTORY_LIST, DomElement::new("div").with_id("item2"));
        dom.append_child(ids::HISTORY_LIST, DomElement::new("div"));
        assert_eq!(dom.children_of(ids::HISTORY_LIST).len(), 3);
        assert!(dom.get_element("item1").is_some());

        dom.clear_children(ids::HISTORY_LIST);
        assert!(dom.get_element("item1").is_none());
        assert!(dom.get_element("item2").is_none());
        assert!(dom.children_of(ids::HISTORY_LIST).is_empty());
    }

    #[test]
    fn test_history_rows_text() {
        let mut dom = MockDom::calculator();
        let row = DomElement::new("div")
            .with_id("history-item-0")
            .with_class(classes::HISTORY_ITEM)
            .with_child(DomElement::new("div").with_class(classes::HISTORY_EXPR).with_text("1 + 1"))
            .with_child(DomElement::new("div").with_class(classes::HISTORY_VALUE).with_text("2"));
        dom.append_child(ids::HISTORY_LIST, row);
        dom.append_child(
            ids::HISTORY_LIST,
            DomElement::new("div").with_class(classes::MUTED).with_text("ignored"),
        );
        assert_eq!(dom.history_rows(), vec!["1 + 1 = 2".to_string()]);
    }
}
