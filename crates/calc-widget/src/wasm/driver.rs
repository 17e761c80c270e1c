//! Event-level driver over the mock DOM
//!
//! Everything goes through [`DomEvent`]s and every observation is read back
//! from rendered elements, the way a browser test would see the page.

use super::dom::{DomEvent, MockDom};
use super::keypad::{Keypad, MockDomKeypadExt};
use crate::controller::Calculator;
use crate::driver::{CalculatorDriver, HistoryItem};
use crate::surface::{classes, ids};
use crate::theme::MemoryStore;

/// Calculator session mounted on a mock DOM with an in-memory store
#[derive(Debug)]
pub struct WasmDriver {
    calculator: Calculator<MockDom, MemoryStore>,
}

impl Default for WasmDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmDriver {
    /// Creates a mounted driver with empty preferences
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Creates a mounted driver with pre-filled preferences
    #[must_use]
    pub fn with_store(store: MemoryStore) -> Self {
        let mut dom = MockDom::calculator();
        dom.add_keypad(&Keypad::new());
        let mut calculator = Calculator::new(dom, store);
        calculator.mount();
        Self { calculator }
    }

    /// Returns a reference to the session
    #[must_use]
    pub fn calculator(&self) -> &Calculator<MockDom, MemoryStore> {
        &self.calculator
    }

    /// Returns a mutable reference to the session
    pub fn calculator_mut(&mut self) -> &mut Calculator<MockDom, MemoryStore> {
        &mut self.calculator
    }

    /// Returns a reference to the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        self.calculator.surface()
    }

    /// Records and routes an event
    pub fn dispatch(&mut self, event: DomEvent) -> bool {
        let handled = self.calculator.handle_event(&event);
        self.calculator.surface_mut().dispatch_event(event);
        handled
    }

    /// Simulates a click on an element
    pub fn click(&mut self, element_id: &str) -> bool {
        self.dispatch(DomEvent::click(element_id))
    }

    /// Simulates a key press with nothing focused
    pub fn press_key(&mut self, key: &str) -> bool {
        self.dispatch(DomEvent::key_press(key))
    }

    /// Simulates a key press on a focused element
    pub fn press_key_on(&mut self, element_id: &str, key: &str) -> bool {
        self.dispatch(DomEvent::key_press_on(element_id, key))
    }

    /// Clicks the keypad button carrying `token`; false if there is none
    pub fn click_button(&mut self, token: &str) -> bool {
        let Some(id) = self
            .calculator
            .keypad()
            .find_button_by_token(token)
            .map(|b| b.id.clone())
        else {
            return false;
        };
        self.click(&id)
    }

    /// Text of the raw expression element
    #[must_use]
    pub fn expression_element_text(&self) -> &str {
        self.dom().get_element_text(ids::EXPRESSION).unwrap_or_default()
    }

    /// Text of the result element
    #[must_use]
    pub fn result_element_text(&self) -> &str {
        self.dom().get_element_text(ids::RESULT).unwrap_or_default()
    }

    /// Text of the theme button
    #[must_use]
    pub fn theme_button_text(&self) -> &str {
        self.dom().get_element_text(ids::THEME_BUTTON).unwrap_or_default()
    }

    /// Returns true if the root carries the `dark` class
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.dom()
            .get_element(ids::ROOT)
            .is_some_and(|e| e.has_class(classes::DARK))
    }

    /// Returns true if the history panel carries the `open` class
    #[must_use]
    pub fn is_panel_open(&self) -> bool {
        self.dom()
            .get_element(ids::HISTORY_PANEL)
            .is_some_and(|e| e.has_class(classes::OPEN))
    }

    /// Ids of rendered history rows, top to bottom
    #[must_use]
    pub fn history_row_ids(&self) -> Vec<String> {
        self.dom()
            .children_of(ids::HISTORY_LIST)
            .iter()
            .filter(|row| row.has_class(classes::HISTORY_ITEM))
            .map(|row| row.id.clone())
            .collect()
    }
}

impl CalculatorDriver for WasmDriver {
    fn press(&mut self, token: &str) {
        self.click_button(token);
    }

    fn replay(&mut self) -> bool {
        self.click(ids::REPLAY_BUTTON)
    }

    fn select_history(&mut self, position: usize) -> bool {
        let Some(row_id) = self.history_row_ids().into_iter().nth(position) else {
            return false;
        };
        self.click(&row_id)
    }

    fn clear_history(&mut self) {
        self.click(ids::CLEAR_HISTORY);
    }

    fn buffer(&self) -> String {
        self.calculator.buffer().to_string()
    }

    fn expression_display(&self) -> String {
        self.expression_element_text().to_string()
    }

    fn result_display(&self) -> String {
        self.result_element_text().to_string()
    }

    fn history(&self) -> Vec<HistoryItem> {
        self.dom()
            .children_of(ids::HISTORY_LIST)
            .iter()
            .filter(|row| row.has_class(classes::HISTORY_ITEM))
            .map(|row| {
                let text_of = |class| {
                    row.child_with_class(class)
                        .map(|c| c.text_content.clone())
                        .unwrap_or_default()
                };
                HistoryItem {
                    expression: text_of(classes::HISTORY_EXPR),
                    result: text_of(classes::HISTORY_VALUE),
                }
            })
            .collect()
    }
}
