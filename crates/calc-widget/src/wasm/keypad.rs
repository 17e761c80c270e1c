//! Keypad layout and keyboard mapping
//!
//! Every button carries its command token as `data-value`; the controller
//! dispatches clicks by looking the element id up here.

use super::dom::{DomElement, MockDom};
use crate::core::buffer::Command;
use crate::core::Operation;

/// Id of the keypad container element
pub const KEYPAD_ID: &str = "keys";

/// What a keyboard key triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadAction {
    /// Same as clicking the button with this command
    Command(Command),
    /// Same as clicking the replay button
    Replay,
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The command this button sends
    pub command: Command,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
    /// Columns covered by the button
    pub span: usize,
}

impl KeypadButtonDef {
    /// Creates a single-column button definition
    #[must_use]
    pub fn new(command: Command, row: usize, col: usize) -> Self {
        let id = match command {
            Command::Digit(d) => format!("btn-{d}"),
            Command::Decimal => "btn-decimal".to_string(),
            Command::Operator(op) => format!("btn-{}", op_name(op)),
            Command::ToggleSign => "btn-sign".to_string(),
            Command::Percent => "btn-percent".to_string(),
            Command::Equals => "btn-equals".to_string(),
            Command::Clear => "btn-clear".to_string(),
        };
        Self {
            command,
            id,
            row,
            col,
            span: 1,
        }
    }

    /// Widens the button to cover `span` columns
    #[must_use]
    pub fn with_span(mut self, span: usize) -> Self {
        self.span = span.max(1);
        self
    }

    /// The `data-value` token
    #[must_use]
    pub fn token(&self) -> &'static str {
        self.command.token()
    }

    /// Returns true if the button covers the grid cell
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && (self.col..self.col + self.span).contains(&col)
    }

    /// Creates the button element
    #[must_use]
    pub fn to_element(&self) -> DomElement {
        let mut elem = DomElement::new("button")
            .with_id(&self.id)
            .with_text(&self.command.label())
            .with_class("keypad-btn")
            .with_class(&format!("keypad-row-{}", self.row))
            .with_class(&format!("keypad-col-{}", self.col))
            .with_attr("data-value", self.token());
        if self.span > 1 {
            elem = elem.with_class(&format!("keypad-span-{}", self.span));
        }
        elem
    }
}

/// Returns a name for an operator (for element IDs)
fn op_name(op: Operation) -> &'static str {
    match op {
        Operation::Add => "plus",
        Operation::Subtract => "minus",
        Operation::Multiply => "times",
        Operation::Divide => "divide",
    }
}

/// Keypad layout definition
///
/// ```text
/// [ AC ] [ ± ] [ % ] [ ÷ ]
/// [ 7  ] [ 8 ] [ 9 ] [ × ]
/// [ 4  ] [ 5 ] [ 6 ] [ − ]
/// [ 1  ] [ 2 ] [ 3 ] [ + ]
/// [    0     ] [ . ] [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let buttons = vec![
            // Row 0: AC ± % ÷
            KeypadButtonDef::new(Command::Clear, 0, 0),
            KeypadButtonDef::new(Command::ToggleSign, 0, 1),
            KeypadButtonDef::new(Command::Percent, 0, 2),
            KeypadButtonDef::new(Command::Operator(Operation::Divide), 0, 3),
            // Row 1: 7 8 9 ×
            KeypadButtonDef::new(Command::Digit(7), 1, 0),
            KeypadButtonDef::new(Command::Digit(8), 1, 1),
            KeypadButtonDef::new(Command::Digit(9), 1, 2),
            KeypadButtonDef::new(Command::Operator(Operation::Multiply), 1, 3),
            // Row 2: 4 5 6 −
            KeypadButtonDef::new(Command::Digit(4), 2, 0),
            KeypadButtonDef::new(Command::Digit(5), 2, 1),
            KeypadButtonDef::new(Command::Digit(6), 2, 2),
            KeypadButtonDef::new(Command::Operator(Operation::Subtract), 2, 3),
            // Row 3: 1 2 3 +
            KeypadButtonDef::new(Command::Digit(1), 3, 0),
            KeypadButtonDef::new(Command::Digit(2), 3, 1),
            KeypadButtonDef::new(Command::Digit(3), 3, 2),
            KeypadButtonDef::new(Command::Operator(Operation::Add), 3, 3),
            // Row 4: 0 (wide) . =
            KeypadButtonDef::new(Command::Digit(0), 4, 0).with_span(2),
            KeypadButtonDef::new(Command::Decimal, 4, 2),
            KeypadButtonDef::new(Command::Equals, 4, 3),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets the button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.covers(row, col))
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds a button by its `data-value` token
    #[must_use]
    pub fn find_button_by_token(&self, token: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.token() == token)
    }

    /// Command sent by clicking the element, if it is a keypad button
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<Command> {
        self.find_button_by_id(element_id).map(|btn| btn.command)
    }

    /// Creates a keypad container element with all buttons
    #[must_use]
    pub fn create_keypad_element(&self) -> DomElement {
        self.buttons
            .iter()
            .map(KeypadButtonDef::to_element)
            .fold(
                DomElement::new("div").with_id(KEYPAD_ID).with_class("keys"),
                DomElement::with_child,
            )
    }

    /// Maps a keyboard key to a keypad action
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<KeypadAction> {
        let command = match key {
            "Enter" => Command::Equals,
            "Escape" | "c" | "C" => Command::Clear,
            "Backspace" => return Some(KeypadAction::Replay),
            "+/-" => return None,
            other => Command::parse(other)?,
        };
        Some(KeypadAction::Command(command))
    }
}

/// Extension trait for MockDom to add keypad
pub trait MockDomKeypadExt {
    /// Adds the keypad container and registers each button
    fn add_keypad(&mut self, keypad: &Keypad);
}

impl MockDomKeypadExt for MockDom {
    fn add_keypad(&mut self, keypad: &Keypad) {
        let container = keypad.create_keypad_element();
        for button in &container.children {
            self.register_element(button.clone());
        }
        self.register_element(container);
    }
}
