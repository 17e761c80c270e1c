//! Rendering surface capability
//!
//! The controller never touches a concrete DOM. It writes through this
//! trait, which [`MockDom`](crate::wasm::MockDom) implements for tests and
//! `WebSurface` implements in the browser.

use crate::wasm::DomElement;

/// Element ids the widget renders into
pub mod ids {
    /// Root element carrying the `dark` class
    pub const ROOT: &str = "body";
    /// Calculator container
    pub const CALCULATOR: &str = "calculator";
    /// Raw buffer view
    pub const EXPRESSION: &str = "history";
    /// Preview/result view
    pub const RESULT: &str = "result";
    /// Theme toggle button
    pub const THEME_BUTTON: &str = "themeBtn";
    /// Replay (undo) button
    pub const REPLAY_BUTTON: &str = "replay";
    /// History panel toggle button
    pub const HISTORY_BUTTON: &str = "historyBtn";
    /// Slide-out history panel
    pub const HISTORY_PANEL: &str = "historyPanel";
    /// List inside the history panel
    pub const HISTORY_LIST: &str = "historyList";
    /// Clear-all button inside the history panel
    pub const CLEAR_HISTORY: &str = "clearHistory";
    /// Prefix of rendered history row ids
    pub const HISTORY_ITEM_PREFIX: &str = "history-item-";

    /// Id of the history row for insertion index `idx`
    #[must_use]
    pub fn history_item(idx: usize) -> String {
        format!("{HISTORY_ITEM_PREFIX}{idx}")
    }

    /// Parses a history row id back into its insertion index
    #[must_use]
    pub fn parse_history_item(id: &str) -> Option<usize> {
        id.strip_prefix(HISTORY_ITEM_PREFIX)?.parse().ok()
    }
}

/// CSS classes toggled by the controller
pub mod classes {
    /// Dark theme marker on the root
    pub const DARK: &str = "dark";
    /// Open state of the history panel
    pub const OPEN: &str = "open";
    /// Rendered history row
    pub const HISTORY_ITEM: &str = "history-item";
    /// Expression line of a history row
    pub const HISTORY_EXPR: &str = "history-expr";
    /// Value line of a history row
    pub const HISTORY_VALUE: &str = "history-val";
    /// Placeholder shown for an empty history
    pub const MUTED: &str = "muted";
}

/// Placeholder text of an empty history list
pub const EMPTY_HISTORY_TEXT: &str = "No calculations yet";

/// Something the widget can render into
///
/// Operations on unknown ids are silently ignored, like a missing
/// `getElementById` lookup in the page.
pub trait Surface {
    /// Replaces the text content of an element
    fn set_text(&mut self, id: &str, text: &str);

    /// Adds a class to an element
    fn add_class(&mut self, id: &str, class: &str);

    /// Removes a class from an element
    fn remove_class(&mut self, id: &str, class: &str);

    /// Returns true if the element carries the class
    fn has_class(&self, id: &str, class: &str) -> bool;

    /// Sets an attribute on an element
    fn set_attribute(&mut self, id: &str, name: &str, value: &str);

    /// Removes every child of an element
    fn clear_children(&mut self, id: &str);

    /// Appends a child subtree to an element
    fn append_child(&mut self, parent_id: &str, child: DomElement);

    /// Adds or removes a class
    fn set_class(&mut self, id: &str, class: &str, enabled: bool) {
        if enabled {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_item_id_round_trip() {
        assert_eq!(ids::history_item(7), "history-item-7");
        assert_eq!(ids::parse_history_item("history-item-7"), Some(7));
        assert_eq!(ids::parse_history_item("history-item-"), None);
        assert_eq!(ids::parse_history_item("history-item-x"), None);
        assert_eq!(ids::parse_history_item("historyList"), None);
    }
}
