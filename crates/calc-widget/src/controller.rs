//! Presentation controller
//!
//! [`Calculator`] is one widget session. It owns the input buffer, the undo
//! and history stacks and the theme, and renders every change through a
//! [`Surface`]. Several sessions can live side by side; nothing is global.

use crate::config::{ConfigError, WidgetConfig};
use crate::core::buffer::{InputBuffer, Outcome};
use crate::core::format::NumberFormat;
use crate::core::history::History;
use crate::core::undo::UndoStack;
use crate::surface::{classes, ids, Surface, EMPTY_HISTORY_TEXT};
use crate::theme::{PreferenceStore, Theme};
use crate::wasm::{DomElement, DomEvent, Keypad, KeypadAction};

/// A calculator widget session
#[derive(Debug)]
pub struct Calculator<S, P> {
    surface: S,
    store: P,
    config: WidgetConfig,
    format: NumberFormat,
    keypad: Keypad,
    buffer: InputBuffer,
    undo: UndoStack,
    history: History,
    theme: Theme,
    history_open: bool,
}

impl<S: Surface, P: PreferenceStore> Calculator<S, P> {
    /// Creates a session with the default configuration
    ///
    /// Nothing is rendered until [`Calculator::mount`] runs.
    pub fn new(surface: S, store: P) -> Self {
        Self::build(surface, store, WidgetConfig::default())
    }

    /// Creates a session with a validated custom configuration
    pub fn with_config(surface: S, store: P, config: WidgetConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(surface, store, config))
    }

    fn build(surface: S, store: P, config: WidgetConfig) -> Self {
        Self {
            surface,
            store,
            format: config.number_format(),
            keypad: Keypad::new(),
            buffer: InputBuffer::new(),
            undo: UndoStack::with_capacity(config.undo_capacity),
            history: History::with_capacity(config.history_capacity),
            theme: Theme::default(),
            history_open: false,
            config,
        }
    }

    /// Startup: restore the theme, then render history and display
    pub fn mount(&mut self) {
        self.theme = Theme::load(
            &self.store,
            &self.config.theme_key,
            &self.config.legacy_theme_key,
        );
        self.apply_theme();
        self.render_history();
        self.refresh_display();
        tracing::info!(theme = %self.theme, "calculator mounted");
    }

    // ===== Button dispatch =====

    /// Applies a button token, snapshotting the buffer for replay first
    pub fn press(&mut self, token: &str) -> Outcome {
        let pushed = self.undo.push(self.buffer.as_str());
        let outcome = self.buffer.apply_token(token);

        match &outcome {
            Outcome::Rejected(reason) => {
                if pushed {
                    self.undo.pop();
                }
                tracing::debug!(token, %reason, "command rejected");
            }
            Outcome::Evaluated(entry) => {
                tracing::debug!(
                    expression = %entry.expression,
                    result = entry.result,
                    "calculation recorded"
                );
                self.history.record(entry.expression.clone(), entry.result);
                self.render_history();
            }
            Outcome::Accepted => {
                tracing::debug!(token, buffer = self.buffer.as_str(), "command accepted");
            }
        }

        self.refresh_display();
        outcome
    }

    /// Restores the most recent snapshot; false when there is none
    pub fn replay(&mut self) -> bool {
        let Some(snapshot) = self.undo.pop() else {
            return false;
        };
        self.buffer.replace(snapshot);
        self.refresh_display();
        true
    }

    // ===== History =====

    /// Loads a history entry's expression into the buffer and closes the panel
    ///
    /// `index` is the insertion index carried by the row (`data-idx`).
    pub fn select_history(&mut self, index: usize) -> bool {
        let Some(expression) = self.history.get(index).map(|e| e.expression.clone()) else {
            tracing::debug!(index, "no history entry at index");
            return false;
        };
        self.undo.push(self.buffer.as_str());
        self.buffer.replace(expression);
        self.refresh_display();
        self.close_history_panel();
        true
    }

    /// Empties the history
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.render_history();
    }

    /// Replaces the history with a JSON export, bounded by the configured capacity
    ///
    /// On a parse error the current history is left as it was.
    pub fn restore_history(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        self.history = History::from_json(json, self.config.history_capacity)?;
        tracing::debug!(entries = self.history.len(), "history restored");
        self.render_history();
        Ok(self.history.len())
    }

    /// Opens or closes the history panel
    pub fn toggle_history_panel(&mut self) {
        if self.history_open {
            self.close_history_panel();
        } else {
            self.open_history_panel();
        }
    }

    /// Opens the history panel
    pub fn open_history_panel(&mut self) {
        self.history_open = true;
        self.surface.add_class(ids::HISTORY_PANEL, classes::OPEN);
        self.surface
            .set_attribute(ids::HISTORY_PANEL, "aria-hidden", "false");
    }

    /// Closes the history panel
    pub fn close_history_panel(&mut self) {
        self.history_open = false;
        self.surface.remove_class(ids::HISTORY_PANEL, classes::OPEN);
        self.surface
            .set_attribute(ids::HISTORY_PANEL, "aria-hidden", "true");
    }

    /// Closes the open panel when a click lands outside it
    ///
    /// Returns true if the panel was closed.
    pub fn outside_click(&mut self, target_id: &str) -> bool {
        if !self.history_open || is_inside_history_panel(target_id) {
            return false;
        }
        self.close_history_panel();
        true
    }

    // ===== Theme =====

    /// Flips the theme and persists it
    ///
    /// A storage failure is logged; the theme still changes for this session.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.apply_theme();
        if let Err(err) = self.store.set(&self.config.theme_key, self.theme.as_str()) {
            tracing::warn!(%err, "failed to persist theme");
        }
        tracing::info!(theme = %self.theme, "theme toggled");
        self.theme
    }

    fn apply_theme(&mut self) {
        self.surface
            .set_class(ids::ROOT, classes::DARK, self.theme.is_dark());
        self.surface.set_text(ids::THEME_BUTTON, self.theme.glyph());
    }

    // ===== Events =====

    /// Routes a surface event; returns true if it did anything
    pub fn handle_event(&mut self, event: &DomEvent) -> bool {
        match event {
            DomEvent::Click { element_id } => self.handle_click(element_id),
            DomEvent::KeyPress { key, target } => self.handle_key(key, target.as_deref()),
        }
    }

    fn handle_click(&mut self, element_id: &str) -> bool {
        let handled = if let Some(command) = self.keypad.handle_click(element_id) {
            self.press(command.token());
            true
        } else if let Some(index) = ids::parse_history_item(element_id) {
            self.select_history(index)
        } else {
            match element_id {
                ids::REPLAY_BUTTON => self.replay(),
                ids::HISTORY_BUTTON => {
                    self.toggle_history_panel();
                    true
                }
                ids::CLEAR_HISTORY => {
                    self.clear_history();
                    true
                }
                ids::THEME_BUTTON => {
                    self.toggle_theme();
                    true
                }
                _ => false,
            }
        };

        // Every click also reaches the document-level dismissal check
        let dismissed = self.outside_click(element_id);
        handled || dismissed
    }

    fn handle_key(&mut self, key: &str, target: Option<&str>) -> bool {
        if let Some(index) = target.and_then(ids::parse_history_item) {
            if matches!(key, "Enter" | " ") {
                return self.select_history(index);
            }
        }

        match Keypad::key_to_action(key) {
            Some(KeypadAction::Command(command)) => {
                self.press(command.token());
                true
            }
            Some(KeypadAction::Replay) => self.replay(),
            None => false,
        }
    }

    // ===== Rendering =====

    /// Text of the result view
    ///
    /// The formatted preview, else the last raw token, else `0`.
    #[must_use]
    pub fn result_display(&self) -> String {
        if let Some(value) = self.buffer.preview() {
            return self.format.format(value);
        }
        match self.buffer.last_token() {
            "" => "0".to_string(),
            token => token.to_string(),
        }
    }

    fn refresh_display(&mut self) {
        let result = self.result_display();
        self.surface
            .set_text(ids::EXPRESSION, self.buffer.display_text());
        self.surface.set_text(ids::RESULT, &result);
    }

    fn render_history(&mut self) {
        self.surface.clear_children(ids::HISTORY_LIST);

        if self.history.is_empty() {
            let placeholder = DomElement::new("div")
                .with_class(classes::MUTED)
                .with_text(EMPTY_HISTORY_TEXT);
            self.surface.append_child(ids::HISTORY_LIST, placeholder);
            return;
        }

        let rows: Vec<DomElement> = self
            .history
            .iter_display()
            .map(|(idx, entry)| {
                DomElement::new("div")
                    .with_id(&ids::history_item(idx))
                    .with_class(classes::HISTORY_ITEM)
                    .with_attr("tabindex", "0")
                    .with_attr("role", "listitem")
                    .with_attr("data-idx", &idx.to_string())
                    .with_child(
                        DomElement::new("div")
                            .with_class(classes::HISTORY_EXPR)
                            .with_text(&entry.expression),
                    )
                    .with_child(
                        DomElement::new("div")
                            .with_class(classes::HISTORY_VALUE)
                            .with_text(&self.format.format(entry.result)),
                    )
            })
            .collect();

        for row in rows {
            self.surface.append_child(ids::HISTORY_LIST, row);
        }
    }

    // ===== Accessors =====

    /// Raw buffer text
    #[must_use]
    pub fn buffer(&self) -> &str {
        self.buffer.as_str()
    }

    /// Text of the raw expression view
    #[must_use]
    pub fn expression_display(&self) -> &str {
        self.buffer.display_text()
    }

    /// Calculation history
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Replay snapshots
    #[must_use]
    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }

    /// Current theme
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Returns true if the history panel is open
    #[must_use]
    pub fn is_history_open(&self) -> bool {
        self.history_open
    }

    /// Keypad layout
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Formatter behind the result view and history values
    #[must_use]
    pub fn number_format(&self) -> &NumberFormat {
        &self.format
    }

    /// Rendering surface
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable rendering surface
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Preference store
    #[must_use]
    pub fn store(&self) -> &P {
        &self.store
    }
}

fn is_inside_history_panel(target_id: &str) -> bool {
    matches!(
        target_id,
        ids::HISTORY_PANEL | ids::HISTORY_LIST | ids::CLEAR_HISTORY | ids::HISTORY_BUTTON
    ) || target_id.starts_with(ids::HISTORY_ITEM_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::buffer::Rejection;
    use crate::theme::{MemoryStore, StoreError, StoreResult};
    use crate::wasm::{MockDom, MockDomKeypadExt};

    type TestCalculator = Calculator<MockDom, MemoryStore>;

    fn mounted() -> TestCalculator {
        mounted_with(MemoryStore::new())
    }

    fn mounted_with(store: MemoryStore) -> TestCalculator {
        let mut dom = MockDom::calculator();
        dom.add_keypad(&Keypad::new());
        let mut calc = Calculator::new(dom, store);
        calc.mount();
        calc
    }

    fn press_all(calc: &mut TestCalculator, tokens: &[&str]) {
        for token in tokens {
            calc.press(token);
        }
    }

    fn text(calc: &TestCalculator, id: &str) -> String {
        calc.surface()
            .get_element_text(id)
            .unwrap_or_default()
            .to_string()
    }

    #[derive(Debug, Default)]
    struct ReadOnlyStore;

    impl PreferenceStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Unavailable("read-only".into()))
        }
    }

    // ===== Mount tests =====

    #[test]
    fn test_mount_renders_empty_state() {
        let calc = mounted();
        assert_eq!(text(&calc, ids::EXPRESSION), "0");
        assert_eq!(text(&calc, ids::RESULT), "0");
        assert_eq!(text(&calc, ids::THEME_BUTTON), "☾");
        assert!(!calc.surface().has_class(ids::ROOT, classes::DARK));

        let list = calc.surface().children_of(ids::HISTORY_LIST);
        assert_eq!(list.len(), 1);
        assert!(list[0].has_class(classes::MUTED));
        assert_eq!(list[0].text_content, "No calculations yet");
    }

    #[test]
    fn test_mount_restores_dark_theme() {
        let calc = mounted_with(MemoryStore::with_value("theme", "dark"));
        assert_eq!(calc.theme(), Theme::Dark);
        assert!(calc.surface().has_class(ids::ROOT, classes::DARK));
        assert_eq!(text(&calc, ids::THEME_BUTTON), "☀");
    }

    #[test]
    fn test_mount_reads_legacy_theme_key() {
        let calc = mounted_with(MemoryStore::with_value("calc-theme", "dark"));
        assert_eq!(calc.theme(), Theme::Dark);
    }

    #[test]
    fn test_with_config_validates() {
        let config = WidgetConfig::new().with_undo_capacity(0);
        assert!(Calculator::with_config(MockDom::calculator(), MemoryStore::new(), config).is_err());
    }

    // ===== Display tests =====

    #[test]
    fn test_display_tracks_buffer_and_preview() {
        let mut calc = mounted();
        press_all(&mut calc, &["1", "2", "3", "4", "+"]);
        assert_eq!(text(&calc, ids::EXPRESSION), "1234 + ");
        assert_eq!(text(&calc, ids::RESULT), "1,234");

        press_all(&mut calc, &["0", "."]);
        assert_eq!(text(&calc, ids::RESULT), "1,234");
    }

    #[test]
    fn test_result_falls_back_to_last_token() {
        let mut calc = mounted();
        press_all(&mut calc, &["3", "/", "0"]);
        assert_eq!(calc.result_display(), "0");
        assert_eq!(text(&calc, ids::RESULT), "0");

        press_all(&mut calc, &["AC", "5", "0", "%", "%"]);
        assert_eq!(calc.buffer(), "50%%");
        assert_eq!(text(&calc, ids::RESULT), "50%%");
    }

    #[test]
    fn test_display_refreshes_after_rejection() {
        let mut calc = mounted();
        let outcome = calc.press("+");
        assert_eq!(outcome, Outcome::Rejected(Rejection::MissingLeftOperand));
        assert_eq!(text(&calc, ids::EXPRESSION), "0");
        assert_eq!(text(&calc, ids::RESULT), "0");
    }

    // ===== Press / undo tests =====

    #[test]
    fn test_press_pushes_snapshot() {
        let mut calc = mounted();
        press_all(&mut calc, &["1", "2"]);
        assert_eq!(calc.undo_stack().len(), 2);
        assert_eq!(calc.undo_stack().peek(), Some("1"));
    }

    #[test]
    fn test_rejection_discards_speculative_snapshot() {
        let mut calc = mounted();
        press_all(&mut calc, &["1", "."]);
        let before = calc.undo_stack().len();
        assert!(calc.press(".").is_rejected());
        assert_eq!(calc.undo_stack().len(), before);
        assert_eq!(calc.buffer(), "1.");
    }

    #[test]
    fn test_rejection_keeps_deduplicated_snapshot() {
        let mut calc = mounted();
        calc.press("5");
        calc.replay();
        calc.press("AC");
        // "" is already on top, so the rejected press must leave it there
        assert_eq!(calc.undo_stack().peek(), Some(""));
        let before = calc.undo_stack().len();
        assert!(calc.press("+").is_rejected());
        assert_eq!(calc.undo_stack().len(), before);
        assert_eq!(calc.undo_stack().peek(), Some(""));
    }

    #[test]
    fn test_replay_restores_previous_buffer() {
        let mut calc = mounted();
        press_all(&mut calc, &["4", "+"]);
        assert!(calc.replay());
        assert_eq!(calc.buffer(), "4");
        assert_eq!(text(&calc, ids::EXPRESSION), "4");
        assert!(calc.replay());
        assert_eq!(calc.buffer(), "");
        assert!(!calc.replay());
        assert_eq!(calc.buffer(), "");
    }

    #[test]
    fn test_undo_capacity_from_config() {
        let config = WidgetConfig::new().with_undo_capacity(3);
        let mut calc =
            Calculator::with_config(MockDom::calculator(), MemoryStore::new(), config).unwrap();
        calc.mount();
        press_all(&mut calc, &["1", "2", "3", "4", "5"]);
        assert_eq!(calc.undo_stack().len(), 3);
    }

    // ===== Equals / history tests =====

    #[test]
    fn test_equals_records_history_row() {
        let mut calc = mounted();
        press_all(&mut calc, &["2", "+", "2", "*", "2", "="]);
        assert_eq!(calc.buffer(), "6");
        assert_eq!(calc.history().len(), 1);
        assert_eq!(calc.history().last().unwrap().expression, "2 + 2 × 2");
        assert_eq!(calc.surface().history_rows(), vec!["2 + 2 × 2 = 6"]);

        let row = calc.surface().get_element("history-item-0").unwrap();
        assert_eq!(row.get_attr("data-idx"), Some("0"));
        assert_eq!(row.get_attr("tabindex"), Some("0"));
    }

    #[test]
    fn test_history_rows_newest_first() {
        let mut calc = mounted();
        press_all(&mut calc, &["1", "+", "1", "=", "AC", "5", "*", "5", "="]);
        assert_eq!(
            calc.surface().history_rows(),
            vec!["5 × 5 = 25", "1 + 1 = 2"]
        );
    }

    #[test]
    fn test_history_value_uses_locale_grouping() {
        let mut calc = mounted();
        press_all(&mut calc, &["9", "9", "9", "9", "+", "1", "="]);
        assert_eq!(calc.surface().history_rows(), vec!["9999 + 1 = 10,000"]);
        assert_eq!(calc.buffer(), "10000");
    }

    #[test]
    fn test_history_value_without_float_noise() {
        let mut calc = mounted();
        press_all(&mut calc, &["4", "4", "8", "1", "6", "0", "1", "6", "0", ".", "2", "3", "="]);
        assert_eq!(
            calc.surface().history_rows(),
            vec!["448160160.23 = 448,160,160.23"]
        );
    }

    #[test]
    fn test_restore_history_renders_rows() {
        let mut calc = mounted();
        let restored = calc
            .restore_history(r#"[{"expression":"2 × 3","result":6.0},{"expression":"1500 + 1","result":1501.0}]"#)
            .unwrap();
        assert_eq!(restored, 2);
        assert_eq!(
            calc.surface().history_rows(),
            vec!["1500 + 1 = 1,501", "2 × 3 = 6"]
        );
        assert!(calc.select_history(0));
        assert_eq!(calc.buffer(), "2 × 3");
    }

    #[test]
    fn test_restore_history_rejects_bad_json() {
        let mut calc = mounted();
        press_all(&mut calc, &["1", "+", "1", "="]);
        assert!(calc.restore_history("[{").is_err());
        assert_eq!(calc.history().len(), 1);
    }

    #[test]
    fn test_rejected_equals_records_nothing() {
        let mut calc = mounted();
        press_all(&mut calc, &["3", "/", "0"]);
        assert!(calc.press("=").is_rejected());
        assert!(calc.history().is_empty());
        assert_eq!(calc.buffer(), "3 ÷ 0");
    }

    #[test]
    fn test_select_history_restores_expression() {
        let mut calc = mounted();
        press_all(&mut calc, &["7", "-", "2", "="]);
        calc.open_history_panel();

        assert!(calc.select_history(0));
        assert_eq!(calc.buffer(), "7 − 2");
        assert!(!calc.is_history_open());
        assert!(calc.replay());
        assert_eq!(calc.buffer(), "5");
    }

    #[test]
    fn test_select_history_out_of_range() {
        let mut calc = mounted();
        assert!(!calc.select_history(0));
    }

    #[test]
    fn test_clear_history_renders_placeholder() {
        let mut calc = mounted();
        press_all(&mut calc, &["1", "+", "1", "="]);
        calc.clear_history();
        assert!(calc.history().is_empty());
        assert!(calc.surface().get_element("history-item-0").is_none());
        assert_eq!(
            calc.surface().children_of(ids::HISTORY_LIST)[0].text_content,
            EMPTY_HISTORY_TEXT
        );
    }

    // ===== Panel tests =====

    #[test]
    fn test_panel_toggle_sets_class_and_aria() {
        let mut calc = mounted();
        calc.toggle_history_panel();
        assert!(calc.is_history_open());
        assert!(calc.surface().has_class(ids::HISTORY_PANEL, classes::OPEN));
        assert_eq!(
            calc.surface().get_attribute(ids::HISTORY_PANEL, "aria-hidden"),
            Some("false")
        );

        calc.toggle_history_panel();
        assert!(!calc.is_history_open());
        assert!(!calc.surface().has_class(ids::HISTORY_PANEL, classes::OPEN));
        assert_eq!(
            calc.surface().get_attribute(ids::HISTORY_PANEL, "aria-hidden"),
            Some("true")
        );
    }

    #[test]
    fn test_outside_click_closes_panel() {
        let mut calc = mounted();
        calc.open_history_panel();
        assert!(!calc.outside_click(ids::HISTORY_LIST));
        assert!(!calc.outside_click(ids::HISTORY_BUTTON));
        assert!(!calc.outside_click("history-item-3"));
        assert!(calc.is_history_open());

        assert!(calc.outside_click(ids::RESULT));
        assert!(!calc.is_history_open());
        assert!(!calc.outside_click(ids::RESULT));
    }

    // ===== Theme tests =====

    #[test]
    fn test_toggle_theme_persists() {
        let mut calc = mounted();
        assert_eq!(calc.toggle_theme(), Theme::Dark);
        assert_eq!(calc.store().value("theme"), Some("dark"));
        assert!(calc.surface().has_class(ids::ROOT, classes::DARK));
        assert_eq!(text(&calc, ids::THEME_BUTTON), "☀");

        assert_eq!(calc.toggle_theme(), Theme::Light);
        assert_eq!(calc.store().value("theme"), Some("light"));
        assert!(!calc.surface().has_class(ids::ROOT, classes::DARK));
    }

    #[test]
    fn test_toggle_theme_survives_store_failure() {
        let mut calc = Calculator::new(MockDom::calculator(), ReadOnlyStore);
        calc.mount();
        assert_eq!(calc.toggle_theme(), Theme::Dark);
        assert!(calc.surface().has_class(ids::ROOT, classes::DARK));
    }

    // ===== Event routing tests =====

    #[test]
    fn test_click_keypad_buttons() {
        let mut calc = mounted();
        for id in ["btn-9", "btn-times", "btn-2", "btn-equals"] {
            assert!(calc.handle_event(&DomEvent::click(id)));
        }
        assert_eq!(calc.buffer(), "18");
    }

    #[test]
    fn test_click_controls() {
        let mut calc = mounted();
        calc.handle_event(&DomEvent::click("btn-5"));
        assert!(calc.handle_event(&DomEvent::click(ids::REPLAY_BUTTON)));
        assert_eq!(calc.buffer(), "");

        assert!(calc.handle_event(&DomEvent::click(ids::THEME_BUTTON)));
        assert_eq!(calc.theme(), Theme::Dark);

        assert!(calc.handle_event(&DomEvent::click(ids::HISTORY_BUTTON)));
        assert!(calc.is_history_open());
        assert!(calc.handle_event(&DomEvent::click(ids::CLEAR_HISTORY)));
        assert!(calc.is_history_open());

        // A keypad click lands outside the panel
        calc.handle_event(&DomEvent::click("btn-1"));
        assert!(!calc.is_history_open());
    }

    #[test]
    fn test_click_unknown_element() {
        let mut calc = mounted();
        assert!(!calc.handle_event(&DomEvent::click("nowhere")));
    }

    #[test]
    fn test_click_history_row() {
        let mut calc = mounted();
        press_all(&mut calc, &["8", "/", "4", "=", "AC"]);
        calc.handle_event(&DomEvent::click(ids::HISTORY_BUTTON));
        assert!(calc.handle_event(&DomEvent::click("history-item-0")));
        assert_eq!(calc.buffer(), "8 ÷ 4");
        assert!(!calc.is_history_open());
    }

    #[test]
    fn test_keyboard_on_history_row() {
        let mut calc = mounted();
        press_all(&mut calc, &["6", "+", "1", "=", "AC"]);
        assert!(calc.handle_event(&DomEvent::key_press_on("history-item-0", "Enter")));
        assert_eq!(calc.buffer(), "6 + 1");

        calc.press("AC");
        assert!(calc.handle_event(&DomEvent::key_press_on("history-item-0", " ")));
        assert_eq!(calc.buffer(), "6 + 1");
    }

    #[test]
    fn test_keyboard_keypad_mapping() {
        let mut calc = mounted();
        for key in ["4", "*", "3", "Enter"] {
            assert!(calc.handle_event(&DomEvent::key_press(key)));
        }
        assert_eq!(calc.buffer(), "12");

        assert!(calc.handle_event(&DomEvent::key_press("Escape")));
        assert_eq!(calc.buffer(), "");
        assert!(calc.handle_event(&DomEvent::key_press("Backspace")));
        assert_eq!(calc.buffer(), "12");
        assert!(!calc.handle_event(&DomEvent::key_press("Tab")));
    }
}
