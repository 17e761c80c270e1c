//! Unified calculator driver
//!
//! Scenario checks are written once against [`CalculatorDriver`] and run
//! against both the direct session API and the event-level mock DOM driver.

use crate::controller::Calculator;
use crate::surface::Surface;
use crate::theme::PreferenceStore;

/// Abstract driver for calculator interactions
///
/// # Example
///
/// ```rust
/// use calc_widget::driver::{verify_equals_and_history, CalculatorDriver};
/// use calc_widget::wasm::WasmDriver;
///
/// let mut driver = WasmDriver::new();
/// verify_equals_and_history(&mut driver);
/// assert_eq!(driver.buffer(), "");
/// ```
pub trait CalculatorDriver {
    /// Presses the button carrying this `data-value` token
    fn press(&mut self, token: &str);

    /// Presses several buttons in order
    fn press_sequence(&mut self, tokens: &[&str]) {
        for token in tokens {
            self.press(token);
        }
    }

    /// Activates the replay control
    fn replay(&mut self) -> bool;

    /// Activates the history row at `position` (0 = newest)
    fn select_history(&mut self, position: usize) -> bool;

    /// Empties the history
    fn clear_history(&mut self);

    /// Raw buffer text
    fn buffer(&self) -> String;

    /// Raw expression view text
    fn expression_display(&self) -> String;

    /// Result view text
    fn result_display(&self) -> String;

    /// History rows, newest first
    fn history(&self) -> Vec<HistoryItem>;

    /// Presses `AC`
    fn clear(&mut self) {
        self.press("AC");
    }
}

/// A simplified history item for driver results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// The expression that was evaluated
    pub expression: String,
    /// The formatted result
    pub result: String,
}

impl<S: Surface, P: PreferenceStore> CalculatorDriver for Calculator<S, P> {
    fn press(&mut self, token: &str) {
        Calculator::press(self, token);
    }

    fn replay(&mut self) -> bool {
        Calculator::replay(self)
    }

    fn select_history(&mut self, position: usize) -> bool {
        let len = self.history().len();
        if position >= len {
            return false;
        }
        Calculator::select_history(self, len - 1 - position)
    }

    fn clear_history(&mut self) {
        Calculator::clear_history(self);
    }

    fn buffer(&self) -> String {
        Calculator::buffer(self).to_string()
    }

    fn expression_display(&self) -> String {
        Calculator::expression_display(self).to_string()
    }

    fn result_display(&self) -> String {
        Calculator::result_display(self)
    }

    fn history(&self) -> Vec<HistoryItem> {
        let format = self.number_format();
        Calculator::history(self)
            .iter_display()
            .map(|(_, entry)| HistoryItem {
                expression: entry.expression.clone(),
                result: format.format(entry.result),
            })
            .collect()
    }
}

// ===== Shared Scenarios =====
// These work with ANY CalculatorDriver implementation

/// Verifies digit concatenation and the single-decimal guard
pub fn verify_digit_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_sequence(&["1", "2", "0", "9"]);
    assert_eq!(driver.buffer(), "1209");
    assert_eq!(driver.result_display(), "1,209");

    driver.clear();
    driver.press_sequence(&["3", ".", "1", ".", "4"]);
    assert_eq!(driver.buffer(), "3.14");
    driver.clear();
    assert_eq!(driver.buffer(), "");
    assert_eq!(driver.expression_display(), "0");
}

/// Verifies operator guards and substitution
pub fn verify_operator_rules<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press("+");
    assert_eq!(driver.buffer(), "");

    driver.press_sequence(&["3", "+", "*"]);
    assert_eq!(driver.buffer(), "3 × ");
    driver.press_sequence(&["-"]);
    assert_eq!(driver.buffer(), "3 − ");
    driver.clear();
}

/// Verifies sign flip and percent
pub fn verify_sign_and_percent<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_sequence(&["8", "+", "5", "+/-"]);
    assert_eq!(driver.buffer(), "8 + -5");
    assert_eq!(driver.result_display(), "3");

    driver.clear();
    driver.press_sequence(&["5", "0", "%"]);
    assert_eq!(driver.result_display(), "0.5");
    driver.clear();
}

/// Verifies `=` evaluation, recording and rejection
pub fn verify_equals_and_history<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    let before = driver.history().len();

    driver.press_sequence(&["2", "+", "2", "*", "2", "="]);
    assert_eq!(driver.buffer(), "6");
    let history = driver.history();
    assert_eq!(history.len(), before + 1);
    assert_eq!(
        history[0],
        HistoryItem {
            expression: "2 + 2 × 2".to_string(),
            result: "6".to_string(),
        }
    );

    driver.clear();
    driver.press_sequence(&["3", "/", "0", "="]);
    assert_eq!(driver.buffer(), "3 ÷ 0");
    assert_eq!(driver.history().len(), before + 1);
    driver.clear();
}

/// Verifies single-step replay
pub fn verify_replay<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_sequence(&["4", "2"]);
    assert!(driver.replay());
    assert_eq!(driver.buffer(), "4");
    assert!(driver.replay());
    assert_eq!(driver.buffer(), "");
    driver.clear();
}

/// Verifies history selection and clearing
pub fn verify_history_selection<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_sequence(&["7", "-", "2", "=", "AC", "9", "/", "3", "=", "AC"]);

    assert!(driver.select_history(1));
    assert_eq!(driver.buffer(), "7 − 2");
    assert!(driver.select_history(0));
    assert_eq!(driver.buffer(), "9 ÷ 3");

    driver.clear_history();
    assert!(driver.history().is_empty());
    assert!(!driver.select_history(0));
    driver.clear();
}

/// Complete verification suite - runs every scenario
pub fn run_all_scenarios<D: CalculatorDriver>(driver: &mut D) {
    verify_digit_entry(driver);
    verify_operator_rules(driver);
    verify_sign_and_percent(driver);
    verify_equals_and_history(driver);
    verify_replay(driver);
    verify_history_selection(driver);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::MemoryStore;
    use crate::wasm::MockDom;

    fn session() -> Calculator<MockDom, MemoryStore> {
        let mut calc = Calculator::new(MockDom::calculator(), MemoryStore::new());
        calc.mount();
        calc
    }

    // ===== Session driver tests =====

    #[test]
    fn test_session_driver_history_positions() {
        let mut calc = session();
        CalculatorDriver::press_sequence(&mut calc, &["1", "+", "1", "=", "AC", "2", "+", "2", "="]);
        let items = CalculatorDriver::history(&calc);
        assert_eq!(items[0].expression, "2 + 2");
        assert_eq!(items[1].result, "2");
        assert!(!CalculatorDriver::select_history(&mut calc, 2));
    }

    #[test]
    fn test_unified_digit_entry() {
        verify_digit_entry(&mut session());
    }

    #[test]
    fn test_unified_operator_rules() {
        verify_operator_rules(&mut session());
    }

    #[test]
    fn test_unified_sign_and_percent() {
        verify_sign_and_percent(&mut session());
    }

    #[test]
    fn test_unified_equals_and_history() {
        verify_equals_and_history(&mut session());
    }

    #[test]
    fn test_unified_replay() {
        verify_replay(&mut session());
    }

    #[test]
    fn test_unified_history_selection() {
        verify_history_selection(&mut session());
    }

    #[test]
    fn test_all_scenarios() {
        run_all_scenarios(&mut session());
    }

    // ===== HistoryItem tests =====

    #[test]
    fn test_history_item_clone() {
        let item = HistoryItem {
            expression: "test".into(),
            result: "42".into(),
        };
        assert_eq!(item.clone(), item);
    }
}
