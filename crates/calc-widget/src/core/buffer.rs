//! Input buffer state machine
//!
//! The buffer is the expression exactly as the user typed it through the
//! keypad. States are implicit in its text; every command either mutates it
//! (`Accepted`/`Evaluated`) or leaves it untouched (`Rejected`).

use thiserror::Error;

use crate::core::evaluator::preview;
use crate::core::format::format_raw;
use crate::core::history::HistoryEntry;
use crate::core::Operation;

const DIGIT_TOKENS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Characters that count as a pending operator or percent at the buffer end
const OPERATOR_OR_PERCENT: [char; 6] = ['+', '-', '−', '×', '÷', '%'];

/// A keypad command, parsed from a button's `data-value` token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Append a digit (0-9)
    Digit(u8),
    /// Append a decimal point
    Decimal,
    /// Append or substitute a binary operator
    Operator(Operation),
    /// Toggle the sign of the last literal (`+/-`)
    ToggleSign,
    /// Append a percent suffix
    Percent,
    /// Evaluate and record (`=`)
    Equals,
    /// Empty the buffer (`AC`)
    Clear,
}

impl Command {
    /// Parses a command token; unknown tokens yield `None`
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "." => Some(Self::Decimal),
            "+/-" => Some(Self::ToggleSign),
            "%" => Some(Self::Percent),
            "=" => Some(Self::Equals),
            "AC" => Some(Self::Clear),
            _ => {
                if let Some(op) = Operation::from_token(token) {
                    return Some(Self::Operator(op));
                }
                DIGIT_TOKENS
                    .iter()
                    .position(|d| *d == token)
                    .map(|d| Self::Digit(d as u8))
            }
        }
    }

    /// The token this command is parsed from
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            Self::Digit(d) => DIGIT_TOKENS.get(usize::from(*d)).copied().unwrap_or("0"),
            Self::Decimal => ".",
            Self::Operator(op) => op.token(),
            Self::ToggleSign => "+/-",
            Self::Percent => "%",
            Self::Equals => "=",
            Self::Clear => "AC",
        }
    }

    /// Button label
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Operator(op) => op.glyph().to_string(),
            Self::ToggleSign => "±".to_string(),
            other => other.token().to_string(),
        }
    }
}

/// Why a command left the buffer untouched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The current literal already has a decimal point
    #[error("literal already contains a decimal point")]
    DuplicateDecimal,
    /// No literal to flip the sign of
    #[error("no literal to flip the sign of")]
    NoSignTarget,
    /// No pending literal to scale by percent
    #[error("no literal to apply percent to")]
    NoPercentTarget,
    /// Operator pressed before any operand
    #[error("operator needs a left operand")]
    MissingLeftOperand,
    /// `=` pressed on an expression with no finite value
    #[error("expression has no finite value")]
    NoValue,
    /// Token outside the keypad command set
    #[error("unrecognized command token {0:?}")]
    Unrecognized(String),
}

/// Result of applying a command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The buffer changed
    Accepted,
    /// `=` succeeded; the entry must be recorded and the buffer now holds the result
    Evaluated(HistoryEntry),
    /// Nothing changed
    Rejected(Rejection),
}

impl Outcome {
    /// Returns true if the command was rejected
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// The expression typed so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    /// Creates an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw buffer text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns true if nothing has been typed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replaces the whole buffer (replay and history selection)
    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Text for the raw expression view (`0` when empty)
    #[must_use]
    pub fn display_text(&self) -> &str {
        if self.text.is_empty() {
            "0"
        } else {
            &self.text
        }
    }

    /// Final whitespace-delimited token, or `""`
    #[must_use]
    pub fn last_token(&self) -> &str {
        self.text.split_whitespace().last().unwrap_or("")
    }

    /// Live value of the buffer
    #[must_use]
    pub fn preview(&self) -> Option<f64> {
        preview(&self.text)
    }

    /// Parses and applies a button token
    pub fn apply_token(&mut self, token: &str) -> Outcome {
        match Command::parse(token) {
            Some(command) => self.apply(command),
            None => Outcome::Rejected(Rejection::Unrecognized(token.to_string())),
        }
    }

    /// Applies a command
    pub fn apply(&mut self, command: Command) -> Outcome {
        let result = match command {
            Command::Clear => {
                self.text.clear();
                Ok(Outcome::Accepted)
            }
            Command::Digit(d) => {
                self.text.push(char::from(b'0' + d.min(9)));
                Ok(Outcome::Accepted)
            }
            Command::Decimal => self.push_decimal(),
            Command::ToggleSign => self.toggle_sign(),
            Command::Percent => self.push_percent(),
            Command::Operator(op) => self.push_operator(op),
            Command::Equals => self.equals(),
        };

        result.unwrap_or_else(Outcome::Rejected)
    }

    fn push_decimal(&mut self) -> Result<Outcome, Rejection> {
        if self.last_token().contains('.') {
            return Err(Rejection::DuplicateDecimal);
        }
        self.text.push('.');
        Ok(Outcome::Accepted)
    }

    fn toggle_sign(&mut self) -> Result<Outcome, Rejection> {
        let mut tokens: Vec<&str> = self.text.split_whitespace().collect();
        let last = tokens.pop().unwrap_or("");
        if last.is_empty() || is_operator_symbol(last) {
            return Err(Rejection::NoSignTarget);
        }

        let flipped = match last.strip_prefix('-') {
            Some(unsigned) => unsigned.to_string(),
            None => format!("-{last}"),
        };

        let mut rebuilt = tokens.join(" ");
        if !rebuilt.is_empty() {
            rebuilt.push(' ');
        }
        rebuilt.push_str(&flipped);
        self.text = rebuilt.trim().to_string();
        Ok(Outcome::Accepted)
    }

    fn push_percent(&mut self) -> Result<Outcome, Rejection> {
        if self.text.is_empty() || self.text.ends_with(char::is_whitespace) {
            return Err(Rejection::NoPercentTarget);
        }
        self.text.push('%');
        Ok(Outcome::Accepted)
    }

    fn push_operator(&mut self, op: Operation) -> Result<Outcome, Rejection> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return Err(Rejection::MissingLeftOperand);
        }

        let glyph = op.glyph();
        self.text = if trimmed.ends_with(OPERATOR_OR_PERCENT) {
            // The most recent operator choice wins
            let head = trimmed.trim_end_matches(OPERATOR_OR_PERCENT);
            format!("{head}{glyph} ")
        } else {
            format!("{trimmed} {glyph} ")
        };
        Ok(Outcome::Accepted)
    }

    fn equals(&mut self) -> Result<Outcome, Rejection> {
        let value = self.preview().ok_or(Rejection::NoValue)?;
        let entry = HistoryEntry::new(self.text.clone(), value);
        self.text = format_raw(value);
        Ok(Outcome::Evaluated(entry))
    }
}

fn is_operator_symbol(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(ch), None) if OPERATOR_OR_PERCENT.contains(&ch)
    )
}
