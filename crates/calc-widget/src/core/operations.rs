//! The four binary operators the keypad offers

use crate::core::{CalcError, CalcResult};

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (−)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operation {
    /// All operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Glyph written into the input buffer
    #[must_use]
    pub const fn glyph(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '−',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Command token carried by the keypad button (`data-value`)
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// Parses a keypad command token
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            _ => None,
        }
    }

    /// Maps either a display glyph or its ASCII form to an operator
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '*' | '×' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Precedence level (higher binds tighter)
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide => 2,
        }
    }

    /// Applies the operator, rejecting non-finite results
    pub fn apply(&self, a: f64, b: f64) -> CalcResult<f64> {
        let result = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                a / b
            }
        };
        check_finite(result)
    }
}

/// Checks for overflow (infinity) or NaN
pub(crate) fn check_finite(result: f64) -> CalcResult<f64> {
    if result.is_nan() {
        Err(CalcError::InvalidResult("NaN".into()))
    } else if result.is_infinite() {
        Err(CalcError::Overflow)
    } else {
        Ok(result)
    }
}
