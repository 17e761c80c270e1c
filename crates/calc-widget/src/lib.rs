//! Calculator widget
//!
//! A keypad calculator with a live result preview, replay of previous
//! inputs, a bounded calculation history and a persisted light/dark theme.
//!
//! The [`core`] module is surface-free: the input buffer state machine, a
//! small recursive-descent evaluator (four operators, unary sign, postfix
//! percent), the number formatter and the bounded undo/history stacks.
//! [`controller::Calculator`] wires them to any [`surface::Surface`]; the
//! [`wasm`] module provides a mock DOM for tests and, behind the `wasm`
//! feature, the browser bindings.
//!
//! # Example
//!
//! ```rust
//! use calc_widget::prelude::*;
//!
//! let mut calc = Calculator::new(MockDom::calculator(), MemoryStore::new());
//! calc.mount();
//!
//! for token in ["2", "+", "2", "*", "2"] {
//!     calc.press(token);
//! }
//! assert_eq!(calc.result_display(), "6");
//!
//! calc.press("=");
//! assert_eq!(calc.buffer(), "6");
//! assert_eq!(calc.history().last().unwrap().expression, "2 + 2 × 2");
//!
//! assert!(calc.replay());
//! assert_eq!(calc.buffer(), "2 + 2 × 2");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod controller;
pub mod core;
pub mod driver;
pub mod surface;
pub mod theme;

/// Web frontend - the mock DOM is always available for testing
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, WidgetConfig};
    pub use crate::controller::Calculator;
    pub use crate::core::buffer::{Command, InputBuffer, Outcome, Rejection};
    pub use crate::core::evaluator::{preview, Evaluator};
    pub use crate::core::format::{format_raw, NumberFormat};
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::undo::UndoStack;
    pub use crate::core::{CalcError, CalcResult, Operation};
    pub use crate::driver::{CalculatorDriver, HistoryItem};
    pub use crate::surface::Surface;
    pub use crate::theme::{
        JsonFileStore, MemoryStore, PreferenceStore, StoreError, StoreResult, Theme,
    };
    pub use crate::wasm::{DomElement, DomEvent, Keypad, MockDom, WasmDriver};
}
