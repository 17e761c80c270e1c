//! Web frontend
//!
//! The mock DOM, keypad layout and event-level driver are always compiled
//! so the widget can be exercised without a browser. The `wasm` feature adds
//! the real `web-sys` bindings.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod driver;
mod keypad;

#[cfg(feature = "wasm")]
pub use browser::{BrowserCalculator, LocalStorage, WebSurface};
pub use dom::{DomElement, DomEvent, MockDom};
pub use driver::WasmDriver;
pub use keypad::{Keypad, KeypadAction, KeypadButtonDef, MockDomKeypadExt, KEYPAD_ID};
