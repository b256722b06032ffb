//! Platform adaptation: translating toolkit events into InputEvents
//!
//! The dispatcher itself is toolkit-neutral. This module holds the winit
//! translation used by windowed applications.

mod click;
mod winit_adapter;

pub use click::ClickTracker;
pub use winit_adapter::{key_code_from_winit, modifiers_from_winit, WinitTranslator};
