//! Trigger model: masks, key identities and matchers
//!
//! # Architecture
//!
//! ```text
//! raw event flags → compute_mask() → TriggerMask ┐
//!                     pressed keys → KeySet      ┴→ InputTrigger::matches()
//! ```
//!
//! A trigger descriptor such as `"ctrl shift button1"` parses into an
//! [`InputTrigger`]; the dispatcher compares it against the mask and pressed
//! keys of each event.

mod input_trigger;
mod mask;
mod parse;
mod types;

pub use input_trigger::{InputTrigger, KeySet};
pub use mask::{compute_mask, EventKind, TriggerMask};
pub use parse::{parse_key_name, parse_trigger, parse_triggers, TriggerError};
pub use types::{Buttons, KeyCode, Modifiers, MouseButton};
