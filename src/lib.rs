//! Gesture Dispatch - configurable input triggers for click, drag and scroll behaviours
//!
//! This crate maps raw pointer, key and scroll events to named behaviours
//! through user-rebindable triggers such as `"ctrl button1"` or
//! `"double-click K"`, and arbitrates key presses between several windows.

pub mod arbitration;
pub mod behaviour;
pub mod bindings;
pub mod config;
pub mod dispatcher;
pub mod event;
pub mod platform;
pub mod replay;
pub mod tracing;
pub mod tracker;
pub mod trigger;

// Re-export commonly used types
pub use arbitration::{KeyPressedManager, ReceiverId};
pub use behaviour::{Behaviour, ClickBehaviour, DragBehaviour, ScrollBehaviour};
pub use bindings::{BehaviourMap, Behaviours, BindingTable, InputTriggerMap};
pub use config::DispatchConfig;
pub use dispatcher::{KeyPress, MouseAndKeyHandler};
pub use event::{InputEvent, KeyEvent, PointerEvent, ScrollEvent};
pub use trigger::{InputTrigger, KeyCode, Modifiers, MouseButton, TriggerMask};
