//! Binding system: trigger and behaviour maps, the partitioned table the
//! dispatcher walks, and YAML configuration
//!
//! # Architecture
//!
//! ```text
//! bindings.yaml → parse_bindings_yaml() → BindingConfig ┐
//!                                                       ├→ InputTriggerMap ┐
//! Behaviours::named_behaviour() ────────────────────────┴→ BehaviourMap ───┴→ BindingTable::build()
//! ```

mod behaviours;
mod config;
mod maps;
mod table;

pub use behaviours::{Behaviours, SharedBehaviourMap, SharedInputTriggerMap};
pub use config::{
    apply_to, load_bindings_file, parse_bindings_yaml, resolve_entries, BindingConfig,
    BindingEntry, BindingsFile, ConfigError,
};
pub use maps::{BehaviourMap, InputTriggerMap};
pub use table::{
    BehaviourEntry, BindingKind, BindingTable, ClickEntry, DragEntry, ScrollEntry,
};
