//! BindingTable: triggers partitioned by behaviour kind
//!
//! The dispatcher never looks up by trigger. It walks each partition in
//! registration order and tests every matcher against the current state.

use std::rc::Rc;

use super::maps::{BehaviourMap, InputTriggerMap};
use crate::behaviour::{same_handle, Behaviour, ClickBehaviour, DragBehaviour, ScrollBehaviour};
use crate::trigger::InputTrigger;

/// The five partitions of a binding table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindingKind {
    ButtonDrag,
    KeyDrag,
    ButtonClick,
    KeyClick,
    Scroll,
}

/// One (matcher, behaviour) pair
pub struct BehaviourEntry<B: ?Sized> {
    pub trigger: InputTrigger,
    pub action: String,
    pub behaviour: Rc<B>,
}

impl<B: ?Sized> BehaviourEntry<B> {
    pub fn new(trigger: InputTrigger, action: impl Into<String>, behaviour: Rc<B>) -> Self {
        Self {
            trigger,
            action: action.into(),
            behaviour,
        }
    }

    /// Same trigger bound to the same behaviour instance
    ///
    /// Entries are rebuilt whenever the maps change, so identity is the pair
    /// rather than the entry's address.
    pub fn same_binding(&self, other: &Self) -> bool {
        self.trigger == other.trigger && same_handle(&self.behaviour, &other.behaviour)
    }
}

impl<B: ?Sized> Clone for BehaviourEntry<B> {
    fn clone(&self) -> Self {
        Self {
            trigger: self.trigger.clone(),
            action: self.action.clone(),
            behaviour: Rc::clone(&self.behaviour),
        }
    }
}

impl<B: ?Sized> std::fmt::Debug for BehaviourEntry<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviourEntry")
            .field("trigger", &self.trigger.to_string())
            .field("action", &self.action)
            .finish()
    }
}

pub type DragEntry = BehaviourEntry<dyn DragBehaviour>;
pub type ClickEntry = BehaviourEntry<dyn ClickBehaviour>;
pub type ScrollEntry = BehaviourEntry<dyn ScrollBehaviour>;

/// Resolved bindings, partitioned by kind
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    button_drags: Vec<DragEntry>,
    key_drags: Vec<DragEntry>,
    button_clicks: Vec<ClickEntry>,
    key_clicks: Vec<ClickEntry>,
    scrolls: Vec<ScrollEntry>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every trigger → action → behaviour chain
    ///
    /// Actions without a registered behaviour are skipped.
    pub fn build(input_map: &InputTriggerMap, behaviour_map: &BehaviourMap) -> Self {
        let mut table = Self::new();
        for (trigger, actions) in input_map.iter() {
            for action in actions {
                match behaviour_map.get(action) {
                    Some(behaviour) => table.add(trigger.clone(), action, behaviour.clone()),
                    None => tracing::debug!("No behaviour registered for action '{}'", action),
                }
            }
        }
        tracing::debug!(
            button_drags = table.button_drags.len(),
            key_drags = table.key_drags.len(),
            button_clicks = table.button_clicks.len(),
            key_clicks = table.key_clicks.len(),
            scrolls = table.scrolls.len(),
            "Built binding table"
        );
        table
    }

    /// Append a binding to the partition its trigger and behaviour select
    ///
    /// A scroll behaviour on a non-scroll trigger (or the reverse) can never
    /// fire and is dropped.
    pub fn add(&mut self, trigger: InputTrigger, action: &str, behaviour: Behaviour) {
        let key_triggered = trigger.is_key_triggered();
        match behaviour {
            Behaviour::Drag(_) | Behaviour::Click(_) if trigger.is_scroll() => {
                tracing::debug!("Ignoring scroll trigger '{}' for {:?}", trigger, behaviour);
            }
            Behaviour::Drag(b) => {
                let entry = BehaviourEntry::new(trigger, action, b);
                if key_triggered {
                    self.key_drags.push(entry);
                } else {
                    self.button_drags.push(entry);
                }
            }
            Behaviour::Click(b) => {
                let entry = BehaviourEntry::new(trigger, action, b);
                if key_triggered {
                    self.key_clicks.push(entry);
                } else {
                    self.button_clicks.push(entry);
                }
            }
            Behaviour::Scroll(b) if trigger.is_scroll() => {
                self.scrolls.push(BehaviourEntry::new(trigger, action, b));
            }
            Behaviour::Scroll(_) => {
                tracing::debug!("Ignoring scroll behaviour '{}' on '{}'", action, trigger);
            }
        }
    }

    pub fn button_drags(&self) -> &[DragEntry] {
        &self.button_drags
    }

    pub fn key_drags(&self) -> &[DragEntry] {
        &self.key_drags
    }

    pub fn button_clicks(&self) -> &[ClickEntry] {
        &self.button_clicks
    }

    pub fn key_clicks(&self) -> &[ClickEntry] {
        &self.key_clicks
    }

    pub fn scrolls(&self) -> &[ScrollEntry] {
        &self.scrolls
    }

    /// Ordered (trigger, action) view of one partition
    pub fn lookup(&self, kind: BindingKind) -> Vec<(&InputTrigger, &str)> {
        fn view<B: ?Sized>(entries: &[BehaviourEntry<B>]) -> Vec<(&InputTrigger, &str)> {
            entries
                .iter()
                .map(|e| (&e.trigger, e.action.as_str()))
                .collect()
        }
        match kind {
            BindingKind::ButtonDrag => view(&self.button_drags),
            BindingKind::KeyDrag => view(&self.key_drags),
            BindingKind::ButtonClick => view(&self.button_clicks),
            BindingKind::KeyClick => view(&self.key_clicks),
            BindingKind::Scroll => view(&self.scrolls),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.button_drags.is_empty()
            && self.key_drags.is_empty()
            && self.button_clicks.is_empty()
            && self.key_clicks.is_empty()
            && self.scrolls.is_empty()
    }
}
