//! Trigger → action-name and action-name → behaviour maps
//!
//! Both maps count their modifications so a dispatcher holding them can tell
//! when its binding table is stale.

use std::collections::HashMap;

use crate::behaviour::Behaviour;
use crate::trigger::InputTrigger;

/// Ordered mapping from triggers to the action names they invoke
#[derive(Debug, Clone, Default)]
pub struct InputTriggerMap {
    /// Registration order is binding-table order
    entries: Vec<(InputTrigger, Vec<String>)>,
    mod_count: u64,
}

impl InputTriggerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `trigger` to `action` (no-op if already bound)
    pub fn put(&mut self, trigger: InputTrigger, action: impl Into<String>) {
        let action = action.into();
        match self.entries.iter_mut().find(|(t, _)| *t == trigger) {
            Some((_, actions)) => {
                if actions.contains(&action) {
                    return;
                }
                actions.push(action);
            }
            None => self.entries.push((trigger, vec![action])),
        }
        self.mod_count += 1;
    }

    /// Unbind `action` from `trigger`; returns whether a binding was removed
    pub fn remove(&mut self, trigger: &InputTrigger, action: &str) -> bool {
        let Some(idx) = self.entries.iter().position(|(t, _)| t == trigger) else {
            return false;
        };
        let actions = &mut self.entries[idx].1;
        let before = actions.len();
        actions.retain(|a| a != action);
        if actions.len() == before {
            return false;
        }
        if actions.is_empty() {
            self.entries.remove(idx);
        }
        self.mod_count += 1;
        true
    }

    /// Unbind `action` from every trigger
    pub fn remove_action(&mut self, action: &str) {
        let before: usize = self.entries.iter().map(|(_, a)| a.len()).sum();
        for (_, actions) in &mut self.entries {
            actions.retain(|a| a != action);
        }
        self.entries.retain(|(_, actions)| !actions.is_empty());
        let after: usize = self.entries.iter().map(|(_, a)| a.len()).sum();
        if after != before {
            self.mod_count += 1;
        }
    }

    pub fn get(&self, trigger: &InputTrigger) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(t, _)| t == trigger)
            .map(|(_, actions)| actions.as_slice())
    }

    /// Triggers bound to `action`, in registration order
    pub fn triggers_for(&self, action: &str) -> Vec<&InputTrigger> {
        self.entries
            .iter()
            .filter(|(_, actions)| actions.iter().any(|a| a == action))
            .map(|(t, _)| t)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&InputTrigger, &[String])> {
        self.entries.iter().map(|(t, a)| (t, a.as_slice()))
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.mod_count += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn mod_count(&self) -> u64 {
        self.mod_count
    }
}

/// Mapping from action names to behaviours
#[derive(Debug, Clone, Default)]
pub struct BehaviourMap {
    behaviours: HashMap<String, Behaviour>,
    mod_count: u64,
}

impl BehaviourMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `behaviour` under `name`, replacing any previous one
    pub fn put(&mut self, name: impl Into<String>, behaviour: Behaviour) {
        self.behaviours.insert(name.into(), behaviour);
        self.mod_count += 1;
    }

    pub fn remove(&mut self, name: &str) -> Option<Behaviour> {
        let removed = self.behaviours.remove(name);
        if removed.is_some() {
            self.mod_count += 1;
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<&Behaviour> {
        self.behaviours.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.behaviours.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.behaviours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviours.is_empty()
    }

    pub fn mod_count(&self) -> u64 {
        self.mod_count
    }
}
