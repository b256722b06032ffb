//! Registry that installs named behaviours with their default triggers
//!
//! Triggers found in a loaded bindings file replace the defaults given at
//! registration, so users can rebind actions without code changes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::config::BindingConfig;
use super::maps::{BehaviourMap, InputTriggerMap};
use crate::behaviour::Behaviour;
use crate::dispatcher::MouseAndKeyHandler;
use crate::trigger::{parse_triggers, InputTrigger, TriggerError};

pub type SharedInputTriggerMap = Rc<RefCell<InputTriggerMap>>;
pub type SharedBehaviourMap = Rc<RefCell<BehaviourMap>>;

pub struct Behaviours {
    input_map: SharedInputTriggerMap,
    behaviour_map: SharedBehaviourMap,
    overrides: HashMap<String, Vec<InputTrigger>>,
}

impl Behaviours {
    /// Registry over fresh maps with no overrides
    pub fn new() -> Self {
        Self::with_maps(
            Rc::new(RefCell::new(InputTriggerMap::new())),
            Rc::new(RefCell::new(BehaviourMap::new())),
        )
    }

    /// Registry writing into existing shared maps
    pub fn with_maps(input_map: SharedInputTriggerMap, behaviour_map: SharedBehaviourMap) -> Self {
        Self {
            input_map,
            behaviour_map,
            overrides: HashMap::new(),
        }
    }

    /// Use triggers from loaded bindings instead of registration defaults
    ///
    /// An entry with an empty trigger list leaves its action unbound.
    pub fn with_config(mut self, bindings: &[BindingConfig]) -> Self {
        for binding in bindings {
            self.overrides
                .entry(binding.action.clone())
                .or_default()
                .extend(binding.triggers.iter().cloned());
        }
        self
    }

    /// Register `behaviour` under `name`, bound to `defaults` unless overridden
    ///
    /// Each default descriptor may hold `|`-separated alternatives.
    pub fn named_behaviour(
        &mut self,
        name: &str,
        behaviour: Behaviour,
        defaults: &[&str],
    ) -> Result<&mut Self, TriggerError> {
        let triggers = match self.overrides.get(name) {
            Some(triggers) => {
                tracing::debug!("Using configured triggers for '{}'", name);
                triggers.clone()
            }
            None => {
                let mut triggers = Vec::new();
                for descriptor in defaults {
                    triggers.extend(parse_triggers(descriptor)?);
                }
                triggers
            }
        };

        {
            let mut input_map = self.input_map.borrow_mut();
            input_map.remove_action(name);
            for trigger in triggers {
                input_map.put(trigger, name);
            }
        }
        self.behaviour_map.borrow_mut().put(name, behaviour);
        Ok(self)
    }

    /// Point a dispatcher at this registry's maps
    pub fn install(&self, handler: &mut MouseAndKeyHandler) {
        handler.set_input_map(Rc::clone(&self.input_map));
        handler.set_behaviour_map(Rc::clone(&self.behaviour_map));
    }

    pub fn input_map(&self) -> &SharedInputTriggerMap {
        &self.input_map
    }

    pub fn behaviour_map(&self) -> &SharedBehaviourMap {
        &self.behaviour_map
    }
}

impl Default for Behaviours {
    fn default() -> Self {
        Self::new()
    }
}
