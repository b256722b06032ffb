//! InputTrigger: the matcher a binding requires before its behaviour fires

use std::collections::BTreeSet;
use std::fmt;

use super::mask::TriggerMask;
use super::types::KeyCode;

/// Codes of the non-modifier keys currently held down
pub type KeySet = BTreeSet<u32>;

/// A modifier/button/qualifier mask plus a set of keys that must be held
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct InputTrigger {
    mask: TriggerMask,
    keys: KeySet,
}

impl InputTrigger {
    pub fn new(mask: TriggerMask, keys: KeySet) -> Self {
        Self { mask, keys }
    }

    /// A trigger on a single key plus modifier/qualifier bits
    ///
    /// Modifier keys and unidentified keys contribute nothing to the key set.
    pub fn key(key: KeyCode, mask: TriggerMask) -> Self {
        let mut keys = KeySet::new();
        if !key.is_modifier() {
            if let Some(code) = key.code() {
                keys.insert(code);
            }
        }
        Self { mask, keys }
    }

    /// A trigger on mask bits only (buttons, scroll, modifiers)
    pub fn mask_only(mask: TriggerMask) -> Self {
        Self {
            mask,
            keys: KeySet::new(),
        }
    }

    pub fn mask(&self) -> TriggerMask {
        self.mask
    }

    pub fn keys(&self) -> &KeySet {
        &self.keys
    }

    /// Exact match: the current state is precisely this trigger
    ///
    /// Used to start a gesture or fire a click.
    pub fn matches(&self, mask: TriggerMask, keys: &KeySet) -> bool {
        self.mask == mask && self.keys == *keys
    }

    /// The trigger is still satisfied as a subset of the current state
    ///
    /// Used to decide whether an active gesture continues. Extra modifiers,
    /// buttons or keys do not end it. The double-click qualifier only
    /// describes how a gesture started, so it is not required to persist.
    pub fn matches_subset(&self, mask: TriggerMask, keys: &KeySet) -> bool {
        let required = self.mask.without(TriggerMask::DOUBLE_CLICK);
        mask.contains(required) && self.keys.is_subset(keys)
    }

    /// Started by a key press rather than a button press or scroll
    pub fn is_key_triggered(&self) -> bool {
        !self.keys.is_empty()
            && !self
                .mask
                .intersects(TriggerMask::BUTTONS.union(TriggerMask::SCROLL))
    }

    pub fn is_scroll(&self) -> bool {
        self.mask.contains(TriggerMask::SCROLL)
    }
}

impl fmt::Display for InputTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.mask.names().map(str::to_string).collect();
        for &code in &self.keys {
            match KeyCode::from_code(code) {
                Some(key) => parts.push(key.to_string()),
                None => parts.push(format!("#{}", code)),
            }
        }
        write!(f, "{}", parts.join(" "))
    }
}
