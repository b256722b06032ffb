//! Trigger masks: one integer snapshot of modifiers, buttons and qualifiers
//!
//! ```text
//! bit  0..=5   shift ctrl meta alt altgraph win
//! bit  6..=8   button1 button2 button3
//! bit  9       scroll qualifier
//! bit 10       double-click qualifier
//! ```

use std::fmt;

use super::types::{Buttons, Modifiers, MouseButton};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerMask(u32);

impl TriggerMask {
    pub const NONE: TriggerMask = TriggerMask(0);

    pub const SHIFT: TriggerMask = TriggerMask(1 << 0);
    pub const CTRL: TriggerMask = TriggerMask(1 << 1);
    pub const META: TriggerMask = TriggerMask(1 << 2);
    pub const ALT: TriggerMask = TriggerMask(1 << 3);
    pub const ALT_GRAPH: TriggerMask = TriggerMask(1 << 4);
    pub const WIN: TriggerMask = TriggerMask(1 << 5);

    pub const BUTTON1: TriggerMask = TriggerMask(1 << 6);
    pub const BUTTON2: TriggerMask = TriggerMask(1 << 7);
    pub const BUTTON3: TriggerMask = TriggerMask(1 << 8);

    pub const SCROLL: TriggerMask = TriggerMask(1 << 9);
    pub const DOUBLE_CLICK: TriggerMask = TriggerMask(1 << 10);

    pub const MODIFIERS: TriggerMask = TriggerMask(0b11_1111);
    pub const BUTTONS: TriggerMask = TriggerMask(0b111 << 6);

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        TriggerMask(bits)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn union(self, other: TriggerMask) -> TriggerMask {
        TriggerMask(self.0 | other.0)
    }

    #[inline]
    pub const fn without(self, other: TriggerMask) -> TriggerMask {
        TriggerMask(self.0 & !other.0)
    }

    /// All bits of `other` are set in `self`
    #[inline]
    pub const fn contains(self, other: TriggerMask) -> bool {
        (self.0 & other.0) == other.0
    }

    /// At least one bit of `other` is set in `self`
    #[inline]
    pub const fn intersects(self, other: TriggerMask) -> bool {
        (self.0 & other.0) != 0
    }

    pub const fn button(button: MouseButton) -> TriggerMask {
        match button {
            MouseButton::Primary => Self::BUTTON1,
            MouseButton::Middle => Self::BUTTON2,
            MouseButton::Secondary => Self::BUTTON3,
        }
    }

    /// Modifier bits for every held modifier
    pub const fn from_modifiers(mods: Modifiers) -> TriggerMask {
        let mut bits = 0;
        if mods.shift() {
            bits |= Self::SHIFT.0;
        }
        if mods.ctrl() {
            bits |= Self::CTRL.0;
        }
        if mods.meta() {
            bits |= Self::META.0;
        }
        if mods.alt() {
            bits |= Self::ALT.0;
        }
        if mods.alt_graph() {
            bits |= Self::ALT_GRAPH.0;
        }
        if mods.win() {
            bits |= Self::WIN.0;
        }
        TriggerMask(bits)
    }

    /// Button bits for every held button
    pub const fn from_buttons(buttons: Buttons) -> TriggerMask {
        let mut bits = 0;
        if buttons.contains(MouseButton::Primary) {
            bits |= Self::BUTTON1.0;
        }
        if buttons.contains(MouseButton::Middle) {
            bits |= Self::BUTTON2.0;
        }
        if buttons.contains(MouseButton::Secondary) {
            bits |= Self::BUTTON3.0;
        }
        TriggerMask(bits)
    }
}

impl std::ops::BitOr for TriggerMask {
    type Output = TriggerMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for TriggerMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Names in canonical descriptor order
const NAMES: [(TriggerMask, &str); 11] = [
    (TriggerMask::CTRL, "ctrl"),
    (TriggerMask::ALT, "alt"),
    (TriggerMask::ALT_GRAPH, "altgraph"),
    (TriggerMask::SHIFT, "shift"),
    (TriggerMask::META, "meta"),
    (TriggerMask::WIN, "win"),
    (TriggerMask::DOUBLE_CLICK, "double-click"),
    (TriggerMask::BUTTON1, "button1"),
    (TriggerMask::BUTTON2, "button2"),
    (TriggerMask::BUTTON3, "button3"),
    (TriggerMask::SCROLL, "scroll"),
];

impl TriggerMask {
    /// Descriptor tokens for the set bits, in canonical order
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        NAMES
            .iter()
            .filter(move |(bit, _)| self.contains(*bit))
            .map(|(_, name)| *name)
    }
}

impl fmt::Display for TriggerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.names().collect();
        write!(f, "{}", names.join(" "))
    }
}

/// The kind of raw event a mask is computed for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Press,
    Drag,
    Release,
    /// Reported after release; the clicked button still counts as down
    Click(MouseButton),
    Move,
    Scroll,
    Key,
}

/// Compute the trigger mask for one event
///
/// `modifiers` must already include the tracker-owned AltGraph/Win flags.
/// Button bits only apply to pointer events; scroll events carry the scroll
/// qualifier instead.
pub fn compute_mask(
    modifiers: Modifiers,
    buttons: Buttons,
    kind: EventKind,
    click_count: u32,
) -> TriggerMask {
    let mut mask = TriggerMask::from_modifiers(modifiers);

    match kind {
        EventKind::Scroll => {
            mask |= TriggerMask::SCROLL;
            return mask;
        }
        EventKind::Key => {}
        EventKind::Click(button) => {
            mask |= TriggerMask::from_buttons(buttons) | TriggerMask::button(button);
        }
        EventKind::Press | EventKind::Drag | EventKind::Release | EventKind::Move => {
            mask |= TriggerMask::from_buttons(buttons);
        }
    }

    if click_count > 1 {
        mask |= TriggerMask::DOUBLE_CLICK;
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_bits() {
        let mask = compute_mask(
            Modifiers::SHIFT | Modifiers::WIN,
            Buttons::NONE,
            EventKind::Key,
            0,
        );
        assert_eq!(mask, TriggerMask::SHIFT | TriggerMask::WIN);
    }

    #[test]
    fn test_press_sets_down_buttons() {
        let buttons = Buttons::of(MouseButton::Primary).with(MouseButton::Secondary);
        let mask = compute_mask(Modifiers::NONE, buttons, EventKind::Press, 1);
        assert_eq!(mask, TriggerMask::BUTTON1 | TriggerMask::BUTTON3);
    }

    #[test]
    fn test_click_sets_released_button() {
        let mask = compute_mask(
            Modifiers::CTRL,
            Buttons::NONE,
            EventKind::Click(MouseButton::Middle),
            1,
        );
        assert_eq!(mask, TriggerMask::CTRL | TriggerMask::BUTTON2);
    }

    #[test]
    fn test_click_count_sets_double_click() {
        let mask = compute_mask(
            Modifiers::NONE,
            Buttons::NONE,
            EventKind::Click(MouseButton::Primary),
            2,
        );
        assert_eq!(mask, TriggerMask::BUTTON1 | TriggerMask::DOUBLE_CLICK);

        let triple = compute_mask(
            Modifiers::NONE,
            Buttons::NONE,
            EventKind::Click(MouseButton::Primary),
            3,
        );
        assert_eq!(triple, mask);
    }

    #[test]
    fn test_scroll_ignores_buttons() {
        let mask = compute_mask(
            Modifiers::ALT,
            Buttons::of(MouseButton::Primary),
            EventKind::Scroll,
            2,
        );
        assert_eq!(mask, TriggerMask::ALT | TriggerMask::SCROLL);
    }

    #[test]
    fn test_key_mask_has_no_buttons() {
        let mask = compute_mask(
            Modifiers::NONE,
            Buttons::of(MouseButton::Primary),
            EventKind::Key,
            0,
        );
        assert!(mask.is_empty());
    }

    #[test]
    fn test_compute_mask_is_deterministic() {
        let kinds = [
            EventKind::Press,
            EventKind::Drag,
            EventKind::Release,
            EventKind::Click(MouseButton::Primary),
            EventKind::Click(MouseButton::Secondary),
            EventKind::Move,
            EventKind::Scroll,
            EventKind::Key,
        ];
        for mod_bits in 0u8..64 {
            let mods = Modifiers::new(
                mod_bits & 1 != 0,
                mod_bits & 2 != 0,
                mod_bits & 4 != 0,
                mod_bits & 8 != 0,
            );
            let mods = if mod_bits & 16 != 0 {
                mods | Modifiers::ALT_GRAPH
            } else {
                mods
            };
            let mods = if mod_bits & 32 != 0 {
                mods | Modifiers::WIN
            } else {
                mods
            };
            for buttons in [
                Buttons::NONE,
                Buttons::of(MouseButton::Primary),
                Buttons::of(MouseButton::Middle).with(MouseButton::Secondary),
            ] {
                for kind in kinds {
                    for clicks in [0, 1, 2] {
                        assert_eq!(
                            compute_mask(mods, buttons, kind, clicks),
                            compute_mask(mods, buttons, kind, clicks)
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_display_uses_canonical_order() {
        let mask = TriggerMask::BUTTON1 | TriggerMask::SHIFT | TriggerMask::CTRL;
        assert_eq!(mask.to_string(), "ctrl shift button1");
    }
}
