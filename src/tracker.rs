//! Key state tracking: pressed keys, key double-click and the AltGraph/Win flags
//!
//! Shift, Control, Alt and Meta come with every event's modifier flags, so the
//! tracker ignores them. AltGraph and Windows are not reliably reported that
//! way and are tracked here as sticky flags instead.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::trigger::{KeyCode, KeySet, Modifiers};

/// Default window for two presses of the same key to count as a double-click
pub const DEFAULT_DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(300);

/// Outcome of a tracked key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDown {
    pub code: u32,
    /// False for auto-repeat (the key was already down)
    pub inserted: bool,
    pub double_click: bool,
}

#[derive(Debug, Clone)]
pub struct KeyStateTracker {
    pressed: KeySet,
    /// Survives releases; only a transfer clears it
    press_times: HashMap<u32, Instant>,
    win_pressed: bool,
    alt_graph_pressed: bool,
    double_click_interval: Duration,
}

impl Default for KeyStateTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_CLICK_INTERVAL)
    }
}

impl KeyStateTracker {
    pub fn new(double_click_interval: Duration) -> Self {
        Self {
            pressed: KeySet::new(),
            press_times: HashMap::new(),
            win_pressed: false,
            alt_graph_pressed: false,
            double_click_interval,
        }
    }

    /// Record a key press at `now`
    ///
    /// Returns `None` when the key does not enter the pressed set: modifier
    /// keys (AltGraph and Windows set their flag) and unidentified keys.
    pub fn on_key_down(&mut self, key: KeyCode, now: Instant) -> Option<KeyDown> {
        match key {
            KeyCode::Windows => {
                self.win_pressed = true;
                return None;
            }
            KeyCode::AltGraph => {
                self.alt_graph_pressed = true;
                return None;
            }
            _ if key.is_modifier() => return None,
            _ => {}
        }

        let code = key.code()?;
        let inserted = self.pressed.insert(code);

        let double_click = inserted
            && self
                .press_times
                .get(&code)
                .is_some_and(|&last| now.saturating_duration_since(last) < self.double_click_interval);
        self.press_times.insert(code, now);

        Some(KeyDown {
            code,
            inserted,
            double_click,
        })
    }

    /// Record a key release
    ///
    /// Returns whether the key is one the tracker or the event modifiers
    /// know about. Releasing a key that was never recorded is not an error.
    pub fn on_key_up(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Windows => self.win_pressed = false,
            KeyCode::AltGraph => self.alt_graph_pressed = false,
            _ if key.is_modifier() => {}
            _ => match key.code() {
                Some(code) => {
                    self.pressed.remove(&code);
                }
                None => return false,
            },
        }
        true
    }

    /// Move the complete key state into `other`, replacing what it had
    ///
    /// Afterwards `self` is indistinguishable from a tracker that never saw a
    /// key press.
    pub fn transfer_to(&mut self, other: &mut KeyStateTracker) {
        other.pressed = std::mem::take(&mut self.pressed);
        other.press_times = std::mem::take(&mut self.press_times);
        other.win_pressed = std::mem::replace(&mut self.win_pressed, false);
        other.alt_graph_pressed = std::mem::replace(&mut self.alt_graph_pressed, false);
    }

    /// The AltGraph/Win bits owned by the tracker
    pub fn held_modifiers(&self) -> Modifiers {
        let mut mods = Modifiers::NONE;
        if self.alt_graph_pressed {
            mods = mods | Modifiers::ALT_GRAPH;
        }
        if self.win_pressed {
            mods = mods | Modifiers::WIN;
        }
        mods
    }

    pub fn pressed_keys(&self) -> &KeySet {
        &self.pressed
    }

    pub fn last_press(&self, code: u32) -> Option<Instant> {
        self.press_times.get(&code).copied()
    }

    pub fn win_pressed(&self) -> bool {
        self.win_pressed
    }

    pub fn alt_graph_pressed(&self) -> bool {
        self.alt_graph_pressed
    }

    pub fn double_click_interval(&self) -> Duration {
        self.double_click_interval
    }

    pub fn set_double_click_interval(&mut self, interval: Duration) {
        self.double_click_interval = interval;
    }

    /// Nothing pressed, no timestamps, no flags
    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
            && self.press_times.is_empty()
            && !self.win_pressed
            && !self.alt_graph_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(c: char) -> u32 {
        KeyCode::char(c).code().unwrap()
    }

    #[test]
    fn test_press_and_release() {
        let mut tracker = KeyStateTracker::default();
        let now = Instant::now();

        let down = tracker.on_key_down(KeyCode::char('a'), now).unwrap();
        assert!(down.inserted);
        assert!(!down.double_click);
        assert!(tracker.pressed_keys().contains(&code('a')));

        assert!(tracker.on_key_up(KeyCode::char('a')));
        assert!(tracker.pressed_keys().is_empty());
        assert_eq!(tracker.last_press(code('a')), Some(now));
    }

    #[test]
    fn test_modifier_keys_never_enter_the_set() {
        let mut tracker = KeyStateTracker::default();
        let now = Instant::now();
        for key in [
            KeyCode::Shift,
            KeyCode::Control,
            KeyCode::Alt,
            KeyCode::Meta,
            KeyCode::Command,
            KeyCode::Unidentified,
        ] {
            assert_eq!(tracker.on_key_down(key, now), None);
        }
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_alt_graph_and_win_flags() {
        let mut tracker = KeyStateTracker::default();
        let now = Instant::now();

        assert_eq!(tracker.on_key_down(KeyCode::AltGraph, now), None);
        assert_eq!(tracker.on_key_down(KeyCode::Windows, now), None);
        assert_eq!(
            tracker.held_modifiers(),
            Modifiers::ALT_GRAPH | Modifiers::WIN
        );
        assert!(tracker.pressed_keys().is_empty());

        tracker.on_key_up(KeyCode::Windows);
        assert_eq!(tracker.held_modifiers(), Modifiers::ALT_GRAPH);
        tracker.on_key_up(KeyCode::AltGraph);
        assert!(tracker.held_modifiers().is_empty());
    }

    #[test]
    fn test_key_double_click() {
        let mut tracker = KeyStateTracker::default();
        let t0 = Instant::now();

        tracker.on_key_down(KeyCode::char('k'), t0);
        tracker.on_key_up(KeyCode::char('k'));
        let second = tracker
            .on_key_down(KeyCode::char('k'), t0 + Duration::from_millis(120))
            .unwrap();
        assert!(second.double_click);
    }

    #[test]
    fn test_slow_second_press_is_single() {
        let mut tracker = KeyStateTracker::default();
        let t0 = Instant::now();

        tracker.on_key_down(KeyCode::char('k'), t0);
        tracker.on_key_up(KeyCode::char('k'));
        let second = tracker
            .on_key_down(KeyCode::char('k'), t0 + Duration::from_millis(300))
            .unwrap();
        assert!(!second.double_click);
    }

    #[test]
    fn test_auto_repeat_is_never_double() {
        let mut tracker = KeyStateTracker::default();
        let t0 = Instant::now();

        tracker.on_key_down(KeyCode::char('k'), t0);
        let repeat = tracker
            .on_key_down(KeyCode::char('k'), t0 + Duration::from_millis(30))
            .unwrap();
        assert!(!repeat.inserted);
        assert!(!repeat.double_click);
        assert_eq!(
            tracker.last_press(code('k')),
            Some(t0 + Duration::from_millis(30))
        );
    }

    #[test]
    fn test_unrecorded_release_is_tolerated() {
        let mut tracker = KeyStateTracker::default();
        assert!(tracker.on_key_up(KeyCode::char('z')));
        assert!(!tracker.on_key_up(KeyCode::Unidentified));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_transfer_replaces_target_state() {
        let now = Instant::now();
        let mut source = KeyStateTracker::default();
        let mut target = KeyStateTracker::default();

        source.on_key_down(KeyCode::char('a'), now);
        source.on_key_down(KeyCode::Windows, now);
        target.on_key_down(KeyCode::char('b'), now);
        target.on_key_down(KeyCode::AltGraph, now);

        source.transfer_to(&mut target);

        assert!(source.is_empty());
        assert_eq!(target.pressed_keys(), &KeySet::from([code('a')]));
        assert_eq!(target.last_press(code('b')), None);
        assert!(target.win_pressed());
        assert!(!target.alt_graph_pressed());
    }
}
