//! MouseAndKeyHandler: turns input events into behaviour invocations
//!
//! # Lifecycle
//!
//! ```text
//! press    → button drags matching exactly   → init(), become active
//! drag     → active button drags             → drag()
//! release  → active drags no longer a subset → end(), become inactive
//! key down → key drags / key clicks matching → init() / click()
//! move     → active key drags                → drag()
//! key up   → active key drags no longer held → end()
//! ```
//!
//! Behaviours fire in binding-table order, and every qualifying behaviour
//! fires, not just the first.

use std::time::{Duration, Instant};

use crate::bindings::{
    BehaviourEntry, BindingTable, DragEntry, SharedBehaviourMap, SharedInputTriggerMap,
};
use crate::config::DispatchConfig;
use crate::event::{InputEvent, KeyEvent, PointerEvent, ScrollEvent};
use crate::tracker::KeyStateTracker;
use crate::trigger::{compute_mask, Buttons, EventKind, InputTrigger, KeySet, Modifiers, TriggerMask};

/// A recorded key press, ready to be evaluated by any dispatcher
///
/// The coordinator hands the same press to a dry run and a real run, possibly
/// on a different dispatcher than the one that recorded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub mask: TriggerMask,
    pub double_click: bool,
    pub keys: KeySet,
}

impl KeyPress {
    /// Exact match, or a match with the double-click qualifier when the
    /// press completed a key double-click
    pub fn fires(&self, trigger: &InputTrigger) -> bool {
        trigger.matches(self.mask, &self.keys)
            || (self.double_click
                && trigger.matches(self.mask | TriggerMask::DOUBLE_CLICK, &self.keys))
    }
}

#[derive(Default)]
pub struct MouseAndKeyHandler {
    input_map: Option<SharedInputTriggerMap>,
    behaviour_map: Option<SharedBehaviourMap>,
    /// Modification counts the table was built from; `None` forces a rebuild
    seen_mod_counts: Option<(u64, u64)>,
    table: BindingTable,

    tracker: KeyStateTracker,
    pointer_x: i32,
    pointer_y: i32,
    /// Buttons and reported modifiers of the last pointer event
    pointer_buttons: Buttons,
    pointer_modifiers: Modifiers,

    active_button_drags: Vec<DragEntry>,
    active_key_drags: Vec<DragEntry>,
}

impl MouseAndKeyHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &DispatchConfig) -> Self {
        let mut handler = Self::new();
        handler.set_double_click_interval(config.double_click_interval());
        handler
    }

    /// Bind to a shared trigger map; the table follows its changes
    pub fn set_input_map(&mut self, input_map: SharedInputTriggerMap) {
        self.input_map = Some(input_map);
        self.seen_mod_counts = None;
    }

    /// Bind to a shared behaviour map; the table follows its changes
    pub fn set_behaviour_map(&mut self, behaviour_map: SharedBehaviourMap) {
        self.behaviour_map = Some(behaviour_map);
        self.seen_mod_counts = None;
    }

    /// Use a fixed table instead of shared maps
    pub fn set_bindings(&mut self, table: BindingTable) {
        self.input_map = None;
        self.behaviour_map = None;
        self.seen_mod_counts = None;
        self.table = table;
    }

    pub fn set_double_click_interval(&mut self, interval: Duration) {
        self.tracker.set_double_click_interval(interval);
    }

    /// Rebuild the binding table if either shared map changed
    ///
    /// Active gestures hold their own entry handles and survive rebuilds.
    pub fn update(&mut self) {
        if self.input_map.is_none() && self.behaviour_map.is_none() {
            return;
        }

        let counts = (
            self.input_map.as_ref().map_or(0, |m| m.borrow().mod_count()),
            self.behaviour_map
                .as_ref()
                .map_or(0, |m| m.borrow().mod_count()),
        );
        if self.seen_mod_counts == Some(counts) {
            return;
        }

        self.table = match (&self.input_map, &self.behaviour_map) {
            (Some(input_map), Some(behaviour_map)) => {
                BindingTable::build(&input_map.borrow(), &behaviour_map.borrow())
            }
            _ => BindingTable::new(),
        };
        self.seen_mod_counts = Some(counts);
    }

    /// Dispatch one event with the current time
    pub fn handle_event(&mut self, event: &InputEvent) {
        self.handle_event_at(event, Instant::now());
    }

    /// Dispatch one event; `now` timestamps key presses for double-click
    pub fn handle_event_at(&mut self, event: &InputEvent, now: Instant) {
        self.update();

        match event {
            InputEvent::PointerPressed(e) => self.pointer_pressed(e),
            InputEvent::PointerDragged(e) => self.pointer_dragged(e),
            InputEvent::PointerReleased(e) => self.pointer_released(e),
            InputEvent::PointerClicked(e) => self.pointer_clicked(e),
            InputEvent::PointerMoved(e) => self.pointer_moved(e),
            // Only meaningful to a coordinator
            InputEvent::PointerEntered | InputEvent::PointerExited => {}
            InputEvent::Scroll(e) => self.scrolled(e),
            InputEvent::KeyPressed(e) => {
                if let Some(press) = self.register_key_press(e, now) {
                    self.try_handle_key_press(&press, false);
                }
            }
            InputEvent::KeyReleased(e) => self.key_released(e),
        }
    }

    fn modifiers(&self, reported: Modifiers) -> Modifiers {
        reported | self.tracker.held_modifiers()
    }

    fn pointer_mask(&self, e: &PointerEvent, kind: EventKind) -> TriggerMask {
        compute_mask(self.modifiers(e.modifiers), e.buttons, kind, e.click_count)
    }

    fn pointer_pressed(&mut self, e: &PointerEvent) {
        self.track_pointer(e);
        let mask = self.pointer_mask(e, EventKind::Press);
        let keys = self.tracker.pressed_keys();

        for drag in self.table.button_drags() {
            if !drag.trigger.matches(mask, keys) || is_active(&self.active_button_drags, drag) {
                continue;
            }
            tracing::debug!("Starting button drag '{}' on '{}'", drag.action, drag.trigger);
            drag.behaviour.init(e.x, e.y);
            self.active_button_drags.push(drag.clone());
        }
    }

    fn pointer_dragged(&mut self, e: &PointerEvent) {
        self.track_pointer(e);
        for drag in &self.active_button_drags {
            tracing::trace!("drag '{}' ({}, {})", drag.action, e.x, e.y);
            drag.behaviour.drag(e.x, e.y);
        }
    }

    fn pointer_moved(&mut self, e: &PointerEvent) {
        self.track_pointer(e);
        for drag in &self.active_key_drags {
            tracing::trace!("drag '{}' ({}, {})", drag.action, e.x, e.y);
            drag.behaviour.drag(e.x, e.y);
        }
    }

    fn pointer_released(&mut self, e: &PointerEvent) {
        self.track_pointer(e);
        let mask = self.pointer_mask(e, EventKind::Release);
        let keys = self.tracker.pressed_keys();

        self.active_button_drags.retain(|drag| {
            if drag.trigger.matches_subset(mask, keys) {
                return true;
            }
            tracing::debug!("Ending button drag '{}'", drag.action);
            drag.behaviour.end(e.x, e.y);
            false
        });
    }

    fn pointer_clicked(&mut self, e: &PointerEvent) {
        self.track_pointer(e);
        let kind = match e.button {
            Some(button) => EventKind::Click(button),
            None => EventKind::Release,
        };
        let mask = self.pointer_mask(e, kind);
        let click_mask = mask.without(TriggerMask::DOUBLE_CLICK);
        let keys = self.tracker.pressed_keys();

        for click in self.table.button_clicks() {
            if click.trigger.matches(mask, keys)
                || (click_mask != mask && click.trigger.matches(click_mask, keys))
            {
                tracing::trace!("click '{}' ({}, {})", click.action, e.x, e.y);
                click.behaviour.click(e.x, e.y);
            }
        }
    }

    fn scrolled(&mut self, e: &ScrollEvent) {
        self.set_pointer(e.x, e.y);
        let mask = compute_mask(self.modifiers(e.modifiers), Buttons::NONE, EventKind::Scroll, 0);
        let keys = self.tracker.pressed_keys();
        let amount = e.amount();
        let is_horizontal = e.is_horizontal();

        for scroll in self.table.scrolls() {
            if scroll.trigger.matches(mask, keys) {
                tracing::trace!("scroll '{}' {} horizontal={}", scroll.action, amount, is_horizontal);
                scroll.behaviour.scroll(amount, is_horizontal, e.x, e.y);
            }
        }
    }

    /// Record a key press in the tracker and build the press to evaluate
    ///
    /// Returns `None` for modifier and unidentified keys, which only update
    /// tracker state. Auto-repeat presses still produce a press.
    pub fn register_key_press(&mut self, e: &KeyEvent, now: Instant) -> Option<KeyPress> {
        let down = self.tracker.on_key_down(e.key, now)?;
        let mask = compute_mask(self.modifiers(e.modifiers), Buttons::NONE, EventKind::Key, 0);
        if down.double_click {
            tracing::debug!("Key double-click on {}", e.key);
        }
        Some(KeyPress {
            mask,
            double_click: down.double_click,
            keys: self.tracker.pressed_keys().clone(),
        })
    }

    /// Fire key drags then key clicks for `press`
    ///
    /// With `dry_run` nothing fires and no state changes; the result says
    /// whether anything would have.
    pub fn try_handle_key_press(&mut self, press: &KeyPress, dry_run: bool) -> bool {
        self.update();
        let mut triggered = false;

        for drag in self.table.key_drags() {
            if is_active(&self.active_key_drags, drag) || !press.fires(&drag.trigger) {
                continue;
            }
            if dry_run {
                return true;
            }
            triggered = true;
            tracing::debug!("Starting key drag '{}' on '{}'", drag.action, drag.trigger);
            drag.behaviour.init(self.pointer_x, self.pointer_y);
            self.active_key_drags.push(drag.clone());
        }

        for click in self.table.key_clicks() {
            if !press.fires(&click.trigger) {
                continue;
            }
            if dry_run {
                return true;
            }
            triggered = true;
            tracing::trace!("click '{}' ({}, {})", click.action, self.pointer_x, self.pointer_y);
            click.behaviour.click(self.pointer_x, self.pointer_y);
        }

        triggered
    }

    fn key_released(&mut self, e: &KeyEvent) {
        if !self.tracker.on_key_up(e.key) {
            return;
        }

        // The reported modifiers may still include the key being released
        let mut modifiers = self.modifiers(e.modifiers);
        if let Some(released) = e.key.modifier() {
            modifiers = modifiers.without(released);
        }
        let mask = compute_mask(modifiers, Buttons::NONE, EventKind::Key, 0);
        self.end_key_drags_unless(|trigger, keys| trigger.matches_subset(mask, keys));
    }

    fn end_key_drags_unless(&mut self, keep: impl Fn(&InputTrigger, &KeySet) -> bool) {
        let (x, y) = (self.pointer_x, self.pointer_y);
        let keys = self.tracker.pressed_keys();
        self.active_key_drags.retain(|drag| {
            if keep(&drag.trigger, keys) {
                return true;
            }
            tracing::debug!("Ending key drag '{}'", drag.action);
            drag.behaviour.end(x, y);
            false
        });
    }

    /// Hand the complete key state to `target`
    ///
    /// Key drags started here cannot continue without their keys and are
    /// ended first. Button drags here end too once their trigger needs keys
    /// or tracked modifiers that moved away. `target` replaces its key state
    /// with ours and ends its own key drags that the received state (under
    /// `mask`) no longer holds.
    pub fn transfer_keys_to(&mut self, target: &mut MouseAndKeyHandler, mask: TriggerMask) {
        self.end_key_drags_unless(|_, _| false);
        self.tracker.transfer_to(&mut target.tracker);
        self.end_button_drags_after_transfer();
        target.end_key_drags_unless(|trigger, keys| trigger.matches_subset(mask, keys));
        tracing::debug!(
            "Transferred keys {:?} (mask '{}')",
            target.tracker.pressed_keys(),
            mask
        );
    }

    /// End button drags the pointer state alone no longer satisfies
    fn end_button_drags_after_transfer(&mut self) {
        let (x, y) = (self.pointer_x, self.pointer_y);
        let mask = compute_mask(
            self.modifiers(self.pointer_modifiers),
            self.pointer_buttons,
            EventKind::Drag,
            0,
        );
        let keys = self.tracker.pressed_keys();
        self.active_button_drags.retain(|drag| {
            if drag.trigger.matches_subset(mask, keys) {
                return true;
            }
            tracing::debug!("Ending button drag '{}' after key transfer", drag.action);
            drag.behaviour.end(x, y);
            false
        });
    }

    fn track_pointer(&mut self, e: &PointerEvent) {
        self.set_pointer(e.x, e.y);
        self.pointer_buttons = e.buttons;
        self.pointer_modifiers = e.modifiers;
    }

    fn set_pointer(&mut self, x: i32, y: i32) {
        self.pointer_x = x;
        self.pointer_y = y;
    }

    /// Last pointer position seen by this dispatcher
    pub fn pointer(&self) -> (i32, i32) {
        (self.pointer_x, self.pointer_y)
    }

    pub fn tracker(&self) -> &KeyStateTracker {
        &self.tracker
    }

    /// The binding table, rebuilt first if the shared maps changed
    pub fn bindings(&mut self) -> &BindingTable {
        self.update();
        &self.table
    }

    pub fn active_button_drags(&self) -> &[DragEntry] {
        &self.active_button_drags
    }

    pub fn active_key_drags(&self) -> &[DragEntry] {
        &self.active_key_drags
    }

    pub fn has_active_gestures(&self) -> bool {
        !self.active_button_drags.is_empty() || !self.active_key_drags.is_empty()
    }
}

fn is_active<B: ?Sized>(active: &[BehaviourEntry<B>], entry: &BehaviourEntry<B>) -> bool {
    active.iter().any(|a| a.same_binding(entry))
}

impl std::fmt::Debug for MouseAndKeyHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MouseAndKeyHandler")
            .field("pointer", &(self.pointer_x, self.pointer_y))
            .field("pressed_keys", self.tracker.pressed_keys())
            .field("active_button_drags", &self.active_button_drags.len())
            .field("active_key_drags", &self.active_key_drags.len())
            .field("shared_maps", &self.input_map.is_some())
            .finish()
    }
}
