//! KeyPressedManager: routes key presses to the window under the pointer
//!
//! Several dispatchers (one per window) register as receivers. Pointer
//! enter/exit marks the receiver under the pointer as active. A key press
//! recorded by the focused window is first dry-run against the active
//! receiver; only if a behaviour there would fire does the coordinator move
//! the key state over, ask the platform to focus that window, and dispatch
//! for real.
//!
//! The coordinator owns its dispatchers and every operation takes `&mut self`,
//! so a behaviour callback cannot feed events back into a dispatch in progress.

use std::fmt;
use std::time::Instant;

use crate::dispatcher::{KeyPress, MouseAndKeyHandler};
use crate::event::InputEvent;

/// Handle to a registered receiver
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReceiverId(usize);

impl ReceiverId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ReceiverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "receiver#{}", self.0)
    }
}

struct Receiver {
    handler: MouseAndKeyHandler,
    /// Asks the platform to give this receiver's window keyboard focus
    focus: Box<dyn FnMut()>,
}

#[derive(Default)]
pub struct KeyPressedManager {
    receivers: Vec<Receiver>,
    active: Option<ReceiverId>,
}

impl KeyPressedManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `handler`; `focus` runs whenever a key press is
    /// routed to it
    pub fn register(
        &mut self,
        handler: MouseAndKeyHandler,
        focus: impl FnMut() + 'static,
    ) -> ReceiverId {
        let id = ReceiverId(self.receivers.len());
        self.receivers.push(Receiver {
            handler,
            focus: Box::new(focus),
        });
        tracing::debug!("Registered {}", id);
        id
    }

    pub fn handler(&self, id: ReceiverId) -> Option<&MouseAndKeyHandler> {
        self.receivers.get(id.0).map(|r| &r.handler)
    }

    pub fn handler_mut(&mut self, id: ReceiverId) -> Option<&mut MouseAndKeyHandler> {
        self.receivers.get_mut(id.0).map(|r| &mut r.handler)
    }

    pub fn len(&self) -> usize {
        self.receivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    /// The pointer entered `id`'s window
    pub fn activate(&mut self, id: ReceiverId) {
        if id.0 < self.receivers.len() {
            tracing::debug!("Activating {}", id);
            self.active = Some(id);
        }
    }

    /// The pointer left `id`'s window
    ///
    /// A late exit from a window the pointer already left does not clear a
    /// newer activation.
    pub fn deactivate(&mut self, id: ReceiverId) {
        if self.active == Some(id) {
            tracing::debug!("Deactivating {}", id);
            self.active = None;
        }
    }

    pub fn active(&self) -> Option<ReceiverId> {
        self.active
    }

    /// Dispatch an event that arrived at `id`'s window
    pub fn handle_event(&mut self, id: ReceiverId, event: &InputEvent) {
        self.handle_event_at(id, event, Instant::now());
    }

    pub fn handle_event_at(&mut self, id: ReceiverId, event: &InputEvent, now: Instant) {
        match event {
            InputEvent::PointerEntered => self.activate(id),
            InputEvent::PointerExited => self.deactivate(id),
            InputEvent::KeyPressed(e) => {
                let Some(receiver) = self.receivers.get_mut(id.0) else {
                    tracing::warn!("Key press for unknown {}", id);
                    return;
                };
                receiver.handler.update();
                if let Some(press) = receiver.handler.register_key_press(e, now) {
                    self.dispatch_key_press(id, &press);
                }
            }
            _ => match self.receivers.get_mut(id.0) {
                Some(receiver) => receiver.handler.handle_event_at(event, now),
                None => tracing::warn!("{} for unknown {}", event.name(), id),
            },
        }
    }

    /// Route a press recorded by `origin`
    ///
    /// The active receiver (or `origin` itself when none is active) is asked
    /// in dry-run mode first. If nothing would fire there, nothing happens.
    /// Otherwise key state moves from `origin` to the receiver when they
    /// differ, the receiver's focus action runs, and the press is handled for
    /// real. Returns whether any behaviour fired.
    pub fn dispatch_key_press(&mut self, origin: ReceiverId, press: &KeyPress) -> bool {
        let target = self.active.unwrap_or(origin);

        let would_fire = match self.receivers.get_mut(target.0) {
            Some(receiver) => receiver.handler.try_handle_key_press(press, true),
            None => false,
        };
        if !would_fire {
            tracing::trace!("Nothing bound in {} for mask '{}'", target, press.mask);
            return false;
        }

        if origin != target {
            if let Some((source, dest)) = self.pair_mut(origin, target) {
                source.handler.transfer_keys_to(&mut dest.handler, press.mask);
            }
        }

        let Some(receiver) = self.receivers.get_mut(target.0) else {
            return false;
        };
        tracing::debug!("Focusing {}", target);
        (receiver.focus)();
        receiver.handler.try_handle_key_press(press, false)
    }

    /// Two distinct receivers borrowed mutably at once
    fn pair_mut(&mut self, a: ReceiverId, b: ReceiverId) -> Option<(&mut Receiver, &mut Receiver)> {
        if a == b || a.0 >= self.receivers.len() || b.0 >= self.receivers.len() {
            return None;
        }
        if a.0 < b.0 {
            let (left, right) = self.receivers.split_at_mut(b.0);
            Some((&mut left[a.0], &mut right[0]))
        } else {
            let (left, right) = self.receivers.split_at_mut(a.0);
            Some((&mut right[0], &mut left[b.0]))
        }
    }
}

impl fmt::Debug for KeyPressedManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPressedManager")
            .field("receivers", &self.receivers.len())
            .field("active", &self.active)
            .finish()
    }
}
