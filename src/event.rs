//! Platform-neutral input events fed to the dispatcher

use crate::trigger::{Buttons, KeyCode, Modifiers, MouseButton};

/// Pointer state carried by press, drag, release, click and move events
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    pub x: i32,
    pub y: i32,
    pub modifiers: Modifiers,
    /// Buttons physically down after this event
    pub buttons: Buttons,
    /// The button that changed state (press, release, click)
    pub button: Option<MouseButton>,
    pub click_count: u32,
}

impl PointerEvent {
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_buttons(mut self, buttons: Buttons) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }

    pub fn with_click_count(mut self, click_count: u32) -> Self {
        self.click_count = click_count;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollEvent {
    pub x: i32,
    pub y: i32,
    pub delta_x: f64,
    pub delta_y: f64,
    pub modifiers: Modifiers,
}

impl ScrollEvent {
    pub fn new(x: i32, y: i32, delta_x: f64, delta_y: f64) -> Self {
        Self {
            x,
            y,
            delta_x,
            delta_y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Horizontal when the x delta dominates
    pub fn is_horizontal(&self) -> bool {
        self.delta_x.abs() > self.delta_y.abs()
    }

    /// The dominant delta
    pub fn amount(&self) -> f64 {
        if self.is_horizontal() {
            self.delta_x
        } else {
            self.delta_y
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    /// Modifier state reported with the event
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: KeyCode, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Every event kind the dispatcher consumes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerPressed(PointerEvent),
    PointerDragged(PointerEvent),
    PointerReleased(PointerEvent),
    PointerClicked(PointerEvent),
    PointerMoved(PointerEvent),
    PointerEntered,
    PointerExited,
    Scroll(ScrollEvent),
    KeyPressed(KeyEvent),
    KeyReleased(KeyEvent),
}

impl InputEvent {
    pub fn name(&self) -> &'static str {
        match self {
            InputEvent::PointerPressed(_) => "pointer-pressed",
            InputEvent::PointerDragged(_) => "pointer-dragged",
            InputEvent::PointerReleased(_) => "pointer-released",
            InputEvent::PointerClicked(_) => "pointer-clicked",
            InputEvent::PointerMoved(_) => "pointer-moved",
            InputEvent::PointerEntered => "pointer-entered",
            InputEvent::PointerExited => "pointer-exited",
            InputEvent::Scroll(_) => "scroll",
            InputEvent::KeyPressed(_) => "key-pressed",
            InputEvent::KeyReleased(_) => "key-released",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_axis() {
        let vertical = ScrollEvent::new(0, 0, 0.5, -3.0);
        assert!(!vertical.is_horizontal());
        assert_eq!(vertical.amount(), -3.0);

        let horizontal = ScrollEvent::new(0, 0, 2.0, 1.0);
        assert!(horizontal.is_horizontal());
        assert_eq!(horizontal.amount(), 2.0);

        // Ties go to the vertical axis
        let tie = ScrollEvent::new(0, 0, 1.0, -1.0);
        assert!(!tie.is_horizontal());
        assert_eq!(tie.amount(), -1.0);
    }

    #[test]
    fn test_pointer_builders() {
        let event = PointerEvent::at(3, 4)
            .with_button(MouseButton::Primary)
            .with_buttons(Buttons::of(MouseButton::Primary))
            .with_click_count(2);
        assert_eq!((event.x, event.y), (3, 4));
        assert_eq!(event.button, Some(MouseButton::Primary));
        assert!(event.buttons.contains(MouseButton::Primary));
        assert_eq!(event.click_count, 2);
    }
}
