//! Adapter to convert winit window events to our InputEvent type

use std::time::Instant;

use winit::event::{
    ElementState, KeyEvent as WinitKeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta,
    WindowEvent,
};
use winit::keyboard::{Key, KeyCode as WinitKeyCode, ModifiersState, NamedKey, PhysicalKey};

use super::click::{within, ClickTracker};
use crate::config::DispatchConfig;
use crate::event::{InputEvent, KeyEvent, PointerEvent, ScrollEvent};
use crate::trigger::{Buttons, KeyCode, Modifiers, MouseButton};

/// Convert winit key data to our KeyCode
///
/// The physical key decides, so letters map the same with or without shift.
/// The logical key is only consulted for AltGraph (which shares a physical
/// key with right Alt) and for keys without a physical mapping.
pub fn key_code_from_winit(physical_key: PhysicalKey, logical_key: &Key) -> KeyCode {
    if let Key::Named(NamedKey::AltGraph) = logical_key {
        return KeyCode::AltGraph;
    }

    let mapped = match physical_key {
        PhysicalKey::Code(code) => physical_key_code(code),
        PhysicalKey::Unidentified(_) => None,
    };

    mapped
        .or_else(|| match logical_key {
            Key::Character(s) => s.chars().next().map(KeyCode::char),
            _ => None,
        })
        .unwrap_or(KeyCode::Unidentified)
}

fn physical_key_code(code: WinitKeyCode) -> Option<KeyCode> {
    let key = match code {
        WinitKeyCode::KeyA => KeyCode::Char('A'),
        WinitKeyCode::KeyB => KeyCode::Char('B'),
        WinitKeyCode::KeyC => KeyCode::Char('C'),
        WinitKeyCode::KeyD => KeyCode::Char('D'),
        WinitKeyCode::KeyE => KeyCode::Char('E'),
        WinitKeyCode::KeyF => KeyCode::Char('F'),
        WinitKeyCode::KeyG => KeyCode::Char('G'),
        WinitKeyCode::KeyH => KeyCode::Char('H'),
        WinitKeyCode::KeyI => KeyCode::Char('I'),
        WinitKeyCode::KeyJ => KeyCode::Char('J'),
        WinitKeyCode::KeyK => KeyCode::Char('K'),
        WinitKeyCode::KeyL => KeyCode::Char('L'),
        WinitKeyCode::KeyM => KeyCode::Char('M'),
        WinitKeyCode::KeyN => KeyCode::Char('N'),
        WinitKeyCode::KeyO => KeyCode::Char('O'),
        WinitKeyCode::KeyP => KeyCode::Char('P'),
        WinitKeyCode::KeyQ => KeyCode::Char('Q'),
        WinitKeyCode::KeyR => KeyCode::Char('R'),
        WinitKeyCode::KeyS => KeyCode::Char('S'),
        WinitKeyCode::KeyT => KeyCode::Char('T'),
        WinitKeyCode::KeyU => KeyCode::Char('U'),
        WinitKeyCode::KeyV => KeyCode::Char('V'),
        WinitKeyCode::KeyW => KeyCode::Char('W'),
        WinitKeyCode::KeyX => KeyCode::Char('X'),
        WinitKeyCode::KeyY => KeyCode::Char('Y'),
        WinitKeyCode::KeyZ => KeyCode::Char('Z'),

        WinitKeyCode::Digit0 => KeyCode::Char('0'),
        WinitKeyCode::Digit1 => KeyCode::Char('1'),
        WinitKeyCode::Digit2 => KeyCode::Char('2'),
        WinitKeyCode::Digit3 => KeyCode::Char('3'),
        WinitKeyCode::Digit4 => KeyCode::Char('4'),
        WinitKeyCode::Digit5 => KeyCode::Char('5'),
        WinitKeyCode::Digit6 => KeyCode::Char('6'),
        WinitKeyCode::Digit7 => KeyCode::Char('7'),
        WinitKeyCode::Digit8 => KeyCode::Char('8'),
        WinitKeyCode::Digit9 => KeyCode::Char('9'),

        WinitKeyCode::Comma => KeyCode::Char(','),
        WinitKeyCode::Minus => KeyCode::Char('-'),
        WinitKeyCode::Period => KeyCode::Char('.'),
        WinitKeyCode::Slash => KeyCode::Char('/'),
        WinitKeyCode::Semicolon => KeyCode::Char(';'),
        WinitKeyCode::Equal => KeyCode::Char('='),
        WinitKeyCode::BracketLeft => KeyCode::Char('['),
        WinitKeyCode::Backslash => KeyCode::Char('\\'),
        WinitKeyCode::BracketRight => KeyCode::Char(']'),
        WinitKeyCode::Quote => KeyCode::Char('\''),
        WinitKeyCode::Backquote => KeyCode::Char('`'),

        WinitKeyCode::Enter => KeyCode::Enter,
        WinitKeyCode::Escape => KeyCode::Escape,
        WinitKeyCode::Tab => KeyCode::Tab,
        WinitKeyCode::Backspace => KeyCode::Backspace,
        WinitKeyCode::Delete => KeyCode::Delete,
        WinitKeyCode::Space => KeyCode::Space,

        WinitKeyCode::ArrowUp => KeyCode::Up,
        WinitKeyCode::ArrowDown => KeyCode::Down,
        WinitKeyCode::ArrowLeft => KeyCode::Left,
        WinitKeyCode::ArrowRight => KeyCode::Right,

        WinitKeyCode::Home => KeyCode::Home,
        WinitKeyCode::End => KeyCode::End,
        WinitKeyCode::PageUp => KeyCode::PageUp,
        WinitKeyCode::PageDown => KeyCode::PageDown,
        WinitKeyCode::Insert => KeyCode::Insert,

        WinitKeyCode::F1 => KeyCode::F(1),
        WinitKeyCode::F2 => KeyCode::F(2),
        WinitKeyCode::F3 => KeyCode::F(3),
        WinitKeyCode::F4 => KeyCode::F(4),
        WinitKeyCode::F5 => KeyCode::F(5),
        WinitKeyCode::F6 => KeyCode::F(6),
        WinitKeyCode::F7 => KeyCode::F(7),
        WinitKeyCode::F8 => KeyCode::F(8),
        WinitKeyCode::F9 => KeyCode::F(9),
        WinitKeyCode::F10 => KeyCode::F(10),
        WinitKeyCode::F11 => KeyCode::F(11),
        WinitKeyCode::F12 => KeyCode::F(12),

        WinitKeyCode::Numpad0 => KeyCode::Numpad0,
        WinitKeyCode::Numpad1 => KeyCode::Numpad1,
        WinitKeyCode::Numpad2 => KeyCode::Numpad2,
        WinitKeyCode::Numpad3 => KeyCode::Numpad3,
        WinitKeyCode::Numpad4 => KeyCode::Numpad4,
        WinitKeyCode::Numpad5 => KeyCode::Numpad5,
        WinitKeyCode::Numpad6 => KeyCode::Numpad6,
        WinitKeyCode::Numpad7 => KeyCode::Numpad7,
        WinitKeyCode::Numpad8 => KeyCode::Numpad8,
        WinitKeyCode::Numpad9 => KeyCode::Numpad9,
        WinitKeyCode::NumpadAdd => KeyCode::NumpadAdd,
        WinitKeyCode::NumpadSubtract => KeyCode::NumpadSubtract,
        WinitKeyCode::NumpadMultiply => KeyCode::NumpadMultiply,
        WinitKeyCode::NumpadDivide => KeyCode::NumpadDivide,
        WinitKeyCode::NumpadEnter => KeyCode::NumpadEnter,
        WinitKeyCode::NumpadDecimal => KeyCode::NumpadDecimal,

        WinitKeyCode::ShiftLeft | WinitKeyCode::ShiftRight => KeyCode::Shift,
        WinitKeyCode::ControlLeft | WinitKeyCode::ControlRight => KeyCode::Control,
        WinitKeyCode::AltLeft | WinitKeyCode::AltRight => KeyCode::Alt,
        WinitKeyCode::SuperLeft | WinitKeyCode::SuperRight | WinitKeyCode::Meta => KeyCode::Meta,

        _ => return None,
    };
    Some(key)
}

/// Convert winit modifier state; Super counts as Meta
pub fn modifiers_from_winit(state: ModifiersState) -> Modifiers {
    Modifiers::new(
        state.control_key(),
        state.shift_key(),
        state.alt_key(),
        state.super_key(),
    )
}

fn button_from_winit(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Primary),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Right => Some(MouseButton::Secondary),
        _ => None,
    }
}

/// Per-button press origin and click count, kept until release
#[derive(Debug, Clone, Copy)]
struct PressOrigin {
    position: (f64, f64),
    click_count: u32,
}

/// Stateful translation from one window's winit events to InputEvents
///
/// winit reports raw presses and releases only. Held buttons and modifiers
/// are tracked here, moves become drags while a button is down, and a
/// release close to its press is followed by a synthesized click.
#[derive(Debug, Clone)]
pub struct WinitTranslator {
    cursor: (f64, f64),
    buttons: Buttons,
    modifiers: Modifiers,
    clicks: ClickTracker,
    origins: [Option<PressOrigin>; 3],
}

impl Default for WinitTranslator {
    fn default() -> Self {
        Self::new(&DispatchConfig::default())
    }
}

impl WinitTranslator {
    pub fn new(config: &DispatchConfig) -> Self {
        Self {
            cursor: (0.0, 0.0),
            buttons: Buttons::NONE,
            modifiers: Modifiers::NONE,
            clicks: ClickTracker::new(config.double_click_interval(), config.click_slop),
            origins: [None; 3],
        }
    }

    /// Translate one window event; most produce zero or one InputEvent
    pub fn translate(&mut self, event: &WindowEvent) -> Vec<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                vec![self.cursor_moved(position.x, position.y)]
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_input(*state, *button, Instant::now())
            }
            WindowEvent::MouseWheel { delta, .. } => vec![self.mouse_wheel(*delta)],
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers_changed(modifiers.state());
                Vec::new()
            }
            WindowEvent::KeyboardInput { event, .. } => vec![self.keyboard_input(event)],
            WindowEvent::CursorEntered { .. } => vec![InputEvent::PointerEntered],
            WindowEvent::CursorLeft { .. } => {
                self.clicks.reset();
                vec![InputEvent::PointerExited]
            }
            _ => Vec::new(),
        }
    }

    pub fn cursor_moved(&mut self, x: f64, y: f64) -> InputEvent {
        self.cursor = (x, y);
        let event = self.pointer_event(None, 0);
        if self.buttons.is_empty() {
            InputEvent::PointerMoved(event)
        } else {
            InputEvent::PointerDragged(event)
        }
    }

    /// A button changed state at the current cursor position
    pub fn mouse_input(
        &mut self,
        state: ElementState,
        button: WinitMouseButton,
        now: Instant,
    ) -> Vec<InputEvent> {
        let Some(button) = button_from_winit(button) else {
            return Vec::new();
        };
        let slot = button_slot(button);

        match state {
            ElementState::Pressed => {
                self.buttons = self.buttons.with(button);
                let click_count = self
                    .clicks
                    .track_click(button, self.cursor.0, self.cursor.1, now);
                self.origins[slot] = Some(PressOrigin {
                    position: self.cursor,
                    click_count,
                });
                vec![InputEvent::PointerPressed(
                    self.pointer_event(Some(button), click_count),
                )]
            }
            ElementState::Released => {
                self.buttons = self.buttons.without(button);
                let origin = self.origins[slot].take();
                let click_count = origin.map_or(1, |o| o.click_count);
                let released =
                    InputEvent::PointerReleased(self.pointer_event(Some(button), click_count));

                match origin {
                    Some(o) if within(self.clicks.slop(), o.position, self.cursor) => vec![
                        released,
                        InputEvent::PointerClicked(self.pointer_event(Some(button), click_count)),
                    ],
                    _ => vec![released],
                }
            }
        }
    }

    pub fn mouse_wheel(&mut self, delta: MouseScrollDelta) -> InputEvent {
        let (delta_x, delta_y) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (x as f64, y as f64),
            MouseScrollDelta::PixelDelta(pos) => (pos.x, pos.y),
        };
        let (x, y) = self.position();
        InputEvent::Scroll(ScrollEvent::new(x, y, delta_x, delta_y).with_modifiers(self.modifiers))
    }

    pub fn modifiers_changed(&mut self, state: ModifiersState) {
        self.modifiers = modifiers_from_winit(state);
    }

    /// Translate a key event; auto-repeat presses are forwarded as presses
    pub fn keyboard_input(&mut self, event: &WinitKeyEvent) -> InputEvent {
        self.key_input(event.physical_key, &event.logical_key, event.state)
    }

    pub fn key_input(
        &mut self,
        physical_key: PhysicalKey,
        logical_key: &Key,
        state: ElementState,
    ) -> InputEvent {
        let event = KeyEvent::new(key_code_from_winit(physical_key, logical_key), self.modifiers);
        match state {
            ElementState::Pressed => InputEvent::KeyPressed(event),
            ElementState::Released => InputEvent::KeyReleased(event),
        }
    }

    fn position(&self) -> (i32, i32) {
        (self.cursor.0.round() as i32, self.cursor.1.round() as i32)
    }

    fn pointer_event(&self, button: Option<MouseButton>, click_count: u32) -> PointerEvent {
        let (x, y) = self.position();
        PointerEvent {
            x,
            y,
            modifiers: self.modifiers,
            buttons: self.buttons,
            button,
            click_count,
        }
    }
}

fn button_slot(button: MouseButton) -> usize {
    match button {
        MouseButton::Primary => 0,
        MouseButton::Middle => 1,
        MouseButton::Secondary => 2,
    }
}
