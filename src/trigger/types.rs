//! Core input types: Modifiers, MouseButton, Buttons, KeyCode

use std::fmt;

/// Modifier keys as a bitfield for efficient storage and comparison
///
/// The first four flags are reported by the toolkit on every event. `ALT_GRAPH`
/// and `WIN` are not; the dispatcher folds them in from its own key tracking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b00_0001);
    pub const SHIFT: Modifiers = Modifiers(0b00_0010);
    pub const ALT: Modifiers = Modifiers(0b00_0100);
    pub const META: Modifiers = Modifiers(0b00_1000); // Cmd on macOS, Super elsewhere
    pub const ALT_GRAPH: Modifiers = Modifiers(0b01_0000);
    pub const WIN: Modifiers = Modifiers(0b10_0000);

    /// Create modifiers from the four toolkit-reported flags
    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= Self::CTRL.0;
        }
        if shift {
            bits |= Self::SHIFT.0;
        }
        if alt {
            bits |= Self::ALT.0;
        }
        if meta {
            bits |= Self::META.0;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & Self::CTRL.0 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & Self::SHIFT.0 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & Self::ALT.0 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & Self::META.0 != 0
    }

    #[inline]
    pub const fn alt_graph(self) -> bool {
        self.0 & Self::ALT_GRAPH.0 != 0
    }

    #[inline]
    pub const fn win(self) -> bool {
        self.0 & Self::WIN.0 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Remove every modifier in `other`
    #[inline]
    pub const fn without(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl() {
            parts.push("ctrl");
        }
        if self.shift() {
            parts.push("shift");
        }
        if self.alt() {
            parts.push("alt");
        }
        if self.meta() {
            parts.push("meta");
        }
        if self.alt_graph() {
            parts.push("altgraph");
        }
        if self.win() {
            parts.push("win");
        }
        write!(f, "{}", parts.join(" "))
    }
}

/// The three mouse buttons that can take part in a trigger
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Button1, usually the left button
    Primary,
    /// Button2
    Middle,
    /// Button3, usually the right button
    Secondary,
}

impl MouseButton {
    const fn bit(self) -> u8 {
        match self {
            MouseButton::Primary => 0b001,
            MouseButton::Middle => 0b010,
            MouseButton::Secondary => 0b100,
        }
    }
}

/// Set of mouse buttons currently held down
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Buttons(u8);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);

    pub const fn of(button: MouseButton) -> Self {
        Buttons(button.bit())
    }

    #[inline]
    pub const fn contains(self, button: MouseButton) -> bool {
        self.0 & button.bit() != 0
    }

    #[inline]
    pub const fn with(self, button: MouseButton) -> Self {
        Buttons(self.0 | button.bit())
    }

    #[inline]
    pub const fn without(self, button: MouseButton) -> Self {
        Buttons(self.0 & !button.bit())
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A key identity as reported by the platform layer
///
/// Every identified key has a stable integer code (see [`KeyCode::code`]);
/// the pressed-key set and triggers only ever store those codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key (normalized to uppercase)
    Char(char),

    // Named keys
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Insert,

    // Function keys
    F(u8), // F1-F24

    // Numpad (physical keys)
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    NumpadAdd,
    NumpadSubtract,
    NumpadMultiply,
    NumpadDivide,
    NumpadEnter,
    NumpadDecimal,

    // Modifier keys: never part of the pressed-key set
    Shift,
    Control,
    Alt,
    Meta,
    Command,
    AltGraph,
    Windows,

    /// A key the platform could not identify
    Unidentified,
}

/// Codes above this value are private to this crate (no virtual-key equivalent)
const EXTENDED: u32 = 0x0001_0000;
/// Non-ASCII characters are offset past the extended range
const UNICODE: u32 = 0x0100_0000;
const F13: u32 = 0xF000;

const NUMPAD: [KeyCode; 10] = [
    KeyCode::Numpad0,
    KeyCode::Numpad1,
    KeyCode::Numpad2,
    KeyCode::Numpad3,
    KeyCode::Numpad4,
    KeyCode::Numpad5,
    KeyCode::Numpad6,
    KeyCode::Numpad7,
    KeyCode::Numpad8,
    KeyCode::Numpad9,
];

/// Characters whose uppercase ASCII value is their code; anything else is
/// offset into the unicode range so it cannot collide with a named key
fn has_plain_code(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ',' | '-' | '.' | '/' | ';' | '=' | '[' | '\\' | ']')
}

impl KeyCode {
    /// Normalizing constructor for character keys
    pub fn char(c: char) -> Self {
        KeyCode::Char(c.to_ascii_uppercase())
    }

    /// Integer code for this key, `None` for [`KeyCode::Unidentified`]
    ///
    /// Codes follow the classic virtual-key numbering (`A` = 65, `F1` = 112,
    /// ...) so that traces and configs stay readable.
    pub fn code(self) -> Option<u32> {
        let code = match self {
            KeyCode::Char(c) if has_plain_code(c) => c.to_ascii_uppercase() as u32,
            KeyCode::Char(c) => UNICODE + c as u32,
            KeyCode::Enter => 10,
            KeyCode::Escape => 27,
            KeyCode::Tab => 9,
            KeyCode::Backspace => 8,
            KeyCode::Delete => 127,
            KeyCode::Space => 32,
            KeyCode::PageUp => 33,
            KeyCode::PageDown => 34,
            KeyCode::End => 35,
            KeyCode::Home => 36,
            KeyCode::Left => 37,
            KeyCode::Up => 38,
            KeyCode::Right => 39,
            KeyCode::Down => 40,
            KeyCode::Insert => 155,
            KeyCode::F(n @ 1..=12) => 111 + n as u32,
            KeyCode::F(n @ 13..=24) => F13 + (n as u32 - 13),
            KeyCode::F(_) => return None,
            KeyCode::Numpad0 => 96,
            KeyCode::Numpad1 => 97,
            KeyCode::Numpad2 => 98,
            KeyCode::Numpad3 => 99,
            KeyCode::Numpad4 => 100,
            KeyCode::Numpad5 => 101,
            KeyCode::Numpad6 => 102,
            KeyCode::Numpad7 => 103,
            KeyCode::Numpad8 => 104,
            KeyCode::Numpad9 => 105,
            KeyCode::NumpadMultiply => 106,
            KeyCode::NumpadAdd => 107,
            KeyCode::NumpadSubtract => 109,
            KeyCode::NumpadDecimal => 110,
            KeyCode::NumpadDivide => 111,
            KeyCode::NumpadEnter => EXTENDED + 10,
            KeyCode::Shift => 16,
            KeyCode::Control => 17,
            KeyCode::Alt => 18,
            KeyCode::Meta => 157,
            KeyCode::Command => EXTENDED + 157,
            KeyCode::AltGraph => 65406,
            KeyCode::Windows => 524,
            KeyCode::Unidentified => return None,
        };
        Some(code)
    }

    /// Inverse of [`KeyCode::code`]
    pub fn from_code(code: u32) -> Option<Self> {
        let key = match code {
            8 => KeyCode::Backspace,
            9 => KeyCode::Tab,
            10 => KeyCode::Enter,
            16 => KeyCode::Shift,
            17 => KeyCode::Control,
            18 => KeyCode::Alt,
            27 => KeyCode::Escape,
            32 => KeyCode::Space,
            33 => KeyCode::PageUp,
            34 => KeyCode::PageDown,
            35 => KeyCode::End,
            36 => KeyCode::Home,
            37 => KeyCode::Left,
            38 => KeyCode::Up,
            39 => KeyCode::Right,
            40 => KeyCode::Down,
            96..=105 => NUMPAD[(code - 96) as usize],
            106 => KeyCode::NumpadMultiply,
            107 => KeyCode::NumpadAdd,
            109 => KeyCode::NumpadSubtract,
            110 => KeyCode::NumpadDecimal,
            111 => KeyCode::NumpadDivide,
            112..=123 => KeyCode::F((code - 111) as u8),
            127 => KeyCode::Delete,
            155 => KeyCode::Insert,
            157 => KeyCode::Meta,
            524 => KeyCode::Windows,
            65406 => KeyCode::AltGraph,
            c if (F13..F13 + 12).contains(&c) => KeyCode::F((c - F13 + 13) as u8),
            c if c == EXTENDED + 10 => KeyCode::NumpadEnter,
            c if c == EXTENDED + 157 => KeyCode::Command,
            c if c >= UNICODE => KeyCode::Char(char::from_u32(c - UNICODE)?),
            c => {
                let ch = char::from_u32(c)?;
                if has_plain_code(ch) {
                    KeyCode::Char(ch)
                } else {
                    return None;
                }
            }
        };
        Some(key)
    }

    /// Modifier keys that are folded into the modifier bits of a mask
    /// instead of the pressed-key set
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            KeyCode::Shift
                | KeyCode::Control
                | KeyCode::Alt
                | KeyCode::Meta
                | KeyCode::Command
                | KeyCode::AltGraph
                | KeyCode::Windows
        )
    }

    /// The modifier bit this key drives, if it is a modifier key
    pub const fn modifier(self) -> Option<Modifiers> {
        match self {
            KeyCode::Shift => Some(Modifiers::SHIFT),
            KeyCode::Control => Some(Modifiers::CTRL),
            KeyCode::Alt => Some(Modifiers::ALT),
            KeyCode::Meta | KeyCode::Command => Some(Modifiers::META),
            KeyCode::AltGraph => Some(Modifiers::ALT_GRAPH),
            KeyCode::Windows => Some(Modifiers::WIN),
            _ => None,
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c.to_uppercase()),
            KeyCode::Enter => write!(f, "ENTER"),
            KeyCode::Escape => write!(f, "ESCAPE"),
            KeyCode::Tab => write!(f, "TAB"),
            KeyCode::Backspace => write!(f, "BACK_SPACE"),
            KeyCode::Delete => write!(f, "DELETE"),
            KeyCode::Space => write!(f, "SPACE"),
            KeyCode::Up => write!(f, "UP"),
            KeyCode::Down => write!(f, "DOWN"),
            KeyCode::Left => write!(f, "LEFT"),
            KeyCode::Right => write!(f, "RIGHT"),
            KeyCode::Home => write!(f, "HOME"),
            KeyCode::End => write!(f, "END"),
            KeyCode::PageUp => write!(f, "PAGE_UP"),
            KeyCode::PageDown => write!(f, "PAGE_DOWN"),
            KeyCode::Insert => write!(f, "INSERT"),
            KeyCode::F(n) => write!(f, "F{}", n),
            KeyCode::Numpad0 => write!(f, "NUMPAD0"),
            KeyCode::Numpad1 => write!(f, "NUMPAD1"),
            KeyCode::Numpad2 => write!(f, "NUMPAD2"),
            KeyCode::Numpad3 => write!(f, "NUMPAD3"),
            KeyCode::Numpad4 => write!(f, "NUMPAD4"),
            KeyCode::Numpad5 => write!(f, "NUMPAD5"),
            KeyCode::Numpad6 => write!(f, "NUMPAD6"),
            KeyCode::Numpad7 => write!(f, "NUMPAD7"),
            KeyCode::Numpad8 => write!(f, "NUMPAD8"),
            KeyCode::Numpad9 => write!(f, "NUMPAD9"),
            KeyCode::NumpadAdd => write!(f, "ADD"),
            KeyCode::NumpadSubtract => write!(f, "SUBTRACT"),
            KeyCode::NumpadMultiply => write!(f, "MULTIPLY"),
            KeyCode::NumpadDivide => write!(f, "DIVIDE"),
            KeyCode::NumpadEnter => write!(f, "NUMPAD_ENTER"),
            KeyCode::NumpadDecimal => write!(f, "DECIMAL"),
            KeyCode::Shift => write!(f, "SHIFT"),
            KeyCode::Control => write!(f, "CONTROL"),
            KeyCode::Alt => write!(f, "ALT"),
            KeyCode::Meta => write!(f, "META"),
            KeyCode::Command => write!(f, "COMMAND"),
            KeyCode::AltGraph => write!(f, "ALT_GRAPH"),
            KeyCode::Windows => write!(f, "WINDOWS"),
            KeyCode::Unidentified => write!(f, "UNDEFINED"),
        }
    }
}
