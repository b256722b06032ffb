//! Parsing trigger descriptors like "ctrl shift button1" or "double-click K"
//!
//! A descriptor is a whitespace-separated list of modifier, button and
//! qualifier tokens plus any number of key names. Alternatives are separated
//! by `|` ("shift A | G").

use std::fmt;
use std::str::FromStr;

use super::input_trigger::{InputTrigger, KeySet};
use super::mask::TriggerMask;
use super::types::KeyCode;

impl FromStr for InputTrigger {
    type Err = TriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_trigger(s)
    }
}

/// Parse a single descriptor into a trigger
pub fn parse_trigger(descriptor: &str) -> Result<InputTrigger, TriggerError> {
    let mut mask = TriggerMask::NONE;
    let mut keys = KeySet::new();
    let mut seen_token = false;

    for token in descriptor.split_whitespace() {
        seen_token = true;
        if let Some(bit) = parse_mask_token(token) {
            mask |= bit;
            continue;
        }

        let key = parse_key_name(token)?;
        match key.modifier() {
            // "SHIFT" as a key name means the shift modifier
            Some(modifier) => mask |= TriggerMask::from_modifiers(modifier),
            None => {
                let code = key
                    .code()
                    .ok_or_else(|| TriggerError::InvalidKey(token.to_string()))?;
                keys.insert(code);
            }
        }
    }

    if !seen_token {
        return Err(TriggerError::Empty);
    }

    let trigger = InputTrigger::new(mask, keys);
    if trigger.is_scroll() && !trigger.keys().is_empty() {
        return Err(TriggerError::Conflict(descriptor.trim().to_string()));
    }
    Ok(trigger)
}

/// Parse `|`-separated alternatives
pub fn parse_triggers(descriptor: &str) -> Result<Vec<InputTrigger>, TriggerError> {
    descriptor.split('|').map(parse_trigger).collect()
}

fn parse_mask_token(token: &str) -> Option<TriggerMask> {
    let bit = match token.to_lowercase().as_str() {
        "shift" => TriggerMask::SHIFT,
        "ctrl" | "control" => TriggerMask::CTRL,
        "meta" | "cmd" | "command" => TriggerMask::META,
        "alt" | "option" => TriggerMask::ALT,
        "altgraph" | "alt_graph" | "altgr" => TriggerMask::ALT_GRAPH,
        "win" | "windows" => TriggerMask::WIN,
        "button1" => TriggerMask::BUTTON1,
        "button2" => TriggerMask::BUTTON2,
        "button3" => TriggerMask::BUTTON3,
        "scroll" => TriggerMask::SCROLL,
        "double-click" | "double_click" | "doubleclick" => TriggerMask::DOUBLE_CLICK,
        _ => return None,
    };
    Some(bit)
}

/// Parse a key name ("A", "SPACE", "F5", "NUMPAD3", "COMMA", ...)
pub fn parse_key_name(name: &str) -> Result<KeyCode, TriggerError> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::char(c));
    }

    let upper = name.to_uppercase();
    let key = match upper.as_str() {
        "ENTER" | "RETURN" => KeyCode::Enter,
        "ESCAPE" | "ESC" => KeyCode::Escape,
        "TAB" => KeyCode::Tab,
        "BACK_SPACE" | "BACKSPACE" => KeyCode::Backspace,
        "DELETE" | "DEL" => KeyCode::Delete,
        "SPACE" => KeyCode::Space,

        "UP" => KeyCode::Up,
        "DOWN" => KeyCode::Down,
        "LEFT" => KeyCode::Left,
        "RIGHT" => KeyCode::Right,

        "HOME" => KeyCode::Home,
        "END" => KeyCode::End,
        "PAGE_UP" | "PAGEUP" => KeyCode::PageUp,
        "PAGE_DOWN" | "PAGEDOWN" => KeyCode::PageDown,
        "INSERT" => KeyCode::Insert,

        "COMMA" => KeyCode::Char(','),
        "MINUS" => KeyCode::Char('-'),
        "PERIOD" => KeyCode::Char('.'),
        "SLASH" => KeyCode::Char('/'),
        "SEMICOLON" => KeyCode::Char(';'),
        "EQUALS" => KeyCode::Char('='),
        "OPEN_BRACKET" => KeyCode::Char('['),
        "BACK_SLASH" => KeyCode::Char('\\'),
        "CLOSE_BRACKET" => KeyCode::Char(']'),

        "ADD" => KeyCode::NumpadAdd,
        "SUBTRACT" => KeyCode::NumpadSubtract,
        "MULTIPLY" => KeyCode::NumpadMultiply,
        "DIVIDE" => KeyCode::NumpadDivide,
        "DECIMAL" => KeyCode::NumpadDecimal,
        "NUMPAD_ENTER" => KeyCode::NumpadEnter,

        "SHIFT" => KeyCode::Shift,
        "CONTROL" | "CTRL" => KeyCode::Control,
        "ALT" => KeyCode::Alt,
        "META" => KeyCode::Meta,
        "COMMAND" => KeyCode::Command,
        "ALT_GRAPH" => KeyCode::AltGraph,
        "WINDOWS" => KeyCode::Windows,

        other => {
            if let Some(n) = other.strip_prefix("NUMPAD") {
                return match n.parse::<u8>() {
                    Ok(d @ 0..=9) => Ok(numpad_digit(d)),
                    _ => Err(TriggerError::InvalidKey(name.to_string())),
                };
            }
            if let Some(n) = other.strip_prefix('F') {
                return match n.parse::<u8>() {
                    Ok(n @ 1..=24) => Ok(KeyCode::F(n)),
                    _ => Err(TriggerError::InvalidKey(name.to_string())),
                };
            }
            return Err(TriggerError::InvalidKey(name.to_string()));
        }
    };
    Ok(key)
}

fn numpad_digit(d: u8) -> KeyCode {
    match d {
        0 => KeyCode::Numpad0,
        1 => KeyCode::Numpad1,
        2 => KeyCode::Numpad2,
        3 => KeyCode::Numpad3,
        4 => KeyCode::Numpad4,
        5 => KeyCode::Numpad5,
        6 => KeyCode::Numpad6,
        7 => KeyCode::Numpad7,
        8 => KeyCode::Numpad8,
        _ => KeyCode::Numpad9,
    }
}

/// Errors that can occur when parsing trigger descriptors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerError {
    Empty,
    InvalidKey(String),
    Conflict(String),
}

impl fmt::Display for TriggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerError::Empty => write!(f, "Empty trigger descriptor"),
            TriggerError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            TriggerError::Conflict(t) => write!(f, "Scroll trigger cannot require keys: {}", t),
        }
    }
}

impl std::error::Error for TriggerError {}
