//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use gesture_dispatch::event::{InputEvent, KeyEvent, PointerEvent, ScrollEvent};
use gesture_dispatch::trigger::{parse_key_name, Buttons, KeyCode, Modifiers, MouseButton};
use gesture_dispatch::{
    Behaviour, Behaviours, ClickBehaviour, DragBehaviour, MouseAndKeyHandler, ScrollBehaviour,
};

/// Lines like `"drag1: init(3, 4)"`, in call order
pub type Log = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn take(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}

/// Behaviour that logs every call under its name
pub struct Recording {
    name: String,
    log: Log,
}

impl Recording {
    pub fn new(name: &str, log: &Log) -> Self {
        Self {
            name: name.to_string(),
            log: Rc::clone(log),
        }
    }

    fn push(&self, line: String) {
        self.log.borrow_mut().push(format!("{}: {}", self.name, line));
    }
}

impl ClickBehaviour for Recording {
    fn click(&self, x: i32, y: i32) {
        self.push(format!("click({}, {})", x, y));
    }
}

impl DragBehaviour for Recording {
    fn init(&self, x: i32, y: i32) {
        self.push(format!("init({}, {})", x, y));
    }

    fn drag(&self, x: i32, y: i32) {
        self.push(format!("drag({}, {})", x, y));
    }

    fn end(&self, x: i32, y: i32) {
        self.push(format!("end({}, {})", x, y));
    }
}

impl ScrollBehaviour for Recording {
    fn scroll(&self, amount: f64, is_horizontal: bool, x: i32, y: i32) {
        self.push(format!("scroll({}, {}, {}, {})", amount, is_horizontal, x, y));
    }
}

pub fn click(name: &str, log: &Log) -> Behaviour {
    Behaviour::click(Recording::new(name, log))
}

pub fn drag(name: &str, log: &Log) -> Behaviour {
    Behaviour::drag(Recording::new(name, log))
}

pub fn scroll(name: &str, log: &Log) -> Behaviour {
    Behaviour::scroll(Recording::new(name, log))
}

/// A dispatcher wired to recording behaviours, with a simulated toolkit
/// that tracks held buttons and modifiers the way a real one reports them
pub struct Harness {
    pub handler: MouseAndKeyHandler,
    pub behaviours: Behaviours,
    pub log: Log,
    pub start: Instant,
    pub buttons: Buttons,
    pub modifiers: Modifiers,
}

impl Harness {
    pub fn new() -> Self {
        let behaviours = Behaviours::new();
        let mut handler = MouseAndKeyHandler::new();
        behaviours.install(&mut handler);
        Self {
            handler,
            behaviours,
            log: new_log(),
            start: Instant::now(),
            buttons: Buttons::NONE,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn click_behaviour(&mut self, name: &str, triggers: &[&str]) -> &mut Self {
        let behaviour = click(name, &self.log);
        self.behaviours
            .named_behaviour(name, behaviour, triggers)
            .unwrap();
        self
    }

    pub fn drag_behaviour(&mut self, name: &str, triggers: &[&str]) -> &mut Self {
        let behaviour = drag(name, &self.log);
        self.behaviours
            .named_behaviour(name, behaviour, triggers)
            .unwrap();
        self
    }

    pub fn scroll_behaviour(&mut self, name: &str, triggers: &[&str]) -> &mut Self {
        let behaviour = scroll(name, &self.log);
        self.behaviours
            .named_behaviour(name, behaviour, triggers)
            .unwrap();
        self
    }

    pub fn take_log(&self) -> Vec<String> {
        take(&self.log)
    }

    fn send(&mut self, event: InputEvent, at_ms: u64) {
        let now = self.start + Duration::from_millis(at_ms);
        self.handler.handle_event_at(&event, now);
    }

    fn pointer(&self, x: i32, y: i32, button: Option<MouseButton>, count: u32) -> PointerEvent {
        PointerEvent {
            x,
            y,
            modifiers: self.modifiers,
            buttons: self.buttons,
            button,
            click_count: count,
        }
    }

    pub fn press(&mut self, button: MouseButton, x: i32, y: i32) {
        self.press_n(button, x, y, 1);
    }

    pub fn press_n(&mut self, button: MouseButton, x: i32, y: i32, count: u32) {
        self.buttons = self.buttons.with(button);
        let event = InputEvent::PointerPressed(self.pointer(x, y, Some(button), count));
        self.send(event, 0);
    }

    pub fn drag_to(&mut self, x: i32, y: i32) {
        let event = InputEvent::PointerDragged(self.pointer(x, y, None, 0));
        self.send(event, 0);
    }

    pub fn release(&mut self, button: MouseButton, x: i32, y: i32) {
        self.buttons = self.buttons.without(button);
        let event = InputEvent::PointerReleased(self.pointer(x, y, Some(button), 1));
        self.send(event, 0);
    }

    pub fn click(&mut self, button: MouseButton, x: i32, y: i32, count: u32) {
        let event = InputEvent::PointerClicked(self.pointer(x, y, Some(button), count));
        self.send(event, 0);
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        let event = InputEvent::PointerMoved(self.pointer(x, y, None, 0));
        self.send(event, 0);
    }

    pub fn scroll(&mut self, x: i32, y: i32, dx: f64, dy: f64) {
        let event =
            InputEvent::Scroll(ScrollEvent::new(x, y, dx, dy).with_modifiers(self.modifiers));
        self.send(event, 0);
    }

    pub fn key_down(&mut self, key: &str, at_ms: u64) {
        let event = InputEvent::KeyPressed(key_event(key, &mut self.modifiers, true));
        self.send(event, at_ms);
    }

    pub fn key_up(&mut self, key: &str) {
        let event = InputEvent::KeyReleased(key_event(key, &mut self.modifiers, false));
        self.send(event, 0);
    }

    /// Press and release a key at `at_ms`
    pub fn tap(&mut self, key: &str, at_ms: u64) {
        self.key_down(key, at_ms);
        self.key_up(key);
    }
}

/// Build a key event, updating the toolkit-reported modifiers first
pub fn key_event(key: &str, modifiers: &mut Modifiers, pressed: bool) -> KeyEvent {
    let key = parse_key_name(key).unwrap();
    let reported = match key {
        KeyCode::Shift | KeyCode::Control | KeyCode::Alt | KeyCode::Meta => key.modifier(),
        _ => None,
    };
    if let Some(bit) = reported {
        *modifiers = if pressed {
            *modifiers | bit
        } else {
            modifiers.without(bit)
        };
    }
    KeyEvent::new(key, *modifiers)
}
