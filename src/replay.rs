//! Headless replay of scripted input against recording behaviours
//!
//! A script declares windows, the behaviours each window registers (with
//! default triggers, optionally rebound), and a timeline of input events.
//! Every behaviour call is recorded, so the result reads like the console
//! output of an interactive session:
//!
//! ```text
//! main: drag1: init(5, 5)
//! main: drag1: drag(9, 5)
//! main: drag1: end(9, 5)
//! focus right
//! right: click1: click(40, 12)
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::arbitration::{KeyPressedManager, ReceiverId};
use crate::behaviour::{Behaviour, ClickBehaviour, DragBehaviour, ScrollBehaviour};
use crate::bindings::{resolve_entries, BindingEntry, Behaviours, ConfigError};
use crate::config::DispatchConfig;
use crate::dispatcher::MouseAndKeyHandler;
use crate::event::{InputEvent, KeyEvent, PointerEvent, ScrollEvent};
use crate::trigger::{parse_key_name, Buttons, KeyCode, Modifiers, MouseButton, TriggerError};

/// Root structure of a replay script
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: Option<DispatchConfig>,
    pub windows: Vec<WindowScript>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowScript {
    pub name: String,
    #[serde(default)]
    pub behaviours: Vec<BehaviourScript>,
    /// Rebinds behaviours, like a user bindings file
    #[serde(default)]
    pub bindings: Vec<BindingEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BehaviourScript {
    pub action: String,
    pub kind: BehaviourKind,
    /// Default triggers, each possibly holding `|` alternatives
    #[serde(default)]
    pub triggers: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviourKind {
    Click,
    Drag,
    Scroll,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptEvent {
    /// Defaults to the first window
    #[serde(default)]
    pub window: Option<String>,
    /// Milliseconds since the start of the replay
    #[serde(default)]
    pub at: u64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ScriptAction {
    Press {
        x: i32,
        y: i32,
        #[serde(default)]
        button: ScriptButton,
        #[serde(default = "single_click")]
        count: u32,
    },
    Drag {
        x: i32,
        y: i32,
    },
    Release {
        x: i32,
        y: i32,
        #[serde(default)]
        button: ScriptButton,
    },
    Click {
        x: i32,
        y: i32,
        #[serde(default)]
        button: ScriptButton,
        #[serde(default = "single_click")]
        count: u32,
    },
    Move {
        x: i32,
        y: i32,
    },
    Enter,
    Exit,
    Scroll {
        x: i32,
        y: i32,
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
    },
    KeyPress {
        key: String,
    },
    KeyRelease {
        key: String,
    },
}

fn single_click() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptButton {
    #[default]
    #[serde(alias = "left", alias = "primary")]
    Button1,
    #[serde(alias = "middle")]
    Button2,
    #[serde(alias = "right", alias = "secondary")]
    Button3,
}

impl From<ScriptButton> for MouseButton {
    fn from(button: ScriptButton) -> Self {
        match button {
            ScriptButton::Button1 => MouseButton::Primary,
            ScriptButton::Button2 => MouseButton::Middle,
            ScriptButton::Button3 => MouseButton::Secondary,
        }
    }
}

impl Script {
    pub fn from_yaml(yaml: &str) -> Result<Self, ReplayError> {
        serde_yaml::from_str(yaml).map_err(|e| ReplayError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ReplayError::Io(e.to_string()))?;
        Self::from_yaml(&content)
    }
}

/// One recorded behaviour call or focus request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceRecord {
    pub at: u64,
    pub window: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(flatten)]
    pub call: Call,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "kebab-case")]
pub enum Call {
    Init { x: i32, y: i32 },
    Drag { x: i32, y: i32 },
    End { x: i32, y: i32 },
    Click { x: i32, y: i32 },
    Scroll { amount: f64, horizontal: bool, x: i32, y: i32 },
    Focus,
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = self.action.as_deref().unwrap_or("");
        match &self.call {
            Call::Focus => write!(f, "focus {}", self.window),
            Call::Init { x, y } => write!(f, "{}: {}: init({}, {})", self.window, action, x, y),
            Call::Drag { x, y } => write!(f, "{}: {}: drag({}, {})", self.window, action, x, y),
            Call::End { x, y } => write!(f, "{}: {}: end({}, {})", self.window, action, x, y),
            Call::Click { x, y } => write!(f, "{}: {}: click({}, {})", self.window, action, x, y),
            Call::Scroll {
                amount,
                horizontal,
                x,
                y,
            } => write!(
                f,
                "{}: {}: scroll({}, {}, {}, {})",
                self.window, action, amount, horizontal, x, y
            ),
        }
    }
}

/// Shared sink the recording behaviours write into
#[derive(Clone, Default)]
struct Recorder {
    records: Rc<RefCell<Vec<TraceRecord>>>,
    clock: Rc<Cell<u64>>,
}

impl Recorder {
    fn record(&self, window: &str, action: Option<&str>, call: Call) {
        self.records.borrow_mut().push(TraceRecord {
            at: self.clock.get(),
            window: window.to_string(),
            action: action.map(str::to_string),
            call,
        });
    }
}

struct Recording {
    window: String,
    action: String,
    recorder: Recorder,
}

impl Recording {
    fn record(&self, call: Call) {
        self.recorder.record(&self.window, Some(&self.action), call);
    }
}

impl ClickBehaviour for Recording {
    fn click(&self, x: i32, y: i32) {
        self.record(Call::Click { x, y });
    }
}

impl DragBehaviour for Recording {
    fn init(&self, x: i32, y: i32) {
        self.record(Call::Init { x, y });
    }

    fn drag(&self, x: i32, y: i32) {
        self.record(Call::Drag { x, y });
    }

    fn end(&self, x: i32, y: i32) {
        self.record(Call::End { x, y });
    }
}

impl ScrollBehaviour for Recording {
    fn scroll(&self, amount: f64, is_horizontal: bool, x: i32, y: i32) {
        self.record(Call::Scroll {
            amount,
            horizontal: is_horizontal,
            x,
            y,
        });
    }
}

enum Target {
    Single(Box<MouseAndKeyHandler>),
    Managed {
        manager: KeyPressedManager,
        ids: Vec<ReceiverId>,
    },
}

/// A running replay session
pub struct Replay {
    names: Vec<String>,
    target: Target,
    recorder: Recorder,
    start: Instant,
    buttons: Buttons,
    modifiers: Modifiers,
}

impl Replay {
    /// Build one dispatcher per window
    ///
    /// A single window gets a plain dispatcher; several are registered with
    /// a coordinator whose focus requests are recorded.
    pub fn new(script: &Script) -> Result<Self, ReplayError> {
        if script.windows.is_empty() {
            return Err(ReplayError::NoWindows);
        }
        let config = script.config.clone().unwrap_or_default();
        let recorder = Recorder::default();

        let mut handlers = Vec::with_capacity(script.windows.len());
        for window in &script.windows {
            let behaviours = build_behaviours(window, &recorder)?;
            let mut handler = MouseAndKeyHandler::with_config(&config);
            behaviours.install(&mut handler);
            handlers.push(handler);
        }

        let names: Vec<String> = script.windows.iter().map(|w| w.name.clone()).collect();
        let target = if handlers.len() == 1 {
            match handlers.pop() {
                Some(handler) => Target::Single(Box::new(handler)),
                None => return Err(ReplayError::NoWindows),
            }
        } else {
            let mut manager = KeyPressedManager::new();
            let mut ids = Vec::with_capacity(handlers.len());
            for (handler, name) in handlers.into_iter().zip(&names) {
                let recorder = recorder.clone();
                let name = name.clone();
                ids.push(manager.register(handler, move || {
                    recorder.record(&name, None, Call::Focus);
                }));
            }
            Target::Managed { manager, ids }
        };

        tracing::debug!("Replay over {} window(s)", names.len());
        Ok(Self {
            names,
            target,
            recorder,
            start: Instant::now(),
            buttons: Buttons::NONE,
            modifiers: Modifiers::NONE,
        })
    }

    /// Feed one scripted event
    pub fn apply(&mut self, event: &ScriptEvent) -> Result<(), ReplayError> {
        let window = match &event.window {
            Some(name) => self
                .names
                .iter()
                .position(|n| n == name)
                .ok_or_else(|| ReplayError::UnknownWindow(name.clone()))?,
            None => 0,
        };
        let input = self.input_event(&event.action)?;
        let now = self.start + Duration::from_millis(event.at);
        self.recorder.clock.set(event.at);

        tracing::trace!("{} @{}ms -> {}", input.name(), event.at, self.names[window]);
        match &mut self.target {
            Target::Single(handler) => handler.handle_event_at(&input, now),
            Target::Managed { manager, ids } => manager.handle_event_at(ids[window], &input, now),
        }
        Ok(())
    }

    /// Records collected so far, oldest first
    pub fn take_records(&mut self) -> Vec<TraceRecord> {
        std::mem::take(&mut *self.recorder.records.borrow_mut())
    }

    /// Translate a scripted action, tracking held buttons and modifiers
    fn input_event(&mut self, action: &ScriptAction) -> Result<InputEvent, ReplayError> {
        let event = match action {
            ScriptAction::Press {
                x,
                y,
                button,
                count,
            } => {
                let button = MouseButton::from(*button);
                self.buttons = self.buttons.with(button);
                InputEvent::PointerPressed(self.pointer(*x, *y, Some(button), *count))
            }
            ScriptAction::Drag { x, y } => InputEvent::PointerDragged(self.pointer(*x, *y, None, 0)),
            ScriptAction::Release { x, y, button } => {
                let button = MouseButton::from(*button);
                self.buttons = self.buttons.without(button);
                InputEvent::PointerReleased(self.pointer(*x, *y, Some(button), 1))
            }
            ScriptAction::Click {
                x,
                y,
                button,
                count,
            } => InputEvent::PointerClicked(self.pointer(*x, *y, Some((*button).into()), *count)),
            ScriptAction::Move { x, y } => InputEvent::PointerMoved(self.pointer(*x, *y, None, 0)),
            ScriptAction::Enter => InputEvent::PointerEntered,
            ScriptAction::Exit => InputEvent::PointerExited,
            ScriptAction::Scroll { x, y, dx, dy } => InputEvent::Scroll(
                ScrollEvent::new(*x, *y, *dx, *dy).with_modifiers(self.modifiers),
            ),
            ScriptAction::KeyPress { key } => {
                let key = parse_script_key(key)?;
                if let Some(bit) = reported_modifier(key) {
                    self.modifiers = self.modifiers | bit;
                }
                InputEvent::KeyPressed(KeyEvent::new(key, self.modifiers))
            }
            ScriptAction::KeyRelease { key } => {
                let key = parse_script_key(key)?;
                if let Some(bit) = reported_modifier(key) {
                    self.modifiers = self.modifiers.without(bit);
                }
                InputEvent::KeyReleased(KeyEvent::new(key, self.modifiers))
            }
        };
        Ok(event)
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
}

/// Replay a whole script and return every record
pub fn run(script: &Script) -> Result<Vec<TraceRecord>, ReplayError> {
    let mut replay = Replay::new(script)?;
    for event in &script.events {
        replay.apply(event)?;
    }
    Ok(replay.take_records())
}

fn build_behaviours(window: &WindowScript, recorder: &Recorder) -> Result<Behaviours, ReplayError> {
    let overrides = resolve_entries(window.bindings.clone()).map_err(ReplayError::Bindings)?;
    let mut behaviours = Behaviours::new().with_config(&overrides);

    for script in &window.behaviours {
        let recording = Recording {
            window: window.name.clone(),
            action: script.action.clone(),
            recorder: recorder.clone(),
        };
        let behaviour = match script.kind {
            BehaviourKind::Click => Behaviour::click(recording),
            BehaviourKind::Drag => Behaviour::drag(recording),
            BehaviourKind::Scroll => Behaviour::scroll(recording),
        };
        let defaults: Vec<&str> = script.triggers.iter().map(String::as_str).collect();
        behaviours
            .named_behaviour(&script.action, behaviour, &defaults)
            .map_err(|source| ReplayError::Trigger {
                action: script.action.clone(),
                source,
            })?;
    }
    Ok(behaviours)
}

fn parse_script_key(name: &str) -> Result<KeyCode, ReplayError> {
    parse_key_name(name).map_err(|_| ReplayError::InvalidKey(name.to_string()))
}

/// Modifiers a toolkit reports with every event (AltGraph and Windows are
/// tracked by the dispatcher itself)
fn reported_modifier(key: KeyCode) -> Option<Modifiers> {
    match key {
        KeyCode::Shift | KeyCode::Control | KeyCode::Alt | KeyCode::Meta | KeyCode::Command => {
            key.modifier()
        }
        _ => None,
    }
}

/// Errors that can occur while loading or running a replay
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayError {
    Io(String),
    Parse(String),
    NoWindows,
    UnknownWindow(String),
    InvalidKey(String),
    Trigger { action: String, source: TriggerError },
    Bindings(ConfigError),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Io(e) => write!(f, "IO error: {}", e),
            ReplayError::Parse(e) => write!(f, "Parse error: {}", e),
            ReplayError::NoWindows => write!(f, "Script declares no windows"),
            ReplayError::UnknownWindow(w) => write!(f, "Unknown window: {}", w),
            ReplayError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            ReplayError::Trigger { action, source } => {
                write!(f, "Bad default trigger for '{}': {}", action, source)
            }
            ReplayError::Bindings(e) => write!(f, "Bad bindings: {}", e),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Trigger { source, .. } => Some(source),
            ReplayError::Bindings(e) => Some(e),
            _ => None,
        }
    }
}
