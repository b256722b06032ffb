//! Behaviour capabilities invoked by the dispatcher
//!
//! Behaviours are shared handles: the same behaviour can be bound to several
//! triggers and sit in an active-gesture list at the same time, so the
//! callbacks take `&self` and implementations keep their own state in cells.

use std::fmt;
use std::rc::Rc;

/// Fires once per matching click or key press
pub trait ClickBehaviour {
    fn click(&self, x: i32, y: i32);
}

/// A gesture spanning `init`, any number of `drag`s, then `end`
pub trait DragBehaviour {
    fn init(&self, x: i32, y: i32);
    fn drag(&self, x: i32, y: i32);
    fn end(&self, x: i32, y: i32);
}

/// Fires for each matching scroll event
pub trait ScrollBehaviour {
    /// `amount` is the dominant wheel delta; `is_horizontal` says which axis
    fn scroll(&self, amount: f64, is_horizontal: bool, x: i32, y: i32);
}

impl<F: Fn(i32, i32)> ClickBehaviour for F {
    fn click(&self, x: i32, y: i32) {
        self(x, y)
    }
}

impl<F: Fn(f64, bool, i32, i32)> ScrollBehaviour for F {
    fn scroll(&self, amount: f64, is_horizontal: bool, x: i32, y: i32) {
        self(amount, is_horizontal, x, y)
    }
}

/// A behaviour registered under an action name
#[derive(Clone)]
pub enum Behaviour {
    Click(Rc<dyn ClickBehaviour>),
    Drag(Rc<dyn DragBehaviour>),
    Scroll(Rc<dyn ScrollBehaviour>),
}

impl Behaviour {
    pub fn click(behaviour: impl ClickBehaviour + 'static) -> Self {
        Behaviour::Click(Rc::new(behaviour))
    }

    pub fn drag(behaviour: impl DragBehaviour + 'static) -> Self {
        Behaviour::Drag(Rc::new(behaviour))
    }

    pub fn scroll(behaviour: impl ScrollBehaviour + 'static) -> Self {
        Behaviour::Scroll(Rc::new(behaviour))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Behaviour::Click(_) => "click",
            Behaviour::Drag(_) => "drag",
            Behaviour::Scroll(_) => "scroll",
        }
    }
}

impl fmt::Debug for Behaviour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Behaviour::{}", self.kind_name())
    }
}

/// Identity of a shared behaviour handle (data pointer, vtable ignored)
pub(crate) fn same_handle<T: ?Sized>(a: &Rc<T>, b: &Rc<T>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
