//! What happens when an option occurs on the command line.
//!
//! Every registered option carries one [`Action`]. The parse engine hands it
//! the raw value string (empty when the option got no value) and the action
//! validates it and writes the result into the caller's bound variable.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::Rejection;

/// Callback for options registered through the raw builders.
pub type Callback = Box<dyn Fn(&str) -> std::result::Result<(), String>>;

// ============================================================================
// Bound variables
// ============================================================================

/// A boolean cell written by the parser, read by the caller.
#[derive(Clone, Default)]
pub struct BoolVar(Rc<Cell<bool>>);

impl BoolVar {
    pub fn new(initial: bool) -> Self {
        BoolVar(Rc::new(Cell::new(initial)))
    }

    pub fn get(&self) -> bool {
        self.0.get()
    }

    fn set(&self, v: bool) {
        self.0.set(v);
    }
}

impl fmt::Debug for BoolVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoolVar({})", self.get())
    }
}

/// A string cell written by the parser, read by the caller.
#[derive(Clone, Default)]
pub struct StringVar(Rc<RefCell<String>>);

impl StringVar {
    pub fn new(initial: &str) -> Self {
        StringVar(Rc::new(RefCell::new(initial.to_string())))
    }

    pub fn get(&self) -> String {
        self.0.borrow().clone()
    }

    fn set(&self, v: &str) {
        *self.0.borrow_mut() = v.to_string();
    }
}

impl fmt::Debug for StringVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringVar({:?})", self.0.borrow())
    }
}

/// A growing list of strings, one entry per occurrence of the option.
#[derive(Clone, Default)]
pub struct StringsVar(Rc<RefCell<Vec<String>>>);

impl StringsVar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub(crate) fn push(&self, v: &str) {
        self.0.borrow_mut().push(v.to_string());
    }
}

impl fmt::Debug for StringsVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringsVar({:?})", self.0.borrow())
    }
}

// ============================================================================
// Action
// ============================================================================

pub enum Action {
    /// Store a constant; rejects any value (one half of a yes/no pair).
    Set { var: BoolVar, value: bool },
    /// Parse a textual boolean.
    ParseBool(BoolVar),
    /// Store the raw string verbatim.
    Store(StringVar),
    /// Store the raw string if it is one of `choices`.
    Choose { var: StringVar, choices: Vec<String> },
    /// Append the raw string.
    Append(StringsVar),
    /// No-value callback.
    Trigger(Callback),
    /// Value callback.
    Call(Callback),
    /// Value callback that substitutes `default` for an empty value.
    CallOr { default: String, callback: Callback },
    /// Print usage and stop; handled by the parse engine.
    Help,
}

impl Action {
    /// Validate `raw` and apply it to the bound variable.
    pub fn apply(&self, raw: &str) -> std::result::Result<(), Rejection> {
        match self {
            Action::Set { var, value } => {
                if !raw.is_empty() {
                    return Err(Rejection::UnexpectedArgument(raw.to_string()));
                }
                var.set(*value);
            }
            Action::ParseBool(var) => match raw {
                "true" | "True" | "yes" | "" => var.set(true),
                "false" | "False" | "no" => var.set(false),
                _ => return Err(Rejection::BadBoolean(raw.to_string())),
            },
            Action::Store(var) => var.set(raw),
            Action::Choose { var, choices } => {
                if !choices.iter().any(|c| c == raw) {
                    return Err(Rejection::InvalidChoice(raw.to_string()));
                }
                var.set(raw);
            }
            Action::Append(var) => var.push(raw),
            Action::Trigger(callback) => {
                if !raw.is_empty() {
                    return Err(Rejection::UnexpectedArgument(raw.to_string()));
                }
                callback("").map_err(Rejection::Custom)?;
            }
            Action::Call(callback) => callback(raw).map_err(Rejection::Custom)?,
            Action::CallOr { default, callback } => {
                let v = if raw.is_empty() { default.as_str() } else { raw };
                callback(v).map_err(Rejection::Custom)?;
            }
            Action::Help => {}
        }
        Ok(())
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Set { value, .. } => write!(f, "Set({})", value),
            Action::ParseBool(_) => write!(f, "ParseBool"),
            Action::Store(_) => write!(f, "Store"),
            Action::Choose { choices, .. } => write!(f, "Choose({:?})", choices),
            Action::Append(_) => write!(f, "Append"),
            Action::Trigger(_) => write!(f, "Trigger"),
            Action::Call(_) => write!(f, "Call"),
            Action::CallOr { default, .. } => write!(f, "CallOr({:?})", default),
            Action::Help => write!(f, "Help"),
        }
    }
}
