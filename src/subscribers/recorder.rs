//! # Recorder – stateful subscriber that keeps every value it was handed
//!
//! Maintains an in-memory history of notified values. Useful for hosts that
//! render "last N values" and for asserting notification order in tests.
//!
//! ## Internal scheme
//! ```text
//! on_notify(v):
//!   └─ history.push(v)
//!
//! snapshot() -> Vec<State>  (copy, oldest first)
//! last()     -> Option<State>
//! ```

use std::cell::RefCell;

use crate::subscribers::Subscribe;
use crate::State;

/// Records the values it receives, oldest first.
#[derive(Debug, Default)]
pub struct Recorder {
    name: Option<&'static str>,
    history: RefCell<Vec<State>>,
}

impl Recorder {
    /// Creates a new, empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recorder that reports `name` in logs.
    #[must_use]
    pub fn named(name: &'static str) -> Self {
        Self {
            name: Some(name),
            history: RefCell::new(Vec::new()),
        }
    }

    /// Returns a copy of every recorded value, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<State> {
        self.history.borrow().clone()
    }

    /// Most recently recorded value.
    #[must_use]
    pub fn last(&self) -> Option<State> {
        self.history.borrow().last().copied()
    }

    /// Number of notifications received.
    #[must_use]
    pub fn count(&self) -> usize {
        self.history.borrow().len()
    }

    /// Forgets the recorded history.
    pub fn clear(&self) {
        self.history.borrow_mut().clear();
    }
}

impl Subscribe for Recorder {
    fn on_notify(&self, value: State) {
        self.history.borrow_mut().push(value);
    }

    fn name(&self) -> &'static str {
        self.name.unwrap_or("Recorder")
    }
}
