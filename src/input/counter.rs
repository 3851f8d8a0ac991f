//! # Counter: turns host actions into published values.
//!
//! ```text
//! host event ─► Action ─► Counter::apply ─► Subject::set_state(next) ─► subscribers
//! ```
//!
//! The counter keeps its own running value; the subject only ever sees the
//! results. A subscriber that calls `set_state` itself changes the subject's
//! state but not the counter, exactly as an independent publisher would.

use std::fmt;

use tracing::debug;

use crate::core::Subject;
use crate::input::Action;
use crate::registry::Link;
use crate::State;

/// Drives a [`Subject`] from a stream of [`Action`]s.
pub struct Counter<L: Link> {
    subject: Subject<L>,
    value: State,
}

impl<L: Link> Counter<L> {
    /// Creates a counter starting at `start`. Nothing is published until the
    /// first action.
    pub fn new(subject: Subject<L>, start: State) -> Self {
        Self {
            subject,
            value: start,
        }
    }

    /// Applies `action`, publishes the new value and returns it.
    pub fn apply(&mut self, action: Action) -> State {
        self.value = action.apply(self.value);
        debug!(target: "statecast", action = action.as_label(), value = self.value, "counter action");
        self.subject.set_state(self.value);
        self.value
    }

    /// Current counter value.
    #[must_use]
    pub fn value(&self) -> State {
        self.value
    }

    /// The subject this counter publishes to.
    #[must_use]
    pub fn subject(&self) -> &Subject<L> {
        &self.subject
    }
}

impl<L: Link> fmt::Debug for Counter<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Counter")
            .field("value", &self.value)
            .field("subject", &self.subject)
            .finish()
    }
}
