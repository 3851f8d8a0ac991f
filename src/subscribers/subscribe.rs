//! # Core subscriber trait
//!
//! `Subscribe` is the single capability a collaborator implements to receive
//! state changes from a [`Subject`](crate::Subject).
//!
//! ## Contract
//! - `on_notify` runs synchronously on the caller's thread, inside
//!   `set_state`/`notify_observers`. A slow subscriber delays the ones after it.
//! - Subscribers only read the value they are given. A subscriber that wants to
//!   publish a new value calls `set_state` on the subject (re-entrant
//!   notification); the nested pass finishes before the outer pass resumes.
//! - Subscribers may register or remove observers (including themselves) from
//!   inside `on_notify`.
//!
//! ## Example
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use statecast::{SharedSubject, Subscribe, State};
//!
//! struct Hud {
//!     shown: Cell<State>,
//! }
//!
//! impl Subscribe for Hud {
//!     fn on_notify(&self, value: State) {
//!         self.shown.set(value);
//!     }
//!     fn name(&self) -> &'static str { "hud" }
//! }
//!
//! let subject = SharedSubject::new();
//! let hud = Rc::new(Hud { shown: Cell::new(0) });
//! subject.add_observer(hud.clone()).unwrap();
//! subject.set_state(7);
//! assert_eq!(hud.shown.get(), 7);
//! ```

use crate::State;

/// Contract for state subscribers.
///
/// Identity is the address of the subscriber's `Rc` allocation: the same value
/// registered twice is the same subscriber, two equal values are not.
pub trait Subscribe {
    /// Handle a state change.
    ///
    /// # Parameters
    /// - `value`: the state captured when the current notification pass began
    fn on_notify(&self, value: State);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<F> Subscribe for F
where
    F: Fn(State),
{
    fn on_notify(&self, value: State) {
        self(value)
    }

    fn name(&self) -> &'static str {
        "closure"
    }
}
