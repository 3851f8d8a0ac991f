//! # Host actions
//!
//! An [`Action`] is one discrete host event (a key press, a button, a timer
//! tick) already mapped to its meaning. Mapping raw input to actions is the
//! host's concern.

use crate::State;

/// A discrete change requested by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Add one to the current value.
    Increment,
    /// Subtract one from the current value.
    Decrement,
    /// Return to zero.
    Reset,
}

impl Action {
    /// Value that follows `current` under this action.
    ///
    /// Arithmetic saturates at the bounds of [`State`].
    #[must_use]
    pub fn apply(self, current: State) -> State {
        match self {
            Action::Increment => current.saturating_add(1),
            Action::Decrement => current.saturating_sub(1),
            Action::Reset => 0,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(self) -> &'static str {
        match self {
            Action::Increment => "increment",
            Action::Decrement => "decrement",
            Action::Reset => "reset",
        }
    }
}
