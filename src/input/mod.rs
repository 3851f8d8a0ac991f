//! Host input boundary: discrete actions and the counter that publishes them.

mod action;
mod counter;

pub use action::Action;
pub use counter::Counter;
