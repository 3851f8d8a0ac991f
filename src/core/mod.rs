//! Subject core: state, notification passes and construction.
//!
//! The public API from this module is [`Subject`] (with its regime aliases
//! [`SharedSubject`] and [`OwnedSubject`]), [`WeakSubject`] and
//! [`SubjectBuilder`].
//!
//! Internal modules:
//! - [`subject`]: state storage, registration and re-entrant notification;
//! - [`builder`]: configuration-driven construction.

mod builder;
mod subject;

pub use builder::SubjectBuilder;
pub use subject::{OwnedSubject, SharedSubject, Subject, WeakSubject};
