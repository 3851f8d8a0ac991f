//! # State subscribers.
//!
//! This module provides the [`Subscribe`] trait and built-in implementations
//! for reacting to values published by a [`Subject`](crate::Subject).
//!
//! ## Architecture
//! ```text
//! Notification flow:
//!   host ── set_state(v) ──► Subject ──► Registry::for_each (head → tail)
//!                                              │
//!                                              ├──► Subscribe::on_notify(v)
//!                                              │         │
//!                                              │    ┌────┴─────┬──────────┬───────┐
//!                                              │    ▼          ▼          ▼       ▼
//!                                              │  Recorder  LogWriter  Custom  closures
//!                                              │
//!                                              └──► absent weak entries skipped, pruned
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers** - react to values (logging, display updates)
//! - **Stateful subscribers** - keep what they saw ([`Recorder`])

mod recorder;
mod subscribe;

#[cfg(feature = "logging")]
mod embedded;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
pub use recorder::Recorder;
pub use subscribe::Subscribe;
