//! # statecast
//!
//! **Statecast** is a small subject/observer notification engine for Rust.
//!
//! A [`Subject`] holds one integer [`State`] and an ordered registry of
//! subscribers. Every [`Subject::set_state`] stores the value and calls each
//! live subscriber synchronously, newest registration first. Subscriber
//! lifetime is decoupled from subject lifetime: the registry either holds weak
//! references ([`SharedSubject`]) or owns its subscribers until a revocation
//! [`Token`] is exercised ([`OwnedSubject`]). A registry entry can never point
//! at freed storage.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!      host input (key press, timer, ...)
//!                  │
//!                  ▼
//!        ┌──────────────────┐
//!        │  Action/Counter  │  Increment / Decrement / Reset
//!        └────────┬─────────┘
//!                 │ set_state(v)
//!                 ▼
//! ┌───────────────────────────────────────────────────────┐
//! │  Subject (state: State, registry: Registry<L>)        │
//! │  - Config (duplicate policy, initial state, pruning)  │
//! │  - notify pass captures value + successor links       │
//! └───────────────────────┬───────────────────────────────┘
//!                         ▼
//!   head ─► [node C] ─► [node B] ─► [node A] ─► None
//!              │           │           │
//!              ▼           ▼           ▼
//!         C.on_notify  B.on_notify  A.on_notify
//! ```
//!
//! ### Notification pass
//! ```text
//! set_state(v):
//!   state = v
//!   notify_observers():
//!     value = state                 (captured once per pass)
//!     for node in head..tail:
//!       next = node.next            (captured before the callback)
//!       ├─ detached?  ─► skip
//!       ├─ absent?    ─► skip, prune after the pass
//!       └─ live       ─► sub.on_notify(value)   (may add/remove/set_state)
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                          |
//! |-------------------|--------------------------------------------------------------|---------------------------------------------|
//! | **Subscriber API**| React to state changes.                                      | [`Subscribe`], [`Recorder`]                 |
//! | **Subjects**      | Hold the state and drive notification.                       | [`Subject`], [`SharedSubject`], [`OwnedSubject`] |
//! | **Registry**      | Intrusive list with safe removal during traversal.           | [`Link`], [`SubscriberId`], [`Token`]       |
//! | **Errors**        | Typed errors for policy refusals.                            | [`SubjectError`]                            |
//! | **Input**         | Translate host actions into published values.                | [`Action`], [`Counter`]                     |
//! | **Configuration** | Duplicate policy, initial state, pruning.                    | [`Config`], [`DuplicatePolicy`]             |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogWriter` _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::rc::Rc;
//! use statecast::{Action, Config, Counter, Recorder, SharedSubject};
//!
//! let subject = SharedSubject::builder(Config::default()).build();
//!
//! let health = Rc::new(Recorder::named("health"));
//! let score = Rc::new(|v: statecast::State| assert!(v >= 0));
//! subject.add_observer(health.clone()).unwrap();
//! subject.add_observer(score.clone()).unwrap();
//!
//! let mut counter = Counter::new(subject.clone(), 100);
//! counter.apply(Action::Increment);
//! counter.apply(Action::Reset);
//!
//! assert_eq!(health.snapshot(), vec![101, 0]);
//! assert_eq!(subject.state(), 0);
//! ```
#![forbid(unsafe_code)]

mod config;
mod core;
mod error;
mod input;
mod registry;
mod subscribers;

/// The single value a subject broadcasts.
pub type State = i64;

// ---- Public re-exports ----

pub use config::{Config, DuplicatePolicy};
pub use crate::core::{OwnedSubject, SharedSubject, Subject, SubjectBuilder, WeakSubject};
pub use error::SubjectError;
pub use input::{Action, Counter};
pub use registry::{Link, Owned, Shared, SubscriberId, Token};
pub use subscribers::{Recorder, Subscribe};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
