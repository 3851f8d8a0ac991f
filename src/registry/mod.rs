//! Subscriber registry: the ordered set of currently registered subscribers.
//!
//! - [`list`]: the intrusive singly-linked [`Registry`] and its traversal;
//! - [`link`]: how a node refers to its subscriber ([`Shared`] or [`Owned`]).

mod link;
mod list;

pub use link::{Link, Owned, Shared, SubscriberId, Token};
pub(crate) use list::Registry;
