//! # Registry - intrusive singly-linked list of subscriber links.
//!
//! The registry holds only a head pointer. Each node owns the next (older) node,
//! so `next` always points toward the tail and the list cannot form a cycle.
//!
//! ## Traversal
//! ```text
//! head ─► [C] ─► [B] ─► [A] ─► None        (A, B, C added in that order)
//!
//! for_each:
//!   cursor = head
//!   loop {
//!     node = cursor
//!     cursor = node.next            ◄── captured BEFORE the callback
//!     skip if node.detached
//!     callback(node.subscriber)     ◄── may add/remove anything, may recurse
//!   }
//! ```
//!
//! ## Rules
//! - `add` inserts at the head: newest first.
//! - `remove` repoints the predecessor and marks the node detached. The
//!   detached node keeps its own `next`, so a traversal parked on it still
//!   reaches the rest of the list.
//! - Nodes added during a traversal sit in front of the cursor and are not
//!   visited by that traversal.
//! - No `RefCell` borrow is held while a callback runs.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use super::link::{Link, SubscriberId};
use crate::subscribers::Subscribe;

type NodeRef<L> = Rc<Node<L>>;

struct Node<L> {
    link: L,
    next: RefCell<Option<NodeRef<L>>>,
    detached: Cell<bool>,
}

/// Walks nodes from a starting point, reading each successor before yielding.
struct Cursor<L> {
    next: Option<NodeRef<L>>,
}

impl<L> Iterator for Cursor<L> {
    type Item = NodeRef<L>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next.take()?;
        self.next = node.next.borrow().clone();
        Some(node)
    }
}

/// Outcome of one [`Registry::for_each`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Pass {
    /// Live subscribers handed to the callback.
    pub visited: usize,
    /// Entries skipped because their subscriber no longer exists.
    pub absent: usize,
}

/// Ordered collection of subscriber links.
pub(crate) struct Registry<L: Link> {
    head: RefCell<Option<NodeRef<L>>>,
    len: Cell<usize>,
}

impl<L: Link> Registry<L> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            head: RefCell::new(None),
            len: Cell::new(0),
        }
    }

    /// Number of linked entries (including absent ones not yet pruned).
    #[must_use]
    pub fn len(&self) -> usize {
        self.len.get()
    }

    /// True if no entry is linked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len.get() == 0
    }

    /// Inserts `link` as the new head. O(1).
    pub fn add(&self, link: L) {
        let old_head = self.head.borrow_mut().take();
        trace!(target: "statecast", subscriber = link.name(), "registry add");
        let node = Rc::new(Node {
            link,
            next: RefCell::new(old_head),
            detached: Cell::new(false),
        });
        *self.head.borrow_mut() = Some(node);
        self.len.set(self.len.get() + 1);
    }

    /// Unlinks the first entry (from the head) matching `key`. O(n).
    ///
    /// Returns `false` if nothing matched; that is not an error.
    pub fn remove(&self, key: L::Key) -> bool {
        let mut prev: Option<NodeRef<L>> = None;
        for node in self.cursor() {
            if node.link.matches(key) {
                trace!(target: "statecast", subscriber = node.link.name(), "registry remove");
                self.unlink(prev.as_ref(), &node);
                return true;
            }
            prev = Some(node);
        }
        false
    }

    /// True if some linked entry refers to the subscriber `id`.
    #[must_use]
    pub fn contains(&self, id: SubscriberId) -> bool {
        self.cursor().any(|node| node.link.id() == id)
    }

    /// Names of linked entries, head to tail.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.cursor().map(|node| node.link.name()).collect()
    }

    /// Invokes `f` for every live subscriber, head to tail.
    ///
    /// The callback may add or remove entries (itself included) and may start
    /// a nested traversal; the successor of each node is read before the
    /// callback runs, and entries detached meanwhile are skipped when reached.
    pub fn for_each<F>(&self, mut f: F) -> Pass
    where
        F: FnMut(&Rc<dyn Subscribe>),
    {
        let mut pass = Pass::default();
        for node in self.cursor() {
            if node.detached.get() {
                continue;
            }
            match node.link.resolve() {
                Some(sub) => {
                    pass.visited += 1;
                    f(&sub);
                }
                None => pass.absent += 1,
            }
        }
        pass
    }

    /// Unlinks every entry whose subscriber no longer exists.
    ///
    /// Returns the number of entries removed.
    pub fn prune(&self) -> usize {
        let mut prev: Option<NodeRef<L>> = None;
        let mut pruned = 0;
        for node in self.cursor() {
            if node.link.is_live() {
                prev = Some(node);
            } else {
                self.unlink(prev.as_ref(), &node);
                pruned += 1;
            }
        }
        if pruned > 0 {
            debug!(target: "statecast", pruned, remaining = self.len(), "pruned absent subscribers");
        }
        pruned
    }

    fn cursor(&self) -> Cursor<L> {
        Cursor {
            next: self.head.borrow().clone(),
        }
    }

    fn unlink(&self, prev: Option<&NodeRef<L>>, node: &NodeRef<L>) {
        let next = node.next.borrow().clone();
        match prev {
            None => *self.head.borrow_mut() = next,
            Some(p) => *p.next.borrow_mut() = next,
        }
        node.detached.set(true);
        self.len.set(self.len.get() - 1);
    }
}

impl<L: Link> Default for Registry<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Link> fmt::Debug for Registry<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("len", &self.len())
            .field("names", &self.names())
            .finish()
    }
}

// Release nodes one at a time; the default recursive drop of a long
// `Rc` chain can exhaust the stack.
impl<L: Link> Drop for Registry<L> {
    fn drop(&mut self) {
        let mut cur = self.head.get_mut().take();
        while let Some(node) = cur {
            cur = match Rc::try_unwrap(node) {
                Ok(node) => node.next.into_inner(),
                Err(_) => None,
            };
        }
    }
}
