//! # Subject: holds the broadcast value and drives notification.
//!
//! A [`Subject`] owns a subscriber registry and a single [`State`] value. Every
//! [`set_state`](Subject::set_state) stores the value and runs one notification
//! pass over the registry, head to tail (most recently added subscriber first).
//!
//! ## Ownership regimes
//! The link type picks how the registry refers to subscribers:
//! - [`SharedSubject`] (`Subject<Shared>`): weak references. A subscriber dropped
//!   by its owner is skipped and pruned, never called.
//! - [`OwnedSubject`] (`Subject<Owned>`): the registry keeps subscribers alive
//!   until the [`Token`] returned by registration is exercised.
//!
//! ## Re-entrancy
//! ```text
//! set_state(1)                        state = 1
//!   pass#1 (value = 1)
//!     A.on_notify(1) ── set_state(2)  state = 2
//!                         pass#2 (value = 2)
//!                           A.on_notify(2)
//!                           B.on_notify(2)
//!                         pass#2 done
//!     B.on_notify(1)                  ◄── pass#1 keeps the value it started with
//!   pass#1 done
//! ```
//! Each pass captures its value when it starts and reads every successor link
//! before invoking the callback, so a nested pass cannot corrupt or redirect
//! the outer one.
//!
//! ## Example
//! ```rust
//! use std::rc::Rc;
//! use statecast::{Recorder, SharedSubject};
//!
//! let subject = SharedSubject::new();
//! let a = Rc::new(Recorder::named("a"));
//! let b = Rc::new(Recorder::named("b"));
//! subject.add_observer(a.clone()).unwrap();
//! subject.add_observer(b.clone()).unwrap();
//!
//! subject.set_state(5);
//! subject.remove_observer(&*a);
//! subject.set_state(6);
//!
//! assert_eq!(a.snapshot(), vec![5]);
//! assert_eq!(b.snapshot(), vec![5, 6]);
//! assert_eq!(subject.state(), 6);
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{trace, warn};

use crate::config::Config;
use crate::core::builder::SubjectBuilder;
use crate::error::SubjectError;
use crate::registry::{Link, Owned, Registry, Shared, SubscriberId, Token};
use crate::subscribers::Subscribe;
use crate::State;

/// Subject whose registry holds weak references to subscribers.
pub type SharedSubject = Subject<Shared>;

/// Subject whose registry owns its subscribers until their token is revoked.
pub type OwnedSubject = Subject<Owned>;

struct Inner<L: Link> {
    state: Cell<State>,
    registry: Registry<L>,
    cfg: Config,
    /// Nesting level of notification passes currently on the stack.
    depth: Cell<usize>,
}

/// Restores the pass depth even if a subscriber panics.
struct DepthGuard<'a>(&'a Cell<usize>);

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

/// Handle to a subject.
///
/// Cloning a `Subject` creates a new handle to the **same** state and registry.
/// Subscribers that need to call back into their subject should keep a
/// [`WeakSubject`] to avoid reference cycles.
///
/// The registry itself is not exposed; every registration goes through
/// `add_observer` and its duplicate policy.
///
/// ```compile_fail
/// let subject = statecast::SharedSubject::new();
/// let _ = subject.registry();
/// ```
pub struct Subject<L: Link> {
    inner: Rc<Inner<L>>,
}

impl<L: Link> Clone for Subject<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<L: Link> Subject<L> {
    /// Creates a subject with [`Config::default`]: state `0`, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a subject from `cfg`.
    #[must_use]
    pub fn with_config(cfg: Config) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: Cell::new(cfg.initial_state),
                registry: Registry::new(),
                cfg,
                depth: Cell::new(0),
            }),
        }
    }

    /// Returns a builder seeded with `cfg`.
    #[must_use]
    pub fn builder(cfg: Config) -> SubjectBuilder<L> {
        SubjectBuilder::new(cfg)
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> State {
        self.inner.state.get()
    }

    /// Stores `value` and notifies every live subscriber.
    ///
    /// This is the only way the state changes.
    pub fn set_state(&self, value: State) {
        self.inner.state.set(value);
        self.notify_observers();
    }

    /// Runs one notification pass with the current state.
    ///
    /// Subscribers are called head to tail. Every subscriber in this pass sees
    /// the value current when the pass began, even if a nested `set_state`
    /// changed it meanwhile.
    pub fn notify_observers(&self) {
        let inner = &self.inner;
        let value = inner.state.get();
        let depth = inner.depth.get() + 1;
        inner.depth.set(depth);
        let _guard = DepthGuard(&inner.depth);

        trace!(
            target: "statecast",
            value,
            depth,
            subscribers = inner.registry.len(),
            "notify pass"
        );

        let pass = inner.registry.for_each(|sub| sub.on_notify(value));
        trace!(
            target: "statecast",
            depth,
            visited = pass.visited,
            absent = pass.absent,
            "notify pass done"
        );

        if pass.absent > 0 && inner.cfg.prune_dead {
            inner.registry.prune();
        }
    }

    /// Unlinks every entry whose subscriber no longer exists.
    ///
    /// Passes do this on their own unless [`Config::prune_dead`] is off.
    /// Returns the number of entries removed; always `0` for owned subjects.
    pub fn prune(&self) -> usize {
        self.inner.registry.prune()
    }

    /// Number of registered entries (absent weak entries count until pruned).
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.registry.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.registry.is_empty()
    }

    /// True while a notification pass is running.
    #[must_use]
    pub fn is_notifying(&self) -> bool {
        self.inner.depth.get() > 0
    }

    /// Configuration this subject was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.cfg
    }

    /// True if the subscriber `id` is registered.
    #[must_use]
    pub fn contains(&self, id: SubscriberId) -> bool {
        self.inner.registry.contains(id)
    }

    /// Creates a non-owning handle to this subject.
    #[must_use]
    pub fn downgrade(&self) -> WeakSubject<L> {
        WeakSubject {
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn admit(&self, link: L) -> Result<(), SubjectError> {
        let registry = &self.inner.registry;
        if self.inner.cfg.duplicates.rejects() && registry.contains(link.id()) {
            warn!(target: "statecast", subscriber = link.name(), "duplicate registration rejected");
            return Err(SubjectError::DuplicateRegistration {
                subscriber: link.name(),
            });
        }
        registry.add(link);
        Ok(())
    }
}

impl<L: Link> Default for Subject<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Link> fmt::Debug for Subject<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("state", &self.state())
            .field("subscribers", &self.len())
            .field("depth", &self.inner.depth.get())
            .finish()
    }
}

impl Subject<Shared> {
    /// Registers `sub` by weak reference, as the new head.
    ///
    /// The subject does not keep `sub` alive: once every strong `Rc` held
    /// elsewhere is dropped, the entry is skipped and pruned.
    ///
    /// Passing the only `Rc` to a subscriber (`add_observer(Rc::new(..))`)
    /// therefore registers an entry that is already absent: it is never
    /// notified and disappears after the next pass. A warning is logged.
    ///
    /// # Errors
    /// [`SubjectError::DuplicateRegistration`] if `sub` is already registered and
    /// the subject rejects duplicates.
    pub fn add_observer(&self, sub: Rc<dyn Subscribe>) -> Result<(), SubjectError> {
        if Rc::strong_count(&sub) == 1 {
            warn!(
                target: "statecast",
                subscriber = sub.name(),
                "subscriber has no other owner and will never be notified"
            );
        }
        self.admit(Shared::new(&sub))
    }

    /// Removes the first (newest) registration of `sub`.
    ///
    /// Pass the subscriber value, not the `Rc`: `subject.remove_observer(&*rc)`,
    /// or `subject.remove_observer(self)` from inside `on_notify`.
    /// Returns `false` if it was not registered.
    pub fn remove_observer<S: Subscribe + ?Sized>(&self, sub: &S) -> bool {
        self.remove_id(SubscriberId::of(sub))
    }

    /// Removes the first (newest) registration of the subscriber `id`.
    pub fn remove_id(&self, id: SubscriberId) -> bool {
        self.inner.registry.remove(id)
    }
}

impl Subject<Owned> {
    /// Registers `sub` as the new head; the subject keeps it alive.
    ///
    /// Returns the [`Token`] that revokes this registration.
    ///
    /// # Errors
    /// [`SubjectError::DuplicateRegistration`] if the same allocation is already
    /// registered and the subject rejects duplicates.
    pub fn add_observer(&self, sub: Rc<dyn Subscribe>) -> Result<Token, SubjectError> {
        let link = Owned::new(sub);
        let token = link.token();
        self.admit(link)?;
        Ok(token)
    }

    /// Revokes the registration identified by `token`, releasing the
    /// subject's reference to the subscriber.
    ///
    /// Returns `false` if the token was already revoked or never issued here.
    pub fn remove_observer(&self, token: Token) -> bool {
        self.inner.registry.remove(token)
    }
}

/// Non-owning handle to a [`Subject`].
pub struct WeakSubject<L: Link> {
    inner: Weak<Inner<L>>,
}

impl<L: Link> WeakSubject<L> {
    /// Returns the subject if a strong handle still exists.
    #[must_use]
    pub fn upgrade(&self) -> Option<Subject<L>> {
        self.inner.upgrade().map(|inner| Subject { inner })
    }
}

impl<L: Link> Clone for WeakSubject<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<L: Link> fmt::Debug for WeakSubject<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakSubject")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}
