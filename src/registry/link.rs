//! # Registry links: how a node refers to its subscriber.
//!
//! A [`Link`] decides the ownership regime of a registry:
//!
//! | Link       | Registry holds          | Removal key       | Subscriber dropped by owner |
//! |------------|-------------------------|-------------------|-----------------------------|
//! | [`Shared`] | `Weak<dyn Subscribe>`   | [`SubscriberId`]  | entry resolves to absent    |
//! | [`Owned`]  | `Rc<dyn Subscribe>`     | [`Token`]         | impossible while registered |
//!
//! Neither regime can hand a callback a reference to freed storage: the owned
//! link keeps the subscriber alive until its token is exercised, the shared
//! link upgrades the weak reference for the duration of each call.

use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::subscribers::Subscribe;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identity of a subscriber: the address of its allocation.
///
/// Obtained with [`SubscriberId::of`], either from the value behind an `Rc`
/// (`SubscriberId::of(&*rc)`) or from `self` inside [`Subscribe::on_notify`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(*const ());

impl SubscriberId {
    /// Identity of `sub`.
    pub fn of<S: Subscribe + ?Sized>(sub: &S) -> Self {
        Self((sub as *const S).cast::<()>())
    }

    fn of_weak(sub: &Weak<dyn Subscribe>) -> Self {
        Self(sub.as_ptr().cast::<()>())
    }

    fn of_rc(sub: &Rc<dyn Subscribe>) -> Self {
        Self(Rc::as_ptr(sub).cast::<()>())
    }
}

/// Revocation handle returned by an owned registration.
///
/// Tokens are unique for the lifetime of the process, so a token can never
/// remove an entry of another subject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token(u64);

impl Token {
    fn issue() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw token value (for logs).
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Shared {}
    impl Sealed for super::Owned {}
}

/// Reference from a registry node to its subscriber.
///
/// Implemented by [`Shared`] and [`Owned`] only; it selects a subject's
/// ownership regime and cannot be implemented outside this crate.
///
/// ```compile_fail
/// struct Custom;
///
/// impl statecast::Link for Custom {}
/// ```
pub trait Link: sealed::Sealed {
    /// Key that removal matches on.
    type Key: Copy;

    /// Returns the subscriber if its storage is still alive.
    fn resolve(&self) -> Option<Rc<dyn Subscribe>>;

    /// Cheap liveness check without upgrading.
    fn is_live(&self) -> bool {
        self.resolve().is_some()
    }

    /// Whether this link is the one `key` designates.
    fn matches(&self, key: Self::Key) -> bool;

    /// Identity of the referenced subscriber.
    fn id(&self) -> SubscriberId;

    /// Subscriber name captured at registration.
    fn name(&self) -> &'static str;
}

/// Non-owning link: the subscriber is kept alive by whoever holds a strong `Rc`.
pub struct Shared {
    sub: Weak<dyn Subscribe>,
    name: &'static str,
}

impl Shared {
    /// Creates a weak link to `sub`.
    pub(crate) fn new(sub: &Rc<dyn Subscribe>) -> Self {
        Self {
            sub: Rc::downgrade(sub),
            name: sub.name(),
        }
    }
}

impl Link for Shared {
    type Key = SubscriberId;

    fn resolve(&self) -> Option<Rc<dyn Subscribe>> {
        self.sub.upgrade()
    }

    fn is_live(&self) -> bool {
        self.sub.strong_count() > 0
    }

    fn matches(&self, key: SubscriberId) -> bool {
        self.id() == key
    }

    // The weak count keeps the allocation reserved, so the address cannot be
    // reused by another subscriber while this link exists.
    fn id(&self) -> SubscriberId {
        SubscriberId::of_weak(&self.sub)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Owning link: the registry keeps the subscriber alive until revoked.
pub struct Owned {
    sub: Rc<dyn Subscribe>,
    token: Token,
}

impl Owned {
    /// Creates an owning link and issues its revocation token.
    pub(crate) fn new(sub: Rc<dyn Subscribe>) -> Self {
        Self {
            sub,
            token: Token::issue(),
        }
    }

    /// Token that removes this link.
    #[must_use]
    pub(crate) fn token(&self) -> Token {
        self.token
    }
}

impl Link for Owned {
    type Key = Token;

    fn resolve(&self) -> Option<Rc<dyn Subscribe>> {
        Some(Rc::clone(&self.sub))
    }

    fn is_live(&self) -> bool {
        true
    }

    fn matches(&self, key: Token) -> bool {
        self.token == key
    }

    fn id(&self) -> SubscriberId {
        SubscriberId::of_rc(&self.sub)
    }

    fn name(&self) -> &'static str {
        self.sub.name()
    }
}
