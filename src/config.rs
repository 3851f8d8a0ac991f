//! # Subject configuration.
//!
//! Provides [`Config`], the settings a [`Subject`](crate::Subject) is built with,
//! and [`DuplicatePolicy`], which decides what happens when the same
//! subscriber is registered twice.
//!
//! Config is used in two ways:
//! 1. **Direct construction**: `Subject::with_config(config)`
//! 2. **Builder**: `Subject::builder(config).with_initial_state(100).build()`

use crate::State;

/// Policy controlling how a second registration of the same subscriber is handled.
///
/// Identity is the address of the subscriber's allocation, so two distinct
/// values of the same type are never duplicates of each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Insert another node; the subscriber is notified once per registration.
    ///
    /// Registration stays O(1). Idempotence is the caller's responsibility.
    #[default]
    Allow,

    /// Scan the registry first and refuse the registration with
    /// [`SubjectError::DuplicateRegistration`](crate::SubjectError::DuplicateRegistration).
    ///
    /// Registration becomes O(n).
    Reject,
}

impl DuplicatePolicy {
    /// Returns `true` if registration must scan for an existing entry.
    #[inline]
    pub fn rejects(self) -> bool {
        matches!(self, DuplicatePolicy::Reject)
    }
}

/// Configuration for a subject and its registry.
///
/// ## Field semantics
/// - `duplicates`: what a second registration of the same subscriber does
/// - `initial_state`: value held before the first `set_state`
/// - `prune_dead`: unlink absent weak entries after a notification pass
#[derive(Clone, Debug)]
pub struct Config {
    /// Duplicate registration policy.
    pub duplicates: DuplicatePolicy,

    /// State a freshly created subject holds.
    pub initial_state: State,

    /// Whether a notification pass unlinks entries whose subscriber is gone.
    ///
    /// Absent entries are never notified either way; with `false` they stay
    /// linked until [`Subject::prune`](crate::Subject::prune) is called.
    pub prune_dead: bool,
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `duplicates = DuplicatePolicy::Allow`
    /// - `initial_state = 0`
    /// - `prune_dead = true`
    fn default() -> Self {
        Self {
            duplicates: DuplicatePolicy::Allow,
            initial_state: 0,
            prune_dead: true,
        }
    }
}
