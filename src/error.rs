//! Error types used by subjects and their registries.
//!
//! The taxonomy is deliberately small. Most failure modes of a classic
//! observer list are ruled out by the ownership model:
//!
//! - a dangling subscriber reference cannot exist (owned links keep the
//!   subscriber alive, weak links resolve to "absent" and are skipped);
//! - removing something that is not registered is a no-op that returns `false`.
//!
//! What remains is [`SubjectError`], raised only when a configured policy
//! refuses an operation.

use thiserror::Error;

/// # Errors produced by a subject.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubjectError {
    /// The subscriber is already registered and the subject was configured
    /// with [`DuplicatePolicy::Reject`](crate::DuplicatePolicy::Reject).
    #[error("subscriber '{subscriber}' is already registered")]
    DuplicateRegistration {
        /// Name reported by [`Subscribe::name`](crate::Subscribe::name).
        subscriber: &'static str,
    },
}

impl SubjectError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use statecast::SubjectError;
    ///
    /// let err = SubjectError::DuplicateRegistration { subscriber: "hud" };
    /// assert_eq!(err.as_label(), "subject_duplicate_registration");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SubjectError::DuplicateRegistration { .. } => "subject_duplicate_registration",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SubjectError::DuplicateRegistration { subscriber } => {
                format!("duplicate registration rejected; subscriber={subscriber}")
            }
        }
    }
}
