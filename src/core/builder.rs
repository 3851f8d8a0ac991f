use std::marker::PhantomData;

use crate::config::{Config, DuplicatePolicy};
use crate::core::subject::Subject;
use crate::registry::Link;
use crate::State;

/// Builder for constructing a [`Subject`] with non-default settings.
pub struct SubjectBuilder<L: Link> {
    cfg: Config,
    _link: PhantomData<L>,
}

impl<L: Link> SubjectBuilder<L> {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            _link: PhantomData,
        }
    }

    /// Sets the state the subject starts with.
    pub fn with_initial_state(mut self, value: State) -> Self {
        self.cfg.initial_state = value;
        self
    }

    /// Sets the duplicate registration policy.
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.cfg.duplicates = policy;
        self
    }

    /// Enables or disables unlinking of absent entries after each pass.
    pub fn with_pruning(mut self, prune_dead: bool) -> Self {
        self.cfg.prune_dead = prune_dead;
        self
    }

    /// Builds the subject with an empty registry.
    pub fn build(self) -> Subject<L> {
        Subject::with_config(self.cfg)
    }
}
