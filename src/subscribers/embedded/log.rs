//! # LogWriter: simple notification printer
//!
//! A minimal subscriber that emits every notification as a `tracing` event.
//! Use it for tests or demos; install a `tracing` subscriber to see output.
//!
//! ## Example output
//! ```text
//! INFO statecast: [notify] value=101 label="counter"
//! INFO statecast: [notify] value=0 label="counter"
//! ```

use tracing::info;

use crate::subscribers::Subscribe;
use crate::State;

/// Notification writer subscriber.
#[derive(Debug, Clone)]
pub struct LogWriter {
    label: &'static str,
}

impl LogWriter {
    /// Construct a new [`LogWriter`] tagging its lines with `label`.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new("subject")
    }
}

impl Subscribe for LogWriter {
    fn on_notify(&self, value: State) {
        info!(target: "statecast", value, label = self.label, "[notify]");
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
