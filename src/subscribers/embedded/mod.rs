//! # Built-in subscribers
//!
//! Small, self-contained implementations useful for demos.
//!
//! - [`LogWriter`]: emits notifications as `tracing` events (demo/debug).

mod log;

pub use log::LogWriter;
