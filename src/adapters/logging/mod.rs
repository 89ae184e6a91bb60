//! Logger adapters.

pub mod recording;
pub mod tracing_logger;

pub use recording::{LogEntry, LogKind, RecordingLogger};
pub use tracing_logger::TracingLogger;
