//! Core types and traits

pub mod arg;
pub mod diagnostics;
pub mod error;
pub mod forest;
pub mod format;
pub mod log_sink;
pub mod metrics;
pub mod payload;
pub mod severity;
pub mod transport;

pub use arg::Arg;
pub use diagnostics::DiagnosticSink;
pub use error::{LogglyError, Result};
pub use forest::Forest;
pub use log_sink::LogSink;
pub use metrics::ForwardingMetrics;
pub use severity::Severity;
pub use transport::{Callback, SubmitResult, Transport};
