//! Diagnostic output for failures that cannot reach the caller
//!
//! Submission failures happen after `log` has returned, so they are
//! reported as single text lines to a [`DiagnosticSink`]. The default sink
//! writes to standard error.

use std::sync::Arc;

/// Prefix of the line emitted for every failed submission
pub const FAILURE_PREFIX: &str = "LogglyTree failed: ";

/// Receiver of diagnostic lines
pub type DiagnosticSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Sink writing each line to standard error
pub fn stderr() -> DiagnosticSink {
    Arc::new(|line: &str| eprintln!("{}", line))
}

/// Line reported when a submission fails with `detail`
pub fn failure_line(detail: &str) -> String {
    format!("{}{}", FAILURE_PREFIX, detail)
}

/// Best-effort text of a caught panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
