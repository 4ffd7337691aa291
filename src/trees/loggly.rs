//! Loggly tree
//!
//! Formats each log call as a small JSON payload and hands it to a
//! [`Transport`], by default a [`LogglyClient`] posting to the Loggly HTTP
//! input API. Calls return as soon as the payload is queued.

use crate::client::{LogglyClient, LogglyConfig};
use crate::core::{
    diagnostics::{self, DiagnosticSink},
    payload::build_payload,
    Arg, Callback, ForwardingMetrics, LogSink, Result, Severity, SubmitResult, Transport,
};
use std::error::Error;
use std::sync::Arc;

/// Sink forwarding log calls to Loggly
///
/// # Example
///
/// ```no_run
/// use loggly_tree::prelude::*;
///
/// let tree = LogglyTree::new("your-customer-token")?;
/// tree.tag("android,release");
/// tree.info("user %s signed in", &[Arg::from("alice")])?;
///
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
/// tree.error_with_cause(&err, "cannot save %s", &[Arg::from("draft.txt")])?;
/// # Ok::<(), LogglyError>(())
/// ```
pub struct LogglyTree<T: Transport = LogglyClient> {
    transport: T,
    handler: Callback,
    diagnostics: DiagnosticSink,
    metrics: Arc<ForwardingMetrics>,
}

impl LogglyTree<LogglyClient> {
    /// Create a tree posting to Loggly with `token`
    ///
    /// # Errors
    ///
    /// Returns [`crate::LogglyError::InvalidConfiguration`] if the client
    /// cannot be built from the token.
    pub fn new(token: &str) -> Result<Self> {
        Ok(Self::with_transport(LogglyClient::new(token)?))
    }

    /// Create a tree from a full client configuration
    pub fn with_config(config: LogglyConfig) -> Result<Self> {
        Ok(Self::with_transport(LogglyClient::with_config(config)?))
    }
}

impl<T: Transport> LogglyTree<T> {
    /// Create a tree on top of an existing transport
    pub fn with_transport(transport: T) -> Self {
        let diagnostics = diagnostics::stderr();
        let metrics = Arc::new(ForwardingMetrics::new());
        Self {
            transport,
            handler: Self::completion_handler(Arc::clone(&diagnostics), Arc::clone(&metrics)),
            diagnostics,
            metrics,
        }
    }

    /// Report failed submissions to `diagnostics` instead of standard error
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticSink) -> Self {
        self.handler = Self::completion_handler(Arc::clone(&diagnostics), Arc::clone(&self.metrics));
        self.diagnostics = diagnostics;
        self
    }

    // Success is a no-op beyond counting; failures are never retried.
    fn completion_handler(report: DiagnosticSink, metrics: Arc<ForwardingMetrics>) -> Callback {
        Arc::new(move |result: SubmitResult| match result {
            SubmitResult::Success => {
                metrics.record_delivered();
            }
            SubmitResult::Failure(detail) => {
                metrics.record_failed();
                report(&diagnostics::failure_line(&detail));
            }
        })
    }

    fn dispatch(&self, payload: String) {
        self.metrics.record_submitted();
        self.transport.submit(payload, Arc::clone(&self.handler));
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn diagnostics(&self) -> &DiagnosticSink {
        &self.diagnostics
    }

    pub fn metrics(&self) -> &ForwardingMetrics {
        &self.metrics
    }
}

impl<T: Transport> LogSink for LogglyTree<T> {
    fn log(
        &self,
        severity: Severity,
        cause: Option<&(dyn Error + 'static)>,
        message: &str,
        args: &[Arg],
    ) -> Result<()> {
        let payload = build_payload(severity, message, args, cause).inspect_err(|_| {
            self.metrics.record_format_error();
        })?;
        self.dispatch(payload);
        Ok(())
    }

    /// Set the Loggly tags for every later call
    ///
    /// Unlike a one-shot tag, this persists until changed. Accepts a single
    /// tag or a comma separated list; the empty string clears the tags.
    fn tag(&self, tag: &str) {
        self.transport.set_tags(tag);
    }

    fn name(&self) -> &str {
        "loggly"
    }
}
