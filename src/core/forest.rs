//! Dispatcher fanning log calls out to planted sinks

use super::{
    arg::Arg,
    diagnostics::{self, panic_message, DiagnosticSink},
    error::{LogglyError, Result},
    log_sink::LogSink,
    severity::Severity,
};
use parking_lot::RwLock;
use std::error::Error;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Host-side collection of [`LogSink`]s
///
/// A `Forest` is itself a sink: every call is forwarded to each planted
/// sink in planting order.
///
/// # Example
///
/// ```no_run
/// use loggly_tree::prelude::*;
/// use std::sync::Arc;
///
/// let forest = Forest::new();
/// forest.plant(Arc::new(LogglyTree::new("your-customer-token")?));
///
/// forest.tag("prod,web");
/// forest.info("Server listening on port %d", &[Arg::from(8080)])?;
/// # Ok::<(), LogglyError>(())
/// ```
pub struct Forest {
    sinks: RwLock<Vec<Arc<dyn LogSink>>>,
    diagnostics: DiagnosticSink,
}

impl Forest {
    #[must_use]
    pub fn new() -> Self {
        Self::with_diagnostics(diagnostics::stderr())
    }

    /// Create a forest reporting sink panics to `diagnostics`
    #[must_use]
    pub fn with_diagnostics(diagnostics: DiagnosticSink) -> Self {
        Self {
            sinks: RwLock::new(Vec::new()),
            diagnostics,
        }
    }

    pub fn plant(&self, sink: Arc<dyn LogSink>) {
        self.sinks.write().push(sink);
    }

    /// Remove every sink named `name`, returning whether any was removed
    pub fn uproot(&self, name: &str) -> bool {
        let mut sinks = self.sinks.write();
        let before = sinks.len();
        sinks.retain(|sink| sink.name() != name);
        sinks.len() != before
    }

    pub fn uproot_all(&self) {
        self.sinks.write().clear();
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.read().len()
    }

    /// Snapshot so sinks run without the lock held
    fn snapshot(&self) -> Vec<Arc<dyn LogSink>> {
        self.sinks.read().clone()
    }

    fn report_panic(&self, sink: &str, during: &str, message: &str) {
        (self.diagnostics)(&format!(
            "[FOREST CRITICAL] Sink '{}' panicked during {}: {}. Other sinks continue to function.",
            sink, during, message
        ));
    }
}

impl Default for Forest {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for Forest {
    fn log(
        &self,
        severity: Severity,
        cause: Option<&(dyn Error + 'static)>,
        message: &str,
        args: &[Arg],
    ) -> Result<()> {
        let mut first_error = None;

        for sink in self.snapshot() {
            let outcome = catch_unwind(AssertUnwindSafe(|| sink.log(severity, cause, message, args)));

            let error = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(panic_info) => {
                    let panic_msg = panic_message(panic_info.as_ref());
                    self.report_panic(sink.name(), "log", &panic_msg);
                    LogglyError::sink_panicked(sink.name(), panic_msg)
                }
            };

            if first_error.is_none() {
                first_error = Some(error);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn tag(&self, tag: &str) {
        for sink in self.snapshot() {
            if let Err(panic_info) = catch_unwind(AssertUnwindSafe(|| sink.tag(tag))) {
                self.report_panic(sink.name(), "tag", &panic_message(panic_info.as_ref()));
            }
        }
    }

    fn name(&self) -> &str {
        "forest"
    }
}
