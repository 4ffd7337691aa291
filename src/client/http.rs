//! HTTP transport for the Loggly input API
//!
//! Submissions go through a bounded queue to a small pool of worker
//! threads, each posting one event per request. Nothing is retried: the
//! outcome of every request is handed to the submission's callback.

use super::config::LogglyConfig;
use crate::core::{
    diagnostics::{self, panic_message, DiagnosticSink},
    Callback, LogglyError, Result, SubmitResult, Transport,
};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::RwLock;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread;
use std::time::{Duration, Instant};

/// Header carrying the comma separated tag list
pub const TAG_HEADER: &str = "X-LOGGLY-TAG";

/// Default shutdown timeout for draining queued submissions (5 seconds)
///
/// Used when the client is dropped without explicit shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

struct Job {
    payload: String,
    tags: Option<String>,
    on_result: Callback,
}

/// Asynchronous Loggly client
///
/// # Example
///
/// ```no_run
/// use loggly_tree::client::LogglyClient;
/// use loggly_tree::core::{SubmitResult, Transport};
/// use std::sync::Arc;
///
/// let client = LogglyClient::new("your-customer-token")?;
/// client.set_tags("web, prod");
/// client.submit(
///     r#"{"level": "INFO", "message": "hello"}"#.to_string(),
///     Arc::new(|result: SubmitResult| {
///         if let SubmitResult::Failure(detail) = result {
///             eprintln!("not delivered: {}", detail);
///         }
///     }),
/// );
/// # Ok::<(), loggly_tree::LogglyError>(())
/// ```
pub struct LogglyClient {
    config: LogglyConfig,
    tags: RwLock<Option<String>>,
    sender: Option<Sender<Job>>,
    workers: Vec<thread::JoinHandle<()>>,
    diagnostics: DiagnosticSink,
}

impl LogglyClient {
    /// Create a client with default settings for `token`
    pub fn new(token: &str) -> Result<Self> {
        Self::with_config(LogglyConfig::new(token))
    }

    pub fn with_config(config: LogglyConfig) -> Result<Self> {
        Self::with_config_and_diagnostics(config, diagnostics::stderr())
    }

    /// Create a client reporting its own internal problems to `diagnostics`
    ///
    /// # Errors
    ///
    /// Returns [`LogglyError::InvalidConfiguration`] if the configuration
    /// does not validate, or the HTTP client or a worker thread cannot be
    /// created.
    pub fn with_config_and_diagnostics(config: LogglyConfig, diagnostics: DiagnosticSink) -> Result<Self> {
        config.validate()?;
        let url = config.input_url()?;

        let (sender, receiver) = bounded(config.queue_capacity);
        let mut workers = Vec::with_capacity(config.worker_threads);

        for id in 0..config.worker_threads {
            let http = Self::build_http(&config)?;
            let receiver = receiver.clone();
            let url = url.clone();
            let diagnostics = diagnostics.clone();

            let handle = thread::Builder::new()
                .name(format!("loggly-worker-{}", id))
                .spawn(move || Self::run_worker(receiver, http, url, diagnostics))
                .map_err(|e| LogglyError::config("LogglyClient", format!("cannot spawn worker: {}", e)))?;
            workers.push(handle);
        }

        Ok(Self {
            config,
            tags: RwLock::new(None),
            sender: Some(sender),
            workers,
            diagnostics,
        })
    }

    fn build_http(config: &LogglyConfig) -> Result<HttpClient> {
        HttpClient::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| LogglyError::config("LogglyClient", format!("cannot build HTTP client: {}", e)))
    }

    // Runs until every sender is gone and the queue is drained.
    fn run_worker(receiver: Receiver<Job>, http: HttpClient, url: Url, diagnostics: DiagnosticSink) {
        for Job { payload, tags, on_result } in receiver.iter() {
            let result = Self::post(&http, &url, payload, tags);

            if let Err(panic_info) = catch_unwind(AssertUnwindSafe(|| on_result(result))) {
                diagnostics(&format!(
                    "[LOGGLY CRITICAL] Completion callback panicked: {}. Worker continues.",
                    panic_message(panic_info.as_ref())
                ));
            }
        }
    }

    fn post(http: &HttpClient, url: &Url, payload: String, tags: Option<String>) -> SubmitResult {
        let mut request = http
            .post(url.clone())
            .header(CONTENT_TYPE, "text/plain")
            .body(payload);
        if let Some(tags) = tags {
            request = request.header(TAG_HEADER, tags);
        }

        match request.send() {
            Ok(response) if response.status().is_success() => SubmitResult::Success,
            Ok(response) => SubmitResult::Failure(LogglyError::http(response.status()).to_string()),
            Err(e) if e.is_timeout() => SubmitResult::Failure("timeout".to_string()),
            Err(e) => SubmitResult::Failure(LogglyError::Network(e.to_string()).to_string()),
        }
    }

    /// Tags currently attached to submissions, if any
    pub fn tags(&self) -> Option<String> {
        self.tags.read().clone()
    }

    pub fn config(&self) -> &LogglyConfig {
        &self.config
    }

    /// Submissions waiting for a worker
    pub fn queued(&self) -> usize {
        self.sender.as_ref().map_or(0, Sender::len)
    }

    /// Stop accepting submissions and wait for queued ones to finish
    ///
    /// Returns `true` if every worker finished within `timeout`.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        // Closing the channel lets workers drain and exit
        drop(self.sender.take());

        let start = Instant::now();
        for handle in self.workers.drain(..) {
            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        (self.diagnostics)(&format!(
                            "[LOGGLY ERROR] Worker thread panicked during shutdown: {}",
                            panic_message(e.as_ref())
                        ));
                        return false;
                    }
                    break;
                }

                if start.elapsed() >= timeout {
                    (self.diagnostics)(&format!(
                        "[LOGGLY WARNING] Workers did not finish within {:?}. Queued logs may be lost.",
                        timeout
                    ));
                    return false;
                }

                thread::sleep(Duration::from_millis(10));
            }
        }

        true
    }
}

/// Normalize a tag list: trim entries, drop empty ones, join with `,`
///
/// ```
/// use loggly_tree::client::normalize_tags;
///
/// assert_eq!(normalize_tags(" prod, web ,"), Some("prod,web".to_string()));
/// assert_eq!(normalize_tags(""), None);
/// ```
pub fn normalize_tags(tags: &str) -> Option<String> {
    let joined = tags
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(",");
    (!joined.is_empty()).then_some(joined)
}

impl Transport for LogglyClient {
    fn submit(&self, payload: String, on_result: Callback) {
        let Some(sender) = self.sender.as_ref() else {
            on_result(SubmitResult::Failure(LogglyError::TransportClosed.to_string()));
            return;
        };

        let job = Job {
            payload,
            tags: self.tags(),
            on_result,
        };

        match sender.try_send(job) {
            Ok(()) => {}
            Err(TrySendError::Full(job)) => (job.on_result)(SubmitResult::Failure(
                LogglyError::queue_full(self.config.queue_capacity).to_string(),
            )),
            Err(TrySendError::Disconnected(job)) => {
                (job.on_result)(SubmitResult::Failure(LogglyError::TransportClosed.to_string()))
            }
        }
    }

    fn set_tags(&self, tags: &str) {
        *self.tags.write() = normalize_tags(tags);
    }
}

impl Drop for LogglyClient {
    fn drop(&mut self) {
        if !self.workers.is_empty() {
            self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
        }
    }
}
