//! Transport trait for delivering payloads to the aggregation service

use std::sync::Arc;

/// Outcome of a single asynchronous submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    Success,
    Failure(String),
}

impl SubmitResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitResult::Success)
    }
}

/// Completion callback invoked once per submission, possibly on another thread
pub type Callback = Arc<dyn Fn(SubmitResult) + Send + Sync>;

/// Asynchronous payload delivery
///
/// Implementations must not block in [`Transport::submit`]: the payload is
/// handed off and `on_result` is called later, from whatever execution
/// context the transport owns.
///
/// # Example
///
/// ```
/// use loggly_tree::core::{Callback, SubmitResult, Transport};
///
/// struct NullTransport;
///
/// impl Transport for NullTransport {
///     fn submit(&self, _payload: String, on_result: Callback) {
///         on_result(SubmitResult::Success);
///     }
///
///     fn set_tags(&self, _tags: &str) {}
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Queue `payload` for delivery and report the outcome through `on_result`
    fn submit(&self, payload: String, on_result: Callback);

    /// Replace the tags attached to every later submission; empty clears them
    fn set_tags(&self, tags: &str);
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn submit(&self, payload: String, on_result: Callback) {
        (**self).submit(payload, on_result)
    }

    fn set_tags(&self, tags: &str) {
        (**self).set_tags(tags)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn submit(&self, payload: String, on_result: Callback) {
        (**self).submit(payload, on_result)
    }

    fn set_tags(&self, tags: &str) {
        (**self).set_tags(tags)
    }
}
