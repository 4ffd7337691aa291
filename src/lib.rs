//! # Loggly Tree
//!
//! A pluggable log sink that formats log calls as JSON and forwards them
//! asynchronously to [Loggly](https://www.loggly.com).
//!
//! ## Features
//!
//! - **Non-blocking**: a log call builds its payload and returns; delivery
//!   happens on the transport's worker threads
//! - **Pluggable**: [`LogglyTree`] implements [`LogSink`] and can be planted
//!   in a [`Forest`] next to other sinks
//! - **Testable**: the transport and the diagnostic output are injectable
//!
//! ## Example
//!
//! ```no_run
//! use loggly_tree::prelude::*;
//! use loggly_tree::{info, error};
//!
//! let tree = LogglyTree::new("your-customer-token")?;
//! tree.tag("web,prod");
//!
//! info!(tree, "listening on port %d", 8080)?;
//!
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
//! error!(tree, cause = &err, "cannot write %s", "cache.db")?;
//! # Ok::<(), LogglyError>(())
//! ```

pub mod client;
pub mod core;
pub mod macros;
pub mod trees;

pub mod prelude {
    pub use crate::client::{LogglyClient, LogglyConfig};
    pub use crate::core::{
        Arg, Callback, DiagnosticSink, Forest, ForwardingMetrics, LogSink, LogglyError, Result,
        Severity, SubmitResult, Transport,
    };
    pub use crate::trees::LogglyTree;
}

pub use crate::client::{LogglyClient, LogglyConfig};
pub use crate::core::{
    Arg, Callback, DiagnosticSink, Forest, ForwardingMetrics, LogSink, LogglyError, Result,
    Severity, SubmitResult, Transport,
};
pub use crate::trees::LogglyTree;
