//! Logging macros for ergonomic argument passing.
//!
//! Each macro takes any [`LogSink`](crate::LogSink) value, an optional
//! `cause = <error>,` and a printf-style template followed by its
//! arguments. Arguments are converted with [`Arg::from`](crate::Arg) and
//! the macro evaluates to the sink's `Result<()>`.
//!
//! # Examples
//!
//! ```no_run
//! use loggly_tree::prelude::*;
//! use loggly_tree::{info, warn};
//!
//! let tree = LogglyTree::new("your-customer-token")?;
//!
//! info!(tree, "Server started")?;
//! warn!(tree, "Retry %d of %d", 1, 3)?;
//! # Ok::<(), LogglyError>(())
//! ```

/// Log a message at an explicit severity.
///
/// # Examples
///
/// ```no_run
/// # use loggly_tree::prelude::*;
/// # let tree = LogglyTree::new("your-customer-token")?;
/// use loggly_tree::log;
/// log!(tree, Severity::Info, "Simple message")?;
/// log!(tree, Severity::Error, "Error code: %d", 500)?;
///
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "refused");
/// log!(tree, Severity::Error, cause = &err, "Cannot reach %s", "db-1")?;
/// # Ok::<(), LogglyError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($sink:expr, $severity:expr, cause = $cause:expr, $msg:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::LogSink as _;
        ($sink).log(
            $severity,
            ::std::option::Option::Some($cause as &(dyn ::std::error::Error + 'static)),
            $msg,
            &[$($crate::Arg::from($arg)),*],
        )
    }};
    ($sink:expr, $severity:expr, $msg:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::LogSink as _;
        ($sink).log(
            $severity,
            ::std::option::Option::None,
            $msg,
            &[$($crate::Arg::from($arg)),*],
        )
    }};
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($sink:expr, cause = $cause:expr, $($rest:tt)+) => {
        $crate::log!($sink, $crate::Severity::Debug, cause = $cause, $($rest)+)
    };
    ($sink:expr, $($rest:tt)+) => {
        $crate::log!($sink, $crate::Severity::Debug, $($rest)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($sink:expr, cause = $cause:expr, $($rest:tt)+) => {
        $crate::log!($sink, $crate::Severity::Info, cause = $cause, $($rest)+)
    };
    ($sink:expr, $($rest:tt)+) => {
        $crate::log!($sink, $crate::Severity::Info, $($rest)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($sink:expr, cause = $cause:expr, $($rest:tt)+) => {
        $crate::log!($sink, $crate::Severity::Warn, cause = $cause, $($rest)+)
    };
    ($sink:expr, $($rest:tt)+) => {
        $crate::log!($sink, $crate::Severity::Warn, $($rest)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```no_run
/// # use loggly_tree::prelude::*;
/// # let tree = LogglyTree::new("your-customer-token")?;
/// use loggly_tree::error;
/// error!(tree, "Failed to connect to database")?;
///
/// let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
/// error!(tree, cause = &err, "Query %s failed", "q-17")?;
/// # Ok::<(), LogglyError>(())
/// ```
#[macro_export]
macro_rules! error {
    ($sink:expr, cause = $cause:expr, $($rest:tt)+) => {
        $crate::log!($sink, $crate::Severity::Error, cause = $cause, $($rest)+)
    };
    ($sink:expr, $($rest:tt)+) => {
        $crate::log!($sink, $crate::Severity::Error, $($rest)+)
    };
}
