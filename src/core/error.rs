//! Error types for the Loggly tree

pub type Result<T> = std::result::Result<T, LogglyError>;

#[derive(Debug, thiserror::Error)]
pub enum LogglyError {
    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Template could not be formatted with the supplied arguments
    #[error("Cannot format '{template}': {message}")]
    Formatting { template: String, message: String },

    /// Transport queue full, submission rejected
    #[error("Loggly queue full: capacity {capacity}")]
    QueueFull { capacity: usize },

    /// Transport already shut down
    #[error("Loggly transport is closed")]
    TransportClosed,

    /// Non-success HTTP status from the input endpoint
    #[error("HTTP {status}")]
    Http { status: String },

    /// Network level failure
    #[error("{0}")]
    Network(String),

    /// A planted sink panicked while handling a call
    #[error("Sink '{sink}' panicked: {message}")]
    SinkPanicked { sink: String, message: String },
}

impl LogglyError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LogglyError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a formatting error for `template`
    pub fn formatting(template: impl Into<String>, message: impl Into<String>) -> Self {
        LogglyError::Formatting {
            template: template.into(),
            message: message.into(),
        }
    }

    pub fn queue_full(capacity: usize) -> Self {
        LogglyError::QueueFull { capacity }
    }

    pub fn http(status: impl ToString) -> Self {
        LogglyError::Http {
            status: status.to_string(),
        }
    }

    pub fn sink_panicked(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LogglyError::SinkPanicked {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// True for errors caused by a bad template or argument list
    pub fn is_formatting(&self) -> bool {
        matches!(self, LogglyError::Formatting { .. })
    }
}
