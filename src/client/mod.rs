//! Loggly HTTP client

pub mod config;
pub mod http;

pub use config::{LogglyConfig, DEFAULT_ENDPOINT};
pub use http::{normalize_tags, LogglyClient, DEFAULT_SHUTDOWN_TIMEOUT, TAG_HEADER};
