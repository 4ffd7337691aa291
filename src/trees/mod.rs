//! Sink implementations

pub mod loggly;

pub use loggly::LogglyTree;

// Re-export the trait next to its implementations
pub use crate::core::LogSink;
