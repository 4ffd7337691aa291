//! Sink trait for pluggable log destinations

use super::{arg::Arg, error::Result, severity::Severity};
use std::error::Error;

/// A pluggable destination for log calls
///
/// Implementors provide [`LogSink::log`] and [`LogSink::tag`]; the
/// per-severity methods route through `log`. An `Err` is only returned for
/// problems the caller can fix (a template that does not match its
/// arguments); delivery failures are handled by the sink itself.
pub trait LogSink: Send + Sync {
    fn log(
        &self,
        severity: Severity,
        cause: Option<&(dyn Error + 'static)>,
        message: &str,
        args: &[Arg],
    ) -> Result<()>;

    /// Set the tag applied to all later calls; empty clears it
    fn tag(&self, tag: &str);

    fn name(&self) -> &str;

    #[inline]
    fn debug(&self, message: &str, args: &[Arg]) -> Result<()> {
        self.log(Severity::Debug, None, message, args)
    }

    #[inline]
    fn debug_with_cause(&self, cause: &(dyn Error + 'static), message: &str, args: &[Arg]) -> Result<()> {
        self.log(Severity::Debug, Some(cause), message, args)
    }

    #[inline]
    fn info(&self, message: &str, args: &[Arg]) -> Result<()> {
        self.log(Severity::Info, None, message, args)
    }

    #[inline]
    fn info_with_cause(&self, cause: &(dyn Error + 'static), message: &str, args: &[Arg]) -> Result<()> {
        self.log(Severity::Info, Some(cause), message, args)
    }

    #[inline]
    fn warn(&self, message: &str, args: &[Arg]) -> Result<()> {
        self.log(Severity::Warn, None, message, args)
    }

    #[inline]
    fn warn_with_cause(&self, cause: &(dyn Error + 'static), message: &str, args: &[Arg]) -> Result<()> {
        self.log(Severity::Warn, Some(cause), message, args)
    }

    #[inline]
    fn error(&self, message: &str, args: &[Arg]) -> Result<()> {
        self.log(Severity::Error, None, message, args)
    }

    #[inline]
    fn error_with_cause(&self, cause: &(dyn Error + 'static), message: &str, args: &[Arg]) -> Result<()> {
        self.log(Severity::Error, Some(cause), message, args)
    }
}
