//! Payload construction
//!
//! The payload is assembled by hand rather than through a JSON serializer:
//! the receiving side expects this exact text. The formatted message only
//! has its double quotes escaped and the cause's trace text is embedded
//! as-is, so a trace containing quotes yields invalid JSON.

use super::arg::Arg;
use super::error::Result;
use super::format::format_template;
use super::severity::Severity;
use std::error::Error;
use std::fmt::Write;

/// Build the payload for one log call
///
/// # Example
///
/// ```
/// use loggly_tree::core::payload::build_payload;
/// use loggly_tree::{Arg, Severity};
///
/// let payload = build_payload(Severity::Warn, "retry %d of %d", &[Arg::from(1), Arg::from(3)], None).unwrap();
/// assert_eq!(payload, r#"{"level": "WARN", "message": "retry 1 of 3"}"#);
/// ```
pub fn build_payload(
    severity: Severity,
    message: &str,
    args: &[Arg],
    cause: Option<&(dyn Error + 'static)>,
) -> Result<String> {
    let message = escape_quotes(&format_template(message, args)?);

    Ok(match cause {
        None => format!(r#"{{"level": "{}", "message": "{}"}}"#, severity, message),
        Some(cause) => format!(
            r#"{{"level": "{}", "message": "{}", "exception": "{}"}}"#,
            severity,
            message,
            render_cause(cause)
        ),
    })
}

/// Prefix every `"` with a backslash; nothing else is escaped
pub fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// Trace text of an error and its `source()` chain
///
/// ```text
/// connection reset
/// Caused by: broken pipe
/// ```
///
/// Every line, the last included, ends with a newline.
pub fn render_cause(cause: &(dyn Error + 'static)) -> String {
    let mut trace = String::new();
    let _ = writeln!(trace, "{}", cause);

    let mut source = cause.source();
    while let Some(err) = source {
        let _ = writeln!(trace, "Caused by: {}", err);
        source = err.source();
    }

    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;
    use std::io;

    #[derive(Debug)]
    struct Wrapped {
        inner: io::Error,
    }

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("request failed")
        }
    }

    impl Error for Wrapped {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.inner)
        }
    }

    #[test]
    fn test_payload_per_severity() {
        for severity in Severity::ALL {
            let payload = build_payload(severity, "disk full", &[], None).unwrap();
            assert_eq!(
                payload,
                format!(r#"{{"level": "{}", "message": "disk full"}}"#, severity.to_str())
            );
        }
    }

    #[test]
    fn test_quotes_are_escaped_in_message() {
        let payload = build_payload(Severity::Info, r#"say "hi""#, &[], None).unwrap();
        assert_eq!(payload, r#"{"level": "INFO", "message": "say \"hi\""}"#);
    }

    #[test]
    fn test_quotes_from_arguments_are_escaped() {
        let payload = build_payload(Severity::Info, "got %s", &[r#""x""#.into()], None).unwrap();
        assert_eq!(payload, r#"{"level": "INFO", "message": "got \"x\""}"#);
    }

    #[test]
    fn test_other_characters_are_not_escaped() {
        let payload = build_payload(Severity::Debug, "a\\b\nc\t", &[], None).unwrap();
        assert_eq!(payload, "{\"level\": \"DEBUG\", \"message\": \"a\\b\nc\t\"}");
    }

    #[test]
    fn test_payload_with_cause() {
        let cause = io::Error::new(io::ErrorKind::Other, r#"boom "quoted""#);
        let payload = build_payload(Severity::Error, "failed", &[], Some(&cause)).unwrap();
        assert_eq!(
            payload,
            "{\"level\": \"ERROR\", \"message\": \"failed\", \"exception\": \"boom \"quoted\"\n\"}"
        );
    }

    #[test]
    fn test_render_cause_chain() {
        let cause = Wrapped {
            inner: io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"),
        };
        assert_eq!(render_cause(&cause), "request failed\nCaused by: broken pipe\n");
    }

    #[test]
    fn test_formatting_error_propagates() {
        let err = build_payload(Severity::Warn, "retry %d of %d", &[1.into()], None).unwrap_err();
        assert!(err.is_formatting());
    }
}
