//! Structured JSON logger
//!
//! - One log line = one event
//! - Synchronous, no buffering
//! - Deterministic key order: `event`, `severity`, then fields sorted
//!   alphabetically

use std::fmt;
use std::io::{self, Write};

use serde_json::{Map, Value};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-query detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Synchronous structured logger
pub struct Logger;

impl Logger {
    /// Logs an event to stdout
    pub fn log(severity: Severity, event: &str, fields: &[(&str, String)]) {
        Self::log_to_writer(severity, event, fields, &mut io::stdout());
    }

    /// Logs at TRACE level
    pub fn trace(event: &str, fields: &[(&str, String)]) {
        Self::log(Severity::Trace, event, fields);
    }

    /// Logs at INFO level
    pub fn info(event: &str, fields: &[(&str, String)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Logs at WARN level
    pub fn warn(event: &str, fields: &[(&str, String)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Logs at ERROR level, to stderr
    pub fn error(event: &str, fields: &[(&str, String)]) {
        Self::log_to_writer(Severity::Error, event, fields, &mut io::stderr());
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, String)],
        writer: &mut W,
    ) {
        // serde_json::Map preserves insertion order, so placing event and
        // severity first and the rest alphabetically keeps lines diffable.
        let mut line = Map::new();
        line.insert("event".into(), Value::String(event.into()));
        line.insert("severity".into(), Value::String(severity.as_str().into()));

        let mut sorted: Vec<&(&str, String)> = fields.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in sorted {
            line.insert((*key).into(), Value::String(value.clone()));
        }

        let mut output = Value::Object(line).to_string();
        output.push('\n');

        // One write, one flush, one line.
        let _ = writer.write_all(output.as_bytes());
        let _ = writer.flush();
    }
}

#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, String)]) -> String {
    let mut buffer = Vec::new();
    Logger::log_to_writer(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_log_is_one_json_line() {
        let output = capture_log(
            Severity::Info,
            "query_complete",
            &[("matched", "2".to_string())],
        );

        assert!(output.ends_with('\n'));
        assert_eq!(output.matches('\n').count(), 1);

        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "query_complete");
        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["matched"], "2");
    }

    #[test]
    fn test_deterministic_field_order() {
        let a = capture_log(
            Severity::Trace,
            "t",
            &[("zebra", "1".into()), ("apple", "2".into())],
        );
        let b = capture_log(
            Severity::Trace,
            "t",
            &[("apple", "2".into()), ("zebra", "1".into())],
        );
        assert_eq!(a, b);
        assert!(a.find("apple").unwrap() < a.find("zebra").unwrap());
    }

    #[test]
    fn test_event_and_severity_lead() {
        let output = capture_log(Severity::Warn, "aardvark_event", &[("aaa", "1".into())]);
        let event_pos = output.find("\"event\"").unwrap();
        let severity_pos = output.find("\"severity\"").unwrap();
        let field_pos = output.find("\"aaa\"").unwrap();
        assert!(event_pos < severity_pos);
        assert!(severity_pos < field_pos);
    }
}
