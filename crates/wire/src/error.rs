//! Error types for protocol operations
//!
//! One flat error kind plus an ordered list of context frames. The frame
//! list grows as the error unwinds through call boundaries; the kind never
//! changes after the error is raised.

use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;
use thiserror::Error;

use crate::status::ProtocolStatus;

pub type Result<T> = std::result::Result<T, Error>;

/// Longest JSON fragment kept in a decode error
pub const MAX_FRAGMENT_LEN: usize = 120;

/// What went wrong
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("cannot decode {expected}: {message} (got {fragment})")]
    Decode {
        expected: String,
        message: String,
        fragment: String,
    },

    #[error("protocol error {code}: {value}")]
    Protocol { code: i64, value: Value },

    #[error("validation error: {0}")]
    Validation(String),
}

impl ErrorKind {
    /// Short description without the kind prefix
    pub fn detail(&self) -> String {
        match self {
            ErrorKind::Transport { message } => message.clone(),
            ErrorKind::Decode { message, .. } => message.clone(),
            ErrorKind::Protocol { code, .. } => ProtocolStatus::from_code(*code).to_string(),
            ErrorKind::Validation(message) => message.clone(),
        }
    }
}

/// One step of the context chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub location: String,
    pub message: Option<String>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{} ({})", self.location, message),
            None => f.write_str(&self.location),
        }
    }
}

/// Error with its context chain
///
/// `frames()[0]` is where the failure was raised, the last frame is the
/// outermost boundary it crossed.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    frames: SmallVec<[Frame; 4]>,
}

impl Error {
    /// Raise a new error at `location`
    ///
    /// The origin frame carries the bare detail; the kind's full text is
    /// printed once, by `Display`.
    pub fn new(kind: ErrorKind, location: impl Into<String>) -> Self {
        let mut frames = SmallVec::new();
        frames.push(Frame {
            location: location.into(),
            message: Some(kind.detail()),
        });
        Self { kind, frames }
    }

    pub fn transport(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Transport {
                message: message.into(),
            },
            location,
        )
    }

    pub fn decode(
        location: impl Into<String>,
        expected: impl Into<String>,
        message: impl Into<String>,
        fragment: impl Into<String>,
    ) -> Self {
        Self::new(
            ErrorKind::Decode {
                expected: expected.into(),
                message: message.into(),
                fragment: fragment.into(),
            },
            location,
        )
    }

    pub fn protocol(location: impl Into<String>, code: i64, value: Value) -> Self {
        Self::new(ErrorKind::Protocol { code, value }, location)
    }

    pub fn validation(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation(message.into()), location)
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// Context frames, innermost first
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame locations, innermost first
    pub fn locations(&self) -> Vec<&str> {
        self.frames.iter().map(|f| f.location.as_str()).collect()
    }

    /// Append an outer frame
    pub fn push_frame(&mut self, location: impl Into<String>, message: Option<String>) {
        self.frames.push(Frame {
            location: location.into(),
            message,
        });
    }

    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self.kind, ErrorKind::Decode { .. })
    }

    pub fn is_protocol(&self) -> bool {
        matches!(self.kind, ErrorKind::Protocol { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation(_))
    }

    /// Raw status code of a protocol error
    pub fn protocol_code(&self) -> Option<i64> {
        match &self.kind {
            ErrorKind::Protocol { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn protocol_status(&self) -> Option<ProtocolStatus> {
        self.protocol_code().map(ProtocolStatus::from_code)
    }

    /// Server-provided description of a protocol error
    ///
    /// Servers usually send `{"message": "..."}` as the value; some send a
    /// bare string.
    pub fn protocol_message(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Protocol { value, .. } => match value {
                Value::String(s) => Some(s),
                Value::Object(map) => map.get("message").and_then(Value::as_str),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().rev().enumerate() {
            if i > 0 {
                f.write_str(" <- ")?;
            }
            f.write_str(&frame.location)?;
        }
        write!(f, ": {}", self.kind)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Attach a location to a failing result without touching its kind
pub trait Context<T> {
    fn context(self, location: impl Into<String>) -> Result<T>;

    fn with_context<L, F>(self, f: F) -> Result<T>
    where
        L: Into<String>,
        F: FnOnce() -> L;
}

impl<T> Context<T> for Result<T> {
    fn context(self, location: impl Into<String>) -> Result<T> {
        self.map_err(|mut e| {
            e.push_frame(location, None);
            e
        })
    }

    fn with_context<L, F>(self, f: F) -> Result<T>
    where
        L: Into<String>,
        F: FnOnce() -> L,
    {
        self.map_err(|mut e| {
            e.push_frame(f(), None);
            e
        })
    }
}

/// Compact text of a JSON value for error reports
pub fn snippet(value: &Value) -> String {
    truncate(&value.to_string())
}

/// Compact text of a raw body for error reports
pub fn snippet_str(text: &str) -> String {
    truncate(text)
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_FRAGMENT_LEN) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn failing() -> Result<()> {
        Err(Error::validation("inner", "empty path segment"))
    }

    #[test]
    fn test_context_appends_in_order() {
        let err = failing()
            .context("middle")
            .with_context(|| format!("outer {}", 1))
            .unwrap_err();

        assert_eq!(err.locations(), vec!["inner", "middle", "outer 1"]);
        assert!(err.is_validation());
        assert_eq!(
            err.frames()[0].message.as_deref(),
            Some("empty path segment")
        );
        assert_eq!(err.frames()[1].message, None);
    }

    #[test]
    fn test_origin_frame_is_not_repeated() {
        let err = Error::decode("FromJson<LogEntry>", "LogEntry", "missing field `level`", "{}");
        assert_eq!(err.frames()[0].message.as_deref(), Some("missing field `level`"));
        assert_eq!(
            err.to_string(),
            "FromJson<LogEntry>: cannot decode LogEntry: missing field `level` (got {})"
        );

        let err = Error::protocol("Envelope::status", 6, json!({"message": "gone"}));
        assert_eq!(
            err.frames()[0].message.as_deref(),
            Some("no such driver (6)")
        );
    }

    #[test]
    fn test_display_outermost_first() {
        let err = failing().context("outer").unwrap_err();
        assert_eq!(
            err.to_string(),
            "outer <- inner: validation error: empty path segment"
        );
    }

    #[test]
    fn test_context_leaves_ok_untouched() {
        let ok: Result<u8> = Ok(7);
        assert_eq!(ok.context("anything").unwrap(), 7);
    }

    #[test]
    fn test_protocol_accessors() {
        let err = Error::protocol("status", 7, json!({"message": "no such element"}));
        assert_eq!(err.protocol_code(), Some(7));
        assert_eq!(err.protocol_status(), Some(ProtocolStatus::NoSuchElement));
        assert_eq!(err.protocol_message(), Some("no such element"));

        let err = Error::protocol("status", 13, json!("boom"));
        assert_eq!(err.protocol_message(), Some("boom"));
        assert_eq!(err.protocol_status(), Some(ProtocolStatus::UnknownError));

        let err = Error::transport("send", "refused");
        assert_eq!(err.protocol_code(), None);
        assert_eq!(err.protocol_message(), None);
    }

    #[test]
    fn test_snippet_truncates_long_values() {
        let long = "x".repeat(MAX_FRAGMENT_LEN * 2);
        let text = snippet_str(&long);
        assert_eq!(text.len(), MAX_FRAGMENT_LEN + 3);
        assert!(text.ends_with("..."));

        assert_eq!(snippet(&json!([1, 2])), "[1,2]");
    }
}
