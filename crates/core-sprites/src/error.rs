use thiserror::Error;

/// A violation of the sprite-definition textual format.
///
/// Carries the line number, a human-readable message, and (when available)
/// the offending line, so the binary can reproduce the file/line/message/
/// excerpt report spec.md §7 asks for.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {lineno}: {message}")]
pub struct ParseError {
    pub lineno: usize,
    pub message: String,
    pub line: Option<String>,
}

impl ParseError {
    pub fn new(lineno: usize, message: impl Into<String>, line: Option<String>) -> Self {
        Self {
            lineno,
            message: message.into(),
            line,
        }
    }
}
