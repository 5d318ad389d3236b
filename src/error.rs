//! Error types
//!
//! Whole-document failures. Anything that can be attached to a line of the
//! input is reported as a [`Reason`](crate::reason::Reason) instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapError {
    /// The input is not well-formed XML.
    #[error("malformed document at {line}:{column}: {message}")]
    MalformedDocument {
        line: usize,
        column: usize,
        message: String,
    },

    /// Well-formed XML whose root is none of the supported formats.
    #[error("unsupported document type: root element <{root}>")]
    UnsupportedDocumentType { root: String },

    /// A payload expected to be a CAP alert is something else.
    #[error("not a CAP document: {reason}")]
    NotCapDocument { reason: String },

    /// A profile code that no registered profile answers to.
    #[error("unknown profile: {code}")]
    UnknownProfile { code: String },
}

impl CapError {
    pub fn malformed(line: usize, column: usize, message: impl Into<String>) -> Self {
        CapError::MalformedDocument {
            line,
            column,
            message: message.into(),
        }
    }

    /// Line the error can be attached to, 0 when it has none.
    pub fn line(&self) -> usize {
        match self {
            CapError::MalformedDocument { line, .. } => *line,
            _ => 0,
        }
    }
}

impl From<roxmltree::Error> for CapError {
    fn from(err: roxmltree::Error) -> Self {
        let pos = err.pos();
        CapError::malformed(pos.row as usize, pos.col as usize, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roxmltree_errors_keep_position() {
        let err = roxmltree::Document::parse("<a>\n<b></a>").unwrap_err();
        let cap: CapError = err.into();
        match cap {
            CapError::MalformedDocument { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_line_is_zero_without_position() {
        let err = CapError::UnsupportedDocumentType {
            root: "html".to_string(),
        };
        assert_eq!(err.line(), 0);
        assert_eq!(err.to_string(), "unsupported document type: root element <html>");
    }
}
