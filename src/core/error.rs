//! Error types for the svmlight/libsvm codec

use thiserror::Error;

/// Errors produced while loading or dumping svmlight/libsvm data.
///
/// Syntax errors carry the 1-based line number and the raw line text so a
/// caller can point at the offending record. A syntax error aborts the whole
/// load; no partial dataset is ever returned.
#[derive(Error, Debug)]
pub enum SvmlightError {
    #[error("empty line {line} in svmlight/libsvm input")]
    EmptyLine { line: usize },

    #[error("non-numeric or missing label {token:?} at line {line}: {text:?}")]
    InvalidLabel {
        line: usize,
        token: String,
        text: String,
    },

    #[error("malformed token {token:?} at line {line} (neither qid marker nor index:value pair): {text:?}")]
    MalformedToken {
        line: usize,
        token: String,
        text: String,
    },

    #[error("malformed feature {token:?} at line {line} (expected index:value): {text:?}")]
    MalformedFeature {
        line: usize,
        token: String,
        text: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("allocation failure: {0}")]
    Allocation(String),

    #[error("buffer shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, SvmlightError>;

impl SvmlightError {
    /// Line number the error refers to, for syntax errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            SvmlightError::EmptyLine { line }
            | SvmlightError::InvalidLabel { line, .. }
            | SvmlightError::MalformedToken { line, .. }
            | SvmlightError::MalformedFeature { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_line_context() {
        let err = SvmlightError::MalformedFeature {
            line: 3,
            token: "1=0.5".to_string(),
            text: "+1 1=0.5".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("1=0.5"));
        assert!(msg.contains("line 3"));
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = SvmlightError::from(io);
        assert!(matches!(err, SvmlightError::Io(_)));
        assert_eq!(err.line(), None);
    }
}
