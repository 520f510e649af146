//! Error types for ARFF parsing and deserialization.
//!
//! Any error aborts the in-progress parse entirely: no partial dataset is
//! ever returned, and there is no mid-file resume.

use std::path::PathBuf;

use thiserror::Error;

use arff_model::ModelError;

/// Errors that can occur when tokenizing or parsing ARFF input.
#[derive(Debug, Error)]
pub enum ReadError {
    /// A quoted token not closed before end of line or end of file.
    #[error("unterminated quoted token")]
    UnterminatedQuote,

    /// A malformed `\u` escape; only `\u001E` is recognized.
    #[error("invalid escape sequence '{sequence}'")]
    InvalidEscape { sequence: String },

    /// A token where a different token was required.
    #[error("unexpected token '{found}', expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
    },

    /// An unknown attribute type keyword.
    #[error("unknown attribute type '{keyword}' for attribute '{feature}'")]
    UnknownType { keyword: String, feature: String },

    /// A relational block closed with the wrong name.
    #[error("relational attribute '{feature}' closed by '@end {found}'")]
    RelationalEndMismatch { feature: String, found: String },

    /// A sparse row index outside the declared feature range.
    #[error("sparse index {index} out of range for {count} features")]
    SparseIndexOutOfRange { index: usize, count: usize },

    /// An unparsable row weight.
    #[error("invalid row weight '{token}'")]
    InvalidWeight { token: String },

    /// A token where end of line was required.
    #[error("expected end of line, found '{found}'")]
    ExpectedEndOfLine { found: String },

    /// End of line or end of file where a token was required.
    #[error("unexpected end of line, expected {expected}")]
    UnexpectedEndOfLine { expected: &'static str },

    /// `@data` reached with no attribute declarations.
    #[error("no attributes declared before @data")]
    EmptyAttributeList,

    /// `read_header` called after the header was already read.
    #[error("header has already been read")]
    HeaderAlreadyRead,

    /// `read_instance` called before the header was read.
    #[error("cannot read instances before the header")]
    HeaderNotRead,

    /// A path whose extension is not the expected one.
    #[error("'{path}' does not have the .arff extension")]
    WrongExtension { path: PathBuf },

    /// A value invalid for its declared feature type.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Background parse task failure.
    #[error("parse task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for read operations.
pub type Result<T> = std::result::Result<T, ReadError>;

impl ReadError {
    /// Create an UnexpectedToken error.
    pub fn unexpected(found: impl Into<String>, expected: &'static str) -> Self {
        Self::UnexpectedToken {
            found: found.into(),
            expected,
        }
    }

    /// Create a WrongExtension error.
    pub fn wrong_extension(path: impl Into<PathBuf>) -> Self {
        Self::WrongExtension { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReadError::unexpected("@foo", "@attribute or @data");
        assert_eq!(
            format!("{err}"),
            "unexpected token '@foo', expected @attribute or @data"
        );

        let err = ReadError::SparseIndexOutOfRange { index: 5, count: 3 };
        assert_eq!(format!("{err}"), "sparse index 5 out of range for 3 features");
    }

    #[test]
    fn test_model_error_conversion() {
        let model_err = ModelError::feature_not_found("a");
        let err: ReadError = model_err.into();
        assert!(matches!(err, ReadError::Model(_)));
    }
}
