//! Error types for the ARFF data model.

use thiserror::Error;

/// Errors that can occur when building or querying the data model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Header lookup by an undeclared feature name.
    #[error("no feature named '{name}'")]
    FeatureNotFound { name: String },

    /// Header or instance lookup by an out-of-range feature index.
    #[error("feature index {index} out of range for {len} features")]
    IndexOutOfRange { index: usize, len: usize },

    /// A value that is lexically incompatible with the feature's declared type.
    #[error("value '{value}' is not valid for {expected} feature '{feature}'")]
    InvalidValue {
        value: String,
        feature: String,
        expected: &'static str,
    },

    /// A nominal value that is not in the declared label set.
    #[error("label '{label}' is not declared for nominal feature '{feature}'")]
    UnknownLabel { label: String, feature: String },

    /// A date value that does not match the feature's format string.
    #[error("date '{value}' does not match format '{format}'")]
    DateFormat { value: String, format: String },

    /// A row whose length differs from the declared feature count.
    #[error("row has {actual} values but the header declares {expected} features")]
    RowLengthMismatch { expected: usize, actual: usize },

    /// Numeric extraction from a feature without a numeric representation.
    #[error("feature '{name}' has no numeric representation")]
    NotRetrievable { name: String },
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

impl ModelError {
    /// Create a FeatureNotFound error.
    pub fn feature_not_found(name: impl Into<String>) -> Self {
        Self::FeatureNotFound { name: name.into() }
    }

    /// Create an InvalidValue error.
    pub fn invalid_value(
        value: impl Into<String>,
        feature: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidValue {
            value: value.into(),
            feature: feature.into(),
            expected,
        }
    }

    /// Create an UnknownLabel error.
    pub fn unknown_label(label: impl Into<String>, feature: impl Into<String>) -> Self {
        Self::UnknownLabel {
            label: label.into(),
            feature: feature.into(),
        }
    }
}
