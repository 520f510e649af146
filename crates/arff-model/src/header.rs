//! Dataset schema: relation name plus ordered feature declarations.

use crate::error::{ModelError, Result};
use crate::feature::Feature;

/// Name (case-insensitive) that marks a feature as the class column.
pub const CLASS_FEATURE_NAME: &str = "Class";

/// The schema of a dataset. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Header {
    relation: String,
    features: Vec<Feature>,
}

impl Header {
    /// Create a header from a relation name and an ordered feature list.
    pub fn new(relation: impl Into<String>, features: Vec<Feature>) -> Self {
        Self {
            relation: relation.into(),
            features,
        }
    }

    /// The relation name.
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// The ordered feature declarations.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Number of declared features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether no features are declared.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// The feature at `index`.
    pub fn feature(&self, index: usize) -> Result<&Feature> {
        self.features
            .get(index)
            .ok_or(ModelError::IndexOutOfRange {
                index,
                len: self.features.len(),
            })
    }

    /// The position of the feature named `name`.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.features
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| ModelError::feature_not_found(name))
    }

    /// The feature named `name`.
    pub fn feature_named(&self, name: &str) -> Result<&Feature> {
        self.index_of(name).map(|idx| &self.features[idx])
    }

    /// Position of the class feature: the first feature named "Class"
    /// (case-insensitive), if any.
    pub fn class_index(&self) -> Option<usize> {
        self.features
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(CLASS_FEATURE_NAME))
    }

    /// The class feature, if one is declared.
    pub fn class_feature(&self) -> Option<&Feature> {
        self.class_index().map(|idx| &self.features[idx])
    }
}
