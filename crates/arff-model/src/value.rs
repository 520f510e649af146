//! Cell values held by instances.

use crate::instance::Instance;

/// A single cell value.
///
/// The representation kind is fixed by the feature's declared type: `Int` for
/// integer features, `Real` for numeric features, `Text` for string features,
/// `Index` (a position in the declared label list) for nominal features,
/// `Timestamp` (seconds since the Unix epoch) for date features, and `Rows`
/// for relational features. `Missing` is valid for every feature type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicitly absent value (`?` literal or never set).
    Missing,
    Int(i64),
    Real(f64),
    Text(String),
    Index(usize),
    Timestamp(i64),
    Rows(Vec<Instance>),
}

impl Value {
    /// Whether this value is missing.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// The numeric representation of this value, if it has one.
    ///
    /// Only integer, real, and nominal-index values are numeric; everything
    /// else (including missing) yields `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Real(v) => Some(*v),
            Value::Index(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Short name of the representation kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Missing => "missing",
            Value::Int(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Index(_) => "nominal index",
            Value::Timestamp(_) => "timestamp",
            Value::Rows(_) => "nested rows",
        }
    }
}
