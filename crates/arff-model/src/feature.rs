//! Feature declarations and the closed feature-type system.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{ModelError, Result};
use crate::escape::quote;
use crate::value::Value;

/// Default date format (ISO-8601, chrono strftime syntax).
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The closed set of feature types.
///
/// Equality is structural for `Nominal` (over the label list) and
/// `Relational` (over the child features), and by variant identity for the
/// singleton types; the derived implementations give exactly that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FeatureType {
    Integer,
    Numeric,
    String,
    /// Fixed, ordered set of labels; values are stored as label positions.
    Nominal { labels: Vec<String> },
    /// Date parsed against an exact chrono format string.
    Date { format: String },
    /// Nested sequence of rows over a child schema.
    Relational { children: Vec<Feature> },
}

impl FeatureType {
    /// The type keyword used in error messages and declarations.
    pub fn keyword(&self) -> &'static str {
        match self {
            FeatureType::Integer => "integer",
            FeatureType::Numeric => "numeric",
            FeatureType::String => "string",
            FeatureType::Nominal { .. } => "nominal",
            FeatureType::Date { .. } => "date",
            FeatureType::Relational { .. } => "relational",
        }
    }

    /// Whether values of this type have a numeric representation.
    ///
    /// Only retrievable features participate in feature-matrix extraction.
    pub fn is_retrievable(&self) -> bool {
        matches!(
            self,
            FeatureType::Integer | FeatureType::Numeric | FeatureType::Nominal { .. }
        )
    }

    /// The implicit value of a feature omitted from a sparse row.
    ///
    /// Retrievable types default to their zero value and are *not* missing;
    /// string, date, and relational features have no zero and stay absent.
    pub fn default_sparse_value(&self) -> Value {
        match self {
            FeatureType::Integer => Value::Int(0),
            FeatureType::Numeric => Value::Real(0.0),
            FeatureType::Nominal { .. } => Value::Index(0),
            FeatureType::String | FeatureType::Date { .. } | FeatureType::Relational { .. } => {
                Value::Missing
            }
        }
    }

    /// Whether `value` is missing. True only for [`Value::Missing`]; a
    /// type's zero value is never missing.
    pub fn is_missing(&self, value: &Value) -> bool {
        value.is_missing()
    }

    /// Parse a scalar token into a value of this type.
    ///
    /// Numeric parsing is locale-independent (`str::parse`). Relational
    /// values are nested row sequences and cannot be parsed here; the grammar
    /// reader handles them by recursing over the child schema.
    pub fn parse_scalar(&self, text: &str, feature: &str) -> Result<Value> {
        match self {
            FeatureType::Integer => text
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| ModelError::invalid_value(text, feature, "integer")),
            FeatureType::Numeric => text
                .trim()
                .parse::<f64>()
                .map(Value::Real)
                .map_err(|_| ModelError::invalid_value(text, feature, "numeric")),
            FeatureType::String => Ok(Value::Text(text.to_string())),
            FeatureType::Nominal { labels } => {
                if let Some(index) = labels.iter().position(|label| label == text) {
                    return Ok(Value::Index(index));
                }
                // A bare in-range number addresses a label by position.
                if let Ok(index) = text.trim().parse::<usize>()
                    && index < labels.len()
                {
                    return Ok(Value::Index(index));
                }
                Err(ModelError::unknown_label(text, feature))
            }
            FeatureType::Date { format } => parse_date(text, format),
            FeatureType::Relational { .. } => {
                Err(ModelError::invalid_value(text, feature, "relational"))
            }
        }
    }

    /// Check that `value` has the representation kind this type requires.
    ///
    /// Missing is accepted for every type; a nominal index must be within the
    /// declared label list.
    pub fn validate(&self, value: &Value, feature: &str) -> Result<()> {
        let ok = match (self, value) {
            (_, Value::Missing) => true,
            (FeatureType::Integer, Value::Int(_)) => true,
            (FeatureType::Numeric, Value::Real(_) | Value::Int(_)) => true,
            (FeatureType::String, Value::Text(_)) => true,
            (FeatureType::Nominal { labels }, Value::Index(i)) => *i < labels.len(),
            (FeatureType::Date { .. }, Value::Timestamp(_)) => true,
            (FeatureType::Relational { children }, Value::Rows(rows)) => {
                rows.iter().all(|row| row.len() == children.len())
            }
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(ModelError::invalid_value(
                format!("{} value", value.kind_name()),
                feature,
                self.keyword(),
            ))
        }
    }

    /// Render `value` back to ARFF text, re-applying the shared quoting rules.
    pub fn value_to_text(&self, value: &Value) -> String {
        match (self, value) {
            (_, Value::Missing) => "?".to_string(),
            (_, Value::Int(i)) => i.to_string(),
            (_, Value::Real(v)) => v.to_string(),
            (FeatureType::String, Value::Text(text)) => quote(text),
            (FeatureType::Nominal { labels }, Value::Index(i)) => {
                labels.get(*i).map_or_else(|| "?".to_string(), |l| quote(l))
            }
            (FeatureType::Date { format }, Value::Timestamp(secs)) => {
                DateTime::from_timestamp(*secs, 0)
                    .map_or_else(|| "?".to_string(), |dt| dt.naive_utc().format(format).to_string())
            }
            (FeatureType::Relational { .. }, Value::Rows(rows)) => {
                let body: Vec<String> = rows.iter().map(|row| row.to_text()).collect();
                quote(&body.join("\n"))
            }
            _ => "?".to_string(),
        }
    }
}

fn parse_date(text: &str, format: &str) -> Result<Value> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
        return Ok(Value::Timestamp(dt.and_utc().timestamp()));
    }
    // Date-only formats have no time component to fill in.
    if let Ok(date) = NaiveDate::parse_from_str(text, format)
        && let Some(dt) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(Value::Timestamp(dt.and_utc().timestamp()));
    }
    Err(ModelError::DateFormat {
        value: text.to_string(),
        format: format.to_string(),
    })
}

/// A named, typed column of the dataset. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Feature {
    pub name: String,
    pub ty: FeatureType,
}

impl Feature {
    /// Create a feature from a name and type.
    pub fn new(name: impl Into<String>, ty: FeatureType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Create an integer feature.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FeatureType::Integer)
    }

    /// Create a numeric feature.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, FeatureType::Numeric)
    }

    /// Create a string feature.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FeatureType::String)
    }

    /// Create a nominal feature over an ordered label list.
    pub fn nominal(name: impl Into<String>, labels: Vec<String>) -> Self {
        Self::new(name, FeatureType::Nominal { labels })
    }

    /// Create a date feature with an explicit format.
    pub fn date(name: impl Into<String>, format: impl Into<String>) -> Self {
        Self::new(
            name,
            FeatureType::Date {
                format: format.into(),
            },
        )
    }

    /// Create a relational feature over a child schema.
    pub fn relational(name: impl Into<String>, children: Vec<Feature>) -> Self {
        Self::new(name, FeatureType::Relational { children })
    }
}
