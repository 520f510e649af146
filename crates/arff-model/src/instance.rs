//! A single data row, bound to the header it was declared against.

use std::sync::Arc;

use crate::error::{ModelError, Result};
use crate::header::Header;
use crate::value::Value;

/// One data row: exactly one value slot per declared feature.
///
/// An instance is bound to one header for its whole lifetime and its length
/// always equals the header's feature count. Values are indexed by feature
/// position; assignment validates the value against the declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    header: Arc<Header>,
    values: Vec<Value>,
    weight: f64,
}

impl Instance {
    /// Create an instance with every value missing and weight 1.0.
    pub fn new(header: Arc<Header>) -> Self {
        let values = vec![Value::Missing; header.len()];
        Self {
            header,
            values,
            weight: 1.0,
        }
    }

    /// Create an instance from pre-built values, checking the row length.
    pub fn with_values(header: Arc<Header>, values: Vec<Value>, weight: f64) -> Result<Self> {
        if values.len() != header.len() {
            return Err(ModelError::RowLengthMismatch {
                expected: header.len(),
                actual: values.len(),
            });
        }
        Ok(Self {
            header,
            values,
            weight,
        })
    }

    /// The header this instance is bound to.
    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    /// Number of value slots (always the header's feature count).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no value slots.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The row weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Set the row weight.
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    /// The value at feature position `index`.
    pub fn get(&self, index: usize) -> Result<&Value> {
        self.values.get(index).ok_or(ModelError::IndexOutOfRange {
            index,
            len: self.values.len(),
        })
    }

    /// Assign `value` to feature position `index`.
    ///
    /// The value must match the declared feature type; `Value::Missing` is
    /// accepted everywhere and marks the slot missing.
    pub fn set(&mut self, index: usize, value: Value) -> Result<()> {
        let feature = self.header.feature(index)?;
        feature.ty.validate(&value, &feature.name)?;
        self.values[index] = value;
        Ok(())
    }

    /// Parse `text` against the declared feature type and assign it.
    ///
    /// The literal `?` always marks the value missing, independent of type.
    pub fn set_text(&mut self, index: usize, text: &str) -> Result<()> {
        let feature = self.header.feature(index)?;
        let value = if text == "?" {
            Value::Missing
        } else {
            feature.ty.parse_scalar(text, &feature.name)?
        };
        self.values[index] = value;
        Ok(())
    }

    /// Mark the value at `index` missing.
    pub fn set_missing(&mut self, index: usize) -> Result<()> {
        self.set(index, Value::Missing)
    }

    /// Whether the value at `index` is missing.
    pub fn is_missing(&self, index: usize) -> Result<bool> {
        self.get(index).map(Value::is_missing)
    }

    /// Whether any value in the row is missing.
    pub fn has_missing(&self) -> bool {
        self.values.iter().any(Value::is_missing)
    }

    /// Number of missing values in the row.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// The numeric representation of the value at `index`, if any.
    pub fn numeric(&self, index: usize) -> Option<f64> {
        self.values.get(index).and_then(Value::as_f64)
    }

    /// All values, in feature order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Render the row as dense comma-separated ARFF text.
    pub fn to_text(&self) -> String {
        let cells: Vec<String> = self
            .header
            .features()
            .iter()
            .zip(&self.values)
            .map(|(feature, value)| feature.ty.value_to_text(value))
            .collect();
        cells.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Feature;

    fn header() -> Arc<Header> {
        Arc::new(Header::new(
            "test",
            vec![
                Feature::numeric("a"),
                Feature::nominal("Class", vec!["yes".to_string(), "no".to_string()]),
            ],
        ))
    }

    #[test]
    fn test_new_is_all_missing() {
        let inst = Instance::new(header());
        assert_eq!(inst.len(), 2);
        assert!(inst.has_missing());
        assert_eq!(inst.missing_count(), 2);
        assert_eq!(inst.weight(), 1.0);
    }

    #[test]
    fn test_set_validates_type() {
        let mut inst = Instance::new(header());
        inst.set(0, Value::Real(1.5)).unwrap();
        assert!(matches!(
            inst.set(0, Value::Text("x".to_string())),
            Err(ModelError::InvalidValue { .. })
        ));
        assert!(matches!(
            inst.set(7, Value::Real(0.0)),
            Err(ModelError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_set_text_parses_and_handles_missing() {
        let mut inst = Instance::new(header());
        inst.set_text(0, "2.5").unwrap();
        assert_eq!(inst.get(0).unwrap(), &Value::Real(2.5));

        inst.set_text(1, "no").unwrap();
        assert_eq!(inst.get(1).unwrap(), &Value::Index(1));

        inst.set_text(0, "?").unwrap();
        assert!(inst.is_missing(0).unwrap());

        assert!(inst.set_text(0, "not-a-number").is_err());
    }

    #[test]
    fn test_with_values_checks_length() {
        let result = Instance::with_values(header(), vec![Value::Real(1.0)], 1.0);
        assert!(matches!(
            result,
            Err(ModelError::RowLengthMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_to_text() {
        let mut inst = Instance::new(header());
        inst.set(0, Value::Real(1.5)).unwrap();
        inst.set(1, Value::Index(0)).unwrap();
        assert_eq!(inst.to_text(), "1.5,yes");

        inst.set_missing(1).unwrap();
        assert_eq!(inst.to_text(), "1.5,?");
    }
}
