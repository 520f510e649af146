//! The dataset: a header, its instances, and eagerly computed statistics.

use std::sync::Arc;

use crate::error::{ModelError, Result};
use crate::feature::Feature;
use crate::header::{CLASS_FEATURE_NAME, Header};
use crate::instance::Instance;
use crate::stats::{self, DatasetSummary, FeatureStats};
use crate::value::Value;

/// A header plus an ordered sequence of instances.
///
/// Every instance shares the dataset's header by construction. Per-feature
/// statistics and the dataset summary are computed once, when the dataset is
/// built; they are not recomputed if instances are mutated afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    header: Arc<Header>,
    instances: Vec<Instance>,
    stats: Vec<FeatureStats>,
    summary: DatasetSummary,
}

impl Dataset {
    /// Build a dataset and compute its statistics.
    pub fn new(header: Arc<Header>, instances: Vec<Instance>) -> Self {
        let (stats, summary) = stats::compute(&header, &instances);
        Self {
            header,
            instances,
            stats,
            summary,
        }
    }

    /// The empty dataset: a zero-feature header and no instances.
    ///
    /// This is the recovery value returned when a source file does not exist.
    pub fn empty() -> Self {
        Self::new(Arc::new(Header::new("", Vec::new())), Vec::new())
    }

    /// The dataset's header.
    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    /// The instances, in input order.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Number of instances.
    pub fn num_instances(&self) -> usize {
        self.instances.len()
    }

    /// Statistics for the feature at `index`.
    pub fn feature_stats(&self, index: usize) -> Result<&FeatureStats> {
        self.stats.get(index).ok_or(ModelError::IndexOutOfRange {
            index,
            len: self.stats.len(),
        })
    }

    /// Statistics for every feature, in declaration order.
    pub fn stats(&self) -> &[FeatureStats] {
        &self.stats
    }

    /// The dataset-wide summary.
    pub fn summary(&self) -> DatasetSummary {
        self.summary
    }

    /// Extract the numeric column for the feature at `index`.
    ///
    /// Missing values are `None`. Fails for features without a numeric
    /// representation (string, date, relational).
    pub fn get_column_at(&self, index: usize) -> Result<Vec<Option<f64>>> {
        let feature = self.header.feature(index)?;
        if !feature.ty.is_retrievable() {
            return Err(ModelError::NotRetrievable {
                name: feature.name.clone(),
            });
        }
        Ok(self
            .instances
            .iter()
            .map(|inst| inst.numeric(index))
            .collect())
    }

    /// Extract the numeric column for the feature named `name`.
    pub fn get_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        self.get_column_at(self.header.index_of(name)?)
    }

    /// Extract numeric columns for a set of feature positions.
    pub fn get_columns_by_indices(&self, indices: &[usize]) -> Result<Vec<Vec<Option<f64>>>> {
        indices.iter().map(|&idx| self.get_column_at(idx)).collect()
    }

    /// Extract numeric columns for a set of feature names.
    pub fn get_columns_by_names(&self, names: &[&str]) -> Result<Vec<Vec<Option<f64>>>> {
        names.iter().map(|name| self.get_column(name)).collect()
    }

    /// Extract numeric columns for a set of features, matched structurally.
    pub fn get_columns(&self, features: &[Feature]) -> Result<Vec<Vec<Option<f64>>>> {
        features
            .iter()
            .map(|feature| {
                let index = self
                    .header
                    .features()
                    .iter()
                    .position(|f| f == feature)
                    .ok_or_else(|| ModelError::feature_not_found(&feature.name))?;
                self.get_column_at(index)
            })
            .collect()
    }

    /// Extract every retrievable non-class column, in declaration order.
    pub fn get_inputs(&self) -> Vec<Vec<Option<f64>>> {
        let class = self.header.class_index();
        self.header
            .features()
            .iter()
            .enumerate()
            .filter(|(idx, feature)| Some(*idx) != class && feature.ty.is_retrievable())
            .map(|(idx, _)| {
                self.instances
                    .iter()
                    .map(|inst| inst.numeric(idx))
                    .collect()
            })
            .collect()
    }

    /// Extract the class label (nominal index) of every instance.
    ///
    /// Fails when no class feature is declared or the class feature is not
    /// nominal. Missing class values are `None`.
    pub fn get_classes(&self) -> Result<Vec<Option<usize>>> {
        let index = self
            .header
            .class_index()
            .ok_or_else(|| ModelError::feature_not_found(CLASS_FEATURE_NAME))?;
        let feature = self.header.feature(index)?;
        if !matches!(feature.ty, crate::feature::FeatureType::Nominal { .. }) {
            return Err(ModelError::NotRetrievable {
                name: feature.name.clone(),
            });
        }
        Ok(self
            .instances
            .iter()
            .map(|inst| match inst.values().get(index) {
                Some(Value::Index(i)) => Some(*i),
                _ => None,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Feature;
    use crate::stats::FeatureStats;

    fn sample() -> Dataset {
        let header = Arc::new(Header::new(
            "test",
            vec![
                Feature::numeric("a"),
                Feature::string("note"),
                Feature::nominal("Class", vec!["yes".to_string(), "no".to_string()]),
            ],
        ));
        let rows: [(&str, &str, &str); 3] = [("1.0", "x", "yes"), ("2.0", "y", "no"), ("?", "z", "yes")];
        let instances = rows
            .iter()
            .map(|(a, note, class)| {
                let mut inst = Instance::new(Arc::clone(&header));
                inst.set_text(0, a).unwrap();
                inst.set_text(1, note).unwrap();
                inst.set_text(2, class).unwrap();
                inst
            })
            .collect();
        Dataset::new(header, instances)
    }

    #[test]
    fn test_statistics_are_eager() {
        let ds = sample();
        assert_eq!(
            ds.feature_stats(0).unwrap(),
            &FeatureStats::Numeric {
                missing: 1,
                min: 1.0,
                max: 2.0
            }
        );
        assert_eq!(ds.summary().instances_with_missing, 1);
        assert_eq!(ds.summary().total_missing_values, 1);
    }

    #[test]
    fn test_get_column() {
        let ds = sample();
        assert_eq!(
            ds.get_column("a").unwrap(),
            vec![Some(1.0), Some(2.0), None]
        );
        assert!(matches!(
            ds.get_column("note"),
            Err(ModelError::NotRetrievable { .. })
        ));
        assert!(matches!(
            ds.get_column("nope"),
            Err(ModelError::FeatureNotFound { .. })
        ));
    }

    #[test]
    fn test_get_inputs_skips_class_and_strings() {
        let ds = sample();
        let inputs = ds.get_inputs();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0], vec![Some(1.0), Some(2.0), None]);
    }

    #[test]
    fn test_get_classes() {
        let ds = sample();
        assert_eq!(
            ds.get_classes().unwrap(),
            vec![Some(0), Some(1), Some(0)]
        );
    }

    #[test]
    fn test_get_classes_without_class_feature() {
        let header = Arc::new(Header::new("t", vec![Feature::numeric("a")]));
        let ds = Dataset::new(header, Vec::new());
        assert!(matches!(
            ds.get_classes(),
            Err(ModelError::FeatureNotFound { .. })
        ));
    }

    #[test]
    fn test_get_columns_structural() {
        let ds = sample();
        let cols = ds.get_columns(&[Feature::numeric("a")]).unwrap();
        assert_eq!(cols[0], vec![Some(1.0), Some(2.0), None]);
        assert!(ds.get_columns(&[Feature::integer("a")]).is_err());
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::empty();
        assert_eq!(ds.num_instances(), 0);
        assert!(ds.header().is_empty());
        assert_eq!(ds.summary(), DatasetSummary::default());
    }
}
