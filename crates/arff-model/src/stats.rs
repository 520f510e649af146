//! Per-feature and dataset-wide statistics.
//!
//! Statistics are computed once, eagerly, when a [`crate::Dataset`] is
//! constructed. The pass is sequential; each feature's aggregation is
//! independent and could be parallelized across features, at the cost of
//! last-bit floating-point nondeterminism on large datasets.

use crate::feature::FeatureType;
use crate::header::Header;
use crate::instance::Instance;
use crate::value::Value;

/// Statistics for one feature, computed over the full instance set.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum FeatureStats {
    /// Integer and numeric features: missing count plus min/max over the
    /// non-missing values. Min and max are 0.0 when every value is missing.
    Numeric { missing: usize, min: f64, max: f64 },
    /// Nominal features: histogram per declared label (zero counts included),
    /// per-label probability (`count / instances`), and per-label ratio to
    /// the least frequent label (`count / min(counts)`, non-finite replaced
    /// by 0.0).
    Nominal {
        missing: usize,
        counts: Vec<usize>,
        probabilities: Vec<f64>,
        ratios: Vec<f64>,
    },
    /// String, date, and relational features: missing count only.
    Plain { missing: usize },
}

impl FeatureStats {
    /// Number of missing values observed for this feature.
    pub fn missing_count(&self) -> usize {
        match self {
            FeatureStats::Numeric { missing, .. }
            | FeatureStats::Nominal { missing, .. }
            | FeatureStats::Plain { missing } => *missing,
        }
    }
}

/// Dataset-wide aggregate statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct DatasetSummary {
    /// Instances with at least one missing feature value.
    pub instances_with_missing: usize,
    /// Sum of the per-feature missing counts.
    pub total_missing_values: usize,
}

enum Accumulator {
    Numeric {
        missing: usize,
        min: Option<f64>,
        max: Option<f64>,
    },
    Nominal {
        missing: usize,
        counts: Vec<usize>,
    },
    Plain {
        missing: usize,
    },
}

impl Accumulator {
    fn for_type(ty: &FeatureType) -> Self {
        match ty {
            FeatureType::Integer | FeatureType::Numeric => Accumulator::Numeric {
                missing: 0,
                min: None,
                max: None,
            },
            FeatureType::Nominal { labels } => Accumulator::Nominal {
                missing: 0,
                counts: vec![0; labels.len()],
            },
            FeatureType::String | FeatureType::Date { .. } | FeatureType::Relational { .. } => {
                Accumulator::Plain { missing: 0 }
            }
        }
    }

    fn observe(&mut self, value: &Value) {
        match self {
            Accumulator::Numeric { missing, min, max } => match value.as_f64() {
                Some(v) => {
                    *min = Some(min.map_or(v, |m| m.min(v)));
                    *max = Some(max.map_or(v, |m| m.max(v)));
                }
                None => *missing += 1,
            },
            Accumulator::Nominal { missing, counts } => match value {
                Value::Index(i) if *i < counts.len() => counts[*i] += 1,
                _ => *missing += 1,
            },
            Accumulator::Plain { missing } => {
                if value.is_missing() {
                    *missing += 1;
                }
            }
        }
    }

    fn finish(self, instance_count: usize) -> FeatureStats {
        match self {
            Accumulator::Numeric { missing, min, max } => FeatureStats::Numeric {
                missing,
                min: min.unwrap_or(0.0),
                max: max.unwrap_or(0.0),
            },
            Accumulator::Nominal { missing, counts } => {
                let total = instance_count as f64;
                let probabilities: Vec<f64> = counts
                    .iter()
                    .map(|&c| finite_or_zero(c as f64 / total))
                    .collect();
                let least = counts.iter().copied().min().unwrap_or(0) as f64;
                let ratios: Vec<f64> = counts
                    .iter()
                    .map(|&c| finite_or_zero(c as f64 / least))
                    .collect();
                FeatureStats::Nominal {
                    missing,
                    counts,
                    probabilities,
                    ratios,
                }
            }
            Accumulator::Plain { missing } => FeatureStats::Plain { missing },
        }
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Compute per-feature statistics and the dataset summary in one pass.
pub(crate) fn compute(
    header: &Header,
    instances: &[Instance],
) -> (Vec<FeatureStats>, DatasetSummary) {
    let mut accumulators: Vec<Accumulator> = header
        .features()
        .iter()
        .map(|f| Accumulator::for_type(&f.ty))
        .collect();

    let mut instances_with_missing = 0usize;
    for instance in instances {
        if instance.has_missing() {
            instances_with_missing += 1;
        }
        for (acc, value) in accumulators.iter_mut().zip(instance.values()) {
            acc.observe(value);
        }
    }

    let stats: Vec<FeatureStats> = accumulators
        .into_iter()
        .map(|acc| acc.finish(instances.len()))
        .collect();
    let total_missing_values = stats.iter().map(FeatureStats::missing_count).sum();

    (
        stats,
        DatasetSummary {
            instances_with_missing,
            total_missing_values,
        },
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::feature::Feature;

    fn build(values: &[Option<f64>]) -> (Arc<Header>, Vec<Instance>) {
        let header = Arc::new(Header::new("t", vec![Feature::numeric("a")]));
        let instances = values
            .iter()
            .map(|v| {
                let mut inst = Instance::new(Arc::clone(&header));
                if let Some(v) = v {
                    inst.set(0, Value::Real(*v)).unwrap();
                }
                inst
            })
            .collect();
        (header, instances)
    }

    #[test]
    fn test_numeric_min_max_missing() {
        let (header, instances) = build(&[Some(1.0), Some(2.0), None, Some(4.0)]);
        let (stats, summary) = compute(&header, &instances);
        assert_eq!(
            stats[0],
            FeatureStats::Numeric {
                missing: 1,
                min: 1.0,
                max: 4.0
            }
        );
        assert_eq!(summary.instances_with_missing, 1);
        assert_eq!(summary.total_missing_values, 1);
    }

    #[test]
    fn test_all_missing_defaults_to_zero() {
        let (header, instances) = build(&[None, None]);
        let (stats, _) = compute(&header, &instances);
        assert_eq!(
            stats[0],
            FeatureStats::Numeric {
                missing: 2,
                min: 0.0,
                max: 0.0
            }
        );
    }

    #[test]
    fn test_nominal_histogram() {
        let header = Arc::new(Header::new(
            "t",
            vec![Feature::nominal(
                "c",
                vec!["x".to_string(), "y".to_string()],
            )],
        ));
        let mut instances = Vec::new();
        for idx in [0usize, 0, 0, 1] {
            let mut inst = Instance::new(Arc::clone(&header));
            inst.set(0, Value::Index(idx)).unwrap();
            instances.push(inst);
        }
        let (stats, _) = compute(&header, &instances);
        let FeatureStats::Nominal {
            missing,
            counts,
            probabilities,
            ratios,
        } = &stats[0]
        else {
            panic!("expected nominal stats");
        };
        assert_eq!(*missing, 0);
        assert_eq!(counts, &[3, 1]);
        assert_eq!(probabilities, &[0.75, 0.25]);
        assert_eq!(ratios, &[3.0, 1.0]);
    }

    #[test]
    fn test_nominal_zero_count_ratio_is_zeroed() {
        let header = Arc::new(Header::new(
            "t",
            vec![Feature::nominal(
                "c",
                vec!["x".to_string(), "y".to_string()],
            )],
        ));
        let mut inst = Instance::new(Arc::clone(&header));
        inst.set(0, Value::Index(0)).unwrap();
        let (stats, _) = compute(&header, &[inst]);
        let FeatureStats::Nominal { counts, ratios, .. } = &stats[0] else {
            panic!("expected nominal stats");
        };
        // "y" was never seen, so min(counts) is 0 and every ratio collapses.
        assert_eq!(counts, &[1, 0]);
        assert_eq!(ratios, &[0.0, 0.0]);
    }

    #[test]
    fn test_plain_counts_missing_only() {
        let header = Arc::new(Header::new("t", vec![Feature::string("s")]));
        let mut with_value = Instance::new(Arc::clone(&header));
        with_value.set(0, Value::Text("hi".to_string())).unwrap();
        let without = Instance::new(Arc::clone(&header));
        let (stats, summary) = compute(&header, &[with_value, without]);
        assert_eq!(stats[0], FeatureStats::Plain { missing: 1 });
        assert_eq!(summary.instances_with_missing, 1);
    }
}
