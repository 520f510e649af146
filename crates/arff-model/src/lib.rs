//! ARFF data model: feature types, headers, instances, and dataset statistics.
//!
//! This crate holds the typed in-memory representation of an ARFF-style
//! dataset: a closed feature-type system ([`FeatureType`]), an immutable
//! schema ([`Header`]), fixed-length rows indexed by feature position
//! ([`Instance`]), and a [`Dataset`] that eagerly computes per-feature and
//! dataset-wide statistics on construction.
//!
//! Parsing the textual format lives in the companion `arff-read` crate; this
//! crate performs no I/O.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use arff_model::{Dataset, Feature, Header, Instance, Value};
//!
//! let header = Arc::new(Header::new(
//!     "weather",
//!     vec![
//!         Feature::numeric("temperature"),
//!         Feature::nominal("Class", vec!["sun".to_string(), "rain".to_string()]),
//!     ],
//! ));
//!
//! let mut row = Instance::new(Arc::clone(&header));
//! row.set(0, Value::Real(21.5)).unwrap();
//! row.set_text(1, "sun").unwrap();
//!
//! let dataset = Dataset::new(header, vec![row]);
//! assert_eq!(dataset.get_classes().unwrap(), vec![Some(0)]);
//! ```

mod dataset;
mod error;
pub mod escape;
mod feature;
mod header;
mod instance;
mod stats;
mod value;

pub use dataset::Dataset;
pub use error::{ModelError, Result};
pub use feature::{DEFAULT_DATE_FORMAT, Feature, FeatureType};
pub use header::{CLASS_FEATURE_NAME, Header};
pub use instance::Instance;
pub use stats::{DatasetSummary, FeatureStats};
pub use value::Value;
