//! ARFF format reading: tokenizer, grammar reader, and deserialization.
//!
//! This crate turns ARFF-style text (a relation name, typed attribute
//! declarations, then dense or sparse data rows) into the typed model of the
//! companion `arff-model` crate.
//!
//! # Example
//!
//! ```
//! use arff_read::read_dataset;
//!
//! let dataset = read_dataset(
//!     "@relation weather\n\
//!      @attribute temperature numeric\n\
//!      @attribute Class {sun,rain}\n\
//!      @data\n\
//!      21.5,sun\n\
//!      ?,rain\n",
//! )
//! .unwrap();
//!
//! assert_eq!(dataset.num_instances(), 2);
//! assert_eq!(dataset.get_column("temperature").unwrap(), vec![Some(21.5), None]);
//! assert_eq!(dataset.get_classes().unwrap(), vec![Some(0), Some(1)]);
//! ```
//!
//! File-based entry points live in [`deserialize_dataset`] and friends; the
//! asynchronous variants run the parse on a blocking thread pool.
//!
//! A reader instance is sequential, single-consumer state: one stream, one
//! logical thread of control, no overlapping reads.

mod deserialize;
mod error;
mod reader;
mod tokenizer;

pub use deserialize::{
    ARFF_EXTENSION, deserialize_dataset, deserialize_dataset_async, deserialize_instances,
    deserialize_instances_async,
};
pub use error::{ReadError, Result};
pub use reader::{ArffReader, read_dataset, read_instances};
pub use tokenizer::{Token, Tokenizer};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
