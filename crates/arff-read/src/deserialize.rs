//! Path-level deserialization: files to datasets.

use std::fs;
use std::path::{Path, PathBuf};

use arff_model::{Dataset, Instance};

use crate::error::{ReadError, Result};
use crate::reader::{read_dataset, read_instances};

/// Expected file extension (case-insensitive).
pub const ARFF_EXTENSION: &str = "arff";

/// Reject a path without the `.arff` extension before any parsing occurs.
fn check_extension(path: &Path) -> Result<()> {
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ARFF_EXTENSION));
    if matches {
        Ok(())
    } else {
        Err(ReadError::wrong_extension(path))
    }
}

/// Read and parse an ARFF file into a [`Dataset`].
///
/// A path without the `.arff` extension is a usage error. A path that does
/// not exist yields the empty dataset; the absent file is logged and
/// recovered from, not reported as an error.
pub fn deserialize_dataset(path: &Path) -> Result<Dataset> {
    check_extension(path)?;
    if !path.exists() {
        tracing::warn!("dataset file {} does not exist, using empty dataset", path.display());
        return Ok(Dataset::empty());
    }
    let source = fs::read_to_string(path)?;
    let dataset = read_dataset(&source)?;
    tracing::debug!(
        "parsed {} instances over {} features from {}",
        dataset.num_instances(),
        dataset.header().len(),
        path.display()
    );
    Ok(dataset)
}

/// Read and parse an ARFF file into its instances only.
///
/// Same extension check and missing-file recovery as
/// [`deserialize_dataset`]; a missing file yields an empty sequence.
pub fn deserialize_instances(path: &Path) -> Result<Vec<Instance>> {
    check_extension(path)?;
    if !path.exists() {
        tracing::warn!("dataset file {} does not exist, using no instances", path.display());
        return Ok(Vec::new());
    }
    let source = fs::read_to_string(path)?;
    read_instances(&source)
}

/// Deserialize a dataset asynchronously.
///
/// Spawns the parse on a blocking thread pool to avoid blocking the async
/// runtime.
pub async fn deserialize_dataset_async(path: PathBuf) -> Result<Dataset> {
    tokio::task::spawn_blocking(move || deserialize_dataset(&path)).await?
}

/// Deserialize instances asynchronously.
pub async fn deserialize_instances_async(path: PathBuf) -> Result<Vec<Instance>> {
    tokio::task::spawn_blocking(move || deserialize_instances(&path)).await?
}
