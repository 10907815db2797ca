//! Dataset loading: JSON parsing, the embedded default document, and the
//! load-once store.
//!
//! The reference dataset is loaded exactly once per process and read-only
//! thereafter. [`DatasetStore`] enforces that lifecycle: `init` succeeds
//! once, `get` refuses with [`CstError::NotReady`] until it has, and
//! concurrent calculations then share the stored dataset without locking.

use std::path::Path;

use once_cell::sync::OnceCell;

use cst_core::tables::CableDataset;
use cst_core::{CstError, CstResult};

use crate::validate::validate_dataset;

/// The reference dataset shipped with the crate, as a JSON document.
pub const DEFAULT_DATASET_JSON: &str = include_str!("data/dataset.json");

/// Parse a dataset from a JSON string.
///
/// Parsing is strict about structure (unknown table shapes fail) but says
/// nothing about content; run [`validate_dataset`] for label and
/// consistency checks.
pub fn load_dataset_str(json: &str) -> CstResult<CableDataset> {
    let dataset: CableDataset = serde_json::from_str(json)?;
    Ok(dataset)
}

/// Read and parse a dataset document from disk.
pub fn load_dataset_file(path: impl AsRef<Path>) -> CstResult<CableDataset> {
    let json = std::fs::read_to_string(path)?;
    load_dataset_str(&json)
}

/// Parse the embedded default dataset.
pub fn default_dataset() -> CstResult<CableDataset> {
    load_dataset_str(DEFAULT_DATASET_JSON)
}

/// Load-once container for the process-wide reference dataset.
#[derive(Debug, Default)]
pub struct DatasetStore {
    cell: OnceCell<CableDataset>,
}

impl DatasetStore {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Store a dataset, validating it first.
    ///
    /// Validation errors (structural inconsistencies, an all-empty
    /// document) refuse the dataset; validation warnings are tolerated and
    /// discarded here — callers wanting to report them run
    /// [`validate_dataset`] themselves before init. A second init is a
    /// lifecycle violation and fails regardless of content.
    pub fn init(&self, dataset: CableDataset) -> CstResult<&CableDataset> {
        let report = validate_dataset(&dataset);
        if report.has_errors() {
            let first = report
                .errors()
                .next()
                .map(|issue| issue.to_string())
                .unwrap_or_else(|| "invalid dataset".to_string());
            return Err(CstError::Validation(first));
        }
        let mut inserted = false;
        let stored = self.cell.get_or_init(|| {
            inserted = true;
            dataset
        });
        if !inserted {
            return Err(CstError::Validation(
                "dataset already loaded; reload is not supported".to_string(),
            ));
        }
        Ok(stored)
    }

    /// The stored dataset, or [`CstError::NotReady`] before init.
    pub fn get(&self) -> CstResult<&CableDataset> {
        self.cell.get().ok_or(CstError::NotReady)
    }

    pub fn is_ready(&self) -> bool {
        self.cell.get().is_some()
    }
}

static GLOBAL_STORE: DatasetStore = DatasetStore::new();

/// The process-wide dataset store shared by all calculations.
pub fn global() -> &'static DatasetStore {
    &GLOBAL_STORE
}
