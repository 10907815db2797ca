//! # cst-io: Reference Dataset I/O
//!
//! Loading, validation and lifecycle management for the cable reference
//! dataset. The dataset is a single JSON document of current-rating,
//! resistance and reactance tables; it is parsed once, validated against
//! the closed domain enumerations, and then held read-only for the life of
//! the process in a [`DatasetStore`].
//!
//! A copy of the reference document ships embedded in the crate
//! ([`DEFAULT_DATASET_JSON`]), so the engine works out of the box;
//! [`load_dataset_file`] substitutes an external document.

pub mod loader;
pub mod validate;

pub use loader::{
    default_dataset, global, load_dataset_file, load_dataset_str, DatasetStore,
    DEFAULT_DATASET_JSON,
};
pub use validate::validate_dataset;
