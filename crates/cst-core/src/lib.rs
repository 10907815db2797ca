//! # cst-core: Cable Sizing Data Model Core
//!
//! Provides the fundamental data structures for conceptual cable sizing
//! against a standards-derived reference dataset: typed units, the closed
//! domain enumerations (cable type, insulation, arrangement, material,
//! phase configuration), the reference-table model, the per-request
//! [`DesignState`] input snapshot, and the [`CalculationResult`] output
//! bundle.
//!
//! ## Design Philosophy
//!
//! - **Closed enumerations over string matching.** Every concept a dataset
//!   label can name is a tagged enum with a fixed bidirectional mapping
//!   (`code()` / `from_code()`); unknown labels are caught when the
//!   dataset is loaded, not silently substring-matched at calculation
//!   time.
//! - **Results are values.** A calculation returns a [`CalculationResult`]
//!   owned by the caller; nothing in the engine holds a "current
//!   calculation" for later export.
//! - **Degraded is not failed.** Fallback table/column selection is
//!   reported through [`diagnostics::Diagnostics`] and value-level
//!   [`Provenance`], never through errors.
//!
//! ## Modules
//!
//! - [`units`] - Newtype `f64` wrappers for amperes, volts, metres, Ω/km
//! - [`design`] - Domain enums and the immutable design state
//! - [`tables`] - Reference-table and dataset model
//! - [`result`] - Calculation result bundle and provenance
//! - [`diagnostics`] - Warning/error collection for degraded paths
//! - [`error`] - Unified [`CstError`] / [`CstResult`]

pub mod design;
pub mod diagnostics;
pub mod error;
pub mod result;
pub mod tables;
pub mod units;

pub use design::{
    Arrangement, CableType, ConductorMaterial, DesignState, InsulationCode, InsulationFamily,
    PhaseConfig, SizeSpec,
};
pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity};
pub use error::{CstError, CstResult};
pub use result::{
    CableImpedance, CalculationResult, EarthConductor, LoopImpedance, ProtectionSelection,
    Provenance, RatingOutcome, ShortCircuitCheck, TripCurve, VoltageDrop,
};
pub use tables::{CableDataset, RatingColumn, ReferenceTable, TableKind, TableRow};
pub use units::{Amperes, Metres, OhmsPerKm, Volts};
