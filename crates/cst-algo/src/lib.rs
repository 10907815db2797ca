//! # cst-algo: Cable Sizing Rules Engine
//!
//! The calculation engine for conceptual cable sizing: table matching,
//! derating composition, impedance and voltage-drop formulas, protection
//! and earth sizing, and the auto-size search that finds the smallest
//! conductor satisfying every constraint simultaneously.
//!
//! ## Pipeline
//!
//! ```text
//! DesignState ──► matcher ──► derating ──► autosize ──► engine ──► CalculationResult
//!                    │                        │
//!                    └── impedance ◄──────────┘  (per candidate size)
//! ```
//!
//! All operations are pure functions over `&CableDataset` + `&DesignState`;
//! a calculation owns its result and its diagnostics. Expected degraded
//! paths (fallback table/column selection, unsatisfiable constraints)
//! never raise errors — they surface in the result's provenance and
//! diagnostics so downstream reporting can flag "(estimated)" values.
//!
//! ## Example
//!
//! ```ignore
//! use cst_algo::calculate;
//! use cst_core::DesignState;
//! use cst_io::default_dataset;
//!
//! let dataset = default_dataset()?;
//! let result = calculate(&dataset, &DesignState::example())?;
//! println!("{} mm², drop {:.2}%", result.selected_size_mm2, result.voltage_drop.percent);
//! ```

pub mod autosize;
pub mod derating;
pub mod engine;
pub mod impedance;
pub mod matcher;
pub mod protection;
pub mod select;

pub use autosize::{auto_select_from, auto_select_size, candidate_rows, CandidateRow, DEFAULT_SIZE_MM2};
pub use derating::{ambient_factor_at, compute_derating, DeratingFactors};
pub use engine::{calculate, SizingEngine};
pub use impedance::{
    cable_impedance, earth_impedance, max_run_length, short_circuit_withstand, voltage_drop,
};
pub use matcher::{match_current_rating_table, match_impedance_table, TableMatch};
pub use protection::{earth_size_for, select_protection, STANDARD_RATINGS_A};
pub use select::{first_matching, Selected};
