//! Derating-factor composition.
//!
//! Four independent environmental multipliers reduce a conductor's base
//! ampacity: ambient temperature, grouping, soil thermal resistivity, and
//! installation method. Each factor has its own function so a fuller
//! standards-derived table can replace any placeholder constant without
//! reshaping callers; the combined factor is always their product.
//!
//! Derating depends only on the design configuration, never on a candidate
//! size — the same combined factor is applied to every row of the matched
//! rating column.

use serde::Serialize;

use cst_core::design::{Arrangement, DesignState, InsulationCode};

/// Ambient air temperature the reference values assume (°C).
pub const BASELINE_AMBIENT_C: f64 = 40.0;

/// Ambient temperature assumed for every calculation (°C). Equal to the
/// baseline, so the ambient factor is 1.0 on the default path; the
/// square-root correction in [`ambient_factor_at`] stays reachable for a
/// hotter ambient.
pub const ASSUMED_AMBIENT_C: f64 = 40.0;

/// Placeholder for the unmodeled multi-cable bundling derating.
pub const GROUPING_FACTOR: f64 = 0.95;

/// Placeholder soil-thermal derating, applied to underground arrangements.
pub const SOIL_FACTOR: f64 = 0.90;

/// Reserved extension point for installation-method corrections.
pub const INSTALLATION_FACTOR: f64 = 1.0;

/// The four independent multipliers and their product.
///
/// Each factor is in (0, 1] by convention; 1.0 means no penalty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeratingFactors {
    pub ambient: f64,
    pub grouping: f64,
    pub soil: f64,
    pub installation: f64,
}

impl DeratingFactors {
    /// Product of all four factors.
    pub fn combined(&self) -> f64 {
        self.ambient * self.grouping * self.soil * self.installation
    }
}

/// Ambient-temperature correction for a given insulation and ambient.
///
/// Unity at or below the baseline ambient; above it, the standard
/// square-root correction √((T_max − T_amb) / (T_max − T_base)). The
/// degenerate case T_max ≤ baseline would put the formula outside its
/// domain and is treated as 1.0; an ambient at or above T_max exhausts the
/// conductor's headroom and yields 0.0.
pub fn ambient_factor_at(insulation: InsulationCode, ambient_c: f64) -> f64 {
    if ambient_c <= BASELINE_AMBIENT_C {
        return 1.0;
    }
    let t_max = insulation.max_temp_c();
    if t_max <= BASELINE_AMBIENT_C {
        return 1.0;
    }
    if ambient_c >= t_max {
        return 0.0;
    }
    ((t_max - ambient_c) / (t_max - BASELINE_AMBIENT_C)).sqrt()
}

/// Soil-thermal factor: applied only to buried/underground-duct
/// arrangements.
pub fn soil_factor_for(arrangement: Arrangement) -> f64 {
    if arrangement.is_underground() {
        SOIL_FACTOR
    } else {
        1.0
    }
}

/// Compute the derating factors for a design.
///
/// Pure: depends only on the design and fixed constants, never on table
/// data, and is recomputed per design state rather than cached.
pub fn compute_derating(design: &DesignState) -> DeratingFactors {
    DeratingFactors {
        ambient: ambient_factor_at(design.insulation, ASSUMED_AMBIENT_C),
        grouping: GROUPING_FACTOR,
        soil: soil_factor_for(design.arrangement),
        installation: INSTALLATION_FACTOR,
    }
}
