//! The calculation pipeline: from a design state to a result bundle.
//!
//! One calculation run is a sequential, request-scoped pipeline: size
//! selection (auto search or the requested fixed size), rating and
//! derating, impedance and voltage drop, earth and loop impedance,
//! short-circuit withstand, and protection selection. The caller owns the
//! returned [`CalculationResult`]; the engine holds no state between
//! requests beyond the shared read-only dataset reference.

use cst_core::diagnostics::Diagnostics;
use cst_core::design::{DesignState, SizeSpec};
use cst_core::result::{
    CalculationResult, EarthConductor, LoopImpedance, RatingOutcome, Provenance,
};
use cst_core::tables::CableDataset;
use cst_core::units::Amperes;
use cst_core::{CstError, CstResult};

use crate::autosize::auto_select_from;
use crate::derating::compute_derating;
use crate::impedance::{cable_impedance, earth_impedance, short_circuit_withstand, voltage_drop};
use crate::matcher::{match_current_rating_table, TableMatch};
use crate::protection::{earth_size_for, select_protection};

/// Cable-sizing engine over a loaded reference dataset.
///
/// Borrows the dataset immutably; one engine can serve any number of
/// sequential calculations, each producing an independent result.
#[derive(Debug, Clone, Copy)]
pub struct SizingEngine<'a> {
    dataset: &'a CableDataset,
}

impl<'a> SizingEngine<'a> {
    pub fn new(dataset: &'a CableDataset) -> Self {
        Self { dataset }
    }

    /// Run one full calculation for a design.
    ///
    /// Fails only when the dataset is empty; every other shortfall
    /// degrades with diagnostics carried in the result.
    pub fn calculate(&self, design: &DesignState) -> CstResult<CalculationResult> {
        if self.dataset.is_empty() {
            return Err(CstError::EmptyDataset("no reference tables loaded".into()));
        }
        let mut diag = Diagnostics::new();

        // One rating-table match serves both the size search and the
        // rating, so a fallback match is reported once.
        let matched = match_current_rating_table(self.dataset, design, &mut diag)?;

        let selected_size = match design.active_size {
            SizeSpec::Auto => auto_select_from(&matched, self.dataset, design, &mut diag),
            SizeSpec::Fixed(size) => size,
        };

        let rating = rating_for(&matched, design, selected_size, &mut diag);
        let impedance = cable_impedance(self.dataset, design, selected_size, &mut diag);
        let drop = voltage_drop(design, impedance.impedance);

        let earth_size = match design.earth_size {
            SizeSpec::Auto => earth_size_for(selected_size),
            SizeSpec::Fixed(size) => size,
        };
        let earth_imp = cable_impedance(self.dataset, design, earth_size, &mut diag);
        let earth = EarthConductor {
            size_mm2: earth_size,
            impedance: earth_impedance(earth_imp.resistance, earth_imp.reactance),
        };

        let loop_impedance = LoopImpedance {
            phase: impedance.impedance,
            earth: earth.impedance,
            total: impedance.impedance + earth.impedance,
        };

        Ok(CalculationResult {
            selected_size_mm2: selected_size,
            rating,
            impedance,
            voltage_drop: drop,
            loop_impedance,
            short_circuit: short_circuit_withstand(design, selected_size),
            protection: select_protection(design.load_current),
            earth,
            load_current: design.load_current,
            max_drop_percent: design.max_drop_percent,
            diagnostics: diag,
        })
    }
}

/// Base and derated rating for a specific size from the matched
/// current-rating column.
///
/// A fixed size absent from the table degrades to the largest tabled
/// size below it (conservative rating); with no row below, the rating
/// is estimated as zero so the non-compliance is unmistakable.
fn rating_for(
    matched: &TableMatch<'_>,
    design: &DesignState,
    size_mm2: f64,
    diag: &mut Diagnostics,
) -> RatingOutcome {
    let combined = compute_derating(design).combined();

    let (base, provenance) = match matched.table.value(size_mm2, &matched.column.id) {
        Some(base) => (base, matched.provenance()),
        None => {
            let below = matched
                .table
                .rows
                .iter()
                .filter(|r| r.size_mm2 < size_mm2)
                .filter_map(|r| {
                    r.values
                        .get(&matched.column.id)
                        .map(|v| (r.size_mm2, *v))
                })
                .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
            match below {
                Some((nearest, value)) => {
                    diag.add_warning_with_entity(
                        "match",
                        &format!(
                            "no rating row for {size_mm2} mm², using rating of {nearest} mm²"
                        ),
                        &format!("Table {}", matched.table.id),
                    );
                    (
                        value,
                        Provenance::degraded(&matched.table.id, &matched.column.id),
                    )
                }
                None => {
                    diag.add_warning_with_entity(
                        "match",
                        &format!("no rating row at or below {size_mm2} mm²"),
                        &format!("Table {}", matched.table.id),
                    );
                    (0.0, Provenance::Estimated)
                }
            }
        }
    };

    let adjusted = base * combined;
    RatingOutcome {
        base: Amperes(base),
        adjusted: Amperes(adjusted),
        provenance,
        meets_load: adjusted >= design.load_current.value(),
    }
}

/// Convenience wrapper: run one calculation against a dataset.
pub fn calculate(dataset: &CableDataset, design: &DesignState) -> CstResult<CalculationResult> {
    SizingEngine::new(dataset).calculate(design)
}
