//! Auto-size search: the smallest conductor satisfying every constraint.
//!
//! Builds the candidate list from the matched current-rating column,
//! derates every row uniformly, then walks the ampacity-satisfying
//! candidates from smallest size re-testing voltage drop per size. The
//! walk is deliberately linear: ampacity is monotone in size (derating is
//! size-independent and base ratings are non-decreasing), but voltage drop
//! need not be in the presence of non-uniform per-size impedance data, so
//! a binary search over sizes would be unsound.

use cst_core::diagnostics::Diagnostics;
use cst_core::design::DesignState;
use cst_core::tables::CableDataset;
use cst_core::units::Amperes;
use cst_core::CstResult;

use crate::derating::compute_derating;
use crate::impedance::{cable_impedance, voltage_drop};
use crate::matcher::{match_current_rating_table, TableMatch};

/// Size substituted when the matched rating column has no rows at all (mm²).
pub const DEFAULT_SIZE_MM2: f64 = 2.5;

/// Per-size search-space entry: base and derated ampacity for one
/// conductor size from the matched rating column.
#[derive(Debug, Clone, Copy)]
pub struct CandidateRow {
    pub size_mm2: f64,
    pub base: Amperes,
    pub adjusted: Amperes,
    /// Adjusted ampacity covers the design load current
    pub meets_load: bool,
}

/// Build the ordered candidate list for a matched rating column, derated
/// uniformly with the design's combined factor, ascending by size.
pub fn candidate_rows(matched: &TableMatch<'_>, design: &DesignState) -> Vec<CandidateRow> {
    let combined = compute_derating(design).combined();
    let mut candidates: Vec<CandidateRow> = matched
        .table
        .rows
        .iter()
        .filter_map(|row| {
            let base = row.values.get(&matched.column.id).copied()?;
            let adjusted = base * combined;
            Some(CandidateRow {
                size_mm2: row.size_mm2,
                base: Amperes(base),
                adjusted: Amperes(adjusted),
                meets_load: adjusted >= design.load_current.value(),
            })
        })
        .collect();
    candidates.sort_by(|a, b| {
        a.size_mm2
            .partial_cmp(&b.size_mm2)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates
}

/// Find the smallest conductor size in an already-matched rating column
/// satisfying both the derated-ampacity requirement and the voltage-drop
/// limit.
///
/// Degrades gracefully: when no candidate satisfies both constraints the
/// largest available size is returned (flagged in `diag`), and an empty
/// candidate list yields [`DEFAULT_SIZE_MM2`].
pub fn auto_select_from(
    matched: &TableMatch<'_>,
    dataset: &CableDataset,
    design: &DesignState,
    diag: &mut Diagnostics,
) -> f64 {
    let candidates = candidate_rows(matched, design);

    if candidates.is_empty() {
        diag.add_warning_with_entity(
            "search",
            &format!("rating column has no rows, using default size {DEFAULT_SIZE_MM2} mm²"),
            &format!("Table {} / {}", matched.table.id, matched.column.id),
        );
        return DEFAULT_SIZE_MM2;
    }

    for candidate in candidates.iter().filter(|c| c.meets_load) {
        // Impedance lookups inside the walk are probes; their diagnostics
        // belong to the accepted size only.
        let mut probe = Diagnostics::new();
        let impedance = cable_impedance(dataset, design, candidate.size_mm2, &mut probe);
        let drop = voltage_drop(design, impedance.impedance);
        if drop.percent <= design.max_drop_percent {
            return candidate.size_mm2;
        }
    }

    // No candidate met both constraints; degrade to the largest size
    // available rather than failing.
    let largest = candidates
        .last()
        .map(|c| c.size_mm2)
        .unwrap_or(DEFAULT_SIZE_MM2);
    diag.add_warning_with_entity(
        "search",
        &format!(
            "no size satisfies ampacity and voltage-drop limits, using largest available ({largest} mm²)"
        ),
        &format!("Table {} / {}", matched.table.id, matched.column.id),
    );
    largest
}

/// Match the current-rating column for a design and auto-select a size
/// from it. Fails only when the dataset has no current-rating tables.
///
/// Callers that also need the match afterwards (to rate the accepted
/// size, say) should match once themselves and use [`auto_select_from`],
/// so the match's fallback diagnostics are recorded exactly once.
pub fn auto_select_size(
    dataset: &CableDataset,
    design: &DesignState,
    diag: &mut Diagnostics,
) -> CstResult<f64> {
    let matched = match_current_rating_table(dataset, design, diag)?;
    Ok(auto_select_from(&matched, dataset, design, diag))
}
