//! Impedance, voltage-drop, loop-impedance and short-circuit computations.
//!
//! Per-kilometre resistance and reactance come from the matched impedance
//! tables; when the dataset lacks a section or a specific size, fixed
//! constants keyed by nominal size stand in and the value is marked
//! "(estimated)" in its provenance.

use cst_core::diagnostics::Diagnostics;
use cst_core::design::{DesignState, InsulationFamily};
use cst_core::result::{CableImpedance, Provenance, ShortCircuitCheck, VoltageDrop};
use cst_core::tables::{CableDataset, TableKind};
use cst_core::units::{Metres, OhmsPerKm, Volts};
use cst_core::CstError;

use crate::matcher::match_impedance_table;

/// Earth-path resistance is typically higher than the phase conductor's;
/// represented by a fixed multiplier on the earth conductor's resistance.
pub const EARTH_RESISTANCE_MULTIPLIER: f64 = 1.5;

/// Assumed prospective fault current (A) for the thermal-withstand check.
/// A placeholder until a fault-level input exists.
pub const ASSUMED_FAULT_CURRENT_A: f64 = 6000.0;

/// Assumed fault clearance time (s) for the thermal-withstand check.
pub const ASSUMED_FAULT_DURATION_S: f64 = 0.1;

/// Reactance substituted when no reactance table entry is available (Ω/km).
pub const FALLBACK_REACTANCE: OhmsPerKm = OhmsPerKm(0.1);

/// Copper resistivity constant for the estimated-resistance fallback
/// (Ω·mm²/km at operating temperature): R ≈ 21.4 / S.
const FALLBACK_RESISTIVITY: f64 = 21.4;

/// Insulation-dependent thermal-withstand constant K in I²t ≤ K²S².
pub fn thermal_k(family: InsulationFamily) -> f64 {
    match family {
        InsulationFamily::Pvc => 111.0,
        InsulationFamily::Xlpe => 143.0,
    }
}

/// Estimated per-km resistance for a conductor size, used when the dataset
/// has no entry.
pub fn fallback_resistance(size_mm2: f64) -> OhmsPerKm {
    OhmsPerKm(FALLBACK_RESISTIVITY / size_mm2.max(1e-9))
}

fn lookup(
    dataset: &CableDataset,
    kind: TableKind,
    design: &DesignState,
    size_mm2: f64,
    fallback: OhmsPerKm,
    diag: &mut Diagnostics,
) -> (OhmsPerKm, Provenance) {
    let matched = match match_impedance_table(dataset, kind, design, diag) {
        Ok(matched) => matched,
        Err(CstError::EmptyDataset(msg)) => {
            diag.add_warning("match", &format!("{msg}, using estimated value"));
            return (fallback, Provenance::Estimated);
        }
        Err(_) => return (fallback, Provenance::Estimated),
    };
    match matched.table.value(size_mm2, &matched.column.id) {
        Some(value) => (OhmsPerKm(value), matched.provenance()),
        None => {
            diag.add_warning_with_entity(
                "match",
                &format!(
                    "{} table has no entry for {size_mm2} mm², using estimated value",
                    kind.label()
                ),
                &format!("Table {}", matched.table.id),
            );
            (fallback, Provenance::Estimated)
        }
    }
}

/// Per-kilometre resistance, reactance and impedance magnitude for a
/// candidate size, with provenance for each lookup.
pub fn cable_impedance(
    dataset: &CableDataset,
    design: &DesignState,
    size_mm2: f64,
    diag: &mut Diagnostics,
) -> CableImpedance {
    let (resistance, resistance_provenance) = lookup(
        dataset,
        TableKind::Resistance,
        design,
        size_mm2,
        fallback_resistance(size_mm2),
        diag,
    );
    let (reactance, reactance_provenance) = lookup(
        dataset,
        TableKind::Reactance,
        design,
        size_mm2,
        FALLBACK_REACTANCE,
        diag,
    );

    CableImpedance {
        resistance,
        reactance,
        impedance: OhmsPerKm::magnitude(resistance, reactance),
        resistance_provenance,
        reactance_provenance,
    }
}

/// Voltage drop over the design run:
/// ΔV = I · L · k · Z / 1000 with k = √3 for three-phase, 2 otherwise.
pub fn voltage_drop(design: &DesignState, impedance: OhmsPerKm) -> VoltageDrop {
    let k = design.phases.drop_multiplier();
    let volts = Volts(
        design.load_current.value() * design.length.value() * k * impedance.value() / 1000.0,
    );
    let percent = design.voltage.percent_of(volts);

    VoltageDrop {
        volts,
        percent,
        voltage_at_load: design.voltage - volts,
        max_run: max_run_length(design, impedance),
        within_limit: percent <= design.max_drop_percent,
    }
}

/// Longest run that keeps the drop within the design's allowed percentage:
/// L_max = (p/100 · V · 1000) / (I · k · Z).
pub fn max_run_length(design: &DesignState, impedance: OhmsPerKm) -> Metres {
    let k = design.phases.drop_multiplier();
    let denominator = design.load_current.value() * k * impedance.value();
    if denominator.abs() < 1e-12 {
        return Metres(f64::INFINITY);
    }
    Metres(design.max_drop_percent / 100.0 * design.voltage.value() * 1000.0 / denominator)
}

/// Earth-path impedance from the earth conductor's own resistance and
/// reactance: √((1.5·R)² + X²).
pub fn earth_impedance(resistance: OhmsPerKm, reactance: OhmsPerKm) -> OhmsPerKm {
    OhmsPerKm::magnitude(resistance * EARTH_RESISTANCE_MULTIPLIER, reactance)
}

/// Short-circuit thermal withstand: passes when I²t ≤ K²S² under the
/// assumed fault constants.
pub fn short_circuit_withstand(design: &DesignState, size_mm2: f64) -> ShortCircuitCheck {
    let fault_energy = ASSUMED_FAULT_CURRENT_A.powi(2) * ASSUMED_FAULT_DURATION_S;
    let k = thermal_k(design.insulation.family());
    let withstand = k.powi(2) * size_mm2.powi(2);

    ShortCircuitCheck {
        fault_energy,
        withstand,
        passes: fault_energy <= withstand,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cst_core::design::{DesignState, InsulationCode, PhaseConfig};
    use cst_core::units::Amperes;

    #[test]
    fn test_three_phase_voltage_drop() {
        // I = 63 A, L = 40 m, Z = 0.18 Ω/km, 400 V nominal
        let mut design = DesignState::example();
        design.load_current = Amperes(63.0);
        design.length = Metres(40.0);
        design.phases = PhaseConfig::ThreePhaseAc;
        design.voltage = Volts(400.0);

        let drop = voltage_drop(&design, OhmsPerKm(0.18));
        assert!((drop.volts.value() - 0.7855).abs() < 1e-3);
        assert!((drop.percent - 0.1964).abs() < 1e-3);
        assert!((drop.voltage_at_load.value() - 399.21).abs() < 0.01);
        assert!(drop.within_limit);
    }

    #[test]
    fn test_single_phase_uses_factor_two() {
        let mut design = DesignState::example();
        design.phases = PhaseConfig::SinglePhaseAc;
        let single = voltage_drop(&design, OhmsPerKm(0.18));

        design.phases = PhaseConfig::Dc;
        let dc = voltage_drop(&design, OhmsPerKm(0.18));

        // DC and both two-phase variants share the single-phase formula
        assert_eq!(single.volts, dc.volts);
        assert!((single.volts.value() / (63.0 * 40.0 * 2.0 * 0.18 / 1000.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_max_run_roundtrip() {
        // At exactly the max run length, the drop equals the allowed limit
        let design = DesignState::example();
        let z = OhmsPerKm(0.18);
        let max_run = max_run_length(&design, z);

        let mut at_limit = design.clone();
        at_limit.length = max_run;
        let drop = voltage_drop(&at_limit, z);
        assert!((drop.percent - design.max_drop_percent).abs() < 1e-9);
    }

    #[test]
    fn test_max_run_guards_zero_denominator() {
        let mut design = DesignState::example();
        design.load_current = Amperes(0.0);
        assert!(max_run_length(&design, OhmsPerKm(0.18)).value().is_infinite());
    }

    #[test]
    fn test_earth_impedance_multiplier() {
        let z = earth_impedance(OhmsPerKm(0.4), OhmsPerKm(0.0));
        assert!((z.value() - 0.6).abs() < 1e-12);

        let z = earth_impedance(OhmsPerKm(0.4), OhmsPerKm(0.8));
        assert!((z.value() - (0.36_f64 + 0.64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_short_circuit_verdict_flips_with_size() {
        let design = DesignState::example();
        // 6 kA for 0.1 s → I²t = 3.6e6 A²s; K=111 (PVC) needs S ≥ ~17.1 mm²
        assert!(!short_circuit_withstand(&design, 16.0).passes);
        assert!(short_circuit_withstand(&design, 25.0).passes);
    }

    #[test]
    fn test_short_circuit_xlpe_withstands_more() {
        let mut design = DesignState::example();
        let pvc = short_circuit_withstand(&design, 16.0);
        design.insulation = InsulationCode::X90;
        let xlpe = short_circuit_withstand(&design, 16.0);
        assert!(xlpe.withstand > pvc.withstand);
    }

    #[test]
    fn test_fallback_resistance_scales_inverse_to_size() {
        assert!(fallback_resistance(2.5).value() > fallback_resistance(16.0).value());
        assert!((fallback_resistance(21.4).value() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_dataset_estimates() {
        let dataset = CableDataset::default();
        let design = DesignState::example();
        let mut diag = Diagnostics::new();
        let imp = cable_impedance(&dataset, &design, 2.5, &mut diag);

        assert_eq!(imp.resistance_provenance, Provenance::Estimated);
        assert_eq!(imp.reactance_provenance, Provenance::Estimated);
        assert!((imp.resistance.value() - 21.4 / 2.5).abs() < 1e-9);
        assert_eq!(imp.reactance, FALLBACK_REACTANCE);
        assert!(diag.has_warnings());
    }
}
