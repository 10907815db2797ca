//! The read-only calculation result bundle.
//!
//! A [`CalculationResult`] is built once per calculation and handed to the
//! caller by value; rendering and report generation receive it as an
//! explicit argument. There is no shared "current calculation" state
//! anywhere in the engine.
//!
//! Every derived value carries a [`Provenance`] naming the table and column
//! it came from, or marking it as estimated when a hardcoded fallback
//! constant had to stand in for a missing dataset entry. Degraded matches
//! additionally appear in the result's [`Diagnostics`].

use serde::Serialize;

use crate::diagnostics::Diagnostics;
use crate::units::{Amperes, Metres, OhmsPerKm, Volts};

/// Where a looked-up value came from, for auditability.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "source")]
pub enum Provenance {
    /// Value read from a dataset table/column. `degraded` marks a
    /// fallback selection rather than an exact match.
    Table {
        table: String,
        column: String,
        degraded: bool,
    },
    /// Value substituted from a hardcoded fallback constant because the
    /// dataset (or the specific size) was unavailable.
    Estimated,
}

impl Provenance {
    pub fn table(table: impl Into<String>, column: impl Into<String>) -> Self {
        Provenance::Table {
            table: table.into(),
            column: column.into(),
            degraded: false,
        }
    }

    pub fn degraded(table: impl Into<String>, column: impl Into<String>) -> Self {
        Provenance::Table {
            table: table.into(),
            column: column.into(),
            degraded: true,
        }
    }

    /// True only for a value read from an exactly-matched table column;
    /// degraded table matches and estimated constants are not exact.
    pub fn is_exact(&self) -> bool {
        matches!(self, Provenance::Table { degraded: false, .. })
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::Table {
                table,
                column,
                degraded,
            } => {
                write!(f, "Table {} / {}", table, column)?;
                if *degraded {
                    write!(f, " (closest match)")?;
                }
                Ok(())
            }
            Provenance::Estimated => write!(f, "(estimated)"),
        }
    }
}

/// Base and derated current rating for the selected conductor size.
#[derive(Debug, Clone, Serialize)]
pub struct RatingOutcome {
    /// Rating straight from the matched table column
    pub base: Amperes,
    /// Base rating × combined derating factor
    pub adjusted: Amperes,
    pub provenance: Provenance,
    /// Whether the adjusted rating covers the design load current
    pub meets_load: bool,
}

/// Per-kilometre impedance of the selected cable.
#[derive(Debug, Clone, Serialize)]
pub struct CableImpedance {
    pub resistance: OhmsPerKm,
    pub reactance: OhmsPerKm,
    /// √(R² + X²)
    pub impedance: OhmsPerKm,
    pub resistance_provenance: Provenance,
    pub reactance_provenance: Provenance,
}

/// Voltage drop over the design run length.
#[derive(Debug, Clone, Serialize)]
pub struct VoltageDrop {
    pub volts: Volts,
    /// Drop as a percentage of nominal voltage
    pub percent: f64,
    /// Nominal voltage minus the drop
    pub voltage_at_load: Volts,
    /// Longest run that stays within the allowed drop percentage
    pub max_run: Metres,
    /// Whether the drop percentage is within the design limit
    pub within_limit: bool,
}

/// Fault-loop impedance: phase path plus earth return.
#[derive(Debug, Clone, Serialize)]
pub struct LoopImpedance {
    pub phase: OhmsPerKm,
    pub earth: OhmsPerKm,
    pub total: OhmsPerKm,
}

/// Short-circuit thermal withstand verdict: I²t against K²S².
#[derive(Debug, Clone, Serialize)]
pub struct ShortCircuitCheck {
    /// Fault energy I²t (A²·s) under the assumed fault
    pub fault_energy: f64,
    /// Conductor withstand K²S² (A²·s)
    pub withstand: f64,
    pub passes: bool,
}

/// Protection-device trip curve. Type B is the only curve currently
/// modeled; the enum keeps the extension point explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TripCurve {
    B,
}

impl TripCurve {
    /// Instantaneous trip multiple for this curve type.
    pub fn trip_multiple(self) -> f64 {
        match self {
            TripCurve::B => 4.0,
        }
    }
}

/// Selected protection device.
#[derive(Debug, Clone, Serialize)]
pub struct ProtectionSelection {
    /// Standard device rating, first ladder step ≥ load current
    pub rating: Amperes,
    pub curve: TripCurve,
    /// Rating × trip multiple
    pub trip_current: Amperes,
}

/// Earth conductor selection and its impedance contribution.
#[derive(Debug, Clone, Serialize)]
pub struct EarthConductor {
    pub size_mm2: f64,
    pub impedance: OhmsPerKm,
}

/// Aggregate, read-only output bundle for one calculation.
///
/// Carries the inputs the constraints were checked against
/// (`load_current`, `max_drop_percent`) so a caller can re-verify
/// `rating.adjusted >= load_current` and
/// `voltage_drop.percent <= max_drop_percent` when the auto-size search
/// had to fall back to a non-compliant "best available" size.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationResult {
    /// Selected active conductor size (mm²)
    pub selected_size_mm2: f64,
    pub rating: RatingOutcome,
    pub impedance: CableImpedance,
    pub voltage_drop: VoltageDrop,
    pub loop_impedance: LoopImpedance,
    pub short_circuit: ShortCircuitCheck,
    pub protection: ProtectionSelection,
    pub earth: EarthConductor,
    /// Load current the constraints were evaluated against
    pub load_current: Amperes,
    /// Voltage-drop limit the constraints were evaluated against (%)
    pub max_drop_percent: f64,
    /// Degraded matches and fallbacks encountered during this calculation
    pub diagnostics: Diagnostics,
}

impl CalculationResult {
    /// Both sizing constraints hold for the selected size.
    pub fn fully_compliant(&self) -> bool {
        self.rating.meets_load && self.voltage_drop.within_limit
    }

    /// Any value in the bundle came from a fallback selection or an
    /// estimated constant.
    pub fn has_degraded_values(&self) -> bool {
        !self.rating.provenance.is_exact()
            || !self.impedance.resistance_provenance.is_exact()
            || !self.impedance.reactance_provenance.is_exact()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provenance_display() {
        let exact = Provenance::table("4", "cu-unenclosed");
        assert_eq!(exact.to_string(), "Table 4 / cu-unenclosed");
        assert!(exact.is_exact());

        let degraded = Provenance::degraded("4", "cu-unenclosed");
        assert_eq!(degraded.to_string(), "Table 4 / cu-unenclosed (closest match)");
        assert!(!degraded.is_exact());

        assert_eq!(Provenance::Estimated.to_string(), "(estimated)");
        assert!(!Provenance::Estimated.is_exact());
    }

    #[test]
    fn test_trip_curve_multiple() {
        assert_eq!(TripCurve::B.trip_multiple(), 4.0);
    }

    #[test]
    fn test_provenance_serialization() {
        let p = Provenance::degraded("30", "cu-75");
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"source\":\"table\""));
        assert!(json.contains("\"degraded\":true"));

        let e = serde_json::to_string(&Provenance::Estimated).unwrap();
        assert!(e.contains("estimated"));
    }
}
