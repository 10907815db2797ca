//! Domain enumerations and the immutable per-request design state.
//!
//! Cable type, insulation, installation arrangement, conductor material and
//! phase configuration are closed enumerations with fixed bidirectional
//! label mappings. The dataset document refers to these concepts by label;
//! every label in a loaded document is checked against these mappings at
//! load time, so a typo in reference data surfaces as a validation
//! diagnostic instead of a silent substring mismatch at calculation time.

use serde::{Deserialize, Serialize};

use crate::units::{Amperes, Metres, Volts};

/// Cable construction type selected by the designer.
///
/// Each variant maps to one or more acceptable dataset cable-type labels;
/// see [`CableType::dataset_labels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CableType {
    /// Flat two-core-and-earth sheathed cable
    TwoCorePlusEarth,
    /// Single-core insulated conductors
    SingleCore,
    /// Circular multicore sheathed cable
    MulticoreCircular,
    /// Steel-wire-armoured multicore cable
    Armoured,
    /// Flexible cord/cable
    Flexible,
}

impl CableType {
    pub const ALL: [CableType; 5] = [
        CableType::TwoCorePlusEarth,
        CableType::SingleCore,
        CableType::MulticoreCircular,
        CableType::Armoured,
        CableType::Flexible,
    ];

    /// Dataset cable-type labels this design-level type accepts.
    pub fn dataset_labels(self) -> &'static [&'static str] {
        match self {
            CableType::TwoCorePlusEarth => &["two core and earth", "flat sheathed"],
            CableType::SingleCore => &["single core"],
            CableType::MulticoreCircular => &["multicore circular", "multicore"],
            CableType::Armoured => &["armoured", "swa"],
            CableType::Flexible => &["flexible"],
        }
    }

    /// Canonical code used on the CLI and in serialized output.
    pub fn code(self) -> &'static str {
        match self {
            CableType::TwoCorePlusEarth => "two-core-earth",
            CableType::SingleCore => "single-core",
            CableType::MulticoreCircular => "multicore",
            CableType::Armoured => "armoured",
            CableType::Flexible => "flexible",
        }
    }

    pub fn from_code(code: &str) -> Option<CableType> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// Case-insensitive containment match in either direction against a
    /// dataset cable-type label.
    pub fn matches_label(self, label: &str) -> bool {
        let label = label.to_ascii_lowercase();
        self.dataset_labels()
            .iter()
            .any(|own| label.contains(own) || own.contains(label.as_str()))
    }
}

/// Insulation material family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsulationFamily {
    Pvc,
    Xlpe,
}

impl InsulationFamily {
    /// Dataset labels naming this family.
    pub fn dataset_labels(self) -> &'static [&'static str] {
        match self {
            InsulationFamily::Pvc => &["pvc", "thermoplastic"],
            InsulationFamily::Xlpe => &["xlpe", "thermoset", "cross-linked"],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InsulationFamily::Pvc => "pvc",
            InsulationFamily::Xlpe => "xlpe",
        }
    }
}

/// Insulation code: encodes both material family and rated conductor
/// temperature, following the V-/X- designations of the reference standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsulationCode {
    /// PVC, 75 °C rated
    V75,
    /// PVC, 90 °C rated
    V90,
    /// XLPE, 90 °C rated
    X90,
    /// XLPE, 110 °C rated
    X110,
}

impl InsulationCode {
    pub const ALL: [InsulationCode; 4] = [
        InsulationCode::V75,
        InsulationCode::V90,
        InsulationCode::X90,
        InsulationCode::X110,
    ];

    pub fn family(self) -> InsulationFamily {
        match self {
            InsulationCode::V75 | InsulationCode::V90 => InsulationFamily::Pvc,
            InsulationCode::X90 | InsulationCode::X110 => InsulationFamily::Xlpe,
        }
    }

    /// Maximum continuous conductor temperature for this insulation (°C).
    pub fn max_temp_c(self) -> f64 {
        match self {
            InsulationCode::V75 => 75.0,
            InsulationCode::V90 | InsulationCode::X90 => 90.0,
            InsulationCode::X110 => 110.0,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            InsulationCode::V75 => "v75",
            InsulationCode::V90 => "v90",
            InsulationCode::X90 => "x90",
            InsulationCode::X110 => "x110",
        }
    }

    pub fn from_code(code: &str) -> Option<InsulationCode> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// Whether a dataset insulation label names this code's family.
    pub fn family_matches_label(self, label: &str) -> bool {
        let label = label.to_ascii_lowercase();
        label == self.code()
            || self
                .family()
                .dataset_labels()
                .iter()
                .any(|own| label.contains(own) || own.contains(label.as_str()))
    }
}

/// Canonical installation-arrangement codes.
///
/// A fixed one-to-one enumeration of the eleven arrangements the reference
/// tables distinguish. The `code()` string is what dataset column metadata
/// uses; [`Arrangement::from_code`] is the inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arrangement {
    UnenclosedSpaced,
    UnenclosedTouching,
    UnenclosedExposedToSun,
    EnclosedInAir,
    ThermalInsulationWallCavity,
    ThermalInsulationCeiling,
    ThermalInsulationPartial,
    ThermalInsulationComplete,
    BuriedDirect,
    UndergroundDuct,
    UndergroundDuctTouching,
}

impl Arrangement {
    pub const ALL: [Arrangement; 11] = [
        Arrangement::UnenclosedSpaced,
        Arrangement::UnenclosedTouching,
        Arrangement::UnenclosedExposedToSun,
        Arrangement::EnclosedInAir,
        Arrangement::ThermalInsulationWallCavity,
        Arrangement::ThermalInsulationCeiling,
        Arrangement::ThermalInsulationPartial,
        Arrangement::ThermalInsulationComplete,
        Arrangement::BuriedDirect,
        Arrangement::UndergroundDuct,
        Arrangement::UndergroundDuctTouching,
    ];

    /// Canonical code used in dataset column metadata and on the CLI.
    pub fn code(self) -> &'static str {
        match self {
            Arrangement::UnenclosedSpaced => "unenclosed_spaced",
            Arrangement::UnenclosedTouching => "unenclosed_touching",
            Arrangement::UnenclosedExposedToSun => "unenclosed_sun",
            Arrangement::EnclosedInAir => "enclosed_air",
            Arrangement::ThermalInsulationWallCavity => "thermal_wall_cavity",
            Arrangement::ThermalInsulationCeiling => "thermal_ceiling",
            Arrangement::ThermalInsulationPartial => "thermal_partial",
            Arrangement::ThermalInsulationComplete => "thermal_complete",
            Arrangement::BuriedDirect => "buried_direct",
            Arrangement::UndergroundDuct => "underground_duct",
            Arrangement::UndergroundDuctTouching => "underground_duct_touching",
        }
    }

    pub fn from_code(code: &str) -> Option<Arrangement> {
        Self::ALL.iter().copied().find(|a| a.code() == code)
    }

    /// Buried and underground-duct arrangements attract the soil-thermal
    /// derating factor.
    pub fn is_underground(self) -> bool {
        matches!(
            self,
            Arrangement::BuriedDirect
                | Arrangement::UndergroundDuct
                | Arrangement::UndergroundDuctTouching
        )
    }
}

/// Conductor material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConductorMaterial {
    Copper,
    Aluminium,
}

impl ConductorMaterial {
    pub const ALL: [ConductorMaterial; 2] = [ConductorMaterial::Copper, ConductorMaterial::Aluminium];

    pub fn label(self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "copper",
            ConductorMaterial::Aluminium => "aluminium",
        }
    }

    pub fn from_label(label: &str) -> Option<ConductorMaterial> {
        match label.to_ascii_lowercase().as_str() {
            "copper" | "cu" => Some(ConductorMaterial::Copper),
            "aluminium" | "aluminum" | "al" => Some(ConductorMaterial::Aluminium),
            _ => None,
        }
    }
}

/// Phase configuration of the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseConfig {
    Dc,
    SinglePhaseAc,
    TwoPhaseAc,
    TwoPhaseThreeWireAc,
    ThreePhaseAc,
}

impl PhaseConfig {
    pub const ALL: [PhaseConfig; 5] = [
        PhaseConfig::Dc,
        PhaseConfig::SinglePhaseAc,
        PhaseConfig::TwoPhaseAc,
        PhaseConfig::TwoPhaseThreeWireAc,
        PhaseConfig::ThreePhaseAc,
    ];

    /// Multiplier k in the voltage-drop formula ΔV = I·L·k·Z/1000.
    ///
    /// √3 for three-phase; 2 for every other configuration. DC and the
    /// two-phase variants intentionally share the single-phase treatment,
    /// matching the reference behaviour.
    pub fn drop_multiplier(self) -> f64 {
        match self {
            PhaseConfig::ThreePhaseAc => 3.0_f64.sqrt(),
            _ => 2.0,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            PhaseConfig::Dc => "dc",
            PhaseConfig::SinglePhaseAc => "1ph",
            PhaseConfig::TwoPhaseAc => "2ph",
            PhaseConfig::TwoPhaseThreeWireAc => "2ph-3w",
            PhaseConfig::ThreePhaseAc => "3ph",
        }
    }

    pub fn from_code(code: &str) -> Option<PhaseConfig> {
        Self::ALL.iter().copied().find(|p| p.code() == code)
    }
}

/// A requested conductor size: a specific size in mm², or automatic
/// selection of the smallest compliant size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeSpec {
    Auto,
    Fixed(f64),
}

impl SizeSpec {
    pub fn is_auto(self) -> bool {
        matches!(self, SizeSpec::Auto)
    }

    pub fn fixed(self) -> Option<f64> {
        match self {
            SizeSpec::Auto => None,
            SizeSpec::Fixed(size) => Some(size),
        }
    }
}

/// Validated input snapshot for one calculation request.
///
/// Immutable once constructed; field-level validation (numeric parsing,
/// required-field checks) is the caller's responsibility. The engine only
/// defends against missing dataset entries, not malformed designs.
#[derive(Debug, Clone, Serialize)]
pub struct DesignState {
    pub cable_type: CableType,
    pub insulation: InsulationCode,
    pub arrangement: Arrangement,
    pub material: ConductorMaterial,
    pub phases: PhaseConfig,
    /// Nominal supply voltage
    pub voltage: Volts,
    /// Load current the circuit must carry
    pub load_current: Amperes,
    /// Requested active conductor size
    pub active_size: SizeSpec,
    /// Requested earth conductor size
    pub earth_size: SizeSpec,
    /// Cable run length
    pub length: Metres,
    /// Maximum allowed voltage drop, percent of nominal
    pub max_drop_percent: f64,
}

impl DesignState {
    /// A typical three-phase 400 V sub-mains design; primarily a convenient
    /// starting point for tests and examples.
    pub fn example() -> Self {
        Self {
            cable_type: CableType::MulticoreCircular,
            insulation: InsulationCode::V75,
            arrangement: Arrangement::UnenclosedSpaced,
            material: ConductorMaterial::Copper,
            phases: PhaseConfig::ThreePhaseAc,
            voltage: Volts(400.0),
            load_current: Amperes(63.0),
            active_size: SizeSpec::Auto,
            earth_size: SizeSpec::Auto,
            length: Metres(40.0),
            max_drop_percent: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cable_type_label_matching() {
        assert!(CableType::MulticoreCircular.matches_label("Multicore circular conductors"));
        assert!(CableType::Armoured.matches_label("SWA"));
        // Containment works in either direction
        assert!(CableType::TwoCorePlusEarth.matches_label("two core and earth"));
        assert!(!CableType::Flexible.matches_label("single core"));
    }

    #[test]
    fn test_insulation_family_and_temp() {
        assert_eq!(InsulationCode::V75.family(), InsulationFamily::Pvc);
        assert_eq!(InsulationCode::X90.family(), InsulationFamily::Xlpe);
        assert_eq!(InsulationCode::V75.max_temp_c(), 75.0);
        assert_eq!(InsulationCode::X110.max_temp_c(), 110.0);
    }

    #[test]
    fn test_insulation_label_matching() {
        assert!(InsulationCode::V75.family_matches_label("PVC"));
        assert!(InsulationCode::X90.family_matches_label("XLPE (thermoset)"));
        assert!(!InsulationCode::V90.family_matches_label("xlpe"));
    }

    #[test]
    fn test_arrangement_roundtrip() {
        for arr in Arrangement::ALL {
            assert_eq!(Arrangement::from_code(arr.code()), Some(arr));
        }
        assert_eq!(Arrangement::from_code("on_the_moon"), None);
    }

    #[test]
    fn test_arrangement_underground() {
        assert!(Arrangement::BuriedDirect.is_underground());
        assert!(Arrangement::UndergroundDuct.is_underground());
        assert!(Arrangement::UndergroundDuctTouching.is_underground());
        assert!(!Arrangement::EnclosedInAir.is_underground());
        assert_eq!(
            Arrangement::ALL.iter().filter(|a| a.is_underground()).count(),
            3
        );
    }

    #[test]
    fn test_material_labels() {
        assert_eq!(ConductorMaterial::from_label("Cu"), Some(ConductorMaterial::Copper));
        assert_eq!(
            ConductorMaterial::from_label("aluminum"),
            Some(ConductorMaterial::Aluminium)
        );
        assert_eq!(ConductorMaterial::from_label("gold"), None);
    }

    #[test]
    fn test_drop_multiplier() {
        assert!((PhaseConfig::ThreePhaseAc.drop_multiplier() - 3.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(PhaseConfig::Dc.drop_multiplier(), 2.0);
        assert_eq!(PhaseConfig::SinglePhaseAc.drop_multiplier(), 2.0);
        assert_eq!(PhaseConfig::TwoPhaseAc.drop_multiplier(), 2.0);
        assert_eq!(PhaseConfig::TwoPhaseThreeWireAc.drop_multiplier(), 2.0);
    }

    #[test]
    fn test_size_spec() {
        assert!(SizeSpec::Auto.is_auto());
        assert_eq!(SizeSpec::Fixed(16.0).fixed(), Some(16.0));
        assert_eq!(SizeSpec::Auto.fixed(), None);
    }
}
