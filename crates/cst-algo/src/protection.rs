//! Protection-device selection and earth-conductor sizing.

use cst_core::result::{ProtectionSelection, TripCurve};
use cst_core::units::Amperes;

/// Ascending ladder of standard protection-device ratings (A).
pub const STANDARD_RATINGS_A: [f64; 12] = [
    6.0, 10.0, 16.0, 20.0, 25.0, 32.0, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0,
];

/// Fixed monotonic step table mapping active conductor size to minimum
/// earth conductor size (mm²). A simplified stand-in for the referenced
/// standard's full earth-sizing table.
pub const EARTH_SIZE_STEPS: [(f64, f64); 12] = [
    (1.0, 1.0),
    (2.5, 2.5),
    (4.0, 2.5),
    (6.0, 2.5),
    (10.0, 4.0),
    (16.0, 6.0),
    (25.0, 6.0),
    (35.0, 10.0),
    (50.0, 10.0),
    (70.0, 16.0),
    (95.0, 16.0),
    (120.0, 16.0),
];

/// Earth size used for active sizes absent from the step table (mm²).
pub const DEFAULT_EARTH_SIZE_MM2: f64 = 6.0;

/// Select the smallest standard device rating ≥ the load current.
///
/// A load beyond the ladder's maximum clamps to the maximum rather than
/// failing; protection coordination past that point is out of scope.
pub fn select_protection(load: Amperes) -> ProtectionSelection {
    let rating = STANDARD_RATINGS_A
        .iter()
        .copied()
        .find(|&r| r >= load.value())
        .unwrap_or(STANDARD_RATINGS_A[STANDARD_RATINGS_A.len() - 1]);
    let curve = TripCurve::B;

    ProtectionSelection {
        rating: Amperes(rating),
        curve,
        trip_current: Amperes(rating * curve.trip_multiple()),
    }
}

/// Minimum earth conductor size for an active conductor size.
pub fn earth_size_for(active_size_mm2: f64) -> f64 {
    EARTH_SIZE_STEPS
        .iter()
        .find(|(active, _)| (active - active_size_mm2).abs() < 1e-9)
        .map(|&(_, earth)| earth)
        .unwrap_or(DEFAULT_EARTH_SIZE_MM2)
}
