//! Compile-time unit safety for cable-sizing quantities.
//!
//! Prevents mixing incompatible units like volts and amperes, or metres and
//! ohms per kilometre.
//!
//! Cable sizing mixes many scalar quantities in one pipeline: load current,
//! nominal voltage, run length, per-kilometre impedances, and dimensionless
//! derating factors. Using raw `f64` values throughout makes it easy to pass
//! a length where a current is expected. This module provides newtype
//! wrappers that catch such errors at compile time.
//!
//! All types use `#[repr(transparent)]` so they have the same memory layout
//! as `f64`; the compiler optimizes away all wrapper overhead. Conductor
//! sizes (mm²) deliberately stay plain `f64` — they are row keys in the
//! reference tables and are compared and sorted constantly.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Macro to implement common arithmetic operations for unit types
macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $type {
            type Output = Self;
            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Mul<$type> for f64 {
            type Output = $type;
            fn mul(self, rhs: $type) -> Self::Output {
                <$type>::new(self * rhs.0)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Div<$type> for $type {
            type Output = f64;
            fn div(self, rhs: $type) -> Self::Output {
                self.0 / rhs.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.4} {}", self.0, $unit_name)
            }
        }

        impl $type {
            /// Create a new value
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Get the raw numeric value
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            /// Absolute value
            #[inline]
            pub fn abs(self) -> Self {
                Self(self.0.abs())
            }

            /// Check if value is finite
            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// Minimum of two values
            #[inline]
            pub fn min(self, other: Self) -> Self {
                Self(self.0.min(other.0))
            }

            /// Maximum of two values
            #[inline]
            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }
        }
    };
}

/// Current in amperes (A)
///
/// Load current drawn by the circuit, and the current-carrying capacity
/// (ampacity) of a conductor under stated conditions.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Amperes(pub f64);

impl_unit_ops!(Amperes, "A");

/// Voltage in volts (V)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Volts(pub f64);

impl_unit_ops!(Volts, "V");

/// Run length in metres (m)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Metres(pub f64);

impl_unit_ops!(Metres, "m");

/// Per-unit-length impedance in ohms per kilometre (Ω/km)
///
/// Resistance, reactance, and impedance magnitude from the reference tables
/// are all expressed per kilometre of cable run.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct OhmsPerKm(pub f64);

impl_unit_ops!(OhmsPerKm, "Ω/km");

impl OhmsPerKm {
    /// Combine resistance and reactance into an impedance magnitude:
    /// Z = √(R² + X²)
    #[inline]
    pub fn magnitude(resistance: OhmsPerKm, reactance: OhmsPerKm) -> OhmsPerKm {
        OhmsPerKm((resistance.0.powi(2) + reactance.0.powi(2)).sqrt())
    }

    /// Total ohms over a run of the given length
    #[inline]
    pub fn over_length(self, length: Metres) -> f64 {
        self.0 * length.0 / 1000.0
    }
}

impl Volts {
    /// Express a voltage difference as a percentage of this nominal voltage.
    /// Returns 0.0 for a (degenerate) zero nominal voltage rather than
    /// propagating a non-finite value.
    #[inline]
    pub fn percent_of(self, drop: Volts) -> f64 {
        if self.0.abs() < 1e-12 {
            0.0
        } else {
            drop.0 / self.0 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amperes_arithmetic() {
        let i1 = Amperes(60.0);
        let i2 = Amperes(20.0);

        assert_eq!((i1 + i2).value(), 80.0);
        assert_eq!((i1 - i2).value(), 40.0);
        assert_eq!((-i1).value(), -60.0);
        assert_eq!((i1 * 2.0).value(), 120.0);
        assert_eq!((2.0 * i1).value(), 120.0);
        assert_eq!((i1 / 2.0).value(), 30.0);
        assert_eq!(i1 / i2, 3.0);
    }

    #[test]
    fn test_impedance_magnitude() {
        let r = OhmsPerKm(0.3);
        let x = OhmsPerKm(0.4);
        let z = OhmsPerKm::magnitude(r, x);

        assert!((z.value() - 0.5).abs() < 1e-10); // 3-4-5 triangle
    }

    #[test]
    fn test_over_length() {
        let z = OhmsPerKm(1.4);
        assert!((z.over_length(Metres(500.0)) - 0.7).abs() < 1e-10);
    }

    #[test]
    fn test_percent_of() {
        let nominal = Volts(400.0);
        assert!((nominal.percent_of(Volts(8.0)) - 2.0).abs() < 1e-10);
        assert_eq!(Volts(0.0).percent_of(Volts(8.0)), 0.0);
    }

    #[test]
    fn test_min_max() {
        let a = Amperes(100.0);
        let b = Amperes(50.0);

        assert_eq!(a.min(b).value(), 50.0);
        assert_eq!(a.max(b).value(), 100.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Amperes(63.0)), "63.0000 A");
        assert_eq!(format!("{}", Volts(400.0)), "400.0000 V");
        assert_eq!(format!("{}", OhmsPerKm(0.18)), "0.1800 Ω/km");
    }
}
