//! Semantic unit types for the dashboard's scalar quantities
//!
//! Newtype wrappers keep day counts, fractions, precipitation depths and
//! vegetation indices from being mixed up where a bare `f64` would be
//! accepted silently.
//!
//! # Design Philosophy
//! - Every type wraps `f64` so results match double-precision reference values
//! - Total ordering via `Ord` (NaN sorts above all values)
//! - `Deref` to the raw value for arithmetic-heavy call sites
//! - Private inner fields with validated constructors
//! - Serde support, serialised as the bare number
//!
//! # Usage
//! ```
//! use bloomwatch_core::core_types::units::{Fraction, Ndvi};
//!
//! let p = Fraction::clamped(1.25);
//! assert_eq!(*p, 1.0);
//!
//! let green = Ndvi::new(0.62);
//! assert!(green > Ndvi::new(0.2));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref};

/// Milliseconds in one mean solar day
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// Round `value` to `decimals` places, halves away from zero.
///
/// All numbers leaving the service are formatted through this helper
/// (3 places for phase and NDVI, 2 for probability, 6 for grid coordinates).
///
/// The tie is decided on the scaled product `value * 10^decimals`, not on the
/// exact binary expansion of `value`: `1.45` scales to exactly `14.5` and
/// rounds up to `1.5`, although its stored value sits just below 1.45.
#[inline]
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

// ============================================================================
// TIME
// ============================================================================

/// Signed span of time in fractional days
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Days(f64);

impl Eq for Days {}

impl PartialOrd for Days {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Days {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Days {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Days {
    /// Create a new day span (may be negative)
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Days(value)
    }

    /// Fractional days from `from` to `to`, millisecond precision.
    ///
    /// Negative when `to` predates `from`.
    #[must_use]
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self::from_millis(to.signed_duration_since(from).num_milliseconds())
    }

    /// Convert a signed millisecond count
    #[inline]
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Days(millis as f64 / MILLIS_PER_DAY)
    }
}

impl fmt::Display for Days {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} d", self.0)
    }
}

// ============================================================================
// FRACTION/RATIO TYPES
// ============================================================================

/// A fraction in [0, 1] (phase of a cycle, probability)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Fraction(f64);

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Fraction {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Fraction {
    /// Zero fraction
    pub const ZERO: Fraction = Fraction(0.0);

    /// Full/complete (1.0)
    pub const ONE: Fraction = Fraction(1.0);

    /// Create a new fraction. Asserts value is within [0, 1].
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&value),
            "Fraction::new: value not in [0, 1]"
        );
        Fraction(value)
    }

    /// Create a fraction, clamping into [0, 1]. NaN is kept as NaN.
    #[inline]
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        Fraction(value.clamp(0.0, 1.0))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

// ============================================================================
// HYDROLOGY
// ============================================================================

/// Precipitation depth in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Millimeters(f64);

impl Eq for Millimeters {}

impl PartialOrd for Millimeters {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Millimeters {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Millimeters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Millimeters {
    /// No rain
    pub const ZERO: Millimeters = Millimeters(0.0);

    /// Create a new depth. Asserts value is non-negative.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Millimeters::new: negative depth");
        Millimeters(value)
    }
}

impl Add for Millimeters {
    type Output = Millimeters;
    fn add(self, rhs: Millimeters) -> Millimeters {
        Millimeters(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Millimeters {
    fn sum<I: Iterator<Item = Millimeters>>(iter: I) -> Self {
        iter.fold(Millimeters::ZERO, Add::add)
    }
}

impl fmt::Display for Millimeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} mm", self.0)
    }
}

// ============================================================================
// REMOTE SENSING
// ============================================================================

/// Normalized Difference Vegetation Index, [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Ndvi(f64);

impl Eq for Ndvi {}

impl PartialOrd for Ndvi {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ndvi {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Ndvi {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Ndvi {
    /// Create a new index value. Asserts value is within [-1, 1].
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(
            (-1.0..=1.0).contains(&value),
            "Ndvi::new: value not in [-1, 1]"
        );
        Ndvi(value)
    }

    /// Create an index value clamped into `[min, max]`
    #[inline]
    #[must_use]
    pub fn clamped(value: f64, min: f64, max: f64) -> Self {
        Ndvi(value.clamp(min, max).clamp(-1.0, 1.0))
    }
}

impl fmt::Display for Ndvi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

// ============================================================================
// TESTS
// ============================================================================
