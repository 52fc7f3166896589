//! Lunar phase from a fixed mean synodic month
//!
//! The phase fraction is the share of the current synodic month elapsed since
//! a reference new moon (2000-01-06 18:14 UTC). No orbital perturbations are
//! modelled; the mean month length alone drives the cycle, which is accurate
//! to within a day or so for dashboard purposes.
//!
//! | Fraction | Name |
//! |---|---|
//! | < 0.03 or > 0.97 | Luna nueva |
//! | [0.03, 0.22) | Creciente |
//! | [0.22, 0.28) | Cuarto creciente |
//! | [0.28, 0.47) | Gibosa creciente |
//! | [0.47, 0.53) | Luna llena |
//! | [0.53, 0.72) | Gibosa menguante |
//! | [0.72, 0.78) | Cuarto menguante |
//! | [0.78, 0.97] | Menguante |

use crate::core_types::units::{round_to, Days};
use crate::error::{ensure_finite, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Mean length of the synodic month in days
pub const SYNODIC_MONTH_DAYS: f64 = 29.530588853;

/// Reference new moon, 2000-01-06T18:14:00Z, as Unix milliseconds
pub const REFERENCE_NEW_MOON_UNIX_MS: i64 = 947_182_440_000;

/// Decimal places kept in the returned phase
const PHASE_DECIMALS: i32 = 3;

/// Phase-name boundaries on the unrounded fraction.
///
/// Rust `Range` types use **inclusive lower bound and exclusive upper bound** [a, b).
/// New moon wraps around zero and is expressed as two open thresholds.
pub mod phase_ranges {
    use std::ops::{Range, RangeInclusive};

    /// Fractions below this are "Luna nueva"
    pub const NEW_MOON_BELOW: f64 = 0.03;

    /// Fractions above this are "Luna nueva"
    pub const NEW_MOON_ABOVE: f64 = 0.97;

    /// "Creciente" `[0.03, 0.22)`
    pub const WAXING_CRESCENT: Range<f64> = 0.03..0.22;

    /// "Cuarto creciente" `[0.22, 0.28)`
    pub const FIRST_QUARTER: Range<f64> = 0.22..0.28;

    /// "Gibosa creciente" `[0.28, 0.47)`
    pub const WAXING_GIBBOUS: Range<f64> = 0.28..0.47;

    /// "Luna llena" `[0.47, 0.53)`
    pub const FULL_MOON: Range<f64> = 0.47..0.53;

    /// "Gibosa menguante" `[0.53, 0.72)`
    pub const WANING_GIBBOUS: Range<f64> = 0.53..0.72;

    /// "Cuarto menguante" `[0.72, 0.78)`
    pub const LAST_QUARTER: Range<f64> = 0.72..0.78;

    /// "Menguante" `[0.78, 0.97]` (upper bound inclusive)
    pub const WANING_CRESCENT: RangeInclusive<f64> = 0.78..=0.97;
}

/// The eight named phases, serialised with their Spanish labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LunarPhaseName {
    #[serde(rename = "Luna nueva")]
    NewMoon,
    #[serde(rename = "Creciente")]
    WaxingCrescent,
    #[serde(rename = "Cuarto creciente")]
    FirstQuarter,
    #[serde(rename = "Gibosa creciente")]
    WaxingGibbous,
    #[serde(rename = "Luna llena")]
    FullMoon,
    #[serde(rename = "Gibosa menguante")]
    WaningGibbous,
    #[serde(rename = "Cuarto menguante")]
    LastQuarter,
    #[serde(rename = "Menguante")]
    WaningCrescent,
}

impl LunarPhaseName {
    /// All names in cycle order, starting at new moon
    pub const ALL: [LunarPhaseName; 8] = [
        Self::NewMoon,
        Self::WaxingCrescent,
        Self::FirstQuarter,
        Self::WaxingGibbous,
        Self::FullMoon,
        Self::WaningGibbous,
        Self::LastQuarter,
        Self::WaningCrescent,
    ];

    /// Classify an unrounded phase fraction.
    ///
    /// Anything that matches no band (only NaN can) falls through to
    /// `WaningCrescent`, the last band.
    #[must_use]
    pub fn from_fraction(fraction: f64) -> Self {
        use phase_ranges as r;
        match fraction {
            f if f < r::NEW_MOON_BELOW || f > r::NEW_MOON_ABOVE => Self::NewMoon,
            f if r::WAXING_CRESCENT.contains(&f) => Self::WaxingCrescent,
            f if r::FIRST_QUARTER.contains(&f) => Self::FirstQuarter,
            f if r::WAXING_GIBBOUS.contains(&f) => Self::WaxingGibbous,
            f if r::FULL_MOON.contains(&f) => Self::FullMoon,
            f if r::WANING_GIBBOUS.contains(&f) => Self::WaningGibbous,
            f if r::LAST_QUARTER.contains(&f) => Self::LastQuarter,
            _ => Self::WaningCrescent,
        }
    }

    /// Spanish display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NewMoon => "Luna nueva",
            Self::WaxingCrescent => "Creciente",
            Self::FirstQuarter => "Cuarto creciente",
            Self::WaxingGibbous => "Gibosa creciente",
            Self::FullMoon => "Luna llena",
            Self::WaningGibbous => "Gibosa menguante",
            Self::LastQuarter => "Cuarto menguante",
            Self::WaningCrescent => "Menguante",
        }
    }
}

impl fmt::Display for LunarPhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Phase fraction (rounded to 3 places) and its name
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunarPhaseResult {
    pub phase: f64,
    pub name: LunarPhaseName,
}

/// The reference new moon as a timestamp
#[must_use]
pub fn reference_new_moon() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + TimeDelta::milliseconds(REFERENCE_NEW_MOON_UNIX_MS)
}

/// Days elapsed since the reference new moon
#[must_use]
pub fn days_since_reference(timestamp: DateTime<Utc>) -> Days {
    Days::between(reference_new_moon(), timestamp)
}

/// Unrounded share of the synodic month elapsed after `diff` days.
///
/// `%` on floats keeps the sign of the dividend, so the remainder is shifted
/// by one month and reduced again to land in `[0, month)` for negative `diff`.
#[must_use]
pub fn phase_fraction(diff: Days) -> f64 {
    let month = SYNODIC_MONTH_DAYS;
    ((*diff % month) + month) % month / month
}

/// Lunar phase at `timestamp`.
///
/// The name is chosen on the unrounded fraction. A fraction that rounds up
/// to 1.000 is reported as 0.0 so the returned phase stays in `[0, 1)`.
pub fn lunar_phase(timestamp: DateTime<Utc>) -> Result<LunarPhaseResult> {
    let diff = days_since_reference(timestamp);
    let fraction = ensure_finite(phase_fraction(diff), "lunar phase fraction")?;
    let name = LunarPhaseName::from_fraction(fraction);

    let mut phase = round_to(fraction, PHASE_DECIMALS);
    if phase >= 1.0 {
        phase = 0.0;
    }

    debug!(
        "Lunar phase at {}: {} since reference, fraction={:.6} ({})",
        timestamp, diff, fraction, name
    );

    Ok(LunarPhaseResult { phase, name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{Duration, TimeZone};

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 1, 6, 18, 14, 0).unwrap()
    }

    #[test]
    fn test_reference_constant_matches_epoch() {
        assert_eq!(reference().timestamp_millis(), REFERENCE_NEW_MOON_UNIX_MS);
        assert_eq!(reference_new_moon(), reference());
    }

    #[test]
    fn test_reference_instant_is_new_moon() {
        let result = lunar_phase(reference()).unwrap();
        assert_eq!(result.phase, 0.0);
        assert_eq!(result.name, LunarPhaseName::NewMoon);
    }

    #[test]
    fn test_half_month_later_is_full_moon() {
        let half = Duration::milliseconds((SYNODIC_MONTH_DAYS * 0.5 * 86_400_000.0) as i64);
        let result = lunar_phase(reference() + half).unwrap();
        assert_abs_diff_eq!(result.phase, 0.5, epsilon = 0.001);
        assert_eq!(result.name, LunarPhaseName::FullMoon);
    }

    #[test]
    fn test_negative_diff_wraps_forward() {
        // One day before the reference new moon is late in the previous cycle
        let fraction = phase_fraction(Days::new(-1.0));
        assert_abs_diff_eq!(
            fraction,
            (SYNODIC_MONTH_DAYS - 1.0) / SYNODIC_MONTH_DAYS,
            epsilon = 1e-12
        );
        assert!(fraction > 0.96 && fraction < 1.0);
    }

    #[test]
    fn test_band_boundaries() {
        use LunarPhaseName::*;
        let cases = [
            (0.0, NewMoon),
            (0.0299, NewMoon),
            (0.03, WaxingCrescent),
            (0.2199, WaxingCrescent),
            (0.22, FirstQuarter),
            (0.28, WaxingGibbous),
            (0.47, FullMoon),
            (0.53, WaningGibbous),
            (0.72, LastQuarter),
            (0.78, WaningCrescent),
            (0.97, WaningCrescent),
            (0.9701, NewMoon),
            (0.9999, NewMoon),
        ];
        for (fraction, expected) in cases {
            assert_eq!(
                LunarPhaseName::from_fraction(fraction),
                expected,
                "fraction {fraction}"
            );
        }
    }

    #[test]
    fn test_rounding_up_to_one_wraps_to_zero() {
        // 0.9996 of a month after the reference rounds to 1.000
        let offset = Duration::milliseconds((SYNODIC_MONTH_DAYS * 0.9996 * 86_400_000.0) as i64);
        let result = lunar_phase(reference() + offset).unwrap();
        assert_eq!(result.phase, 0.0);
        assert_eq!(result.name, LunarPhaseName::NewMoon);
    }

    #[test]
    fn test_serialises_spanish_label() {
        let json = serde_json::to_value(LunarPhaseResult {
            phase: 0.25,
            name: LunarPhaseName::FirstQuarter,
        })
        .unwrap();
        assert_eq!(json["name"], "Cuarto creciente");
        assert_eq!(json["phase"], 0.25);
    }

    #[test]
    fn test_label_matches_serde() {
        for name in LunarPhaseName::ALL {
            let json = serde_json::to_value(name).unwrap();
            assert_eq!(json, name.label());
        }
    }
}
