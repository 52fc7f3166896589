//! Combined algal-bloom risk score and cotton crop signal
//!
//! Five indicators are scored 1 (benign) to 3 (adverse) and averaged:
//!
//! | Factor | 3 | 2 | 1 |
//! |---|---|---|---|
//! | NDVI | < 0.2 | < 0.5 | otherwise |
//! | 7-day rain (mm) | < 10 | < 30 | otherwise |
//! | Dust probability | > 0.7 | > 0.3 | otherwise |
//! | Lunar phase | > 0.8 | > 0.4 | otherwise |
//! | Season | dry (Dec-Mar) | transition (Apr-May) | rainy (Jun-Nov) |
//!
//! The reported dust probability and lunar phase (already rounded) are the
//! values scored, matching what the dashboard displays next to the score.

use crate::astronomy::{dust_likelihood, lunar_phase, DustLikelihood, LunarPhaseResult};
use crate::core_types::dates::DateRange;
use crate::core_types::geo::GeoPoint;
use crate::core_types::units::{round_to, Millimeters, Ndvi};
use crate::demo::{DemoDataProvider, DEFAULT_WEATHER_DAYS};
use crate::error::Result;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Mean score at or above which the band is `High`
pub const HIGH_RISK_FROM: f64 = 2.5;

/// Mean score at or above which the band is `Moderate`
pub const MODERATE_RISK_FROM: f64 = 1.8;

/// Hispaniola's broad rainfall regime by calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Dry,
    Transition,
    Rainy,
}

impl Season {
    /// Season for a 1-based month; months outside 1-12 count as dry
    #[must_use]
    pub fn from_month(month: u32) -> Self {
        match month {
            6..=11 => Self::Rainy,
            4..=5 => Self::Transition,
            _ => Self::Dry,
        }
    }

    fn score(self) -> u8 {
        match self {
            Self::Dry => 3,
            Self::Transition => 2,
            Self::Rainy => 1,
        }
    }
}

/// Overall band of the mean score, serialised in Spanish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskBand {
    #[serde(rename = "Bajo")]
    Low,
    #[serde(rename = "Moderado")]
    Moderate,
    #[serde(rename = "Alto")]
    High,
}

impl RiskBand {
    #[must_use]
    pub fn from_total(total: f64) -> Self {
        if total >= HIGH_RISK_FROM {
            Self::High
        } else if total >= MODERATE_RISK_FROM {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Bajo",
            Self::Moderate => "Moderado",
            Self::High => "Alto",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-indicator scores, each 1..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub ndvi: u8,
    pub weather: u8,
    pub sahara: u8,
    pub lunar: u8,
    pub season: u8,
}

impl RiskFactors {
    fn mean(self) -> f64 {
        let sum = [self.ndvi, self.weather, self.sahara, self.lunar, self.season]
            .into_iter()
            .map(f64::from)
            .sum::<f64>();
        sum / 5.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Mean of the five factor scores, 1.0..=3.0
    pub total: f64,
    pub band: RiskBand,
    pub factors: RiskFactors,
}

/// Everything the score is computed from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskInputs {
    pub ndvi: Ndvi,
    pub precipitation: Millimeters,
    pub dust: DustLikelihood,
    pub lunar: LunarPhaseResult,
    pub season: Season,
}

fn ndvi_score(ndvi: f64) -> u8 {
    match ndvi {
        v if v < 0.2 => 3,
        v if v < 0.5 => 2,
        _ => 1,
    }
}

fn rain_score(mm: f64) -> u8 {
    match mm {
        v if v < 10.0 => 3,
        v if v < 30.0 => 2,
        _ => 1,
    }
}

fn dust_score(probability: f64) -> u8 {
    match probability {
        p if p > 0.7 => 3,
        p if p > 0.3 => 2,
        _ => 1,
    }
}

fn lunar_score(phase: f64) -> u8 {
    match phase {
        p if p > 0.8 => 3,
        p if p > 0.4 => 2,
        _ => 1,
    }
}

/// Score every indicator and band the mean
#[must_use]
pub fn assess(inputs: &RiskInputs) -> RiskAssessment {
    let factors = RiskFactors {
        ndvi: ndvi_score(*inputs.ndvi),
        weather: rain_score(*inputs.precipitation),
        sahara: dust_score(inputs.dust.probability),
        lunar: lunar_score(inputs.lunar.phase),
        season: inputs.season.score(),
    };
    let total = factors.mean();
    RiskAssessment {
        total,
        band: RiskBand::from_total(total),
        factors,
    }
}

/// Traffic-light state of the cotton signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropSignalLevel {
    #[serde(rename = "Rojo")]
    Red,
    #[serde(rename = "Amarillo")]
    Yellow,
    #[serde(rename = "Verde")]
    Green,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl CropSignalLevel {
    /// Spanish field advice shown with the signal
    #[must_use]
    pub fn advice(self) -> &'static str {
        match self {
            Self::Red => "Riesgo de sequía para algodón. Considerar riego inmediato y muestreo de campo.",
            Self::Yellow => "Estrés leve. Monitorizar la tendencia y verificar precipitaciones próximas.",
            Self::Green => "Condiciones favorables para algodón.",
            Self::NotApplicable => "Sin datos suficientes",
        }
    }
}

impl fmt::Display for CropSignalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Red => "Rojo",
            Self::Yellow => "Amarillo",
            Self::Green => "Verde",
            Self::NotApplicable => "N/A",
        };
        f.write_str(label)
    }
}

/// Cotton drought signal from vegetation and recent rain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CottonSignal {
    pub level: CropSignalLevel,
    pub advice: String,
    pub ndvi: f64,
    pub precip: f64,
}

/// Red when both vegetation and rain are low; yellow and green by NDVI
/// alone; N/A for low NDVI with adequate rain.
#[must_use]
pub fn cotton_signal(ndvi: Ndvi, precipitation: Millimeters) -> CottonSignal {
    let (v, mm) = (*ndvi, *precipitation);
    let level = if v < 0.2 && mm < 5.0 {
        CropSignalLevel::Red
    } else if (0.2..0.35).contains(&v) {
        CropSignalLevel::Yellow
    } else if v >= 0.35 {
        CropSignalLevel::Green
    } else {
        CropSignalLevel::NotApplicable
    };
    CottonSignal {
        level,
        advice: level.advice().to_owned(),
        ndvi: v,
        precip: mm,
    }
}

/// Full dashboard snapshot for one point and instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloomRiskReport {
    pub lat: f64,
    pub lon: f64,
    pub date: NaiveDate,
    pub lunar: LunarPhaseResult,
    pub sahara: DustLikelihood,
    pub ndvi: f64,
    pub precipitation_7d: f64,
    pub season: Season,
    pub risk: RiskAssessment,
    pub cotton: CottonSignal,
}

/// Gather every indicator for `point` at `timestamp` and score it.
///
/// Rain is the provider's total for the seven days ending on the
/// timestamp's UTC date.
pub fn bloom_risk_report(
    provider: &dyn DemoDataProvider,
    point: GeoPoint,
    timestamp: DateTime<Utc>,
) -> Result<BloomRiskReport> {
    let date = timestamp.date_naive();
    let lunar = lunar_phase(timestamp)?;
    let sahara = dust_likelihood(point, timestamp)?;
    let ndvi = provider.ndvi_point(point, date).index();
    let week = DateRange::ending_on(date, DEFAULT_WEATHER_DAYS)?;
    let precipitation = provider.weather(point, week).total_precipitation();
    let season = Season::from_month(timestamp.month());

    let risk = assess(&RiskInputs {
        ndvi,
        precipitation,
        dust: sahara,
        lunar,
        season,
    });

    debug!(
        "Bloom risk at {} on {}: total={:.2} ({}) factors={:?}",
        point, date, risk.total, risk.band, risk.factors
    );

    Ok(BloomRiskReport {
        lat: point.lat,
        lon: point.lon,
        date,
        lunar,
        sahara,
        ndvi: *ndvi,
        precipitation_7d: round_to(*precipitation, 1),
        season,
        risk,
        cotton: cotton_signal(ndvi, precipitation),
    })
}
