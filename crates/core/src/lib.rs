//! BloomWatch core library
//!
//! Environmental indicators for the BloomWatch RD dashboard, which tracks
//! algal-bloom and crop conditions around the Dominican Republic.
//!
//! ## Heuristics
//!
//! - Lunar phase from a mean synodic month and a reference new moon
//! - Saharan dust likelihood from season, region and a deterministic noise term
//! - A combined bloom-risk score and a cotton drought signal built on both
//!
//! ## Demo data
//!
//! Vegetation (NDVI) and precipitation payloads are synthetic. They sit
//! behind the [`demo::DemoDataProvider`] trait so a real source can be
//! swapped in without changing callers.
//!
//! All calculations are pure functions of their explicit inputs. "Now" is
//! supplied by a [`clock::Clock`] at the boundary.

// Core types and utilities
pub mod core_types;
pub mod error;

// Indicators
pub mod astronomy;
pub mod risk;

// Boundary seams
pub mod clock;
pub mod demo;

// Re-export core types
pub use core_types::{DateRange, Days, Fraction, GeoPoint, Millimeters, Ndvi};
pub use error::{BloomError, Result};

// Re-export indicators
pub use astronomy::{
    dust_likelihood, lunar_phase, DustLevel, DustLikelihood, LunarPhaseName, LunarPhaseResult,
    SYNODIC_MONTH_DAYS,
};
pub use risk::{bloom_risk_report, BloomRiskReport, CottonSignal, RiskAssessment, RiskBand};

// Re-export seams
pub use clock::{Clock, FixedClock, SystemClock};
pub use demo::{DemoDataProvider, SyntheticProvider};
