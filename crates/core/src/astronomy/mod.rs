//! Closed-form astronomical and atmospheric heuristics
//!
//! Both calculators are pure: they read only their arguments and fixed
//! constants, so concurrent callers need no coordination.

pub mod dust;
pub mod lunar;

pub use dust::{dust_likelihood, DustFactors, DustLevel, DustLikelihood};
pub use lunar::{lunar_phase, LunarPhaseName, LunarPhaseResult, SYNODIC_MONTH_DAYS};
