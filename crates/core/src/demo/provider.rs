//! Data-provider seam for the placeholder endpoints
//!
//! The HTTP layer talks to a `dyn DemoDataProvider`, so a real NDVI or
//! weather integration can replace [`SyntheticProvider`] without touching
//! routing.

use super::ndvi::{self, NdviGrid, NdviPoint, NdviSeries};
use super::weather::{self, WeatherSeries};
use crate::core_types::dates::DateRange;
use crate::core_types::geo::GeoPoint;
use chrono::NaiveDate;
use tracing::debug;

/// Source of vegetation and weather payloads.
///
/// Every input is explicit (no hidden "now" or global randomness), so two
/// calls with the same arguments may be compared in tests.
pub trait DemoDataProvider: Send + Sync {
    /// NDVI at a single point
    fn ndvi_point(&self, point: GeoPoint, date: NaiveDate) -> NdviPoint;

    /// Square NDVI grid centred on `center`, `size` cells per side
    fn ndvi_grid(&self, center: GeoPoint, size: usize) -> NdviGrid;

    /// Daily NDVI series over `range`
    fn ndvi_series(&self, point: GeoPoint, range: DateRange) -> NdviSeries;

    /// Daily precipitation over `range`
    fn weather(&self, point: GeoPoint, range: DateRange) -> WeatherSeries;
}

/// Default seed for synthetic weather
pub const DEFAULT_SEED: u64 = 0x00B1_005E_ED00_2025;

/// Formula-driven provider; weather randomness is seeded from `seed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticProvider {
    seed: u64,
}

impl SyntheticProvider {
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl DemoDataProvider for SyntheticProvider {
    fn ndvi_point(&self, point: GeoPoint, date: NaiveDate) -> NdviPoint {
        ndvi::point_sample(point, date)
    }

    fn ndvi_grid(&self, center: GeoPoint, size: usize) -> NdviGrid {
        debug!("Synthetic NDVI grid: {}x{} around {}", size, size, center);
        ndvi::grid(center, size)
    }

    fn ndvi_series(&self, point: GeoPoint, range: DateRange) -> NdviSeries {
        debug!(
            "Synthetic NDVI series at {}: {} to {}",
            point,
            range.start(),
            range.end()
        );
        ndvi::series(point, range)
    }

    fn weather(&self, point: GeoPoint, range: DateRange) -> WeatherSeries {
        debug!(
            "Synthetic weather at {}: {} days from {} (seed {:#x})",
            point,
            range.len(),
            range.start(),
            self.seed
        );
        weather::series(self.seed, point, range)
    }
}
