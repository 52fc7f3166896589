//! Geographic points and bounding boxes
//!
//! Coordinates are plain decimal degrees (WGS84). No range validation is
//! performed: heuristics accept whatever the caller supplies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude, degrees north
    pub lat: f64,
    /// Longitude, degrees east
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Point shifted by whole grid steps of `cell_size` degrees
    #[inline]
    #[must_use]
    pub fn offset(&self, rows: i64, cols: i64, cell_size: f64) -> Self {
        Self {
            lat: self.lat + rows as f64 * cell_size,
            lon: self.lon + cols as f64 * cell_size,
        }
    }

    /// Arithmetic mean of a set of points, `None` when empty
    pub fn centroid<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let (count, lat, lon) = points
            .into_iter()
            .fold((0usize, 0.0, 0.0), |(n, lat, lon), p| {
                (n + 1, lat + p.lat, lon + p.lon)
            });
        (count > 0).then(|| Self::new(lat / count as f64, lon / count as f64))
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// Axis-aligned lat/lon box, bounds inclusive on every side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lon..=self.max_lon).contains(&point.lon)
    }
}

/// Coarse box around the Dominican Republic: lat [17, 20], lon [-72, -68]
pub const DOMINICAN_REPUBLIC: BoundingBox = BoundingBox::new(17.0, 20.0, -72.0, -68.0);
