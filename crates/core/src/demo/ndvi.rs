//! Synthetic NDVI: single points, square grids and daily series
//!
//! None of this comes from imagery. Values are smooth trigonometric
//! surfaces of the coordinates so maps and charts have something plausible
//! to draw until a real vegetation source is wired in.

use crate::core_types::dates::DateRange;
use crate::core_types::geo::GeoPoint;
use crate::core_types::units::{round_to, Ndvi};
use crate::error::{BloomError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::f64::consts::PI;

/// NDVI reported for any single point
pub const POINT_NDVI: f64 = 0.34;

/// Grid cell spacing in degrees (roughly 2 km)
pub const GRID_CELL_DEGREES: f64 = 0.02;

/// Default grid edge length in cells
pub const DEFAULT_GRID_SIZE: i64 = 7;

/// Largest grid edge length in cells
pub const MAX_GRID_SIZE: i64 = 25;

/// Days in a series when the caller gives no range
pub const DEFAULT_SERIES_DAYS: i64 = 10;

/// Grid NDVI is clamped to this band
const GRID_NDVI_MIN: f64 = -0.2;
const GRID_NDVI_MAX: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NdviPoint {
    pub lat: f64,
    pub lon: f64,
    pub ndvi: f64,
    pub date: NaiveDate,
}

impl NdviPoint {
    #[must_use]
    pub fn index(&self) -> Ndvi {
        Ndvi::clamped(self.ndvi, -1.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NdviCell {
    pub lat: f64,
    pub lon: f64,
    pub ndvi: f64,
}

/// `size` x `size` cells centred on (`lat`, `lon`), row-major, south to north
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NdviGrid {
    pub lat: f64,
    pub lon: f64,
    pub size: usize,
    pub grid: Vec<Vec<NdviCell>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NdviSample {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NdviSeries {
    pub lat: f64,
    pub lon: f64,
    pub series: Vec<NdviSample>,
}

/// Clamp a requested grid size into `[1, MAX_GRID_SIZE]`
#[must_use]
pub fn clamp_grid_size(requested: i64) -> usize {
    requested.clamp(1, MAX_GRID_SIZE) as usize
}

/// Fixed-value NDVI sample for `point` on `date`
#[must_use]
pub fn point_sample(point: GeoPoint, date: NaiveDate) -> NdviPoint {
    NdviPoint {
        lat: point.lat,
        lon: point.lon,
        ndvi: POINT_NDVI,
        date,
    }
}

/// Smooth NDVI surface, clamped to [-0.2, 0.8]
#[must_use]
pub fn surface_ndvi(point: GeoPoint) -> Ndvi {
    let raw = 0.2 + 0.15 * (point.lat * PI).sin() + 0.15 * (point.lon * PI).cos();
    Ndvi::clamped(raw, GRID_NDVI_MIN, GRID_NDVI_MAX)
}

/// Square grid centred on `center`. `size` is clamped into `[1, 25]`.
#[must_use]
pub fn grid(center: GeoPoint, size: usize) -> NdviGrid {
    let size = clamp_grid_size(size as i64);
    let half = (size / 2) as i64;

    let grid = (0..size as i64)
        .map(|i| {
            (0..size as i64)
                .map(|j| {
                    let cell = center.offset(i - half, j - half, GRID_CELL_DEGREES);
                    NdviCell {
                        lat: round_to(cell.lat, 6),
                        lon: round_to(cell.lon, 6),
                        ndvi: round_to(*surface_ndvi(cell), 3),
                    }
                })
                .collect()
        })
        .collect();

    NdviGrid {
        lat: center.lat,
        lon: center.lon,
        size,
        grid,
    }
}

/// One sample per day of `range`; sample `k` is `0.25 + 0.12 sin((lat + lon + k) / 2)`
#[must_use]
pub fn series(point: GeoPoint, range: DateRange) -> NdviSeries {
    let series = range
        .days()
        .enumerate()
        .map(|(k, date)| NdviSample {
            date,
            value: round_to(
                0.25 + 0.12 * ((point.lat + point.lon + k as f64) * 0.5).sin(),
                3,
            ),
        })
        .collect();

    NdviSeries {
        lat: point.lat,
        lon: point.lon,
        series,
    }
}

/// Centroid of every `[lon, lat]` pair in a GeoJSON value.
///
/// Accepts a Feature, FeatureCollection, GeometryCollection or bare geometry,
/// and tolerates extra nesting levels around coordinate arrays.
pub fn geojson_centroid(geojson: &Value) -> Result<GeoPoint> {
    let mut points = Vec::new();
    collect_positions(geojson, &mut points);
    GeoPoint::centroid(points)
        .ok_or_else(|| BloomError::invalid_argument("geojson contains no coordinates"))
}

fn collect_positions(value: &Value, out: &mut Vec<GeoPoint>) {
    match value {
        Value::Array(items) => {
            if let Some(position) = as_position(items) {
                out.push(position);
            } else {
                for item in items {
                    collect_positions(item, out);
                }
            }
        }
        Value::Object(map) => {
            for key in ["coordinates", "geometry", "features", "geometries"] {
                if let Some(inner) = map.get(key) {
                    collect_positions(inner, out);
                }
            }
        }
        _ => {}
    }
}

/// `[lon, lat, ...]` with numeric first two members
fn as_position(items: &[Value]) -> Option<GeoPoint> {
    match items {
        [lon, lat, ..] => Some(GeoPoint::new(lat.as_f64()?, lon.as_f64()?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_grid_size_clamp() {
        assert_eq!(clamp_grid_size(-4), 1);
        assert_eq!(clamp_grid_size(0), 1);
        assert_eq!(clamp_grid_size(7), 7);
        assert_eq!(clamp_grid_size(400), 25);
    }

    #[test]
    fn test_grid_is_centred() {
        let center = GeoPoint::new(18.5, -69.9);
        let g = grid(center, 3);
        assert_eq!(g.size, 3);
        assert_eq!(g.grid.len(), 3);
        assert!(g.grid.iter().all(|row| row.len() == 3));

        let middle = g.grid[1][1];
        assert_eq!((middle.lat, middle.lon), (18.5, -69.9));
        assert_eq!((g.grid[0][0].lat, g.grid[0][0].lon), (18.48, -69.92));
        assert_eq!((g.grid[2][2].lat, g.grid[2][2].lon), (18.52, -69.88));
    }

    #[test]
    fn test_even_grid_has_extra_cell_on_far_side() {
        let g = grid(GeoPoint::new(0.0, 0.0), 4);
        assert_eq!(g.grid[0][0].lat, -0.04);
        assert_eq!(g.grid[3][3].lat, 0.02);
    }

    #[test]
    fn test_grid_values_in_band() {
        let g = grid(GeoPoint::new(19.0, -70.5), 25);
        for cell in g.grid.iter().flatten() {
            assert!((-0.2..=0.8).contains(&cell.ndvi), "{}", cell.ndvi);
        }
    }

    #[test]
    fn test_surface_at_origin() {
        // sin(0) = 0, cos(0) = 1 -> 0.2 + 0.15
        assert!((*surface_ndvi(GeoPoint::new(0.0, 0.0)) - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_series_formula() {
        let range = DateRange::ending_on(d(2025, 7, 15), 10).unwrap();
        let s = series(GeoPoint::new(18.5, -69.9), range);
        assert_eq!(s.series.len(), 10);
        assert_eq!(s.series[0].date, d(2025, 7, 6));
        assert_eq!(s.series[9].date, d(2025, 7, 15));
        for (k, sample) in s.series.iter().enumerate() {
            let expected = 0.25 + 0.12 * ((18.5 - 69.9 + k as f64) * 0.5).sin();
            assert!((sample.value - expected).abs() <= 0.0005);
        }
    }

    #[test]
    fn test_geojson_feature_centroid() {
        let feature = json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-70.0, 18.0], [-69.0, 18.0], [-69.0, 19.0], [-70.0, 19.0]]]
            }
        });
        assert_eq!(geojson_centroid(&feature).unwrap(), GeoPoint::new(18.5, -69.5));
    }

    #[test]
    fn test_geojson_extra_nesting() {
        // The dashboard wraps its ring one level deeper than the standard
        let feature = json!({
            "type": "Feature",
            "geometry": { "type": "Polygon", "coordinates": [[[[-70.0, 18.0], [-68.0, 20.0]]]] }
        });
        assert_eq!(geojson_centroid(&feature).unwrap(), GeoPoint::new(19.0, -69.0));
    }

    #[test]
    fn test_geojson_without_coordinates() {
        let err = geojson_centroid(&json!({ "type": "Feature", "geometry": null })).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_point_sample_serialises_date() {
        let json = serde_json::to_value(point_sample(GeoPoint::new(1.0, 2.0), d(2025, 9, 25))).unwrap();
        assert_eq!(json, json!({ "lat": 1.0, "lon": 2.0, "ndvi": 0.34, "date": "2025-09-25" }));
    }
}
