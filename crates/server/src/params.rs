//! Query-string parsing shared by the routes
//!
//! Parameters arrive as raw strings so every rejection produces the
//! service's own JSON error instead of the extractor's plain-text one.
//! An empty value is treated the same as a missing one.

use crate::error::ApiError;
use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use bloomwatch_core::demo::DEFAULT_GRID_SIZE;
use bloomwatch_core::GeoPoint;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Deserialize;

pub const COORDINATES_REQUIRED: &str = "lat and lon query params required and must be numbers";

/// Accepted layouts for timestamps without an offset; all read as UTC
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// `lat`, `lon` and an optional `date`
#[derive(Debug, Default, Deserialize)]
pub struct PointQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub date: Option<String>,
}

/// Unwrap an extracted query string; a malformed one (such as a repeated
/// key) becomes a 400 carrying the extractor's reason
pub fn accept_query<T>(extracted: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    extracted
        .map(|Query(query)| query)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// Like [`accept_query`] for endpoints whose coordinates are mandatory
pub fn accept_point_query(
    extracted: Result<Query<PointQuery>, QueryRejection>,
) -> Result<PointQuery, ApiError> {
    extracted
        .map(|Query(query)| query)
        .map_err(|_| ApiError::bad_request(COORDINATES_REQUIRED))
}

/// Non-empty trimmed value
fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse one coordinate; `None` for anything that is not a finite number
#[must_use]
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Both coordinates must be present and numeric
pub fn required_point(lat: Option<&str>, lon: Option<&str>) -> Result<GeoPoint, ApiError> {
    match (
        present(lat).and_then(parse_coordinate),
        present(lon).and_then(parse_coordinate),
    ) {
        (Some(lat), Some(lon)) => Ok(GeoPoint::new(lat, lon)),
        _ => Err(ApiError::bad_request(COORDINATES_REQUIRED)),
    }
}

/// Missing coordinates default to 0; present ones must be numeric
pub fn point_or_origin(lat: Option<&str>, lon: Option<&str>) -> Result<GeoPoint, ApiError> {
    let coordinate = |raw: Option<&str>| match present(raw) {
        None => Ok(0.0),
        Some(s) => parse_coordinate(s).ok_or_else(|| ApiError::bad_request(COORDINATES_REQUIRED)),
    };
    Ok(GeoPoint::new(coordinate(lat)?, coordinate(lon)?))
}

/// Parse an ISO-8601 timestamp or calendar date.
///
/// Accepts RFC 3339, a date-time without offset (UTC) and a plain
/// `YYYY-MM-DD` (UTC midnight).
#[must_use]
pub fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    if let Some(t) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(t.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Optional timestamp parameter `name`
pub fn optional_timestamp(name: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>, ApiError> {
    present(raw)
        .map(|s| {
            parse_timestamp_str(s).ok_or_else(|| {
                ApiError::bad_request(format!("{name} must be an ISO-8601 date or timestamp"))
            })
        })
        .transpose()
}

/// Optional calendar-date parameter `name`; a timestamp contributes its UTC date
pub fn optional_date(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    Ok(optional_timestamp(name, raw)?.as_ref().map(DateTime::date_naive))
}

/// Requested grid edge length before clamping
pub fn grid_size(raw: Option<&str>) -> Result<i64, ApiError> {
    match present(raw) {
        None => Ok(DEFAULT_GRID_SIZE),
        Some(s) => s
            .parse::<i64>()
            .map_err(|_| ApiError::bad_request("size must be an integer")),
    }
}
