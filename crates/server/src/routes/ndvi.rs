//! Demo vegetation endpoints

use crate::error::ApiError;
use crate::params::{accept_query, grid_size, optional_date, point_or_origin, PointQuery};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use bloomwatch_core::demo::{
    clamp_grid_size, geojson_centroid, NdviGrid, NdviPoint, NdviSeries, DEFAULT_SERIES_DAYS,
};
use bloomwatch_core::{DateRange, GeoPoint};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct GridQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Body of `POST /api/area/ndvi`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaRequest {
    pub geojson: Value,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// `GET /api/ndvi-proxy?lat=&lon=&date=`
pub async fn proxy(
    State(state): State<AppState>,
    query: Result<Query<PointQuery>, QueryRejection>,
) -> Result<Json<NdviPoint>, ApiError> {
    let query = accept_query(query)?;
    let point = point_or_origin(query.lat.as_deref(), query.lon.as_deref())?;
    let date = optional_date("date", query.date.as_deref())?.unwrap_or_else(|| state.clock.today());
    Ok(Json(state.provider.ndvi_point(point, date)))
}

/// `GET /api/ndvi-grid?lat=&lon=&size=`
pub async fn grid(
    State(state): State<AppState>,
    query: Result<Query<GridQuery>, QueryRejection>,
) -> Result<Json<NdviGrid>, ApiError> {
    let query = accept_query(query)?;
    let center = point_or_origin(query.lat.as_deref(), query.lon.as_deref())?;
    let size = clamp_grid_size(grid_size(query.size.as_deref())?);
    Ok(Json(state.provider.ndvi_grid(center, size)))
}

fn area_series(
    state: &AppState,
    point: GeoPoint,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<NdviSeries, ApiError> {
    let range = DateRange::resolve(
        optional_date("startDate", start)?,
        optional_date("endDate", end)?,
        state.clock.today(),
        DEFAULT_SERIES_DAYS,
    )?;
    Ok(state.provider.ndvi_series(point, range))
}

/// `GET /api/area/ndvi?lat=&lon=&startDate=&endDate=`
pub async fn area_by_point(
    State(state): State<AppState>,
    query: Result<Query<AreaQuery>, QueryRejection>,
) -> Result<Json<NdviSeries>, ApiError> {
    let query = accept_query(query)?;
    let point = point_or_origin(query.lat.as_deref(), query.lon.as_deref())?;
    let series = area_series(
        &state,
        point,
        query.start_date.as_deref(),
        query.end_date.as_deref(),
    )?;
    Ok(Json(series))
}

/// `POST /api/area/ndvi` with `{geojson, startDate?, endDate?}`; the series
/// is taken at the centroid of the geometry.
pub async fn area_by_geojson(
    State(state): State<AppState>,
    body: Result<Json<AreaRequest>, JsonRejection>,
) -> Result<Json<NdviSeries>, ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let centroid = geojson_centroid(&request.geojson)?;
    let series = area_series(
        &state,
        centroid,
        request.start_date.as_deref(),
        request.end_date.as_deref(),
    )?;
    Ok(Json(series))
}
