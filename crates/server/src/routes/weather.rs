use crate::error::ApiError;
use crate::params::{accept_query, optional_date, point_or_origin};
use crate::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use bloomwatch_core::demo::{WeatherSeries, DEFAULT_WEATHER_DAYS};
use bloomwatch_core::DateRange;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// `GET /api/weather?lat=&lon=&start=&end=`, daily precipitation
pub async fn daily(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<WeatherSeries>, ApiError> {
    let query = accept_query(query)?;
    let point = point_or_origin(query.lat.as_deref(), query.lon.as_deref())?;
    let range = DateRange::resolve(
        optional_date("start", query.start.as_deref())?,
        optional_date("end", query.end.as_deref())?,
        state.clock.today(),
        DEFAULT_WEATHER_DAYS,
    )?;
    Ok(Json(state.provider.weather(point, range)))
}
