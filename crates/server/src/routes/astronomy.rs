//! Lunar phase and Saharan dust endpoints

use crate::error::ApiError;
use crate::params::{
    accept_point_query, accept_query, optional_timestamp, required_point, PointQuery,
};
use crate::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use bloomwatch_core::{dust_likelihood, lunar_phase, DustLikelihood, LunarPhaseResult};
use serde::Deserialize;
use tracing::debug;

pub const LUNAR_FAILED: &str = "failed to compute lunar phase";
pub const SAHARA_FAILED: &str = "failed to compute sahara likelihood";

#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// `GET /api/astronomy/lunar?date=`
pub async fn lunar(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<LunarPhaseResult>, ApiError> {
    let query = accept_query(query)?;
    let at = state
        .clock
        .resolve(optional_timestamp("date", query.date.as_deref())?);
    let result = lunar_phase(at).map_err(|e| ApiError::from_core(&e, LUNAR_FAILED))?;
    debug!("Lunar phase for {}: {}", at, result.name);
    Ok(Json(result))
}

/// `GET /api/astronomy/sahara?lat=&lon=&date=`
pub async fn sahara(
    State(state): State<AppState>,
    query: Result<Query<PointQuery>, QueryRejection>,
) -> Result<Json<DustLikelihood>, ApiError> {
    let query = accept_point_query(query)?;
    let point = required_point(query.lat.as_deref(), query.lon.as_deref())?;
    let at = state
        .clock
        .resolve(optional_timestamp("date", query.date.as_deref())?);
    let result = dust_likelihood(point, at).map_err(|e| ApiError::from_core(&e, SAHARA_FAILED))?;
    debug!("Dust likelihood for {} at {}: {}", point, at, result.level);
    Ok(Json(result))
}
