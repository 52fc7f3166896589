use crate::error::ApiError;
use crate::params::{accept_point_query, optional_timestamp, required_point, PointQuery};
use crate::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use bloomwatch_core::{bloom_risk_report, BloomRiskReport};
use tracing::debug;

pub const RISK_FAILED: &str = "failed to compute bloom risk";

/// `GET /api/risk?lat=&lon=&date=`, every indicator plus the combined score
pub async fn report(
    State(state): State<AppState>,
    query: Result<Query<PointQuery>, QueryRejection>,
) -> Result<Json<BloomRiskReport>, ApiError> {
    let query = accept_point_query(query)?;
    let point = required_point(query.lat.as_deref(), query.lon.as_deref())?;
    let at = state
        .clock
        .resolve(optional_timestamp("date", query.date.as_deref())?);
    let report = bloom_risk_report(state.provider.as_ref(), point, at)
        .map_err(|e| ApiError::from_core(&e, RISK_FAILED))?;
    debug!(
        "Bloom risk for {} on {}: {:.2} ({})",
        point, report.date, report.risk.total, report.risk.band
    );
    Ok(Json(report))
}
