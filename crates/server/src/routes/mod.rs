//! Route table
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/api/ping` | [`system::ping`] |
//! | GET | `/api/astronomy/lunar` | [`astronomy::lunar`] |
//! | GET | `/api/astronomy/sahara` | [`astronomy::sahara`] |
//! | GET | `/api/ndvi-proxy` | [`ndvi::proxy`] |
//! | GET | `/api/ndvi-grid` | [`ndvi::grid`] |
//! | GET, POST | `/api/area/ndvi` | [`ndvi::area_by_point`], [`ndvi::area_by_geojson`] |
//! | GET | `/api/weather` | [`weather::daily`] |
//! | GET | `/api/risk` | [`risk::report`] |
//!
//! Unknown paths and unsupported methods answer 404.

pub mod astronomy;
pub mod ndvi;
pub mod risk;
pub mod system;
pub mod weather;

use crate::state::AppState;
use axum::routing::{get, MethodRouter};
use axum::Router;

fn or_not_found(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(system::not_found)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/ping", or_not_found(get(system::ping)))
        .route("/api/astronomy/lunar", or_not_found(get(astronomy::lunar)))
        .route("/api/astronomy/sahara", or_not_found(get(astronomy::sahara)))
        .route("/api/ndvi-proxy", or_not_found(get(ndvi::proxy)))
        .route("/api/ndvi-grid", or_not_found(get(ndvi::grid)))
        .route(
            "/api/area/ndvi",
            or_not_found(get(ndvi::area_by_point).post(ndvi::area_by_geojson)),
        )
        .route("/api/weather", or_not_found(get(weather::daily)))
        .route("/api/risk", or_not_found(get(risk::report)))
        .fallback(system::not_found)
}
