//! End-to-end checks of the HTTP contract, driven in-process
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use bloomwatch_core::demo::{NdviGrid, NdviPoint, NdviSeries, WeatherSeries};
use bloomwatch_core::{
    lunar_phase, DateRange, DemoDataProvider, FixedClock, GeoPoint, SyntheticProvider,
};
use bloomwatch_server::{app, AppState};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap()
}

fn service() -> Router {
    app(AppState::new(FixedClock(now()), SyntheticProvider::new(5)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(service(), Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();
    send(service(), request).await
}

#[tokio::test]
async fn ping_reports_clock_time() {
    let (status, body) = get("/api/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "now": "2025-07-15T12:00:00.000Z" }));
}

#[tokio::test]
async fn lunar_at_reference_new_moon() {
    let (status, body) = get("/api/astronomy/lunar?date=2000-01-06T18:14:00Z").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "phase": 0.0, "name": "Luna nueva" }));
}

#[tokio::test]
async fn lunar_defaults_to_clock() {
    let expected = serde_json::to_value(lunar_phase(now()).unwrap()).unwrap();
    assert_eq!(get("/api/astronomy/lunar").await.1, expected);
    assert_eq!(get("/api/astronomy/lunar?date=").await.1, expected);
}

#[tokio::test]
async fn lunar_rejects_unparseable_date() {
    let (status, body) = get("/api/astronomy/lunar?date=tomorrow").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "date must be an ISO-8601 date or timestamp");
}

#[tokio::test]
async fn sahara_in_season_over_hispaniola() {
    let (status, body) =
        get("/api/astronomy/sahara?lat=18.5&lon=-69.9&date=2025-07-15T00:00:00Z").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["level"], "Alto");
    assert!(body["probability"].as_f64().unwrap() >= 0.65);
}

#[tokio::test]
async fn sahara_requires_numeric_coordinates() {
    for uri in [
        "/api/astronomy/sahara",
        "/api/astronomy/sahara?lat=18.5",
        "/api/astronomy/sahara?lat=abc&lon=-69.9",
        "/api/astronomy/sahara?lat=&lon=-69.9",
    ] {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            body,
            json!({ "error": "lat and lon query params required and must be numbers" })
        );
    }
}

#[tokio::test]
async fn repeated_query_keys_answer_in_json() {
    let (status, body) = get("/api/astronomy/sahara?lat=18.5&lat=19&lon=-69.9").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "lat and lon query params required and must be numbers" })
    );

    let (status, body) = get("/api/risk?lat=18.5&lon=-69.9&lon=-70").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "lat and lon query params required and must be numbers"
    );

    for uri in [
        "/api/astronomy/lunar?date=2025-01-01&date=2025-01-02",
        "/api/ndvi-proxy?lat=1&lat=2",
        "/api/ndvi-grid?size=3&size=4",
        "/api/area/ndvi?startDate=2025-07-01&startDate=2025-07-02",
        "/api/weather?start=2025-07-01&start=2025-07-02",
    ] {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(
            body["error"].as_str().unwrap().contains("duplicate field"),
            "{uri}: {body}"
        );
    }
}

#[tokio::test]
async fn ndvi_proxy_defaults() {
    let (status, body) = get("/api/ndvi-proxy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "lat": 0.0, "lon": 0.0, "ndvi": 0.34, "date": "2025-07-15" })
    );

    let (_, body) = get("/api/ndvi-proxy?lat=18.5&lon=-69.9&date=2025-01-02").await;
    assert_eq!(body["date"], "2025-01-02");
    assert_eq!(body["lat"], 18.5);
}

#[tokio::test]
async fn ndvi_grid_sizes() {
    let (status, body) = get("/api/ndvi-grid?lat=18.5&lon=-69.9&size=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["size"], 3);
    assert_eq!(body["grid"].as_array().unwrap().len(), 3);
    assert_eq!(body["grid"][1][1]["lat"], 18.5);
    assert_eq!(body["grid"][1][1]["lon"], -69.9);

    assert_eq!(get("/api/ndvi-grid").await.1["size"], 7);
    assert_eq!(get("/api/ndvi-grid?size=400").await.1["size"], 25);
    assert_eq!(get("/api/ndvi-grid?size=0").await.1["size"], 1);
    assert_eq!(get("/api/ndvi-grid?size=seven").await.0, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn area_series_by_point() {
    let (status, body) = get("/api/area/ndvi?lat=18.5&lon=-69.9").await;
    assert_eq!(status, StatusCode::OK);
    let series = body["series"].as_array().unwrap();
    assert_eq!(series.len(), 10);
    assert_eq!(series[0]["date"], "2025-07-06");
    assert_eq!(series[9]["date"], "2025-07-15");

    let (_, body) = get("/api/area/ndvi?startDate=2025-07-01&endDate=2025-07-03").await;
    assert_eq!(body["series"].as_array().unwrap().len(), 3);

    let (status, _) = get("/api/area/ndvi?startDate=2025-07-03&endDate=2025-07-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn area_series_by_geojson() {
    let body = json!({
        "geojson": {
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-70.0, 18.0], [-69.0, 18.0], [-69.0, 19.0], [-70.0, 19.0]]]
            }
        },
        "startDate": "2025-07-10"
    });
    let (status, body) = post_json("/api/area/ndvi", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lat"], 18.5);
    assert_eq!(body["lon"], -69.5);
    assert_eq!(body["series"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn area_geojson_rejections() {
    let (status, body) = post_json("/api/area/ndvi", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = post_json("/api/area/ndvi", r#"{"geojson": {"type": "Feature"}}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid argument: geojson contains no coordinates");
}

#[tokio::test]
async fn weather_series_shape() {
    let (status, body) = get("/api/weather?lat=18.5&lon=-69.9").await;
    assert_eq!(status, StatusCode::OK);
    let daily = &body["data"]["daily"];
    assert_eq!(daily["time"].as_array().unwrap().len(), 7);
    assert_eq!(daily["precipitation_sum"].as_array().unwrap().len(), 7);
    assert_eq!(daily["time"][6], "2025-07-15");

    // Same request, same payload
    assert_eq!(get("/api/weather?lat=18.5&lon=-69.9").await.1, body);

    let (status, _) = get("/api/weather?start=2025-07-10&end=2025-07-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn risk_report() {
    let (status, body) = get("/api/risk?lat=18.5&lon=-69.9&date=2025-07-15").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2025-07-15");
    assert_eq!(body["sahara"]["level"], "Alto");
    assert_eq!(body["ndvi"], 0.34);
    assert_eq!(body["season"], "rainy");
    assert_eq!(body["risk"]["factors"]["season"], 1);
    assert_eq!(body["cotton"]["level"], "Amarillo");

    let (status, body) = get("/api/risk?lon=-69.9").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "lat and lon query params required and must be numbers"
    );
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let (status, body) = get("/api/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "not found" }));

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/api/ping")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(service(), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "not found" }));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::get("/api/ping")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = service().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

/// Provider whose grid generation always fails
struct Broken;

impl DemoDataProvider for Broken {
    fn ndvi_point(&self, point: GeoPoint, date: NaiveDate) -> NdviPoint {
        SyntheticProvider::default().ndvi_point(point, date)
    }

    fn ndvi_grid(&self, _center: GeoPoint, _size: usize) -> NdviGrid {
        panic!("grid source unavailable")
    }

    fn ndvi_series(&self, point: GeoPoint, range: DateRange) -> NdviSeries {
        SyntheticProvider::default().ndvi_series(point, range)
    }

    fn weather(&self, point: GeoPoint, range: DateRange) -> WeatherSeries {
        SyntheticProvider::default().weather(point, range)
    }
}

#[tokio::test]
async fn handler_panic_becomes_server_error() {
    let broken = app(AppState::new(FixedClock(now()), Broken));
    let request = Request::get("/api/ndvi-grid").body(Body::empty()).unwrap();
    let (status, body) = send(broken, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "server error" }));
}
