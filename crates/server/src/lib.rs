//! BloomWatch HTTP server
//!
//! Exposes the core indicators and demo data as JSON under `/api`. Build the
//! service with [`app`] and serve it with any `axum` listener.

pub mod config;
pub mod error;
pub mod params;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;

use axum::response::{IntoResponse, Response};
use axum::Router;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Panic payload as text, when it is one
fn panic_message(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(message) => *message,
        Err(panic) => panic
            .downcast_ref::<&str>()
            .map_or_else(|| "non-string panic payload".to_owned(), |s| (*s).to_owned()),
    }
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = format!("handler panicked: {}", panic_message(panic));
    ApiError::internal(error::SERVER_ERROR, detail).into_response()
}

/// Full service: routes, panic recovery, request tracing and permissive CORS
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
