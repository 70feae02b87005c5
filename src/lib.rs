//! station-api — weather station REST API.
//!
//! Ingests periodic environmental measurements (temperature, humidity,
//! pressure) from the station's sensor and ML predictions derived from them,
//! and serves both back in the external formats the downstream consumers
//! expect. All persistence lives in a remote document store reached over
//! HTTP; the process itself holds no state between requests.

use axum::Router;
use std::sync::Arc;

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod format;
pub mod records;
pub mod store;

use config::Tokens;
use store::DocumentStore;

/// Store collection holding sensor measurements.
pub const MEASUREMENTS: &str = "measurements";
/// Store collection holding ML predictions.
pub const PREDICTIONS: &str = "predictions";

/// Application state shared across HTTP handlers.
///
/// Handlers are stateless beyond this: the store gateway and the write
/// tokens, both immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub tokens: Tokens,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, tokens: Tokens) -> Self {
        Self { store, tokens }
    }
}

/// Build the application router.
///
/// Read endpoints are public; write endpoints authenticate via their path
/// token inside the handler (the token is part of the route, not a header).
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::ui::index))
        .route("/health", get(api::health::health_check))
        .route("/measurements/insert/:token", post(api::measurements::insert))
        .route("/measurements/all", get(api::measurements::all))
        .route("/measurements/latest", get(api::measurements::latest))
        .route("/predictions/insert/:token", post(api::predictions::insert))
        .route("/predictions/latest", get(api::predictions::latest))
        .with_state(state)
}
