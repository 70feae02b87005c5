//! Measurement ingestion and retrieval.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use tracing::info;

use crate::error::ApiError;
use crate::records::{pressure_to_hectopascals, PartialMeasurement};
use crate::store::DocumentStore;
use crate::{clock, format, AppState, MEASUREMENTS};

/// POST /measurements/insert/:token
///
/// Accepts one sensor reading. The timestamp is always server-assigned;
/// pressure arrives in pascals and is stored in hectopascals. Fields this
/// service does not know about are persisted verbatim.
pub async fn insert(
    State(state): State<AppState>,
    Path(token): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    if token != state.tokens.measurement {
        return Err(ApiError::InvalidToken);
    }
    if body.is_empty() {
        return Err(ApiError::EmptyBody);
    }

    let submitted = super::parse_object(&body)?;
    let document = ingest_document(&submitted, clock::station_now());

    state
        .store
        .insert(MEASUREMENTS, Value::Object(document))
        .await?;

    info!(fields = submitted.len(), "measurement stored");
    Ok(Json(Value::Object(submitted)))
}

/// Build the document to persist: server timestamp first, submitted fields
/// merged over it, pressure converted Pa -> hPa.
fn ingest_document(submitted: &Map<String, Value>, now: NaiveDateTime) -> Map<String, Value> {
    let mut document = Map::new();
    document.insert("date".to_string(), Value::from(clock::format_date(now)));
    document.insert("time".to_string(), Value::from(clock::format_time(now)));

    for (key, value) in submitted {
        let value = if key == "pressure" {
            pressure_to_hectopascals(value)
        } else {
            value.clone()
        };
        document.insert(key.clone(), value);
    }

    document
}

/// GET /measurements/all
///
/// Up to the 20 most recent readings as Cumulus realtime lines, oldest at
/// the top and newest at the bottom. An empty store yields an empty body.
pub async fn all(State(state): State<AppState>) -> Result<Response, ApiError> {
    render_lines(state.store.as_ref(), 20).await
}

/// GET /measurements/latest
///
/// The single most recent reading as one Cumulus realtime line.
pub async fn latest(State(state): State<AppState>) -> Result<Response, ApiError> {
    render_lines(state.store.as_ref(), 1).await
}

/// Fetch newest-first, then reverse so the emitted text reads oldest-first
/// with the newest line last. The newest-last ordering is an external
/// contract with the display client.
async fn render_lines(store: &dyn DocumentStore, limit: u32) -> Result<Response, ApiError> {
    let docs = store.find(MEASUREMENTS, limit).await?;

    let mut body = String::new();
    for doc in docs.into_iter().rev() {
        let measurement = PartialMeasurement::from_doc(doc).with_defaults();
        body.push_str(&format::realtime_line(&measurement));
        body.push('\n');
    }

    Ok(body.into_response())
}
