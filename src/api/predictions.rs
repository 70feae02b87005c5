//! Prediction ingestion (hour-throttled) and retrieval.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::records::{PartialPrediction, DEFAULT_DATE, DEFAULT_TIME};
use crate::store::DocumentStore;
use crate::{clock, format, AppState, MEASUREMENTS, PREDICTIONS};

/// POST /predictions/insert/:token
///
/// The throttle runs before any other check: the predicting client does not
/// know when the last prediction was stored, so a write inside the one-hour
/// window is answered with an empty 200 and nothing is persisted. That is an
/// idempotent no-op, not an error — and it deliberately skips the token and
/// body validation, matching the deployed behavior.
pub async fn insert(
    State(state): State<AppState>,
    Path(token): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let now = clock::station_now();

    if let Some(last) = latest_prediction_time(state.store.as_ref()).await? {
        if !clock::should_accept(now, last) {
            debug!(%last, "prediction inside throttle window, dropped");
            return Ok(StatusCode::OK.into_response());
        }
    }

    if token != state.tokens.prediction {
        return Err(ApiError::InvalidToken);
    }
    if body.is_empty() {
        return Err(ApiError::EmptyBody);
    }

    let submitted = super::parse_object(&body)?;

    let mut document = Map::new();
    document.insert("date".to_string(), Value::from(clock::format_date(now)));
    document.insert("time".to_string(), Value::from(clock::format_time(now)));
    for (key, value) in &submitted {
        document.insert(key.clone(), value.clone());
    }

    state
        .store
        .insert(PREDICTIONS, Value::Object(document))
        .await?;

    info!("prediction stored");
    Ok(Json(Value::Object(submitted)).into_response())
}

/// Timestamp of the most recently stored prediction, if any.
///
/// Missing date/time halves take the standard read-side defaults before
/// parsing; a timestamp that still does not parse cannot throttle.
async fn latest_prediction_time(
    store: &dyn DocumentStore,
) -> Result<Option<NaiveDateTime>, ApiError> {
    let docs = store.find(PREDICTIONS, 1).await?;

    Ok(docs.first().and_then(|doc| {
        let date = doc.get("date").and_then(Value::as_str).unwrap_or(DEFAULT_DATE);
        let time = doc.get("time").and_then(Value::as_str).unwrap_or(DEFAULT_TIME);
        clock::parse_timestamp(date, time)
    }))
}

/// GET /predictions/latest
///
/// A flat JSON array: the five most recent predictions as annotated tuples,
/// oldest first, followed by the current measurement snapshot as an
/// unannotated tuple. The trailing unannotated entry is what the ML client
/// feeds into its next prediction.
pub async fn latest(State(state): State<AppState>) -> Result<Response, ApiError> {
    let mut entries = Vec::new();

    for doc in state.store.find(PREDICTIONS, 5).await?.into_iter().rev() {
        let prediction = PartialPrediction::from_doc(doc).with_defaults();
        entries.push(format::prediction_tuple(&prediction, true));
    }

    for doc in state.store.find(MEASUREMENTS, 1).await? {
        let snapshot = PartialPrediction::from_doc(doc).with_defaults();
        entries.push(format::prediction_tuple(&snapshot, false));
    }

    let body = format!("[{}]", entries.join(", "));
    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
