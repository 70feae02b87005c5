//! Record Store Gateway.
//!
//! The backing document store is multi-tenant and reachable only over HTTP
//! (MongoDB Atlas Data API semantics): a `find` action with sort/limit and an
//! `insertOne` action, both authenticated with a static `api-key` header.
//! Handlers depend on the narrow [`DocumentStore`] seam so tests can swap in
//! an in-memory store.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Gateway errors. No retries are performed; every failure is request-scoped.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store unreachable or the request could not complete.
    #[error("store transport error: {0}")]
    Transport(String),

    /// Store reachable but returned a non-success status.
    #[error("store returned HTTP {0}: {1}")]
    Api(u16, String),

    /// Store response did not have the expected shape.
    #[error("malformed store response: {0}")]
    Parse(String),
}

/// Narrow seam over the remote document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist one document into a collection.
    async fn insert(&self, collection: &str, document: Value) -> Result<(), StoreError>;

    /// Fetch up to `limit` documents from a collection, most-recent first
    /// (sorted descending by the store's internal insertion identifier).
    async fn find(&self, collection: &str, limit: u32) -> Result<Vec<Value>, StoreError>;
}

/// Immutable store connection settings, fixed at construction.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Data API base URL, up to and including the API version segment.
    pub base_url: String,
    /// Static Data API key.
    pub api_key: String,
    /// Database name sent with every action.
    pub database: String,
    /// Cluster (data source) name sent with every action.
    pub data_source: String,
    /// Bound on every store round trip; there is no retry, so a hung call
    /// would otherwise hang the whole request.
    pub timeout_secs: u64,
}

/// Gateway over the Atlas Data API.
pub struct AtlasStore {
    http: reqwest::Client,
    config: StoreConfig,
}

impl AtlasStore {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// POST one Data API action and return its JSON body.
    async fn action(&self, action: &str, payload: Value) -> Result<Value, StoreError> {
        let url = format!(
            "{}/action/{}",
            self.config.base_url.trim_end_matches('/'),
            action
        );

        let response = self
            .http
            .post(&url)
            .header("api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))
    }
}

#[async_trait]
impl DocumentStore for AtlasStore {
    async fn insert(&self, collection: &str, document: Value) -> Result<(), StoreError> {
        let payload = json!({
            "collection": collection,
            "database": self.config.database,
            "dataSource": self.config.data_source,
            "document": document,
        });

        let ack = self.action("insertOne", payload).await?;

        // The Data API acknowledges a successful insert with the new
        // document's identifier. Anything else means the document may not
        // have been persisted, and the caller must not report success.
        if ack.get("insertedId").is_none() {
            return Err(StoreError::Parse(format!(
                "insert acknowledgement missing insertedId: {}",
                ack
            )));
        }

        debug!(collection, "document inserted");
        Ok(())
    }

    async fn find(&self, collection: &str, limit: u32) -> Result<Vec<Value>, StoreError> {
        let payload = json!({
            "collection": collection,
            "database": self.config.database,
            "dataSource": self.config.data_source,
            "sort": { "_id": -1 },
            "limit": limit,
        });

        let body = self.action("find", payload).await?;

        match body.get("documents").and_then(Value::as_array) {
            Some(docs) => {
                debug!(collection, count = docs.len(), "documents fetched");
                Ok(docs.clone())
            }
            None => Err(StoreError::Parse(
                "find response missing documents array".to_string(),
            )),
        }
    }
}
