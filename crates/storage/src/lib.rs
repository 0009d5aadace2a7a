//! Optional sample upload to an external storage endpoint.
//!
//! Uploads are fire-and-forget: each batch runs on its own task, failures are
//! logged and reported back as a message, nothing is retried and the
//! simulation loop never waits on the network.

use dash_config::StorageConfig;
use dash_core::{AppState, DashError, Message, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// JSON body of one upload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRecord {
    /// Capture time, milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub value: f64,
    pub stream_id: u32,
}

/// Successful response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Receipt {
    transaction_id: String,
}

/// Newest sample of every stream, in registry order.
pub fn latest_records(state: &AppState) -> Vec<SampleRecord> {
    state
        .streams
        .iter()
        .filter_map(|stream| {
            stream.latest().map(|s| SampleRecord {
                timestamp: s.captured_at.timestamp_millis(),
                value: s.value,
                stream_id: stream.id(),
            })
        })
        .collect()
}

/// HTTP client for the storage endpoint.
#[derive(Debug, Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    endpoint: String,
}

impl StorageClient {
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| DashError::Storage(format!("client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one record and return the transaction id from the response.
    pub async fn upload(&self, record: &SampleRecord) -> Result<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(|e| DashError::Storage(format!("send: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashError::Storage(format!("endpoint returned {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DashError::Storage(format!("read body: {e}")))?;

        serde_json::from_str::<Receipt>(&body)
            .map(|r| r.transaction_id)
            .map_err(|e| DashError::Storage(format!("parse receipt: {e}")))
    }

    /// Upload `records` in the background, reporting each outcome on `tx`.
    ///
    /// Outcomes are delivered with `try_send`; if the event loop is
    /// saturated they are dropped rather than applying backpressure.
    pub fn spawn_upload(&self, records: Vec<SampleRecord>, tx: mpsc::Sender<Message>) {
        let client = self.clone();
        tokio::spawn(async move {
            for record in records {
                let msg = match client.upload(&record).await {
                    Ok(transaction_id) => {
                        debug!(stream = record.stream_id, %transaction_id, "Sample stored");
                        Message::UploadCompleted { transaction_id }
                    }
                    Err(e) => {
                        warn!(stream = record.stream_id, "Sample upload failed: {e}");
                        Message::UploadFailed(e.to_string())
                    }
                };
                if tx.try_send(msg).is_err() {
                    debug!("Upload outcome dropped; event loop busy or gone");
                }
            }
        });
    }
}
