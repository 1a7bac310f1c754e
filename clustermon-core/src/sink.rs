//! Indexing sink for metric records
//!
//! The sink persists each record as one document; the core never reads
//! anything back and does not retry. [`HttpSink`] indexes into an HTTP
//! document store; [`MemorySink`] collects records in memory for tests
//! and dry runs.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::SinkConfig;
use crate::error::SinkError;
use crate::record::MetricRecord;

/// Downstream store that persists metric records
#[async_trait]
pub trait Sink: Send + Sync {
    /// Persists one record under the given document type.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the record cannot be serialized or the
    /// store rejects it. Callers treat failures as fire-and-forget.
    async fn put(&self, doc_type: &str, record: &MetricRecord) -> Result<(), SinkError>;
}

/// Sink that indexes documents over HTTP (`POST <url>/<index>/_doc`)
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSink {
    /// Builds a sink for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Request`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &SinkConfig) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SinkError::Request(e.to_string()))?;
        let endpoint = format!("{}/{}/_doc", config.url.trim_end_matches('/'), config.index);
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl Sink for HttpSink {
    async fn put(&self, doc_type: &str, record: &MetricRecord) -> Result<(), SinkError> {
        let doc = record
            .to_document()
            .map_err(|e| SinkError::Serialize(e.to_string()))?;
        let response = self
            .client
            .post(&self.endpoint)
            .json(&doc)
            .send()
            .await
            .map_err(|e| SinkError::Request(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            tracing::debug!(doc_type, machine = %record.machine, "Indexed record");
            Ok(())
        } else {
            Err(SinkError::Status(status.as_u16()))
        }
    }
}

/// In-memory sink that keeps every record, in arrival order
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<(String, MetricRecord)>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything received so far, in arrival order.
    #[must_use]
    pub fn received(&self) -> Vec<(String, MetricRecord)> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Number of records received so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Whether no record has been received yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Sink for MemorySink {
    async fn put(&self, doc_type: &str, record: &MetricRecord) -> Result<(), SinkError> {
        if let Ok(mut records) = self.records.lock() {
            records.push((doc_type.to_string(), record.clone()));
        }
        Ok(())
    }
}
