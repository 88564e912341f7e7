use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Query surface of a Prometheus-compatible metrics backend.
///
/// Implementations return the backend's raw result envelope; decoding happens
/// in [`crate::core::client::query_result`].
#[async_trait]
pub trait MetricsBackend: Send + Sync {
    /// Evaluate `query` at the backend's current time.
    async fn query(&self, query: &str) -> Result<Value>;

    /// Evaluate `query` at every `step` between `start` and `end`.
    async fn query_range(
        &self,
        query: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: Duration,
    ) -> Result<Value>;
}
