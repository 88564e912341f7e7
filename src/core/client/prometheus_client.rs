use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::core::client::metrics_backend::MetricsBackend;

/// HTTP client for the Prometheus query API.
#[derive(Clone)]
pub struct PrometheusClient {
    base_url: String,
    client: Client,
}

impl PrometheusClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Value> {
        let resp = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to call metrics backend (url={}): {}", url, e))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Metrics backend returned {}: {} (url={})", status, text, url));
        }

        let body: Value = resp.json().await.map_err(|e| {
            anyhow!("Failed to decode metrics backend response: {} (url={})", e, url)
        })?;

        if body.get("status").and_then(Value::as_str) != Some("success") {
            let error_type = body.get("errorType").and_then(Value::as_str).unwrap_or("unknown");
            let error = body.get("error").and_then(Value::as_str).unwrap_or("unknown error");
            return Err(anyhow!("Metrics backend reported {}: {}", error_type, error));
        }

        Ok(body)
    }
}

#[async_trait]
impl MetricsBackend for PrometheusClient {
    async fn query(&self, query: &str) -> Result<Value> {
        let url = self.endpoint("query");
        debug!("GET {}", url);
        self.get(&url, &[("query", query.to_string())]).await
    }

    async fn query_range(
        &self,
        query: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: Duration,
    ) -> Result<Value> {
        let url = self.endpoint("query_range");
        debug!("GET {} (start={}, end={}, step={:?})", url, start, end, step);
        let params = [
            ("query", query.to_string()),
            ("start", start.to_rfc3339_opts(SecondsFormat::Millis, true)),
            ("end", end.to_rfc3339_opts(SecondsFormat::Millis, true)),
            ("step", format!("{}", step.as_secs_f64())),
        ];
        self.get(&url, &params).await
    }
}
