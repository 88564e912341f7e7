use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::client::metrics_backend::MetricsBackend;
use crate::core::client::query_result::{parse_query_result, Series};
use crate::core::util::time_util::{parse_range_timestamp, parse_step};
use crate::errors::CostModelError;

/// Evaluation grid of a ranged query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub step: Duration,
}

impl QueryRange {
    /// Parses all three bounds up front so a malformed value fails before
    /// any backend call.
    pub fn parse(start: &str, end: &str, step: &str) -> Result<Self, CostModelError> {
        Ok(Self {
            start: parse_range_timestamp("start", start)?,
            end: parse_range_timestamp("end", end)?,
            step: parse_step("window", step)?,
        })
    }
}

/// Runs queries against the metrics backend and decodes their results.
///
/// Every failure carries the query text it belongs to.
#[derive(Clone)]
pub struct QueryExecutor {
    backend: Arc<dyn MetricsBackend>,
    timeout: Duration,
}

impl QueryExecutor {
    pub fn new(backend: Arc<dyn MetricsBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub async fn run_instant(&self, query: &str) -> Result<Vec<Series>, CostModelError> {
        debug!("Running query {}", query);
        let raw = tokio::time::timeout(self.timeout, self.backend.query(query)).await;
        self.decode(query, raw)
    }

    pub async fn run_range(
        &self,
        query: &str,
        range: &QueryRange,
    ) -> Result<Vec<Series>, CostModelError> {
        debug!(
            "Running range query {} (start={}, end={}, step={:?})",
            query, range.start, range.end, range.step
        );
        let raw = tokio::time::timeout(
            self.timeout,
            self.backend
                .query_range(query, range.start, range.end, range.step),
        )
        .await;
        self.decode(query, raw)
    }

    fn decode(
        &self,
        query: &str,
        raw: Result<anyhow::Result<serde_json::Value>, tokio::time::error::Elapsed>,
    ) -> Result<Vec<Series>, CostModelError> {
        let raw = raw
            .map_err(|_| anyhow!("query timed out after {:?}", self.timeout))
            .and_then(|result| result)
            .map_err(|source| CostModelError::Execution {
                query: query.to_string(),
                source,
            })?;

        parse_query_result(raw).map_err(|source| CostModelError::Parse {
            query: query.to_string(),
            source,
        })
    }
}
