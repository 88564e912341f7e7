//! Decoding of metrics backend query responses into labeled series.
//!
//! The backend answers instant queries with a `vector` result (one sample per
//! series) and range queries with a `matrix` result (ordered samples per
//! series). Both are decoded once, here, into the same [`Series`] shape so the
//! aggregation code never inspects untyped JSON.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr};
use thiserror::Error;

/// Label under which multi-cluster telemetry reports its cluster.
pub const CLUSTER_ID_LABEL: &str = "cluster_id";

pub type Labels = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum QueryResultError {
    #[error("invalid result envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("backend reported {error_type}: {error}")]
    Backend { error_type: String, error: String },

    #[error("result envelope has no data section")]
    MissingData,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: f64,
    pub value: f64,
}

/// One label set plus its time-ascending samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    labels: Labels,
    samples: Vec<Sample>,
}

impl Series {
    pub fn new(labels: Labels, samples: Vec<Sample>) -> Self {
        Self { labels, samples }
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }

    /// Cluster this series belongs to; unlabeled series fall back to `default`.
    pub fn cluster_id<'a>(&'a self, default: &'a str) -> &'a str {
        match self.label(CLUSTER_ID_LABEL) {
            Some(id) if !id.is_empty() => id,
            _ => default,
        }
    }
}

#[derive(Debug, Deserialize)]
struct QueryEnvelope {
    status: String,
    data: Option<QueryData>,
    #[serde(rename = "errorType")]
    error_type: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "resultType", content = "result", rename_all = "lowercase")]
enum QueryData {
    Vector(Vec<VectorResult>),
    Matrix(Vec<MatrixResult>),
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct VectorResult {
    #[serde(default)]
    metric: Labels,
    #[serde_as(as = "(_, DisplayFromStr)")]
    value: (f64, f64),
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct MatrixResult {
    #[serde(default)]
    metric: Labels,
    #[serde_as(as = "Vec<(_, DisplayFromStr)>")]
    values: Vec<(f64, f64)>,
}

impl QueryData {
    fn into_series(self) -> Vec<Series> {
        match self {
            QueryData::Vector(results) => results
                .into_iter()
                .map(|r| {
                    let (timestamp, value) = r.value;
                    Series::new(r.metric, vec![Sample { timestamp, value }])
                })
                .collect(),
            QueryData::Matrix(results) => results
                .into_iter()
                .map(|r| {
                    let samples = r
                        .values
                        .into_iter()
                        .map(|(timestamp, value)| Sample { timestamp, value })
                        .collect();
                    Series::new(r.metric, samples)
                })
                .collect(),
        }
    }
}

/// Decodes a raw backend response into series, preserving backend order.
pub fn parse_query_result(raw: Value) -> Result<Vec<Series>, QueryResultError> {
    let envelope: QueryEnvelope = serde_json::from_value(raw)?;

    if envelope.status != "success" {
        return Err(QueryResultError::Backend {
            error_type: envelope.error_type.unwrap_or_else(|| envelope.status.clone()),
            error: envelope.error.unwrap_or_else(|| "unknown error".to_string()),
        });
    }

    let data = envelope.data.ok_or(QueryResultError::MissingData)?;
    Ok(data.into_series())
}
