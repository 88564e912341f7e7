// Shared test helpers: a scripted metrics backend

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clustercost_core::core::client::metrics_backend::MetricsBackend;
use clustercost_core::core::provider::NoLocalStorage;
use clustercost_core::domain::cluster_cost::query_executor::QueryExecutor;
use clustercost_core::domain::cluster_cost::service::ClusterCostService;
use clustercost_core::domain::cluster_cost::totals::CostDimension;
use serde_json::{json, Value};

/// Answers each query with the response scripted for its cost dimension and
/// records every call.
#[derive(Default)]
pub struct ScriptedBackend {
    responses: HashMap<CostDimension, Value>,
    failures: HashMap<CostDimension, String>,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, dimension: CostDimension, response: Value) -> Self {
        self.responses.insert(dimension, response);
        self
    }

    pub fn fail(mut self, dimension: CostDimension, message: &str) -> Self {
        self.failures.insert(dimension, message.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    fn answer(&self, query: &str) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());

        let dimension = dimension_of(query);
        if let Some(message) = self.failures.get(&dimension) {
            return Err(anyhow!("{}", message));
        }
        Ok(self
            .responses
            .get(&dimension)
            .cloned()
            .unwrap_or_else(|| vector(&[])))
    }
}

#[async_trait]
impl MetricsBackend for ScriptedBackend {
    async fn query(&self, query: &str) -> Result<Value> {
        self.answer(query)
    }

    async fn query_range(
        &self,
        query: &str,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
        _step: Duration,
    ) -> Result<Value> {
        self.answer(query)
    }
}

pub fn dimension_of(query: &str) -> CostDimension {
    if query.contains("node_total_hourly_cost") {
        CostDimension::Total
    } else if query.contains("kube_node_status_capacity_cpu_cores") {
        CostDimension::Cores
    } else if query.contains("kube_node_status_capacity_memory_bytes") {
        CostDimension::Memory
    } else {
        CostDimension::Storage
    }
}

/// Instant-query envelope; `None` omits the cluster label.
pub fn vector(series: &[(Option<&str>, f64, &str)]) -> Value {
    let result: Vec<Value> = series
        .iter()
        .map(|(cluster, ts, value)| {
            let metric = match cluster {
                Some(id) => json!({ "cluster_id": id }),
                None => json!({}),
            };
            json!({ "metric": metric, "value": [ts, value] })
        })
        .collect();

    json!({ "status": "success", "data": { "resultType": "vector", "result": result } })
}

/// Range-query envelope.
pub fn matrix(series: &[(Option<&str>, &[(f64, &str)])]) -> Value {
    let result: Vec<Value> = series
        .iter()
        .map(|(cluster, samples)| {
            let metric = match cluster {
                Some(id) => json!({ "cluster_id": id }),
                None => json!({}),
            };
            let values: Vec<Value> = samples.iter().map(|(ts, v)| json!([ts, v])).collect();
            json!({ "metric": metric, "values": values })
        })
        .collect();

    json!({ "status": "success", "data": { "resultType": "matrix", "result": result } })
}

pub fn service(backend: Arc<ScriptedBackend>, default_cluster_id: &str) -> ClusterCostService {
    ClusterCostService::new(
        QueryExecutor::new(backend, Duration::from_secs(5)),
        Arc::new(NoLocalStorage),
        default_cluster_id,
    )
}

pub fn pair(ts: &str, value: &str) -> [String; 2] {
    [ts.to_string(), value.to_string()]
}
