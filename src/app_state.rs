use std::sync::Arc;

use anyhow::Result;

use crate::config::AppConfig;
use crate::core::client::metrics_backend::MetricsBackend;
use crate::core::client::prometheus_client::PrometheusClient;
use crate::core::provider::{provider_for, CloudProvider};
use crate::domain::cluster_cost::query_executor::QueryExecutor;
use crate::domain::cluster_cost::service::ClusterCostService;

#[derive(Clone)]
pub struct AppState {
    pub cluster_cost_service: Arc<ClusterCostService>,
}

/// Wires the Prometheus client and the configured provider into the service.
pub fn build_app_state(config: &AppConfig) -> Result<AppState> {
    let backend = PrometheusClient::new(config.prometheus_url.clone(), config.query_timeout)?;
    let provider = provider_for(config.local_storage_cost_per_gb);
    Ok(build_app_state_with(Arc::new(backend), provider, config))
}

pub fn build_app_state_with(
    backend: Arc<dyn MetricsBackend>,
    provider: Arc<dyn CloudProvider>,
    config: &AppConfig,
) -> AppState {
    let executor = QueryExecutor::new(backend, config.query_timeout);
    AppState {
        cluster_cost_service: Arc::new(ClusterCostService::new(
            executor,
            provider,
            config.default_cluster_id.clone(),
        )),
    }
}
