pub mod metrics_backend;
pub mod prometheus_client;
pub mod query_result;
