use std::time::Duration;

use anyhow::{anyhow, ensure, Result};

pub const PROMETHEUS_ENDPOINT_ENV: &str = "PROMETHEUS_SERVER_ENDPOINT";
pub const CLUSTER_ID_ENV: &str = "CLUSTER_ID";
pub const SERVER_ADDR_ENV: &str = "CLUSTERCOST_SERVER_ADDR";
pub const QUERY_TIMEOUT_ENV: &str = "CLUSTERCOST_QUERY_TIMEOUT_SECS";
pub const LOCAL_STORAGE_COST_ENV: &str = "CLUSTERCOST_LOCAL_STORAGE_COST_PER_GB";
pub const LOG_DIR_ENV: &str = "CLUSTERCOST_LOG_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub prometheus_url: String,
    /// Cluster that unlabeled telemetry is attributed to. Empty means the
    /// unlabeled default cluster.
    pub default_cluster_id: String,
    pub server_addr: String,
    pub query_timeout: Duration,
    /// Monthly price per GiB of node root filesystem; unset disables the
    /// local storage cost term.
    pub local_storage_cost_per_gb: Option<f64>,
    pub log_dir: Option<String>,
}

impl AppConfig {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let query_timeout_secs = match non_empty(QUERY_TIMEOUT_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| {
                    anyhow!("{} must be a whole number of seconds: {}", QUERY_TIMEOUT_ENV, e)
                })?,
            None => 30,
        };

        let local_storage_cost_per_gb = non_empty(LOCAL_STORAGE_COST_ENV)
            .map(|raw| {
                raw.trim()
                    .parse::<f64>()
                    .map_err(|e| anyhow!("{} must be a number: {}", LOCAL_STORAGE_COST_ENV, e))
            })
            .transpose()?;

        let config = Self {
            prometheus_url: non_empty(PROMETHEUS_ENDPOINT_ENV)
                .unwrap_or_else(|| "http://localhost:9090".to_string()),
            default_cluster_id: lookup(CLUSTER_ID_ENV).unwrap_or_default(),
            server_addr: non_empty(SERVER_ADDR_ENV).unwrap_or_else(|| "0.0.0.0:9003".to_string()),
            query_timeout: Duration::from_secs(query_timeout_secs),
            local_storage_cost_per_gb,
            log_dir: non_empty(LOG_DIR_ENV),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.prometheus_url.starts_with("http://")
                || self.prometheus_url.starts_with("https://"),
            "{} must be an http(s) URL, got {}",
            PROMETHEUS_ENDPOINT_ENV,
            self.prometheus_url
        );
        ensure!(
            !self.query_timeout.is_zero(),
            "{} must be greater than zero",
            QUERY_TIMEOUT_ENV
        );
        if let Some(cost) = self.local_storage_cost_per_gb {
            ensure!(
                cost.is_finite() && cost >= 0.0,
                "{} must be a non-negative number, got {}",
                LOCAL_STORAGE_COST_ENV,
                cost
            );
        }
        Ok(())
    }
}
