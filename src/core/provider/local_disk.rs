use anyhow::{ensure, Result};

use crate::core::provider::CloudProvider;

/// Prices the root filesystem of every node at a flat monthly rate per GiB.
#[derive(Debug, Clone, Copy)]
pub struct LocalDiskProvider {
    cost_per_gb_month: f64,
}

impl LocalDiskProvider {
    pub fn new(cost_per_gb_month: f64) -> Self {
        Self { cost_per_gb_month }
    }
}

impl CloudProvider for LocalDiskProvider {
    fn local_storage_query(&self, offset: &str) -> Result<String> {
        ensure!(
            self.cost_per_gb_month.is_finite() && self.cost_per_gb_month >= 0.0,
            "local storage cost must be a non-negative number, got {}",
            self.cost_per_gb_month
        );

        Ok(format!(
            r#"sum(sum(container_fs_limit_bytes{{device!="tmpfs", id="/"}} {}) by (instance, cluster_id)) by (cluster_id) / 1024 / 1024 / 1024 * {:.6}"#,
            offset, self.cost_per_gb_month
        ))
    }
}
