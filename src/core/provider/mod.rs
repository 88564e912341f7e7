//! Cloud-provider hooks consulted while building cost queries.

pub mod local_disk;

use std::sync::Arc;

use anyhow::Result;

pub use local_disk::LocalDiskProvider;

pub trait CloudProvider: Send + Sync {
    /// Query term pricing node-local storage, or an empty string when the
    /// provider contributes none. `offset` is already in `offset <dur>` form
    /// (or empty).
    fn local_storage_query(&self, offset: &str) -> Result<String>;
}

/// Provider without a local-storage cost term.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocalStorage;

impl CloudProvider for NoLocalStorage {
    fn local_storage_query(&self, _offset: &str) -> Result<String> {
        Ok(String::new())
    }
}

/// Picks the provider for a configured local-storage price, if any.
pub fn provider_for(local_storage_cost_per_gb: Option<f64>) -> Arc<dyn CloudProvider> {
    match local_storage_cost_per_gb {
        Some(cost) => Arc::new(LocalDiskProvider::new(cost)),
        None => Arc::new(NoLocalStorage),
    }
}
