//! PromQL templates for the four cluster cost dimensions.
//!
//! Hourly prices are averaged over the window and projected onto a month of
//! [`HOURS_PER_MONTH`] hours. Results are grouped by `cluster_id` so that
//! multi-cluster backends can be split apart downstream.

use crate::core::util::cost_util::HOURS_PER_MONTH;
use crate::domain::cluster_cost::totals::CostDimension;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterCostQueries {
    pub cores: String,
    pub memory: String,
    pub storage: String,
    pub total: String,
}

impl ClusterCostQueries {
    pub fn get(&self, dimension: CostDimension) -> &str {
        match dimension {
            CostDimension::Cores => &self.cores,
            CostDimension::Memory => &self.memory,
            CostDimension::Storage => &self.storage,
            CostDimension::Total => &self.total,
        }
    }
}

/// Rewrites a bare duration such as `3h` into `offset 3h`; empty stays empty.
pub fn offset_clause(offset: &str) -> String {
    if offset.is_empty() {
        String::new()
    } else {
        format!("offset {}", offset)
    }
}

fn local_storage_term(fragment: &str) -> String {
    if fragment.is_empty() {
        String::new()
    } else {
        format!("+ {}", fragment)
    }
}

/// Builds every dimension's query. `offset` is a bare duration (or empty);
/// `local_storage_fragment` is added to the persistent-volume cost when set.
pub fn build_cluster_cost_queries(
    window: &str,
    offset: &str,
    local_storage_fragment: &str,
) -> ClusterCostQueries {
    let offset = offset_clause(offset);
    let local_storage = local_storage_term(local_storage_fragment);
    let hours = HOURS_PER_MONTH;

    ClusterCostQueries {
        cores: format!(
            "sum(\n\t\tavg(avg_over_time(kube_node_status_capacity_cpu_cores[{window}] {offset})) by (node, cluster_id) * avg(avg_over_time(node_cpu_hourly_cost[{window}] {offset})) by (node, cluster_id) * {hours} +\n\t\tavg(avg_over_time(node_gpu_hourly_cost[{window}] {offset})) by (node, cluster_id) * {hours}\n\t  ) by (cluster_id)"
        ),
        memory: format!(
            "sum(\n\t\tavg(avg_over_time(kube_node_status_capacity_memory_bytes[{window}] {offset})) by (node, cluster_id) / 1024 / 1024 / 1024 * avg(avg_over_time(node_ram_hourly_cost[{window}] {offset})) by (node, cluster_id) * {hours}\n\t  ) by (cluster_id)"
        ),
        storage: format!(
            "sum(\n\t\tavg(avg_over_time(pv_hourly_cost[{window}] {offset})) by (persistentvolume, cluster_id) * {hours} \n\t\t* avg(avg_over_time(kube_persistentvolume_capacity_bytes[{window}] {offset})) by (persistentvolume, cluster_id) / 1024 / 1024 / 1024\n\t  ) by (cluster_id) {local_storage}"
        ),
        // Evaluated against the live node price, independent of window and offset.
        total: format!(
            "sum(avg(node_total_hourly_cost) by (node, cluster_id)) * {hours} +\n\t  sum(\n\t\tavg(avg_over_time(pv_hourly_cost[1h])) by (persistentvolume, cluster_id) * {hours} \n\t\t* avg(avg_over_time(kube_persistentvolume_capacity_bytes[1h])) by (persistentvolume, cluster_id) / 1024 / 1024 / 1024\n\t  ) by (cluster_id) {local_storage}"
        ),
    }
}
