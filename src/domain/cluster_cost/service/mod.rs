use std::sync::Arc;

use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::core::provider::CloudProvider;
use crate::domain::cluster_cost::aggregator::{
    first_total, merge_into, series_totals, totals_by_cluster, ClusterTotals,
};
use crate::domain::cluster_cost::query_builder::{
    build_cluster_cost_queries, offset_clause, ClusterCostQueries,
};
use crate::domain::cluster_cost::query_executor::{QueryExecutor, QueryRange};
use crate::domain::cluster_cost::totals::{CostDimension, Totals};
use crate::errors::CostModelError;

/// Computes cluster costs from capacity and price telemetry.
///
/// The dimension queries of one call run concurrently; their results are
/// merged only after all of them succeed.
pub struct ClusterCostService {
    executor: QueryExecutor,
    provider: Arc<dyn CloudProvider>,
    default_cluster_id: String,
}

impl ClusterCostService {
    pub fn new(
        executor: QueryExecutor,
        provider: Arc<dyn CloudProvider>,
        default_cluster_id: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            provider,
            default_cluster_id: default_cluster_id.into(),
        }
    }

    fn build_queries(
        &self,
        window: &str,
        offset: &str,
    ) -> Result<ClusterCostQueries, CostModelError> {
        let local_storage = self
            .provider
            .local_storage_query(&offset_clause(offset))
            .map_err(CostModelError::Provider)?;

        Ok(build_cluster_cost_queries(window, offset, &local_storage))
    }

    /// Current cost of the default cluster averaged over `window`, shifted
    /// back by `offset` when it is non-empty.
    pub async fn cluster_costs(
        &self,
        window: &str,
        offset: &str,
    ) -> Result<Totals, CostModelError> {
        let span = info_span!("cluster_costs", request_id = %Uuid::new_v4(), window, offset);

        async move {
            let queries = self.build_queries(window, offset)?;

            let (cores, memory, storage, total) = futures::try_join!(
                self.executor.run_instant(&queries.cores),
                self.executor.run_instant(&queries.memory),
                self.executor.run_instant(&queries.storage),
                self.executor.run_instant(&queries.total),
            )?;

            Ok(Totals {
                cpu_cost: first_total(&cores, CostDimension::Cores)?,
                mem_cost: first_total(&memory, CostDimension::Memory)?,
                storage_cost: first_total(&storage, CostDimension::Storage)?,
                total_cost: first_total(&total, CostDimension::Total)?,
            })
        }
        .instrument(span)
        .await
    }

    /// Cost of every cluster reporting to the backend, averaged over `window`.
    /// Unlabeled series are attributed to the default cluster.
    pub async fn cluster_costs_for_all_clusters(
        &self,
        window: &str,
        offset: &str,
    ) -> Result<ClusterTotals, CostModelError> {
        let span = info_span!(
            "cluster_costs_for_all_clusters",
            request_id = %Uuid::new_v4(),
            window,
            offset
        );

        async move {
            let queries = self.build_queries(window, offset)?;

            let (cores, memory, storage) = futures::try_join!(
                self.executor.run_instant(&queries.cores),
                self.executor.run_instant(&queries.memory),
                self.executor.run_instant(&queries.storage),
            )?;

            let mut totals = ClusterTotals::new();
            for (dimension, series) in [
                (CostDimension::Cores, &cores),
                (CostDimension::Memory, &memory),
                (CostDimension::Storage, &storage),
            ] {
                let buckets = totals_by_cluster(series, &self.default_cluster_id, dimension);
                merge_into(&mut totals, dimension, buckets);
            }

            Ok(totals)
        }
        .instrument(span)
        .await
    }

    /// Cost of the default cluster evaluated every `window` between `start`
    /// and `end`.
    pub async fn cluster_costs_over_time(
        &self,
        start: &str,
        end: &str,
        window: &str,
        offset: &str,
    ) -> Result<Totals, CostModelError> {
        let span = info_span!(
            "cluster_costs_over_time",
            request_id = %Uuid::new_v4(),
            start,
            end,
            window,
            offset
        );

        async move {
            let range = QueryRange::parse(start, end, window)?;
            let queries = self.build_queries(window, offset)?;

            let (cores, memory, storage, total) = futures::try_join!(
                self.executor.run_range(&queries.cores, &range),
                self.executor.run_range(&queries.memory, &range),
                self.executor.run_range(&queries.storage, &range),
                self.executor.run_range(&queries.total, &range),
            )?;

            Ok(Totals {
                cpu_cost: series_totals(&cores, CostDimension::Cores)?,
                mem_cost: series_totals(&memory, CostDimension::Memory)?,
                storage_cost: series_totals(&storage, CostDimension::Storage)?,
                total_cost: series_totals(&total, CostDimension::Total)?,
            })
        }
        .instrument(span)
        .await
    }
}
