//! Result-shaping policies that turn decoded series into cost pairs.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::warn;

use crate::core::client::query_result::{Sample, Series};
use crate::domain::cluster_cost::totals::{CostDimension, CostPair, Totals};
use crate::errors::CostModelError;

pub type ClusterTotals = BTreeMap<String, Totals>;

/// Single-total policy: the first sample of the first series, whatever
/// cluster it reports.
pub fn first_total(
    series: &[Series],
    dimension: CostDimension,
) -> Result<Vec<CostPair>, CostModelError> {
    let sample = series
        .first()
        .and_then(|s| s.samples().first())
        .ok_or(CostModelError::NoData { dimension })?;

    Ok(vec![sample.to_cost_pair()])
}

/// Per-cluster policy: the first sample of the first series seen for every
/// cluster.
///
/// Series without samples are skipped with a warning instead of failing the
/// call. A snapshot field holds at most one pair, so later series resolving to
/// an already bucketed cluster are dropped with a warning.
pub fn totals_by_cluster(
    series: &[Series],
    default_cluster_id: &str,
    dimension: CostDimension,
) -> BTreeMap<String, CostPair> {
    let mut buckets: BTreeMap<String, CostPair> = BTreeMap::new();

    for s in series {
        let cluster_id = s.cluster_id(default_cluster_id);

        let Some(first) = s.samples().first() else {
            warn!(
                "Metric values for {} cost of cluster '{}' did not contain any valid data",
                dimension, cluster_id
            );
            continue;
        };

        // TODO: confirm with the pricing owners whether later samples of a
        // snapshot series should be summed or rejected instead of dropped.
        if s.samples().len() > 1 {
            warn!(
                "Expected a single {} cost value for cluster '{}', discarding {} later sample(s)",
                dimension,
                cluster_id,
                s.samples().len() - 1
            );
        }

        match buckets.entry(cluster_id.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(first.to_cost_pair());
            }
            Entry::Occupied(_) => {
                warn!(
                    "Duplicate {} cost series for cluster '{}', keeping the first one",
                    dimension, cluster_id
                );
            }
        }
    }

    buckets
}

/// Writes one dimension's buckets into the per-cluster totals, creating an
/// entry on the first write for a cluster.
pub fn merge_into(
    totals: &mut ClusterTotals,
    dimension: CostDimension,
    buckets: BTreeMap<String, CostPair>,
) {
    for (cluster_id, pair) in buckets {
        *totals.entry(cluster_id).or_default().field_mut(dimension) = vec![pair];
    }
}

/// Time-series policy: every sample of every series, in backend order.
pub fn series_totals(
    series: &[Series],
    dimension: CostDimension,
) -> Result<Vec<CostPair>, CostModelError> {
    let pairs: Vec<CostPair> = series
        .iter()
        .flat_map(|s| s.samples())
        .map(Sample::to_cost_pair)
        .collect();

    if pairs.is_empty() {
        return Err(CostModelError::NoData { dimension });
    }

    Ok(pairs)
}
