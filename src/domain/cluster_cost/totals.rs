use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::client::query_result::Sample;
use crate::core::util::cost_util::CostUtil;

/// `[timestamp, value]`, both rendered with six fractional digits.
pub type CostPair = [String; 2];

/// Aggregate cost of one cluster, or of one time-series call.
///
/// An empty field means the backend had no data for that dimension, which is
/// distinct from a zero cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    #[serde(rename = "totalcost")]
    pub total_cost: Vec<CostPair>,
    #[serde(rename = "cpucost")]
    pub cpu_cost: Vec<CostPair>,
    #[serde(rename = "memcost")]
    pub mem_cost: Vec<CostPair>,
    #[serde(rename = "storageCost")]
    pub storage_cost: Vec<CostPair>,
}

impl Totals {
    pub fn field_mut(&mut self, dimension: CostDimension) -> &mut Vec<CostPair> {
        match dimension {
            CostDimension::Cores => &mut self.cpu_cost,
            CostDimension::Memory => &mut self.mem_cost,
            CostDimension::Storage => &mut self.storage_cost,
            CostDimension::Total => &mut self.total_cost,
        }
    }
}

impl Sample {
    pub fn to_cost_pair(&self) -> CostPair {
        CostUtil::cost_pair(self.timestamp, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostDimension {
    Cores,
    Memory,
    Storage,
    Total,
}

impl fmt::Display for CostDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CostDimension::Cores => "cpu",
            CostDimension::Memory => "memory",
            CostDimension::Storage => "storage",
            CostDimension::Total => "total",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_wire_field_names() {
        let totals = Totals {
            cpu_cost: vec![Sample { timestamp: 100.0, value: 5.0 }.to_cost_pair()],
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&totals).unwrap(),
            json!({
                "totalcost": [],
                "cpucost": [["100.000000", "5.000000"]],
                "memcost": [],
                "storageCost": []
            })
        );
    }

    #[test]
    fn field_mut_targets_the_matching_dimension() {
        let mut totals = Totals::default();
        totals
            .field_mut(CostDimension::Storage)
            .push(["1.000000".into(), "2.000000".into()]);
        assert_eq!(totals.storage_cost.len(), 1);
        assert!(totals.cpu_cost.is_empty());
    }
}
