//! Cluster cost API DTOs

use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Debug, Validate)]
pub struct ClusterCostQuery {
    /// Averaging window, e.g. `1h` or `7d`.
    #[validate(length(min = 1, max = 32))]
    pub window: String,

    /// How far back to shift the evaluation, e.g. `1d`. Empty means now.
    #[serde(default)]
    #[validate(length(max = 32))]
    pub offset: String,
}

#[derive(Deserialize, Debug, Validate)]
pub struct ClusterCostTrendQuery {
    /// Range start, `YYYY-MM-DDTHH:MM:SS.mmmZ`.
    #[validate(length(min = 1))]
    pub start: String,

    /// Range end, same layout as `start`.
    #[validate(length(min = 1))]
    pub end: String,

    /// Averaging window, also used as the evaluation step.
    #[validate(length(min = 1, max = 32))]
    pub window: String,

    #[serde(default)]
    #[validate(length(max = 32))]
    pub offset: String,
}
