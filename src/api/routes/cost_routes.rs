//! Cluster cost routes (e.g., /api/v1/costs/*)

use axum::{routing::get, Router};

use crate::api::controller::cost::ClusterCostController;
use crate::app_state::AppState;

/// Build the router for cost endpoints under /api/v1/costs
pub fn cost_routes() -> Router<AppState> {
    Router::new()
        .route("/cluster", get(ClusterCostController::get_cluster_costs))
        .route("/cluster/trend", get(ClusterCostController::get_cluster_costs_over_time))
        .route("/clusters", get(ClusterCostController::get_cluster_costs_for_all_clusters))
}
