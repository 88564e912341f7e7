use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::Json;
use validator::Validate;

use crate::api::dto::cost_query_dto::{ClusterCostQuery, ClusterCostTrendQuery};
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::cluster_cost::totals::Totals;
use crate::errors::AppError;

pub struct ClusterCostController;

impl ClusterCostController {
    pub async fn get_cluster_costs(
        State(state): State<AppState>,
        Query(q): Query<ClusterCostQuery>,
    ) -> Result<Json<ApiResponse<Totals>>, AppError> {
        q.validate().map_err(|e| AppError::BadRequest(e.to_string()))?;
        to_json(
            state
                .cluster_cost_service
                .cluster_costs(&q.window, &q.offset)
                .await,
        )
    }

    pub async fn get_cluster_costs_for_all_clusters(
        State(state): State<AppState>,
        Query(q): Query<ClusterCostQuery>,
    ) -> Result<Json<ApiResponse<BTreeMap<String, Totals>>>, AppError> {
        q.validate().map_err(|e| AppError::BadRequest(e.to_string()))?;
        to_json(
            state
                .cluster_cost_service
                .cluster_costs_for_all_clusters(&q.window, &q.offset)
                .await,
        )
    }

    pub async fn get_cluster_costs_over_time(
        State(state): State<AppState>,
        Query(q): Query<ClusterCostTrendQuery>,
    ) -> Result<Json<ApiResponse<Totals>>, AppError> {
        q.validate().map_err(|e| AppError::BadRequest(e.to_string()))?;
        to_json(
            state
                .cluster_cost_service
                .cluster_costs_over_time(&q.start, &q.end, &q.window, &q.offset)
                .await,
        )
    }
}
