use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

use crate::api::dto::ApiResponse;
use crate::core::client::query_result::QueryResultError;
use crate::domain::cluster_cost::totals::CostDimension;

/// Failures raised while aggregating cluster costs.
///
/// Every variant is fatal for the call that produced it; the aggregator never
/// returns a partially filled result.
#[derive(Debug, Error)]
pub enum CostModelError {
    #[error("error parsing {field} '{raw}': {reason}")]
    TimeParse {
        field: &'static str,
        raw: String,
        reason: String,
    },

    #[error("error for query {query}: {source}")]
    Execution {
        query: String,
        source: anyhow::Error,
    },

    #[error("malformed response for query {query}: {source}")]
    Parse {
        query: String,
        source: QueryResultError,
    },

    #[error("not enough data available in the selected time range ({dimension})")]
    NoData { dimension: CostDimension },

    #[error("cloud provider error: {0}")]
    Provider(anyhow::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Metrics backend error: {0}")]
    MetricsBackendError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Helper for mapping any unknown error into internal error
pub fn internal_error<E: ToString>(err: E) -> AppError {
    AppError::InternalServerError(err.to_string())
}

impl From<CostModelError> for AppError {
    fn from(err: CostModelError) -> Self {
        match err {
            CostModelError::TimeParse { .. } => AppError::BadRequest(err.to_string()),
            CostModelError::Execution { .. } => AppError::MetricsBackendError(err.to_string()),
            CostModelError::NoData { .. } => AppError::NotFound(err.to_string()),
            CostModelError::Parse { .. } | CostModelError::Provider(_) => internal_error(err),
        }
    }
}

impl AppError {
    /// Stable, machine-readable code carried in the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::MetricsBackendError(_) => "METRICS_BACKEND_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MetricsBackendError(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body: ApiResponse<()> = ApiResponse::err(self.code(), self.to_string());
        (status, Json(body)).into_response()
    }
}
