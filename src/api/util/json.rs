use axum::Json;
use tracing::error;

use crate::api::dto::ApiResponse;
use crate::errors::{AppError, CostModelError};

/// Wraps a domain result in the API envelope, mapping failures to `AppError`.
pub fn to_json<T: serde::Serialize>(
    result: Result<T, CostModelError>,
) -> Result<Json<ApiResponse<T>>, AppError> {
    match result {
        Ok(value) => Ok(Json(ApiResponse::ok(value))),
        Err(err) => {
            error!("Cluster cost request failed: {}", err);
            Err(err.into())
        }
    }
}
