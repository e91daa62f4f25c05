use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// The API has exactly two failure kinds: a bad request parameter and an
/// underlying storage fault. Empty results are never errors; handlers return
/// zero-filled structures with HTTP 200 instead.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unparseable required parameter -> 400.
    #[error("{0}")]
    InvalidRequest(String),

    /// Storage access fault -> generic 500; detail is logged, not leaked.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Database(e) => {
                error!("storage fault: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_request_maps_to_400() {
        let resp = ApiError::InvalidRequest("datetime_start is required".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_error_maps_to_500() {
        let resp =
            ApiError::Database(sea_orm::DbErr::Custom("boom".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
