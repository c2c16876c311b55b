use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::{error, warn};

/// Failure of a request that is not a body-level "not found".
///
/// Storage and parse failures become a generic 500; the cause only goes to the log.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_client_error() {
            let msg = self.0.to_string();
            warn!(error = %msg, "rejected request");
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(serde_json::json!({"error": msg}))).into_response();
        }
        error!(error = %self.0, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "Internal Server Error"})),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_hide_their_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "data.json");
        let res = ApiError(ServiceError::Io(io)).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_errors_are_unprocessable() {
        let res = ApiError(ServiceError::validation("price must be finite")).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
