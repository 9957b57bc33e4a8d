use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Mapbox API error: {0}")]
    MapboxApi(String),

    #[error("Google Maps API error: {0}")]
    MapsApi(String),

    #[error("Planning service error: {0}")]
    Planning(String),

    #[error("Could not resolve location: {0}")]
    Resolution(String),

    #[error("No route found: {0}")]
    NoRouteFound(String),

    #[error("Malformed provider response: {0}")]
    MalformedProviderResponse(String),

    #[error("Unsupported travel mode: {0}")]
    UnsupportedMode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) | AppError::UnsupportedMode(_) => StatusCode::BAD_REQUEST,
            AppError::NoRouteFound(_) => StatusCode::NOT_FOUND,
            AppError::Resolution(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::MapboxApi(_)
            | AppError::MapsApi(_)
            | AppError::Planning(_)
            | AppError::MalformedProviderResponse(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            AppError::MapboxApi(ref e) => {
                tracing::error!("Mapbox API error: {}", e);
                "Routing service error".to_string()
            }
            AppError::MapsApi(ref e) => {
                tracing::error!("Google Maps API error: {}", e);
                "Maps service error".to_string()
            }
            AppError::Planning(ref e) => {
                tracing::error!("Planning service error: {}", e);
                "Planning service error".to_string()
            }
            AppError::MalformedProviderResponse(ref e) => {
                tracing::warn!("Malformed provider response: {}", e);
                format!("Malformed provider response: {}", e)
            }
            AppError::Resolution(ref e) => {
                tracing::info!("Location resolution failed: {}", e);
                format!("Could not resolve location: {}", e)
            }
            AppError::NoRouteFound(ref e) => {
                tracing::info!("No route found: {}", e);
                format!("No route found: {}", e)
            }
            AppError::UnsupportedMode(ref e) => format!("Unsupported travel mode: {}", e),
            AppError::InvalidRequest(ref e) => e.clone(),
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                "Internal server error".to_string()
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UnsupportedMode("transit".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NoRouteFound("leg 1".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Resolution("Atlantis".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::MalformedProviderResponse("no array".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_into_response_hides_internal_detail() {
        let response = AppError::Internal("secret stack".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
