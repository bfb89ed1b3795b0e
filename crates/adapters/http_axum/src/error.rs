//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use avdash_domain::error::{AvDashError, ValidationError};

/// JSON error body returned by API and dashboard routes.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`AvDashError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(AvDashError);

impl From<AvDashError> for ApiError {
    fn from(err: AvDashError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(AvDashError::Validation(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AvDashError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AvDashError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use avdash_domain::error::NotFoundError;

    use super::*;

    #[test]
    fn should_map_validation_to_bad_request() {
        let response =
            ApiError::from(ValidationError::InvalidAddress("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn should_map_not_found_to_404() {
        let err = AvDashError::NotFound(NotFoundError {
            entity: "Device",
            id: "10.0.0.1".to_string(),
        });
        assert_eq!(ApiError::from(err).into_response().status(), StatusCode::NOT_FOUND);
    }
}
