// HTTP mapping for catalog errors.
// Renders every failure as a `{"message": ...}` body with the matching status.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::CatalogError;

/// Error body shared by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            CatalogError::InvalidArgument(msg)
            | CatalogError::NotFound(msg)
            | CatalogError::Storage(msg) => msg,
            other => {
                error!(error = %other, "unexpected server error");
                "Internal server error".to_string()
            }
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), message = %message, "request failed");
        }

        (status, Json(ErrorBody { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            CatalogError::invalid("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::not_found("gone").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CatalogError::storage("Unable to read data file").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let io = std::io::Error::other("disk on fire");
        let response = CatalogError::Io(io).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
