// ABOUTME: Shared API response types and error handling
// ABOUTME: Provides consistent response format across all API endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use folio_storage::StorageError;
use serde::Serialize;
use tracing::error;

use crate::manager::ManagerError;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Build a JSON success response with the given status
pub fn ok<T: Serialize>(status: StatusCode, data: T) -> axum::response::Response {
    (status, ResponseJson(ApiResponse::success(data))).into_response()
}

/// Convert manager errors to HTTP responses
impl IntoResponse for ManagerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            ManagerError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ManagerError::DuplicateName { .. } => (StatusCode::CONFLICT, self.to_string()),
            ManagerError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ManagerError::Storage(StorageError::PartialCommit(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Changes were only partially saved; the catalog was reloaded from storage"
                    .to_string(),
            ),
            ManagerError::Storage(e) => {
                error!("Storage failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error, please try again".to_string(),
                )
            }
        };

        (status, ResponseJson(ApiResponse::<()>::error(message))).into_response()
    }
}
