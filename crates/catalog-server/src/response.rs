//! API response envelope and error mapping.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use catalog_core::search::Pagination;
use catalog_core::{CatalogError, Timestamp};
use http::StatusCode;
use serde::Serialize;

/// Message returned for failures whose detail stays in the logs.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch catalog data";

/// Standard API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
    pub meta: Meta,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub code: String,
}

/// Response metadata.
#[derive(Debug, Serialize)]
pub struct Meta {
    /// Generation time, ISO-8601.
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl Meta {
    pub fn now() -> Self {
        Self {
            timestamp: Timestamp::now(),
            pagination: None,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: Meta::now(),
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.meta.pagination = Some(pagination);
        self
    }
}

impl ApiResponse<()> {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorDetail {
                message: message.into(),
                code: code.into(),
            }),
            meta: Meta::now(),
        }
    }
}

/// API error type that implements IntoResponse.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    pub fn fetch_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "FETCH_ERROR",
            FETCH_ERROR_MESSAGE,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::error(self.code, self.message))).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match &err {
            CatalogError::InvalidArgument(_) => Self::bad_request(err.code(), err.to_string()),
            CatalogError::ProductNotFound(_) | CatalogError::CategoryNotFound(_) => {
                Self::not_found(err.code(), err.to_string())
            }
            _ => {
                tracing::error!(error = %err, code = err.code(), "catalog request failed");
                Self::fetch_error()
            }
        }
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let json = serde_json::to_value(ApiResponse::success("hello")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "hello");
        assert!(json.get("error").is_none());
        assert!(json["meta"]["timestamp"].is_string());
        assert!(json["meta"].get("pagination").is_none());
    }

    #[test]
    fn test_error_envelope() {
        let json = serde_json::to_value(ApiResponse::error("TEST", "Test error")).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
        assert_eq!(json["error"]["code"], "TEST");
        assert_eq!(json["error"]["message"], "Test error");
    }

    #[test]
    fn test_error_status_mapping() {
        let e = ApiError::from(CatalogError::InvalidArgument("limit".into()));
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.code, "INVALID_ARGUMENT");

        let e = ApiError::from(CatalogError::ProductNotFound("x".into()));
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.code, "PRODUCT_NOT_FOUND");

        let e = ApiError::from(CatalogError::Io {
            path: "/secret/products.json".into(),
            message: "permission denied".into(),
        });
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.code, "FETCH_ERROR");
        assert!(!e.message.contains("secret"));
    }
}
