use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractError;
use crate::github::GithubError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{ "error": <message>, "code": <CODE> }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No file uploaded")]
    NoFileProvided,

    #[error("Unsupported file type. Use PDF, DOCX, or TXT.")]
    UnsupportedFormat,

    #[error("{0}")]
    ParseFailure(String),

    #[error("Text extraction timed out")]
    ExtractionTimeout,

    #[error("No GitHub profile link found in the resume.")]
    NoGithubHandleFound,

    #[error("Uploaded file exceeds the size limit")]
    PayloadTooLarge,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] GithubError),
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedFormat => AppError::UnsupportedFormat,
            ExtractError::ParseFailure(msg) => AppError::ParseFailure(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NoFileProvided => (StatusCode::BAD_REQUEST, "NO_FILE", self.to_string()),
            AppError::UnsupportedFormat => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FORMAT",
                self.to_string(),
            ),
            AppError::ParseFailure(msg) => {
                tracing::warn!("Document parse failure: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PARSE_FAILURE",
                    msg.clone(),
                )
            }
            AppError::ExtractionTimeout => {
                tracing::warn!("Text extraction exceeded its deadline");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "EXTRACTION_TIMEOUT",
                    self.to_string(),
                )
            }
            AppError::NoGithubHandleFound => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_GITHUB_HANDLE",
                self.to_string(),
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                self.to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Upstream(e) => {
                tracing::error!("GitHub {} lookup failed: {e:?}", e.resource());
                let status = if e.is_not_found() {
                    StatusCode::NOT_FOUND
                } else {
                    StatusCode::BAD_GATEWAY
                };
                (status, "UPSTREAM_FETCH_FAILURE", e.to_string())
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::Resource;

    #[test]
    fn test_unsupported_format_is_bad_request_with_fixed_message() {
        let response = AppError::UnsupportedFormat.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::UnsupportedFormat.to_string(),
            "Unsupported file type. Use PDF, DOCX, or TXT."
        );
    }

    #[test]
    fn test_parse_failure_carries_parser_message() {
        let err: AppError = ExtractError::ParseFailure("bad xref table".to_string()).into();
        assert_eq!(err.to_string(), "bad xref table");
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_not_found_maps_to_404() {
        let err = AppError::Upstream(GithubError::Status {
            resource: Resource::User,
            status: 404,
        });
        assert_eq!(err.to_string(), "Failed to fetch user");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_upstream_server_error_maps_to_bad_gateway() {
        let err = AppError::Upstream(GithubError::Status {
            resource: Resource::Repos,
            status: 503,
        });
        assert_eq!(err.to_string(), "Failed to fetch repos");
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_payload_too_large_is_413() {
        let response = AppError::PayloadTooLarge.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_missing_handle_is_unprocessable() {
        let response = AppError::NoGithubHandleFound.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
