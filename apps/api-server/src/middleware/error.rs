//! Transport-level errors, rendered as failure envelopes.

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use blog_shared::ApiResponse;
use thiserror::Error;

/// Errors raised before a request reaches the post service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Body, path, or query could not be extracted.
    #[error("Invalid request")]
    InvalidRequest(Vec<String>),

    #[error("Resource not found")]
    NotFound,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let errors = match self {
            AppError::InvalidRequest(errors) => errors.clone(),
            AppError::NotFound => Vec::new(),
        };
        let body: ApiResponse<()> = ApiResponse::failure_with_errors(self.to_string(), errors);

        HttpResponse::build(self.status_code()).json(body)
    }
}

fn invalid(detail: String, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), %detail, "Rejected malformed request");
    AppError::InvalidRequest(vec![detail]).into()
}

/// JSON body extractor config that answers with a failure envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| invalid(err.to_string(), req))
}

/// Path extractor config that answers with a failure envelope.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| invalid(err.to_string(), req))
}

/// Query extractor config that answers with a failure envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| invalid(err.to_string(), req))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> AppResult<HttpResponse> {
    Err(AppError::NotFound)
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
