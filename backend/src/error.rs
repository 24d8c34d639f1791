//! The single error type returned by every handler.
//!
//! `ApiError` maps onto an HTTP status through actix's `ResponseError` and is
//! always rendered as `{"error": "<message>"}`.

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use common::responses::ErrorBody;
use log::error;
use std::path::PathBuf;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The referenced record does not exist. Carries the entity name.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A collection file exists but does not hold a JSON array of records.
    #[error("{} is not a valid collection: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to render PDF: {0}")]
    Pdf(#[from] genpdf::error::Error),

    #[error("failed to render spreadsheet: {0}")]
    Csv(#[from] csv::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Io { .. }
            | ApiError::Corrupt { .. }
            | ApiError::Encode(_)
            | ApiError::Pdf(_)
            | ApiError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("request failed: {}", self);
        }
        HttpResponse::build(status).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

/// Renders JSON extractor failures (bad syntax, wrong shape, oversize body)
/// with the same `{error}` body as every other failure.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidRequest(err.to_string()).into()
}
