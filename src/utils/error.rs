use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use log::error;
use serde_json::json;
use thiserror::Error;

use crate::database::StoreError;
use crate::uploader::BlobError;
use crate::utils::response::json_response;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    #[error("{message}")]
    Dependency { message: String, trace: String },
}

impl PostError {
    /// Wrap any failure from a collaborator, keeping its debug chain as the trace
    pub fn dependency<E: std::error::Error>(err: E) -> Self {
        let mut trace = format!("{:?}", err);
        let mut source = err.source();
        while let Some(cause) = source {
            trace.push_str(&format!("\ncaused by: {}", cause));
            source = cause.source();
        }

        PostError::Dependency {
            message: err.to_string(),
            trace,
        }
    }
}

impl From<StoreError> for PostError {
    fn from(err: StoreError) -> Self {
        PostError::dependency(err)
    }
}

impl From<BlobError> for PostError {
    fn from(err: BlobError) -> Self {
        PostError::dependency(err)
    }
}

impl From<serde_json::Error> for PostError {
    fn from(err: serde_json::Error) -> Self {
        PostError::dependency(err)
    }
}

impl ResponseError for PostError {
    fn status_code(&self) -> StatusCode {
        match *self {
            PostError::Validation(..) => StatusCode::BAD_REQUEST,
            PostError::NotFound(..) => StatusCode::NOT_FOUND,
            PostError::Forbidden(..) => StatusCode::FORBIDDEN,
            PostError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            PostError::PayloadTooLarge(..) => StatusCode::PAYLOAD_TOO_LARGE,
            PostError::Dependency { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            PostError::Dependency { message, trace } => {
                error!("{}", trace);
                json!({ "error": message, "traceback": trace })
            }
            other => json!({ "error": other.to_string() }),
        };

        json_response(self.status_code(), body)
    }
}
