// API error taxonomy and rejection handling

use std::convert::Infallible;
use thiserror::Error;
use tracing::{debug, error};
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::llm::LlmError;
use crate::models::ErrorResponse;
use crate::store::StoreError;

/// Failure of an external service call
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("todo store: {0}")]
    Store(#[from] StoreError),

    #[error("language model: {0}")]
    Llm(#[from] LlmError),
}

/// Everything a handler can fail with.
///
/// Missing records are not an error; update and delete report success either way.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body missing a field or carrying the wrong type
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database or language model call failed
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the caller. Upstream details stay in the logs.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::Upstream(_) => "Internal Server Error".to_string(),
        }
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, ApiError::Upstream(_))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Upstream(UpstreamError::Store(err))
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        ApiError::Upstream(UpstreamError::Llm(err))
    }
}

impl warp::reject::Reject for ApiError {}

fn error_reply(status: StatusCode, detail: impl Into<String>) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&ErrorResponse {
            detail: detail.into(),
        }),
        status,
    )
}

/// Turn any rejection into a JSON error response
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    if err.is_not_found() {
        return Ok(error_reply(StatusCode::NOT_FOUND, "Not Found"));
    }

    if let Some(api_error) = err.find::<ApiError>() {
        if api_error.is_upstream() {
            error!(error = %api_error, "Upstream call failed");
        }
        return Ok(error_reply(api_error.status_code(), api_error.detail()));
    }

    if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        debug!(error = %e, "Rejected request body");
        let validation = ApiError::Validation("Invalid request body".to_string());
        return Ok(error_reply(validation.status_code(), validation.detail()));
    }

    if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        return Ok(error_reply(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Unsupported Media Type",
        ));
    }

    if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        return Ok(error_reply(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method Not Allowed",
        ));
    }

    error!(rejection = ?err, "Unhandled rejection");
    Ok(error_reply(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
    ))
}
