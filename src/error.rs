//! Errors surfaced by the HTTP layer

use thiserror::Error;
use warp::http::StatusCode;
use warp::Reply;

use crate::models::ErrorResponse;
use crate::store::StoreError;

/// Every failure a request can end in.
///
/// The display string is the body sent to the client; storage detail lives in
/// the `#[source]` and is only ever logged.
#[derive(Debug, Error)]
pub enum ApiError {
    /// `message` missing, not a string, or empty; or the body is not a JSON object
    #[error("Invalid message")]
    InvalidMessage,

    /// Storage failed while listing messages
    #[error("Error reading messages")]
    ListFailed(#[source] StoreError),

    /// Storage failed while adding a message
    #[error("Error adding message")]
    AddFailed(#[source] StoreError),

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Bad request")]
    BadRequest,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidMessage | ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::ListFailed(_) | ApiError::AddFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn body(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
        }
    }
}

impl Reply for ApiError {
    fn into_response(self) -> warp::reply::Response {
        warp::reply::with_status(warp::reply::json(&self.body()), self.status()).into_response()
    }
}
