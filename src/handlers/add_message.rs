// POST /messages handler

use std::convert::Infallible;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, error};
use warp::http::StatusCode;
use warp::Reply;

use crate::board::MessageBoard;
use crate::error::ApiError;
use crate::models::AddMessageRequest;

pub async fn add_message_handler(
    board: Arc<MessageBoard>,
    body: Bytes,
) -> Result<warp::reply::Response, Infallible> {
    let new = match AddMessageRequest::from_slice(&body).and_then(AddMessageRequest::validate) {
        Ok(new) => new,
        Err(err) => {
            debug!(error = %err, "Rejected POST /messages");
            return Ok(err.into_response());
        }
    };

    debug!(nickname = %new.nickname, "POST /messages");

    match board.add(new).await {
        Ok(log) => {
            Ok(warp::reply::with_status(warp::reply::json(&log), StatusCode::OK).into_response())
        }
        Err(err) => {
            error!(error = %err, location = err.location(), "Error adding message");
            Ok(ApiError::AddFailed(err).into_response())
        }
    }
}
