// GET /messages handler

use std::convert::Infallible;
use std::sync::Arc;

use tracing::{debug, error};
use warp::http::StatusCode;
use warp::Reply;

use crate::board::MessageBoard;
use crate::error::ApiError;

pub async fn list_messages_handler(
    board: Arc<MessageBoard>,
) -> Result<warp::reply::Response, Infallible> {
    match board.list().await {
        Ok(log) => {
            debug!(count = log.len(), "GET /messages");
            Ok(warp::reply::with_status(warp::reply::json(&log), StatusCode::OK).into_response())
        }
        Err(err) => {
            error!(error = %err, location = err.location(), "Error reading messages");
            Ok(ApiError::ListFailed(err).into_response())
        }
    }
}
