// Route definitions

use std::convert::Infallible;
use std::sync::Arc;

use tracing::debug;
use warp::{Filter, Rejection, Reply};

use crate::board::MessageBoard;
use crate::error::ApiError;
use crate::handlers;

/// Largest accepted `POST /messages` body, in bytes.
pub const MAX_BODY_BYTES: u64 = 16 * 1024;

pub fn configure_routes(
    board: Arc<MessageBoard>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let messages = warp::path("messages").and(warp::path::end());

    // GET /messages
    let list_messages = messages
        .and(warp::get())
        .and(with_board(board.clone()))
        .and_then(handlers::list_messages_handler);

    // POST /messages
    let add_message = messages
        .and(warp::post())
        .and(with_board(board))
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and_then(handlers::add_message_handler);

    // Any origin may call the API
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST"])
        .allow_header("content-type");

    list_messages
        .or(add_message)
        .recover(handle_rejection)
        .with(cors)
}

fn with_board(
    board: Arc<MessageBoard>,
) -> impl Filter<Extract = (Arc<MessageBoard>,), Error = Infallible> + Clone {
    warp::any().map(move || board.clone())
}

/// Turn warp rejections into the same JSON error bodies the handlers produce.
async fn handle_rejection(err: Rejection) -> Result<warp::reply::Response, Infallible> {
    let api_err = if err.is_not_found() {
        ApiError::NotFound
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        ApiError::PayloadTooLarge
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        ApiError::MethodNotAllowed
    } else {
        ApiError::BadRequest
    };

    debug!(rejection = ?err, status = %api_err.status(), "Request rejected");
    Ok(api_err.into_response())
}
