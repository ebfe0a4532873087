use std::process;
use std::sync::Arc;

use msgboard::board::MessageBoard;
use msgboard::config::BoardConfig;
use msgboard::routes::configure_routes;
use msgboard::store::FileMessageStore;
use msgboard::telemetry;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match BoardConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {}", err);
            process::exit(1);
        }
    };

    telemetry::init_logging(&config);

    let store = FileMessageStore::new(&config.data_file);
    if let Err(err) = store.init().await {
        error!(error = %err, location = err.location(), "Failed to prepare message file");
        process::exit(1);
    }

    let data_file = store.path().display().to_string();
    let board = Arc::new(MessageBoard::new(Arc::new(store)));
    let routes = configure_routes(board);

    let addr = config.socket_addr();
    info!(%addr, %data_file, "Starting server");
    warp::serve(routes).run(addr).await;
}
