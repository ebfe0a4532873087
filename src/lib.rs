// HTTP Server modules
pub mod handlers;
pub mod models;
pub mod routes;

// Message board service and persistence
pub mod board;
pub mod store;

pub mod config;
pub mod error;
pub mod telemetry;
