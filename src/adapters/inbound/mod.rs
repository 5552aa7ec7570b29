/// Inbound adapters - entry points driving the application from outside
mod state_server;

pub use state_server::{router, serve, serve_on, DEFAULT_SCAN_PATH, DEFAULT_SERVE_ADDR};
