//! HTTP server implementation for flyroute.
//!
//! This module provides a simple, efficient HTTP server implementation
//! that dispatches every request through the flyroute router.

mod response;
mod config;
mod error;
mod http_server;

// Re-export public items
pub use response::{HttpResponse, StatusCode};
pub use config::ServerConfig;
pub use error::Error;
pub use http_server::HttpServer;
