//! HTTP API Layer
//!
//! Binds the per-user dispatch use case to HTTP routes (axum).

pub mod error;
pub mod extract;
pub mod handler;
pub mod server;
pub mod types;

pub use handler::{router, AppState};
pub use server::{HttpServer, HttpServerConfig, ServerHandle};
