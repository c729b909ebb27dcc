//! HTTP server layer
//!
//! Axum server with:
//! - Token gate on board and config routes (OPTIONS always passes)
//! - CORS (permissive by default, the client is a browser page)
//! - Request tracing and timeout
//! - Graceful shutdown

pub mod auth;
pub mod routes;
pub mod server;
pub mod wire;

pub use server::{build_router, run_server, ServerConfig, ServerError};
pub use wire::WireBool;
