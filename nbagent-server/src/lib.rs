//! nbagent-server: HTTP layer over the nbagent core
//!
//! Speaks the Nullboard backup-agent protocol: url-encoded form bodies in,
//! `"true"`/`"false"` text out, token in the `X-Access-Token` header.

pub mod http;

pub use http::{build_router, run_server, ServerConfig, ServerError};
