//! nbagent-core: storage and access control for the Nullboard backup agent
//!
//! - [`ConfigStore`]: account config (`app-config.json`) with the bearer token
//! - [`RevisionStore`]: one directory per board, one file per revision, soft delete
//! - [`AccessGate`]: token check in front of every mutating call
//! - [`AgentService`]: startup initialization and the operations the HTTP layer calls
//!
//! The API is synchronous; async callers should run it on a blocking thread.

pub mod access;
pub mod board_id;
pub mod config;
pub mod error;
mod json_file;
pub mod layout;
pub mod revision;
pub mod service;
pub mod validation;

pub use access::{AccessDenied, AccessGate, RequestKind, TOKEN_HEADER};
pub use board_id::BoardId;
pub use config::{Config, ConfigStore};
pub use error::{AgentError, AgentResult};
pub use layout::DataLayout;
pub use revision::{revision_number, RevisionStore};
pub use service::{AgentService, InitOptions};
pub use validation::ValidationError;
