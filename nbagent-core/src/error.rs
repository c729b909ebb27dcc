//! Structured error types for nbagent-core.
//!
//! The request layer only ever needs success/failure, but the variants keep
//! enough context for the operational log to say what went wrong and where.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// Main error type for board and config storage
#[derive(Error, Debug)]
pub enum AgentError {
    /// Filesystem operation failed
    #[error("I/O error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    /// Document could not be encoded or decoded
    #[error("JSON error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Caller-supplied board identifier is unsafe as a path segment
    #[error("Invalid board id: {0}")]
    InvalidBoardId(#[from] ValidationError),

    /// No active board with this id
    #[error("Board '{board_id}' not found")]
    BoardNotFound { board_id: String },

    /// Soft-delete area already holds a board with this id
    #[error("Board '{board_id}' already present in deleted area")]
    AlreadyDeleted { board_id: String },

    /// Revision requested for reading does not exist
    #[error("Revision {revision} of board '{board_id}' not found")]
    RevisionNotFound { board_id: String, revision: u64 },
}

/// Result type alias for nbagent-core operations
pub type AgentResult<T> = std::result::Result<T, AgentError>;

impl AgentError {
    /// Create an I/O error bound to the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a JSON error bound to the file it concerns
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    pub fn board_not_found(board_id: impl Into<String>) -> Self {
        Self::BoardNotFound {
            board_id: board_id.into(),
        }
    }

    pub fn already_deleted(board_id: impl Into<String>) -> Self {
        Self::AlreadyDeleted {
            board_id: board_id.into(),
        }
    }
}
