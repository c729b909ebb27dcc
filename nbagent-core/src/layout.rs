//! Data directory layout
//!
//! ```text
//! <data_home>/
//!   app-config.json
//!   boards/<board_id>/rev-00000001.json ... meta.json
//!   deleted/<board_id>/...
//! ```
//!
//! The data home resolves from an explicit override, then the platform user-data
//! directory (`$XDG_DATA_HOME` or `~/.local/share` on Linux), then `./nbagent-data`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::board_id::BoardId;
use crate::error::{AgentError, AgentResult};

pub const PROG_NAME: &str = "nbagent";
pub const CONFIG_FILE: &str = "app-config.json";
pub const META_FILE: &str = "meta.json";
pub const BOARDS_SUBDIR: &str = "boards";
pub const DELETED_SUBDIR: &str = "deleted";

const FALLBACK_DATA_HOME: &str = "nbagent-data";

/// Resolved directory layout for one data home
#[derive(Debug, Clone)]
pub struct DataLayout {
    /// Root directory (e.g., ~/.local/share/nbagent)
    pub root_dir: PathBuf,
}

impl DataLayout {
    /// Resolve the data home, preferring an explicit override
    pub fn resolve(data_dir_override: Option<&Path>) -> Self {
        let root_dir = match data_dir_override {
            Some(dir) => dir.to_path_buf(),
            None => default_data_home(),
        };
        Self { root_dir }
    }

    /// Create layout with explicit root directory (for testing)
    pub fn with_root(root_dir: PathBuf) -> Self {
        Self { root_dir }
    }

    /// Create the root, `boards/` and `deleted/` directories. Idempotent.
    pub fn ensure(&self) -> AgentResult<()> {
        for dir in [self.root_dir.clone(), self.boards_root(), self.deleted_root()] {
            fs::create_dir_all(&dir).map_err(|e| AgentError::io(&dir, e))?;
        }
        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.root_dir.join(CONFIG_FILE)
    }

    pub fn boards_root(&self) -> PathBuf {
        self.root_dir.join(BOARDS_SUBDIR)
    }

    pub fn deleted_root(&self) -> PathBuf {
        self.root_dir.join(DELETED_SUBDIR)
    }

    /// Active board directory
    pub fn board_path(&self, board_id: &BoardId) -> PathBuf {
        self.boards_root().join(board_id.as_str())
    }

    /// Soft-deleted board directory
    pub fn deleted_board_path(&self, board_id: &BoardId) -> PathBuf {
        self.deleted_root().join(board_id.as_str())
    }
}

/// Revision file name, zero-padded to 8 digits so lexicographic order matches numeric order
pub fn revision_file_name(revision: u64) -> String {
    format!("rev-{:08}.json", revision)
}

/// Inverse of [`revision_file_name`]; `None` for anything else in a board directory
pub fn parse_revision_file_name(name: &str) -> Option<u64> {
    let digits = name.strip_prefix("rev-")?.strip_suffix(".json")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn default_data_home() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(PROG_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(FALLBACK_DATA_HOME))
}
