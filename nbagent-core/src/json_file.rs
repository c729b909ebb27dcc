//! Pretty-printed JSON documents on disk
//!
//! Writes go through a temporary file in the target directory followed by a
//! rename, so readers see either the old document or the new one.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{AgentError, AgentResult};

/// Serialize `value` with 2-space indentation and atomically replace `path`
pub(crate) fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> AgentResult<()> {
    let body = serde_json::to_vec_pretty(value).map_err(|e| AgentError::json(path, e))?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| AgentError::io(dir, e))?;
    tmp.write_all(&body)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| AgentError::io(path, e))?;
    tmp.persist(path).map_err(|e| AgentError::io(path, e.error))?;

    Ok(())
}

/// Read and decode a JSON document
pub(crate) fn read<T: DeserializeOwned>(path: &Path) -> AgentResult<T> {
    let content = fs::read_to_string(path).map_err(|e| AgentError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| AgentError::json(path, e))
}
