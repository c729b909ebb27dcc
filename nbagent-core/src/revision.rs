//! Board revision storage
//!
//! Each board is a directory under `boards/` holding one immutable file per
//! revision plus a `meta.json` that is overwritten on every save. Deleting a
//! board moves the whole directory under `deleted/`.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use crate::board_id::BoardId;
use crate::error::{AgentError, AgentResult};
use crate::json_file;
use crate::layout::{parse_revision_file_name, revision_file_name, DataLayout, META_FILE};

/// Revision number carried in a revision document.
///
/// Accepts an unsigned JSON integer, a non-negative JSON float (fraction
/// truncated, so `3.0` and `3.7` are both 3) or a decimal string (`"3"`).
/// Anything else, including a missing field, is revision 0.
pub fn revision_number(revision_doc: &Value) -> u64 {
    let parsed = match revision_doc.get("revision") {
        Some(Value::Number(n)) => n.as_u64().or_else(|| whole_part(n.as_f64()?)),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed.unwrap_or_else(|| {
        tracing::warn!(
            revision = ?revision_doc.get("revision"),
            "Missing or non-numeric revision, using 0"
        );
        0
    })
}

fn whole_part(value: f64) -> Option<u64> {
    let whole = value.trunc();
    (whole.is_finite() && whole >= 0.0 && whole <= u64::MAX as f64).then_some(whole as u64)
}

/// File-backed store for board revisions
#[derive(Debug, Clone)]
pub struct RevisionStore {
    layout: DataLayout,
}

impl RevisionStore {
    pub fn new(layout: DataLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// Write a revision document and the board's meta document.
    ///
    /// The two writes are independent: the revision is written first, and a
    /// failure writing meta leaves the new revision in place. Re-saving the same
    /// revision number replaces the earlier file. Returns the revision number used.
    pub fn save_revision(
        &self,
        board_id: &BoardId,
        revision_doc: &Value,
        meta_doc: &Value,
    ) -> AgentResult<u64> {
        let board_path = self.layout.board_path(board_id);
        fs::create_dir_all(&board_path).map_err(|e| AgentError::io(&board_path, e))?;

        let revision = revision_number(revision_doc);
        json_file::write_pretty(&board_path.join(revision_file_name(revision)), revision_doc)?;
        json_file::write_pretty(&board_path.join(META_FILE), meta_doc)?;

        Ok(revision)
    }

    /// Soft-delete a board by renaming its directory into the deleted area.
    ///
    /// Fails when the board is not active or the deleted area already holds the
    /// same id; nothing is merged or physically removed.
    pub fn delete_board(&self, board_id: &BoardId) -> AgentResult<()> {
        let from = self.layout.board_path(board_id);
        let to = self.layout.deleted_board_path(board_id);

        if !from.is_dir() {
            return Err(AgentError::board_not_found(board_id.as_str()));
        }
        if to.exists() {
            return Err(AgentError::already_deleted(board_id.as_str()));
        }

        fs::rename(&from, &to).map_err(|e| AgentError::io(&from, e))
    }

    /// Active board ids, sorted
    pub fn list_boards(&self) -> AgentResult<Vec<String>> {
        list_dirs(&self.layout.boards_root())
    }

    /// Soft-deleted board ids, sorted
    pub fn list_deleted_boards(&self) -> AgentResult<Vec<String>> {
        list_dirs(&self.layout.deleted_root())
    }

    /// Revision numbers stored for an active board, ascending.
    /// Files that are not revision documents are ignored.
    pub fn list_revisions(&self, board_id: &BoardId) -> AgentResult<Vec<u64>> {
        let board_path = self.layout.board_path(board_id);
        let entries = match fs::read_dir(&board_path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(AgentError::board_not_found(board_id.as_str()))
            }
            Err(e) => return Err(AgentError::io(&board_path, e)),
        };

        let mut revisions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AgentError::io(&board_path, e))?;
            if let Some(rev) = entry.file_name().to_str().and_then(parse_revision_file_name) {
                revisions.push(rev);
            }
        }

        revisions.sort_unstable();
        Ok(revisions)
    }

    pub fn read_revision(&self, board_id: &BoardId, revision: u64) -> AgentResult<Value> {
        let path = self
            .layout
            .board_path(board_id)
            .join(revision_file_name(revision));
        if !path.is_file() {
            return Err(AgentError::RevisionNotFound {
                board_id: board_id.to_string(),
                revision,
            });
        }
        json_file::read(&path)
    }

    pub fn read_meta(&self, board_id: &BoardId) -> AgentResult<Value> {
        let path = self.layout.board_path(board_id).join(META_FILE);
        if !path.is_file() {
            return Err(AgentError::board_not_found(board_id.as_str()));
        }
        json_file::read(&path)
    }
}

fn list_dirs(root: &Path) -> AgentResult<Vec<String>> {
    let mut names = Vec::new();

    for entry in fs::read_dir(root).map_err(|e| AgentError::io(root, e))? {
        let path = entry.map_err(|e| AgentError::io(root, e))?.path();

        // Only include directories
        if !path.is_dir() {
            continue;
        }

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}
