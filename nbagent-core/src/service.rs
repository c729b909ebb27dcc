//! Agent façade: startup initialization plus the three mutating operations
//! the request layer calls (save board, delete board, update config).

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use uuid::Uuid;

use crate::access::{AccessDenied, AccessGate, RequestKind};
use crate::board_id::BoardId;
use crate::config::{Config, ConfigStore};
use crate::error::AgentResult;
use crate::layout::DataLayout;
use crate::revision::RevisionStore;

/// Startup parameters for [`AgentService::init`]
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Explicit data home; platform default when `None`
    pub data_dir: Option<PathBuf>,
    /// Generate a fresh token even if one is configured
    pub reset_token: bool,
    /// Use this token instead of the stored or generated one
    pub override_token: Option<String>,
}

/// Board backup service. Owns the in-memory config; share it as `Arc<AgentService>`.
pub struct AgentService {
    revisions: RevisionStore,
    config_store: ConfigStore,
    config: RwLock<Config>,
}

impl AgentService {
    /// Prepare the data directory and config, bootstrapping the token if needed.
    ///
    /// Directory creation is idempotent. The token is only replaced when an
    /// override is given, a reset is requested, or none exists yet.
    pub fn init(options: InitOptions) -> AgentResult<Self> {
        let layout = DataLayout::resolve(options.data_dir.as_deref());
        tracing::info!(data_dir = %layout.root_dir.display(), "Using data directory");
        layout.ensure()?;

        let config_store = ConfigStore::new(layout.config_path());
        let mut config = config_store.load();

        let override_token = options.override_token.filter(|t| !t.is_empty());
        let changed = if let Some(token) = override_token {
            config.set_auth(token);
            true
        } else if options.reset_token || config.auth().is_none() {
            config.set_auth(generate_token());
            true
        } else {
            false
        };

        if changed {
            config_store.save(&config);
        }

        if let Some(token) = config.auth() {
            tracing::info!("Nullboard token: {}", token);
        }

        Ok(Self {
            revisions: RevisionStore::new(layout),
            config_store,
            config: RwLock::new(config),
        })
    }

    /// Run the access gate for one request. `remote_addr` is the peer, when
    /// known, and is only used to log rejections.
    pub fn authorize(
        &self,
        kind: RequestKind,
        presented: Option<&str>,
        remote_addr: Option<SocketAddr>,
    ) -> Result<(), AccessDenied> {
        let config = self.read_config();
        let result = AccessGate::new(config.auth()).check(kind, presented);
        if let Err(reason) = &result {
            match remote_addr {
                Some(addr) => {
                    tracing::warn!(%reason, remote_addr = %addr, "Unauthorized request rejected")
                }
                None => tracing::warn!(%reason, "Unauthorized request rejected"),
            }
        }
        result
    }

    /// Store a board revision and its meta document. Returns the revision number.
    pub fn save_board(&self, board_id: &str, data: &Value, meta: &Value) -> AgentResult<u64> {
        let id = BoardId::new(board_id).inspect_err(|e| {
            tracing::warn!(board_id, "Rejected board id: {}", e);
        })?;

        let title = data.get("title").and_then(Value::as_str).unwrap_or("");
        match self.revisions.save_revision(&id, data, meta) {
            Ok(revision) => {
                tracing::info!(board_id = %id, revision, "Saved board '{}'", title);
                Ok(revision)
            }
            Err(e) => {
                tracing::error!(board_id = %id, "Error saving board: {}", e);
                Err(e)
            }
        }
    }

    /// Move a board to the soft-delete area
    pub fn delete_board(&self, board_id: &str) -> AgentResult<()> {
        let id = BoardId::new(board_id).inspect_err(|e| {
            tracing::warn!(board_id, "Rejected board id: {}", e);
        })?;

        match self.revisions.delete_board(&id) {
            Ok(()) => {
                tracing::info!(board_id = %id, "Moved board to deleted area");
                Ok(())
            }
            Err(e) => {
                tracing::error!(board_id = %id, "Error deleting board: {}", e);
                Err(e)
            }
        }
    }

    /// Store the client config blob. Empty or missing input is a no-op.
    /// Persisting is best effort; the in-memory value is updated regardless.
    pub fn update_config(&self, conf: Option<&str>) {
        let Some(conf) = conf.filter(|c| !c.is_empty()) else {
            return;
        };

        let mut config = self.write_config();
        config.set_conf(conf);
        self.config_store.save(&config);
    }

    /// Snapshot of the current config
    pub fn config(&self) -> Config {
        self.read_config().clone()
    }

    /// Currently configured bearer token
    pub fn token(&self) -> Option<String> {
        self.read_config().auth().map(str::to_owned)
    }

    pub fn revisions(&self) -> &RevisionStore {
        &self.revisions
    }

    pub fn layout(&self) -> &DataLayout {
        self.revisions.layout()
    }

    fn read_config(&self) -> RwLockReadGuard<'_, Config> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_config(&self) -> RwLockWriteGuard<'_, Config> {
        self.config.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// Config holds the token, keep it out of debug output
impl fmt::Debug for AgentService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentService")
            .field("revisions", &self.revisions)
            .field("config_store", &self.config_store)
            .finish_non_exhaustive()
    }
}

/// Random v4 UUID without separators: 32 lowercase hex characters
fn generate_token() -> String {
    Uuid::new_v4().simple().to_string()
}
