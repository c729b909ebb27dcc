//! Client config endpoint
//!
//! `PUT /config` with form field `conf`. Always answers `true`, even when
//! there was nothing to store.

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    routing::put,
    Form, Router,
};
use nbagent_core::AgentService;
use serde::Deserialize;

use crate::http::wire::WireBool;

/// Config form body
#[derive(Debug, Deserialize)]
pub struct ConfigForm {
    pub conf: Option<String>,
}

/// PUT /config - store the client's config blob
async fn save_config(
    State(service): State<Arc<AgentService>>,
    form: Result<Form<ConfigForm>, FormRejection>,
) -> WireBool {
    let conf = match form {
        Ok(Form(form)) => form.conf,
        Err(e) => {
            tracing::warn!("Unreadable config request: {}", e);
            None
        }
    };

    if let Err(e) =
        tokio::task::spawn_blocking(move || service.update_config(conf.as_deref())).await
    {
        tracing::error!("Config task failed: {}", e);
    }

    WireBool(true)
}

/// Config routes
pub fn router() -> Router<Arc<AgentService>> {
    Router::new().route("/config", put(save_config))
}
