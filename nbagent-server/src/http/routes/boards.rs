//! Board endpoints
//!
//! - `PUT /board/{board_id}` with form fields `data` and `meta` (JSON text)
//! - `DELETE /board/{board_id}`

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Path, State},
    routing::put,
    Form, Router,
};
use nbagent_core::AgentService;
use serde::Deserialize;
use serde_json::Value;

use crate::http::wire::WireBool;

/// Save board form body
#[derive(Debug, Deserialize)]
pub struct SaveBoardForm {
    pub data: Option<String>,
    pub meta: Option<String>,
}

/// Decode a JSON form field; missing or blank is an empty object
fn decode_document(field: Option<&str>) -> Result<Value, serde_json::Error> {
    match field.map(str::trim) {
        None | Some("") => Ok(Value::Object(Default::default())),
        Some(text) => serde_json::from_str(text),
    }
}

/// PUT /board/{board_id} - store one revision plus the board meta
async fn save_board(
    State(service): State<Arc<AgentService>>,
    Path(board_id): Path<String>,
    form: Result<Form<SaveBoardForm>, FormRejection>,
) -> WireBool {
    let Form(form) = match form {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!(%board_id, "Unreadable save request: {}", e);
            return WireBool(false);
        }
    };

    let (data, meta) = match (
        decode_document(form.data.as_deref()),
        decode_document(form.meta.as_deref()),
    ) {
        (Ok(data), Ok(meta)) => (data, meta),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(%board_id, "Malformed board document: {}", e);
            return WireBool(false);
        }
    };

    let result =
        tokio::task::spawn_blocking(move || service.save_board(&board_id, &data, &meta)).await;
    match result {
        Ok(saved) => WireBool::from(saved),
        Err(e) => {
            tracing::error!("Save task failed: {}", e);
            WireBool(false)
        }
    }
}

/// DELETE /board/{board_id} - move the board to the deleted area
async fn delete_board(
    State(service): State<Arc<AgentService>>,
    Path(board_id): Path<String>,
) -> WireBool {
    let result = tokio::task::spawn_blocking(move || service.delete_board(&board_id)).await;
    match result {
        Ok(deleted) => WireBool::from(deleted),
        Err(e) => {
            tracing::error!("Delete task failed: {}", e);
            WireBool(false)
        }
    }
}

/// Board routes
pub fn router() -> Router<Arc<AgentService>> {
    Router::new().route(
        "/board/{board_id}",
        put(save_board).delete(delete_board),
    )
}
