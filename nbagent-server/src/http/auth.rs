//! Token gate middleware

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use nbagent_core::{AgentService, RequestKind, TOKEN_HEADER};

/// Reject requests whose `X-Access-Token` does not match the configured token.
/// Rejections are a bare 401; the reason only goes to the log.
pub async fn require_token(
    State(service): State<Arc<AgentService>>,
    request: Request,
    next: Next,
) -> Response {
    let kind = if request.method() == Method::OPTIONS {
        RequestKind::Preflight
    } else {
        RequestKind::Authenticated
    };

    let presented = request
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());
    // Absent when the router is driven without a listener, as in tests
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let allowed = service.authorize(kind, presented, remote_addr).is_ok();

    if allowed {
        next.run(request).await
    } else {
        tracing::debug!(method = %request.method(), uri = %request.uri(), "Request rejected by token gate");
        StatusCode::UNAUTHORIZED.into_response()
    }
}
