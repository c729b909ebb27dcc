//! Wire encoding of operation results
//!
//! The client expects the literal strings `true` / `false` as the response body.

use axum::response::{IntoResponse, Response};

/// Success flag encoded the way the client reads it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireBool(pub bool);

impl<T, E> From<Result<T, E>> for WireBool {
    fn from(result: Result<T, E>) -> Self {
        Self(result.is_ok())
    }
}

impl IntoResponse for WireBool {
    fn into_response(self) -> Response {
        let body = if self.0 { "true" } else { "false" };
        body.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn encodes_as_plain_strings() {
        for (flag, expected) in [(true, "true"), (false, "false")] {
            let response = WireBool(flag).into_response();
            assert_eq!(response.status(), StatusCode::OK);
            let body = to_bytes(response.into_body(), 64).await.unwrap();
            assert_eq!(&body[..], expected.as_bytes());
        }
    }

    #[test]
    fn from_result() {
        assert_eq!(WireBool::from(Ok::<u64, ()>(3)), WireBool(true));
        assert_eq!(WireBool::from(Err::<(), _>("io")), WireBool(false));
    }
}
