//! Bearer-token gate in front of every state-mutating operation
//!
//! The presented token must equal the configured `auth` value. Preflight
//! requests carry no payload and pass unconditionally.

use std::fmt;

/// Header the client sends the token in
pub const TOKEN_HEADER: &str = "X-Access-Token";

/// What kind of request is asking to pass the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// CORS preflight (OPTIONS), never checked
    Preflight,
    /// Anything that reads or changes stored state
    Authenticated,
}

/// Why a request was turned away. Only for the operational log; callers
/// answer every variant the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    MissingToken,
    NotConfigured,
    Mismatch,
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::MissingToken => "no token presented",
            Self::NotConfigured => "no token configured",
            Self::Mismatch => "token mismatch",
        };
        f.write_str(reason)
    }
}

impl std::error::Error for AccessDenied {}

/// Token check against a configured secret
#[derive(Clone, Copy)]
pub struct AccessGate<'a> {
    secret: Option<&'a str>,
}

impl<'a> AccessGate<'a> {
    /// Gate for the given secret; `None` or empty rejects everything but preflight
    pub fn new(secret: Option<&'a str>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn check(&self, kind: RequestKind, presented: Option<&str>) -> Result<(), AccessDenied> {
        if kind == RequestKind::Preflight {
            return Ok(());
        }

        let presented = presented
            .filter(|t| !t.is_empty())
            .ok_or(AccessDenied::MissingToken)?;
        let secret = self.secret.ok_or(AccessDenied::NotConfigured)?;

        if constant_time_eq(presented.as_bytes(), secret.as_bytes()) {
            Ok(())
        } else {
            Err(AccessDenied::Mismatch)
        }
    }
}

// Never print the secret itself
impl fmt::Debug for AccessGate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGate")
            .field("configured", &self.secret.is_some())
            .finish()
    }
}

/// Compare without short-circuiting on the first differing byte. Length is not hidden.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
