//! Board identifier validation
//!
//! Board ids come straight from the request path and become directory names,
//! so they are restricted to a single safe path segment.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::validation::ValidationError;

/// Maximum length for board ids
const MAX_BOARD_ID_LEN: usize = 128;

/// No separators, no leading dot (rules out `.` and `..`)
static BOARD_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-][A-Za-z0-9_.-]*$").expect("invalid board id regex"));

/// Validated board identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardId(String);

impl BoardId {
    /// Create a board id, rejecting anything that is not a single safe path segment.
    ///
    /// # Rules
    /// - Max 128 characters
    /// - ASCII alphanumeric, `-`, `_` and `.`
    /// - Must not start with `.`
    ///
    /// # Example
    /// ```
    /// use nbagent_core::BoardId;
    ///
    /// assert!(BoardId::new("1700000000123").is_ok());
    /// assert!(BoardId::new("../../etc").is_err());
    /// assert!(BoardId::new("a/b").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "board id" });
        }

        if s.len() > MAX_BOARD_ID_LEN {
            return Err(ValidationError::TooLong {
                field: "board id",
                max: MAX_BOARD_ID_LEN,
            });
        }

        if !BOARD_ID_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "board id",
                reason: "must be a single path segment of alphanumerics, '-', '_' or '.', not starting with '.'",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BoardId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_ids() {
        assert!(BoardId::new("abc123").is_ok());
        assert!(BoardId::new("1700000000123").is_ok());
        assert!(BoardId::new("My_Board-2").is_ok());
        assert!(BoardId::new("board.v2").is_ok());
        assert!(BoardId::new("_").is_ok());
    }

    #[test]
    fn rejects_traversal() {
        for bad in ["..", ".", "../../etc", "../x", ".hidden"] {
            let err = BoardId::new(bad).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidFormat { .. }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_separators() {
        assert!(BoardId::new("a/b").is_err());
        assert!(BoardId::new("a\\b").is_err());
        assert!(BoardId::new("/abs").is_err());
        assert!(BoardId::new("nul\0byte").is_err());
        assert!(BoardId::new("with space").is_err());
    }

    #[test]
    fn rejects_empty() {
        let err = BoardId::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn max_length() {
        let id_128 = "a".repeat(128);
        assert!(BoardId::new(&id_128).is_ok());

        let id_129 = "a".repeat(129);
        let err = BoardId::new(&id_129).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 128, .. }));
    }
}
