//! # Operation Errors
//!
//! Every failed resource operation collapses into [`OperationFailed`]. The
//! variants only exist to produce a readable message; callers never branch
//! on them.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OperationFailed {
    /// Server answered with a non-success status
    #[error("server responded with {status} {reason}")]
    Status { status: u16, reason: String },

    /// Request never produced a response
    #[error("{0}")]
    Transport(String),

    /// Response body was not the expected JSON
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl OperationFailed {
    pub fn status(status: u16) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("")
            .to_string();
        Self::Status { status, reason }
    }
}

impl From<reqwest::Error> for OperationFailed {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

impl From<serde_json::Error> for OperationFailed {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_should_carry_canonical_reason() {
        let error = OperationFailed::status(404);
        assert_eq!(error.to_string(), "server responded with 404 Not Found");
    }

    #[test]
    fn unknown_status_should_still_format() {
        let error = OperationFailed::status(599);
        assert!(error.to_string().starts_with("server responded with 599"));
    }

    #[test]
    fn json_errors_should_become_decode_failures() {
        let json_error = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let error: OperationFailed = json_error.into();
        assert!(matches!(error, OperationFailed::Decode(_)));
    }
}
