//! The single error kind surfaced by the portal client.
//!
//! # Design
//! Every wrapper failure (bad status, `KO` envelope, missing or malformed
//! payload, transport failure) is a `RequestError`. Callers tell them apart
//! only by message text; the path and the HTTP status, when one was
//! received, are kept for logging and tests. The type is `Clone` so fetch
//! hooks can hand out state snapshots.

use crate::http::HttpMethod;

/// A failed call against the portal API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RequestError {
    path: String,
    status: Option<u16>,
    message: String,
}

impl RequestError {
    /// Non-2xx status or a `KO` envelope.
    pub fn failed(method: HttpMethod, path: &str, status: u16, reason: Option<&str>) -> Self {
        let direction = match method {
            HttpMethod::Get => "from",
            HttpMethod::Post => "to",
        };
        let mut message = format!("Failed {method} {direction} {path}. Code: {status}.");
        if let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) {
            message.push_str(" Reason: ");
            message.push_str(reason);
        }
        Self {
            path: path.to_string(),
            status: Some(status),
            message,
        }
    }

    /// `OK` envelope without the payload the caller required.
    pub fn unexpected_response(path: &str, status: u16) -> Self {
        Self {
            path: path.to_string(),
            status: Some(status),
            message: format!("unexpected type of response from {path}"),
        }
    }

    /// Body or payload could not be decoded.
    pub fn decode(path: &str, status: u16, err: &serde_json::Error) -> Self {
        Self {
            path: path.to_string(),
            status: Some(status),
            message: format!("malformed response from {path}: {err}"),
        }
    }

    /// Request body could not be encoded.
    pub fn serialization(path: &str, err: &serde_json::Error) -> Self {
        Self {
            path: path.to_string(),
            status: None,
            message: format!("failed to encode request to {path}: {err}"),
        }
    }

    /// The request never produced a response.
    pub fn transport(method: HttpMethod, path: &str, reason: impl std::fmt::Display) -> Self {
        Self {
            path: path.to_string(),
            status: None,
            message: format!("Failed {method} {path}: {reason}"),
        }
    }

    /// The HTTP client could not be set up, so no request was attempted.
    pub fn client_setup(reason: impl std::fmt::Display) -> Self {
        Self {
            path: String::new(),
            status: None,
            message: format!("failed to build HTTP client: {reason}"),
        }
    }

    /// The backend answered but left the caller nowhere to go.
    pub fn missing_redirect(path: &str) -> Self {
        Self {
            path: path.to_string(),
            status: None,
            message: "Unable to redirect the user".to_string(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_get_message() {
        let err = RequestError::failed(HttpMethod::Get, "/api/state", 500, None);
        assert_eq!(err.to_string(), "Failed GET from /api/state. Code: 500.");
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.path(), "/api/state");
    }

    #[test]
    fn failed_post_message_includes_reason() {
        let err = RequestError::failed(HttpMethod::Post, "/api/logout", 200, Some("denied"));
        assert_eq!(
            err.to_string(),
            "Failed POST to /api/logout. Code: 200. Reason: denied"
        );
    }

    #[test]
    fn blank_reason_is_dropped() {
        let err = RequestError::failed(HttpMethod::Post, "/api/logout", 200, Some("  "));
        assert_eq!(err.message(), "Failed POST to /api/logout. Code: 200.");
    }

    #[test]
    fn client_setup_error_names_no_request() {
        let err = RequestError::client_setup("invalid TLS backend");
        assert_eq!(err.message(), "failed to build HTTP client: invalid TLS backend");
        assert_eq!(err.path(), "");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = RequestError::transport(HttpMethod::Get, "/api/state", "connection refused");
        assert_eq!(err.status(), None);
        assert!(err.message().contains("connection refused"));
    }
}
