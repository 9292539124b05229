//! The response envelope every portal endpoint wraps its payload in.
//!
//! ```json
//! { "status": "OK" | "KO", "data": ..., "message": "..." }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvelopeStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "KO")]
    Ko,
}

/// A decoded envelope. `data: null` and a missing `data` field both decode
/// to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    pub status: EnvelopeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: EnvelopeStatus::Ok,
            data: Some(data),
            message: None,
        }
    }

    /// Success without a payload.
    pub fn empty() -> Self {
        Self {
            status: EnvelopeStatus::Ok,
            data: None,
            message: None,
        }
    }

    pub fn ko(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Ko,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == EnvelopeStatus::Ok
    }
}
