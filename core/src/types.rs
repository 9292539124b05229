//! Payload DTOs for the portal API.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently;
//! the integration tests catch schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// The consent the current OpenID Connect flow is waiting on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRequest {
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_description: Option<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// One line of the privilege list shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Privilege {
    pub scope: String,
    pub description: String,
}

impl ConsentRequest {
    /// Requested scopes minus `openid`, each paired with a readable
    /// description. Unknown scopes are shown by name.
    pub fn privileges(&self) -> Vec<Privilege> {
        self.scopes
            .iter()
            .filter(|scope| scope.as_str() != "openid")
            .map(|scope| Privilege {
                scope: scope.clone(),
                description: describe_scope(scope)
                    .map_or_else(|| scope.clone(), str::to_string),
            })
            .collect()
    }
}

pub fn describe_scope(scope: &str) -> Option<&'static str> {
    match scope {
        "profile" => Some("Access to the username of the user"),
        "email" => Some("Access to the email of the user"),
        "groups" => Some("Access to the groups of the user"),
        _ => None,
    }
}

/// Request body for accepting or rejecting a consent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentDecision {
    pub client_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentResponse {
    #[serde(default)]
    pub redirect_uri: String,
}

/// How far the current session got through authentication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AuthenticationLevel {
    #[default]
    NotAuthenticated,
    OneFactor,
    TwoFactor,
}

impl TryFrom<u8> for AuthenticationLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AuthenticationLevel::NotAuthenticated),
            1 => Ok(AuthenticationLevel::OneFactor),
            2 => Ok(AuthenticationLevel::TwoFactor),
            other => Err(format!("unknown authentication level {other}")),
        }
    }
}

impl From<AuthenticationLevel> for u8 {
    fn from(level: AuthenticationLevel) -> Self {
        match level {
            AuthenticationLevel::NotAuthenticated => 0,
            AuthenticationLevel::OneFactor => 1,
            AuthenticationLevel::TwoFactor => 2,
        }
    }
}

/// Session state as reported by `/api/state`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalState {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub authentication_level: AuthenticationLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_redirection_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondFactorMethod {
    #[default]
    Totp,
    Webauthn,
    MobilePush,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub method: SecondFactorMethod,
    #[serde(default)]
    pub has_webauthn: bool,
    #[serde(default)]
    pub has_totp: bool,
}
