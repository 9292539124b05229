//! Portal backend endpoints as typed async functions.

use crate::client::PortalClient;
use crate::error::RequestError;
use crate::types::{ConsentDecision, ConsentRequest, ConsentResponse, PortalState, UserPreferences};

pub const CONSENT_PATH: &str = "/api/oidc/consent";
pub const CONSENT_ACCEPT_PATH: &str = "/api/oidc/consent/accept";
pub const CONSENT_REJECT_PATH: &str = "/api/oidc/consent/reject";
pub const STATE_PATH: &str = "/api/state";
pub const USER_INFO_PATH: &str = "/api/user/info";
pub const LOGOUT_PATH: &str = "/api/logout";

pub async fn get_requested_scopes(client: &PortalClient) -> Result<ConsentRequest, RequestError> {
    client.get(CONSENT_PATH).await
}

pub async fn accept_consent(
    client: &PortalClient,
    client_id: &str,
) -> Result<ConsentResponse, RequestError> {
    let decision = ConsentDecision {
        client_id: client_id.to_string(),
    };
    client.post(CONSENT_ACCEPT_PATH, Some(&decision)).await
}

pub async fn reject_consent(
    client: &PortalClient,
    client_id: &str,
) -> Result<ConsentResponse, RequestError> {
    let decision = ConsentDecision {
        client_id: client_id.to_string(),
    };
    client.post(CONSENT_REJECT_PATH, Some(&decision)).await
}

pub async fn get_state(client: &PortalClient) -> Result<PortalState, RequestError> {
    client.get(STATE_PATH).await
}

pub async fn get_user_preferences(client: &PortalClient) -> Result<UserPreferences, RequestError> {
    client.get(USER_INFO_PATH).await
}

/// End the session. The backend answers with an empty `OK`.
pub async fn logout(client: &PortalClient) -> Result<(), RequestError> {
    client
        .post_with_optional_response::<serde_json::Value, ()>(LOGOUT_PATH, None)
        .await
        .map(|_| ())
}
