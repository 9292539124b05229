//! Fetch hooks bound to the portal services.
//!
//! Each hook owns its own state slot; presentation code holds one per view.

use crate::client::PortalClient;
use crate::services;
use crate::task::FetchTask;
use crate::types::{ConsentRequest, PortalState, UserPreferences};

pub fn use_requested_scopes(client: &PortalClient) -> FetchTask<ConsentRequest> {
    FetchTask::with_args(
        |client: PortalClient| async move { services::get_requested_scopes(&client).await },
        client.clone(),
    )
}

pub fn use_portal_state(client: &PortalClient) -> FetchTask<PortalState> {
    FetchTask::with_args(
        |client: PortalClient| async move { services::get_state(&client).await },
        client.clone(),
    )
}

pub fn use_user_preferences(client: &PortalClient) -> FetchTask<UserPreferences> {
    FetchTask::with_args(
        |client: PortalClient| async move { services::get_user_preferences(&client).await },
        client.clone(),
    )
}
