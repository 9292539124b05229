use anyhow::{anyhow, Result};
use portal_core::hooks::{use_portal_state, use_user_preferences};
use portal_core::{FetchState, PortalClient, RequestError};
use serde::Serialize;

pub async fn state(client: &PortalClient) -> Result<()> {
    let state = use_portal_state(client).run().await;
    print_json(state)
}

pub async fn preferences(client: &PortalClient) -> Result<()> {
    let prefs = use_user_preferences(client).run().await;
    print_json(prefs)
}

fn print_json<T: Serialize>(state: FetchState<T, RequestError>) -> Result<()> {
    match state {
        FetchState::Succeeded(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        FetchState::Failed { error, .. } => Err(error.into()),
        other => Err(anyhow!(
            "request did not complete (loading: {})",
            other.is_loading()
        )),
    }
}
