pub mod consent;
pub mod session;

use crate::cli::globals::GlobalArgs;
use anyhow::Result;
use portal_core::PortalClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Scopes,
    Accept,
    Reject,
    State,
    Preferences,
}

impl Action {
    /// Run the action against the configured portal.
    pub async fn execute(self, globals: &GlobalArgs) -> Result<()> {
        let client = PortalClient::from_config(&globals.config)?;
        tracing::debug!(base_url = client.base_url(), action = ?self, "executing");

        match self {
            Action::Scopes => consent::scopes(client).await,
            Action::Accept => consent::decide(client, consent::Choice::Accept).await,
            Action::Reject => consent::decide(client, consent::Choice::Reject).await,
            Action::State => session::state(&client).await,
            Action::Preferences => session::preferences(&client).await,
        }
    }
}
