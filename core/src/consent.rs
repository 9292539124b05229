//! Headless view model for the consent stage.
//!
//! Loads the pending consent, lists the privileges it asks for, and turns
//! the user's accept or reject into the redirect target. Errors go to a
//! `Notifier`, the only link to notification state shared across views.

use tracing::warn;

use crate::client::PortalClient;
use crate::error::RequestError;
use crate::hooks::use_requested_scopes;
use crate::services::{self, CONSENT_ACCEPT_PATH, CONSENT_REJECT_PATH};
use crate::task::{FetchState, FetchTask};
use crate::types::{ConsentRequest, ConsentResponse, Privilege};

/// Where the portal sends the user after a failed consent load.
pub const FALLBACK_ROUTE: &str = "/";

pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
    fn reset(&self);
}

/// Notifier that writes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        warn!("{message}");
    }

    fn reset(&self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Accept,
    Reject,
}

pub struct ConsentView<N> {
    client: PortalClient,
    scopes: FetchTask<ConsentRequest>,
    notifier: N,
}

impl<N: Notifier> ConsentView<N> {
    pub fn new(client: PortalClient, notifier: N) -> Self {
        let scopes = use_requested_scopes(&client);
        Self {
            client,
            scopes,
            notifier,
        }
    }

    /// The hook behind the view, for subscribing to its state.
    pub fn scopes(&self) -> &FetchTask<ConsentRequest> {
        &self.scopes
    }

    /// Fetch the pending consent. On failure the notifier gets the error
    /// and the caller gets `Err(FALLBACK_ROUTE)` to navigate to.
    pub async fn load(&self) -> Result<ConsentRequest, &'static str> {
        match self.scopes.run().await {
            FetchState::Succeeded(request) => Ok(request),
            state => {
                let message = state.error().map_or_else(
                    || "Unable to load the consent request".to_string(),
                    |e| e.to_string(),
                );
                self.notifier.error(&message);
                Err(FALLBACK_ROUTE)
            }
        }
    }

    /// Requested privileges, empty until the consent has loaded.
    pub fn privileges(&self) -> Vec<Privilege> {
        self.scopes
            .value()
            .map(|request| request.privileges())
            .unwrap_or_default()
    }

    pub fn client_id(&self) -> Option<String> {
        self.scopes.value().map(|request| request.client_id)
    }

    /// Accept the loaded consent. `Ok(None)` when nothing is loaded yet.
    pub async fn accept(&self) -> Result<Option<String>, RequestError> {
        self.decide(Decision::Accept).await
    }

    /// Reject the loaded consent. `Ok(None)` when nothing is loaded yet.
    pub async fn reject(&self) -> Result<Option<String>, RequestError> {
        self.decide(Decision::Reject).await
    }

    async fn decide(&self, decision: Decision) -> Result<Option<String>, RequestError> {
        let Some(client_id) = self.client_id() else {
            return Ok(None);
        };

        let (path, result) = match decision {
            Decision::Accept => (
                CONSENT_ACCEPT_PATH,
                services::accept_consent(&self.client, &client_id).await,
            ),
            Decision::Reject => (
                CONSENT_REJECT_PATH,
                services::reject_consent(&self.client, &client_id).await,
            ),
        };

        match result.and_then(|response| redirect_target(path, response)) {
            Ok(uri) => {
                self.notifier.reset();
                Ok(Some(uri))
            }
            Err(err) => {
                self.notifier.error(err.message());
                Err(err)
            }
        }
    }
}

fn redirect_target(path: &str, response: ConsentResponse) -> Result<String, RequestError> {
    let uri = response.redirect_uri.trim();
    if uri.is_empty() {
        Err(RequestError::missing_redirect(path))
    } else {
        Ok(uri.to_string())
    }
}
