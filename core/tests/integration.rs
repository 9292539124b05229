//! Portal flows against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the core over real
//! HTTP through `ReqwestTransport`. Validates that request building,
//! envelope parsing and the fetch hooks line up with the actual server.

use std::sync::{Arc, Mutex};

use portal_core::hooks::{use_portal_state, use_user_preferences};
use portal_core::services;
use portal_core::{
    AuthenticationLevel, ConsentView, FetchState, Notifier, PortalClient, PortalConfig,
    SecondFactorMethod,
};
use tokio::net::TcpListener;

async fn start_server() -> PortalClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    PortalClient::from_config(&PortalConfig::new(&format!("http://{addr}"))).unwrap()
}

#[derive(Default, Clone)]
struct Collect(Arc<Mutex<Vec<String>>>);

impl Notifier for Collect {
    fn error(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }

    fn reset(&self) {}
}

#[tokio::test(flavor = "multi_thread")]
async fn state_and_preferences_hooks() {
    let client = start_server().await;

    let state = use_portal_state(&client);
    assert!(state.snapshot().is_idle());
    match state.run().await {
        FetchState::Succeeded(state) => {
            assert_eq!(state.username, "john");
            assert_eq!(state.authentication_level, AuthenticationLevel::OneFactor);
        }
        other => panic!("unexpected state: {other:?}"),
    }

    let prefs = use_user_preferences(&client);
    let prefs = prefs.run().await;
    assert_eq!(prefs.value().map(|p| p.method), Some(SecondFactorMethod::Totp));
}

#[tokio::test(flavor = "multi_thread")]
async fn consent_lifecycle() {
    let client = start_server().await;
    let notes = Collect::default();
    let view = ConsentView::new(client.clone(), notes.clone());

    // Step 1: load the pending consent.
    let request = view.load().await.unwrap();
    assert_eq!(request.client_id, "grafana");
    let scopes: Vec<String> = view.privileges().into_iter().map(|p| p.scope).collect();
    assert_eq!(scopes, vec!["profile", "email", "groups"]);

    // Step 2: accept it.
    let target = view.accept().await.unwrap();
    assert_eq!(
        target.as_deref(),
        Some("https://grafana.example.com/login/generic_oauth")
    );

    // Step 3: the consent is gone; a reload fails and falls back.
    assert_eq!(view.load().await, Err(portal_core::consent::FALLBACK_ROUTE));
    assert_eq!(
        notes.0.lock().unwrap()[0],
        "Failed GET from /api/oidc/consent. Code: 403. Reason: no pending consent"
    );

    // Step 4: the failed reload kept the previously loaded consent.
    assert_eq!(view.client_id().as_deref(), Some("grafana"));

    // Step 5: deciding again is refused by the backend.
    let err = view.reject().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert!(err.message().contains("/api/oidc/consent/reject"));
}

#[tokio::test(flavor = "multi_thread")]
async fn consent_for_another_client_surfaces_the_reason() {
    let client = start_server().await;

    let err = services::accept_consent(&client, "intruder")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(
        err.message(),
        "Failed POST to /api/oidc/consent/accept. Code: 400. \
         Reason: consent does not match the pending client"
    );

    // The pending consent survives a mismatched decision.
    let request = services::get_requested_scopes(&client).await.unwrap();
    assert_eq!(request.client_id, "grafana");
}

#[tokio::test(flavor = "multi_thread")]
async fn logout_tolerates_empty_payload() {
    let client = start_server().await;

    services::logout(&client).await.unwrap();

    let state = services::get_state(&client).await.unwrap();
    assert!(state.username.is_empty());
    assert_eq!(state.authentication_level, AuthenticationLevel::NotAuthenticated);

    let err = client
        .post::<serde_json::Value, ()>(services::LOGOUT_PATH, None)
        .await
        .unwrap_err();
    assert!(err.message().starts_with("unexpected type of response"));
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_route_is_a_request_error() {
    let client = start_server().await;

    let err = client
        .get::<serde_json::Value>("/api/does-not-exist")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(
        err.message(),
        "Failed GET from /api/does-not-exist. Code: 404."
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_is_a_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = PortalClient::from_config(&PortalConfig::new(&format!("http://{addr}"))).unwrap();
    let err = services::get_state(&client).await.unwrap_err();
    assert_eq!(err.status(), None);
    assert_eq!(err.path(), "/api/state");
}
