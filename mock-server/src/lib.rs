use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

/// `{status, data?, message?}` as the portal backend sends it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// HTTP status plus envelope body, the shape every handler answers with.
pub type Reply<T> = (StatusCode, Json<Envelope<T>>);

impl<T> Envelope<T> {
    fn ok(data: T) -> Reply<T> {
        (
            StatusCode::OK,
            Json(Self {
                status: "OK".to_string(),
                data: Some(data),
                message: None,
            }),
        )
    }

    fn empty() -> Reply<T> {
        (
            StatusCode::OK,
            Json(Self {
                status: "OK".to_string(),
                data: None,
                message: None,
            }),
        )
    }

    fn ko(status: StatusCode, message: &str) -> Reply<T> {
        (
            status,
            Json(Self {
                status: "KO".to_string(),
                data: None,
                message: Some(message.to_string()),
            }),
        )
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PendingConsent {
    pub client_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_description: Option<String>,
    pub scopes: Vec<String>,
    #[serde(skip)]
    pub original_uri: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionState {
    pub username: String,
    pub authentication_level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_redirection_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub method: String,
    pub has_webauthn: bool,
    pub has_totp: bool,
}

#[derive(Deserialize)]
pub struct ConsentDecision {
    pub client_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Redirect {
    pub redirect_uri: String,
}

/// Everything the mock backend knows about the one session it serves.
#[derive(Clone, Debug)]
pub struct Portal {
    pub consent: Option<PendingConsent>,
    pub state: SessionState,
    pub preferences: Preferences,
}

impl Default for Portal {
    fn default() -> Self {
        Self {
            consent: Some(PendingConsent {
                client_id: "grafana".to_string(),
                client_description: Some("Grafana dashboards".to_string()),
                scopes: vec![
                    "openid".to_string(),
                    "profile".to_string(),
                    "email".to_string(),
                    "groups".to_string(),
                ],
                original_uri: "https://grafana.example.com/login/generic_oauth".to_string(),
            }),
            state: SessionState {
                username: "john".to_string(),
                authentication_level: 1,
                default_redirection_url: Some("https://home.example.com".to_string()),
            },
            preferences: Preferences {
                display_name: Some("John Doe".to_string()),
                method: "totp".to_string(),
                has_webauthn: false,
                has_totp: true,
            },
        }
    }
}

pub type Db = Arc<RwLock<Portal>>;

pub fn app() -> Router {
    app_with(Portal::default())
}

pub fn app_with(portal: Portal) -> Router {
    let db: Db = Arc::new(RwLock::new(portal));
    Router::new()
        .route("/api/health", get(health))
        .route("/api/state", get(get_state))
        .route("/api/user/info", get(get_user_info))
        .route("/api/oidc/consent", get(get_consent))
        .route("/api/oidc/consent/accept", post(accept_consent))
        .route("/api/oidc/consent/reject", post(reject_consent))
        .route("/api/logout", post(logout))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock portal listening");
    }
    axum::serve(listener, app()).await
}

async fn health() -> Reply<()> {
    Envelope::empty()
}

async fn get_state(State(db): State<Db>) -> Reply<SessionState> {
    Envelope::ok(db.read().await.state.clone())
}

async fn get_user_info(State(db): State<Db>) -> Reply<Preferences> {
    Envelope::ok(db.read().await.preferences.clone())
}

async fn get_consent(State(db): State<Db>) -> Reply<PendingConsent> {
    match db.read().await.consent.clone() {
        Some(consent) => Envelope::ok(consent),
        None => Envelope::ko(StatusCode::FORBIDDEN, "no pending consent"),
    }
}

async fn accept_consent(
    State(db): State<Db>,
    Json(input): Json<ConsentDecision>,
) -> Reply<Redirect> {
    decide(&db, &input.client_id, |consent| consent.original_uri.clone()).await
}

async fn reject_consent(
    State(db): State<Db>,
    Json(input): Json<ConsentDecision>,
) -> Reply<Redirect> {
    decide(&db, &input.client_id, |consent| {
        let separator = if consent.original_uri.contains('?') { '&' } else { '?' };
        format!("{}{separator}error=access_denied", consent.original_uri)
    })
    .await
}

/// Resolve the pending consent if `client_id` matches it.
async fn decide(
    db: &Db,
    client_id: &str,
    target: impl FnOnce(&PendingConsent) -> String,
) -> Reply<Redirect> {
    let mut portal = db.write().await;
    let Some(consent) = portal.consent.as_ref() else {
        return Envelope::ko(StatusCode::FORBIDDEN, "no pending consent");
    };
    if consent.client_id != client_id {
        debug!(expected = %consent.client_id, got = %client_id, "consent for another client");
        return Envelope::ko(
            StatusCode::BAD_REQUEST,
            "consent does not match the pending client",
        );
    }
    let redirect_uri = target(consent);
    portal.consent = None;
    Envelope::ok(Redirect { redirect_uri })
}

async fn logout(State(db): State<Db>) -> Reply<()> {
    let mut portal = db.write().await;
    portal.state.username.clear();
    portal.state.authentication_level = 0;
    Envelope::empty()
}
