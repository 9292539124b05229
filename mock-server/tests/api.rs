use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Portal};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- state ---

#[tokio::test]
async fn state_is_wrapped_in_ok_envelope() {
    let resp = app().oneshot(get_request("/api/state")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["data"]["username"], "john");
    assert_eq!(body["data"]["authentication_level"], 1);
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn user_info_returns_preferences() {
    let resp = app().oneshot(get_request("/api/user/info")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["method"], "totp");
    assert_eq!(body["data"]["has_totp"], true);
}

// --- consent ---

#[tokio::test]
async fn consent_lists_requested_scopes() {
    let resp = app().oneshot(get_request("/api/oidc/consent")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["client_id"], "grafana");
    assert_eq!(body["data"]["scopes"][0], "openid");
    assert!(body["data"].get("original_uri").is_none());
}

#[tokio::test]
async fn consent_without_pending_flow_is_ko() {
    let portal = Portal {
        consent: None,
        ..Portal::default()
    };
    let resp = app_with(portal)
        .oneshot(get_request("/api/oidc/consent"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "KO");
    assert_eq!(body["message"], "no pending consent");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn accept_for_other_client_is_ko() {
    let resp = app()
        .oneshot(json_request(
            "/api/oidc/consent/accept",
            r#"{"client_id":"intruder"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "KO");
    assert_eq!(body["message"], "consent does not match the pending client");
}

#[tokio::test]
async fn reject_appends_access_denied() {
    let resp = app()
        .oneshot(json_request(
            "/api/oidc/consent/reject",
            r#"{"client_id":"grafana"}"#,
        ))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(
        body["data"]["redirect_uri"],
        "https://grafana.example.com/login/generic_oauth?error=access_denied"
    );
}

#[tokio::test]
async fn malformed_decision_is_rejected() {
    let resp = app()
        .oneshot(json_request("/api/oidc/consent/accept", r#"{"not_client":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- logout ---

#[tokio::test]
async fn logout_has_no_payload() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/logout")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"status": "OK"}));
}

// --- full consent lifecycle ---

#[tokio::test]
async fn consent_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // pending consent is visible
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/oidc/consent"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["status"], "OK");

    // accept
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "/api/oidc/consent/accept",
            r#"{"client_id":"grafana"}"#,
        ))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(
        body["data"]["redirect_uri"],
        "https://grafana.example.com/login/generic_oauth"
    );

    // nothing left to consent to
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/oidc/consent"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["status"], "KO");

    // a second decision is refused
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "/api/oidc/consent/reject",
            r#"{"client_id":"grafana"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["status"], "KO");
}
