use ohmygpt::identity::{GoogleIdentity, IdentityError, IdentityProvider, Session, SignInNotice};
use tokio::sync::mpsc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> GoogleIdentity {
    GoogleIdentity::new(
        "test-client-id".to_string(),
        Some(server.uri()),
        None,
    )
}

fn provider_with_token(server: &MockServer, token: &str) -> GoogleIdentity {
    GoogleIdentity::new(
        "test-client-id".to_string(),
        Some(server.uri()),
        Some(token.to_string()),
    )
}

fn device_code_body(interval: u64) -> serde_json::Value {
    serde_json::json!({
        "device_code": "dev-123",
        "user_code": "ABCD-EFGH",
        "verification_url": "https://www.google.com/device",
        "expires_in": 1800,
        "interval": interval
    })
}

// ============================================================================
// Interactive Flow
// ============================================================================

#[tokio::test]
async fn test_interactive_sign_in_polls_until_granted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/device/code"))
        .and(body_string_contains("client_id=test-client-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(device_code_body(0)))
        .mount(&mock_server)
        .await;

    // First poll: pending. Second poll: granted.
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(428)
                .set_body_json(serde_json::json!({"error": "authorization_pending"})),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"access_token": "tok-abc"})),
        )
        .mount(&mock_server)
        .await;

    let identity = provider(&mock_server);
    let (notice_tx, mut notice_rx) = mpsc::channel::<SignInNotice>(4);

    let session = identity.interactive_sign_in(notice_tx).await.unwrap();
    assert_eq!(session.access_token, "tok-abc");

    // The user-facing instructions were surfaced before polling began
    let notice = notice_rx.recv().await.unwrap();
    assert_eq!(notice.verification_url, "https://www.google.com/device");
    assert_eq!(notice.user_code, "ABCD-EFGH");
}

#[tokio::test]
async fn test_interactive_sign_in_denied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/device/code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(device_code_body(0)))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(serde_json::json!({"error": "access_denied"})),
        )
        .mount(&mock_server)
        .await;

    let identity = provider(&mock_server);
    let (notice_tx, _notice_rx) = mpsc::channel(4);

    let result = identity.interactive_sign_in(notice_tx).await;
    assert!(matches!(result, Err(IdentityError::Denied)));
}

#[tokio::test]
async fn test_interactive_sign_in_expired_device_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/device/code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(device_code_body(0)))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(serde_json::json!({"error": "expired_token"})),
        )
        .mount(&mock_server)
        .await;

    let identity = provider(&mock_server);
    let (notice_tx, _notice_rx) = mpsc::channel(4);

    let result = identity.interactive_sign_in(notice_tx).await;
    assert!(matches!(result, Err(IdentityError::Expired)));
}

#[tokio::test]
async fn test_device_code_endpoint_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/device/code"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad client"))
        .mount(&mock_server)
        .await;

    let identity = provider(&mock_server);
    let (notice_tx, _notice_rx) = mpsc::channel(4);

    let result = identity.interactive_sign_in(notice_tx).await;
    assert!(matches!(
        result,
        Err(IdentityError::Api { status: 401, .. })
    ));
}

// ============================================================================
// Silent Flow
// ============================================================================

#[tokio::test]
async fn test_silent_sign_in_validates_ambient_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tokeninfo"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"aud": "test-client-id"})),
        )
        .mount(&mock_server)
        .await;

    let identity = provider_with_token(&mock_server, "ambient-tok");
    let session = identity.silent_sign_in().await.unwrap();
    assert_eq!(session.access_token, "ambient-tok");
}

#[tokio::test]
async fn test_silent_sign_in_without_token_fails_quietly() {
    let mock_server = MockServer::start().await;

    let identity = provider(&mock_server);
    let result = identity.silent_sign_in().await;
    assert!(matches!(result, Err(IdentityError::NoToken)));
    // No request was made at all
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_silent_sign_in_rejected_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tokeninfo"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_token"))
        .mount(&mock_server)
        .await;

    let identity = provider_with_token(&mock_server, "stale-tok");
    let result = identity.silent_sign_in().await;
    assert!(matches!(
        result,
        Err(IdentityError::Api { status: 400, .. })
    ));
}

// ============================================================================
// Sign-out
// ============================================================================

#[tokio::test]
async fn test_sign_out_revokes_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/revoke"))
        .and(body_string_contains("token=tok-abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let identity = provider(&mock_server);
    let result = identity
        .sign_out(Session {
            access_token: "tok-abc".to_string(),
        })
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_sign_out_revocation_failure_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/revoke"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_token"))
        .mount(&mock_server)
        .await;

    let identity = provider(&mock_server);
    let result = identity
        .sign_out(Session {
            access_token: "gone".to_string(),
        })
        .await;
    assert!(matches!(
        result,
        Err(IdentityError::Api { status: 400, .. })
    ));
}
