//! Auth client integration tests against a mocked identity provider

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{bearer_token, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use campushub::config::AuthConfig;
use campushub::services::auth::AuthClient;
use campushub::utils::errors::{AuthError, CampusHubError};

fn client_for(server: &MockServer) -> AuthClient {
    AuthClient::new(AuthConfig {
        api_url: server.uri(),
        timeout_seconds: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn resolves_identity_for_valid_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .and(bearer_token("token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "email": "sam@campus.edu",
            "display_name": "Sam"
        })))
        .mount(&server)
        .await;

    let identity = client_for(&server).current_user("token-123").await.unwrap();
    assert_eq!(identity.id, 42);
    assert_eq!(identity.resolved_name(), "Sam");
}

#[tokio::test]
async fn unauthorized_token_maps_to_no_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client_for(&server).current_user("stale-token").await;
    assert_matches!(result, Err(CampusHubError::AuthService(AuthError::NoSession)));
}

#[tokio::test]
async fn malformed_identity_body_is_an_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client_for(&server).current_user("token-123").await;
    assert_matches!(
        result,
        Err(CampusHubError::AuthService(AuthError::InvalidResponse(_)))
    );
}

#[tokio::test]
async fn upstream_failure_is_reported_with_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client_for(&server).current_user("token-123").await;
    assert_matches!(
        result,
        Err(CampusHubError::AuthService(AuthError::RequestFailed(_)))
    );
}

#[tokio::test]
async fn sign_out_posts_to_the_auth_service() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/signout"))
        .and(bearer_token("token-123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).sign_out("token-123").await.unwrap();
}
