use super::*;
use crate::credentials::MemoryCredentialStore;
use crate::testing::{FakeTransport, auth_json, user};
use crate::transport::Method;

fn setup() -> (Arc<FakeTransport>, Arc<MemoryCredentialStore>, StrapiClient) {
    let transport = FakeTransport::new();
    let store = Arc::new(MemoryCredentialStore::default());
    let client = StrapiClient::new(ApiConfig::new("http://cms/api", "http://cms/graphql"), transport.clone(), store.clone());
    (transport, store, client)
}

fn signed_in(client: &StrapiClient) {
    client.sign_in(&AuthResponse { jwt: "t1".into(), user: user("alice") });
}

#[tokio::test]
async fn attaches_bearer_when_token_present() {
    let (transport, _store, client) = setup();
    signed_in(&client);
    transport.reply(Method::Get, "/users/me", 200, serde_json::json!({}));

    let _: serde_json::Value = client.get("/users/me").await.unwrap();

    let sent = transport.requests();
    assert_eq!(sent[0].url, "http://cms/api/users/me");
    assert_eq!(sent[0].header_value("authorization"), Some("Bearer t1"));
}

#[tokio::test]
async fn omits_bearer_without_token() {
    let (transport, _store, client) = setup();
    transport.reply(Method::Post, "/auth/local", 200, auth_json("t1", "alice"));

    let _: AuthResponse = client
        .post("/auth/local", &serde_json::json!({ "identifier": "a@x.com", "password": "p" }))
        .await
        .unwrap();

    assert_eq!(transport.requests()[0].header_value("authorization"), None);
}

#[tokio::test]
async fn unauthorized_clears_store_and_redirects_once() {
    let (transport, store, client) = setup();
    signed_in(&client);
    transport.reply(Method::Get, "/users/me", 401, serde_json::json!({}));

    let first = client.get::<serde_json::Value>("/users/me").await.unwrap_err();
    let second = client.get::<serde_json::Value>("/users/me").await.unwrap_err();

    assert_eq!(first, ApiError::Unauthorized);
    assert_eq!(second, ApiError::Unauthorized);
    assert_eq!(store.token(), None);
    assert_eq!(store.user(), None);
    assert_eq!(client.take_redirect(), Some(Navigation::SignIn));
    assert_eq!(client.take_redirect(), None);
    // No retry: exactly the two calls made by the test.
    assert_eq!(transport.count("/users/me"), 2);
}

#[tokio::test]
async fn sign_in_rearms_redirect_latch() {
    let (transport, _store, client) = setup();
    transport.reply(Method::Get, "/users/me", 401, serde_json::json!({}));

    signed_in(&client);
    let _ = client.get::<serde_json::Value>("/users/me").await;
    assert!(client.take_redirect().is_some());

    signed_in(&client);
    let _ = client.get::<serde_json::Value>("/users/me").await;
    assert!(client.take_redirect().is_some());
}

#[tokio::test]
async fn other_statuses_keep_credentials() {
    let (transport, store, client) = setup();
    signed_in(&client);
    transport.reply(
        Method::Get,
        "/users/me",
        500,
        serde_json::json!({ "error": { "message": "boom" } }),
    );

    let err = client.get::<serde_json::Value>("/users/me").await.unwrap_err();

    assert_eq!(err, ApiError::Status { status: 500, message: "boom".into() });
    assert_eq!(store.token().as_deref(), Some("t1"));
    assert_eq!(client.take_redirect(), None);
}

#[tokio::test]
async fn sign_out_makes_no_request() {
    let (transport, store, client) = setup();
    signed_in(&client);
    client.sign_out();
    assert!(!client.has_token());
    assert_eq!(store.user(), None);
    assert!(transport.requests().is_empty());
}
