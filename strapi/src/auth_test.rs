use super::*;
use crate::config::ApiConfig;
use crate::credentials::MemoryCredentialStore;
use crate::testing::{FakeTransport, auth_json, user_json};
use crate::transport::Method;

fn api(transport: &Arc<FakeTransport>) -> AuthApi {
    let store = Arc::new(MemoryCredentialStore::default());
    AuthApi::new(Arc::new(StrapiClient::new(
        ApiConfig::new("http://cms/api", "http://cms/graphql"),
        transport.clone(),
        store,
    )))
}

#[tokio::test]
async fn register_posts_credentials() {
    let transport = FakeTransport::new();
    transport.reply(Method::Post, "/auth/local/register", 200, auth_json("t1", "alice"));

    let resp = api(&transport)
        .register(&RegisterRequest {
            username: "alice".into(),
            email: "a@x.com".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap();

    assert_eq!(resp.jwt, "t1");
    let sent = &transport.requests()[0];
    assert_eq!(sent.url, "http://cms/api/auth/local/register");
    assert_eq!(
        sent.body,
        Some(serde_json::json!({ "username": "alice", "email": "a@x.com", "password": "secret1" }))
    );
}

#[tokio::test]
async fn login_surfaces_server_message() {
    let transport = FakeTransport::new();
    transport.reply(
        Method::Post,
        "/auth/local",
        400,
        serde_json::json!({ "error": { "status": 400, "message": "Invalid identifier or password" } }),
    );

    let err = api(&transport)
        .login(&LoginRequest { identifier: "a@x.com".into(), password: "wrong1".into() })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid identifier or password");
}

#[tokio::test]
async fn me_decodes_user() {
    let transport = FakeTransport::new();
    transport.reply(Method::Get, "/users/me", 200, user_json("alice"));
    let user = api(&transport).me().await.unwrap();
    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn forgot_password_posts_email() {
    let transport = FakeTransport::new();
    transport.reply(Method::Post, "/auth/forgot-password", 200, serde_json::json!({ "ok": true }));

    api(&transport).forgot_password("a@x.com").await.unwrap();

    assert_eq!(transport.requests()[0].body, Some(serde_json::json!({ "email": "a@x.com" })));
}

#[tokio::test]
async fn reset_password_sends_confirmation() {
    let transport = FakeTransport::new();
    transport.reply(Method::Post, "/auth/reset-password", 200, auth_json("t2", "alice"));

    let resp = api(&transport)
        .reset_password(&ResetPasswordRequest {
            code: "c0de".into(),
            password: "secret2".into(),
            password_confirmation: "secret2".into(),
        })
        .await
        .unwrap();

    assert_eq!(resp.jwt, "t2");
    let body = transport.requests()[0].body.clone().unwrap();
    assert_eq!(body["passwordConfirmation"], "secret2");
}
