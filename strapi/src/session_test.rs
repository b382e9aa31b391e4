use super::*;
use std::sync::OnceLock;

use async_trait::async_trait;

use crate::client::StrapiClient;
use crate::clock::ManualClock;
use crate::config::ApiConfig;
use crate::credentials::{CredentialStore, MemoryCredentialStore};
use crate::error::ApiError;
use crate::testing::{FakeTransport, GatedTransport, user, user_json};
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

struct Fixture {
    transport: Arc<FakeTransport>,
    store: Arc<MemoryCredentialStore>,
    clock: Arc<ManualClock>,
    api: AuthApi,
    cache: SessionCache,
}

fn fixture() -> Fixture {
    let transport = FakeTransport::new();
    let store = Arc::new(MemoryCredentialStore::default());
    let clock = Arc::new(ManualClock::new(Duration::from_secs(1_000)));
    let client = StrapiClient::new(ApiConfig::default(), transport.clone(), store.clone());
    let api = AuthApi::new(Arc::new(client));
    let cache = SessionCache::new(clock.clone());
    Fixture { transport, store, clock, api, cache }
}

#[tokio::test]
async fn no_token_is_invalid_without_request() {
    let f = fixture();
    let state = f.cache.resolve(&f.api, Revalidate::Mount).await;
    assert_eq!(state, SessionState::Invalid);
    assert!(f.transport.requests().is_empty());
}

#[tokio::test]
async fn token_resolves_current_user() {
    let f = fixture();
    f.store.set_token("t1");
    f.transport.reply(Method::Get, "/users/me", 200, user_json("alice"));

    let state = f.cache.resolve(&f.api, Revalidate::Mount).await;

    assert_eq!(state.user().map(|u| u.username.as_str()), Some("alice"));
    assert_eq!(f.store.user().map(|u| u.username), Some("alice".to_owned()));
}

#[tokio::test]
async fn fresh_user_is_reused_within_window() {
    let f = fixture();
    f.store.set_token("t1");
    f.transport.reply(Method::Get, "/users/me", 200, user_json("alice"));

    f.cache.resolve(&f.api, Revalidate::Mount).await;
    f.clock.advance(Duration::from_secs(4 * 60));
    f.cache.resolve(&f.api, Revalidate::Focus).await;
    assert_eq!(f.transport.count("/users/me"), 1);

    f.clock.advance(Duration::from_secs(2 * 60));
    f.cache.resolve(&f.api, Revalidate::Focus).await;
    assert_eq!(f.transport.count("/users/me"), 2);
}

#[tokio::test]
async fn failure_clears_token_and_is_not_retried() {
    let f = fixture();
    f.store.set_token("t1");
    f.transport.fail(Method::Get, "/users/me", ApiError::Transport("offline".into()));

    let state = f.cache.resolve(&f.api, Revalidate::Mount).await;

    assert_eq!(state, SessionState::Invalid);
    assert_eq!(f.store.token(), None);
    assert_eq!(f.transport.count("/users/me"), 1);
}

#[tokio::test]
async fn unauthorized_invalidates_session() {
    let f = fixture();
    f.store.set_token("expired");
    f.transport.reply(Method::Get, "/users/me", 401, serde_json::json!({}));

    let state = f.cache.resolve(&f.api, Revalidate::Focus).await;

    assert_eq!(state, SessionState::Invalid);
    assert_eq!(f.store.token(), None);
}

#[tokio::test]
async fn primed_user_skips_request() {
    let f = fixture();
    f.store.set_token("t1");
    f.cache.prime(user("alice"));

    let state = f.cache.resolve(&f.api, Revalidate::Mount).await;

    assert_eq!(state.user().map(|u| u.username.as_str()), Some("alice"));
    assert!(f.transport.requests().is_empty());
}

#[tokio::test]
async fn missing_token_voids_primed_user() {
    let f = fixture();
    f.cache.prime(user("alice"));
    let state = f.cache.resolve(&f.api, Revalidate::Focus).await;
    assert_eq!(state, SessionState::Invalid);
    assert!(!f.cache.is_fresh());
}

// =============================================================================
// superseded responses
// =============================================================================

/// Invalidates the cache while the `/users/me` request is in flight.
struct LogoutDuringFetch {
    cache: OnceLock<Arc<SessionCache>>,
}

#[async_trait(?Send)]
impl Transport for LogoutDuringFetch {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if let Some(cache) = self.cache.get() {
            cache.invalidate();
        }
        Ok(HttpResponse { status: 200, body: user_json("alice").to_string() })
    }
}

#[tokio::test]
async fn late_response_does_not_resurrect_session() {
    let transport = Arc::new(LogoutDuringFetch { cache: OnceLock::new() });
    let store = Arc::new(MemoryCredentialStore::default());
    store.set_token("t1");
    let api = AuthApi::new(Arc::new(StrapiClient::new(ApiConfig::default(), transport.clone(), store)));
    let cache = Arc::new(SessionCache::new(Arc::new(ManualClock::default())));
    assert!(transport.cache.set(cache.clone()).is_ok());

    let state = cache.resolve(&api, Revalidate::Mount).await;

    assert_eq!(state, SessionState::Invalid);
    assert_eq!(cache.state(), SessionState::Invalid);
}

#[tokio::test]
async fn overlapping_resolves_share_one_request() {
    let transport = FakeTransport::new();
    transport.reply(Method::Get, "/users/me", 200, user_json("alice"));
    let (gated, release) = GatedTransport::new(transport.clone(), "/users/me");
    let store = Arc::new(MemoryCredentialStore::default());
    store.set_token("t1");
    let api = AuthApi::new(Arc::new(StrapiClient::new(ApiConfig::default(), gated, store)));
    let cache = SessionCache::new(Arc::new(ManualClock::default()));

    let mut mount = Box::pin(cache.resolve(&api, Revalidate::Mount));
    assert!(futures::poll!(&mut mount).is_pending());
    assert_eq!(cache.state(), SessionState::Loading);
    let mut focus = Box::pin(cache.resolve(&api, Revalidate::Focus));
    assert!(futures::poll!(&mut focus).is_pending());

    release.send(()).unwrap();
    let (first, second) = tokio::join!(mount, focus);

    assert_eq!(first.user().map(|u| u.username.as_str()), Some("alice"));
    assert_eq!(second, first);
    assert_eq!(transport.count("/users/me"), 1);
}

#[tokio::test]
async fn waiter_sees_logout_during_lookup() {
    let transport = FakeTransport::new();
    transport.reply(Method::Get, "/users/me", 200, user_json("alice"));
    let (gated, release) = GatedTransport::new(transport.clone(), "/users/me");
    let store = Arc::new(MemoryCredentialStore::default());
    store.set_token("t1");
    let api = AuthApi::new(Arc::new(StrapiClient::new(ApiConfig::default(), gated, store)));
    let cache = SessionCache::new(Arc::new(ManualClock::default()));

    let mut mount = Box::pin(cache.resolve(&api, Revalidate::Mount));
    assert!(futures::poll!(&mut mount).is_pending());
    let mut focus = Box::pin(cache.resolve(&api, Revalidate::Focus));
    assert!(futures::poll!(&mut focus).is_pending());

    cache.invalidate();
    assert_eq!(focus.await, SessionState::Invalid);

    release.send(()).unwrap();
    assert_eq!(mount.await, SessionState::Invalid);
    assert_eq!(cache.state(), SessionState::Invalid);
}
