//! In-process fakes shared by the unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::Value;

use crate::error::ApiError;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::types::User;

struct Route {
    method: Method,
    target: String,
    replies: VecDeque<Result<HttpResponse, ApiError>>,
}

impl Route {
    fn matches(&self, request: &HttpRequest) -> bool {
        self.method == request.method && targets(request, &self.target)
    }
}

fn targets(request: &HttpRequest, target: &str) -> bool {
    let operation = request
        .body
        .as_ref()
        .and_then(|b| b.get("operationName"))
        .and_then(Value::as_str);
    operation == Some(target) || request.url.ends_with(target)
}

/// Scripted transport. A route matches by URL suffix or GraphQL operation
/// name; its last reply repeats once the queue is drained.
#[derive(Default)]
pub(crate) struct FakeTransport {
    routes: Mutex<Vec<Route>>,
    log: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn reply(&self, method: Method, target: &str, status: u16, body: Value) {
        self.push(method, target, Ok(HttpResponse { status, body: body.to_string() }));
    }

    pub(crate) fn fail(&self, method: Method, target: &str, err: ApiError) {
        self.push(method, target, Err(err));
    }

    fn push(&self, method: Method, target: &str, reply: Result<HttpResponse, ApiError>) {
        let mut routes = self.routes.lock().unwrap();
        if let Some(route) = routes.iter_mut().find(|r| r.method == method && r.target == target) {
            route.replies.push_back(reply);
        } else {
            routes.push(Route { method, target: target.to_owned(), replies: VecDeque::from([reply]) });
        }
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.log.lock().unwrap().clone()
    }

    /// Number of recorded requests aimed at `target`.
    pub(crate) fn count(&self, target: &str) -> usize {
        self.log.lock().unwrap().iter().filter(|r| targets(r, target)).count()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.log.lock().unwrap().push(request.clone());
        let mut routes = self.routes.lock().unwrap();
        let Some(route) = routes.iter_mut().find(|r| r.matches(&request)) else {
            return Err(ApiError::Transport(format!("no scripted reply for {}", request.url)));
        };
        if route.replies.len() > 1 {
            route.replies.pop_front().unwrap()
        } else {
            route.replies.front().cloned().unwrap()
        }
    }
}

/// Wraps a [`FakeTransport`] and holds the first request aimed at `target`
/// until the returned sender fires. The reply is taken when the request
/// arrives, so it reflects the script at that moment.
pub(crate) struct GatedTransport {
    inner: Arc<FakeTransport>,
    target: String,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl GatedTransport {
    pub(crate) fn new(inner: Arc<FakeTransport>, target: &str) -> (Arc<Self>, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let gated = Self { inner, target: target.to_owned(), gate: Mutex::new(Some(rx)) };
        (Arc::new(gated), tx)
    }
}

#[async_trait(?Send)]
impl Transport for GatedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let held = if targets(&request, &self.target) { self.gate.lock().unwrap().take() } else { None };
        let reply = self.inner.send(request).await;
        if let Some(gate) = held {
            let _ = gate.await;
        }
        reply
    }
}

pub(crate) fn user(username: &str) -> User {
    User {
        id: 1,
        username: username.to_owned(),
        email: format!("{username}@x.com"),
        provider: "local".to_owned(),
        confirmed: true,
        blocked: false,
        created_at: "2025-03-04T10:00:00.000Z".to_owned(),
        updated_at: "2025-03-04T10:00:00.000Z".to_owned(),
    }
}

pub(crate) fn user_json(username: &str) -> Value {
    serde_json::to_value(user(username)).unwrap()
}

pub(crate) fn auth_json(jwt: &str, username: &str) -> Value {
    serde_json::json!({ "jwt": jwt, "user": user_json(username) })
}
