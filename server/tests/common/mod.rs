#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use clarity_core::{ClarityError, CompletionBackend, CompletionRequest, Result};
use clarity_server::{build_router, AppState};

pub const REPLY_MODEL: &str = "reply-model";

/// Canned provider: every call gets the same outcome
pub struct StubBackend {
    outcome: fn() -> Result<String>,
    reply: Option<String>,
    calls: AtomicUsize,
    models: Mutex<Vec<Option<String>>>,
}

impl StubBackend {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: || Ok(String::new()),
            reply: Some(text.to_string()),
            calls: AtomicUsize::new(0),
            models: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(outcome: fn() -> Result<String>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            reply: None,
            calls: AtomicUsize::new(0),
            models: Mutex::new(Vec::new()),
        })
    }

    pub fn transport_failure() -> Arc<Self> {
        Self::failing(|| Err(ClarityError::Transport("connection refused".into())))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Model requested by the most recent call
    pub fn last_model(&self) -> Option<String> {
        self.models.lock().unwrap().last().cloned().flatten()
    }
}

#[async_trait]
impl CompletionBackend for StubBackend {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.models.lock().unwrap().push(request.model);
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => (self.outcome)(),
        }
    }
}

pub fn app(backend: Arc<StubBackend>) -> Router {
    build_router(AppState::new(backend, REPLY_MODEL))
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    send(app, request).await
}

/// POST with no `Content-Type` header at all
pub async fn post_untyped(app: Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(body.into())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}
