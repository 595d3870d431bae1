//! Test doubles shared by the core integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use clarity_core::{ClarityError, CompletionBackend, CompletionRequest, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type Responder = Box<dyn Fn(&CompletionRequest) -> Result<String> + Send + Sync>;

/// Backend that answers from a closure and records every request it sees
pub struct MockBackend {
    responder: Responder,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockBackend {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&CompletionRequest) -> Result<String> + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        let text = text.to_string();
        Self::new(move |_| Ok(text.clone()))
    }

    pub fn transport_failure() -> Arc<Self> {
        Self::new(|_| Err(ClarityError::Transport("connection refused".into())))
    }

    pub fn provider_failure(message: &str) -> Arc<Self> {
        let message = message.to_string();
        Self::new(move |_| Err(ClarityError::Provider(message.clone())))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let out = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        out
    }
}
