use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::GenerateError;
use crate::request::GenerateRequest;

use super::{ContentApi, GeneratedContent};

/// Queue-backed `ContentApi`. With a gate installed, every call records
/// itself and then stays pending until the gate is notified.
#[derive(Default)]
pub struct MockClient {
    responses: Mutex<VecDeque<Result<GeneratedContent, GenerateError>>>,
    calls: Mutex<Vec<GenerateRequest>>,
    gate: Option<Arc<Notify>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self { gate: Some(gate), ..Self::default() }
    }

    pub fn push_response(&self, resp: Result<GeneratedContent, GenerateError>) {
        self.responses.lock().unwrap().push_back(resp);
    }

    pub fn calls(&self) -> Vec<GenerateRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentApi for MockClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GeneratedContent, GenerateError> {
        self.calls.lock().unwrap().push(request);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerateError::Transport("mock client response queue is empty".into())))
    }
}
