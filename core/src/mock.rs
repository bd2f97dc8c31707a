//! In-memory `Transport` for tests.
//!
//! Answers requests from a queue of scripted responses and records every
//! request it receives, so callers can assert both what was sent and how
//! many round-trips happened. Enabled for other crates through the
//! `test-utils` feature.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

#[derive(Debug, Default)]
struct Script {
    responses: VecDeque<Result<HttpResponse, ApiError>>,
    requests: Vec<HttpRequest>,
}

/// Clones share the same script, so a test can keep a handle after moving
/// one into a controller.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response.
    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        self.push(Ok(HttpResponse::new(status, body)));
        self
    }

    /// Queue a response whose body is `value` encoded as JSON.
    pub fn respond_json<T: Serialize>(&self, status: u16, value: &T) -> &Self {
        let body = serde_json::to_string(value).unwrap();
        self.respond(status, body)
    }

    /// Queue a failure that produces no response.
    pub fn fail(&self, error: ApiError) -> &Self {
        self.push(Err(error));
        self
    }

    /// Every request executed so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.script.lock().unwrap().requests.len()
    }

    fn push(&self, response: Result<HttpResponse, ApiError>) {
        self.script.lock().unwrap().responses.push_back(response);
    }
}

impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut script = self.script.lock().unwrap();
        script.requests.push(request);
        script
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response left".to_string())))
    }
}
