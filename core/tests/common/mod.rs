//! Shared test doubles.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tache_core::{ApiError, HttpRequest, HttpResponse, SessionStore, TacheClient, Transport};

pub const BASE_URL: &str = "http://localhost:8080/api";

/// Transport that replays scripted responses in order and records every
/// request it receives.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        });
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ApiError::Transport("no scripted response".to_string()))
    }
}

/// Client over an in-memory session and the given mock transport.
pub fn client(transport: &Arc<MockTransport>) -> TacheClient {
    TacheClient::with_transport(BASE_URL, SessionStore::in_memory(), transport.clone())
}

/// Client that already holds `token`.
pub fn authed_client(transport: &Arc<MockTransport>) -> TacheClient {
    let client = client(transport);
    client.session().set_token("test-token").unwrap();
    client
}

pub const TASK_JSON: &str = r#"{"id":1,"titre":"Courses","description":"lait, pain","complete":false}"#;
pub const AUTH_JSON: &str =
    r#"{"token":"tok-123","user":{"id":1,"email":"ana@test.fr","username":"ana"}}"#;
