//! In-memory transport
//!
//! Answers every request through a caller-supplied responder and records
//! what it was sent. Used by the test suites and for offline runs.
// Copyright 2025 Francisco F. Pinochet
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use super::{HttpRequest, HttpResponse, Transport, TransportError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

type Responder = dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync;

pub struct StubTransport {
    responder: Arc<Responder>,
    delay: Option<Duration>,
    requests: Mutex<Vec<HttpRequest>>,
    shut_down: AtomicBool,
}

impl StubTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            delay: None,
            requests: Mutex::new(Vec::new()),
            shut_down: AtomicBool::new(false),
        }
    }

    /// Answer every request with the same status and JSON body
    pub fn responding(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::new(move |_| Ok(HttpResponse::new(status, body.clone())))
    }

    /// Answer with an error envelope carrying `code` in `__type`
    pub fn service_error(status: u16, code: &str, message: &str) -> Self {
        let body = serde_json::json!({ "__type": code, "message": message }).to_string();
        Self::new(move |_| {
            Ok(HttpResponse::new(status, body.clone()).with_header("x-amzn-RequestId", "stub-request"))
        })
    }

    /// Fail every request below the service
    pub fn failing(error: TransportError) -> Self {
        Self::new(move |_| Err(error.clone()))
    }

    /// Answer with `responses` in order, repeating the last one once exhausted
    pub fn sequence(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
        let next = AtomicUsize::new(0);
        Self::new(move |_| {
            let index = next.fetch_add(1, Ordering::SeqCst);
            responses
                .get(index)
                .or_else(|| responses.last())
                .cloned()
                .unwrap_or(Err(TransportError::Closed))
        })
    }

    /// Hold every answer back for `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far, oldest first
    pub async fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().await.last().cloned()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        if self.is_shut_down() {
            return Err(TransportError::Closed);
        }

        self.requests.lock().await.push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        (self.responder)(&request)
    }

    async fn shutdown(&self) {
        self.shut_down.store(true, Ordering::SeqCst);
    }
}
