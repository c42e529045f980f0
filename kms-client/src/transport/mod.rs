//! Transport seam
//!
//! The dispatcher hands a fully built, signed [`HttpRequest`] to a
//! [`Transport`] and gets back whatever the service answered. Transports do
//! not interpret status codes: a 4xx or 5xx answer is still `Ok`.
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


mod http;
mod stub;

pub use http::HttpTransport;
pub use stub::StubTransport;

pub use crate::error::TransportError;

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::BTreeMap;

/// Header map with lowercase names
pub type Headers = BTreeMap<String, String>;

/// Outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    /// Absolute URL
    pub url: String,
    pub headers: Headers,
    pub body: Bytes,
}

impl HttpRequest {
    pub fn post(url: impl Into<String>, body: Bytes) -> Self {
        Self {
            method: "POST".to_string(),
            url: url.into(),
            headers: Headers::new(),
            body,
        }
    }

    /// Set a header, replacing any previous value
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// Answer received from the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes requests against the service
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Release pooled connections; later calls fail with [`TransportError::Closed`]
    async fn shutdown(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_names_are_case_insensitive() {
        let mut request = HttpRequest::post("https://kms.us-east-1.amazonaws.com/", Bytes::new());
        request.set_header("X-Amz-Target", "TrentService.ListKeys");
        assert_eq!(request.header("x-amz-target"), Some("TrentService.ListKeys"));
        assert_eq!(request.headers.keys().next().map(String::as_str), Some("x-amz-target"));

        let response = HttpResponse::new(200, "{}").with_header("X-Amzn-RequestId", "abc");
        assert_eq!(response.header("x-amzn-requestid"), Some("abc"));
        assert!(response.is_success());
        assert!(!HttpResponse::new(400, "").is_success());
    }
}
