//! reqwest-backed transport
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


use super::{Headers, HttpRequest, HttpResponse, Transport, TransportError};
use crate::error::ClientError;
use async_trait::async_trait;
use kms_config::ClientConfig;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Pooled HTTPS transport
///
/// Connect and request timeouts come from [`ClientConfig`] and apply to
/// every call made through this transport.
pub struct HttpTransport {
    client: RwLock<Option<reqwest::Client>>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| ClientError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: RwLock::new(Some(client)),
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else {
        TransportError::Io(err.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        // reqwest::Client is a handle onto a shared pool
        let client = self
            .client
            .read()
            .await
            .clone()
            .ok_or(TransportError::Closed)?;

        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| TransportError::Io(format!("Invalid method {}: {}", request.method, e)))?;

        let mut builder = client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_ascii_lowercase(), value.to_string());
            }
        }
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        debug!(status = status, body_len = body.len(), "HTTP response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    async fn shutdown(&self) {
        if self.client.write().await.take().is_some() {
            info!("HTTP transport closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_execute_after_shutdown_is_closed() {
        let transport = HttpTransport::new(&ClientConfig::default()).unwrap();
        transport.shutdown().await;

        let request = HttpRequest::post("https://kms.us-east-1.amazonaws.com/", Bytes::new());
        let result = transport.execute(request).await;
        assert_eq!(result, Err(TransportError::Closed));
    }

    #[tokio::test]
    async fn test_connection_refused_is_a_connect_fault() {
        let config = ClientConfig::builder()
            .endpoint("http://127.0.0.1:1")
            .build()
            .unwrap();
        let transport = HttpTransport::new(&config).unwrap();

        let request = HttpRequest::post(config.endpoint(), Bytes::from_static(b"{}"));
        match transport.execute(request).await {
            Err(TransportError::Connect(_)) | Err(TransportError::Timeout(_)) => {}
            other => panic!("expected a connect fault, got {:?}", other),
        }
    }
}
