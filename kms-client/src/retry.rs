//! Retry logic with exponential backoff
//!
//! Sits above the dispatcher, which itself never retries. Only idempotent
//! operations are retried, and only for faults that may clear on their own.
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


use crate::dispatcher::Dispatcher;
use crate::error::KmsResult;
use crate::operation::Operation;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Initial delay in milliseconds
    pub initial_delay_ms: u64,
    /// Maximum delay in milliseconds (cap for exponential backoff)
    pub max_delay_ms: u64,
    /// Multiplier for exponential backoff (e.g., 2.0 for doubling)
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 20_000,
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn new(max_retries: u32, initial_delay_ms: u64, max_delay_ms: u64, multiplier: f64) -> Self {
        Self {
            max_retries,
            initial_delay_ms,
            max_delay_ms,
            multiplier,
        }
    }

    /// Never retry
    pub fn disabled() -> Self {
        Self::new(0, 0, 0, 1.0)
    }

    /// Get delay for a specific retry attempt
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        // initial_delay * (multiplier ^ (attempt - 1)), capped
        let delay_ms = (self.initial_delay_ms as f64) * self.multiplier.powi((attempt - 1) as i32);
        let delay_ms = delay_ms.min(self.max_delay_ms as f64) as u64;

        Duration::from_millis(delay_ms)
    }
}

/// Invoke `Op`, retrying retryable failures of idempotent operations
///
/// Mutating operations get exactly one attempt. Shutdown and cancellation
/// end the loop immediately, including while waiting out a backoff delay.
pub async fn invoke_with_retry<Op: Operation>(
    dispatcher: &Dispatcher,
    config: &RetryConfig,
    input: &Op::Input,
) -> KmsResult<Op::Output> {
    let descriptor = Op::DESCRIPTOR;
    let max_retries = if descriptor.idempotent { config.max_retries } else { 0 };
    let mut attempt = 0;

    loop {
        let error = match dispatcher.invoke::<Op>(input).await {
            Ok(output) => {
                if attempt > 0 {
                    debug!(
                        operation = descriptor.name,
                        attempt = attempt,
                        total_attempts = attempt + 1,
                        "Operation succeeded after retry"
                    );
                }
                return Ok(output);
            }
            Err(error) => error,
        };

        if attempt >= max_retries || !error.is_retryable() || dispatcher.is_shut_down() {
            if attempt > 0 {
                warn!(
                    operation = descriptor.name,
                    attempt = attempt + 1,
                    max_retries = max_retries,
                    error = %error,
                    "Operation failed after all retries"
                );
            }
            return Err(error);
        }

        attempt += 1;
        let delay = config.delay_for_attempt(attempt);
        warn!(
            operation = descriptor.name,
            attempt = attempt,
            max_retries = max_retries,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "Operation failed, retrying with exponential backoff"
        );

        tokio::select! {
            biased;
            _ = dispatcher.cancellation_token().cancelled() => {
                return Err(dispatcher.interrupted().into());
            }
            _ = sleep(delay) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClientError, KmsError, ServiceErrorKind};
    use crate::ops::{CreateKey, DescribeKey, GenerateRandom};
    use crate::signer::UnsignedSigner;
    use crate::transport::{HttpResponse, StubTransport, TransportError};
    use kms_config::ClientConfig;
    use kms_types::{CreateKeyRequest, DescribeKeyRequest, GenerateRandomRequest};
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    fn dispatcher(transport: Arc<StubTransport>) -> Dispatcher {
        Dispatcher::new(
            ClientConfig::default(),
            transport,
            Arc::new(UnsignedSigner),
            None,
            CancellationToken::new(),
        )
    }

    fn internal_error() -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::new(500, r#"{"__type":"KMSInternalException","message":"try again"}"#))
    }

    #[test]
    fn test_retry_config_delays() {
        let config = RetryConfig::new(3, 100, 10_000, 2.0);

        assert_eq!(config.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(config.delay_for_attempt(3), Duration::from_millis(400));
    }

    #[test]
    fn test_retry_config_max_delay() {
        let config = RetryConfig::new(5, 1_000, 3_000, 2.0);

        // Should cap at max_delay_ms
        assert_eq!(config.delay_for_attempt(10), Duration::from_millis(3_000));
    }

    #[tokio::test]
    async fn test_idempotent_operation_succeeds_after_retries() {
        let transport = Arc::new(StubTransport::sequence(vec![
            Err(TransportError::Timeout("read timed out".into())),
            internal_error(),
            Ok(HttpResponse::new(200, r#"{"Plaintext":"AAECAw=="}"#)),
        ]));
        let dispatcher = dispatcher(transport.clone());

        let result = invoke_with_retry::<GenerateRandom>(
            &dispatcher,
            &RetryConfig::new(3, 0, 0, 2.0),
            &GenerateRandomRequest::with_bytes(4),
        )
        .await
        .unwrap();

        assert_eq!(result.plaintext, Some(vec![0, 1, 2, 3]));
        assert_eq!(transport.request_count().await, 3);
    }

    #[tokio::test]
    async fn test_retry_fails_after_max_retries() {
        let transport = Arc::new(StubTransport::sequence(vec![internal_error()]));
        let dispatcher = dispatcher(transport.clone());

        let result = invoke_with_retry::<DescribeKey>(
            &dispatcher,
            &RetryConfig::new(2, 0, 0, 2.0),
            &DescribeKeyRequest::new("alias/test"),
        )
        .await;

        assert_eq!(result.unwrap_err().service_kind(), Some(ServiceErrorKind::KmsInternal));
        assert_eq!(transport.request_count().await, 3); // initial + 2 retries
    }

    #[tokio::test]
    async fn test_mutating_operation_is_attempted_once() {
        let transport = Arc::new(StubTransport::sequence(vec![internal_error()]));
        let dispatcher = dispatcher(transport.clone());

        let result = invoke_with_retry::<CreateKey>(
            &dispatcher,
            &RetryConfig::new(3, 0, 0, 2.0),
            &CreateKeyRequest::default(),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(transport.request_count().await, 1);
    }

    #[tokio::test]
    async fn test_declared_client_mistakes_are_not_retried() {
        let transport = Arc::new(StubTransport::service_error(400, "NotFoundException", "no such key"));
        let dispatcher = dispatcher(transport.clone());

        let result = invoke_with_retry::<DescribeKey>(
            &dispatcher,
            &RetryConfig::new(3, 0, 0, 2.0),
            &DescribeKeyRequest::new("alias/missing"),
        )
        .await;

        assert_eq!(result.unwrap_err().service_kind(), Some(ServiceErrorKind::NotFound));
        assert_eq!(transport.request_count().await, 1);
    }

    #[tokio::test]
    async fn test_no_retry_after_shutdown() {
        let transport = Arc::new(StubTransport::sequence(vec![internal_error()]));
        let dispatcher = dispatcher(transport.clone());
        dispatcher.shutdown().await;

        let result = invoke_with_retry::<GenerateRandom>(
            &dispatcher,
            &RetryConfig::new(3, 0, 0, 2.0),
            &GenerateRandomRequest::with_bytes(8),
        )
        .await;

        assert!(matches!(result, Err(KmsError::Client(ClientError::Shutdown))));
        assert_eq!(transport.request_count().await, 0);
    }
}
