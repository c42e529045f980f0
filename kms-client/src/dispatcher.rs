//! Operation dispatcher
//!
//! One generic path for every operation: encode the request, sign it, hand
//! it to the transport, then decode either the typed result or the error
//! envelope. The dispatcher never retries and never validates inputs beyond
//! what the request types already enforce.
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


use crate::codec::{self, CONTENT_TYPE, REQUEST_ID_HEADER, TARGET_HEADER};
use crate::credentials::CredentialsProvider;
use crate::error::{ClientError, KmsError, KmsResult, ServiceError, ServiceErrorKind};
use crate::metadata::{CallId, ResponseMetadata, ResponseMetadataCache};
use crate::operation::{Operation, OperationDescriptor};
use crate::signer::{RequestSigner, SigningContext, SIGNING_NAME};
use crate::transport::{HttpRequest, HttpResponse, Transport};
use chrono::Utc;
use kms_config::ClientConfig;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub struct Dispatcher {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    signer: Arc<dyn RequestSigner>,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    metadata: ResponseMetadataCache,
    cancel: CancellationToken,
    shut_down: AtomicBool,
}

impl Dispatcher {
    /// Create a dispatcher
    ///
    /// Cancelling `cancel` aborts every in-flight and future call. The
    /// dispatcher works on a child of it, so [`Dispatcher::shutdown`] never
    /// cancels the caller's token.
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        signer: Arc<dyn RequestSigner>,
        credentials: Option<Arc<dyn CredentialsProvider>>,
        cancel: CancellationToken,
    ) -> Self {
        let metadata = ResponseMetadataCache::new(
            config.metadata_cache_ttl(),
            config.metadata_cache_capacity(),
        );

        Self {
            config,
            transport,
            signer,
            credentials,
            metadata,
            cancel: cancel.child_token(),
            shut_down: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Invoke `Op` with an explicit request
    pub async fn invoke<Op: Operation>(&self, input: &Op::Input) -> KmsResult<Op::Output> {
        self.invoke_tracked::<Op>(input).await.1
    }

    /// Invoke `Op` with its default request
    ///
    /// Sends exactly what `invoke(&Default::default())` sends.
    pub async fn invoke_default<Op>(&self) -> KmsResult<Op::Output>
    where
        Op: Operation,
        Op::Input: Default,
    {
        self.invoke::<Op>(&Op::Input::default()).await
    }

    /// Invoke `Op` and return the id its response metadata is cached under
    pub async fn invoke_tracked<Op: Operation>(
        &self,
        input: &Op::Input,
    ) -> (CallId, KmsResult<Op::Output>) {
        let call_id = CallId::new();
        let result = self.dispatch::<Op>(call_id, input).await;
        (call_id, result)
    }

    /// Metadata of a recent answered call
    pub async fn response_metadata(&self, call_id: &CallId) -> Option<ResponseMetadata> {
        self.metadata.get(call_id).await
    }

    /// Stop accepting calls, abort in-flight ones and release the transport
    pub async fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return;
        }

        self.cancel.cancel();
        self.transport.shutdown().await;
        self.metadata.clear().await;

        info!(endpoint = self.config.endpoint(), "KMS client shut down");
    }

    async fn dispatch<Op: Operation>(
        &self,
        call_id: CallId,
        input: &Op::Input,
    ) -> KmsResult<Op::Output> {
        let descriptor = Op::DESCRIPTOR;

        if self.is_shut_down() {
            debug!(operation = descriptor.name, call_id = %call_id, "Call rejected, client is shut down");
            return Err(ClientError::Shutdown.into());
        }

        let call = async {
            let request = self.build_request(&descriptor, input).await?;
            let started = Instant::now();
            let response = self.transport.execute(request).await?;
            Ok::<_, KmsError>((response, started.elapsed()))
        };

        let (response, latency) = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!(operation = descriptor.name, call_id = %call_id, "Call interrupted");
                return Err(self.interrupted().into());
            }
            outcome = call => outcome?,
        };

        let request_id = response.header(REQUEST_ID_HEADER).map(str::to_string);
        self.metadata
            .insert(
                call_id,
                ResponseMetadata {
                    request_id: request_id.clone(),
                    operation: descriptor.name,
                    status: response.status,
                    latency,
                    received_at: Utc::now(),
                },
            )
            .await;

        if response.is_success() {
            debug!(
                operation = descriptor.name,
                call_id = %call_id,
                status = response.status,
                latency_ms = latency.as_millis() as u64,
                "Call succeeded"
            );
            return codec::decode_response::<Op::Output>(&response.body).map_err(KmsError::from);
        }

        let error = service_error(&descriptor, response, request_id);
        warn!(
            operation = descriptor.name,
            call_id = %call_id,
            status = error.status,
            code = error.code.as_deref().unwrap_or("none"),
            kind = %error.kind,
            request_id = error.request_id.as_deref().unwrap_or("none"),
            "Service returned an error"
        );
        Err(error.into())
    }

    async fn build_request<T: Serialize>(
        &self,
        descriptor: &OperationDescriptor,
        input: &T,
    ) -> Result<HttpRequest, ClientError> {
        let body = codec::encode_request(input)?;

        let mut request = HttpRequest::post(format!("{}/", self.config.endpoint()), body);
        request.set_header("content-type", CONTENT_TYPE);
        request.set_header(TARGET_HEADER, descriptor.target());

        let credentials = match &self.credentials {
            Some(provider) => Some(provider.credentials().await?),
            None => None,
        };

        let context = SigningContext {
            region: self.config.region(),
            service: SIGNING_NAME,
            host: self.config.endpoint_host(),
            credentials: credentials.as_ref(),
            time: Utc::now(),
        };
        self.signer.sign(&mut request, &context)?;

        Ok(request)
    }

    pub(crate) fn interrupted(&self) -> ClientError {
        if self.is_shut_down() {
            ClientError::Shutdown
        } else {
            ClientError::Cancelled
        }
    }
}

fn service_error(
    descriptor: &OperationDescriptor,
    response: HttpResponse,
    request_id: Option<String>,
) -> ServiceError {
    let envelope = codec::decode_error(&response);
    let kind = envelope
        .code
        .as_deref()
        .map(|code| descriptor.classify(code))
        .unwrap_or(ServiceErrorKind::Unmodeled);

    ServiceError {
        operation: descriptor.name,
        kind,
        code: envelope.code,
        message: envelope.message,
        status: response.status,
        request_id,
        body: response.body,
    }
}
