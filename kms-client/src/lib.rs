//! KMS Client
//!
//! Client core for the key management service: a single generic dispatcher
//! driven by static operation descriptors, a typed error taxonomy that
//! separates local faults from service faults, and a thin [`KmsClient`]
//! façade with one method per operation.
//!
//! ```no_run
//! # async fn run() -> Result<(), kms_client::KmsError> {
//! use kms_client::{types::DescribeKeyRequest, KmsClient};
//!
//! let client = KmsClient::from_env()?;
//! let key = client.describe_key(&DescribeKeyRequest::new("alias/app")).await?;
//! println!("{:?}", key.key_metadata);
//! # Ok(())
//! # }
//! ```
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


pub mod client;
pub mod codec;
pub mod credentials;
pub mod dispatcher;
pub mod error;
pub mod metadata;
pub mod operation;
pub mod ops;
pub mod retry;
pub mod signer;
pub mod transport;

pub use client::{KmsClient, KmsClientBuilder};
pub use credentials::{Credentials, CredentialsProvider, EnvironmentCredentials, StaticCredentials};
pub use dispatcher::Dispatcher;
pub use error::{ClientError, KmsError, KmsResult, ServiceError, ServiceErrorKind, TransportError};
pub use metadata::{CallId, ResponseMetadata};
pub use operation::{Operation, OperationDescriptor};
pub use retry::RetryConfig;
pub use signer::{RequestSigner, SigningContext, UnsignedSigner};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, StubTransport, Transport};

pub use kms_config::ClientConfig;
pub use kms_types as types;
