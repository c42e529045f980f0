//! Request signing seam
//!
//! Signing happens after the request is fully built and before it reaches
//! the transport. Only [`UnsignedSigner`] ships with this crate; deployments
//! that talk to the real service plug in their own [`RequestSigner`].
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


use crate::credentials::Credentials;
use crate::error::ClientError;
use crate::transport::HttpRequest;
use chrono::{DateTime, Utc};

/// Signing name of the service
pub const SIGNING_NAME: &str = "kms";

/// Everything a signer may need besides the request itself
#[derive(Debug, Clone)]
pub struct SigningContext<'a> {
    pub region: &'a str,
    pub service: &'a str,
    /// Endpoint host, as it appears in the `host` header
    pub host: &'a str,
    /// Resolved credentials, when a provider is configured
    pub credentials: Option<&'a Credentials>,
    pub time: DateTime<Utc>,
}

pub trait RequestSigner: Send + Sync {
    fn sign(&self, request: &mut HttpRequest, context: &SigningContext<'_>) -> Result<(), ClientError>;
}

/// Leaves requests untouched, for local emulators that skip authentication
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsignedSigner;

impl RequestSigner for UnsignedSigner {
    fn sign(&self, _request: &mut HttpRequest, _context: &SigningContext<'_>) -> Result<(), ClientError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_unsigned_signer_is_a_no_op() {
        let mut request = HttpRequest::post("http://localhost:4566/", Bytes::from_static(b"{}"));
        request.set_header("x-amz-target", "TrentService.ListKeys");
        let before = request.clone();

        let context = SigningContext {
            region: "us-east-1",
            service: SIGNING_NAME,
            host: "localhost:4566",
            credentials: None,
            time: Utc::now(),
        };
        UnsignedSigner.sign(&mut request, &context).unwrap();

        assert_eq!(request, before);
    }
}
