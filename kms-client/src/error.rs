//! Error types for the KMS client
//!
//! Every failed call surfaces as a [`KmsError`], which is either a local
//! fault ([`ClientError`]: the request never produced a service answer) or a
//! service fault ([`ServiceError`]: the service answered with an error
//! envelope). Service faults are classified into a [`ServiceErrorKind`]
//! against the whitelist the operation declares.
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


use bytes::Bytes;
use std::fmt;
use thiserror::Error;

macro_rules! service_error_kinds {
    ($($variant:ident => $code:literal,)+) => {
        /// Failure kinds the service documents
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ServiceErrorKind {
            $($variant,)+
            /// Code absent, unparseable, or not declared by the operation
            Unmodeled,
        }

        impl ServiceErrorKind {
            /// Every modeled kind, `Unmodeled` excluded
            pub const MODELED: &'static [ServiceErrorKind] = &[$(ServiceErrorKind::$variant,)+];

            /// Wire code of this kind, `None` for `Unmodeled`
            pub fn code(&self) -> Option<&'static str> {
                match self {
                    $(ServiceErrorKind::$variant => Some($code),)+
                    ServiceErrorKind::Unmodeled => None,
                }
            }

            /// Kind for a sanitized wire code, regardless of operation
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(ServiceErrorKind::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

service_error_kinds! {
    AlreadyExists => "AlreadyExistsException",
    CloudHsmClusterInUse => "CloudHsmClusterInUseException",
    CloudHsmClusterInvalidConfiguration => "CloudHsmClusterInvalidConfigurationException",
    CloudHsmClusterNotActive => "CloudHsmClusterNotActiveException",
    CloudHsmClusterNotFound => "CloudHsmClusterNotFoundException",
    CloudHsmClusterNotRelated => "CloudHsmClusterNotRelatedException",
    CustomKeyStoreHasCmks => "CustomKeyStoreHasCMKsException",
    CustomKeyStoreInvalidState => "CustomKeyStoreInvalidStateException",
    CustomKeyStoreNameInUse => "CustomKeyStoreNameInUseException",
    CustomKeyStoreNotFound => "CustomKeyStoreNotFoundException",
    DependencyTimeout => "DependencyTimeoutException",
    Disabled => "DisabledException",
    DryRunOperation => "DryRunOperationException",
    ExpiredImportToken => "ExpiredImportTokenException",
    IncorrectKey => "IncorrectKeyException",
    IncorrectKeyMaterial => "IncorrectKeyMaterialException",
    IncorrectTrustAnchor => "IncorrectTrustAnchorException",
    InvalidAliasName => "InvalidAliasNameException",
    InvalidArn => "InvalidArnException",
    InvalidCiphertext => "InvalidCiphertextException",
    InvalidGrantId => "InvalidGrantIdException",
    InvalidGrantToken => "InvalidGrantTokenException",
    InvalidImportToken => "InvalidImportTokenException",
    InvalidKeyUsage => "InvalidKeyUsageException",
    InvalidMarker => "InvalidMarkerException",
    KeyUnavailable => "KeyUnavailableException",
    KmsInternal => "KMSInternalException",
    KmsInvalidMac => "KMSInvalidMacException",
    KmsInvalidSignature => "KMSInvalidSignatureException",
    KmsInvalidState => "KMSInvalidStateException",
    LimitExceeded => "LimitExceededException",
    MalformedPolicyDocument => "MalformedPolicyDocumentException",
    NotFound => "NotFoundException",
    Tag => "TagException",
    UnsupportedOperation => "UnsupportedOperationException",
}

impl fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code().unwrap_or("Unmodeled"))
    }
}

/// Codes the service uses for request throttling
const THROTTLING_CODES: &[&str] = &[
    "ThrottlingException",
    "Throttling",
    "ThrottledException",
    "TooManyRequestsException",
    "RequestLimitExceeded",
    "RequestThrottled",
    "RequestThrottledException",
];

/// Failure raised below the service: the call produced no service answer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Transport closed")]
    Closed,
}

/// Local fault
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Call cancelled")]
    Cancelled,

    #[error("Client has been shut down")]
    Shutdown,

    #[error("Failed to serialize request: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to resolve credentials: {0}")]
    Credentials(String),

    #[error("Failed to sign request: {0}")]
    Signing(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl From<kms_config::ConfigError> for ClientError {
    fn from(err: kms_config::ConfigError) -> Self {
        ClientError::Configuration(err.to_string())
    }
}

/// Service fault: an error envelope returned by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    /// Operation that failed
    pub operation: &'static str,
    pub kind: ServiceErrorKind,
    /// Sanitized code as sent by the service, kept even when unmodeled
    pub code: Option<String>,
    pub message: Option<String>,
    pub status: u16,
    pub request_id: Option<String>,
    /// Raw response body
    pub body: Bytes,
}

impl ServiceError {
    pub fn is_throttling(&self) -> bool {
        self.status == 429
            || self
                .code
                .as_deref()
                .map(|code| THROTTLING_CODES.contains(&code))
                .unwrap_or(false)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed: {} (HTTP {})",
            self.operation,
            self.code.as_deref().unwrap_or("unknown error"),
            self.status
        )?;
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " [request id {}]", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ServiceError {}

/// Failure of a KMS call
#[derive(Error, Debug)]
pub enum KmsError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<TransportError> for KmsError {
    fn from(err: TransportError) -> Self {
        KmsError::Client(ClientError::Transport(err))
    }
}

impl KmsError {
    pub fn is_client_fault(&self) -> bool {
        matches!(self, KmsError::Client(_))
    }

    pub fn is_service_fault(&self) -> bool {
        matches!(self, KmsError::Service(_))
    }

    /// Classified kind of a service fault
    pub fn service_kind(&self) -> Option<ServiceErrorKind> {
        match self {
            KmsError::Service(err) => Some(err.kind),
            KmsError::Client(_) => None,
        }
    }

    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            KmsError::Service(err) => Some(err),
            KmsError::Client(_) => None,
        }
    }

    /// Request id of the failed call, when the service answered
    pub fn request_id(&self) -> Option<&str> {
        self.service_error().and_then(|err| err.request_id.as_deref())
    }

    /// Whether the same call may succeed if issued again
    pub fn is_retryable(&self) -> bool {
        match self {
            KmsError::Client(ClientError::Transport(err)) => {
                matches!(err, TransportError::Connect(_) | TransportError::Timeout(_))
            }
            KmsError::Client(_) => false,
            KmsError::Service(err) => match err.kind {
                ServiceErrorKind::DependencyTimeout
                | ServiceErrorKind::KmsInternal
                | ServiceErrorKind::KeyUnavailable => true,
                ServiceErrorKind::Unmodeled => err.is_server_error() || err.is_throttling(),
                _ => false,
            },
        }
    }
}

pub type KmsResult<T> = Result<T, KmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn service_error(kind: ServiceErrorKind, code: Option<&str>, status: u16) -> KmsError {
        KmsError::Service(ServiceError {
            operation: "DescribeKey",
            kind,
            code: code.map(str::to_string),
            message: Some("boom".to_string()),
            status,
            request_id: Some("req-1".to_string()),
            body: Bytes::new(),
        })
    }

    #[test]
    fn test_codes_round_trip() {
        for kind in ServiceErrorKind::MODELED {
            let code = kind.code().unwrap();
            assert_eq!(ServiceErrorKind::from_code(code), Some(*kind));
        }
        assert_eq!(ServiceErrorKind::Unmodeled.code(), None);
        assert_eq!(ServiceErrorKind::from_code("ValidationException"), None);
    }

    #[test]
    fn test_fault_sides() {
        let local = KmsError::from(ClientError::Shutdown);
        assert!(local.is_client_fault());
        assert!(!local.is_service_fault());
        assert_eq!(local.service_kind(), None);

        let remote = service_error(ServiceErrorKind::NotFound, Some("NotFoundException"), 400);
        assert!(remote.is_service_fault());
        assert_eq!(remote.service_kind(), Some(ServiceErrorKind::NotFound));
        assert_eq!(remote.request_id(), Some("req-1"));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(KmsError::from(TransportError::Timeout("read".into())).is_retryable());
        assert!(KmsError::from(TransportError::Connect("refused".into())).is_retryable());
        assert!(!KmsError::from(TransportError::Closed).is_retryable());
        assert!(!KmsError::from(ClientError::Cancelled).is_retryable());
        assert!(!KmsError::from(ClientError::Shutdown).is_retryable());

        assert!(service_error(ServiceErrorKind::KmsInternal, Some("KMSInternalException"), 500).is_retryable());
        assert!(service_error(ServiceErrorKind::Unmodeled, None, 503).is_retryable());
        assert!(service_error(ServiceErrorKind::Unmodeled, Some("ThrottlingException"), 400).is_retryable());
        assert!(!service_error(ServiceErrorKind::NotFound, Some("NotFoundException"), 400).is_retryable());
        assert!(!service_error(ServiceErrorKind::Unmodeled, Some("ValidationException"), 400).is_retryable());
    }

    #[test]
    fn test_service_error_display() {
        let err = service_error(ServiceErrorKind::NotFound, Some("NotFoundException"), 404);
        assert_eq!(
            err.to_string(),
            "DescribeKey failed: NotFoundException (HTTP 404): boom [request id req-1]"
        );
    }
}
