//! Cryptographic operation shapes: encryption, data keys, random bytes,
//! signatures, MACs and key agreement
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


use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::EncryptionContext;

/// Attested enclave that should receive the response encrypted to its key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecipientInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_encryption_algorithm: Option<String>,
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub attestation_document: Option<Vec<u8>>,
}

// ============================================================================
// Encrypt / Decrypt / ReEncrypt
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EncryptRequest {
    pub key_id: String,
    #[serde(with = "crate::blob")]
    pub plaintext: Vec<u8>,
    #[serde(default, skip_serializing_if = "EncryptionContext::is_empty")]
    pub encryption_context: EncryptionContext,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_algorithm: Option<EncryptionAlgorithm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl EncryptRequest {
    pub fn new(key_id: impl Into<String>, plaintext: impl Into<Vec<u8>>) -> Self {
        Self {
            key_id: key_id.into(),
            plaintext: plaintext.into(),
            encryption_context: EncryptionContext::new(),
            grant_tokens: Vec::new(),
            encryption_algorithm: None,
            dry_run: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EncryptResponse {
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub ciphertext_blob: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_algorithm: Option<EncryptionAlgorithm>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DecryptRequest {
    #[serde(with = "crate::blob")]
    pub ciphertext_blob: Vec<u8>,
    #[serde(default, skip_serializing_if = "EncryptionContext::is_empty")]
    pub encryption_context: EncryptionContext,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
    /// Required for asymmetric keys; symmetric ciphertext names its own key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_algorithm: Option<EncryptionAlgorithm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<RecipientInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl DecryptRequest {
    pub fn new(ciphertext_blob: impl Into<Vec<u8>>) -> Self {
        Self {
            ciphertext_blob: ciphertext_blob.into(),
            encryption_context: EncryptionContext::new(),
            grant_tokens: Vec::new(),
            key_id: None,
            encryption_algorithm: None,
            recipient: None,
            dry_run: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DecryptResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub plaintext: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_algorithm: Option<EncryptionAlgorithm>,
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub ciphertext_for_recipient: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReEncryptRequest {
    #[serde(with = "crate::blob")]
    pub ciphertext_blob: Vec<u8>,
    pub destination_key_id: String,
    #[serde(default, skip_serializing_if = "EncryptionContext::is_empty")]
    pub source_encryption_context: EncryptionContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "EncryptionContext::is_empty")]
    pub destination_encryption_context: EncryptionContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_encryption_algorithm: Option<EncryptionAlgorithm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_encryption_algorithm: Option<EncryptionAlgorithm>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl ReEncryptRequest {
    pub fn new(ciphertext_blob: impl Into<Vec<u8>>, destination_key_id: impl Into<String>) -> Self {
        Self {
            ciphertext_blob: ciphertext_blob.into(),
            destination_key_id: destination_key_id.into(),
            source_encryption_context: EncryptionContext::new(),
            source_key_id: None,
            destination_encryption_context: EncryptionContext::new(),
            source_encryption_algorithm: None,
            destination_encryption_algorithm: None,
            grant_tokens: Vec::new(),
            dry_run: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReEncryptResponse {
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub ciphertext_blob: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_encryption_algorithm: Option<EncryptionAlgorithm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_encryption_algorithm: Option<EncryptionAlgorithm>,
}

// ============================================================================
// Data keys
// ============================================================================

/// Either `key_spec` or `number_of_bytes` should be set, not both
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateDataKeyRequest {
    pub key_id: String,
    #[serde(default, skip_serializing_if = "EncryptionContext::is_empty")]
    pub encryption_context: EncryptionContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_bytes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_spec: Option<DataKeySpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<RecipientInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl GenerateDataKeyRequest {
    pub fn new(key_id: impl Into<String>, key_spec: DataKeySpec) -> Self {
        Self {
            key_id: key_id.into(),
            encryption_context: EncryptionContext::new(),
            number_of_bytes: None,
            key_spec: Some(key_spec),
            grant_tokens: Vec::new(),
            recipient: None,
            dry_run: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateDataKeyResponse {
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub ciphertext_blob: Option<Vec<u8>>,
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub plaintext: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub ciphertext_for_recipient: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateDataKeyWithoutPlaintextRequest {
    pub key_id: String,
    #[serde(default, skip_serializing_if = "EncryptionContext::is_empty")]
    pub encryption_context: EncryptionContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_spec: Option<DataKeySpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_bytes: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl GenerateDataKeyWithoutPlaintextRequest {
    pub fn new(key_id: impl Into<String>, key_spec: DataKeySpec) -> Self {
        Self {
            key_id: key_id.into(),
            encryption_context: EncryptionContext::new(),
            key_spec: Some(key_spec),
            number_of_bytes: None,
            grant_tokens: Vec::new(),
            dry_run: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateDataKeyWithoutPlaintextResponse {
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub ciphertext_blob: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
}

/// Body shared by `GenerateDataKeyPair` and
/// `GenerateDataKeyPairWithoutPlaintext`; the latter ignores `recipient`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateDataKeyPairRequest {
    pub key_id: String,
    pub key_pair_spec: DataKeyPairSpec,
    #[serde(default, skip_serializing_if = "EncryptionContext::is_empty")]
    pub encryption_context: EncryptionContext,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<RecipientInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl GenerateDataKeyPairRequest {
    pub fn new(key_id: impl Into<String>, key_pair_spec: DataKeyPairSpec) -> Self {
        Self {
            key_id: key_id.into(),
            key_pair_spec,
            encryption_context: EncryptionContext::new(),
            grant_tokens: Vec::new(),
            recipient: None,
            dry_run: None,
        }
    }
}

/// Response shared by both data key pair operations; `private_key_plaintext`
/// and `ciphertext_for_recipient` are only set by `GenerateDataKeyPair`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateDataKeyPairResponse {
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub private_key_ciphertext_blob: Option<Vec<u8>>,
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub private_key_plaintext: Option<Vec<u8>>,
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub public_key: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_pair_spec: Option<DataKeyPairSpec>,
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub ciphertext_for_recipient: Option<Vec<u8>>,
}

// ============================================================================
// Random bytes
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateRandomRequest {
    /// 1 to 1024
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_bytes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_key_store_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<RecipientInfo>,
}

impl GenerateRandomRequest {
    pub fn with_bytes(number_of_bytes: u32) -> Self {
        Self {
            number_of_bytes: Some(number_of_bytes),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateRandomResponse {
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub plaintext: Option<Vec<u8>>,
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub ciphertext_for_recipient: Option<Vec<u8>>,
}

// ============================================================================
// Signatures and MACs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignRequest {
    pub key_id: String,
    #[serde(with = "crate::blob")]
    pub message: Vec<u8>,
    pub signing_algorithm: SigningAlgorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl SignRequest {
    pub fn new(
        key_id: impl Into<String>,
        message: impl Into<Vec<u8>>,
        signing_algorithm: SigningAlgorithm,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            message: message.into(),
            signing_algorithm,
            message_type: None,
            grant_tokens: Vec::new(),
            dry_run: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub signature: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_algorithm: Option<SigningAlgorithm>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyRequest {
    pub key_id: String,
    #[serde(with = "crate::blob")]
    pub message: Vec<u8>,
    #[serde(with = "crate::blob")]
    pub signature: Vec<u8>,
    pub signing_algorithm: SigningAlgorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl VerifyRequest {
    pub fn new(
        key_id: impl Into<String>,
        message: impl Into<Vec<u8>>,
        signature: impl Into<Vec<u8>>,
        signing_algorithm: SigningAlgorithm,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            message: message.into(),
            signature: signature.into(),
            signing_algorithm,
            message_type: None,
            grant_tokens: Vec::new(),
            dry_run: None,
        }
    }
}

/// An invalid signature is reported as a `KMSInvalidSignatureException`
/// failure, not as `signature_valid == false`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(default)]
    pub signature_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_algorithm: Option<SigningAlgorithm>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateMacRequest {
    pub key_id: String,
    #[serde(with = "crate::blob")]
    pub message: Vec<u8>,
    pub mac_algorithm: MacAlgorithm,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl GenerateMacRequest {
    pub fn new(key_id: impl Into<String>, message: impl Into<Vec<u8>>, mac_algorithm: MacAlgorithm) -> Self {
        Self {
            key_id: key_id.into(),
            message: message.into(),
            mac_algorithm,
            grant_tokens: Vec::new(),
            dry_run: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateMacResponse {
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub mac: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_algorithm: Option<MacAlgorithm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyMacRequest {
    pub key_id: String,
    #[serde(with = "crate::blob")]
    pub message: Vec<u8>,
    pub mac_algorithm: MacAlgorithm,
    #[serde(with = "crate::blob")]
    pub mac: Vec<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl VerifyMacRequest {
    pub fn new(
        key_id: impl Into<String>,
        message: impl Into<Vec<u8>>,
        mac_algorithm: MacAlgorithm,
        mac: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            message: message.into(),
            mac_algorithm,
            mac: mac.into(),
            grant_tokens: Vec::new(),
            dry_run: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyMacResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(default)]
    pub mac_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_algorithm: Option<MacAlgorithm>,
}

// ============================================================================
// Key agreement
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeriveSharedSecretRequest {
    pub key_id: String,
    pub key_agreement_algorithm: KeyAgreementAlgorithm,
    /// DER-encoded public key of the other party
    #[serde(with = "crate::blob")]
    pub public_key: Vec<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<RecipientInfo>,
}

impl DeriveSharedSecretRequest {
    pub fn new(
        key_id: impl Into<String>,
        key_agreement_algorithm: KeyAgreementAlgorithm,
        public_key: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            key_agreement_algorithm,
            public_key: public_key.into(),
            grant_tokens: Vec::new(),
            dry_run: None,
            recipient: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeriveSharedSecretResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub shared_secret: Option<Vec<u8>>,
    #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
    pub ciphertext_for_recipient: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_agreement_algorithm: Option<KeyAgreementAlgorithm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_origin: Option<OriginType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_request_wire_shape() {
        let mut request = EncryptRequest::new("alias/app", b"secret".to_vec());
        request.encryption_context.insert("purpose".to_string(), "test".to_string());

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["KeyId"], "alias/app");
        assert_eq!(value["Plaintext"], "c2VjcmV0");
        assert_eq!(value["EncryptionContext"]["purpose"], "test");
        assert!(value.get("GrantTokens").is_none());
        assert!(value.get("DryRun").is_none());
    }

    #[test]
    fn test_generate_random_response_decodes_plaintext() {
        let body = r#"{"Plaintext":"AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8="}"#;
        let response: GenerateRandomResponse = serde_json::from_str(body).unwrap();
        let plaintext = response.plaintext.unwrap();
        assert_eq!(plaintext.len(), 32);
        assert_eq!(plaintext[31], 31);
    }

    #[test]
    fn test_generate_random_default_request_is_empty() {
        assert_eq!(serde_json::to_string(&GenerateRandomRequest::default()).unwrap(), "{}");
        assert_eq!(
            serde_json::to_string(&GenerateRandomRequest::with_bytes(16)).unwrap(),
            r#"{"NumberOfBytes":16}"#
        );
    }
}
