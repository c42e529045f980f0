//! The operations of the key management service
//!
//! Each entry names the request and result shapes, whether repeating the
//! call is safe, and the failure kinds the service documents for it.
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


use crate::error::ServiceErrorKind;
use crate::operation::{Operation, OperationDescriptor};
use kms_types::*;

macro_rules! operations {
    ($(
        $(#[$meta:meta])*
        $name:ident: $input:ty => $output:ty,
            idempotent = $idempotent:literal,
            errors = [$($kind:ident),* $(,)?];
    )+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;

            impl Operation for $name {
                type Input = $input;
                type Output = $output;

                const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
                    name: stringify!($name),
                    errors: &[$(ServiceErrorKind::$kind),*],
                    idempotent: $idempotent,
                };
            }
        )+

        /// Descriptors of every operation, in alphabetical order
        pub const ALL: &[OperationDescriptor] = &[$(<$name as Operation>::DESCRIPTOR),+];
    };
}

operations! {
    /// Cancel a scheduled key deletion; the key is left disabled
    CancelKeyDeletion: KeyIdRequest => CancelKeyDeletionResponse,
        idempotent = false,
        errors = [NotFound, InvalidArn, DependencyTimeout, KmsInternal, KmsInvalidState];

    ConnectCustomKeyStore: CustomKeyStoreIdRequest => EmptyResponse,
        idempotent = false,
        errors = [
            CloudHsmClusterNotActive, CustomKeyStoreInvalidState, CustomKeyStoreNotFound,
            KmsInternal, CloudHsmClusterInvalidConfiguration,
        ];

    CreateAlias: AliasRequest => EmptyResponse,
        idempotent = false,
        errors = [
            DependencyTimeout, AlreadyExists, NotFound, InvalidAliasName, KmsInternal,
            LimitExceeded, KmsInvalidState,
        ];

    CreateCustomKeyStore: CreateCustomKeyStoreRequest => CreateCustomKeyStoreResponse,
        idempotent = false,
        errors = [
            CloudHsmClusterInUse, CustomKeyStoreNameInUse, CloudHsmClusterNotFound, KmsInternal,
            CloudHsmClusterNotActive, IncorrectTrustAnchor, CloudHsmClusterInvalidConfiguration,
            LimitExceeded,
        ];

    CreateGrant: CreateGrantRequest => CreateGrantResponse,
        idempotent = false,
        errors = [
            NotFound, Disabled, DependencyTimeout, InvalidArn, KmsInternal, InvalidGrantToken,
            LimitExceeded, KmsInvalidState, DryRunOperation,
        ];

    CreateKey: CreateKeyRequest => CreateKeyResponse,
        idempotent = false,
        errors = [
            MalformedPolicyDocument, DependencyTimeout, InvalidArn, UnsupportedOperation,
            KmsInternal, LimitExceeded, Tag, CustomKeyStoreNotFound, CustomKeyStoreInvalidState,
            CloudHsmClusterInvalidConfiguration,
        ];

    Decrypt: DecryptRequest => DecryptResponse,
        idempotent = true,
        errors = [
            NotFound, Disabled, InvalidCiphertext, KeyUnavailable, IncorrectKey, InvalidKeyUsage,
            DependencyTimeout, InvalidGrantToken, KmsInternal, KmsInvalidState, DryRunOperation,
        ];

    DeleteAlias: DeleteAliasRequest => EmptyResponse,
        idempotent = false,
        errors = [DependencyTimeout, NotFound, KmsInternal, KmsInvalidState];

    DeleteCustomKeyStore: CustomKeyStoreIdRequest => EmptyResponse,
        idempotent = false,
        errors = [CustomKeyStoreHasCmks, CustomKeyStoreInvalidState, CustomKeyStoreNotFound, KmsInternal];

    DeleteImportedKeyMaterial: KeyIdRequest => EmptyResponse,
        idempotent = false,
        errors = [
            InvalidArn, UnsupportedOperation, DependencyTimeout, NotFound, KmsInternal,
            KmsInvalidState,
        ];

    DeriveSharedSecret: DeriveSharedSecretRequest => DeriveSharedSecretResponse,
        idempotent = true,
        errors = [
            NotFound, Disabled, KeyUnavailable, DependencyTimeout, InvalidGrantToken,
            InvalidKeyUsage, KmsInternal, KmsInvalidState, DryRunOperation,
        ];

    DescribeCustomKeyStores: DescribeCustomKeyStoresRequest => DescribeCustomKeyStoresResponse,
        idempotent = true,
        errors = [CustomKeyStoreNotFound, InvalidMarker, KmsInternal];

    /// Key id, key ARN, alias name or alias ARN; unknown aliases fail with `NotFound`
    DescribeKey: DescribeKeyRequest => DescribeKeyResponse,
        idempotent = true,
        errors = [NotFound, InvalidArn, DependencyTimeout, KmsInternal];

    DisableKey: KeyIdRequest => EmptyResponse,
        idempotent = false,
        errors = [NotFound, InvalidArn, DependencyTimeout, KmsInternal, KmsInvalidState];

    DisableKeyRotation: KeyIdRequest => EmptyResponse,
        idempotent = false,
        errors = [
            NotFound, Disabled, InvalidArn, DependencyTimeout, KmsInternal, KmsInvalidState,
            UnsupportedOperation,
        ];

    DisconnectCustomKeyStore: CustomKeyStoreIdRequest => EmptyResponse,
        idempotent = false,
        errors = [CustomKeyStoreInvalidState, CustomKeyStoreNotFound, KmsInternal];

    EnableKey: KeyIdRequest => EmptyResponse,
        idempotent = false,
        errors = [
            NotFound, InvalidArn, DependencyTimeout, KmsInternal, LimitExceeded, KmsInvalidState,
        ];

    EnableKeyRotation: EnableKeyRotationRequest => EmptyResponse,
        idempotent = false,
        errors = [
            NotFound, Disabled, InvalidArn, DependencyTimeout, KmsInternal, KmsInvalidState,
            UnsupportedOperation,
        ];

    Encrypt: EncryptRequest => EncryptResponse,
        idempotent = true,
        errors = [
            NotFound, Disabled, KeyUnavailable, DependencyTimeout, InvalidKeyUsage,
            InvalidGrantToken, KmsInternal, KmsInvalidState, DryRunOperation,
        ];

    GenerateDataKey: GenerateDataKeyRequest => GenerateDataKeyResponse,
        idempotent = true,
        errors = [
            NotFound, Disabled, KeyUnavailable, DependencyTimeout, InvalidKeyUsage,
            InvalidGrantToken, KmsInternal, KmsInvalidState, DryRunOperation,
        ];

    GenerateDataKeyPair: GenerateDataKeyPairRequest => GenerateDataKeyPairResponse,
        idempotent = true,
        errors = [
            NotFound, Disabled, KeyUnavailable, DependencyTimeout, InvalidKeyUsage,
            InvalidGrantToken, KmsInternal, KmsInvalidState, UnsupportedOperation,
            DryRunOperation,
        ];

    GenerateDataKeyPairWithoutPlaintext: GenerateDataKeyPairRequest => GenerateDataKeyPairResponse,
        idempotent = true,
        errors = [
            NotFound, Disabled, KeyUnavailable, DependencyTimeout, InvalidKeyUsage,
            InvalidGrantToken, KmsInternal, KmsInvalidState, UnsupportedOperation,
            DryRunOperation,
        ];

    GenerateDataKeyWithoutPlaintext: GenerateDataKeyWithoutPlaintextRequest => GenerateDataKeyWithoutPlaintextResponse,
        idempotent = true,
        errors = [
            NotFound, Disabled, KeyUnavailable, DependencyTimeout, InvalidKeyUsage,
            InvalidGrantToken, KmsInternal, KmsInvalidState, DryRunOperation,
        ];

    GenerateMac: GenerateMacRequest => GenerateMacResponse,
        idempotent = true,
        errors = [
            NotFound, Disabled, KeyUnavailable, InvalidKeyUsage, InvalidGrantToken, KmsInternal,
            KmsInvalidState, DryRunOperation,
        ];

    GenerateRandom: GenerateRandomRequest => GenerateRandomResponse,
        idempotent = true,
        errors = [
            DependencyTimeout, KmsInternal, UnsupportedOperation, CustomKeyStoreNotFound,
            CustomKeyStoreInvalidState,
        ];

    GetKeyPolicy: GetKeyPolicyRequest => GetKeyPolicyResponse,
        idempotent = true,
        errors = [NotFound, InvalidArn, DependencyTimeout, KmsInternal, KmsInvalidState];

    GetKeyRotationStatus: KeyIdRequest => GetKeyRotationStatusResponse,
        idempotent = true,
        errors = [
            NotFound, InvalidArn, DependencyTimeout, KmsInternal, KmsInvalidState,
            UnsupportedOperation,
        ];

    GetParametersForImport: GetParametersForImportRequest => GetParametersForImportResponse,
        idempotent = true,
        errors = [
            InvalidArn, UnsupportedOperation, DependencyTimeout, NotFound, KmsInternal,
            KmsInvalidState,
        ];

    GetPublicKey: GetPublicKeyRequest => GetPublicKeyResponse,
        idempotent = true,
        errors = [
            NotFound, Disabled, KeyUnavailable, DependencyTimeout, UnsupportedOperation,
            InvalidArn, InvalidGrantToken, InvalidKeyUsage, KmsInternal, KmsInvalidState,
        ];

    ImportKeyMaterial: ImportKeyMaterialRequest => EmptyResponse,
        idempotent = false,
        errors = [
            InvalidArn, UnsupportedOperation, DependencyTimeout, NotFound, KmsInternal,
            KmsInvalidState, InvalidCiphertext, IncorrectKeyMaterial, ExpiredImportToken,
            InvalidImportToken,
        ];

    ListAliases: ListAliasesRequest => ListAliasesResponse,
        idempotent = true,
        errors = [DependencyTimeout, InvalidMarker, KmsInternal, InvalidArn, NotFound];

    ListGrants: ListGrantsRequest => ListGrantsResponse,
        idempotent = true,
        errors = [
            NotFound, DependencyTimeout, InvalidMarker, InvalidArn, KmsInternal, KmsInvalidState,
        ];

    ListKeyPolicies: ListKeyPoliciesRequest => ListKeyPoliciesResponse,
        idempotent = true,
        errors = [NotFound, InvalidArn, DependencyTimeout, KmsInternal, KmsInvalidState];

    ListKeys: ListKeysRequest => ListKeysResponse,
        idempotent = true,
        errors = [DependencyTimeout, KmsInternal, InvalidMarker];

    ListResourceTags: ListResourceTagsRequest => ListResourceTagsResponse,
        idempotent = true,
        errors = [KmsInternal, NotFound, InvalidArn, InvalidMarker];

    ListRetirableGrants: ListRetirableGrantsRequest => ListGrantsResponse,
        idempotent = true,
        errors = [DependencyTimeout, InvalidMarker, InvalidArn, NotFound, KmsInternal];

    PutKeyPolicy: PutKeyPolicyRequest => EmptyResponse,
        idempotent = false,
        errors = [
            NotFound, InvalidArn, MalformedPolicyDocument, DependencyTimeout, UnsupportedOperation,
            KmsInternal, LimitExceeded, KmsInvalidState,
        ];

    ReEncrypt: ReEncryptRequest => ReEncryptResponse,
        idempotent = true,
        errors = [
            NotFound, Disabled, InvalidCiphertext, KeyUnavailable, IncorrectKey, DependencyTimeout,
            InvalidKeyUsage, InvalidGrantToken, KmsInternal, KmsInvalidState, DryRunOperation,
        ];

    ReplicateKey: ReplicateKeyRequest => ReplicateKeyResponse,
        idempotent = false,
        errors = [
            AlreadyExists, Disabled, InvalidArn, KmsInvalidState, KmsInternal, LimitExceeded,
            MalformedPolicyDocument, NotFound, Tag, UnsupportedOperation,
        ];

    RetireGrant: RetireGrantRequest => EmptyResponse,
        idempotent = false,
        errors = [
            InvalidGrantToken, InvalidGrantId, NotFound, DependencyTimeout, KmsInternal,
            KmsInvalidState, DryRunOperation,
        ];

    RevokeGrant: RevokeGrantRequest => EmptyResponse,
        idempotent = false,
        errors = [
            NotFound, DependencyTimeout, InvalidArn, InvalidGrantId, KmsInternal, KmsInvalidState,
            DryRunOperation,
        ];

    ScheduleKeyDeletion: ScheduleKeyDeletionRequest => ScheduleKeyDeletionResponse,
        idempotent = false,
        errors = [NotFound, InvalidArn, DependencyTimeout, KmsInternal, KmsInvalidState];

    Sign: SignRequest => SignResponse,
        idempotent = true,
        errors = [
            NotFound, Disabled, KeyUnavailable, DependencyTimeout, InvalidKeyUsage,
            InvalidGrantToken, KmsInternal, KmsInvalidState, DryRunOperation,
        ];

    TagResource: TagResourceRequest => EmptyResponse,
        idempotent = false,
        errors = [KmsInternal, NotFound, InvalidArn, KmsInvalidState, LimitExceeded, Tag];

    UntagResource: UntagResourceRequest => EmptyResponse,
        idempotent = false,
        errors = [KmsInternal, NotFound, InvalidArn, KmsInvalidState, Tag];

    UpdateAlias: AliasRequest => EmptyResponse,
        idempotent = false,
        errors = [DependencyTimeout, NotFound, KmsInternal, KmsInvalidState];

    UpdateCustomKeyStore: UpdateCustomKeyStoreRequest => EmptyResponse,
        idempotent = false,
        errors = [
            CustomKeyStoreNotFound, CustomKeyStoreNameInUse, CloudHsmClusterNotFound,
            CloudHsmClusterNotRelated, CustomKeyStoreInvalidState, KmsInternal,
            CloudHsmClusterNotActive, CloudHsmClusterInvalidConfiguration,
        ];

    UpdateKeyDescription: UpdateKeyDescriptionRequest => EmptyResponse,
        idempotent = false,
        errors = [NotFound, InvalidArn, DependencyTimeout, KmsInternal, KmsInvalidState];

    UpdatePrimaryRegion: UpdatePrimaryRegionRequest => EmptyResponse,
        idempotent = false,
        errors = [Disabled, InvalidArn, KmsInternal, KmsInvalidState, NotFound, UnsupportedOperation];

    Verify: VerifyRequest => VerifyResponse,
        idempotent = true,
        errors = [
            NotFound, Disabled, KeyUnavailable, DependencyTimeout, InvalidKeyUsage,
            InvalidGrantToken, KmsInternal, KmsInvalidState, KmsInvalidSignature, DryRunOperation,
        ];

    VerifyMac: VerifyMacRequest => VerifyMacResponse,
        idempotent = true,
        errors = [
            NotFound, Disabled, KeyUnavailable, InvalidKeyUsage, InvalidGrantToken, KmsInternal,
            KmsInvalidState, KmsInvalidMac, DryRunOperation,
        ];
}

/// Descriptor of the operation with the given wire name
pub fn descriptor(name: &str) -> Option<&'static OperationDescriptor> {
    ALL.iter().find(|descriptor| descriptor.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_operation_set_is_complete() {
        assert_eq!(ALL.len(), 51);
        let names: HashSet<_> = ALL.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn test_every_operation_declares_internal_failure() {
        for descriptor in ALL {
            assert!(
                descriptor.declares(ServiceErrorKind::KmsInternal),
                "{} does not declare KMSInternalException",
                descriptor.name
            );
            assert!(!descriptor.declares(ServiceErrorKind::Unmodeled));
        }
    }

    #[test]
    fn test_read_only_operations_are_idempotent() {
        for descriptor in ALL {
            let read_only = ["Describe", "Get", "List"]
                .iter()
                .any(|prefix| descriptor.name.starts_with(prefix));
            if read_only {
                assert!(descriptor.idempotent, "{} should be idempotent", descriptor.name);
            }
        }
        assert!(!CreateKey::DESCRIPTOR.idempotent);
        assert!(!ScheduleKeyDeletion::DESCRIPTOR.idempotent);
        assert!(GenerateRandom::DESCRIPTOR.idempotent);
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(descriptor("DescribeKey"), Some(&DescribeKey::DESCRIPTOR));
        assert_eq!(descriptor("DescribeKeys"), None);
    }

    #[test]
    fn test_whitelists_follow_documentation() {
        assert!(Verify::DESCRIPTOR.declares(ServiceErrorKind::KmsInvalidSignature));
        assert!(!Sign::DESCRIPTOR.declares(ServiceErrorKind::KmsInvalidSignature));
        assert!(VerifyMac::DESCRIPTOR.declares(ServiceErrorKind::KmsInvalidMac));
        assert!(ImportKeyMaterial::DESCRIPTOR.declares(ServiceErrorKind::ExpiredImportToken));
        assert!(!DescribeKey::DESCRIPTOR.declares(ServiceErrorKind::Disabled));
    }
}
