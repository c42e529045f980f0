//! Client façade
//!
//! [`KmsClient`] offers one async method per operation. Each is a thin
//! wrapper over the shared [`Dispatcher`]; operations whose request has only
//! optional fields also get a `*_default` variant that sends the default
//! request.
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


use crate::credentials::CredentialsProvider;
use crate::dispatcher::Dispatcher;
use crate::error::{ClientError, KmsResult};
use crate::metadata::{CallId, ResponseMetadata};
use crate::operation::Operation;
use crate::ops;
use crate::retry::{self, RetryConfig};
use crate::signer::{RequestSigner, UnsignedSigner};
use crate::transport::{HttpTransport, Transport};
use kms_config::ClientConfig;
use kms_types::EmptyResponse;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

macro_rules! operation_methods {
    ($($(#[$meta:meta])* $method:ident => $op:ident;)+) => {
        $(
            $(#[$meta])*
            pub async fn $method(
                &self,
                request: &<ops::$op as Operation>::Input,
            ) -> KmsResult<<ops::$op as Operation>::Output> {
                self.dispatcher.invoke::<ops::$op>(request).await
            }
        )+
    };
}

macro_rules! void_operation_methods {
    ($($(#[$meta:meta])* $method:ident => $op:ident;)+) => {
        $(
            $(#[$meta])*
            pub async fn $method(&self, request: &<ops::$op as Operation>::Input) -> KmsResult<()> {
                self.dispatcher
                    .invoke::<ops::$op>(request)
                    .await
                    .map(|_: EmptyResponse| ())
            }
        )+
    };
}

macro_rules! default_request_methods {
    ($($method:ident => $op:ident;)+) => {
        $(
            #[doc = concat!("`", stringify!($op), "` with the default request")]
            pub async fn $method(&self) -> KmsResult<<ops::$op as Operation>::Output> {
                self.dispatcher.invoke_default::<ops::$op>().await
            }
        )+
    };
}

/// Builder for [`KmsClient`]
#[derive(Default)]
pub struct KmsClientBuilder {
    config: Option<ClientConfig>,
    transport: Option<Arc<dyn Transport>>,
    signer: Option<Arc<dyn RequestSigner>>,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    cancel: Option<CancellationToken>,
}

impl KmsClientBuilder {
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the default reqwest transport
    pub fn transport<T: Transport + 'static>(mut self, transport: Arc<T>) -> Self {
        self.transport = Some(transport as Arc<dyn Transport>);
        self
    }

    pub fn signer<S: RequestSigner + 'static>(mut self, signer: S) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    pub fn credentials_provider<P: CredentialsProvider + 'static>(mut self, provider: P) -> Self {
        self.credentials = Some(Arc::new(provider));
        self
    }

    /// Token that aborts every call of the client when cancelled
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn build(self) -> Result<KmsClient, ClientError> {
        let config = self.config.unwrap_or_default();
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&config)?),
        };
        let signer = self
            .signer
            .unwrap_or_else(|| Arc::new(UnsignedSigner) as Arc<dyn RequestSigner>);

        info!(
            region = config.region(),
            endpoint = config.endpoint(),
            "KMS client created"
        );

        let dispatcher = Dispatcher::new(
            config,
            transport,
            signer,
            self.credentials,
            self.cancel.unwrap_or_else(CancellationToken::new),
        );

        Ok(KmsClient {
            dispatcher: Arc::new(dispatcher),
        })
    }
}

/// Client for the key management service
///
/// Cheap to clone; clones share one dispatcher, connection pool and
/// shutdown state.
#[derive(Clone)]
pub struct KmsClient {
    dispatcher: Arc<Dispatcher>,
}

impl KmsClient {
    pub fn builder() -> KmsClientBuilder {
        KmsClientBuilder::default()
    }

    /// Client over HTTPS, configured from `KMS_*` environment variables
    pub fn from_env() -> Result<Self, ClientError> {
        Self::builder().config(ClientConfig::from_env()?).build()
    }

    pub fn config(&self) -> &ClientConfig {
        self.dispatcher.config()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub async fn invoke<Op: Operation>(&self, input: &Op::Input) -> KmsResult<Op::Output> {
        self.dispatcher.invoke::<Op>(input).await
    }

    pub async fn invoke_default<Op>(&self) -> KmsResult<Op::Output>
    where
        Op: Operation,
        Op::Input: Default,
    {
        self.dispatcher.invoke_default::<Op>().await
    }

    pub async fn invoke_tracked<Op: Operation>(
        &self,
        input: &Op::Input,
    ) -> (CallId, KmsResult<Op::Output>) {
        self.dispatcher.invoke_tracked::<Op>(input).await
    }

    pub async fn invoke_with_retry<Op: Operation>(
        &self,
        config: &RetryConfig,
        input: &Op::Input,
    ) -> KmsResult<Op::Output> {
        retry::invoke_with_retry::<Op>(&self.dispatcher, config, input).await
    }

    /// Diagnostic metadata of a recent call made through `invoke_tracked`
    pub async fn response_metadata(&self, call_id: &CallId) -> Option<ResponseMetadata> {
        self.dispatcher.response_metadata(call_id).await
    }

    /// Shut the client down; every clone is affected
    pub async fn shutdown(&self) {
        self.dispatcher.shutdown().await;
    }

    pub fn is_shut_down(&self) -> bool {
        self.dispatcher.is_shut_down()
    }

    // ========================================================================
    // Keys
    // ========================================================================

    operation_methods! {
        /// Create a key; every field of the request is optional
        create_key => CreateKey;
        describe_key => DescribeKey;
        list_keys => ListKeys;
        schedule_key_deletion => ScheduleKeyDeletion;
        cancel_key_deletion => CancelKeyDeletion;
        get_key_rotation_status => GetKeyRotationStatus;
        get_key_policy => GetKeyPolicy;
        list_key_policies => ListKeyPolicies;
        get_parameters_for_import => GetParametersForImport;
        get_public_key => GetPublicKey;
        replicate_key => ReplicateKey;
        list_resource_tags => ListResourceTags;
    }

    void_operation_methods! {
        enable_key => EnableKey;
        disable_key => DisableKey;
        enable_key_rotation => EnableKeyRotation;
        disable_key_rotation => DisableKeyRotation;
        update_key_description => UpdateKeyDescription;
        put_key_policy => PutKeyPolicy;
        import_key_material => ImportKeyMaterial;
        delete_imported_key_material => DeleteImportedKeyMaterial;
        update_primary_region => UpdatePrimaryRegion;
        tag_resource => TagResource;
        untag_resource => UntagResource;
    }

    // ========================================================================
    // Aliases and grants
    // ========================================================================

    operation_methods! {
        list_aliases => ListAliases;
        create_grant => CreateGrant;
        list_grants => ListGrants;
        list_retirable_grants => ListRetirableGrants;
    }

    void_operation_methods! {
        create_alias => CreateAlias;
        update_alias => UpdateAlias;
        delete_alias => DeleteAlias;
        /// Retire a grant by token, or by key id and grant id
        retire_grant => RetireGrant;
        revoke_grant => RevokeGrant;
    }

    // ========================================================================
    // Custom key stores
    // ========================================================================

    operation_methods! {
        create_custom_key_store => CreateCustomKeyStore;
        describe_custom_key_stores => DescribeCustomKeyStores;
    }

    void_operation_methods! {
        connect_custom_key_store => ConnectCustomKeyStore;
        disconnect_custom_key_store => DisconnectCustomKeyStore;
        update_custom_key_store => UpdateCustomKeyStore;
        delete_custom_key_store => DeleteCustomKeyStore;
    }

    // ========================================================================
    // Cryptographic operations
    // ========================================================================

    operation_methods! {
        encrypt => Encrypt;
        decrypt => Decrypt;
        re_encrypt => ReEncrypt;
        generate_data_key => GenerateDataKey;
        generate_data_key_without_plaintext => GenerateDataKeyWithoutPlaintext;
        generate_data_key_pair => GenerateDataKeyPair;
        generate_data_key_pair_without_plaintext => GenerateDataKeyPairWithoutPlaintext;
        generate_random => GenerateRandom;
        sign => Sign;
        verify => Verify;
        generate_mac => GenerateMac;
        verify_mac => VerifyMac;
        derive_shared_secret => DeriveSharedSecret;
    }

    // ========================================================================
    // Default requests
    // ========================================================================

    default_request_methods! {
        create_key_default => CreateKey;
        list_keys_default => ListKeys;
        list_aliases_default => ListAliases;
        generate_random_default => GenerateRandom;
        describe_custom_key_stores_default => DescribeCustomKeyStores;
    }

    /// `RetireGrant` with the default request
    pub async fn retire_grant_default(&self) -> KmsResult<()> {
        self.dispatcher
            .invoke_default::<ops::RetireGrant>()
            .await
            .map(|_: EmptyResponse| ())
    }
}
