//! Custom key store shapes
//!
//! A custom key store backs a set of keys with a customer-controlled HSM
//! cluster instead of the service's default key store.
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


use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{ConnectionErrorCode, ConnectionState, CustomKeyStoreType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomKeyStoresListEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_key_store_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_key_store_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_hsm_cluster_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_anchor_certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_state: Option<ConnectionState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_error_code: Option<ConnectionErrorCode>,
    #[serde(default, with = "crate::timestamp::option", skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_key_store_type: Option<CustomKeyStoreType>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCustomKeyStoreRequest {
    pub custom_key_store_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_hsm_cluster_id: Option<String>,
    /// PEM content of the cluster's `customerCA.crt`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_anchor_certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_store_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_key_store_type: Option<CustomKeyStoreType>,
}

impl CreateCustomKeyStoreRequest {
    pub fn new(custom_key_store_name: impl Into<String>) -> Self {
        Self {
            custom_key_store_name: custom_key_store_name.into(),
            cloud_hsm_cluster_id: None,
            trust_anchor_certificate: None,
            key_store_password: None,
            custom_key_store_type: None,
        }
    }
}

impl std::fmt::Debug for CreateCustomKeyStoreRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateCustomKeyStoreRequest")
            .field("custom_key_store_name", &self.custom_key_store_name)
            .field("cloud_hsm_cluster_id", &self.cloud_hsm_cluster_id)
            .field("key_store_password", &self.key_store_password.as_ref().map(|_| "<redacted>"))
            .field("custom_key_store_type", &self.custom_key_store_type)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCustomKeyStoreResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_key_store_id: Option<String>,
}

/// Request naming a single custom key store
///
/// Shared by `ConnectCustomKeyStore`, `DisconnectCustomKeyStore` and
/// `DeleteCustomKeyStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomKeyStoreIdRequest {
    pub custom_key_store_id: String,
}

impl CustomKeyStoreIdRequest {
    pub fn new(custom_key_store_id: impl Into<String>) -> Self {
        Self {
            custom_key_store_id: custom_key_store_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeCustomKeyStoresRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_key_store_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_key_store_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeCustomKeyStoresResponse {
    #[serde(default)]
    pub custom_key_stores: Vec<CustomKeyStoresListEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_marker: Option<String>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateCustomKeyStoreRequest {
    pub custom_key_store_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_custom_key_store_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_store_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_hsm_cluster_id: Option<String>,
}

impl UpdateCustomKeyStoreRequest {
    pub fn new(custom_key_store_id: impl Into<String>) -> Self {
        Self {
            custom_key_store_id: custom_key_store_id.into(),
            new_custom_key_store_name: None,
            key_store_password: None,
            cloud_hsm_cluster_id: None,
        }
    }
}

impl std::fmt::Debug for UpdateCustomKeyStoreRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateCustomKeyStoreRequest")
            .field("custom_key_store_id", &self.custom_key_store_id)
            .field("new_custom_key_store_name", &self.new_custom_key_store_name)
            .field("key_store_password", &self.key_store_password.as_ref().map(|_| "<redacted>"))
            .field("cloud_hsm_cluster_id", &self.cloud_hsm_cluster_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_redacts_password() {
        let mut request = CreateCustomKeyStoreRequest::new("store");
        request.key_store_password = Some("hunter2".to_string());
        let rendered = format!("{:?}", request);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_list_entry_connection_state() {
        let body = r#"{"CustomKeyStoreId":"cks-1","ConnectionState":"CONNECTED","CreationDate":1.5E9}"#;
        let entry: CustomKeyStoresListEntry = serde_json::from_str(body).unwrap();
        assert_eq!(entry.connection_state, Some(ConnectionState::Connected));
        assert!(entry.connection_error_code.is_none());
    }
}
