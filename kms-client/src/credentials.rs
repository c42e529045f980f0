//! Credential providers
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


use crate::error::ClientError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::env;
use std::fmt;

pub const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";
pub const SESSION_TOKEN_VAR: &str = "AWS_SESSION_TOKEN";

/// Access key pair, optionally with a session token
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
    session_token: Option<String>,
}

impl Credentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token,
        }
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &self.session_token.as_ref().map(|_| "** redacted **"))
            .finish()
    }
}

/// Source of credentials, consulted once per call
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    async fn credentials(&self) -> Result<Credentials, ClientError>;
}

/// Fixed credentials
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialsProvider for StaticCredentials {
    async fn credentials(&self) -> Result<Credentials, ClientError> {
        Ok(self.credentials.clone())
    }
}

/// Credentials from `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and
/// `AWS_SESSION_TOKEN`
#[derive(Debug, Clone, Default)]
pub struct EnvironmentCredentials {
    overrides: Option<HashMap<String, String>>,
}

impl EnvironmentCredentials {
    /// Read the process environment at call time
    pub fn new() -> Self {
        Self::default()
    }

    /// Read from `vars` instead of the process environment
    pub fn from_vars(vars: HashMap<String, String>) -> Self {
        Self {
            overrides: Some(vars),
        }
    }

    fn var(&self, name: &str) -> Option<String> {
        let value = match &self.overrides {
            Some(vars) => vars.get(name).cloned(),
            None => env::var(name).ok(),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

#[async_trait]
impl CredentialsProvider for EnvironmentCredentials {
    async fn credentials(&self) -> Result<Credentials, ClientError> {
        let access_key_id = self
            .var(ACCESS_KEY_ID_VAR)
            .ok_or_else(|| ClientError::Credentials(format!("{} is not set", ACCESS_KEY_ID_VAR)))?;
        let secret_access_key = self.var(SECRET_ACCESS_KEY_VAR).ok_or_else(|| {
            ClientError::Credentials(format!("{} is not set", SECRET_ACCESS_KEY_VAR))
        })?;

        Ok(Credentials::new(
            access_key_id,
            secret_access_key,
            self.var(SESSION_TOKEN_VAR),
        ))
    }
}
