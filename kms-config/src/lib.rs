//! Configuration management for the KMS client
//!
//! Configuration is resolved once, from (in increasing precedence) built-in
//! defaults, an optional config file named by `KMS_CONFIG_FILE`, and
//! `KMS_*` environment variables (a `.env` file is honoured). The resulting
//! [`ClientConfig`] has no setters: a client built from it cannot be
//! reconfigured while calls are in flight.
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


use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_METADATA_CACHE_TTL: Duration = Duration::from_secs(60);
pub const DEFAULT_METADATA_CACHE_CAPACITY: usize = 50;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid region: {0:?}")]
    InvalidRegion(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Settings as they appear in files and the environment
#[derive(Debug, Deserialize)]
struct RawConfig {
    region: Option<String>,
    endpoint: Option<String>,
    #[serde(default = "default_connect_timeout_ms")]
    connect_timeout_ms: u64,
    #[serde(default = "default_request_timeout_ms")]
    request_timeout_ms: u64,
    #[serde(default = "default_metadata_cache_ttl_secs")]
    metadata_cache_ttl_secs: u64,
    #[serde(default = "default_metadata_cache_capacity")]
    metadata_cache_capacity: usize,
    user_agent: Option<String>,
    log_level: Option<String>,
}

fn default_connect_timeout_ms() -> u64 {
    DEFAULT_CONNECT_TIMEOUT.as_millis() as u64
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_millis() as u64
}

fn default_metadata_cache_ttl_secs() -> u64 {
    DEFAULT_METADATA_CACHE_TTL.as_secs()
}

fn default_metadata_cache_capacity() -> usize {
    DEFAULT_METADATA_CACHE_CAPACITY
}

/// Immutable client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    region: String,
    endpoint: String,
    connect_timeout: Duration,
    request_timeout: Duration,
    metadata_cache_ttl: Duration,
    metadata_cache_capacity: usize,
    user_agent: String,
    log_level: String,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// `AWS_REGION`, then `AWS_DEFAULT_REGION`, supply the region only when
    /// neither the config file nor `KMS_REGION` names one.
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let file = env::var("KMS_CONFIG_FILE").ok();
        let fallback_region = env::var("AWS_REGION")
            .ok()
            .or_else(|| env::var("AWS_DEFAULT_REGION").ok());

        Self::load_layered(file.as_deref().map(Path::new), None, fallback_region)
    }

    /// Load configuration from a file, ignoring the environment
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(Some(path.as_ref()), Some(HashMap::new()))
    }

    /// Layer an optional file and the environment
    ///
    /// `env` replaces the process environment when given, which keeps the
    /// loader testable without mutating global state.
    pub fn load(file: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        Self::load_layered(file, env, None)
    }

    fn load_layered(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
        fallback_region: Option<String>,
    ) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("KMS")
                .try_parsing(true)
                .source(env),
        );

        let mut raw: RawConfig = builder.build()?.try_deserialize()?;
        if raw.region.is_none() {
            raw.region = fallback_region;
        }
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self> {
        let mut builder = ClientConfig::builder()
            .connect_timeout(Duration::from_millis(raw.connect_timeout_ms))
            .request_timeout(Duration::from_millis(raw.request_timeout_ms))
            .metadata_cache_ttl(Duration::from_secs(raw.metadata_cache_ttl_secs))
            .metadata_cache_capacity(raw.metadata_cache_capacity);

        if let Some(region) = raw.region {
            builder = builder.region(region);
        }
        if let Some(endpoint) = raw.endpoint {
            builder = builder.endpoint(endpoint);
        }
        if let Some(user_agent) = raw.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if let Some(log_level) = raw.log_level {
            builder = builder.log_level(log_level);
        }

        builder.build()
    }

    /// Builder pre-filled with this configuration
    pub fn to_builder(&self) -> ClientConfigBuilder {
        ClientConfigBuilder {
            region: Some(self.region.clone()),
            endpoint: Some(self.endpoint.clone()),
            connect_timeout: self.connect_timeout,
            request_timeout: self.request_timeout,
            metadata_cache_ttl: self.metadata_cache_ttl,
            metadata_cache_capacity: self.metadata_cache_capacity,
            user_agent: Some(self.user_agent.clone()),
            log_level: Some(self.log_level.clone()),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Full endpoint URL, scheme included, without a trailing slash
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Host part of the endpoint, handed to the request signer
    pub fn endpoint_host(&self) -> &str {
        let without_scheme = self
            .endpoint
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.endpoint);
        without_scheme.split('/').next().unwrap_or(without_scheme)
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn metadata_cache_ttl(&self) -> Duration {
        self.metadata_cache_ttl
    }

    pub fn metadata_cache_capacity(&self) -> usize {
        self.metadata_cache_capacity
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Get log level, defaulting to "info"
    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let region = DEFAULT_REGION.to_string();
        Self {
            endpoint: default_endpoint(&region),
            region,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            metadata_cache_ttl: DEFAULT_METADATA_CACHE_TTL,
            metadata_cache_capacity: DEFAULT_METADATA_CACHE_CAPACITY,
            user_agent: default_user_agent(),
            log_level: "info".to_string(),
        }
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    region: Option<String>,
    endpoint: Option<String>,
    connect_timeout: Duration,
    request_timeout: Duration,
    metadata_cache_ttl: Duration,
    metadata_cache_capacity: usize,
    user_agent: Option<String>,
    log_level: Option<String>,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self {
            region: None,
            endpoint: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            metadata_cache_ttl: DEFAULT_METADATA_CACHE_TTL,
            metadata_cache_capacity: DEFAULT_METADATA_CACHE_CAPACITY,
            user_agent: None,
            log_level: None,
        }
    }
}

impl ClientConfigBuilder {
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Host (`kms.example.com`) or full URL (`http://localhost:4566`)
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Drop any endpoint override and use the region's default endpoint
    pub fn default_endpoint(mut self) -> Self {
        self.endpoint = None;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn metadata_cache_ttl(mut self, ttl: Duration) -> Self {
        self.metadata_cache_ttl = ttl;
        self
    }

    pub fn metadata_cache_capacity(mut self, capacity: usize) -> Self {
        self.metadata_cache_capacity = capacity;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn log_level(mut self, log_level: impl Into<String>) -> Self {
        self.log_level = Some(log_level.into());
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        let region = self.region.unwrap_or_else(|| DEFAULT_REGION.to_string());
        validate_region(&region)?;

        let endpoint = match self.endpoint {
            Some(endpoint) => normalize_endpoint(&endpoint)?,
            None => default_endpoint(&region),
        };

        if self.connect_timeout.is_zero() || self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "timeouts must be greater than zero".to_string(),
            ));
        }

        Ok(ClientConfig {
            region,
            endpoint,
            connect_timeout: self.connect_timeout,
            request_timeout: self.request_timeout,
            metadata_cache_ttl: self.metadata_cache_ttl,
            metadata_cache_capacity: self.metadata_cache_capacity,
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
            log_level: self.log_level.unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn default_endpoint(region: &str) -> String {
    format!("https://kms.{}.amazonaws.com", region)
}

fn default_user_agent() -> String {
    format!("kms-client/{}", env!("CARGO_PKG_VERSION"))
}

fn validate_region(region: &str) -> Result<()> {
    let valid = !region.is_empty()
        && region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidRegion(region.to_string()))
    }
}

fn normalize_endpoint(endpoint: &str) -> Result<String> {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidEndpoint("endpoint is empty".to_string()));
    }

    let url = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let (scheme, rest) = url
        .split_once("://")
        .ok_or_else(|| ConfigError::InvalidEndpoint(url.clone()))?;
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidEndpoint(format!(
            "unsupported scheme {:?} in {}",
            scheme, url
        )));
    }
    if rest.is_empty() || rest.starts_with('/') {
        return Err(ConfigError::InvalidEndpoint(format!("missing host in {}", url)));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::builder().build().unwrap();
        assert_eq!(config.region(), "us-east-1");
        assert_eq!(config.endpoint(), "https://kms.us-east-1.amazonaws.com");
        assert_eq!(config.endpoint_host(), "kms.us-east-1.amazonaws.com");
        assert_eq!(config.connect_timeout(), DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(config.metadata_cache_capacity(), 50);
        assert_eq!(config.log_level(), "info");
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_region_selects_default_endpoint() {
        let config = ClientConfig::builder().region("eu-west-2").build().unwrap();
        assert_eq!(config.endpoint(), "https://kms.eu-west-2.amazonaws.com");
    }

    #[test]
    fn test_endpoint_override_accepts_host_or_url() {
        let host = ClientConfig::builder()
            .endpoint("kms-fips.us-east-1.amazonaws.com/")
            .build()
            .unwrap();
        assert_eq!(host.endpoint(), "https://kms-fips.us-east-1.amazonaws.com");

        let url = ClientConfig::builder()
            .endpoint("http://localhost:4566")
            .build()
            .unwrap();
        assert_eq!(url.endpoint(), "http://localhost:4566");
        assert_eq!(url.endpoint_host(), "localhost:4566");
    }

    #[test]
    fn test_to_builder_region_change() {
        let config = ClientConfig::builder().region("eu-west-1").build().unwrap();
        let moved = config
            .to_builder()
            .region("eu-north-1")
            .default_endpoint()
            .build()
            .unwrap();
        assert_eq!(moved.endpoint(), "https://kms.eu-north-1.amazonaws.com");
        assert_eq!(moved.request_timeout(), config.request_timeout());
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        assert!(matches!(
            ClientConfig::builder().region("US East").build(),
            Err(ConfigError::InvalidRegion(_))
        ));
        assert!(matches!(
            ClientConfig::builder().endpoint("ftp://kms").build(),
            Err(ConfigError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            ClientConfig::builder().endpoint("  ").build(),
            Err(ConfigError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            ClientConfig::builder().request_timeout(Duration::ZERO).build(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_from_environment_map() {
        let env = HashMap::from([
            ("KMS_REGION".to_string(), "ap-southeast-2".to_string()),
            ("KMS_REQUEST_TIMEOUT_MS".to_string(), "2500".to_string()),
            ("KMS_LOG_LEVEL".to_string(), "debug".to_string()),
        ]);

        let config = ClientConfig::load(None, Some(env)).unwrap();
        assert_eq!(config.region(), "ap-southeast-2");
        assert_eq!(config.endpoint(), "https://kms.ap-southeast-2.amazonaws.com");
        assert_eq!(config.request_timeout(), Duration::from_millis(2500));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "region = \"eu-central-1\"").unwrap();
        writeln!(file, "endpoint = \"http://localhost:8080\"").unwrap();
        writeln!(file, "metadata_cache_capacity = 10").unwrap();

        let from_file = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(from_file.region(), "eu-central-1");
        assert_eq!(from_file.endpoint(), "http://localhost:8080");
        assert_eq!(from_file.metadata_cache_capacity(), 10);

        let env = HashMap::from([("KMS_REGION".to_string(), "us-west-2".to_string())]);
        let layered = ClientConfig::load(Some(file.path()), Some(env)).unwrap();
        assert_eq!(layered.region(), "us-west-2");
        assert_eq!(layered.endpoint(), "http://localhost:8080");
    }

    #[test]
    fn test_fallback_region_does_not_override_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "region = \"eu-central-1\"").unwrap();
        writeln!(file, "endpoint = \"http://localhost:8080\"").unwrap();

        let config = ClientConfig::load_layered(
            Some(file.path()),
            Some(HashMap::new()),
            Some("us-west-2".to_string()),
        )
        .unwrap();
        assert_eq!(config.region(), "eu-central-1");
        assert_eq!(config.endpoint(), "http://localhost:8080");
    }

    #[test]
    fn test_fallback_region_keeps_file_endpoint() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "endpoint = \"http://localhost:8080\"").unwrap();

        let config = ClientConfig::load_layered(
            Some(file.path()),
            Some(HashMap::new()),
            Some("us-west-2".to_string()),
        )
        .unwrap();
        assert_eq!(config.region(), "us-west-2");
        assert_eq!(config.endpoint(), "http://localhost:8080");
    }

    #[test]
    fn test_fallback_region_selects_its_endpoint() {
        let config = ClientConfig::load_layered(None, Some(HashMap::new()), Some("ap-south-1".to_string()))
            .unwrap();
        assert_eq!(config.region(), "ap-south-1");
        assert_eq!(config.endpoint(), "https://kms.ap-south-1.amazonaws.com");

        let env = HashMap::from([("KMS_REGION".to_string(), "eu-west-1".to_string())]);
        let config = ClientConfig::load_layered(None, Some(env), Some("ap-south-1".to_string())).unwrap();
        assert_eq!(config.region(), "eu-west-1");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = ClientConfig::from_file("/nonexistent/kms-client.toml");
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
