//! kms-probe
//!
//! Issues single calls against a key management service endpoint and prints
//! the results as JSON. Useful for checking credentials, connectivity and
//! local emulators.
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


mod cli;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use clap::Parser;
use cli::{Cli, Command};
use kms_client::types::*;
use kms_client::{ops, KmsClient, RetryConfig};
use kms_config::ClientConfig;
use kms_logging::LogFormat;
use serde_json::json;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;

    // Initialize logging
    let format = if cli.json_logs { LogFormat::Json } else { LogFormat::Console };
    if let Err(e) = kms_logging::try_init("kms-probe", config.log_level(), format) {
        eprintln!("Logging unavailable: {}", e);
    }

    info!(
        region = config.region(),
        endpoint = config.endpoint(),
        "Configuration loaded"
    );

    let client = KmsClient::builder()
        .config(config)
        .build()
        .context("Failed to create KMS client")?;
    let retry = if cli.retries > 0 {
        RetryConfig {
            max_retries: cli.retries,
            ..RetryConfig::default()
        }
    } else {
        RetryConfig::disabled()
    };

    let output = tokio::select! {
        result = run(&client, &retry, cli.command) => result,
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
            client.shutdown().await;
            Err(anyhow::anyhow!("Interrupted"))
        }
    };

    client.shutdown().await;

    match output {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Probe failed");
            Err(e)
        }
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let config = match &cli.config {
        Some(path) => ClientConfig::load(Some(path.as_path()), None)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ClientConfig::from_env().context("Failed to load configuration")?,
    };

    let mut builder = config.to_builder();
    if let Some(region) = &cli.region {
        builder = builder.region(region.clone()).default_endpoint();
    }
    if let Some(endpoint) = &cli.endpoint {
        builder = builder.endpoint(endpoint.clone());
    }

    builder.build().context("Invalid configuration")
}

async fn run(client: &KmsClient, retry: &RetryConfig, command: Command) -> Result<serde_json::Value> {
    let value = match command {
        Command::GenerateRandom { bytes } => {
            let response = client
                .invoke_with_retry::<ops::GenerateRandom>(retry, &GenerateRandomRequest::with_bytes(bytes))
                .await?;
            json!({
                "bytes": response.plaintext.as_ref().map(Vec::len).unwrap_or(0),
                "plaintext": response.plaintext.map(|p| STANDARD.encode(p)),
            })
        }
        Command::DescribeKey { key_id } => {
            let response = client
                .invoke_with_retry::<ops::DescribeKey>(retry, &DescribeKeyRequest::new(key_id))
                .await?;
            if let Some(metadata) = response.key_metadata.as_ref().filter(|m| !m.is_usable()) {
                warn!(key_id = %metadata.key_id, state = ?metadata.key_state, "Key is not usable");
            }
            serde_json::to_value(response)?
        }
        Command::ListKeys { limit } => {
            let request = ListKeysRequest {
                limit,
                ..Default::default()
            };
            let response = client.invoke_with_retry::<ops::ListKeys>(retry, &request).await?;
            serde_json::to_value(response)?
        }
        Command::ListAliases { key_id } => {
            let request = ListAliasesRequest {
                key_id,
                ..Default::default()
            };
            let response = client.invoke_with_retry::<ops::ListAliases>(retry, &request).await?;
            serde_json::to_value(response)?
        }
        Command::Encrypt { key_id, plaintext } => {
            let request = EncryptRequest::new(key_id, plaintext.into_bytes());
            let response = client.invoke_with_retry::<ops::Encrypt>(retry, &request).await?;
            json!({
                "keyId": response.key_id,
                "ciphertext": response.ciphertext_blob.map(|c| STANDARD.encode(c)),
            })
        }
        Command::Decrypt { ciphertext, key_id } => {
            let blob = STANDARD
                .decode(ciphertext.trim())
                .context("Ciphertext is not valid base64")?;
            let mut request = DecryptRequest::new(blob);
            request.key_id = key_id;
            let response = client.invoke_with_retry::<ops::Decrypt>(retry, &request).await?;
            let plaintext = response.plaintext.unwrap_or_default();
            json!({
                "keyId": response.key_id,
                "plaintext": String::from_utf8_lossy(&plaintext),
            })
        }
    };

    Ok(value)
}
