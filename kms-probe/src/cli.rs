//! Command line definition for kms-probe
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


use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Probe a key management service endpoint
#[derive(Debug, Parser)]
#[command(name = "kms-probe", version, about)]
pub struct Cli {
    /// Region, overriding KMS_REGION
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Endpoint host or URL, overriding KMS_ENDPOINT
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Configuration file (TOML, YAML or JSON), overriding KMS_CONFIG_FILE
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Retries for idempotent calls
    #[arg(long, global = true, default_value_t = 0)]
    pub retries: u32,

    /// Emit JSON logs instead of console logs
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch random bytes and print them base64-encoded
    GenerateRandom {
        #[arg(long, default_value_t = 32)]
        bytes: u32,
    },
    /// Print a key's metadata
    DescribeKey {
        /// Key id, key ARN, alias name or alias ARN
        key_id: String,
    },
    /// List keys
    ListKeys {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List aliases, optionally for one key
    ListAliases {
        #[arg(long)]
        key_id: Option<String>,
    },
    /// Encrypt UTF-8 text and print the ciphertext base64-encoded
    Encrypt {
        key_id: String,
        plaintext: String,
    },
    /// Decrypt base64 ciphertext and print the plaintext
    Decrypt {
        ciphertext: String,
        /// Required for asymmetric keys
        #[arg(long)]
        key_id: Option<String>,
    },
}
