//! Structured logging setup for KMS client binaries
//!
//! The client library itself only emits `tracing` events; installing a
//! subscriber is left to the host application, which may use the helpers
//! below.
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


use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

/// Output format of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event (for production)
    Json,
    /// Human-readable lines (for development)
    Console,
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install a global subscriber, failing if one is already set
pub fn try_init(
    service_name: &str,
    default_level: &str,
    format: LogFormat,
) -> Result<(), TryInitError> {
    let filter = env_filter(default_level);

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .try_init()?,
        LogFormat::Console => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()?,
    }

    tracing::info!(service = service_name, format = ?format, "Logging initialized");
    Ok(())
}

/// Initialize JSON logging
///
/// A subscriber installed earlier (e.g. by a test harness) is left in place.
pub fn init_logging(service_name: &str, default_level: &str) {
    let _ = try_init(service_name, default_level, LogFormat::Json);
}

/// Initialize simple console logging (for development)
pub fn init_console_logging(service_name: &str, default_level: &str) {
    let _ = try_init(service_name, default_level, LogFormat::Console);
}
