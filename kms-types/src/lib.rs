//! KMS Types
//!
//! Request and response shapes for the key management service, grouped by
//! resource: keys, grants, aliases, custom key stores, cryptographic
//! operations and tags. Field names follow the service's `PascalCase`
//! JSON wire names; byte payloads travel as base64 and timestamps as epoch
//! seconds.
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


pub mod blob;
pub mod timestamp;
pub mod enums;
pub mod key;
pub mod grant;
pub mod alias;
pub mod custom_key_store;
pub mod crypto;
pub mod tag;

pub use enums::*;
pub use key::*;
pub use grant::*;
pub use alias::*;
pub use custom_key_store::*;
pub use crypto::*;
pub use tag::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Encryption context: non-secret key/value pairs bound to a ciphertext
pub type EncryptionContext = HashMap<String, String>;

/// Response body of operations that return nothing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyResponse {}
