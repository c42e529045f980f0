//! Operation descriptors
//!
//! Every remote operation is a zero-sized type implementing [`Operation`]:
//! its input and output shapes plus a static [`OperationDescriptor`]. The
//! dispatcher is generic over this trait, so adding an operation means
//! adding a descriptor, never new dispatch code.
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
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Namespace of the `X-Amz-Target` header
pub const TARGET_PREFIX: &str = "TrentService";

/// Static description of one remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    /// Wire name, e.g. `DescribeKey`
    pub name: &'static str,
    /// Failure kinds the operation declares
    pub errors: &'static [ServiceErrorKind],
    /// Safe to issue more than once with the same input
    pub idempotent: bool,
}

impl OperationDescriptor {
    /// Value of the `X-Amz-Target` header
    pub fn target(&self) -> String {
        format!("{}.{}", TARGET_PREFIX, self.name)
    }

    pub fn declares(&self, kind: ServiceErrorKind) -> bool {
        self.errors.contains(&kind)
    }

    /// Map a sanitized wire code onto this operation's whitelist
    pub fn classify(&self, code: &str) -> ServiceErrorKind {
        match ServiceErrorKind::from_code(code) {
            Some(kind) if self.declares(kind) => kind,
            _ => ServiceErrorKind::Unmodeled,
        }
    }
}

/// A remote operation
pub trait Operation: Send + Sync + 'static {
    type Input: Serialize + Send + Sync;
    type Output: DeserializeOwned + Send;

    const DESCRIPTOR: OperationDescriptor;
}
