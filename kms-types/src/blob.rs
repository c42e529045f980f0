//! Base64 wire encoding for binary fields
//!
//! Use with `#[serde(with = "crate::blob")]` on `Vec<u8>` fields and
//! `#[serde(with = "crate::blob::option")]` on `Option<Vec<u8>>` fields.
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


use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{de, Deserialize, Deserializer, Serializer};

pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&STANDARD.encode(bytes))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded = String::deserialize(deserializer)?;
    STANDARD.decode(encoded.as_bytes()).map_err(de::Error::custom)
}

pub mod option {
    use super::STANDARD;
    use base64::Engine;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match bytes {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(encoded) => STANDARD
                .decode(encoded.as_bytes())
                .map(Some)
                .map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        #[serde(with = "crate::blob")]
        data: Vec<u8>,
        #[serde(default, with = "crate::blob::option", skip_serializing_if = "Option::is_none")]
        extra: Option<Vec<u8>>,
    }

    #[test]
    fn test_blob_is_base64_on_the_wire() {
        let payload = Payload {
            data: b"hello".to_vec(),
            extra: None,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"data":"aGVsbG8="}"#);
    }

    #[test]
    fn test_missing_optional_blob_is_none() {
        let payload: Payload = serde_json::from_str(r#"{"data":""}"#).unwrap();
        assert!(payload.data.is_empty());
        assert_eq!(payload.extra, None);
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        let result: Result<Payload, _> = serde_json::from_str(r#"{"data":"%%%"}"#);
        assert!(result.is_err());
    }
}
