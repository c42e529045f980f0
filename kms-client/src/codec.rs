//! JSON 1.1 wire codec
//!
//! Requests are JSON documents posted to `/`. A successful answer carries
//! the result document (possibly empty); a failed one carries an error
//! envelope such as
//!
//! ```json
//! {"__type": "com.amazonaws.kms#NotFoundException", "message": "Alias ... is not found."}
//! ```
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
use crate::transport::HttpResponse;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
pub const TARGET_HEADER: &str = "x-amz-target";
pub const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";
pub const REQUEST_ID_HEADER: &str = "x-amzn-requestid";

/// Code and message extracted from a failed answer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub code: Option<String>,
    pub message: Option<String>,
}

pub fn encode_request<T: Serialize>(input: &T) -> Result<Bytes, ClientError> {
    serde_json::to_vec(input)
        .map(Bytes::from)
        .map_err(ClientError::Serialization)
}

/// Decode a successful answer; an empty body reads as `{}`
pub fn decode_response<T: DeserializeOwned>(body: &[u8]) -> Result<T, ClientError> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}".as_slice()
    } else {
        body
    };

    serde_json::from_slice(body)
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to decode response body: {}", e)))
}

/// Extract the error envelope of a failed answer
///
/// The body's `__type` (or `code`) wins over the `x-amzn-ErrorType` header.
/// Bodies that are not JSON objects yield no code and no message.
pub fn decode_error(response: &HttpResponse) -> ErrorEnvelope {
    let document: Option<Value> = serde_json::from_slice(&response.body).ok();
    let object = document.as_ref().and_then(Value::as_object);

    let field = |names: &[&str]| -> Option<String> {
        let object = object?;
        names
            .iter()
            .find_map(|name| object.get(*name).and_then(Value::as_str))
            .map(str::to_string)
    };

    let code = field(&["__type", "code", "Code"])
        .and_then(|raw| sanitize_error_code(&raw))
        .or_else(|| {
            response
                .header(ERROR_TYPE_HEADER)
                .and_then(sanitize_error_code)
        });

    ErrorEnvelope {
        code,
        message: field(&["message", "Message", "errorMessage"]),
    }
}

/// Strip the `namespace#` prefix and any `:detail` suffix from a wire code
pub fn sanitize_error_code(raw: &str) -> Option<String> {
    let code = raw.split(':').next().unwrap_or(raw);
    let code = code.rsplit('#').next().unwrap_or(code).trim();
    if code.is_empty() {
        None
    } else {
        Some(code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kms_types::{EmptyResponse, GenerateRandomRequest, ListKeysResponse};
    use rstest::rstest;

    #[rstest]
    #[case("NotFoundException", Some("NotFoundException"))]
    #[case("com.amazonaws.kms#NotFoundException", Some("NotFoundException"))]
    #[case("DisabledException:http://internal.amazon.com/coral/com.amazon.coral.validate/", Some("DisabledException"))]
    #[case("aws.protocoltests#InvalidArnException:extra", Some("InvalidArnException"))]
    #[case("  ", None)]
    #[case("ns#", None)]
    fn test_sanitize_error_code(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(sanitize_error_code(raw).as_deref(), expected);
    }

    #[test]
    fn test_envelope_from_body() {
        let response = HttpResponse::new(
            400,
            r#"{"__type":"com.amazonaws.kms#NotFoundException","message":"Alias not found"}"#,
        );
        let envelope = decode_error(&response);
        assert_eq!(envelope.code.as_deref(), Some("NotFoundException"));
        assert_eq!(envelope.message.as_deref(), Some("Alias not found"));
    }

    #[test]
    fn test_envelope_capitalized_message() {
        let response = HttpResponse::new(400, r#"{"__type":"DisabledException","Message":"Key is disabled"}"#);
        assert_eq!(decode_error(&response).message.as_deref(), Some("Key is disabled"));
    }

    #[test]
    fn test_envelope_falls_back_to_header() {
        let response = HttpResponse::new(400, "{}")
            .with_header("X-Amzn-ErrorType", "KMSInvalidStateException:http://internal/");
        assert_eq!(
            decode_error(&response).code.as_deref(),
            Some("KMSInvalidStateException")
        );
    }

    #[test]
    fn test_envelope_without_code() {
        let response = HttpResponse::new(502, "<html>Bad Gateway</html>");
        assert_eq!(decode_error(&response), ErrorEnvelope::default());
    }

    #[test]
    fn test_empty_body_decodes_as_empty_object() {
        let unit: EmptyResponse = decode_response(b"").unwrap();
        assert_eq!(unit, EmptyResponse {});

        let keys: ListKeysResponse = decode_response(b" \n").unwrap();
        assert!(keys.keys.is_empty());
        assert!(!keys.truncated);
    }

    #[test]
    fn test_malformed_success_body_is_invalid_response() {
        let result: Result<ListKeysResponse, _> = decode_response(b"{\"Keys\": 7}");
        assert!(matches!(result, Err(ClientError::InvalidResponse(_))));
    }

    #[test]
    fn test_encode_omits_absent_fields() {
        let body = encode_request(&GenerateRandomRequest::default()).unwrap();
        assert_eq!(&body[..], b"{}");

        let body = encode_request(&GenerateRandomRequest::with_bytes(32)).unwrap();
        assert_eq!(&body[..], br#"{"NumberOfBytes":32}"#);
    }
}
