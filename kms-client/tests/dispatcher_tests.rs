//! Dispatcher Integration Tests
//!
//! Every call goes through `StubTransport`; nothing touches the network.

use kms_client::ops::{self, DescribeKey};
use kms_client::transport::HttpRequest;
use kms_client::types::*;
use kms_client::{
    ClientError, HttpResponse, KmsClient, KmsError, Operation, ServiceErrorKind, StubTransport,
    TransportError,
};
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn client_with(transport: Arc<StubTransport>) -> KmsClient {
    KmsClient::builder().transport(transport).build().unwrap()
}

fn echo_key_metadata(request: &HttpRequest) -> Result<HttpResponse, TransportError> {
    let body: serde_json::Value =
        serde_json::from_slice(&request.body).map_err(|e| TransportError::Io(e.to_string()))?;
    let key_id = body["KeyId"].as_str().unwrap_or_default().to_string();
    let response = serde_json::json!({ "KeyMetadata": { "KeyId": key_id, "Enabled": true } });

    Ok(HttpResponse::new(200, response.to_string())
        .with_header("x-amzn-RequestId", format!("req-{}", key_id)))
}

// ============================================================================
// Success paths
// ============================================================================

#[tokio::test]
async fn test_generate_random_returns_requested_bytes() {
    // 32 zero bytes
    let plaintext = format!("{}=", "A".repeat(43));
    let transport = Arc::new(StubTransport::responding(
        200,
        serde_json::json!({ "Plaintext": plaintext }).to_string(),
    ));
    let client = client_with(transport.clone());

    let response = client
        .generate_random(&GenerateRandomRequest::with_bytes(32))
        .await
        .unwrap();

    assert_eq!(response.plaintext.map(|bytes| bytes.len()), Some(32));
    let request = transport.last_request().await.unwrap();
    assert_eq!(&request.body[..], br#"{"NumberOfBytes":32}"#);
}

#[tokio::test]
async fn test_describe_key_decodes_metadata() {
    let transport = Arc::new(StubTransport::responding(
        200,
        r#"{"KeyMetadata":{"KeyId":"1234abcd","Arn":"arn:aws:kms:us-east-1:111122223333:key/1234abcd","Enabled":true,"KeyState":"Enabled","KeyUsage":"ENCRYPT_DECRYPT","CreationDate":1.7E9}}"#,
    ));
    let client = client_with(transport);

    let response = client
        .describe_key(&DescribeKeyRequest::new("alias/test"))
        .await
        .unwrap();

    let metadata = response.key_metadata.unwrap();
    assert_eq!(metadata.key_id, "1234abcd");
    assert_eq!(metadata.key_state, Some(KeyState::Enabled));
    assert_eq!(metadata.key_usage, Some(KeyUsage::EncryptDecrypt));
    assert!(metadata.creation_date.is_some());
}

#[tokio::test]
async fn test_encrypt_then_decrypt_payloads() {
    let transport = Arc::new(StubTransport::new(|request| {
        let target = request.header("x-amz-target").unwrap_or_default();
        let body = if target.ends_with(".Encrypt") {
            r#"{"CiphertextBlob":"c2VhbGVk","KeyId":"arn:key/1","EncryptionAlgorithm":"SYMMETRIC_DEFAULT"}"#
        } else {
            r#"{"Plaintext":"aGVsbG8=","KeyId":"arn:key/1"}"#
        };
        Ok(HttpResponse::new(200, body))
    }));
    let client = client_with(transport.clone());

    let encrypted = client
        .encrypt(&EncryptRequest::new("alias/app", b"hello".to_vec()))
        .await
        .unwrap();
    let ciphertext = encrypted.ciphertext_blob.unwrap();
    assert_eq!(ciphertext, b"sealed".to_vec());

    let decrypted = client.decrypt(&DecryptRequest::new(ciphertext)).await.unwrap();
    assert_eq!(decrypted.plaintext, Some(b"hello".to_vec()));

    let requests = transport.requests().await;
    assert_eq!(&requests[0].body[..], br#"{"KeyId":"alias/app","Plaintext":"aGVsbG8="}"#);
    assert_eq!(&requests[1].body[..], br#"{"CiphertextBlob":"c2VhbGVk"}"#);
}

#[tokio::test]
async fn test_void_operation_accepts_empty_body() {
    let transport = Arc::new(StubTransport::responding(200, ""));
    let client = client_with(transport);

    client
        .create_alias(&AliasRequest::new("alias/app", "1234abcd"))
        .await
        .unwrap();
}

// ============================================================================
// Default requests
// ============================================================================

async fn assert_default_matches_explicit<Op>()
where
    Op: Operation,
    Op::Input: Default,
{
    let implicit = Arc::new(StubTransport::responding(200, "{}"));
    let explicit = Arc::new(StubTransport::responding(200, "{}"));

    let _ = client_with(implicit.clone()).invoke_default::<Op>().await;
    let _ = client_with(explicit.clone())
        .invoke::<Op>(&Op::Input::default())
        .await;

    let implicit = implicit.last_request().await.unwrap();
    let explicit = explicit.last_request().await.unwrap();
    assert_eq!(implicit, explicit, "{} default request differs", Op::DESCRIPTOR.name);
}

#[tokio::test]
async fn test_default_requests_match_explicit_requests() {
    assert_default_matches_explicit::<ops::CreateKey>().await;
    assert_default_matches_explicit::<ops::ListKeys>().await;
    assert_default_matches_explicit::<ops::ListAliases>().await;
    assert_default_matches_explicit::<ops::RetireGrant>().await;
    assert_default_matches_explicit::<ops::GenerateRandom>().await;
    assert_default_matches_explicit::<ops::DescribeCustomKeyStores>().await;
}

#[tokio::test]
async fn test_default_method_sends_empty_document() {
    let transport = Arc::new(StubTransport::responding(200, r#"{"Keys":[],"Truncated":false}"#));
    let client = client_with(transport.clone());

    let keys = client.list_keys_default().await.unwrap();

    assert!(keys.keys.is_empty());
    let request = transport.last_request().await.unwrap();
    assert_eq!(request.header("x-amz-target"), Some("TrentService.ListKeys"));
    assert_eq!(&request.body[..], b"{}");
}

// ============================================================================
// Service faults
// ============================================================================

#[tokio::test]
async fn test_describe_unknown_alias_is_not_found() {
    let transport = Arc::new(StubTransport::service_error(
        404,
        "NotFoundException",
        "Alias arn:aws:kms:us-east-1:111122223333:alias/test is not found.",
    ));
    let client = client_with(transport);

    let error = client
        .describe_key(&DescribeKeyRequest::new("alias/test"))
        .await
        .unwrap_err();

    assert!(error.is_service_fault());
    assert_eq!(error.service_kind(), Some(ServiceErrorKind::NotFound));
    let service = error.service_error().unwrap();
    assert_eq!(service.status, 404);
    assert_eq!(service.operation, "DescribeKey");
    assert_eq!(service.request_id.as_deref(), Some("stub-request"));
    assert!(service.message.as_deref().unwrap().contains("alias/test"));
}

#[rstest]
#[case::plain_code(r#"{"__type":"NotFoundException"}"#, None, ServiceErrorKind::NotFound)]
#[case::namespaced_code(r#"{"__type":"com.amazonaws.kms#InvalidArnException","message":"bad"}"#, None, ServiceErrorKind::InvalidArn)]
#[case::lowercase_code_field(r#"{"code":"DependencyTimeoutException"}"#, None, ServiceErrorKind::DependencyTimeout)]
#[case::header_only("", Some("KMSInternalException:http://internal/"), ServiceErrorKind::KmsInternal)]
#[case::undeclared_code(r#"{"__type":"DisabledException"}"#, None, ServiceErrorKind::Unmodeled)]
#[case::unknown_code(r#"{"__type":"ValidationException"}"#, None, ServiceErrorKind::Unmodeled)]
#[case::no_code("Service Unavailable", None, ServiceErrorKind::Unmodeled)]
#[tokio::test]
async fn test_error_code_mapping(
    #[case] body: &'static str,
    #[case] header: Option<&'static str>,
    #[case] expected: ServiceErrorKind,
) {
    let transport = Arc::new(StubTransport::new(move |_| {
        let response = HttpResponse::new(400, body);
        Ok(match header {
            Some(value) => response.with_header("x-amzn-ErrorType", value),
            None => response,
        })
    }));
    let client = client_with(transport);

    let error = client
        .invoke::<DescribeKey>(&DescribeKeyRequest::new("1234abcd"))
        .await
        .unwrap_err();

    assert_eq!(error.service_kind(), Some(expected));
}

#[tokio::test]
async fn test_unmodeled_error_keeps_raw_code() {
    let transport = Arc::new(StubTransport::service_error(
        400,
        "ValidationException",
        "1 validation error detected: Value '2000' at 'numberOfBytes' failed to satisfy constraint",
    ));
    let client = client_with(transport);

    let error = client
        .generate_random(&GenerateRandomRequest::with_bytes(2000))
        .await
        .unwrap_err();

    let service = error.service_error().unwrap();
    assert_eq!(service.kind, ServiceErrorKind::Unmodeled);
    assert_eq!(service.code.as_deref(), Some("ValidationException"));
    assert!(!service.body.is_empty());
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn test_missing_required_value_is_reported_by_the_service() {
    // An empty key id is accepted locally and rejected by the service
    let transport = Arc::new(StubTransport::service_error(400, "NotFoundException", "Invalid keyId"));
    let client = client_with(transport.clone());

    let error = client
        .encrypt(&EncryptRequest::new("", b"data".to_vec()))
        .await
        .unwrap_err();

    assert_eq!(error.service_kind(), Some(ServiceErrorKind::NotFound));
    assert_eq!(transport.request_count().await, 1);
}

#[tokio::test]
async fn test_bare_server_error_is_unmodeled_and_retryable() {
    let transport = Arc::new(StubTransport::responding(503, ""));
    let client = client_with(transport);

    let error = client.list_keys_default().await.unwrap_err();

    let service = error.service_error().unwrap();
    assert_eq!(service.kind, ServiceErrorKind::Unmodeled);
    assert_eq!(service.code, None);
    assert!(error.is_retryable());
}

// ============================================================================
// Local faults
// ============================================================================

#[tokio::test]
async fn test_transport_disconnect_is_a_local_fault_for_every_operation_kind() {
    let transport = Arc::new(StubTransport::failing(TransportError::Connect(
        "connection reset by peer".to_string(),
    )));
    let client = client_with(transport);

    let errors: Vec<KmsError> = vec![
        client.describe_key(&DescribeKeyRequest::new("k")).await.unwrap_err(),
        client.create_key_default().await.unwrap_err(),
        client.list_aliases_default().await.unwrap_err(),
        client.enable_key(&KeyIdRequest::new("k")).await.unwrap_err(),
        client
            .encrypt(&EncryptRequest::new("k", b"x".to_vec()))
            .await
            .unwrap_err(),
        client
            .generate_random(&GenerateRandomRequest::with_bytes(16))
            .await
            .unwrap_err(),
        client
            .retire_grant(&RetireGrantRequest::default())
            .await
            .unwrap_err(),
    ];

    for error in errors {
        assert!(error.is_client_fault(), "expected local fault, got {:?}", error);
        assert_eq!(error.service_kind(), None);
        assert!(matches!(
            error,
            KmsError::Client(ClientError::Transport(TransportError::Connect(_)))
        ));
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_a_local_fault() {
    let transport = Arc::new(StubTransport::responding(200, "{\"KeyMetadata\": \"not an object\"}"));
    let client = client_with(transport);

    let error = client
        .describe_key(&DescribeKeyRequest::new("k"))
        .await
        .unwrap_err();

    assert!(matches!(error, KmsError::Client(ClientError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_request_timeout_is_a_local_fault() {
    let transport = Arc::new(StubTransport::failing(TransportError::Timeout(
        "operation timed out".to_string(),
    )));
    let client = client_with(transport);

    let error = client.list_keys_default().await.unwrap_err();

    assert!(error.is_client_fault());
    assert!(error.is_retryable());
}

// ============================================================================
// Concurrency, cancellation and shutdown
// ============================================================================

#[tokio::test]
async fn test_concurrent_calls_keep_their_own_results() {
    let transport = Arc::new(StubTransport::new(echo_key_metadata).with_delay(Duration::from_millis(10)));
    let client = client_with(transport.clone());

    let mut handles = Vec::new();
    for i in 0..32 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let key_id = format!("key-{}", i);
            let (call_id, result) = client
                .invoke_tracked::<DescribeKey>(&DescribeKeyRequest::new(key_id.clone()))
                .await;
            let metadata = client.response_metadata(&call_id).await;
            (key_id, result, metadata)
        }));
    }

    for handle in handles {
        let (key_id, result, metadata) = handle.await.unwrap();
        let response = result.unwrap();
        assert_eq!(response.key_metadata.unwrap().key_id, key_id);

        let metadata = metadata.unwrap();
        assert_eq!(metadata.request_id, Some(format!("req-{}", key_id)));
        assert_eq!(metadata.operation, "DescribeKey");
    }

    assert_eq!(transport.request_count().await, 32);
}

#[tokio::test]
async fn test_shutdown_then_invoke_fails_fast() {
    let transport = Arc::new(StubTransport::responding(200, "{}"));
    let client = client_with(transport.clone());

    client.shutdown().await;
    let error = client
        .describe_key(&DescribeKeyRequest::new("alias/test"))
        .await
        .unwrap_err();

    assert!(matches!(error, KmsError::Client(ClientError::Shutdown)));
    assert_eq!(transport.request_count().await, 0);
    assert!(transport.is_shut_down());
}

#[tokio::test]
async fn test_shutdown_aborts_in_flight_calls() {
    let transport = Arc::new(StubTransport::responding(200, "{}").with_delay(Duration::from_secs(30)));
    let client = client_with(transport);

    let in_flight = {
        let client = client.clone();
        tokio::spawn(async move { client.list_keys_default().await })
    };

    tokio::time::sleep(Duration::from_millis(20)).await;
    client.shutdown().await;

    let result = tokio::time::timeout(Duration::from_secs(5), in_flight)
        .await
        .expect("in-flight call did not finish after shutdown")
        .unwrap();
    assert!(matches!(result, Err(KmsError::Client(ClientError::Shutdown))));
}

#[tokio::test]
async fn test_cancellation_token_aborts_calls() {
    let token = CancellationToken::new();
    let transport = Arc::new(StubTransport::responding(200, "{}").with_delay(Duration::from_secs(30)));
    let client = KmsClient::builder()
        .transport(transport)
        .cancellation_token(token.clone())
        .build()
        .unwrap();

    let in_flight = {
        let client = client.clone();
        tokio::spawn(async move { client.list_aliases_default().await })
    };

    tokio::time::sleep(Duration::from_millis(20)).await;
    token.cancel();

    let result = in_flight.await.unwrap();
    assert!(matches!(result, Err(KmsError::Client(ClientError::Cancelled))));
    assert!(!client.is_shut_down());
}

#[tokio::test]
async fn test_response_metadata_for_failed_call() {
    let transport = Arc::new(StubTransport::service_error(400, "DisabledException", "Key is disabled"));
    let client = client_with(transport);

    let (call_id, result) = client
        .invoke_tracked::<ops::Encrypt>(&EncryptRequest::new("k", b"x".to_vec()))
        .await;

    assert_eq!(result.unwrap_err().service_kind(), Some(ServiceErrorKind::Disabled));
    let metadata = client.response_metadata(&call_id).await.unwrap();
    assert_eq!(metadata.status, 400);
    assert_eq!(metadata.request_id.as_deref(), Some("stub-request"));
}
