#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vigil_api::model::{ExportFormat, PolicyStatus, Severity, ViolationFilter, ViolationStatus};
use vigil_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn sample_violation(id: &str, severity: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "rule_id": "rule-001",
        "rule_name": "Large Cash Deposit Threshold",
        "account_id": "ACC-10042",
        "severity": severity,
        "status": status,
        "created_at": "2026-02-22T06:02:14Z",
        "snapshot": { "amount": 14500 },
        "explanation": "Cash deposit exceeds the reporting threshold.",
        "suggestions": ["File CTR within 15 days"]
    })
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "analyst@acmefinancial.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-123",
            "token_type": "bearer"
        })))
        .mount(&server)
        .await;

    let token = client
        .login("analyst@acmefinancial.com", "hunter2")
        .await
        .unwrap();
    assert_eq!(token.access_token, "tok-123");
    assert_eq!(token.token_type, "bearer");
}

#[tokio::test]
async fn test_login_failure_is_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let result = client.login("analyst@acmefinancial.com", "wrong").await;
    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(message.contains("Invalid credentials"), "got: {message}");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_bearer_token_attached_after_set() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/policies"))
        .and(header("authorization", "Bearer tok-456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    client.set_token("tok-456".to_string().into());
    let policies = client.list_policies().await.unwrap();
    assert!(policies.is_empty());
}

// ── Query parameter tests ───────────────────────────────────────────

#[tokio::test]
async fn test_violation_filters_serialized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/violations"))
        .and(query_param("severity", "high"))
        .and(query_param("status", "open"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([sample_violation("vio-001", "high", "open")])),
        )
        .mount(&server)
        .await;

    let filter = ViolationFilter {
        severity: Some(Severity::High),
        status: Some(ViolationStatus::Open),
        ..ViolationFilter::default()
    };
    let violations = client.list_violations(&filter).await.unwrap();

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].severity, Severity::High);
    assert_eq!(violations[0].status, ViolationStatus::Open);
}

#[tokio::test]
async fn test_empty_filter_sends_no_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/violations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    client
        .list_violations(&ViolationFilter::any())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None, "expected no query string");
}

// ── Error normalization tests ───────────────────────────────────────

#[tokio::test]
async fn test_not_found_maps_to_not_found_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/violations/vio-999"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Violation not found" })),
        )
        .mount(&server)
        .await;

    let result = client.violation_detail("vio-999").await;
    assert!(matches!(result, Err(ref e) if e.is_not_found()), "got: {result:?}");
}

#[tokio::test]
async fn test_application_error_carries_status_and_detail() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/scans/run"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "detail": "No rules enabled" })),
        )
        .mount(&server)
        .await;

    match client.run_scan().await {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 422);
            assert!(message.contains("No rules enabled"), "got: {message}");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/policies"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    match client.list_policies().await {
        Err(Error::Deserialization { ref message, .. }) => {
            assert!(message.contains("body preview"), "got: {message}");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── Mutation tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_toggle_rule_sends_patch_body() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/rules/rule-005"))
        .and(body_json(json!({ "enabled": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "rule-005",
            "policy_id": "pol-002",
            "name": "Cross-Border High Value",
            "description": "Monitor international transfers exceeding $50,000.",
            "collection": "transactions",
            "severity": "high",
            "enabled": true,
            "pipeline": "[]",
            "updated_at": "2026-02-14T09:00:00Z"
        })))
        .mount(&server)
        .await;

    let rule = client.set_rule_enabled("rule-005", true).await.unwrap();
    assert!(rule.enabled);
}

// ── Binary transport tests ──────────────────────────────────────────

#[tokio::test]
async fn test_upload_policy_is_multipart() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/policies"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "pol-demo-1",
            "name": "aml",
            "file_name": "aml.pdf",
            "uploaded_at": "2026-02-22T10:00:00Z",
            "status": "processing",
            "rules_count": 0
        })))
        .mount(&server)
        .await;

    let policy = client
        .upload_policy("aml.pdf", b"%PDF-1.4 fake".to_vec())
        .await
        .unwrap();

    assert_eq!(policy.status, PolicyStatus::Processing);
    assert_eq!(policy.rules_count, 0);

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("multipart/form-data"),
        "got content-type: {content_type}"
    );
}

#[tokio::test]
async fn test_export_scan_builds_artifact() {
    let (server, client) = setup().await;

    let csv = "rule_name,violations_found\nLarge Cash Deposit Threshold,3\n";
    Mock::given(method("GET"))
        .and(path("/scans/6a1f/export"))
        .and(query_param("format", "csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(csv))
        .mount(&server)
        .await;

    let export = client.export_scan("6a1f", ExportFormat::Csv).await.unwrap();

    assert_eq!(export.file_name, "scan-6a1f.csv");
    assert_eq!(export.content_type, "text/csv");
    assert_eq!(export.bytes.as_ref(), csv.as_bytes());
}
