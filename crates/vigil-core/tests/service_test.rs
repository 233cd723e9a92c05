#![allow(clippy::unwrap_used)]
// End-to-end tests for `DataService`, mostly in demo mode with a
// zero-latency fixture store. Live mode is exercised against wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vigil_api::ApiClient;
use vigil_core::cache::{NO_PARAMS, QueryKey, fingerprint};
use vigil_core::model::{
    CaseFilter, CreateCaseRequest, PolicyStatus, Severity, ViolationFilter, ViolationStatus,
};
use vigil_core::{CoreError, DataService, FixtureStore, LatencyProfile};

// ── Helpers ─────────────────────────────────────────────────────────

fn service_with_base(base: &str) -> DataService {
    let api = ApiClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap());
    DataService::with_parts(api, FixtureStore::seeded(LatencyProfile::zero()))
}

/// A service whose live gateway points nowhere; demo-only tests.
async fn demo_service() -> DataService {
    let service = service_with_base("http://127.0.0.1:9/");
    service.enter_demo().await;
    service
}

async fn mount_auth(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-live",
            "token_type": "bearer"
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-1",
            "email": "analyst@acmefinancial.com",
            "role": "analyst",
            "company_id": "comp-001",
            "company_name": "Acme Financial Services"
        })))
        .mount(server)
        .await;
}

// ── Scenario: policy upload and rule extraction ─────────────────────

#[tokio::test]
async fn upload_policy_then_extract_rules() {
    let service = demo_service().await;

    let policy = service
        .upload_policy("aml.pdf", b"%PDF-1.4".to_vec())
        .await
        .unwrap();
    assert_eq!(policy.status, PolicyStatus::Processing);
    assert_eq!(policy.rules_count, 0);

    // The policies key was invalidated, so this read sees the upload.
    let policies = service.policies().await.unwrap();
    assert!(policies.iter().any(|p| p.id == policy.id));

    // Prime the rules cache, then extract.
    let before = service.rules(None).await.unwrap();
    assert!(service.cache().is_fresh(&QueryKey::of("rules"), NO_PARAMS));

    let created = service.extract_rules(&policy.id).await.unwrap().unwrap();
    assert_eq!(created.len(), 2);
    assert!(!service.cache().is_fresh(&QueryKey::of("rules"), NO_PARAMS));

    let after = service.rules(None).await.unwrap();
    assert_eq!(after.len(), before.len() + 2);
    assert!(
        after
            .iter()
            .filter(|r| r.policy_id == policy.id)
            .count()
            == 2
    );
}

// ── Scenario: run scan ──────────────────────────────────────────────

#[tokio::test]
async fn run_scan_invalidates_scans_violations_and_dashboard() {
    let service = demo_service().await;

    service.scans().await.unwrap();
    service.violations(&ViolationFilter::any()).await.unwrap();
    service.dashboard_summary().await.unwrap();
    let scans_key = QueryKey::of("scans");
    let violations_key = QueryKey::of("violations");
    let summary_key = QueryKey::of("dashboard-summary");
    assert!(service.cache().is_fresh(&scans_key, NO_PARAMS));
    assert!(
        service
            .cache()
            .is_fresh(&violations_key, fingerprint(&ViolationFilter::any()))
    );
    assert!(service.cache().is_fresh(&summary_key, NO_PARAMS));

    let scan = service.run_scan().await.unwrap();

    assert!(!service.cache().is_fresh(&scans_key, NO_PARAMS));
    assert!(
        !service
            .cache()
            .is_fresh(&violations_key, fingerprint(&ViolationFilter::any()))
    );
    assert!(!service.cache().is_fresh(&summary_key, NO_PARAMS));

    // The seed has five open violations; the demo scan counts them.
    assert_eq!(scan.total_violations, 5);
    assert_eq!(service.scans().await.unwrap()[0].id, scan.id);
}

// ── Invalidation correctness ────────────────────────────────────────

#[tokio::test]
async fn toggle_rule_leaves_violations_cache_fresh() {
    let service = demo_service().await;

    service.rules(None).await.unwrap();
    service.violations(&ViolationFilter::any()).await.unwrap();

    service.toggle_rule("rule-001", false).await.unwrap().unwrap();

    assert!(!service.cache().is_fresh(&QueryKey::of("rules"), NO_PARAMS));
    assert!(
        service
            .cache()
            .is_fresh(&QueryKey::of("violations"), fingerprint(&ViolationFilter::any())),
        "violations are not in the toggle-rule invalidation set"
    );

    let rules = service.rules(None).await.unwrap();
    assert!(!rules.iter().find(|r| r.id == "rule-001").unwrap().enabled);
}

#[tokio::test]
async fn toggling_twice_is_idempotent_but_still_refetches() {
    let service = demo_service().await;

    service.toggle_rule("rule-005", true).await.unwrap().unwrap();
    let first = service.rules(None).await.unwrap();

    service.toggle_rule("rule-005", true).await.unwrap().unwrap();
    // The second toggle invalidated the key again...
    assert!(!service.cache().is_fresh(&QueryKey::of("rules"), NO_PARAMS));
    // ...but the refetched data is unchanged.
    let second = service.rules(None).await.unwrap();
    assert_eq!(first, second);
}

// ── Filter composition ──────────────────────────────────────────────

#[tokio::test]
async fn violation_filters_compose_and_empty_filter_returns_all() {
    let service = demo_service().await;

    let filtered = service
        .violations(&ViolationFilter {
            severity: Some(Severity::High),
            status: Some(ViolationStatus::Open),
            ..ViolationFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(
        filtered.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(),
        ["vio-001", "vio-008"]
    );

    let all = service.violations(&ViolationFilter::any()).await.unwrap();
    assert_eq!(all.len(), 8);
}

// ── Scenario: remediation ───────────────────────────────────────────

#[tokio::test]
async fn remediation_updates_status_and_keeps_violation_listed() {
    let service = demo_service().await;

    let updated = service
        .remediate_violation("vio-001", "Filed CTR")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, ViolationStatus::Remediated);

    let all = service.violations(&ViolationFilter::any()).await.unwrap();
    let vio = all.iter().find(|v| v.id == "vio-001").unwrap();
    assert_eq!(vio.status, ViolationStatus::Remediated);
    assert_eq!(vio.remediation_note.as_deref(), Some("Filed CTR"));
}

#[tokio::test]
async fn empty_remediation_note_is_rejected_before_any_write() {
    let service = demo_service().await;

    let result = service.remediate_violation("vio-001", "   ").await;
    assert!(matches!(result, Err(CoreError::Validation { .. })));

    // Nothing was written: the violation is still open.
    let vio = service.violation("vio-001").await.unwrap().unwrap();
    assert_eq!(vio.status, ViolationStatus::Open);
}

// ── Unified not-found contract ──────────────────────────────────────

#[tokio::test]
async fn absent_entities_are_none_in_demo_mode() {
    let service = demo_service().await;

    assert!(service.violation("vio-999").await.unwrap().is_none());
    assert!(service.account_detail("ACC-99999").await.unwrap().is_none());
    assert!(service.scan_detail("scan-999").await.unwrap().is_none());
    assert!(service.toggle_rule("rule-999", true).await.unwrap().is_none());
}

#[tokio::test]
async fn absent_entities_are_none_in_live_mode_too() {
    let server = MockServer::start().await;
    mount_auth(&server).await;
    Mock::given(method("GET"))
        .and(path("/violations/vio-999"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Violation not found" })),
        )
        .mount(&server)
        .await;

    let service = service_with_base(&server.uri());
    service.login("analyst@acmefinancial.com", "pw").await.unwrap();

    assert!(service.violation("vio-999").await.unwrap().is_none());
}

// ── Join correctness ────────────────────────────────────────────────

#[tokio::test]
async fn account_detail_has_no_cross_account_rows() {
    let service = demo_service().await;

    let detail = service.account_detail("ACC-10042").await.unwrap().unwrap();
    assert!(detail.transactions.iter().all(|t| t.account_id == "ACC-10042"));
    assert!(detail.violations.iter().all(|v| v.account_id == "ACC-10042"));
    assert_eq!(detail.violations.len(), 2);
}

#[tokio::test]
async fn case_detail_joins_linked_violation_records() {
    let service = demo_service().await;

    let detail = service.case_detail("case-001").await.unwrap().unwrap();
    assert_eq!(detail.case.id, "case-001");
    assert_eq!(detail.violations.len(), 1);
    assert_eq!(detail.violations[0].id, "vio-002");
}

// ── Case management ─────────────────────────────────────────────────

#[tokio::test]
async fn create_case_invalidates_list_and_comment_only_the_detail() {
    let service = demo_service().await;

    let created = service
        .create_case(&CreateCaseRequest {
            title: "Meridian structuring follow-up".into(),
            primary_account_id: Some("ACC-10042".into()),
            severity: Severity::High,
            violation_ids: vec!["vio-001".into(), "vio-003".into()],
        })
        .await
        .unwrap();

    let cases = service.cases(&CaseFilter::default()).await.unwrap();
    assert!(cases.iter().any(|c| c.id == created.id));

    // Prime both the list and the detail, then comment.
    let list_fp = fingerprint(&CaseFilter::default());
    service.case(&created.id).await.unwrap().unwrap();
    assert!(service.cache().is_fresh(&QueryKey::of("cases"), list_fp));

    service
        .add_case_comment(&created.id, "Linked both cash deposits.")
        .await
        .unwrap()
        .unwrap();

    assert!(
        service.cache().is_fresh(&QueryKey::of("cases"), list_fp),
        "a comment stales only the case's detail key"
    );
    assert!(
        !service
            .cache()
            .is_fresh(&QueryKey::detail("cases", created.id.clone()), NO_PARAMS)
    );

    let case = service.case(&created.id).await.unwrap().unwrap();
    assert_eq!(case.comments.len(), 1);
}

// ── Mode transparency ───────────────────────────────────────────────

#[tokio::test]
async fn live_and_demo_shapes_are_identical() {
    let demo = demo_service().await;
    let filter = ViolationFilter {
        severity: Some(Severity::Critical),
        status: Some(ViolationStatus::Open),
        ..ViolationFilter::default()
    };
    let from_demo = demo.violations(&filter).await.unwrap();
    assert!(!from_demo.is_empty());

    // Serve the same entities from a mock live server.
    let server = MockServer::start().await;
    mount_auth(&server).await;
    Mock::given(method("GET"))
        .and(path("/violations"))
        .and(query_param("severity", "critical"))
        .and(query_param("status", "open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&from_demo))
        .mount(&server)
        .await;

    let live = service_with_base(&server.uri());
    live.login("analyst@acmefinancial.com", "pw").await.unwrap();
    let from_live = live.violations(&filter).await.unwrap();

    assert_eq!(from_live, from_demo);
}

// ── Session transitions ─────────────────────────────────────────────

#[tokio::test]
async fn switching_modes_drops_the_other_backends_cache() {
    let server = MockServer::start().await;
    mount_auth(&server).await;
    Mock::given(method("GET"))
        .and(path("/violations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let service = service_with_base(&server.uri());
    service.enter_demo().await;
    let demo_violations = service.violations(&ViolationFilter::any()).await.unwrap();
    assert_eq!(demo_violations.len(), 8);

    service.login("analyst@acmefinancial.com", "pw").await.unwrap();
    let live_violations = service.violations(&ViolationFilter::any()).await.unwrap();
    assert!(
        live_violations.is_empty(),
        "demo payloads must not answer live queries"
    );
}

#[tokio::test]
async fn intents_suspend_while_the_session_is_indeterminate() {
    let service = service_with_base("http://127.0.0.1:9/");

    let pending = service.clone();
    let handle = tokio::spawn(async move { pending.current_user().await });

    // Give the intent a chance to reach the suspend point.
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert!(!handle.is_finished(), "intent must wait, not guess a mode");

    service.enter_demo().await;
    let user = handle.await.unwrap().unwrap();
    assert_eq!(user.id, "demo-user-001");
}

// ── Cached reuse ────────────────────────────────────────────────────

#[tokio::test]
async fn fresh_keys_are_served_from_cache() {
    let service = demo_service().await;

    let first = service.policies().await.unwrap();
    assert!(service.cache().is_fresh(&QueryKey::of("policies"), NO_PARAMS));
    let second = service.policies().await.unwrap();
    assert_eq!(first, second);
}
