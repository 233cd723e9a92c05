// ── Data service facade ──
//
// The object UI consumers hold. Each public method is one query or
// mutation intent: resolve the session mode, pick the backend, execute,
// then settle the cache. Reads get at most one transparent retry on
// transient transport failures; mutations are never retried (a repeated
// `run_scan` would double-run the pipeline).

use std::sync::Arc;

use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use vigil_api::ApiClient;
use vigil_api::model::{
    Account, AccountDetail, AlertSettings, Case, CaseFilter, ControlHealth, CreateCaseRequest,
    DashboardSummary, ExportFile, ExportFormat, FrameworkCoverage, ImportKind, ImportReport,
    Policy, Rule, SaveScheduleRequest, Scan, ScanDetail, Schedule, SeverityCount, TopRisks,
    TrendPoint, UpdateCaseRequest, User, Violation, ViolationFilter, ViolationStatus,
};

use crate::backend::Backend;
use crate::cache::{CacheCoordinator, Mutation, NO_PARAMS, QueryKey, fingerprint};
use crate::config::ServiceConfig;
use crate::error::CoreError;
use crate::fixture::FixtureStore;
use crate::join::{self, CaseDetail};
use crate::session::{Mode, Session};

/// The dual-mode data layer facade.
///
/// Cheaply cloneable via `Arc`; one instance serves a whole UI session.
/// Construct with [`new`](Self::new) for the default seeded fixture
/// store, or [`with_parts`](Self::with_parts) to inject a fake gateway
/// or a custom store in tests.
#[derive(Clone)]
pub struct DataService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    api: ApiClient,
    fixtures: FixtureStore,
    cache: CacheCoordinator,
    session: Session,
}

impl DataService {
    pub fn new(config: &ServiceConfig) -> Result<Self, CoreError> {
        let api = ApiClient::new(config.base_url.clone(), &config.transport)?;
        Ok(Self::with_parts(
            api,
            FixtureStore::seeded(config.fixture_latency.clone()),
        ))
    }

    /// Assemble from explicit parts. Tests inject a gateway pointed at
    /// a mock server and a zero-latency store through here.
    pub fn with_parts(api: ApiClient, fixtures: FixtureStore) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                api,
                fixtures,
                cache: CacheCoordinator::new(),
                session: Session::new(),
            }),
        }
    }

    /// The session flag (mode transitions, indeterminate-state waits).
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// The cache registry, exposed for instrumentation and tests.
    pub fn cache(&self) -> &CacheCoordinator {
        &self.inner.cache
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Authenticate against the live API and switch the session to
    /// live mode. The previous mode's cached payloads are dropped.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, CoreError> {
        let token = self.inner.api.login(email, password).await?;
        self.inner
            .api
            .set_token(SecretString::from(token.access_token));
        self.inner.cache.reset();
        self.inner.session.enter_live();
        let user = self.inner.api.me().await?;
        info!(email = %user.email, "logged in");
        Ok(user)
    }

    /// Switch the session to demo mode, serving the fixture dataset.
    pub async fn enter_demo(&self) -> User {
        self.inner.cache.reset();
        self.inner.session.enter_demo();
        self.inner.fixtures.current_user().await
    }

    /// Drop credentials and return the session to the indeterminate
    /// state; subsequent intents suspend until the next login.
    pub fn logout(&self) {
        self.inner.api.clear_token();
        self.inner.cache.reset();
        self.inner.session.reset();
    }

    // ── Plumbing ─────────────────────────────────────────────────────

    /// Select the backend for this call. Suspends while the session is
    /// indeterminate -- guessing a backend would either leak demo data
    /// into a live session or fire unauthenticated requests.
    async fn backend(&self) -> Backend<'_> {
        match self.inner.session.resolved().await {
            Mode::Live => Backend::Live(&self.inner.api),
            Mode::Demo => Backend::Demo(&self.inner.fixtures),
        }
    }

    /// Run a read intent: serve fresh cache if possible, otherwise
    /// fetch (with one transparent retry on transient transport
    /// failures) and commit the result unless the key moved on.
    async fn read<T, F>(&self, key: QueryKey, params: u64, fetch: F) -> Result<T, CoreError>
    where
        T: Serialize + DeserializeOwned,
        F: AsyncFn(Backend<'_>) -> Result<T, CoreError>,
    {
        if let Some(hit) = self.inner.cache.lookup::<T>(&key, params) {
            return Ok(hit);
        }

        let generation = self.inner.cache.begin(&key, params);
        let result = match fetch(self.backend().await).await {
            Err(e) if e.is_transient() => {
                warn!(%key, error = %e, "transient read failure, retrying once");
                fetch(self.backend().await).await
            }
            other => other,
        };

        let value = result?;
        if !self.inner.cache.commit(&key, generation, &value) {
            // Superseded or invalidated mid-flight: the caller still
            // gets the response, the cache just won't reuse it.
            debug!(%key, "fetch result not cached (superseded)");
        }
        Ok(value)
    }

    /// Run a mutation intent, then apply its invalidation table entry.
    async fn mutate<T, F>(&self, mutation: Mutation, op: F) -> Result<T, CoreError>
    where
        F: AsyncFn(Backend<'_>) -> Result<T, CoreError>,
    {
        let value = op(self.backend().await).await?;
        self.inner.cache.invalidate(&mutation);
        Ok(value)
    }

    /// Like [`mutate`](Self::mutate) for operations that may target a
    /// missing entity: a `None` outcome wrote nothing, so nothing is
    /// invalidated.
    async fn mutate_optional<T, F>(
        &self,
        mutation: Mutation,
        op: F,
    ) -> Result<Option<T>, CoreError>
    where
        F: AsyncFn(Backend<'_>) -> Result<Option<T>, CoreError>,
    {
        let value = op(self.backend().await).await?;
        if value.is_some() {
            self.inner.cache.invalidate(&mutation);
        }
        Ok(value)
    }

    // ── Auth ─────────────────────────────────────────────────────────

    pub async fn current_user(&self) -> Result<User, CoreError> {
        self.read(QueryKey::of("auth-me"), NO_PARAMS, async |b| {
            b.current_user().await
        })
        .await
    }

    // ── Dashboard ────────────────────────────────────────────────────

    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, CoreError> {
        self.read(QueryKey::of("dashboard-summary"), NO_PARAMS, async |b| {
            b.dashboard_summary().await
        })
        .await
    }

    pub async fn dashboard_trends(&self) -> Result<Vec<TrendPoint>, CoreError> {
        self.read(QueryKey::of("dashboard-trends"), NO_PARAMS, async |b| {
            b.dashboard_trends().await
        })
        .await
    }

    pub async fn severity_distribution(&self) -> Result<Vec<SeverityCount>, CoreError> {
        self.read(QueryKey::of("dashboard-severity"), NO_PARAMS, async |b| {
            b.severity_distribution().await
        })
        .await
    }

    // ── Policies & rules ─────────────────────────────────────────────

    pub async fn policies(&self) -> Result<Vec<Policy>, CoreError> {
        self.read(QueryKey::of("policies"), NO_PARAMS, async |b| {
            b.list_policies().await
        })
        .await
    }

    pub async fn upload_policy(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<Policy, CoreError> {
        if file_name.trim().is_empty() {
            return Err(CoreError::validation("policy file name must not be empty"));
        }
        self.mutate(Mutation::UploadPolicy, async |b| {
            b.upload_policy(file_name, &content).await
        })
        .await
    }

    pub async fn extract_rules(&self, policy_id: &str) -> Result<Option<Vec<Rule>>, CoreError> {
        self.mutate_optional(Mutation::ExtractRules, async |b| {
            b.extract_rules(policy_id).await
        })
        .await
    }

    pub async fn rules(&self, policy_id: Option<&str>) -> Result<Vec<Rule>, CoreError> {
        let key = match policy_id {
            Some(id) => QueryKey::detail("rules", id),
            None => QueryKey::of("rules"),
        };
        self.read(key, NO_PARAMS, async |b| b.list_rules(policy_id).await)
            .await
    }

    pub async fn toggle_rule(
        &self,
        rule_id: &str,
        enabled: bool,
    ) -> Result<Option<Rule>, CoreError> {
        self.mutate_optional(Mutation::ToggleRule, async |b| {
            b.set_rule_enabled(rule_id, enabled).await
        })
        .await
    }

    // ── Scans ────────────────────────────────────────────────────────

    pub async fn scans(&self) -> Result<Vec<Scan>, CoreError> {
        self.read(QueryKey::of("scans"), NO_PARAMS, async |b| {
            b.list_scans().await
        })
        .await
    }

    pub async fn run_scan(&self) -> Result<Scan, CoreError> {
        self.mutate(Mutation::RunScan, async |b| b.run_scan().await)
            .await
    }

    pub async fn scan_detail(&self, scan_id: &str) -> Result<Option<ScanDetail>, CoreError> {
        self.read(QueryKey::detail("scans", scan_id), NO_PARAMS, async |b| {
            b.scan_detail(scan_id).await
        })
        .await
    }

    /// Download an export artifact. Never cached -- the bytes go
    /// straight to the caller.
    pub async fn export_scan(
        &self,
        scan_id: &str,
        format: ExportFormat,
    ) -> Result<Option<ExportFile>, CoreError> {
        self.backend().await.export_scan(scan_id, format).await
    }

    // ── Violations ───────────────────────────────────────────────────

    pub async fn violations(&self, filter: &ViolationFilter) -> Result<Vec<Violation>, CoreError> {
        self.read(QueryKey::of("violations"), fingerprint(filter), async |b| {
            b.list_violations(filter).await
        })
        .await
    }

    pub async fn violation(&self, violation_id: &str) -> Result<Option<Violation>, CoreError> {
        self.read(
            QueryKey::detail("violations", violation_id),
            NO_PARAMS,
            async |b| b.violation_detail(violation_id).await,
        )
        .await
    }

    pub async fn update_violation_status(
        &self,
        violation_id: &str,
        status: ViolationStatus,
    ) -> Result<Option<Violation>, CoreError> {
        self.mutate_optional(Mutation::UpdateViolationStatus, async |b| {
            b.update_violation_status(violation_id, status).await
        })
        .await
    }

    /// Remediate a violation. An empty note is rejected client-side,
    /// before any request is issued.
    pub async fn remediate_violation(
        &self,
        violation_id: &str,
        note: &str,
    ) -> Result<Option<Violation>, CoreError> {
        if note.trim().is_empty() {
            return Err(CoreError::validation("remediation note must not be empty"));
        }
        self.mutate_optional(Mutation::RemediateViolation, async |b| {
            b.remediate_violation(violation_id, note).await
        })
        .await
    }

    // ── Accounts ─────────────────────────────────────────────────────

    pub async fn accounts(&self) -> Result<Vec<Account>, CoreError> {
        self.read(QueryKey::of("accounts"), NO_PARAMS, async |b| {
            b.list_accounts().await
        })
        .await
    }

    pub async fn account_detail(
        &self,
        account_id: &str,
    ) -> Result<Option<AccountDetail>, CoreError> {
        self.read(
            QueryKey::detail("accounts", account_id),
            NO_PARAMS,
            async |b| b.account_detail(account_id).await,
        )
        .await
    }

    // ── Settings ─────────────────────────────────────────────────────

    pub async fn alert_settings(&self) -> Result<AlertSettings, CoreError> {
        self.read(QueryKey::of("alert-settings"), NO_PARAMS, async |b| {
            b.alert_settings().await
        })
        .await
    }

    pub async fn save_alert_settings(
        &self,
        settings: &AlertSettings,
    ) -> Result<AlertSettings, CoreError> {
        self.mutate(Mutation::SaveAlertSettings, async |b| {
            b.save_alert_settings(settings).await
        })
        .await
    }

    pub async fn schedules(&self) -> Result<Vec<Schedule>, CoreError> {
        self.read(QueryKey::of("schedules"), NO_PARAMS, async |b| {
            b.list_schedules().await
        })
        .await
    }

    pub async fn save_schedule(
        &self,
        request: &SaveScheduleRequest,
    ) -> Result<Schedule, CoreError> {
        self.mutate(Mutation::SaveSchedule, async |b| {
            b.save_schedule(request).await
        })
        .await
    }

    // ── Analytics ────────────────────────────────────────────────────

    pub async fn control_health(&self) -> Result<Vec<ControlHealth>, CoreError> {
        self.read(
            QueryKey::detail("analytics", "control-health"),
            NO_PARAMS,
            async |b| b.control_health().await,
        )
        .await
    }

    pub async fn top_risks(&self) -> Result<TopRisks, CoreError> {
        self.read(
            QueryKey::detail("analytics", "top-risks"),
            NO_PARAMS,
            async |b| b.top_risks().await,
        )
        .await
    }

    pub async fn framework_coverage(&self) -> Result<Vec<FrameworkCoverage>, CoreError> {
        self.read(
            QueryKey::detail("analytics", "framework-coverage"),
            NO_PARAMS,
            async |b| b.framework_coverage().await,
        )
        .await
    }

    pub async fn analytics_trends(&self, days: u32) -> Result<Vec<TrendPoint>, CoreError> {
        self.read(
            QueryKey::detail("analytics", "trends"),
            fingerprint(&days),
            async |b| b.analytics_trends(days).await,
        )
        .await
    }

    // ── Cases ────────────────────────────────────────────────────────

    pub async fn cases(&self, filter: &CaseFilter) -> Result<Vec<Case>, CoreError> {
        self.read(QueryKey::of("cases"), fingerprint(filter), async |b| {
            b.list_cases(filter).await
        })
        .await
    }

    pub async fn case(&self, case_id: &str) -> Result<Option<Case>, CoreError> {
        self.read(QueryKey::detail("cases", case_id), NO_PARAMS, async |b| {
            b.case_detail(case_id).await
        })
        .await
    }

    /// A case joined with the full records of its linked violations.
    /// Same composite-assembly pattern as `account_detail`: one typed
    /// join, identical shape in both modes.
    pub async fn case_detail(&self, case_id: &str) -> Result<Option<CaseDetail>, CoreError> {
        self.read(
            QueryKey::detail("cases", format!("{case_id}:detail")),
            NO_PARAMS,
            async |b| {
                let Some(case) = b.case_detail(case_id).await? else {
                    return Ok(None);
                };
                let violations = b.list_violations(&ViolationFilter::any()).await?;
                Ok(Some(join::case_detail(case, &violations)))
            },
        )
        .await
    }

    pub async fn create_case(&self, request: &CreateCaseRequest) -> Result<Case, CoreError> {
        if request.title.trim().is_empty() {
            return Err(CoreError::validation("case title must not be empty"));
        }
        // The detail key is only known once the backend assigns an id,
        // so the invalidation is applied after the fact.
        let case = self.backend().await.create_case(request).await?;
        self.inner.cache.invalidate(&Mutation::SaveCase {
            case_id: case.id.clone(),
        });
        Ok(case)
    }

    pub async fn update_case(
        &self,
        case_id: &str,
        request: &UpdateCaseRequest,
    ) -> Result<Option<Case>, CoreError> {
        self.mutate_optional(
            Mutation::SaveCase {
                case_id: case_id.to_owned(),
            },
            async |b| b.update_case(case_id, request).await,
        )
        .await
    }

    pub async fn add_case_comment(
        &self,
        case_id: &str,
        comment: &str,
    ) -> Result<Option<Case>, CoreError> {
        if comment.trim().is_empty() {
            return Err(CoreError::validation("comment must not be empty"));
        }
        self.mutate_optional(
            Mutation::AddCaseComment {
                case_id: case_id.to_owned(),
            },
            async |b| b.add_case_comment(case_id, comment).await,
        )
        .await
    }

    // ── Data import ──────────────────────────────────────────────────

    pub async fn import_data(
        &self,
        kind: ImportKind,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<ImportReport, CoreError> {
        self.mutate(Mutation::ImportData { kind }, async |b| {
            b.import_data(kind, file_name, &content).await
        })
        .await
    }
}
