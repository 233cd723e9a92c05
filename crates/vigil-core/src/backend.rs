// ── Backend strategy ──
//
// One operation, one branch point. Every query/mutation intent goes
// through exactly one of these methods, and the Live/Demo split lives
// inside the method body -- call sites never test the mode themselves.
//
// The live arm maps HTTP 404 to `None` so both backends surface absent
// entities the same way (the fixture store is lenient by construction).

use vigil_api::model::{
    Account, AccountDetail, AlertSettings, Case, CaseFilter, ControlHealth, CreateCaseRequest,
    DashboardSummary, ExportFile, ExportFormat, FrameworkCoverage, ImportKind, ImportReport,
    Policy, Rule, SaveScheduleRequest, Scan, ScanDetail, Schedule, SeverityCount, TopRisks,
    TrendPoint, UpdateCaseRequest, User, Violation, ViolationFilter, ViolationStatus,
};
use vigil_api::{ApiClient, Error as ApiError};

use crate::error::CoreError;
use crate::fixture::FixtureStore;

/// Map a live detail lookup's 404 into the unified `None` contract.
fn optional<T>(result: Result<T, ApiError>) -> Result<Option<T>, CoreError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// The backend serving the current call, selected per call from the
/// session flag.
#[derive(Clone, Copy)]
pub(crate) enum Backend<'a> {
    Live(&'a ApiClient),
    Demo(&'a FixtureStore),
}

impl Backend<'_> {
    // ── Auth ─────────────────────────────────────────────────────────

    pub(crate) async fn current_user(&self) -> Result<User, CoreError> {
        match self {
            Self::Live(api) => Ok(api.me().await?),
            Self::Demo(store) => Ok(store.current_user().await),
        }
    }

    // ── Dashboard ────────────────────────────────────────────────────

    pub(crate) async fn dashboard_summary(&self) -> Result<DashboardSummary, CoreError> {
        match self {
            Self::Live(api) => Ok(api.dashboard_summary().await?),
            Self::Demo(store) => Ok(store.dashboard_summary().await),
        }
    }

    pub(crate) async fn dashboard_trends(&self) -> Result<Vec<TrendPoint>, CoreError> {
        match self {
            Self::Live(api) => Ok(api.dashboard_trends().await?),
            Self::Demo(store) => Ok(store.dashboard_trends().await),
        }
    }

    pub(crate) async fn severity_distribution(&self) -> Result<Vec<SeverityCount>, CoreError> {
        match self {
            Self::Live(api) => Ok(api.severity_distribution().await?),
            Self::Demo(store) => Ok(store.severity_distribution().await),
        }
    }

    // ── Policies & rules ─────────────────────────────────────────────

    pub(crate) async fn list_policies(&self) -> Result<Vec<Policy>, CoreError> {
        match self {
            Self::Live(api) => Ok(api.list_policies().await?),
            Self::Demo(store) => Ok(store.list_policies().await),
        }
    }

    pub(crate) async fn upload_policy(
        &self,
        file_name: &str,
        content: &[u8],
    ) -> Result<Policy, CoreError> {
        match self {
            Self::Live(api) => Ok(api.upload_policy(file_name, content.to_vec()).await?),
            // The demo store only needs the name; the bytes go nowhere.
            Self::Demo(store) => Ok(store.upload_policy(file_name).await),
        }
    }

    pub(crate) async fn extract_rules(&self, policy_id: &str) -> Result<Option<Vec<Rule>>, CoreError> {
        match self {
            Self::Live(api) => optional(api.extract_rules(policy_id).await),
            Self::Demo(store) => Ok(store.extract_rules(policy_id).await),
        }
    }

    pub(crate) async fn list_rules(&self, policy_id: Option<&str>) -> Result<Vec<Rule>, CoreError> {
        match self {
            Self::Live(api) => Ok(api.list_rules(policy_id).await?),
            Self::Demo(store) => Ok(store.list_rules(policy_id).await),
        }
    }

    pub(crate) async fn set_rule_enabled(
        &self,
        rule_id: &str,
        enabled: bool,
    ) -> Result<Option<Rule>, CoreError> {
        match self {
            Self::Live(api) => optional(api.set_rule_enabled(rule_id, enabled).await),
            Self::Demo(store) => Ok(store.set_rule_enabled(rule_id, enabled).await),
        }
    }

    // ── Scans ────────────────────────────────────────────────────────

    pub(crate) async fn list_scans(&self) -> Result<Vec<Scan>, CoreError> {
        match self {
            Self::Live(api) => Ok(api.list_scans().await?),
            Self::Demo(store) => Ok(store.list_scans().await),
        }
    }

    pub(crate) async fn run_scan(&self) -> Result<Scan, CoreError> {
        match self {
            Self::Live(api) => Ok(api.run_scan().await?),
            Self::Demo(store) => Ok(store.run_scan().await),
        }
    }

    pub(crate) async fn scan_detail(&self, scan_id: &str) -> Result<Option<ScanDetail>, CoreError> {
        match self {
            Self::Live(api) => optional(api.scan_detail(scan_id).await),
            Self::Demo(store) => Ok(store.scan_detail(scan_id).await),
        }
    }

    pub(crate) async fn export_scan(
        &self,
        scan_id: &str,
        format: ExportFormat,
    ) -> Result<Option<ExportFile>, CoreError> {
        match self {
            Self::Live(api) => optional(api.export_scan(scan_id, format).await),
            Self::Demo(store) => Ok(store.export_scan(scan_id, format).await),
        }
    }

    // ── Violations ───────────────────────────────────────────────────

    pub(crate) async fn list_violations(
        &self,
        filter: &ViolationFilter,
    ) -> Result<Vec<Violation>, CoreError> {
        match self {
            Self::Live(api) => Ok(api.list_violations(filter).await?),
            Self::Demo(store) => Ok(store.list_violations(filter).await),
        }
    }

    pub(crate) async fn violation_detail(
        &self,
        violation_id: &str,
    ) -> Result<Option<Violation>, CoreError> {
        match self {
            Self::Live(api) => optional(api.violation_detail(violation_id).await),
            Self::Demo(store) => Ok(store.violation_detail(violation_id).await),
        }
    }

    pub(crate) async fn update_violation_status(
        &self,
        violation_id: &str,
        status: ViolationStatus,
    ) -> Result<Option<Violation>, CoreError> {
        match self {
            Self::Live(api) => optional(api.update_violation_status(violation_id, status).await),
            Self::Demo(store) => Ok(store.update_violation_status(violation_id, status).await),
        }
    }

    pub(crate) async fn remediate_violation(
        &self,
        violation_id: &str,
        note: &str,
    ) -> Result<Option<Violation>, CoreError> {
        match self {
            Self::Live(api) => optional(api.remediate_violation(violation_id, note).await),
            Self::Demo(store) => Ok(store.remediate_violation(violation_id, note).await),
        }
    }

    // ── Accounts ─────────────────────────────────────────────────────

    pub(crate) async fn list_accounts(&self) -> Result<Vec<Account>, CoreError> {
        match self {
            Self::Live(api) => Ok(api.list_accounts().await?),
            Self::Demo(store) => Ok(store.list_accounts().await),
        }
    }

    pub(crate) async fn account_detail(
        &self,
        account_id: &str,
    ) -> Result<Option<AccountDetail>, CoreError> {
        match self {
            Self::Live(api) => optional(api.account_detail(account_id).await),
            Self::Demo(store) => Ok(store.account_detail(account_id).await),
        }
    }

    // ── Settings ─────────────────────────────────────────────────────

    pub(crate) async fn alert_settings(&self) -> Result<AlertSettings, CoreError> {
        match self {
            Self::Live(api) => Ok(api.alert_settings().await?),
            Self::Demo(store) => Ok(store.alert_settings().await),
        }
    }

    pub(crate) async fn save_alert_settings(
        &self,
        settings: &AlertSettings,
    ) -> Result<AlertSettings, CoreError> {
        match self {
            Self::Live(api) => Ok(api.save_alert_settings(settings).await?),
            Self::Demo(store) => Ok(store.save_alert_settings(settings.clone()).await),
        }
    }

    pub(crate) async fn list_schedules(&self) -> Result<Vec<Schedule>, CoreError> {
        match self {
            Self::Live(api) => Ok(api.list_schedules().await?),
            Self::Demo(store) => Ok(store.list_schedules().await),
        }
    }

    pub(crate) async fn save_schedule(
        &self,
        request: &SaveScheduleRequest,
    ) -> Result<Schedule, CoreError> {
        match self {
            Self::Live(api) => Ok(api.save_schedule(request).await?),
            Self::Demo(store) => Ok(store.save_schedule(request).await),
        }
    }

    // ── Analytics ────────────────────────────────────────────────────

    pub(crate) async fn control_health(&self) -> Result<Vec<ControlHealth>, CoreError> {
        match self {
            Self::Live(api) => Ok(api.control_health().await?),
            Self::Demo(store) => Ok(store.control_health().await),
        }
    }

    pub(crate) async fn top_risks(&self) -> Result<TopRisks, CoreError> {
        match self {
            Self::Live(api) => Ok(api.top_risks().await?),
            Self::Demo(store) => Ok(store.top_risks().await),
        }
    }

    pub(crate) async fn framework_coverage(&self) -> Result<Vec<FrameworkCoverage>, CoreError> {
        match self {
            Self::Live(api) => Ok(api.framework_coverage().await?),
            Self::Demo(store) => Ok(store.framework_coverage().await),
        }
    }

    pub(crate) async fn analytics_trends(&self, days: u32) -> Result<Vec<TrendPoint>, CoreError> {
        match self {
            Self::Live(api) => Ok(api.analytics_trends(days).await?),
            Self::Demo(store) => Ok(store.analytics_trends(days).await),
        }
    }

    // ── Cases ────────────────────────────────────────────────────────

    pub(crate) async fn list_cases(&self, filter: &CaseFilter) -> Result<Vec<Case>, CoreError> {
        match self {
            Self::Live(api) => Ok(api.list_cases(filter).await?),
            Self::Demo(store) => Ok(store.list_cases(filter).await),
        }
    }

    pub(crate) async fn case_detail(&self, case_id: &str) -> Result<Option<Case>, CoreError> {
        match self {
            Self::Live(api) => optional(api.case_detail(case_id).await),
            Self::Demo(store) => Ok(store.case_detail(case_id).await),
        }
    }

    pub(crate) async fn create_case(&self, request: &CreateCaseRequest) -> Result<Case, CoreError> {
        match self {
            Self::Live(api) => Ok(api.create_case(request).await?),
            Self::Demo(store) => Ok(store.create_case(request).await),
        }
    }

    pub(crate) async fn update_case(
        &self,
        case_id: &str,
        request: &UpdateCaseRequest,
    ) -> Result<Option<Case>, CoreError> {
        match self {
            Self::Live(api) => optional(api.update_case(case_id, request).await),
            Self::Demo(store) => Ok(store.update_case(case_id, request).await),
        }
    }

    pub(crate) async fn add_case_comment(
        &self,
        case_id: &str,
        comment: &str,
    ) -> Result<Option<Case>, CoreError> {
        match self {
            Self::Live(api) => optional(api.add_case_comment(case_id, comment).await),
            Self::Demo(store) => Ok(store.add_case_comment(case_id, comment).await),
        }
    }

    // ── Data import ──────────────────────────────────────────────────

    pub(crate) async fn import_data(
        &self,
        kind: ImportKind,
        file_name: &str,
        content: &[u8],
    ) -> Result<ImportReport, CoreError> {
        match self {
            Self::Live(api) => Ok(api.import_data(kind, file_name, content.to_vec()).await?),
            Self::Demo(store) => Ok(store.import_data(kind, file_name, content).await),
        }
    }
}
