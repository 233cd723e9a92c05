// ── Fixture store ──
//
// Mirrors every gateway operation against in-memory collections. Reads
// return copies of filtered data; mutations apply in place so later
// reads in the same session observe them. Derived views (dashboard
// summary, severity distribution, control health, account detail) are
// computed from current collection state at read time, never cached
// here -- freshness is the coordinator's job.
//
// Unknown ids return `None` rather than erroring: the store is a
// forgiving mock backend, and the service layer maps live 404s to the
// same observable state.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use tracing::debug;
use vigil_api::model::{
    Account, AccountDetail, AlertSettings, Case, CaseComment, CaseFilter, CaseStatus,
    ControlHealth, CreateCaseRequest, DashboardSummary, ExportFile, ExportFormat,
    FrameworkCoverage, ImportKind, ImportReport, Policy, PolicyStatus, Rule, RuleResult,
    SaveScheduleRequest, Scan, ScanDetail, ScanStatus, Schedule, Severity, SeverityCount,
    TopRisk, TopRisks, Transaction, TrendPoint, UpdateCaseRequest, User, Violation,
    ViolationFilter, ViolationStatus,
};

use super::latency::LatencyProfile;
use super::seed;
use crate::join;

/// UI-unique id for a demo-created entity. Time-derived, good enough
/// for one session; persistence guarantees are the live backend's job.
fn demo_id(prefix: &str) -> String {
    format!("{prefix}-demo-{}", Utc::now().timestamp_millis())
}

/// The in-memory backend for demo mode.
///
/// An explicit object rather than module-level globals: construct one
/// per session (or per test) and inject it, so tests never share state.
/// Mutations run to completion under the collection lock before control
/// returns to the scheduler, so two mutations on one collection never
/// interleave; reads that begin after a mutation resolves observe it.
pub struct FixtureStore {
    latency: LatencyProfile,
    user: User,
    policies: RwLock<Vec<Policy>>,
    rules: RwLock<Vec<Rule>>,
    scans: RwLock<Vec<Scan>>,
    scan_results: RwLock<HashMap<String, Vec<RuleResult>>>,
    violations: RwLock<Vec<Violation>>,
    accounts: RwLock<Vec<Account>>,
    transactions: RwLock<Vec<Transaction>>,
    alert_settings: RwLock<AlertSettings>,
    schedules: RwLock<Vec<Schedule>>,
    cases: RwLock<Vec<Case>>,
    frameworks: Vec<FrameworkCoverage>,
    trends: Vec<TrendPoint>,
}

impl FixtureStore {
    /// A store seeded with the representative demo dataset.
    pub fn seeded(latency: LatencyProfile) -> Self {
        Self {
            latency,
            user: seed::user(),
            policies: RwLock::new(seed::policies()),
            rules: RwLock::new(seed::rules()),
            scans: RwLock::new(seed::scans()),
            scan_results: RwLock::new(seed::scan_results().into_iter().collect()),
            violations: RwLock::new(seed::violations()),
            accounts: RwLock::new(seed::accounts()),
            transactions: RwLock::new(seed::transactions()),
            alert_settings: RwLock::new(seed::alert_settings()),
            schedules: RwLock::new(seed::schedules()),
            cases: RwLock::new(seed::cases()),
            frameworks: seed::framework_coverage(),
            trends: seed::trends(),
        }
    }

    async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }

    // ── Auth ─────────────────────────────────────────────────────────

    pub async fn current_user(&self) -> User {
        self.pause(self.latency.read).await;
        self.user.clone()
    }

    // ── Policies ─────────────────────────────────────────────────────

    pub async fn list_policies(&self) -> Vec<Policy> {
        self.pause(self.latency.read).await;
        self.policies.read().expect("policies lock poisoned").clone()
    }

    pub async fn upload_policy(&self, file_name: &str) -> Policy {
        self.pause(self.latency.upload).await;
        let name = file_name
            .rsplit_once('.')
            .map_or(file_name, |(stem, _)| stem)
            .to_owned();
        let policy = Policy {
            id: demo_id("pol"),
            name,
            file_name: file_name.to_owned(),
            uploaded_at: Utc::now(),
            status: PolicyStatus::Processing,
            rules_count: 0,
        };
        debug!(policy_id = %policy.id, "fixture: policy uploaded");
        self.policies
            .write()
            .expect("policies lock poisoned")
            .push(policy.clone());
        policy
    }

    /// Create rules for a policy and activate it. `None` for unknown ids.
    pub async fn extract_rules(&self, policy_id: &str) -> Option<Vec<Rule>> {
        self.pause(self.latency.extract).await;

        let policy_name = {
            let mut policies = self.policies.write().expect("policies lock poisoned");
            let policy = policies.iter_mut().find(|p| p.id == policy_id)?;
            policy.status = PolicyStatus::Active;
            policy.rules_count += 2;
            policy.name.clone()
        };

        let now = Utc::now();
        let stamp = now.timestamp_millis();
        let created = vec![
            Rule {
                id: format!("rule-demo-{stamp}-1"),
                policy_id: policy_id.to_owned(),
                name: format!("{policy_name} Threshold Monitor"),
                description: format!(
                    "Flag transactions breaching the thresholds defined in {policy_name}."
                ),
                collection: "transactions".into(),
                severity: Severity::High,
                enabled: true,
                pipeline: serde_json::json!([
                    { "$match": { "amount": { "$gte": 10000 } } }
                ])
                .to_string(),
                updated_at: now,
            },
            Rule {
                id: format!("rule-demo-{stamp}-2"),
                policy_id: policy_id.to_owned(),
                name: format!("{policy_name} Exception Review"),
                description: format!("Surface accounts flagged for manual review under {policy_name}."),
                collection: "accounts".into(),
                severity: Severity::Medium,
                enabled: true,
                pipeline: serde_json::json!([
                    { "$match": { "flagged": true } }
                ])
                .to_string(),
                updated_at: now,
            },
        ];
        debug!(policy_id, count = created.len(), "fixture: rules extracted");
        self.rules
            .write()
            .expect("rules lock poisoned")
            .extend(created.clone());
        Some(created)
    }

    // ── Rules ────────────────────────────────────────────────────────

    pub async fn list_rules(&self, policy_id: Option<&str>) -> Vec<Rule> {
        self.pause(self.latency.read).await;
        let rules = self.rules.read().expect("rules lock poisoned");
        match policy_id {
            Some(id) => rules.iter().filter(|r| r.policy_id == id).cloned().collect(),
            None => rules.clone(),
        }
    }

    pub async fn set_rule_enabled(&self, rule_id: &str, enabled: bool) -> Option<Rule> {
        self.pause(self.latency.mutate).await;
        let mut rules = self.rules.write().expect("rules lock poisoned");
        let rule = rules.iter_mut().find(|r| r.id == rule_id)?;
        rule.enabled = enabled;
        rule.updated_at = Utc::now();
        Some(rule.clone())
    }

    // ── Scans ────────────────────────────────────────────────────────

    pub async fn list_scans(&self) -> Vec<Scan> {
        self.pause(self.latency.read).await;
        self.scans.read().expect("scans lock poisoned").clone()
    }

    /// Run a scan over the current fixture state: every enabled rule is
    /// "executed", and open violations grouped per rule become the
    /// result rows.
    pub async fn run_scan(&self) -> Scan {
        self.pause(self.latency.scan).await;

        let rules_executed = {
            let rules = self.rules.read().expect("rules lock poisoned");
            u32::try_from(rules.iter().filter(|r| r.enabled).count()).unwrap_or(u32::MAX)
        };

        let results: Vec<RuleResult> = {
            let violations = self.violations.read().expect("violations lock poisoned");
            let mut by_rule: BTreeMap<String, RuleResult> = BTreeMap::new();
            for violation in violations
                .iter()
                .filter(|v| v.status == ViolationStatus::Open)
            {
                by_rule
                    .entry(violation.rule_id.clone())
                    .or_insert_with(|| RuleResult {
                        rule_id: violation.rule_id.clone(),
                        rule_name: violation.rule_name.clone(),
                        violations_found: 0,
                    })
                    .violations_found += 1;
            }
            by_rule.into_values().collect()
        };

        let started_at = Utc::now();
        let scan = Scan {
            id: demo_id("scan"),
            started_at,
            completed_at: Some(started_at + chrono::Duration::seconds(180)),
            duration_seconds: Some(180),
            status: ScanStatus::Completed,
            total_violations: results.iter().map(|r| r.violations_found).sum(),
            rules_executed,
        };
        debug!(scan_id = %scan.id, total = scan.total_violations, "fixture: scan completed");

        self.scan_results
            .write()
            .expect("scan results lock poisoned")
            .insert(scan.id.clone(), results);
        self.scans
            .write()
            .expect("scans lock poisoned")
            .insert(0, scan.clone());
        scan
    }

    pub async fn scan_detail(&self, scan_id: &str) -> Option<ScanDetail> {
        self.pause(self.latency.read).await;
        let scan = self
            .scans
            .read()
            .expect("scans lock poisoned")
            .iter()
            .find(|s| s.id == scan_id)
            .cloned()?;
        let rule_results = self
            .scan_results
            .read()
            .expect("scan results lock poisoned")
            .get(scan_id)
            .cloned()
            .unwrap_or_default();
        Some(ScanDetail { scan, rule_results })
    }

    pub async fn export_scan(&self, scan_id: &str, format: ExportFormat) -> Option<ExportFile> {
        let detail = self.scan_detail(scan_id).await?;
        let bytes = match format {
            ExportFormat::Csv => {
                let mut out = String::from("rule_name,violations_found\n");
                for row in &detail.rule_results {
                    out.push_str(&format!("{},{}\n", row.rule_name, row.violations_found));
                }
                Bytes::from(out)
            }
            ExportFormat::Json => {
                Bytes::from(serde_json::to_vec_pretty(&detail).unwrap_or_default())
            }
        };
        Some(ExportFile {
            file_name: format!("scan-{scan_id}.{format}"),
            content_type: format.content_type().to_owned(),
            bytes,
        })
    }

    // ── Violations ───────────────────────────────────────────────────

    /// Filters compose with boolean AND; absent fields match everything.
    pub async fn list_violations(&self, filter: &ViolationFilter) -> Vec<Violation> {
        self.pause(self.latency.read).await;
        let violations = self.violations.read().expect("violations lock poisoned");
        violations
            .iter()
            .filter(|v| filter.severity.is_none_or(|s| v.severity == s))
            .filter(|v| filter.status.is_none_or(|s| v.status == s))
            .filter(|v| {
                filter
                    .account_id
                    .as_ref()
                    .is_none_or(|id| &v.account_id == id)
            })
            .filter(|v| filter.from_date.is_none_or(|from| v.created_at >= from))
            .filter(|v| filter.to_date.is_none_or(|to| v.created_at <= to))
            .cloned()
            .collect()
    }

    pub async fn violation_detail(&self, violation_id: &str) -> Option<Violation> {
        self.pause(self.latency.read).await;
        self.violations
            .read()
            .expect("violations lock poisoned")
            .iter()
            .find(|v| v.id == violation_id)
            .cloned()
    }

    pub async fn update_violation_status(
        &self,
        violation_id: &str,
        status: ViolationStatus,
    ) -> Option<Violation> {
        self.pause(self.latency.mutate).await;
        let mut violations = self.violations.write().expect("violations lock poisoned");
        let violation = violations.iter_mut().find(|v| v.id == violation_id)?;
        violation.status = status;
        Some(violation.clone())
    }

    pub async fn remediate_violation(&self, violation_id: &str, note: &str) -> Option<Violation> {
        self.pause(self.latency.mutate).await;
        let mut violations = self.violations.write().expect("violations lock poisoned");
        let violation = violations.iter_mut().find(|v| v.id == violation_id)?;
        violation.status = ViolationStatus::Remediated;
        violation.remediation_note = Some(note.to_owned());
        Some(violation.clone())
    }

    // ── Accounts ─────────────────────────────────────────────────────

    pub async fn list_accounts(&self) -> Vec<Account> {
        self.pause(self.latency.read).await;
        self.accounts.read().expect("accounts lock poisoned").clone()
    }

    /// Account joined with its transactions and violations. Looks up by
    /// either the opaque id or the human account key.
    pub async fn account_detail(&self, account_id: &str) -> Option<AccountDetail> {
        self.pause(self.latency.read).await;
        let account = self
            .accounts
            .read()
            .expect("accounts lock poisoned")
            .iter()
            .find(|a| a.id == account_id || a.account_id == account_id)
            .cloned()?;
        let transactions = self
            .transactions
            .read()
            .expect("transactions lock poisoned")
            .clone();
        let violations = self
            .violations
            .read()
            .expect("violations lock poisoned")
            .clone();
        Some(join::account_detail(account, &transactions, &violations))
    }

    // ── Settings ─────────────────────────────────────────────────────

    pub async fn alert_settings(&self) -> AlertSettings {
        self.pause(self.latency.read).await;
        self.alert_settings
            .read()
            .expect("alert settings lock poisoned")
            .clone()
    }

    pub async fn save_alert_settings(&self, settings: AlertSettings) -> AlertSettings {
        self.pause(self.latency.mutate).await;
        *self
            .alert_settings
            .write()
            .expect("alert settings lock poisoned") = settings.clone();
        settings
    }

    pub async fn list_schedules(&self) -> Vec<Schedule> {
        self.pause(self.latency.read).await;
        self.schedules.read().expect("schedules lock poisoned").clone()
    }

    pub async fn save_schedule(&self, request: &SaveScheduleRequest) -> Schedule {
        self.pause(self.latency.mutate).await;
        let mut schedules = self.schedules.write().expect("schedules lock poisoned");
        if let Some(existing) = request
            .id
            .as_ref()
            .and_then(|id| schedules.iter_mut().find(|s| &s.id == id))
        {
            existing.frequency = request.frequency.clone();
            existing.interval_hours = request.interval_hours;
            existing.enabled = request.enabled;
            return existing.clone();
        }
        let schedule = Schedule {
            id: demo_id("sched"),
            frequency: request.frequency.clone(),
            interval_hours: request.interval_hours,
            enabled: request.enabled,
        };
        schedules.push(schedule.clone());
        schedule
    }

    // ── Dashboard & analytics (derived at read time) ─────────────────

    pub async fn dashboard_summary(&self) -> DashboardSummary {
        self.pause(self.latency.read).await;
        let violations = self.violations.read().expect("violations lock poisoned");
        let rules = self.rules.read().expect("rules lock poisoned");
        let scans = self.scans.read().expect("scans lock poisoned");

        let clamp = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        DashboardSummary {
            total_violations: clamp(violations.len()),
            open_violations: clamp(
                violations
                    .iter()
                    .filter(|v| v.status == ViolationStatus::Open)
                    .count(),
            ),
            high_critical_violations: clamp(
                violations
                    .iter()
                    .filter(|v| v.severity >= Severity::High)
                    .count(),
            ),
            active_rules: clamp(rules.iter().filter(|r| r.enabled).count()),
            last_scan_time: scans.iter().filter_map(|s| s.completed_at).max(),
        }
    }

    pub async fn dashboard_trends(&self) -> Vec<TrendPoint> {
        self.pause(self.latency.read).await;
        self.trends.clone()
    }

    pub async fn severity_distribution(&self) -> Vec<SeverityCount> {
        self.pause(self.latency.read).await;
        let violations = self.violations.read().expect("violations lock poisoned");
        [
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Low,
        ]
        .into_iter()
        .map(|severity| SeverityCount {
            severity,
            count: u32::try_from(violations.iter().filter(|v| v.severity == severity).count())
                .unwrap_or(u32::MAX),
        })
        .collect()
    }

    /// Violation rate per rule over the evaluated population (completed
    /// scans x monitored accounts).
    pub async fn control_health(&self) -> Vec<ControlHealth> {
        self.pause(self.latency.read).await;
        let rules = self.rules.read().expect("rules lock poisoned");
        let violations = self.violations.read().expect("violations lock poisoned");
        let scans = self.scans.read().expect("scans lock poisoned");
        let accounts = self.accounts.read().expect("accounts lock poisoned");

        let completed = scans
            .iter()
            .filter(|s| s.status == ScanStatus::Completed)
            .count();
        let population = (completed * accounts.len()).max(1);

        let mut health: Vec<ControlHealth> = rules
            .iter()
            .map(|rule| {
                let count = violations.iter().filter(|v| v.rule_id == rule.id).count();
                #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
                let violation_rate = count as f64 / population as f64;
                ControlHealth {
                    rule_id: rule.id.clone(),
                    rule_name: rule.name.clone(),
                    violation_count: u32::try_from(count).unwrap_or(u32::MAX),
                    violation_rate,
                }
            })
            .collect();
        health.sort_by(|a, b| b.violation_count.cmp(&a.violation_count));
        health
    }

    pub async fn top_risks(&self) -> TopRisks {
        self.pause(self.latency.read).await;
        let violations = self.violations.read().expect("violations lock poisoned");
        let accounts = self.accounts.read().expect("accounts lock poisoned");

        let mut per_rule: BTreeMap<(String, String), u32> = BTreeMap::new();
        let mut per_account: BTreeMap<String, u32> = BTreeMap::new();
        for violation in violations.iter() {
            *per_rule
                .entry((violation.rule_id.clone(), violation.rule_name.clone()))
                .or_default() += 1;
            *per_account.entry(violation.account_id.clone()).or_default() += 1;
        }

        let mut top_rules: Vec<TopRisk> = per_rule
            .into_iter()
            .map(|((id, name), violation_count)| TopRisk {
                id,
                name,
                violation_count,
            })
            .collect();
        top_rules.sort_by(|a, b| b.violation_count.cmp(&a.violation_count));
        top_rules.truncate(5);

        let mut top_accounts: Vec<TopRisk> = per_account
            .into_iter()
            .map(|(account_key, violation_count)| {
                let name = accounts
                    .iter()
                    .find(|a| a.account_id == account_key)
                    .map_or_else(|| account_key.clone(), |a| a.customer_name.clone());
                TopRisk {
                    id: account_key,
                    name,
                    violation_count,
                }
            })
            .collect();
        top_accounts.sort_by(|a, b| b.violation_count.cmp(&a.violation_count));
        top_accounts.truncate(5);

        TopRisks {
            top_rules,
            top_accounts,
        }
    }

    pub async fn framework_coverage(&self) -> Vec<FrameworkCoverage> {
        self.pause(self.latency.read).await;
        self.frameworks.clone()
    }

    pub async fn analytics_trends(&self, days: u32) -> Vec<TrendPoint> {
        self.pause(self.latency.read).await;
        let take = usize::try_from(days)
            .unwrap_or(usize::MAX)
            .min(self.trends.len());
        self.trends[self.trends.len() - take..].to_vec()
    }

    // ── Cases ────────────────────────────────────────────────────────

    pub async fn list_cases(&self, filter: &CaseFilter) -> Vec<Case> {
        self.pause(self.latency.read).await;
        let cases = self.cases.read().expect("cases lock poisoned");
        cases
            .iter()
            .filter(|c| filter.status.is_none_or(|s| c.status == s))
            .filter(|c| filter.severity.is_none_or(|s| c.severity == s))
            .cloned()
            .collect()
    }

    pub async fn case_detail(&self, case_id: &str) -> Option<Case> {
        self.pause(self.latency.read).await;
        self.cases
            .read()
            .expect("cases lock poisoned")
            .iter()
            .find(|c| c.id == case_id)
            .cloned()
    }

    pub async fn create_case(&self, request: &CreateCaseRequest) -> Case {
        self.pause(self.latency.mutate).await;
        let now = Utc::now();
        let case = Case {
            id: demo_id("case"),
            title: request.title.clone(),
            primary_account_id: request.primary_account_id.clone(),
            severity: request.severity,
            status: CaseStatus::Open,
            linked_violation_ids: request.violation_ids.clone(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.cases
            .write()
            .expect("cases lock poisoned")
            .insert(0, case.clone());
        case
    }

    pub async fn update_case(&self, case_id: &str, request: &UpdateCaseRequest) -> Option<Case> {
        self.pause(self.latency.mutate).await;
        let mut cases = self.cases.write().expect("cases lock poisoned");
        let case = cases.iter_mut().find(|c| c.id == case_id)?;
        if let Some(ref title) = request.title {
            case.title = title.clone();
        }
        if let Some(severity) = request.severity {
            case.severity = severity;
        }
        if let Some(status) = request.status {
            case.status = status;
        }
        case.updated_at = Utc::now();
        Some(case.clone())
    }

    pub async fn add_case_comment(&self, case_id: &str, comment: &str) -> Option<Case> {
        self.pause(self.latency.mutate).await;
        let mut cases = self.cases.write().expect("cases lock poisoned");
        let case = cases.iter_mut().find(|c| c.id == case_id)?;
        let now = Utc::now();
        case.comments.push(CaseComment {
            user_id: self.user.id.clone(),
            user_name: self.user.email.clone(),
            comment: comment.to_owned(),
            created_at: now,
        });
        case.updated_at = now;
        Some(case.clone())
    }

    // ── Data import ──────────────────────────────────────────────────

    /// Shallow CSV validation: rows must match the header's column
    /// count. The demo never persists imported rows.
    pub async fn import_data(
        &self,
        kind: ImportKind,
        file_name: &str,
        content: &[u8],
    ) -> ImportReport {
        self.pause(self.latency.upload).await;
        debug!(%kind, file_name, "fixture: importing dataset");

        let text = String::from_utf8_lossy(content);
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());
        let Some(header) = lines.next() else {
            return ImportReport {
                rows_processed: 0,
                rows_inserted: 0,
                rows_failed: 0,
                sample_errors: vec!["file is empty".into()],
            };
        };
        let expected = header.split(',').count();

        let mut processed = 0u32;
        let mut failed = 0u32;
        let mut sample_errors = Vec::new();
        for (index, line) in lines.enumerate() {
            processed += 1;
            let found = line.split(',').count();
            if found != expected {
                failed += 1;
                if sample_errors.len() < 3 {
                    sample_errors.push(format!(
                        "line {}: expected {expected} columns, found {found}",
                        index + 2
                    ));
                }
            }
        }

        ImportReport {
            rows_processed: processed,
            rows_inserted: processed - failed,
            rows_failed: failed,
            sample_errors,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn store() -> FixtureStore {
        FixtureStore::seeded(LatencyProfile::zero())
    }

    #[tokio::test]
    async fn filters_compose_with_boolean_and() {
        let store = store();
        let filter = ViolationFilter {
            severity: Some(Severity::High),
            status: Some(ViolationStatus::Open),
            ..ViolationFilter::default()
        };

        let result = store.list_violations(&filter).await;

        assert!(!result.is_empty());
        assert!(
            result
                .iter()
                .all(|v| v.severity == Severity::High && v.status == ViolationStatus::Open)
        );
    }

    #[tokio::test]
    async fn empty_filter_returns_the_full_set() {
        let store = store();
        let all = store.list_violations(&ViolationFilter::any()).await;
        assert_eq!(all.len(), 8);
    }

    #[tokio::test]
    async fn date_range_filter_bounds_both_ends() {
        let store = store();
        let filter = ViolationFilter {
            from_date: Some(Utc.with_ymd_and_hms(2026, 2, 21, 0, 0, 0).unwrap()),
            to_date: Some(Utc.with_ymd_and_hms(2026, 2, 21, 23, 59, 59).unwrap()),
            ..ViolationFilter::default()
        };

        let result = store.list_violations(&filter).await;

        assert_eq!(
            result.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(),
            ["vio-003", "vio-004"]
        );
    }

    #[tokio::test]
    async fn unknown_ids_return_none_not_error() {
        let store = store();
        assert!(store.violation_detail("vio-999").await.is_none());
        assert!(store.account_detail("ACC-99999").await.is_none());
        assert!(store.scan_detail("scan-999").await.is_none());
        assert!(store.set_rule_enabled("rule-999", true).await.is_none());
        assert!(store.extract_rules("pol-999").await.is_none());
    }

    #[tokio::test]
    async fn toggle_rule_mutates_in_place_and_is_idempotent() {
        let store = store();

        let first = store.set_rule_enabled("rule-001", false).await.unwrap();
        assert!(!first.enabled);

        // Second identical toggle yields the same final state.
        let second = store.set_rule_enabled("rule-001", false).await.unwrap();
        assert!(!second.enabled);

        let rules = store.list_rules(Some("pol-001")).await;
        let rule = rules.iter().find(|r| r.id == "rule-001").unwrap();
        assert!(!rule.enabled);
    }

    #[tokio::test]
    async fn reads_return_copies_not_views() {
        let store = store();
        let mut copy = store.list_rules(None).await;
        copy.clear();
        assert_eq!(store.list_rules(None).await.len(), 6);
    }

    #[tokio::test]
    async fn upload_then_extract_activates_the_policy() {
        let store = store();

        let policy = store.upload_policy("aml.pdf").await;
        assert_eq!(policy.name, "aml");
        assert_eq!(policy.status, PolicyStatus::Processing);
        assert_eq!(policy.rules_count, 0);

        let created = store.extract_rules(&policy.id).await.unwrap();
        assert_eq!(created.len(), 2);
        assert!(created.iter().all(|r| r.policy_id == policy.id));

        let policies = store.list_policies().await;
        let updated = policies.iter().find(|p| p.id == policy.id).unwrap();
        assert_eq!(updated.status, PolicyStatus::Active);
        assert_eq!(updated.rules_count, 2);

        let rules = store.list_rules(Some(&policy.id)).await;
        assert_eq!(rules.len(), 2);
    }

    #[tokio::test]
    async fn run_scan_derives_results_from_open_violations() {
        let store = store();
        let open = store
            .list_violations(&ViolationFilter {
                status: Some(ViolationStatus::Open),
                ..ViolationFilter::default()
            })
            .await;

        let scan = store.run_scan().await;

        assert_eq!(scan.status, ScanStatus::Completed);
        assert_eq!(scan.total_violations as usize, open.len());
        assert_eq!(scan.rules_executed, 5);

        let detail = store.scan_detail(&scan.id).await.unwrap();
        let sum: u32 = detail.rule_results.iter().map(|r| r.violations_found).sum();
        assert_eq!(sum, scan.total_violations);

        // New scans land at the top of the feed.
        assert_eq!(store.list_scans().await[0].id, scan.id);
    }

    #[tokio::test]
    async fn remediate_sets_status_and_note() {
        let store = store();

        let updated = store.remediate_violation("vio-001", "Filed CTR").await.unwrap();
        assert_eq!(updated.status, ViolationStatus::Remediated);
        assert_eq!(updated.remediation_note.as_deref(), Some("Filed CTR"));

        // Still present in the unfiltered list, with the new status.
        let all = store.list_violations(&ViolationFilter::any()).await;
        let vio = all.iter().find(|v| v.id == "vio-001").unwrap();
        assert_eq!(vio.status, ViolationStatus::Remediated);
    }

    #[tokio::test]
    async fn export_csv_has_the_contract_header() {
        let store = store();
        let export = store.export_scan("scan-001", ExportFormat::Csv).await.unwrap();

        assert_eq!(export.file_name, "scan-scan-001.csv");
        assert_eq!(export.content_type, "text/csv");
        let text = String::from_utf8(export.bytes.to_vec()).unwrap();
        assert!(text.starts_with("rule_name,violations_found\n"));
        assert!(text.contains("Large Cash Deposit Threshold,3"));
    }

    #[tokio::test]
    async fn export_json_roundtrips_the_detail() {
        let store = store();
        let export = store.export_scan("scan-001", ExportFormat::Json).await.unwrap();

        assert_eq!(export.content_type, "application/json");
        let decoded: ScanDetail = serde_json::from_slice(&export.bytes).unwrap();
        assert_eq!(decoded.scan.id, "scan-001");
        assert_eq!(decoded.rule_results.len(), 4);
    }

    #[tokio::test]
    async fn account_detail_joins_without_cross_account_leakage() {
        let store = store();
        let detail = store.account_detail("ACC-10042").await.unwrap();

        assert_eq!(detail.account.customer_name, "John Meridian Corp");
        assert_eq!(detail.transactions.len(), 6);
        assert!(detail.transactions.iter().all(|t| t.account_id == "ACC-10042"));
        assert_eq!(
            detail.violations.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(),
            ["vio-001", "vio-003"]
        );

        // Lookup by opaque id resolves to the same account.
        let by_id = store.account_detail("acc-1").await.unwrap();
        assert_eq!(by_id.account.account_id, "ACC-10042");
    }

    #[tokio::test]
    async fn dashboard_summary_is_derived_from_collections() {
        let store = store();
        let before = store.dashboard_summary().await;
        assert_eq!(before.total_violations, 8);
        assert_eq!(before.open_violations, 5);
        assert_eq!(before.active_rules, 5);

        store
            .update_violation_status("vio-001", ViolationStatus::Confirmed)
            .await
            .unwrap();

        let after = store.dashboard_summary().await;
        assert_eq!(after.open_violations, 4);
    }

    #[tokio::test]
    async fn control_health_rates_are_normalized() {
        let store = store();
        let health = store.control_health().await;

        assert_eq!(health.len(), 6);
        // Sorted by violation count, descending.
        assert!(health.windows(2).all(|w| w[0].violation_count >= w[1].violation_count));
        assert!(health.iter().all(|h| (0.0..=1.0).contains(&h.violation_rate)));
        assert_eq!(health[0].rule_id, "rule-001");
        assert_eq!(health[0].violation_count, 3);
    }

    #[tokio::test]
    async fn save_schedule_creates_then_updates() {
        let store = store();

        let created = store
            .save_schedule(&SaveScheduleRequest {
                id: None,
                frequency: "Weekly".into(),
                interval_hours: 168,
                enabled: true,
            })
            .await;
        assert_eq!(store.list_schedules().await.len(), 3);

        let updated = store
            .save_schedule(&SaveScheduleRequest {
                id: Some(created.id.clone()),
                frequency: "Weekly".into(),
                interval_hours: 168,
                enabled: false,
            })
            .await;
        assert_eq!(updated.id, created.id);
        assert!(!updated.enabled);
        assert_eq!(store.list_schedules().await.len(), 3);
    }

    #[tokio::test]
    async fn case_comment_is_appended_by_the_demo_user() {
        let store = store();
        let case = store
            .add_case_comment("case-002", "Blocking report filed.")
            .await
            .unwrap();

        assert_eq!(case.comments.len(), 1);
        assert_eq!(case.comments[0].comment, "Blocking report filed.");
        assert_eq!(case.comments[0].user_id, "demo-user-001");
    }

    #[tokio::test]
    async fn import_report_counts_good_and_bad_rows() {
        let store = store();
        let csv = b"id,amount,date\n1,100,2026-02-01\n2,oops\n3,300,2026-02-03\n";

        let report = store
            .import_data(ImportKind::Transactions, "txns.csv", csv)
            .await;

        assert_eq!(report.rows_processed, 3);
        assert_eq!(report.rows_inserted, 2);
        assert_eq!(report.rows_failed, 1);
        assert_eq!(report.sample_errors.len(), 1);
        assert!(report.sample_errors[0].contains("line 3"));
    }
}
