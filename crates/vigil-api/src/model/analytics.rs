use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Severity;

/// `GET /dashboard/summary` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_violations: u32,
    pub open_violations: u32,
    pub high_critical_violations: u32,
    pub active_rules: u32,
    pub last_scan_time: Option<DateTime<Utc>>,
}

/// One point on the violations-over-time chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub count: u32,
}

/// One slice of the severity-distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCount {
    pub severity: Severity,
    pub count: u32,
}

/// Per-rule health metrics.
///
/// `violation_rate` is violations over the evaluated population, in
/// `[0, 1]`. Derived from rule + violation state; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlHealth {
    pub rule_id: String,
    pub rule_name: String,
    pub violation_count: u32,
    pub violation_rate: f64,
}

/// One entry in the top-risks ranking (a rule or an account).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopRisk {
    pub id: String,
    pub name: String,
    pub violation_count: u32,
}

/// `GET /analytics/top-risks` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopRisks {
    pub top_rules: Vec<TopRisk>,
    pub top_accounts: Vec<TopRisk>,
}

/// Coverage of a regulatory framework by enabled rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkCoverage {
    pub framework: String,
    pub controls_total: u32,
    pub controls_covered: u32,
}

/// Which dataset a CSV import targets. Maps to the final path segment
/// of `POST /data/import/{kind}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ImportKind {
    Transactions,
    Accounts,
    Payroll,
}

/// `POST /data/import/{kind}` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub rows_processed: u32,
    pub rows_inserted: u32,
    pub rows_failed: u32,
    pub sample_errors: Vec<String>,
}
