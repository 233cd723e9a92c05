use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Severity;

/// Triage state of a violation.
///
/// Transitions move forward (`open` → `confirmed`/`dismissed` →
/// `remediated`) except reopening, which the server permits from any
/// non-open state. The client does not enforce the state machine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ViolationStatus {
    Open,
    Confirmed,
    Dismissed,
    Remediated,
}

/// A rule violation detected by a scan against a specific account.
///
/// `snapshot` carries the rule-specific evidence captured at detection
/// time (arbitrary JSON); `suggestions` are remediation steps produced
/// by the server's explainability pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub id: String,
    pub rule_id: String,
    pub rule_name: String,
    pub account_id: String,
    pub severity: Severity,
    pub status: ViolationStatus,
    pub created_at: DateTime<Utc>,
    pub snapshot: serde_json::Value,
    pub explanation: String,
    pub suggestions: Vec<String>,
    /// Set once the violation has been remediated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation_note: Option<String>,
}

/// Filter parameters for `GET /violations`.
///
/// Every field is optional; present fields compose with boolean AND.
/// Empty-string values are treated as absent when serialized to query
/// parameters (the server rejects empty filter values).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViolationFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ViolationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<DateTime<Utc>>,
}

impl ViolationFilter {
    /// A filter that matches everything.
    pub fn any() -> Self {
        Self::default()
    }
}
