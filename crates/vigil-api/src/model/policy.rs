use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Severity;

/// Policy document lifecycle state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PolicyStatus {
    /// Uploaded, rule extraction not yet complete.
    Processing,
    Active,
    Processed,
}

/// An uploaded compliance policy document.
///
/// `rules_count` is derived server-side from the extracted rules and is
/// never set by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    pub name: String,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub status: PolicyStatus,
    pub rules_count: u32,
}

/// A detection rule extracted from a policy.
///
/// `pipeline` is an opaque detection spec executed by the scan engine;
/// the client treats it as display-only text. Toggling `enabled` never
/// deletes violation history produced by the rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub policy_id: String,
    pub name: String,
    pub description: String,
    pub collection: String,
    pub severity: Severity,
    pub enabled: bool,
    pub pipeline: String,
    pub updated_at: DateTime<Utc>,
}
