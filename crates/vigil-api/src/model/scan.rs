use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScanStatus {
    Running,
    Completed,
    Failed,
}

/// A single execution of the rule pipeline across the company's data.
///
/// `completed_at` and `duration_seconds` are `None` while the scan is
/// running (and stay `None` for scans that died mid-flight).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scan {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration_seconds: Option<u64>,
    pub status: ScanStatus,
    pub total_violations: u32,
    pub rules_executed: u32,
}

/// Per-rule outcome inside a scan detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    pub rule_id: String,
    pub rule_name: String,
    pub violations_found: u32,
}

/// `GET /scans/{id}` response: the scan plus per-rule results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanDetail {
    #[serde(flatten)]
    pub scan: Scan,
    pub rule_results: Vec<RuleResult>,
}

/// Export format for `GET /scans/{id}/export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }
}

/// A downloaded export artifact. The caller decides what to do with the
/// bytes (save to disk, hand to the browser); the layer only carries them.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}
