use serde::{Deserialize, Serialize};

use super::common::Severity;

/// Alert routing configuration. Singleton per company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSettings {
    pub email: String,
    pub slack_webhook: String,
    pub webhook_url: String,
    pub min_severity: Severity,
}

/// A recurring scan schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    pub frequency: String,
    pub interval_hours: u32,
    pub enabled: bool,
}

/// `POST /settings/schedules` request body. `id` is absent when
/// creating; present when updating an existing schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveScheduleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub frequency: String,
    pub interval_hours: u32,
    pub enabled: bool,
}
