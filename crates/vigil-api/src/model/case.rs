use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Severity;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CaseStatus {
    Open,
    InReview,
    Closed,
}

/// A comment on a case's investigation thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseComment {
    pub user_id: String,
    pub user_name: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// An investigation case aggregating one or more violations.
///
/// A violation conceptually belongs to at most one open case; the server
/// owns that constraint, the client does not enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: String,
    pub title: String,
    pub primary_account_id: Option<String>,
    pub severity: Severity,
    pub status: CaseStatus,
    pub linked_violation_ids: Vec<String>,
    pub comments: Vec<CaseComment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filter parameters for `GET /cases`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

/// `POST /cases` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCaseRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_account_id: Option<String>,
    pub severity: Severity,
    pub violation_ids: Vec<String>,
}

/// `PATCH /cases/{id}` request body. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCaseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
}
