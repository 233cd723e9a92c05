use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::violation::Violation;

/// A monitored customer account.
///
/// `account_id` is the human-facing key (`ACC-10042`) used by
/// transactions and violations to reference the account; `id` is the
/// opaque storage identifier. `risk_score` is in `[0, 100]` and is
/// read-only to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub account_id: String,
    pub customer_name: String,
    pub balance: f64,
    pub risk_score: u8,
    pub status: String,
}

/// A single ledger entry. The sign of `amount` encodes direction:
/// positive for inflows, negative for outflows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: DateTime<Utc>,
    pub description: String,
}

/// `GET /accounts/{id}` response: the account joined with its
/// transactions and violations. Assembled server-side in live mode and
/// client-side in demo mode; the shape is identical either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDetail {
    #[serde(flatten)]
    pub account: Account,
    pub transactions: Vec<Transaction>,
    pub violations: Vec<Violation>,
}
