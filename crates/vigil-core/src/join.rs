// ── Composite view assembly ──
//
// Detail views that cross independent entity collections are assembled
// here, and only here. Each composite gets one typed assembly function
// so the shape is identical no matter which backend produced the parts;
// downstream code never branches on mode.

use serde::{Deserialize, Serialize};
use vigil_api::model::{Account, AccountDetail, Case, Transaction, Violation};

/// Join an account with its transactions and violations.
///
/// Matching is on the human account key (`ACC-10042`), which is what
/// transactions and violations reference. Rows for other accounts are
/// excluded, full stop -- cross-account leakage here would surface
/// another customer's ledger in the detail view.
pub fn account_detail(
    account: Account,
    transactions: &[Transaction],
    violations: &[Violation],
) -> AccountDetail {
    let account_key = account.account_id.clone();
    AccountDetail {
        account,
        transactions: transactions
            .iter()
            .filter(|t| t.account_id == account_key)
            .cloned()
            .collect(),
        violations: violations
            .iter()
            .filter(|v| v.account_id == account_key)
            .cloned()
            .collect(),
    }
}

/// A case joined with the full records of its linked violations.
///
/// Assembled client-side in both modes (the case endpoint returns only
/// violation ids), so this is the one composite that never comes from
/// the server pre-joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDetail {
    #[serde(flatten)]
    pub case: Case,
    pub violations: Vec<Violation>,
}

/// Join a case with its linked violations, preserving link order.
pub fn case_detail(case: Case, violations: &[Violation]) -> CaseDetail {
    let linked = case
        .linked_violation_ids
        .iter()
        .filter_map(|id| violations.iter().find(|v| &v.id == id))
        .cloned()
        .collect();
    CaseDetail {
        case,
        violations: linked,
    }
}
