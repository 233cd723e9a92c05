// ── Static invalidation table ──
//
// One auditable mapping from mutation type to the cache keys it stales.
// Call sites never pick invalidation targets ad hoc; they name the
// mutation and the table decides.

use vigil_api::model::ImportKind;

use super::key::QueryKey;

/// A mutation intent, as far as the cache is concerned.
///
/// Variants carry only what invalidation needs (detail-key ids), not
/// the mutation payload itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    UploadPolicy,
    ExtractRules,
    ToggleRule,
    RunScan,
    UpdateViolationStatus,
    RemediateViolation,
    SaveAlertSettings,
    SaveSchedule,
    /// Create or update; both stale the list and the case's detail key.
    SaveCase { case_id: String },
    AddCaseComment { case_id: String },
    /// No endpoint is wired to this yet; the table entry keeps the
    /// comment mapping complete for both entity kinds.
    AddViolationComment { violation_id: String },
    ImportData { kind: ImportKind },
}

/// What a mutation invalidates: every key under a prefix, or one
/// specific detail key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Prefix(&'static str),
    Exact(QueryKey),
}

impl Mutation {
    /// The invalidation table. Kept as one exhaustive match so a new
    /// mutation without an entry fails to compile.
    pub fn invalidates(&self) -> Vec<Target> {
        match self {
            Self::UploadPolicy => vec![Target::Prefix("policies")],
            Self::ExtractRules => vec![Target::Prefix("policies"), Target::Prefix("rules")],
            Self::ToggleRule => vec![Target::Prefix("rules")],
            Self::RunScan => vec![
                Target::Prefix("scans"),
                Target::Prefix("violations"),
                Target::Prefix("dashboard-summary"),
                Target::Prefix("dashboard-trends"),
            ],
            Self::UpdateViolationStatus => vec![
                Target::Prefix("violations"),
                Target::Prefix("dashboard-summary"),
            ],
            Self::RemediateViolation => vec![Target::Prefix("violations")],
            Self::SaveAlertSettings => vec![Target::Prefix("alert-settings")],
            Self::SaveSchedule => vec![Target::Prefix("schedules")],
            Self::SaveCase { case_id } => vec![
                Target::Prefix("cases"),
                Target::Exact(QueryKey::detail("cases", case_id.clone())),
            ],
            // Both detail keys for the case: the raw record and the
            // composite (case + joined violations) view.
            Self::AddCaseComment { case_id } => vec![
                Target::Exact(QueryKey::detail("cases", case_id.clone())),
                Target::Exact(QueryKey::detail("cases", format!("{case_id}:detail"))),
            ],
            Self::AddViolationComment { violation_id } => {
                vec![Target::Exact(QueryKey::detail(
                    "violations",
                    violation_id.clone(),
                ))]
            }
            // Imports refresh whatever dataset they feed.
            Self::ImportData { kind } => match kind {
                ImportKind::Accounts => vec![Target::Prefix("accounts")],
                ImportKind::Transactions => vec![
                    Target::Prefix("dashboard-summary"),
                    Target::Prefix("dashboard-trends"),
                ],
                ImportKind::Payroll => Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_scan_stales_scans_violations_and_dashboard() {
        let targets = Mutation::RunScan.invalidates();
        assert_eq!(
            targets,
            vec![
                Target::Prefix("scans"),
                Target::Prefix("violations"),
                Target::Prefix("dashboard-summary"),
                Target::Prefix("dashboard-trends"),
            ]
        );
    }

    #[test]
    fn toggle_rule_does_not_touch_violations() {
        let targets = Mutation::ToggleRule.invalidates();
        assert!(!targets.contains(&Target::Prefix("violations")));
        assert_eq!(targets, vec![Target::Prefix("rules")]);
    }

    #[test]
    fn comment_stales_only_the_cases_detail_keys() {
        let targets = Mutation::AddCaseComment {
            case_id: "case-001".into(),
        }
        .invalidates();
        assert_eq!(
            targets,
            vec![
                Target::Exact(QueryKey::detail("cases", "case-001")),
                Target::Exact(QueryKey::detail("cases", "case-001:detail")),
            ]
        );
        assert!(!targets.contains(&Target::Prefix("cases")));
    }

    #[test]
    fn save_case_stales_list_and_detail() {
        let targets = Mutation::SaveCase {
            case_id: "case-002".into(),
        }
        .invalidates();
        assert!(targets.contains(&Target::Prefix("cases")));
        assert!(targets.contains(&Target::Exact(QueryKey::detail("cases", "case-002"))));
    }
}
