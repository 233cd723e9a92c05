// ── Demo dataset ──
//
// Representative entities for demo mode: a mid-size financial-services
// company with a few AML policies, extracted rules, recent scans, and
// open violations concentrated on a handful of risky accounts.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use vigil_api::model::{
    Account, AlertSettings, Case, CaseComment, CaseStatus, FrameworkCoverage, Policy, PolicyStatus,
    Rule, RuleResult, Scan, ScanStatus, Schedule, Severity, Transaction, TrendPoint, User,
    Violation, ViolationStatus,
};

fn ts(month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, month, day, hour, min, sec)
        .single()
        .expect("seed timestamp is valid")
}

pub(crate) fn user() -> User {
    User {
        id: "demo-user-001".into(),
        email: "demo@vigil-compliance.io".into(),
        role: "admin".into(),
        company_id: "comp-001".into(),
        company_name: "Acme Financial Services".into(),
    }
}

pub(crate) fn policies() -> Vec<Policy> {
    vec![
        Policy {
            id: "pol-001".into(),
            name: "AML Customer Due Diligence".into(),
            file_name: "aml-cdd-policy-v3.pdf".into(),
            uploaded_at: ts(1, 15, 10, 30, 0),
            status: PolicyStatus::Active,
            rules_count: 2,
        },
        Policy {
            id: "pol-002".into(),
            name: "Transaction Monitoring Framework".into(),
            file_name: "txn-monitoring-framework.pdf".into(),
            uploaded_at: ts(1, 22, 14, 0, 0),
            status: PolicyStatus::Active,
            rules_count: 3,
        },
        Policy {
            id: "pol-003".into(),
            name: "Sanctions Screening Policy".into(),
            file_name: "sanctions-screening-2026.pdf".into(),
            uploaded_at: ts(2, 5, 9, 15, 0),
            status: PolicyStatus::Processing,
            rules_count: 1,
        },
    ]
}

#[allow(clippy::too_many_lines)]
pub(crate) fn rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "rule-001".into(),
            policy_id: "pol-001".into(),
            name: "Large Cash Deposit Threshold".into(),
            description: "Flag any single cash deposit exceeding $10,000 as per BSA requirements."
                .into(),
            collection: "transactions".into(),
            severity: Severity::High,
            enabled: true,
            pipeline: json!([
                { "$match": { "type": "cash_deposit", "amount": { "$gte": 10000 } } },
                { "$project": { "account_id": 1, "amount": 1, "date": 1 } }
            ])
            .to_string(),
            updated_at: ts(2, 10, 8, 0, 0),
        },
        Rule {
            id: "rule-002".into(),
            policy_id: "pol-001".into(),
            name: "Rapid Succession Transfers".into(),
            description: "Detect 5+ outgoing transfers within 24 hours from the same account."
                .into(),
            collection: "transactions".into(),
            severity: Severity::Critical,
            enabled: true,
            pipeline: json!([
                { "$match": { "type": "wire_transfer", "direction": "outgoing" } },
                { "$group": { "_id": "$account_id", "count": { "$sum": 1 } } },
                { "$match": { "count": { "$gte": 5 } } }
            ])
            .to_string(),
            updated_at: ts(2, 10, 8, 0, 0),
        },
        Rule {
            id: "rule-003".into(),
            policy_id: "pol-002".into(),
            name: "Structuring Detection".into(),
            description:
                "Identify series of deposits just below $10,000 that aggregate above threshold."
                    .into(),
            collection: "transactions".into(),
            severity: Severity::Critical,
            enabled: true,
            pipeline: json!([
                { "$match": { "amount": { "$gte": 8000, "$lt": 10000 } } },
                { "$group": { "_id": "$account_id", "total": { "$sum": "$amount" }, "count": { "$sum": 1 } } },
                { "$match": { "count": { "$gte": 3 }, "total": { "$gte": 25000 } } }
            ])
            .to_string(),
            updated_at: ts(2, 12, 11, 30, 0),
        },
        Rule {
            id: "rule-004".into(),
            policy_id: "pol-002".into(),
            name: "Dormant Account Activity".into(),
            description:
                "Flag accounts with no activity for 12+ months that suddenly show transactions."
                    .into(),
            collection: "accounts".into(),
            severity: Severity::Medium,
            enabled: true,
            pipeline: json!([
                { "$match": { "last_activity_gap_days": { "$gte": 365 } } }
            ])
            .to_string(),
            updated_at: ts(2, 14, 9, 0, 0),
        },
        Rule {
            id: "rule-005".into(),
            policy_id: "pol-002".into(),
            name: "Cross-Border High Value".into(),
            description: "Monitor international transfers exceeding $50,000.".into(),
            collection: "transactions".into(),
            severity: Severity::High,
            enabled: false,
            pipeline: json!([
                { "$match": { "type": "wire_transfer", "international": true, "amount": { "$gte": 50000 } } }
            ])
            .to_string(),
            updated_at: ts(2, 14, 9, 0, 0),
        },
        Rule {
            id: "rule-006".into(),
            policy_id: "pol-003".into(),
            name: "Sanctions List Match".into(),
            description: "Screen all new customers against OFAC SDN and other sanctions lists."
                .into(),
            collection: "customers".into(),
            severity: Severity::Critical,
            enabled: true,
            pipeline: json!([
                { "$lookup": { "from": "sanctions_list", "localField": "name", "foreignField": "name", "as": "matches" } },
                { "$match": { "matches": { "$ne": [] } } }
            ])
            .to_string(),
            updated_at: ts(2, 18, 16, 0, 0),
        },
    ]
}

pub(crate) fn scans() -> Vec<Scan> {
    vec![
        Scan {
            id: "scan-001".into(),
            started_at: ts(2, 22, 6, 0, 0),
            completed_at: Some(ts(2, 22, 6, 4, 32)),
            duration_seconds: Some(272),
            status: ScanStatus::Completed,
            total_violations: 7,
            rules_executed: 5,
        },
        Scan {
            id: "scan-002".into(),
            started_at: ts(2, 21, 6, 0, 0),
            completed_at: Some(ts(2, 21, 6, 3, 58)),
            duration_seconds: Some(238),
            status: ScanStatus::Completed,
            total_violations: 12,
            rules_executed: 5,
        },
        Scan {
            id: "scan-003".into(),
            started_at: ts(2, 20, 6, 0, 0),
            completed_at: Some(ts(2, 20, 6, 5, 11)),
            duration_seconds: Some(311),
            status: ScanStatus::Completed,
            total_violations: 5,
            rules_executed: 4,
        },
        Scan {
            id: "scan-004".into(),
            started_at: ts(2, 19, 12, 30, 0),
            completed_at: None,
            duration_seconds: None,
            status: ScanStatus::Failed,
            total_violations: 0,
            rules_executed: 2,
        },
    ]
}

/// Per-rule results for the completed scans.
pub(crate) fn scan_results() -> Vec<(String, Vec<RuleResult>)> {
    vec![
        (
            "scan-001".into(),
            vec![
                RuleResult {
                    rule_id: "rule-001".into(),
                    rule_name: "Large Cash Deposit Threshold".into(),
                    violations_found: 3,
                },
                RuleResult {
                    rule_id: "rule-002".into(),
                    rule_name: "Rapid Succession Transfers".into(),
                    violations_found: 1,
                },
                RuleResult {
                    rule_id: "rule-003".into(),
                    rule_name: "Structuring Detection".into(),
                    violations_found: 2,
                },
                RuleResult {
                    rule_id: "rule-006".into(),
                    rule_name: "Sanctions List Match".into(),
                    violations_found: 1,
                },
            ],
        ),
        (
            "scan-002".into(),
            vec![
                RuleResult {
                    rule_id: "rule-001".into(),
                    rule_name: "Large Cash Deposit Threshold".into(),
                    violations_found: 8,
                },
                RuleResult {
                    rule_id: "rule-004".into(),
                    rule_name: "Dormant Account Activity".into(),
                    violations_found: 4,
                },
            ],
        ),
    ]
}

#[allow(clippy::too_many_lines)]
pub(crate) fn violations() -> Vec<Violation> {
    vec![
        Violation {
            id: "vio-001".into(),
            rule_id: "rule-001".into(),
            rule_name: "Large Cash Deposit Threshold".into(),
            account_id: "ACC-10042".into(),
            severity: Severity::High,
            status: ViolationStatus::Open,
            created_at: ts(2, 22, 6, 2, 14),
            snapshot: json!({ "amount": 14500, "type": "cash_deposit", "branch": "NYC-Main" }),
            explanation: "Cash deposit of $14,500 exceeds the $10,000 BSA reporting threshold."
                .into(),
            suggestions: vec![
                "File CTR within 15 days".into(),
                "Review customer CDD profile".into(),
                "Check for related deposits".into(),
            ],
            remediation_note: None,
        },
        Violation {
            id: "vio-002".into(),
            rule_id: "rule-002".into(),
            rule_name: "Rapid Succession Transfers".into(),
            account_id: "ACC-20871".into(),
            severity: Severity::Critical,
            status: ViolationStatus::Open,
            created_at: ts(2, 22, 6, 2, 48),
            snapshot: json!({
                "transfer_count": 7,
                "total_amount": 89300,
                "period": "18 hours",
                "destinations": ["Cayman Islands", "Luxembourg"]
            }),
            explanation:
                "7 outgoing wire transfers totaling $89,300 within 18 hours to offshore destinations."
                    .into(),
            suggestions: vec![
                "Escalate to compliance officer".into(),
                "File SAR immediately".into(),
                "Freeze outgoing transfers pending review".into(),
            ],
            remediation_note: None,
        },
        Violation {
            id: "vio-003".into(),
            rule_id: "rule-003".into(),
            rule_name: "Structuring Detection".into(),
            account_id: "ACC-10042".into(),
            severity: Severity::Critical,
            status: ViolationStatus::Confirmed,
            created_at: ts(2, 21, 6, 1, 30),
            snapshot: json!({
                "deposits": [9800, 9500, 9900, 9700],
                "total": 38900,
                "period": "5 days"
            }),
            explanation:
                "Four deposits averaging $9,725 each over 5 days, totaling $38,900. Classic structuring pattern."
                    .into(),
            suggestions: vec![
                "File SAR with structuring indicator".into(),
                "Enhanced monitoring for 90 days".into(),
            ],
            remediation_note: None,
        },
        Violation {
            id: "vio-004".into(),
            rule_id: "rule-004".into(),
            rule_name: "Dormant Account Activity".into(),
            account_id: "ACC-30156".into(),
            severity: Severity::Medium,
            status: ViolationStatus::Open,
            created_at: ts(2, 21, 6, 2, 5),
            snapshot: json!({
                "dormant_days": 487,
                "reactivation_amount": 32000,
                "type": "wire_transfer"
            }),
            explanation:
                "Account dormant for 487 days, reactivated with a $32,000 incoming wire transfer."
                    .into(),
            suggestions: vec![
                "Update KYC documentation".into(),
                "Review source of funds".into(),
            ],
            remediation_note: None,
        },
        Violation {
            id: "vio-005".into(),
            rule_id: "rule-006".into(),
            rule_name: "Sanctions List Match".into(),
            account_id: "ACC-40023".into(),
            severity: Severity::Critical,
            status: ViolationStatus::Open,
            created_at: ts(2, 22, 6, 3, 10),
            snapshot: json!({
                "matched_name": "Al-Rashid Holdings",
                "list": "OFAC SDN",
                "match_score": 0.94
            }),
            explanation: "Customer name matches OFAC SDN list entry with 94% confidence.".into(),
            suggestions: vec![
                "Immediate account freeze".into(),
                "Notify BSA officer".into(),
                "File blocking report within 10 days".into(),
            ],
            remediation_note: None,
        },
        Violation {
            id: "vio-006".into(),
            rule_id: "rule-001".into(),
            rule_name: "Large Cash Deposit Threshold".into(),
            account_id: "ACC-50891".into(),
            severity: Severity::High,
            status: ViolationStatus::Dismissed,
            created_at: ts(2, 20, 6, 1, 45),
            snapshot: json!({ "amount": 11200, "type": "cash_deposit", "branch": "LA-Downtown" }),
            explanation: "Cash deposit of $11,200 exceeds the $10,000 BSA reporting threshold."
                .into(),
            suggestions: vec!["File CTR within 15 days".into()],
            remediation_note: None,
        },
        Violation {
            id: "vio-007".into(),
            rule_id: "rule-004".into(),
            rule_name: "Dormant Account Activity".into(),
            account_id: "ACC-60234".into(),
            severity: Severity::Medium,
            status: ViolationStatus::Remediated,
            created_at: ts(2, 19, 6, 2, 30),
            snapshot: json!({
                "dormant_days": 398,
                "reactivation_amount": 5600,
                "type": "ACH"
            }),
            explanation: "Account dormant for 398 days, reactivated with ACH credit.".into(),
            suggestions: vec!["Update KYC documentation".into()],
            remediation_note: Some("KYC refreshed and account re-verified".into()),
        },
        Violation {
            id: "vio-008".into(),
            rule_id: "rule-001".into(),
            rule_name: "Large Cash Deposit Threshold".into(),
            account_id: "ACC-70432".into(),
            severity: Severity::High,
            status: ViolationStatus::Open,
            created_at: ts(2, 22, 6, 3, 55),
            snapshot: json!({ "amount": 25000, "type": "cash_deposit", "branch": "CHI-Loop" }),
            explanation: "Cash deposit of $25,000 exceeds the $10,000 BSA reporting threshold."
                .into(),
            suggestions: vec![
                "File CTR within 15 days".into(),
                "Review for structuring patterns".into(),
            ],
            remediation_note: None,
        },
    ]
}

pub(crate) fn accounts() -> Vec<Account> {
    let row = |id: &str, account_id: &str, name: &str, balance: f64, risk: u8, status: &str| {
        Account {
            id: id.into(),
            account_id: account_id.into(),
            customer_name: name.into(),
            balance,
            risk_score: risk,
            status: status.into(),
        }
    };
    vec![
        row("acc-1", "ACC-10042", "John Meridian Corp", 284_500.0, 87, "active"),
        row("acc-2", "ACC-20871", "Eastbridge Trading Ltd", 1_245_000.0, 94, "active"),
        row("acc-3", "ACC-30156", "Harmon Financial Group", 67_800.0, 62, "active"),
        row("acc-4", "ACC-40023", "Al-Rashid Holdings", 523_000.0, 99, "frozen"),
        row("acc-5", "ACC-50891", "Pacific Ventures Inc", 189_000.0, 35, "active"),
        row("acc-6", "ACC-60234", "Greenfield Investments", 41_200.0, 28, "active"),
        row("acc-7", "ACC-70432", "Sterling & Associates", 892_000.0, 71, "active"),
    ]
}

pub(crate) fn transactions() -> Vec<Transaction> {
    let row = |id: &str, account_id: &str, amount: f64, kind: &str, date: DateTime<Utc>, desc: &str| {
        Transaction {
            id: id.into(),
            account_id: account_id.into(),
            amount,
            kind: kind.into(),
            date,
            description: desc.into(),
        }
    };
    vec![
        row("txn-1", "ACC-10042", 14_500.0, "cash_deposit", ts(2, 22, 10, 15, 0), "Cash deposit - NYC Main Branch"),
        row("txn-2", "ACC-10042", -5_200.0, "wire_transfer", ts(2, 21, 14, 30, 0), "Wire to external account"),
        row("txn-3", "ACC-10042", 9_800.0, "cash_deposit", ts(2, 20, 9, 0, 0), "Cash deposit - NYC Main Branch"),
        row("txn-4", "ACC-10042", 9_500.0, "cash_deposit", ts(2, 18, 11, 20, 0), "Cash deposit - NYC Midtown"),
        row("txn-5", "ACC-10042", -3_200.0, "ACH", ts(2, 17, 8, 0, 0), "ACH payment - Vendor Services"),
        row("txn-6", "ACC-10042", 9_900.0, "cash_deposit", ts(2, 16, 10, 45, 0), "Cash deposit - NYC Main Branch"),
        row("txn-7", "ACC-20871", -12_800.0, "wire_transfer", ts(2, 22, 7, 5, 0), "Wire to Cayman Islands"),
        row("txn-8", "ACC-20871", -14_100.0, "wire_transfer", ts(2, 22, 9, 40, 0), "Wire to Luxembourg"),
    ]
}

pub(crate) fn alert_settings() -> AlertSettings {
    AlertSettings {
        email: "compliance@acmefinancial.com".into(),
        slack_webhook: "https://hooks.slack.com/services/T00/B00/xxxxx".into(),
        webhook_url: String::new(),
        min_severity: Severity::High,
    }
}

pub(crate) fn schedules() -> Vec<Schedule> {
    vec![
        Schedule {
            id: "sched-001".into(),
            frequency: "Daily".into(),
            interval_hours: 24,
            enabled: true,
        },
        Schedule {
            id: "sched-002".into(),
            frequency: "Hourly".into(),
            interval_hours: 1,
            enabled: false,
        },
    ]
}

pub(crate) fn framework_coverage() -> Vec<FrameworkCoverage> {
    vec![
        FrameworkCoverage {
            framework: "BSA/AML".into(),
            controls_total: 18,
            controls_covered: 12,
        },
        FrameworkCoverage {
            framework: "OFAC".into(),
            controls_total: 6,
            controls_covered: 4,
        },
        FrameworkCoverage {
            framework: "SOX".into(),
            controls_total: 11,
            controls_covered: 3,
        },
    ]
}

pub(crate) fn trends() -> Vec<TrendPoint> {
    [
        ("Feb 1", 12),
        ("Feb 3", 18),
        ("Feb 5", 9),
        ("Feb 7", 24),
        ("Feb 9", 15),
        ("Feb 11", 31),
        ("Feb 13", 22),
        ("Feb 15", 17),
        ("Feb 17", 28),
        ("Feb 19", 20),
        ("Feb 21", 14),
        ("Feb 22", 11),
    ]
    .into_iter()
    .map(|(date, count)| TrendPoint {
        date: date.into(),
        count,
    })
    .collect()
}

pub(crate) fn cases() -> Vec<Case> {
    vec![
        Case {
            id: "case-001".into(),
            title: "Eastbridge offshore transfer pattern".into(),
            primary_account_id: Some("ACC-20871".into()),
            severity: Severity::Critical,
            status: CaseStatus::InReview,
            linked_violation_ids: vec!["vio-002".into()],
            comments: vec![CaseComment {
                user_id: "demo-user-001".into(),
                user_name: "Demo Admin".into(),
                comment: "Wire pattern matches prior SAR filing from January.".into(),
                created_at: ts(2, 22, 9, 30, 0),
            }],
            created_at: ts(2, 22, 8, 15, 0),
            updated_at: ts(2, 22, 9, 30, 0),
        },
        Case {
            id: "case-002".into(),
            title: "Al-Rashid sanctions screening hit".into(),
            primary_account_id: Some("ACC-40023".into()),
            severity: Severity::Critical,
            status: CaseStatus::Open,
            linked_violation_ids: vec!["vio-005".into()],
            comments: Vec::new(),
            created_at: ts(2, 22, 7, 0, 0),
            updated_at: ts(2, 22, 7, 0, 0),
        },
    ]
}
