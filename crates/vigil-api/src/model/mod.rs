// ── Typed API schemas ──
//
// Canonical entity shapes shared by both backends. Live responses
// deserialize directly into these; the fixture store holds them natively.
// Mode transparency depends on there being exactly one set of types.

mod account;
mod analytics;
mod case;
mod common;
mod policy;
mod scan;
mod settings;
mod user;
mod violation;

pub use account::{Account, AccountDetail, Transaction};
pub use analytics::{
    ControlHealth, DashboardSummary, FrameworkCoverage, ImportKind, ImportReport, SeverityCount,
    TopRisk, TopRisks, TrendPoint,
};
pub use case::{Case, CaseComment, CaseFilter, CaseStatus, CreateCaseRequest, UpdateCaseRequest};
pub use common::Severity;
pub use policy::{Policy, PolicyStatus, Rule};
pub use scan::{ExportFile, ExportFormat, RuleResult, Scan, ScanDetail, ScanStatus};
pub use settings::{AlertSettings, SaveScheduleRequest, Schedule};
pub use user::{AuthToken, LoginRequest, User};
pub use violation::{Violation, ViolationFilter, ViolationStatus};
