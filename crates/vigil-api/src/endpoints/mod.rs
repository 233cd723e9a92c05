// Endpoint groups, one file per API area.
//
// Each module adds inherent methods to `ApiClient`; nothing here touches
// transport mechanics directly.

mod accounts;
mod analytics;
mod auth;
mod cases;
mod dashboard;
mod import;
mod policies;
mod rules;
mod scans;
mod settings;
mod violations;
