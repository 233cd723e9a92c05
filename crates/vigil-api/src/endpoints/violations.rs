// Violation endpoints

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::model::{Violation, ViolationFilter, ViolationStatus};

fn filter_params(filter: &ViolationFilter) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(severity) = filter.severity {
        params.push(("severity", severity.to_string()));
    }
    if let Some(status) = filter.status {
        params.push(("status", status.to_string()));
    }
    if let Some(ref account_id) = filter.account_id {
        params.push(("account_id", account_id.clone()));
    }
    if let Some(from) = filter.from_date {
        params.push(("from_date", from.to_rfc3339()));
    }
    if let Some(to) = filter.to_date {
        params.push(("to_date", to.to_rfc3339()));
    }
    params
}

impl ApiClient {
    /// `GET /violations?severity&status&account_id&from_date&to_date`
    pub async fn list_violations(&self, filter: &ViolationFilter) -> Result<Vec<Violation>, Error> {
        self.get_with_params("violations", &filter_params(filter))
            .await
    }

    /// `GET /violations/{id}`
    pub async fn violation_detail(&self, violation_id: &str) -> Result<Violation, Error> {
        self.get(&format!("violations/{violation_id}")).await
    }

    /// `PATCH /violations/{id}` with `{status}`
    pub async fn update_violation_status(
        &self,
        violation_id: &str,
        status: ViolationStatus,
    ) -> Result<Violation, Error> {
        debug!(violation_id, %status, "updating violation status");
        self.patch(
            &format!("violations/{violation_id}"),
            &json!({ "status": status }),
        )
        .await
    }

    /// `POST /violations/{id}/remediate` with `{note}`
    pub async fn remediate_violation(
        &self,
        violation_id: &str,
        note: &str,
    ) -> Result<Violation, Error> {
        debug!(violation_id, "remediating violation");
        self.post(
            &format!("violations/{violation_id}/remediate"),
            &json!({ "note": note }),
        )
        .await
    }
}
