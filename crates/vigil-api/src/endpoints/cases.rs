// Case management endpoints

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::model::{Case, CaseFilter, CreateCaseRequest, UpdateCaseRequest};

fn filter_params(filter: &CaseFilter) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(status) = filter.status {
        params.push(("status", status.to_string()));
    }
    if let Some(severity) = filter.severity {
        params.push(("severity", severity.to_string()));
    }
    params
}

impl ApiClient {
    /// `GET /cases?status&severity`
    pub async fn list_cases(&self, filter: &CaseFilter) -> Result<Vec<Case>, Error> {
        self.get_with_params("cases", &filter_params(filter)).await
    }

    /// `GET /cases/{id}`
    pub async fn case_detail(&self, case_id: &str) -> Result<Case, Error> {
        self.get(&format!("cases/{case_id}")).await
    }

    /// `POST /cases`
    pub async fn create_case(&self, request: &CreateCaseRequest) -> Result<Case, Error> {
        debug!(title = %request.title, "creating case");
        self.post("cases", request).await
    }

    /// `PATCH /cases/{id}`
    pub async fn update_case(
        &self,
        case_id: &str,
        request: &UpdateCaseRequest,
    ) -> Result<Case, Error> {
        debug!(case_id, "updating case");
        self.patch(&format!("cases/{case_id}"), request).await
    }

    /// `POST /cases/{id}/comment`
    pub async fn add_case_comment(&self, case_id: &str, comment: &str) -> Result<Case, Error> {
        debug!(case_id, "adding case comment");
        self.post(
            &format!("cases/{case_id}/comment"),
            &json!({ "comment": comment }),
        )
        .await
    }
}
