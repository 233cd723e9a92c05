// Rule endpoints

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::model::Rule;

impl ApiClient {
    /// `GET /rules?policy_id=`
    pub async fn list_rules(&self, policy_id: Option<&str>) -> Result<Vec<Rule>, Error> {
        let mut params = Vec::new();
        if let Some(id) = policy_id {
            params.push(("policy_id", id.to_owned()));
        }
        self.get_with_params("rules", &params).await
    }

    /// `PATCH /rules/{id}` with `{enabled}`
    ///
    /// Toggling never deletes the rule's violation history.
    pub async fn set_rule_enabled(&self, rule_id: &str, enabled: bool) -> Result<Rule, Error> {
        debug!(rule_id, enabled, "toggling rule");
        self.patch(&format!("rules/{rule_id}"), &json!({ "enabled": enabled }))
            .await
    }
}
