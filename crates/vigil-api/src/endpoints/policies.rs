// Policy endpoints
//
// Upload is multipart (`file` field); rule extraction is a long-running
// POST that returns the created rules once the server finishes.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::model::{Policy, Rule};

impl ApiClient {
    /// `GET /policies`
    pub async fn list_policies(&self) -> Result<Vec<Policy>, Error> {
        self.get("policies").await
    }

    /// `POST /policies` (multipart `file`)
    pub async fn upload_policy(&self, file_name: &str, content: Vec<u8>) -> Result<Policy, Error> {
        debug!(file_name, "uploading policy document");
        self.upload("policies", file_name, content).await
    }

    /// `POST /policies/{id}/extract-rules`
    ///
    /// Returns the rules the server created from the policy text.
    pub async fn extract_rules(&self, policy_id: &str) -> Result<Vec<Rule>, Error> {
        debug!(policy_id, "extracting rules");
        self.post_empty(&format!("policies/{policy_id}/extract-rules"))
            .await
    }
}
