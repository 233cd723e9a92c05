// Data import endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::model::{ImportKind, ImportReport};

impl ApiClient {
    /// `POST /data/import/{transactions|accounts|payroll}` (multipart `file`)
    pub async fn import_data(
        &self,
        kind: ImportKind,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<ImportReport, Error> {
        debug!(%kind, file_name, "importing dataset");
        self.upload(&format!("data/import/{kind}"), file_name, content)
            .await
    }
}
