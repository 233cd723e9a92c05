// Scan endpoints
//
// Export is the one blob download in the API. The artifact name is
// synthesized client-side as `scan-{id}.{format}` because the server
// does not send a Content-Disposition header.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::model::{ExportFile, ExportFormat, Scan, ScanDetail};

impl ApiClient {
    /// `GET /scans`
    pub async fn list_scans(&self) -> Result<Vec<Scan>, Error> {
        self.get("scans").await
    }

    /// `POST /scans/run`
    ///
    /// Kicks off a scan and returns it. Never retried by any layer --
    /// a duplicate request would double-run the rule pipeline.
    pub async fn run_scan(&self) -> Result<Scan, Error> {
        debug!("running scan");
        self.post_empty("scans/run").await
    }

    /// `GET /scans/{id}`
    pub async fn scan_detail(&self, scan_id: &str) -> Result<ScanDetail, Error> {
        self.get(&format!("scans/{scan_id}")).await
    }

    /// `GET /scans/{id}/export?format=csv|json` (blob)
    pub async fn export_scan(
        &self,
        scan_id: &str,
        format: ExportFormat,
    ) -> Result<ExportFile, Error> {
        debug!(scan_id, %format, "exporting scan");
        let bytes = self
            .download(
                &format!("scans/{scan_id}/export"),
                &[("format", format.to_string())],
            )
            .await?;
        Ok(ExportFile {
            file_name: format!("scan-{scan_id}.{format}"),
            content_type: format.content_type().to_owned(),
            bytes,
        })
    }
}
