// Dashboard summary endpoints

use crate::client::ApiClient;
use crate::error::Error;
use crate::model::{DashboardSummary, SeverityCount, TrendPoint};

impl ApiClient {
    /// `GET /dashboard/summary`
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, Error> {
        self.get("dashboard/summary").await
    }

    /// `GET /dashboard/trends`
    pub async fn dashboard_trends(&self) -> Result<Vec<TrendPoint>, Error> {
        self.get("dashboard/trends").await
    }

    /// `GET /dashboard/severity-distribution`
    pub async fn severity_distribution(&self) -> Result<Vec<SeverityCount>, Error> {
        self.get("dashboard/severity-distribution").await
    }
}
