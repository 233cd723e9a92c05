// Analytics endpoints

use crate::client::ApiClient;
use crate::error::Error;
use crate::model::{ControlHealth, FrameworkCoverage, TopRisks, TrendPoint};

impl ApiClient {
    /// `GET /analytics/control-health`
    pub async fn control_health(&self) -> Result<Vec<ControlHealth>, Error> {
        self.get("analytics/control-health").await
    }

    /// `GET /analytics/top-risks`
    pub async fn top_risks(&self) -> Result<TopRisks, Error> {
        self.get("analytics/top-risks").await
    }

    /// `GET /analytics/framework-coverage`
    pub async fn framework_coverage(&self) -> Result<Vec<FrameworkCoverage>, Error> {
        self.get("analytics/framework-coverage").await
    }

    /// `GET /analytics/trends?days=`
    pub async fn analytics_trends(&self, days: u32) -> Result<Vec<TrendPoint>, Error> {
        self.get_with_params("analytics/trends", &[("days", days.to_string())])
            .await
    }
}
