// Settings endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::model::{AlertSettings, SaveScheduleRequest, Schedule};

impl ApiClient {
    /// `GET /settings/alerts`
    pub async fn alert_settings(&self) -> Result<AlertSettings, Error> {
        self.get("settings/alerts").await
    }

    /// `PUT /settings/alerts`
    pub async fn save_alert_settings(
        &self,
        settings: &AlertSettings,
    ) -> Result<AlertSettings, Error> {
        debug!("saving alert settings");
        self.put("settings/alerts", settings).await
    }

    /// `GET /settings/schedules`
    pub async fn list_schedules(&self) -> Result<Vec<Schedule>, Error> {
        self.get("settings/schedules").await
    }

    /// `POST /settings/schedules`
    ///
    /// Creates when `request.id` is absent, updates when present.
    pub async fn save_schedule(&self, request: &SaveScheduleRequest) -> Result<Schedule, Error> {
        debug!(id = ?request.id, "saving schedule");
        self.post("settings/schedules", request).await
    }
}
