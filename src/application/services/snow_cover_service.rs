//! Snow cover report service.

use chrono::NaiveDate;

use crate::api::dto::SnowCoverReport;
use crate::domain::QueryParams;
use crate::error::ApiResult;
use crate::infrastructure::http::ApiClient;

#[derive(Clone)]
pub struct SnowCoverService {
    api: ApiClient,
}

impl SnowCoverService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /snow-cover[?date=]`. Without a date the server reports today.
    pub async fn report(&self, date: Option<NaiveDate>) -> ApiResult<SnowCoverReport> {
        let query = QueryParams::new().opt_date("date", date);
        self.api.get("snow-cover", &query).await
    }
}
