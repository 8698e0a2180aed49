//! Past events feed service.

use chrono::NaiveDate;

use crate::api::dto::{EventType, EventsByDate, EventsByType};
use crate::domain::QueryParams;
use crate::error::ApiResult;
use crate::infrastructure::http::ApiClient;

/// Reads recorded events grouped by day or by category.
#[derive(Clone)]
pub struct PastEventsService {
    api: ApiClient,
}

impl PastEventsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /past-events?date=`
    pub async fn by_date(&self, date: NaiveDate) -> ApiResult<Vec<EventsByDate>> {
        let query = QueryParams::new().date("date", date);
        self.api.get("past-events", &query).await
    }

    /// `GET /past-events/by-type?date=[&type=]`
    pub async fn by_type(
        &self,
        date: NaiveDate,
        event_type: Option<EventType>,
    ) -> ApiResult<Vec<EventsByType>> {
        let query = QueryParams::new()
            .date("date", date)
            .opt_text("type", event_type.as_ref().map(EventType::as_str));
        self.api.get("past-events/by-type", &query).await
    }
}
