//! Monthly events calendar service.

use validator::Validate;

use crate::api::dto::{CalendarMonth, CalendarQuery};
use crate::domain::QueryParams;
use crate::error::ApiResult;
use crate::infrastructure::http::ApiClient;

/// Reads per-day event counters for a month.
#[derive(Clone)]
pub struct CalendarService {
    api: ApiClient,
}

impl CalendarService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /calendar/events?year=&month=`
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ApiError::Validation`] for a month outside
    /// `1..=12`, without sending a request.
    pub async fn events(&self, year: i32, month: u32) -> ApiResult<CalendarMonth> {
        let query = CalendarQuery { year, month };
        query.validate()?;

        let params = QueryParams::new()
            .int("year", i64::from(query.year))
            .int("month", i64::from(query.month));
        self.api.get("calendar/events", &params).await
    }
}
