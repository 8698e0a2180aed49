//! Incident report service.

use chrono::NaiveDate;
use validator::Validate;

use crate::api::dto::pagination::ListBody;
use crate::api::dto::{Incident, NewIncident};
use crate::domain::{DateRange, QueryParams};
use crate::error::ApiResult;
use crate::infrastructure::http::ApiClient;

const PATH: &str = "incidents";

/// Lists and records incidents.
#[derive(Clone)]
pub struct IncidentService {
    api: ApiClient,
}

impl IncidentService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /incidents[?date=YYYY-MM-DD]`
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ApiError::Transport`] on network or server failure.
    pub async fn list(&self, date: Option<NaiveDate>) -> ApiResult<Vec<Incident>> {
        let query = QueryParams::new().opt_date("date", date);
        let body: ListBody<Incident> = self.api.get(PATH, &query).await?;
        Ok(body.into_items())
    }

    /// `GET /incidents[?start_date=..][&end_date=..]`
    ///
    /// An empty range lists everything. A reversed range is rejected before
    /// any request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ApiError::Validation`] when `end` precedes
    /// `start`, else as [`IncidentService::list`].
    pub async fn between(&self, range: &DateRange) -> ApiResult<Vec<Incident>> {
        range.validate()?;
        if range.is_empty() {
            return self.list(None).await;
        }

        let query = QueryParams::new()
            .opt_date("start_date", range.start)
            .opt_date("end_date", range.end);
        let body: ListBody<Incident> = self.api.get(PATH, &query).await?;
        Ok(body.into_items())
    }

    /// `POST /incidents`
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ApiError::Validation`] if the payload is rejected
    /// locally or by the server.
    pub async fn create(&self, incident: &NewIncident) -> ApiResult<Incident> {
        incident.validate()?;
        let created: Incident = self.api.post_json(PATH, incident).await?;
        tracing::info!(id = created.id, organization_id = created.organization_id, "Incident recorded");
        Ok(created)
    }
}
