//! Reservoir metrics and monitoring-device service.

use chrono::NaiveDate;
use validator::Validate;

use crate::api::dto::{DeviceUpdateBatch, ReservoirDevice, ReservoirSummary};
use crate::domain::QueryParams;
use crate::error::ApiResult;
use crate::infrastructure::http::ApiClient;

const DEVICE_PATH: &str = "reservoir-device";

/// Reads reservoir metrics and maintains device counters.
#[derive(Clone)]
pub struct ReservoirService {
    api: ApiClient,
}

impl ReservoirService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /reservoir-summary?date=`. The backend requires the date.
    pub async fn summary(&self, date: NaiveDate) -> ApiResult<Vec<ReservoirSummary>> {
        let query = QueryParams::new().date("date", date);
        self.api.get("reservoir-summary", &query).await
    }

    /// `GET /reservoir-device`
    pub async fn devices(&self) -> ApiResult<Vec<ReservoirDevice>> {
        self.api.get(DEVICE_PATH, &QueryParams::new()).await
    }

    /// `PATCH /reservoir-device` with a batch of partial updates.
    ///
    /// Counters absent from an update are not sent and keep their server
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ApiError::Validation`] for an empty batch or an
    /// invalid device id, without sending a request.
    pub async fn update_devices(&self, batch: &DeviceUpdateBatch) -> ApiResult<()> {
        batch.validate()?;
        self.api.patch_json_ack(DEVICE_PATH, batch).await?;
        tracing::info!(count = batch.devices.len(), "Reservoir devices updated");
        Ok(())
    }
}
