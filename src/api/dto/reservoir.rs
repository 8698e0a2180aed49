//! DTOs for reservoir metrics and monitoring devices.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use validator::Validate;

/// Daily metrics for one organization's reservoir.
///
/// Metrics may arrive as JSON numbers or as decimal strings.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservoirSummary {
    pub organization_id: i64,
    pub organization_name: String,
    pub date: NaiveDate,
    /// Upstream water level, metres above sea level.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub level: Option<f64>,
    /// Stored volume, million m³.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub volume: Option<f64>,
    /// Inflow, m³/s.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub income: Option<f64>,
    /// Outflow, m³/s.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub release: Option<f64>,
}

impl ReservoirSummary {
    /// Inflow minus outflow, when both are reported.
    pub fn net_flow(&self) -> Option<f64> {
        Some(self.income? - self.release?)
    }
}

/// Monitoring device counters for one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservoirDevice {
    pub id: i64,
    pub organization_name: String,
    pub count_installed: u32,
    pub count_working: u32,
    pub count_faulty: u32,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update for one device row. Absent counters are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct DeviceUpdate {
    #[validate(range(min = 1))]
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_installed: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_working: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_faulty: Option<u32>,
}

impl DeviceUpdate {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn installed(mut self, count: u32) -> Self {
        self.count_installed = Some(count);
        self
    }

    pub fn working(mut self, count: u32) -> Self {
        self.count_working = Some(count);
        self
    }

    pub fn faulty(mut self, count: u32) -> Self {
        self.count_faulty = Some(count);
        self
    }

    /// True when no counter would change.
    pub fn is_noop(&self) -> bool {
        self.count_installed.is_none() && self.count_working.is_none() && self.count_faulty.is_none()
    }
}

/// Request body for `PATCH /reservoir-device`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DeviceUpdateBatch {
    #[validate(length(min = 1, message = "Batch must contain at least one update"))]
    #[validate(nested)]
    pub devices: Vec<DeviceUpdate>,
}

impl DeviceUpdateBatch {
    /// Builds a batch, dropping updates that change nothing.
    pub fn new(updates: impl IntoIterator<Item = DeviceUpdate>) -> Self {
        Self {
            devices: updates.into_iter().filter(|u| !u.is_noop()).collect(),
        }
    }
}
