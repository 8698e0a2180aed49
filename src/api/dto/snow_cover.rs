//! DTOs for basin snow-cover reports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Snow cover for a date compared with the previous day and the same day a
/// year earlier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowCoverReport {
    pub today: Option<SnowCoverDay>,
    pub yesterday: Option<SnowCoverDay>,
    pub year_ago: Option<SnowCoverDay>,
}

/// Snow cover readings for every basin on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowCoverDay {
    pub date: NaiveDate,
    pub basins: Vec<BasinCover>,
}

/// Share of one river basin covered with snow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasinCover {
    pub name: String,
    /// Percent of the basin area, 0–100.
    pub cover: f64,
}

impl SnowCoverDay {
    pub fn basin(&self, name: &str) -> Option<&BasinCover> {
        self.basins.iter().find(|b| b.name == name)
    }
}

impl SnowCoverReport {
    /// Change in a basin's cover since yesterday, in percentage points.
    pub fn change_since_yesterday(&self, basin: &str) -> Option<f64> {
        let today = self.today.as_ref()?.basin(basin)?;
        let yesterday = self.yesterday.as_ref()?.basin(basin)?;
        Some(today.cover - yesterday.cover)
    }

    /// Change in a basin's cover against the same day last year.
    pub fn change_since_year_ago(&self, basin: &str) -> Option<f64> {
        let today = self.today.as_ref()?.basin(basin)?;
        let year_ago = self.year_ago.as_ref()?.basin(basin)?;
        Some(today.cover - year_ago.cover)
    }
}
