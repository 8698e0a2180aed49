//! DTOs for the monthly events calendar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query for `GET /calendar/events`.
#[derive(Debug, Clone, Copy, Validate)]
pub struct CalendarQuery {
    #[validate(range(min = 2000, max = 2100))]
    pub year: i32,
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: u32,
}

/// Event counts for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

/// Event counters for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub incidents: u32,
    #[serde(default)]
    pub shutdowns: u32,
    #[serde(default)]
    pub discharges: u32,
    #[serde(default)]
    pub visits: u32,
}

impl CalendarDay {
    /// Sum of all counters, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.incidents
            .saturating_add(self.shutdowns)
            .saturating_add(self.discharges)
            .saturating_add(self.visits)
    }

    pub fn has_events(&self) -> bool {
        self.total() > 0
    }
}

impl CalendarMonth {
    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Days with at least one event, in calendar order.
    pub fn active_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days.iter().filter(|d| d.has_events())
    }
}
