//! Application layer: one service per dashboard resource plus the overview
//! aggregate.
//!
//! Services validate input locally, build the query for their endpoint and
//! delegate transport to [`crate::infrastructure::http::ApiClient`].
//!
//! # Available Services
//!
//! - [`services::CalendarService`] - Monthly event counters
//! - [`services::ContactService`] - Contact directory CRUD
//! - [`services::IncidentService`] - Incident list and reporting
//! - [`services::NewsService`] - Paginated news feed
//! - [`services::PastEventsService`] - Past events by day or category
//! - [`services::ReservoirService`] - Reservoir metrics and device counters
//! - [`services::SnowCoverService`] - Snow cover report
//! - [`services::UserService`] - Dashboard users with avatar upload

pub mod dashboard;
pub mod services;

pub use dashboard::{Dashboard, Refresh};
