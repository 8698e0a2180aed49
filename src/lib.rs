//! # Hydro Dashboard
//!
//! Typed client for the executive dashboard of a hydropower operator: incidents,
//! reservoir metrics, snow cover, calendar counters, past events, news,
//! contacts and users.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Resource capabilities, query encoding,
//!   date-range validation, call handles, session and view state
//! - **Application Layer** ([`application`]) - One service per resource and
//!   the overview aggregate
//! - **Infrastructure Layer** ([`infrastructure`]) - reqwest transport and
//!   token storage
//! - **API Layer** ([`api`]) - Wire DTOs
//!
//! ## Quick Start
//!
//! ```bash
//! export DASHBOARD_API_URL="https://dashboard.example.org/api/"
//!
//! cargo run -- login
//! cargo run -- incidents --date 2024-03-05
//! ```
//!
//! ## Configuration
//!
//! Client configuration is loaded from environment variables via
//! [`config::Config`].

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod telemetry;

pub use error::{ApiError, ApiResult};

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::Dashboard;
    pub use crate::application::services::{
        CalendarService, ContactService, IncidentService, NewsService, PastEventsService,
        ReservoirService, SnowCoverService, UserService,
    };
    pub use crate::domain::{Call, CrudApi, QueryParams, Session, ViewState};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::infrastructure::http::{ApiClient, ResourceClient};
    pub use crate::infrastructure::session::{FileTokenStore, MemoryTokenStore};
}
