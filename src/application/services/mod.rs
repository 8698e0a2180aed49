//! One thin service per dashboard resource.

pub mod calendar_service;
pub mod contact_service;
pub mod incident_service;
pub mod news_service;
pub mod past_events_service;
pub mod reservoir_service;
pub mod snow_cover_service;
pub mod user_service;

pub use calendar_service::CalendarService;
pub use contact_service::ContactService;
pub use incident_service::IncidentService;
pub use news_service::NewsService;
pub use past_events_service::PastEventsService;
pub use reservoir_service::ReservoirService;
pub use snow_cover_service::SnowCoverService;
pub use user_service::UserService;
