//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for local payload validation. Read shapes and write shapes are separate
//! types; write shapes never carry server-assigned fields.

pub mod calendar;
pub mod contact;
pub mod incident;
pub mod news;
pub mod pagination;
pub mod past_events;
pub mod reservoir;
pub mod snow_cover;
pub mod user;

pub use calendar::{CalendarDay, CalendarMonth, CalendarQuery};
pub use contact::{Contact, Contacts, NewContact, UpdateContact};
pub use incident::{Incident, NewIncident};
pub use news::NewsItem;
pub use pagination::{PageLinks, PageMeta, Paginated};
pub use past_events::{EventType, EventsByDate, EventsByType, PastEvent};
pub use reservoir::{DeviceUpdate, DeviceUpdateBatch, ReservoirDevice, ReservoirSummary};
pub use snow_cover::{BasinCover, SnowCoverDay, SnowCoverReport};
pub use user::{Avatar, NewUser, UpdateUser, User, UserRole, Users};
