//! HTTP transport for the dashboard API.

mod client;
pub mod multipart;
mod resource_client;

pub use client::ApiClient;
pub use resource_client::ResourceClient;
