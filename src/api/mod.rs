//! Wire types for the dashboard REST API.

pub mod dto;
