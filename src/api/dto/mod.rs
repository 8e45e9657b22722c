//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization; request bodies
//! are checked with validator before reaching the services.

pub mod health;
pub mod short_link;
pub mod upload;
