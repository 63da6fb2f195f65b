//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod cache_stats;
pub mod health;
pub mod passenger;
pub mod user;
