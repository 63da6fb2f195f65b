//! Domain layer: entities and repository contracts.

pub mod entities;
pub mod repositories;
