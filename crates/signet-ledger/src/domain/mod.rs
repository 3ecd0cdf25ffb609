//! Domain layer: entities, errors, and configuration.

pub mod config;
pub mod entities;
pub mod errors;
