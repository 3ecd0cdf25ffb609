//! Domain layer: configuration and error mapping.

pub mod config;
pub mod error;
