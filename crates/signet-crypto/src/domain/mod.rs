//! Domain layer: entities, errors, and the recovery algorithm.

pub mod ecdsa;
pub mod entities;
pub mod errors;
