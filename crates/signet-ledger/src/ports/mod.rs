//! Ports layer: trait definitions at the storage seam.

pub mod outbound;
