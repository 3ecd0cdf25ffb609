//! Adapters layer: concrete storage backends.

pub mod storage;
