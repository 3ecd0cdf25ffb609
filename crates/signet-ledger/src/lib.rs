//! # Message Ledger
//!
//! Append-only, timestamp-ordered log of wallet-signed messages, with every
//! operation gated by signature verification:
//!
//! - `submit` — anyone may append, provided the signature over the message
//!   text recovers to the claimed address
//! - `list_all` / `export_all` — only the configured administrator address,
//!   after proving key possession by signing a fixed challenge phrase
//!
//! ## Architecture
//!
//! Hexagonal layout:
//! - **Domain** (`domain/`): entities, errors, configuration
//! - **Ports** (`ports/`): the [`MessageStore`] storage port
//! - **Adapters** (`adapters/`): in-memory and file-backed stores
//! - **Service** (`service.rs`): authorization policy wiring verifier to store

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::storage::{FileMessageStore, InMemoryMessageStore};
pub use domain::config::{ConfigError, LedgerConfig};
pub use domain::entities::SignedMessage;
pub use domain::errors::{LedgerError, StoreError};
pub use ports::outbound::MessageStore;
pub use service::LedgerService;
