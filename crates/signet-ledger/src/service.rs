//! Ledger service: wires the signature verifier to the storage port and
//! enforces the access policy.
//!
//! Control flow for every operation: resolve the identity claim first, touch
//! the store only on success. No operation mutates state without a prior
//! successful verification.

use crate::domain::config::{ConfigError, LedgerConfig};
use crate::domain::entities::SignedMessage;
use crate::domain::errors::LedgerError;
use crate::ports::outbound::MessageStore;
use signet_crypto::{recover_signer, Address, EcdsaSignature};
use std::sync::Arc;
use tracing::{info, warn};

/// The message ledger with its authorization policy.
pub struct LedgerService {
    config: LedgerConfig,
    store: Arc<dyn MessageStore>,
}

impl LedgerService {
    /// Create a ledger service over a storage backend.
    pub fn new(config: LedgerConfig, store: Arc<dyn MessageStore>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, store })
    }

    /// The configured administrator address.
    pub fn admin_address(&self) -> Address {
        self.config.admin_address
    }

    /// The challenge phrase the administrator must sign.
    pub fn challenge_phrase(&self) -> &str {
        &self.config.challenge_phrase
    }

    /// Accept a public submission.
    ///
    /// The message is stored only if the signature over `text` recovers to
    /// the claimed address; otherwise nothing is appended.
    pub async fn submit(
        &self,
        address: &str,
        text: &str,
        signature: &str,
    ) -> Result<SignedMessage, LedgerError> {
        if address.is_empty() {
            return Err(LedgerError::Validation("address"));
        }
        if text.is_empty() {
            return Err(LedgerError::Validation("text"));
        }
        if signature.is_empty() {
            return Err(LedgerError::Validation("signature"));
        }

        let claimed: Address = address.parse().map_err(|_| {
            warn!("submission rejected: unparseable address");
            LedgerError::Authentication
        })?;

        let recovered = parse_and_recover(text, signature)?;
        if recovered != claimed {
            warn!(claimed = %claimed, "submission rejected: signer mismatch");
            return Err(LedgerError::Authentication);
        }

        let record = self
            .store
            .append(claimed, text.to_string(), signature.to_string())
            .await?;
        info!(address = %record.address, id = record.id, "message accepted");
        Ok(record)
    }

    /// Prove that the caller controls the administrator address.
    ///
    /// The identity gate runs before any cryptographic work: a requester
    /// that is not the admin address is rejected without a recovery attempt.
    /// The challenge has no nonce or expiry, so a captured admin signature
    /// replays indefinitely (accepted weakness).
    pub async fn authorize_admin(
        &self,
        address: &str,
        signature: &str,
    ) -> Result<(), LedgerError> {
        if address.is_empty() {
            return Err(LedgerError::Validation("address"));
        }
        if signature.is_empty() {
            return Err(LedgerError::Validation("signature"));
        }

        let requester: Result<Address, _> = address.parse();
        match requester {
            Ok(addr) if addr == self.config.admin_address => {}
            _ => {
                warn!("admin access denied: requester is not the administrator");
                return Err(LedgerError::Authorization);
            }
        }

        let recovered = parse_and_recover(&self.config.challenge_phrase, signature)?;
        if recovered != self.config.admin_address {
            warn!("admin access denied: challenge signature does not recover to admin");
            return Err(LedgerError::Authentication);
        }

        info!(admin = %self.config.admin_address, "admin access granted");
        Ok(())
    }

    /// Every stored message, newest first. Administrator only.
    pub async fn list_all(
        &self,
        address: &str,
        signature: &str,
    ) -> Result<Vec<SignedMessage>, LedgerError> {
        self.authorize_admin(address, signature).await?;
        Ok(self.store.list_descending().await?)
    }

    /// The full record set for export, newest first. Administrator only.
    ///
    /// Same authorization path and record set as [`list_all`]; the export
    /// presentation (raw dump with internal fields) is the caller's concern.
    ///
    /// [`list_all`]: LedgerService::list_all
    pub async fn export_all(
        &self,
        address: &str,
        signature: &str,
    ) -> Result<Vec<SignedMessage>, LedgerError> {
        self.authorize_admin(address, signature).await?;
        Ok(self.store.list_descending().await?)
    }
}

/// Parse the wire signature and recover the signer over `message`.
/// All parse and recovery failures collapse into `Authentication`.
fn parse_and_recover(message: &str, signature: &str) -> Result<Address, LedgerError> {
    let sig = EcdsaSignature::from_hex(signature).map_err(|_| LedgerError::Authentication)?;
    recover_signer(message, &sig).map_err(|_| LedgerError::Authentication)
}
