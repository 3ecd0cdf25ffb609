//! # Signet Node
//!
//! The server binary: loads configuration from the environment, opens the
//! message store, wires the ledger behind the HTTP gateway and serves until
//! interrupted.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging
//! 2. Load configuration (environment overrides over defaults)
//! 3. Open the message store (file-backed by default)
//! 4. Construct the ledger service with the administrator identity
//! 5. Serve HTTP, shut down gracefully on Ctrl+C

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use signet_crypto::Address;
use signet_gateway::{GatewayConfig, GatewayService};
use signet_ledger::{
    FileMessageStore, InMemoryMessageStore, LedgerConfig, LedgerService, MessageStore,
};

/// Which storage adapter backs the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreKind {
    File,
    Memory,
}

/// Node configuration assembled from defaults and environment overrides.
#[derive(Debug)]
struct NodeConfig {
    gateway: GatewayConfig,
    ledger: LedgerConfig,
    store: StoreKind,
    data_dir: PathBuf,
}

impl NodeConfig {
    fn messages_path(&self) -> PathBuf {
        self.data_dir.join("messages.json")
    }
}

/// Load configuration from the environment.
///
/// Recognized variables:
/// - `SIGNET_HTTP_PORT` - listen port (default 3001)
/// - `SIGNET_ADMIN_ADDRESS` - administrator wallet address (hex)
/// - `SIGNET_CHALLENGE_PHRASE` - plaintext the administrator must sign
/// - `SIGNET_STORE` - `file` (default) or `memory`
/// - `SIGNET_DATA_DIR` - directory for the file store (default `./data`)
fn load_config() -> NodeConfig {
    let mut gateway = GatewayConfig::default();
    let mut ledger = LedgerConfig::default();
    let mut store = StoreKind::File;
    let mut data_dir = PathBuf::from("data");

    if let Ok(port) = std::env::var("SIGNET_HTTP_PORT") {
        match port.parse() {
            Ok(p) => gateway.http.port = p,
            Err(_) => warn!(value = %port, "SIGNET_HTTP_PORT is not a valid port, ignoring"),
        }
    }

    if let Ok(raw) = std::env::var("SIGNET_ADMIN_ADDRESS") {
        match Address::from_str(&raw) {
            Ok(addr) => {
                ledger.admin_address = addr;
                info!(admin = %ledger.admin_address, "administrator address from environment");
            }
            Err(_) => warn!("SIGNET_ADMIN_ADDRESS is not a valid address, keeping default"),
        }
    }

    if let Ok(phrase) = std::env::var("SIGNET_CHALLENGE_PHRASE") {
        if phrase.is_empty() {
            warn!("SIGNET_CHALLENGE_PHRASE is empty, keeping default");
        } else {
            ledger.challenge_phrase = phrase;
        }
    }

    if let Ok(kind) = std::env::var("SIGNET_STORE") {
        match kind.as_str() {
            "file" => store = StoreKind::File,
            "memory" => store = StoreKind::Memory,
            other => warn!(value = %other, "unknown SIGNET_STORE, keeping file store"),
        }
    }

    if let Ok(dir) = std::env::var("SIGNET_DATA_DIR") {
        data_dir = PathBuf::from(dir);
    }

    NodeConfig {
        gateway,
        ledger,
        store,
        data_dir,
    }
}

/// Open the configured message store.
fn open_store(config: &NodeConfig) -> Result<Arc<dyn MessageStore>> {
    match config.store {
        StoreKind::Memory => {
            info!("using in-memory message store (contents lost on restart)");
            Ok(Arc::new(InMemoryMessageStore::new()))
        }
        StoreKind::File => {
            std::fs::create_dir_all(&config.data_dir).with_context(|| {
                format!("failed to create data directory {:?}", config.data_dir)
            })?;
            let path = config.messages_path();
            let store = FileMessageStore::open(&path)
                .with_context(|| format!("failed to open message store at {path:?}"))?;
            info!(path = %path.display(), records = store.len(), "message store opened");
            Ok(Arc::new(store))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config();

    info!("===========================================");
    info!("  Signet Node v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");
    info!(admin = %config.ledger.admin_address, "administrator identity");
    info!(addr = %config.gateway.http_addr(), "listen address");

    let store = open_store(&config)?;
    let ledger = Arc::new(
        LedgerService::new(config.ledger.clone(), store).context("invalid ledger config")?,
    );
    let gateway = Arc::new(
        GatewayService::new(config.gateway.clone(), ledger).context("invalid gateway config")?,
    );

    let signal_gateway = Arc::clone(&gateway);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, shutting down");
            signal_gateway.shutdown();
        }
    });

    gateway.start().await.context("gateway failed")?;

    info!("node stopped");
    Ok(())
}
