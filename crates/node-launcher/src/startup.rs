//! # Startup
//!
//! Single validation-and-selection step run before any other node logic.
//! Returns a structured result; only `main` turns failures into an exit
//! status.

use chain_params::{
    ActiveChainParams, ChainParamsError, Network, NetworkCatalog, NetworkSelector,
    SelectionError, StartupFlags,
};
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, NetworkSection};

/// Exit status for bad configuration (`EX_USAGE`).
pub const EXIT_CONFIG: u8 = 64;
/// Exit status for compiled-in constants failing validation (`EX_SOFTWARE`).
pub const EXIT_INTEGRITY: u8 = 70;

/// Startup failures, by recovery class.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The binary carries wrong constants.
    #[error("chain parameter integrity failure: {0}")]
    Integrity(#[from] ChainParamsError),

    /// The operator asked for an inconsistent network.
    #[error("network selection failed: {0}")]
    Selection(#[from] SelectionError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl LaunchError {
    /// Fatal failures mean the binary itself is wrong; the rest are operator
    /// errors.
    pub fn is_fatal(&self) -> bool {
        match self {
            LaunchError::Integrity(e) => e.is_fatal(),
            LaunchError::Selection(e) => e.is_fatal(),
            LaunchError::Config(_) => false,
        }
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_fatal() {
            EXIT_INTEGRITY
        } else {
            EXIT_CONFIG
        }
    }
}

/// Turn the network section into startup flags.
///
/// A network name is an alternative to the two flags, never a complement.
pub fn startup_flags(section: &NetworkSection) -> Result<StartupFlags, SelectionError> {
    match &section.name {
        Some(name) => {
            let network: Network = name.parse()?;
            if section.testnet || section.regtest {
                return Err(SelectionError::ConflictingNetworkFlags);
            }
            Ok(StartupFlags::from(network))
        }
        None => Ok(StartupFlags::new(section.testnet, section.regtest)),
    }
}

/// Build and validate the catalog, then select the network.
pub fn bootstrap(section: &NetworkSection) -> Result<ActiveChainParams, LaunchError> {
    let catalog = NetworkCatalog::build()?;
    bootstrap_with_catalog(catalog, section)
}

/// Select from an already validated catalog.
pub fn bootstrap_with_catalog(
    catalog: NetworkCatalog,
    section: &NetworkSection,
) -> Result<ActiveChainParams, LaunchError> {
    let flags = startup_flags(section)?;

    let mut selector = NetworkSelector::new(catalog);
    selector.select_from_startup_flags(flags)?;

    let params = selector.into_active();
    info!(
        network = %params.network(),
        port = params.default_port(),
        rpc_port = params.rpc_port(),
        magic = %hex::encode(params.message_start()),
        "Chain parameters ready"
    );
    Ok(params)
}
