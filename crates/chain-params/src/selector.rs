//! # Network Selection
//!
//! Chooses which catalog entry is active. Selection happens during
//! single-threaded startup; afterwards the chosen bundle is handed out as an
//! [`ActiveChainParams`] handle and read concurrently without locking.
//!
//! ## Startup Sequence
//!
//! 1. Build and validate the [`NetworkCatalog`] (abort on integrity failure)
//! 2. Resolve [`StartupFlags`] with [`NetworkSelector::select_from_startup_flags`]
//! 3. Call [`NetworkSelector::into_active`] and pass the handle to every consumer

use std::ops::Deref;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::SelectionError;
use crate::params::{ChainParams, Network, NetworkCatalog};

/// The two mutually exclusive network intents from the command line or
/// configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartupFlags {
    pub testnet: bool,
    pub regtest: bool,
}

impl StartupFlags {
    pub fn new(testnet: bool, regtest: bool) -> Self {
        Self { testnet, regtest }
    }

    /// Resolve to a single network. Both set is a configuration error.
    pub fn resolve(&self) -> Result<Network, SelectionError> {
        match (self.testnet, self.regtest) {
            (true, true) => Err(SelectionError::ConflictingNetworkFlags),
            (_, true) => Ok(Network::RegressionTest),
            (true, false) => Ok(Network::PublicTest),
            (false, false) => Ok(Network::Production),
        }
    }
}

impl From<Network> for StartupFlags {
    fn from(network: Network) -> Self {
        match network {
            Network::Production => Self::new(false, false),
            Network::PublicTest => Self::new(true, false),
            Network::RegressionTest => Self::new(false, true),
        }
    }
}

/// Read-only handle to the active bundle, cheap to clone across threads.
#[derive(Debug, Clone)]
pub struct ActiveChainParams(Arc<ChainParams>);

impl Deref for ActiveChainParams {
    type Target = ChainParams;

    fn deref(&self) -> &ChainParams {
        &self.0
    }
}

impl AsRef<ChainParams> for ActiveChainParams {
    fn as_ref(&self) -> &ChainParams {
        &self.0
    }
}

/// Holds the catalog and which entry is active. Production until told
/// otherwise.
#[derive(Debug, Clone)]
pub struct NetworkSelector {
    catalog: NetworkCatalog,
    active: Network,
}

impl NetworkSelector {
    pub fn new(catalog: NetworkCatalog) -> Self {
        Self {
            catalog,
            active: Network::Production,
        }
    }

    /// Make `network` the active bundle.
    pub fn select_network(&mut self, network: Network) -> &ChainParams {
        self.active = network;
        info!(
            network = %network,
            genesis = %self.catalog.get(network).genesis_hash(),
            "Selected chain parameters"
        );
        self.catalog.get(network)
    }

    /// Resolve startup flags and select. On conflict nothing changes.
    pub fn select_from_startup_flags(
        &mut self,
        flags: StartupFlags,
    ) -> Result<Network, SelectionError> {
        let network = flags.resolve().map_err(|e| {
            warn!(active = %self.active, "Conflicting network flags, selection unchanged");
            e
        })?;
        self.select_network(network);
        Ok(network)
    }

    pub fn active_network(&self) -> Network {
        self.active
    }

    pub fn active_params(&self) -> &ChainParams {
        self.catalog.get(self.active)
    }

    pub fn catalog(&self) -> &NetworkCatalog {
        &self.catalog
    }

    /// Handle to the currently active bundle.
    pub fn handle(&self) -> ActiveChainParams {
        ActiveChainParams(self.catalog.shared(self.active))
    }

    /// End the selection phase.
    pub fn into_active(self) -> ActiveChainParams {
        self.handle()
    }
}
