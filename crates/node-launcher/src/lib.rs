//! # Node Launcher Library
//!
//! Startup wiring for chain parameters. Exposed as a library so the startup
//! path can be tested without spawning the binary.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, file, environment, flags)
//! 2. Initialize logging
//! 3. Build and validate the network catalog
//! 4. Select the active network from the startup flags
//! 5. Hand the [`chain_params::ActiveChainParams`] handle to the node

pub mod config;
pub mod logging;
pub mod startup;

pub use config::{ConfigError, LoggingConfig, NetworkSection, NodeConfig};
pub use startup::{bootstrap, bootstrap_with_catalog, startup_flags, LaunchError};
