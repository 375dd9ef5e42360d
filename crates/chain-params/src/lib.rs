//! # Chain Parameters
//!
//! Network identity and consensus-boundary constants that every participant
//! must agree on bit-for-bit.
//!
//! ## Purpose
//!
//! Three networks (production, public test, local regression test) each get
//! one immutable bundle holding:
//! - the 4-byte message start that prefixes every peer-to-peer message
//! - default P2P and RPC ports
//! - PoW and PoS target limits
//! - base58 address prefixes per address kind
//! - bootstrap seeds
//! - the literal genesis block and its pinned hash
//! - the height at which PoW mining gives way to PoS
//!
//! ## Architecture
//!
//! ```text
//! Genesis builder → ChainParams → NetworkCatalog → NetworkSelector → ActiveChainParams
//!   (domain)         (params)       (catalog)        (selector)        (consumers)
//! ```
//!
//! ## Error Classes
//!
//! - [`ChainParamsError`]: wrong constants compiled in. Fatal at startup.
//! - [`SelectionError`]: inconsistent operator request. Reported, nonzero exit.
//!
//! Neither path terminates the process from inside this crate; the launcher
//! decides.
//!
//! ## Usage
//!
//! ```rust
//! use chain_params::{Network, NetworkCatalog, NetworkSelector, StartupFlags};
//!
//! let catalog = NetworkCatalog::build().expect("valid constants");
//! let mut selector = NetworkSelector::new(catalog);
//! selector.select_from_startup_flags(StartupFlags::new(false, true)).unwrap();
//!
//! let params = selector.into_active();
//! assert_eq!(params.network(), Network::RegressionTest);
//! assert!(!params.require_rpc_password());
//! ```

#![warn(clippy::all)]

pub mod domain;
pub mod error;
pub mod params;
pub mod selector;

pub use domain::{Block, BlockHeader, BlockHeight, GenesisInputs, Hash256, MAX_BLOCK_HEIGHT};
pub use error::{ChainParamsError, Result, SelectionError};
pub use params::{
    AddressKind, Base58Prefixes, CatalogBuilder, ChainParams, ChainParamsSummary, DnsSeed,
    MessageStart, Network, NetworkCatalog, SeedAddress, SeedSpec,
};
pub use selector::{ActiveChainParams, NetworkSelector, StartupFlags};
