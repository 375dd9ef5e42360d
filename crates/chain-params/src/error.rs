//! Error types for chain parameters
//!
//! Two classes with different recovery semantics, kept as separate types:
//!
//! - [`ChainParamsError`]: the binary carries wrong constants. Startup must
//!   abort before any network or consensus activity.
//! - [`SelectionError`]: the operator asked for something inconsistent. The
//!   launcher reports it and exits nonzero; nothing was selected.

use thiserror::Error;

use crate::domain::Hash256;
use crate::params::Network;

/// Result type alias for bundle construction and validation
pub type Result<T> = std::result::Result<T, ChainParamsError>;

/// Integrity failures found while building or validating a bundle
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainParamsError {
    /// Freshly computed genesis hash differs from the pinned constant
    #[error("{network} genesis hash mismatch: expected {expected}, computed {computed}")]
    GenesisHashMismatch {
        network: Network,
        expected: Hash256,
        computed: Hash256,
    },

    /// Freshly computed genesis Merkle root differs from the pinned constant
    #[error("{network} genesis merkle root mismatch: expected {expected}, computed {computed}")]
    MerkleRootMismatch {
        network: Network,
        expected: Hash256,
        computed: Hash256,
    },

    /// Two networks share a handshake prefix
    #[error("{first} and {second} share message start {magic}")]
    DuplicateMagic {
        first: Network,
        second: Network,
        magic: String,
    },

    /// A literal constant failed to parse
    #[error("{network} constant {name} is invalid: {reason}")]
    InvalidConstant {
        network: Network,
        name: &'static str,
        reason: String,
    },
}

impl ChainParamsError {
    /// Integrity failures are never recoverable
    pub fn is_fatal(&self) -> bool {
        true
    }

    /// Network whose bundle failed
    pub fn network(&self) -> Network {
        match self {
            Self::GenesisHashMismatch { network, .. }
            | Self::MerkleRootMismatch { network, .. }
            | Self::InvalidConstant { network, .. } => *network,
            Self::DuplicateMagic { second, .. } => *second,
        }
    }
}

/// Configuration errors reported to the startup collaborator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Both the public test and regression test networks were requested
    #[error("invalid combination of -regtest and -testnet")]
    ConflictingNetworkFlags,

    /// A network name that is not one of main, test or regtest
    #[error("unknown network '{0}' (expected main, test or regtest)")]
    UnknownNetwork(String),
}

impl SelectionError {
    pub fn is_fatal(&self) -> bool {
        false
    }
}
