//! # Parameter Bundle
//!
//! Every constant one network agrees on bit-for-bit: message start, ports,
//! difficulty limits, address prefixes, seeds, the genesis block and its
//! pinned hash, and the PoW -> PoS boundary.
//!
//! Bundles are only produced by the catalog and are read-only afterwards.
//! Fields are crate-private so a bundle cannot drift from the genesis block
//! it was validated against.

pub mod catalog;
pub mod network;
pub mod seeds;

use std::collections::BTreeMap;

use primitive_types::U256;
use serde::Serialize;

use crate::domain::{build_genesis_block, Block, BlockHeight, GenesisInputs, Hash256};
use crate::error::{ChainParamsError, Result};

pub use catalog::{CatalogBuilder, NetworkCatalog};
pub use network::Network;
pub use seeds::{convert_seeds, DnsSeed, SeedAddress, SeedSpec, ONE_WEEK_SECS};

/// Handshake prefix of every peer-to-peer message.
pub type MessageStart = [u8; 4];

/// Kinds of base58-encoded payloads, each with its own prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    StealthAddress,
    ExtPublicKey,
    ExtSecretKey,
}

impl AddressKind {
    pub const ALL: [AddressKind; 6] = [
        AddressKind::PubkeyAddress,
        AddressKind::ScriptAddress,
        AddressKind::SecretKey,
        AddressKind::StealthAddress,
        AddressKind::ExtPublicKey,
        AddressKind::ExtSecretKey,
    ];
}

/// Prefix bytes per address kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base58Prefixes {
    pub pubkey_address: Vec<u8>,
    pub script_address: Vec<u8>,
    pub secret_key: Vec<u8>,
    pub stealth_address: Vec<u8>,
    pub ext_public_key: Vec<u8>,
    pub ext_secret_key: Vec<u8>,
}

impl Base58Prefixes {
    pub fn get(&self, kind: AddressKind) -> &[u8] {
        match kind {
            AddressKind::PubkeyAddress => &self.pubkey_address,
            AddressKind::ScriptAddress => &self.script_address,
            AddressKind::SecretKey => &self.secret_key,
            AddressKind::StealthAddress => &self.stealth_address,
            AddressKind::ExtPublicKey => &self.ext_public_key,
            AddressKind::ExtSecretKey => &self.ext_secret_key,
        }
    }

    /// Kind whose prefix starts `payload`; the longest match wins.
    pub fn kind_for(&self, payload: &[u8]) -> Option<AddressKind> {
        AddressKind::ALL
            .into_iter()
            .filter(|kind| {
                let prefix = self.get(*kind);
                !prefix.is_empty() && payload.starts_with(prefix)
            })
            .max_by_key(|kind| self.get(*kind).len())
    }
}

/// Per-network constant bundle.
#[derive(Debug, Clone)]
pub struct ChainParams {
    pub(crate) network: Network,
    pub(crate) message_start: MessageStart,
    pub(crate) alert_pubkey: Vec<u8>,
    pub(crate) default_port: u16,
    pub(crate) rpc_port: u16,
    pub(crate) pow_limit: U256,
    pub(crate) pos_limit: U256,
    pub(crate) prefixes: Base58Prefixes,
    pub(crate) dns_seeds: Vec<DnsSeed>,
    pub(crate) fixed_seeds: Vec<SeedAddress>,
    pub(crate) genesis_inputs: GenesisInputs,
    pub(crate) genesis: Block,
    pub(crate) genesis_hash: Hash256,
    pub(crate) expected_genesis_hash: Hash256,
    pub(crate) expected_merkle_root: Hash256,
    pub(crate) pow_to_pos_height: BlockHeight,
    pub(crate) pos_start_height: BlockHeight,
    pub(crate) data_dir: &'static str,
    pub(crate) require_rpc_password: bool,
    pub(crate) pool_max_transactions: u32,
    pub(crate) pool_dummy_address: &'static str,
    pub(crate) dev_ops_address: &'static str,
}

impl ChainParams {
    /// Rebuild the genesis block from new inputs and record its hash.
    ///
    /// Pinned constants are replaced at the same time so a derived network
    /// can never keep its parent's expectations by accident.
    pub(crate) fn set_genesis(
        &mut self,
        inputs: GenesisInputs,
        expected_hash: Hash256,
        expected_merkle_root: Hash256,
    ) {
        self.genesis = build_genesis_block(&inputs);
        self.genesis_hash = self.genesis.hash();
        self.genesis_inputs = inputs;
        self.expected_genesis_hash = expected_hash;
        self.expected_merkle_root = expected_merkle_root;
    }

    /// Recompute the genesis block from its content and compare against the
    /// pinned constants.
    pub fn validate(&self) -> Result<()> {
        let merkle_root = self.genesis.compute_merkle_root();
        if merkle_root != self.genesis.header.merkle_root
            || merkle_root != self.expected_merkle_root
        {
            return Err(ChainParamsError::MerkleRootMismatch {
                network: self.network,
                expected: self.expected_merkle_root,
                computed: merkle_root,
            });
        }

        let computed = self.genesis.hash();
        if computed != self.genesis_hash || computed != self.expected_genesis_hash {
            return Err(ChainParamsError::GenesisHashMismatch {
                network: self.network,
                expected: self.expected_genesis_hash,
                computed,
            });
        }

        Ok(())
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn message_start(&self) -> &MessageStart {
        &self.message_start
    }

    /// Whether a received message prefix belongs to this network.
    pub fn accepts_magic(&self, magic: &[u8; 4]) -> bool {
        &self.message_start == magic
    }

    pub fn alert_pubkey(&self) -> &[u8] {
        &self.alert_pubkey
    }

    pub fn default_port(&self) -> u16 {
        self.default_port
    }

    pub fn rpc_port(&self) -> u16 {
        self.rpc_port
    }

    /// Easiest allowed proof-of-work target.
    pub fn pow_limit(&self) -> U256 {
        self.pow_limit
    }

    /// Easiest allowed proof-of-stake target.
    pub fn pos_limit(&self) -> U256 {
        self.pos_limit
    }

    pub fn base58_prefixes(&self) -> &Base58Prefixes {
        &self.prefixes
    }

    pub fn address_prefix(&self, kind: AddressKind) -> &[u8] {
        self.prefixes.get(kind)
    }

    /// Kind of a decoded base58 payload, or `None` when no prefix of this
    /// network matches and the payload must be rejected.
    pub fn address_kind_for(&self, payload: &[u8]) -> Option<AddressKind> {
        self.prefixes.kind_for(payload)
    }

    pub fn dns_seeds(&self) -> &[DnsSeed] {
        &self.dns_seeds
    }

    pub fn fixed_seeds(&self) -> &[SeedAddress] {
        &self.fixed_seeds
    }

    pub fn genesis_block(&self) -> &Block {
        &self.genesis
    }

    pub fn genesis_inputs(&self) -> &GenesisInputs {
        &self.genesis_inputs
    }

    pub fn genesis_hash(&self) -> Hash256 {
        self.genesis_hash
    }

    pub fn genesis_merkle_root(&self) -> Hash256 {
        self.genesis.header.merkle_root
    }

    /// First height at which blocks are PoS-eligible.
    pub fn pow_to_pos_height(&self) -> BlockHeight {
        self.pow_to_pos_height
    }

    pub fn pos_start_height(&self) -> BlockHeight {
        self.pos_start_height
    }

    /// Heights below the boundary are PoW-only.
    pub fn is_pow_height(&self, height: BlockHeight) -> bool {
        height < self.pow_to_pos_height
    }

    pub fn is_pos_eligible(&self, height: BlockHeight) -> bool {
        !self.is_pow_height(height)
    }

    /// Data directory suffix; empty for production.
    pub fn data_dir(&self) -> &'static str {
        self.data_dir
    }

    /// Consumed by the RPC server.
    pub fn require_rpc_password(&self) -> bool {
        self.require_rpc_password
    }

    pub fn pool_max_transactions(&self) -> u32 {
        self.pool_max_transactions
    }

    pub fn pool_dummy_address(&self) -> &'static str {
        self.pool_dummy_address
    }

    pub fn dev_ops_address(&self) -> &'static str {
        self.dev_ops_address
    }

    /// Display form for operators.
    pub fn summary(&self) -> ChainParamsSummary {
        ChainParamsSummary {
            network: self.network,
            message_start: hex::encode(self.message_start),
            default_port: self.default_port,
            rpc_port: self.rpc_port,
            pow_limit: self.pow_limit,
            pos_limit: self.pos_limit,
            genesis_hash: self.genesis_hash,
            genesis_merkle_root: self.genesis_merkle_root(),
            genesis_time: self.genesis.header.time,
            genesis_bits: format!("{:#010x}", self.genesis.header.bits),
            genesis_nonce: self.genesis.header.nonce,
            pow_to_pos_height: self.pow_to_pos_height,
            pos_start_height: self.pos_start_height,
            address_prefixes: AddressKind::ALL
                .into_iter()
                .map(|kind| (kind, hex::encode(self.prefixes.get(kind))))
                .collect(),
            fixed_seeds: self.fixed_seeds.len(),
            dns_seeds: self.dns_seeds.iter().map(|s| s.host.clone()).collect(),
            data_dir: self.data_dir,
            require_rpc_password: self.require_rpc_password,
        }
    }
}

/// Serializable view of a bundle.
#[derive(Debug, Clone, Serialize)]
pub struct ChainParamsSummary {
    pub network: Network,
    pub message_start: String,
    pub default_port: u16,
    pub rpc_port: u16,
    pub pow_limit: U256,
    pub pos_limit: U256,
    pub genesis_hash: Hash256,
    pub genesis_merkle_root: Hash256,
    pub genesis_time: u32,
    pub genesis_bits: String,
    pub genesis_nonce: u32,
    pub pow_to_pos_height: BlockHeight,
    pub pos_start_height: BlockHeight,
    pub address_prefixes: BTreeMap<AddressKind, String>,
    pub fixed_seeds: usize,
    pub dns_seeds: Vec<String>,
    pub data_dir: &'static str,
    pub require_rpc_password: bool,
}
