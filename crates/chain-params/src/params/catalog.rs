//! # Network Catalog
//!
//! Builds the three bundles in specialization order:
//!
//! ```text
//! Production ──copy + overrides──→ PublicTest ──copy + overrides──→ RegressionTest
//! ```
//!
//! Each step clones the previous, finished bundle, overrides a subset of
//! fields and, because the genesis header changes, rebuilds and re-validates
//! its own genesis block. After [`CatalogBuilder::build`] returns the three
//! bundles are independent read-only values.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use tracing::{debug, error, info};

use super::seeds::{convert_seeds, SeedAddress, SeedSpec};
use super::{Base58Prefixes, ChainParams, MessageStart, Network};
use crate::domain::target::{limit_from_shift, to_compact};
use crate::domain::{build_genesis_block, GenesisInputs, Hash256, COIN, MAX_BLOCK_HEIGHT};
use crate::error::{ChainParamsError, Result};

// =============================================================================
// Production
// =============================================================================

/// Unlikely to occur in normal data: rarely used upper ASCII, not valid
/// UTF-8, and a large 4-byte integer at any alignment.
const MAIN_MESSAGE_START: MessageStart = [0xa1, 0x21, 0x43, 0x3a];
const MAIN_ALERT_PUBKEY: &str = "01b84535a489f996be6b659c91a56897ebeb5d456698712acdbef7894452f81f85d131aadfef3be6145678454852a2d08c6314bba5ca3cbe5616262da3b1a6afed";
const MAIN_DEFAULT_PORT: u16 = 20021;
const MAIN_RPC_PORT: u16 = 19697;

const GENESIS_MESSAGE: &str =
    "A Guide to Authentication Methods (Infographic) | Brian Wallace | September 30, 2020";
/// Shared by all networks: the test networks only re-stamp the header.
const GENESIS_MERKLE_ROOT: &str =
    "d1923ffe4f273520a3e597d9d7f337e77374af05a6e1244d8fbe24197670a4db";

const MAIN_GENESIS_TIME: u32 = 1_604_318_400;
const MAIN_GENESIS_NONCE: u32 = 14_719;
// Published as 0003e85be786632f7f46155e4c71c9825e928deed2fb8cf52e960fe4ebf1eff5
// under the legacy header hash; pinned here as SHA-256d of the 80-byte header.
const MAIN_GENESIS_HASH: &str =
    "41452fb82c6853c03e7d706c6652887651803a0992acb2c1e28d74f0e3e65017";

const MAIN_POW_TO_POS_HEIGHT: u32 = 105;
const POS_START_HEIGHT: u32 = 1;
const POOL_MAX_TRANSACTIONS: u32 = 9;
const POOL_DUMMY_ADDRESS: &str = "CcABDmWkcSZPw8rMtoobShVFuudhf1svZu";
const DEV_OPS_ADDRESS: &str = "Ce1XyENjUHHPBt8mxy2LupkH2PnequevMM";

/// Compiled-in production seeds. Empty until the seed list is generated for
/// a launch; peers then bootstrap from `-addnode`/`-connect` instead.
pub const MAIN_FIXED_SEEDS: &[SeedSpec] = &[];

// =============================================================================
// PublicTest
// =============================================================================

const TEST_MESSAGE_START: MessageStart = [0x2a, 0x5b, 0x12, 0x99];
const TEST_ALERT_PUBKEY: &str = "00f88456af9f1996be6b456321a94fbfebeb5d517648afbacdbef4d2f7c2f81f85d131a669df3be6113afd454852a2d08c6314bba5ca3cbe5616262da3b1a6afed";
const TEST_DEFAULT_PORT: u16 = 19837;
const TEST_RPC_PORT: u16 = 19981;
const TEST_GENESIS_TIME: u32 = 1_604_318_430;
const TEST_GENESIS_NONCE: u32 = 3_743;
// Published as 00033bdde3316e554fb7c9d045a280e7fcf986796eea4bc847afe5d7cf849781
const TEST_GENESIS_HASH: &str =
    "941f5a4351fe96a710ee70ac96ef0b4f9d3056e15fe473ac8050154aec4b798c";

// =============================================================================
// RegressionTest
// =============================================================================

const REGTEST_MESSAGE_START: MessageStart = [0x13, 0x1d, 0xf1, 0xd3];
const REGTEST_DEFAULT_PORT: u16 = 19629;
const REGTEST_GENESIS_TIME: u32 = 1_604_318_490;
const REGTEST_GENESIS_NONCE: u32 = 8;
// Published as 0c7953d95df4bc1a66dacca4ecfc41679007d713af952d5ab8189a978e42ed26
const REGTEST_GENESIS_HASH: &str =
    "14e23add2e11e42443624fde41f0ce999af5bee86a1236cec6d161b0db409544";

fn parse_hash(network: Network, name: &'static str, value: &str) -> Result<Hash256> {
    value
        .parse()
        .map_err(|e: crate::domain::ParseHashError| ChainParamsError::InvalidConstant {
            network,
            name,
            reason: e.to_string(),
        })
}

fn parse_hex(network: Network, name: &'static str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value).map_err(|e| ChainParamsError::InvalidConstant {
        network,
        name,
        reason: e.to_string(),
    })
}

fn finish(params: ChainParams) -> Result<ChainParams> {
    if let Err(e) = params.validate() {
        error!(network = %params.network, error = %e, "Chain parameter integrity check failed");
        return Err(e);
    }
    debug!(
        network = %params.network,
        genesis = %params.genesis_hash,
        merkle_root = %params.genesis_merkle_root(),
        "Genesis block validated"
    );
    Ok(params)
}

/// Production bundle.
pub(crate) fn production(fixed_seeds: Vec<SeedAddress>) -> Result<ChainParams> {
    let network = Network::Production;
    let pow_limit = limit_from_shift(14);

    let genesis_inputs = GenesisInputs {
        message: GENESIS_MESSAGE,
        script_marker: 42,
        output_value: COIN,
        tx_time: MAIN_GENESIS_TIME,
        tx_version: 1,
        block_version: 1,
        time: MAIN_GENESIS_TIME,
        bits: to_compact(pow_limit),
        nonce: MAIN_GENESIS_NONCE,
    };
    let genesis = build_genesis_block(&genesis_inputs);
    let genesis_hash = genesis.hash();

    let params = ChainParams {
        network,
        message_start: MAIN_MESSAGE_START,
        alert_pubkey: parse_hex(network, "alert_pubkey", MAIN_ALERT_PUBKEY)?,
        default_port: MAIN_DEFAULT_PORT,
        rpc_port: MAIN_RPC_PORT,
        pow_limit,
        pos_limit: limit_from_shift(16),
        prefixes: Base58Prefixes {
            pubkey_address: vec![23],
            script_address: vec![53],
            secret_key: vec![22],
            stealth_address: vec![24],
            ext_public_key: vec![0x04, 0x88, 0xB2, 0x1E],
            ext_secret_key: vec![0x04, 0x88, 0xAD, 0xE4],
        },
        dns_seeds: Vec::new(),
        fixed_seeds,
        genesis_inputs,
        genesis,
        genesis_hash,
        expected_genesis_hash: parse_hash(network, "genesis_hash", MAIN_GENESIS_HASH)?,
        expected_merkle_root: parse_hash(network, "genesis_merkle_root", GENESIS_MERKLE_ROOT)?,
        pow_to_pos_height: MAIN_POW_TO_POS_HEIGHT,
        pos_start_height: POS_START_HEIGHT,
        data_dir: "",
        require_rpc_password: true,
        pool_max_transactions: POOL_MAX_TRANSACTIONS,
        pool_dummy_address: POOL_DUMMY_ADDRESS,
        dev_ops_address: DEV_OPS_ADDRESS,
    };

    finish(params)
}

/// PublicTest bundle, derived from a finished production bundle.
pub(crate) fn public_test(main: &ChainParams) -> Result<ChainParams> {
    let network = Network::PublicTest;
    let mut params = main.clone();

    params.network = network;
    params.message_start = TEST_MESSAGE_START;
    params.pow_limit = limit_from_shift(12);
    params.pos_limit = limit_from_shift(14);
    params.alert_pubkey = parse_hex(network, "alert_pubkey", TEST_ALERT_PUBKEY)?;
    params.default_port = TEST_DEFAULT_PORT;
    params.rpc_port = TEST_RPC_PORT;
    params.data_dir = "testnet";

    // Later start: new header timestamp, same coinbase.
    let inputs = main.genesis_inputs.with_header(
        TEST_GENESIS_TIME,
        to_compact(params.pow_limit),
        TEST_GENESIS_NONCE,
    );
    params.set_genesis(
        inputs,
        parse_hash(network, "genesis_hash", TEST_GENESIS_HASH)?,
        parse_hash(network, "genesis_merkle_root", GENESIS_MERKLE_ROOT)?,
    );

    params.fixed_seeds.clear();
    params.dns_seeds.clear();

    params.prefixes = Base58Prefixes {
        pubkey_address: vec![65],
        script_address: vec![196],
        secret_key: vec![75],
        stealth_address: vec![76],
        ext_public_key: vec![0x04, 0x35, 0x87, 0xCF],
        ext_secret_key: vec![0x04, 0x35, 0x83, 0x94],
    };

    params.pow_to_pos_height = MAX_BLOCK_HEIGHT;

    finish(params)
}

/// RegressionTest bundle, derived from a finished public test bundle.
pub(crate) fn regression_test(test: &ChainParams) -> Result<ChainParams> {
    let network = Network::RegressionTest;
    let mut params = test.clone();

    params.network = network;
    params.message_start = REGTEST_MESSAGE_START;
    // Easiest possible target for instant local blocks.
    params.pow_limit = limit_from_shift(1);
    params.default_port = REGTEST_DEFAULT_PORT;
    params.data_dir = "regtest";

    let inputs = test.genesis_inputs.with_header(
        REGTEST_GENESIS_TIME,
        to_compact(params.pow_limit),
        REGTEST_GENESIS_NONCE,
    );
    params.set_genesis(
        inputs,
        parse_hash(network, "genesis_hash", REGTEST_GENESIS_HASH)?,
        parse_hash(network, "genesis_merkle_root", GENESIS_MERKLE_ROOT)?,
    );

    // No DNS seeds and no fixed seeds: regtest nodes are wired by hand.
    params.dns_seeds.clear();
    params.fixed_seeds.clear();
    params.require_rpc_password = false;
    params.pow_to_pos_height = MAX_BLOCK_HEIGHT;

    finish(params)
}

// =============================================================================
// Catalog
// =============================================================================

/// The three validated bundles, side by side.
#[derive(Debug, Clone)]
pub struct NetworkCatalog {
    bundles: [Arc<ChainParams>; 3],
}

impl NetworkCatalog {
    /// Build and validate with the compiled-in seed table and the system clock.
    pub fn build() -> Result<Self> {
        CatalogBuilder::default().build()
    }

    pub fn get(&self, network: Network) -> &ChainParams {
        &self.bundles[network.index()]
    }

    /// Shared handle to one bundle.
    pub fn shared(&self, network: Network) -> Arc<ChainParams> {
        Arc::clone(&self.bundles[network.index()])
    }

    /// Network whose message start equals `magic`.
    pub fn network_for_magic(&self, magic: &[u8; 4]) -> Option<Network> {
        self.iter()
            .find(|params| params.accepts_magic(magic))
            .map(ChainParams::network)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainParams> {
        self.bundles.iter().map(|b| b.as_ref())
    }

    fn check_distinct_magic(&self) -> Result<()> {
        for (i, first) in self.bundles.iter().enumerate() {
            for second in &self.bundles[i + 1..] {
                if first.message_start == second.message_start {
                    return Err(ChainParamsError::DuplicateMagic {
                        first: first.network,
                        second: second.network,
                        magic: hex::encode(first.message_start),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Catalog construction with an injectable seed table and clock.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    main_fixed_seeds: Vec<SeedSpec>,
    now: Option<u64>,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self {
            main_fixed_seeds: MAIN_FIXED_SEEDS.to_vec(),
            now: None,
        }
    }
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the production fixed-seed table.
    pub fn main_fixed_seeds(mut self, seeds: impl Into<Vec<SeedSpec>>) -> Self {
        self.main_fixed_seeds = seeds.into();
        self
    }

    /// Clock used for seed "last seen" times (Unix seconds).
    pub fn now(mut self, now: u64) -> Self {
        self.now = Some(now);
        self
    }

    pub fn build(self) -> Result<NetworkCatalog> {
        self.build_with_rng(&mut rand::thread_rng())
    }

    pub fn build_with_rng<R: Rng>(self, rng: &mut R) -> Result<NetworkCatalog> {
        let now = self.now.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

        let main = production(convert_seeds(&self.main_fixed_seeds, now, rng))?;
        let test = public_test(&main)?;
        let regtest = regression_test(&test)?;

        let catalog = NetworkCatalog {
            bundles: [Arc::new(main), Arc::new(test), Arc::new(regtest)],
        };
        catalog.check_distinct_magic()?;

        info!(
            networks = Network::ALL.len(),
            main_seeds = catalog.get(Network::Production).fixed_seeds.len(),
            "Network catalog built and validated"
        );
        Ok(catalog)
    }
}
