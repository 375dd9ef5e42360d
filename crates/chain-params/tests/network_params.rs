//! # Network Parameter Tests
//!
//! End-to-end checks over the public API: every bundle's genesis matches its
//! pinned hash, networks cannot be confused for one another, and startup
//! selection resolves the flags the way the launcher expects.

use std::collections::HashSet;
use std::thread;

use chain_params::domain::encoding::Encodable;
use chain_params::domain::{build_genesis_block, COIN};
use chain_params::{
    AddressKind, CatalogBuilder, Hash256, Network, NetworkCatalog, NetworkSelector, SeedSpec,
    SelectionError, StartupFlags, MAX_BLOCK_HEIGHT,
};
use primitive_types::U256;

fn hash(s: &str) -> Hash256 {
    s.parse().expect("fixture hash")
}

#[test]
fn test_genesis_hash_fixtures() {
    let catalog = NetworkCatalog::build().expect("catalog builds");

    let fixtures = [
        (
            Network::Production,
            "41452fb82c6853c03e7d706c6652887651803a0992acb2c1e28d74f0e3e65017",
        ),
        (
            Network::PublicTest,
            "941f5a4351fe96a710ee70ac96ef0b4f9d3056e15fe473ac8050154aec4b798c",
        ),
        (
            Network::RegressionTest,
            "14e23add2e11e42443624fde41f0ce999af5bee86a1236cec6d161b0db409544",
        ),
    ];

    for (network, expected) in fixtures {
        let params = catalog.get(network);
        assert_eq!(params.genesis_hash(), hash(expected), "{network}");
        assert_eq!(params.genesis_block().hash(), hash(expected), "{network}");
        assert!(params.validate().is_ok());
    }
}

#[test]
fn test_genesis_block_fields() {
    let catalog = NetworkCatalog::build().unwrap();
    let main = catalog.get(Network::Production).genesis_block();

    assert_eq!(main.header.version, 1);
    assert!(main.header.prev_block_hash.is_zero());
    assert_eq!(main.header.time, 1_604_318_400);
    assert_eq!(main.header.nonce, 14_719);
    assert_eq!(
        main.header.merkle_root,
        hash("d1923ffe4f273520a3e597d9d7f337e77374af05a6e1244d8fbe24197670a4db")
    );

    let coinbase = &main.transactions[0];
    assert!(coinbase.is_coinbase());
    assert_eq!(coinbase.time, 1_604_318_400);
    assert!(coinbase.outputs[0].is_empty());

    let regtest = catalog.get(Network::RegressionTest).genesis_block();
    assert_eq!(regtest.header.time, 1_604_318_490);
    assert_eq!(regtest.header.nonce, 8);
    // Test networks keep the production coinbase
    assert_eq!(regtest.transactions, main.transactions);
}

#[test]
fn test_builder_deterministic_across_calls() {
    let catalog = NetworkCatalog::build().unwrap();
    let inputs = catalog.get(Network::PublicTest).genesis_inputs().clone();
    assert_eq!(inputs.output_value, COIN);

    let a = build_genesis_block(&inputs);
    let b = build_genesis_block(&inputs);
    assert_eq!(a.to_bytes(), b.to_bytes());
    assert_eq!(a.hash(), catalog.get(Network::PublicTest).genesis_hash());
}

#[test]
fn test_magic_pairwise_distinct() {
    let catalog = NetworkCatalog::build().unwrap();
    let magics: HashSet<[u8; 4]> = catalog.iter().map(|p| *p.message_start()).collect();
    assert_eq!(magics.len(), 3);

    for params in catalog.iter() {
        for other in catalog.iter() {
            assert_eq!(
                params.accepts_magic(other.message_start()),
                params.network() == other.network()
            );
        }
    }
}

#[test]
fn test_startup_flag_matrix() {
    let cases = [
        (false, false, Network::Production),
        (true, false, Network::PublicTest),
        (false, true, Network::RegressionTest),
    ];

    for (testnet, regtest, expected) in cases {
        let mut selector = NetworkSelector::new(NetworkCatalog::build().unwrap());
        let selected = selector
            .select_from_startup_flags(StartupFlags::new(testnet, regtest))
            .unwrap();
        assert_eq!(selected, expected);
        assert_eq!(selector.active_params().network(), expected);
    }
}

#[test]
fn test_conflicting_flags_do_not_select() {
    let mut selector = NetworkSelector::new(NetworkCatalog::build().unwrap());
    selector.select_network(Network::RegressionTest);
    let before = selector.active_params().genesis_hash();

    let err = selector
        .select_from_startup_flags(StartupFlags::new(true, true))
        .unwrap_err();

    assert_eq!(err, SelectionError::ConflictingNetworkFlags);
    assert!(!err.is_fatal());
    assert_eq!(selector.active_network(), Network::RegressionTest);
    assert_eq!(selector.active_params().genesis_hash(), before);
}

#[test]
fn test_seed_lists() {
    let catalog = CatalogBuilder::new()
        .main_fixed_seeds(vec![SeedSpec::ipv4([198, 51, 100, 4], 20021)])
        .now(1_700_000_000)
        .build()
        .unwrap();

    assert_eq!(catalog.get(Network::Production).fixed_seeds().len(), 1);
    assert!(catalog.get(Network::PublicTest).fixed_seeds().is_empty());

    let regtest = catalog.get(Network::RegressionTest);
    assert!(regtest.fixed_seeds().is_empty());
    assert!(regtest.dns_seeds().is_empty());
}

#[test]
fn test_address_prefixes_differ_between_main_and_test() {
    let catalog = NetworkCatalog::build().unwrap();
    let main = catalog.get(Network::Production);
    let test = catalog.get(Network::PublicTest);

    for kind in AddressKind::ALL {
        let mut payload = main.address_prefix(kind).to_vec();
        payload.extend_from_slice(&[0u8; 20]);

        assert_ne!(main.address_prefix(kind), test.address_prefix(kind), "{kind:?}");
        assert_eq!(main.address_kind_for(&payload), Some(kind));
        // A production payload never decodes as the same kind on test
        assert_ne!(test.address_kind_for(&payload), Some(kind), "{kind:?}");
    }
}

#[test]
fn test_pow_to_pos_boundary() {
    let catalog = NetworkCatalog::build().unwrap();
    let main = catalog.get(Network::Production);
    let regtest = catalog.get(Network::RegressionTest);

    assert_eq!(main.pow_to_pos_height(), 105);
    assert!(main.is_pow_height(104));
    assert!(main.is_pos_eligible(105));
    assert_eq!(main.pos_start_height(), 1);

    assert_eq!(regtest.pow_to_pos_height(), MAX_BLOCK_HEIGHT);
    assert!(regtest.is_pow_height(MAX_BLOCK_HEIGHT - 1));
}

#[test]
fn test_difficulty_limits() {
    let catalog = NetworkCatalog::build().unwrap();
    let main = catalog.get(Network::Production);
    let test = catalog.get(Network::PublicTest);
    let regtest = catalog.get(Network::RegressionTest);

    assert_eq!(main.pow_limit(), U256::MAX >> 14);
    assert_eq!(main.pos_limit(), U256::MAX >> 16);
    assert_eq!(test.pow_limit(), U256::MAX >> 12);
    assert_eq!(test.pos_limit(), U256::MAX >> 14);
    assert_eq!(regtest.pow_limit(), U256::MAX >> 1);
    assert_eq!(regtest.pos_limit(), test.pos_limit());
}

#[test]
fn test_handle_read_concurrently() {
    let mut selector = NetworkSelector::new(NetworkCatalog::build().unwrap());
    selector.select_network(Network::PublicTest);
    let params = selector.into_active();
    let expected = params.genesis_hash();

    let readers: Vec<_> = (0..8)
        .map(|_| {
            let params = params.clone();
            thread::spawn(move || (params.network(), params.genesis_hash()))
        })
        .collect();

    for reader in readers {
        let (network, genesis) = reader.join().unwrap();
        assert_eq!(network, Network::PublicTest);
        assert_eq!(genesis, expected);
    }
}

#[test]
fn test_summary_serializes() {
    let catalog = NetworkCatalog::build().unwrap();
    let summary = catalog.get(Network::Production).summary();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["network"], "main");
    assert_eq!(json["message_start"], "a121433a");
    assert_eq!(json["default_port"], 20021);
    assert_eq!(json["genesis_bits"], "0x1f03ffff");
    assert_eq!(
        json["genesis_hash"],
        "41452fb82c6853c03e7d706c6652887651803a0992acb2c1e28d74f0e3e65017"
    );
    assert_eq!(json["address_prefixes"]["pubkey_address"], "17");
}
