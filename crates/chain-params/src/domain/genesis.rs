//! Genesis Block Creation
//!
//! The genesis block is the foundation of the chain with special properties:
//!
//! - Parent hash: 32 zero bytes
//! - Exactly one coinbase-style transaction whose input embeds an arbitrary
//!   message (a headline proving the chain was not pre-mined before that date)
//! - The single output is set empty, so it can never be spent
//! - Merkle root: the id of that one transaction
//!
//! Construction is a pure function of [`GenesisInputs`]: identical inputs
//! always give a byte-identical block.

use super::entities::{Amount, Block, BlockHeader, Hash256, Transaction, TxIn, TxOut};
use super::script::{Script, OP_0};

/// Literal inputs for a genesis block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisInputs {
    /// Message embedded in the coinbase input.
    pub message: &'static str,
    /// Integer pushed between `OP_0` and the message.
    pub script_marker: i64,
    /// Nominal output value before the output is set empty.
    pub output_value: Amount,
    /// Timestamp stored in the transaction.
    pub tx_time: u32,
    pub tx_version: i32,
    pub block_version: i32,
    /// Header timestamp.
    pub time: u32,
    /// Compact difficulty target.
    pub bits: u32,
    pub nonce: u32,
}

impl GenesisInputs {
    /// Same transaction, different header fields. Test networks reuse the
    /// production coinbase and only re-stamp the header.
    pub fn with_header(&self, time: u32, bits: u32, nonce: u32) -> Self {
        Self {
            time,
            bits,
            nonce,
            ..self.clone()
        }
    }
}

/// Build the coinbase transaction of a genesis block.
pub fn genesis_transaction(inputs: &GenesisInputs) -> Transaction {
    let script_sig = Script::new()
        .push_opcode(OP_0)
        .push_num(inputs.script_marker)
        .push_slice(inputs.message.as_bytes());

    let mut output = TxOut::new(inputs.output_value, Script::new());
    output.set_empty();

    Transaction {
        version: inputs.tx_version,
        time: inputs.tx_time,
        inputs: vec![TxIn::coinbase(script_sig)],
        outputs: vec![output],
        lock_time: 0,
    }
}

/// Build a genesis block from literal inputs.
pub fn build_genesis_block(inputs: &GenesisInputs) -> Block {
    let coinbase = genesis_transaction(inputs);
    let merkle_root = coinbase.txid();

    let header = BlockHeader {
        version: inputs.block_version,
        prev_block_hash: Hash256::ZERO, // No parent for genesis
        merkle_root,
        time: inputs.time,
        bits: inputs.bits,
        nonce: inputs.nonce,
    };

    Block {
        header,
        transactions: vec![coinbase],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::encoding::Encodable;
    use crate::domain::entities::COIN;
    use proptest::prelude::*;

    fn sample_inputs() -> GenesisInputs {
        GenesisInputs {
            message: "A Guide to Authentication Methods (Infographic) | Brian Wallace | September 30, 2020",
            script_marker: 42,
            output_value: COIN,
            tx_time: 1_604_318_400,
            tx_version: 1,
            block_version: 1,
            time: 1_604_318_400,
            bits: 0x1f03_ffff,
            nonce: 14_719,
        }
    }

    #[test]
    fn test_genesis_has_no_parent() {
        let block = build_genesis_block(&sample_inputs());
        assert!(block.header.prev_block_hash.is_zero());
        assert_eq!(block.transactions.len(), 1);
    }

    #[test]
    fn test_coinbase_embeds_message() {
        let inputs = sample_inputs();
        let tx = genesis_transaction(&inputs);
        assert!(tx.is_coinbase());

        let script = tx.inputs[0].script_sig.as_bytes();
        // OP_0, push [42], OP_PUSHDATA1 84, message
        assert_eq!(&script[..5], &[0x00, 0x01, 0x2a, 0x4c, 84]);
        assert!(script.ends_with(inputs.message.as_bytes()));
    }

    #[test]
    fn test_coinbase_output_is_unspendable() {
        let tx = genesis_transaction(&sample_inputs());
        assert_eq!(tx.outputs.len(), 1);
        assert!(tx.outputs[0].is_empty());
    }

    #[test]
    fn test_merkle_root_matches_published_value() {
        let block = build_genesis_block(&sample_inputs());
        assert_eq!(
            block.header.merkle_root.to_string(),
            "d1923ffe4f273520a3e597d9d7f337e77374af05a6e1244d8fbe24197670a4db"
        );
        assert_eq!(block.compute_merkle_root(), block.header.merkle_root);
    }

    #[test]
    fn test_with_header_keeps_transaction() {
        let main = sample_inputs();
        let test = main.with_header(1_604_318_430, 0x1f0f_ffff, 3_743);

        let a = build_genesis_block(&main);
        let b = build_genesis_block(&test);
        assert_eq!(a.header.merkle_root, b.header.merkle_root);
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn test_genesis_deterministic() {
        let first = build_genesis_block(&sample_inputs());
        let second = build_genesis_block(&sample_inputs());
        assert_eq!(first.to_bytes(), second.to_bytes());
        assert_eq!(first.hash(), second.hash());
    }

    proptest! {
        #[test]
        fn builder_is_pure(time in any::<u32>(), bits in any::<u32>(), nonce in any::<u32>()) {
            let inputs = sample_inputs().with_header(time, bits, nonce);
            let a = build_genesis_block(&inputs);
            let b = build_genesis_block(&inputs);
            prop_assert_eq!(a.to_bytes(), b.to_bytes());
            prop_assert_eq!(a.header.nonce, nonce);
        }
    }
}
