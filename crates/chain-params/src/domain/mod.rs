//! # Domain Layer
//!
//! Pure types and functions: block/transaction entities, their consensus
//! encoding and hashing, difficulty targets and the genesis builder.

pub mod encoding;
pub mod entities;
pub mod genesis;
pub mod hashing;
pub mod script;
pub mod target;

pub use entities::{
    Amount, Block, BlockHeader, BlockHeight, Hash256, OutPoint, ParseHashError, Transaction, TxIn,
    TxOut, COIN, MAX_BLOCK_HEIGHT,
};
pub use genesis::{build_genesis_block, genesis_transaction, GenesisInputs};
pub use script::Script;
