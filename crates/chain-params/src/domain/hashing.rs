//! Hashing utilities for genesis construction
//!
//! Transaction ids, Merkle nodes and block ids all use double SHA-256 over
//! the consensus serialization.

use sha2::{Digest, Sha256};

use super::entities::Hash256;

/// Compute SHA-256 hash of data
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Compute double SHA-256 hash (Bitcoin-style)
#[inline]
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Double SHA-256 of a serialized object, as a [`Hash256`].
#[inline]
pub fn hash256(data: &[u8]) -> Hash256 {
    Hash256::from_bytes(sha256d(data))
}

/// Merkle root over transaction ids.
///
/// Odd levels duplicate their last node. A single leaf is its own root and an
/// empty list yields the zero hash.
pub fn merkle_root(leaves: &[Hash256]) -> Hash256 {
    if leaves.is_empty() {
        return Hash256::ZERO;
    }

    let mut level: Vec<Hash256> = leaves.to_vec();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| {
                let left = pair[0];
                let right = pair.get(1).copied().unwrap_or(left);
                let mut buf = [0u8; 64];
                buf[..32].copy_from_slice(left.as_bytes());
                buf[32..].copy_from_slice(right.as_bytes());
                hash256(&buf)
            })
            .collect();
    }

    level[0]
}
