//! Difficulty targets
//!
//! A target is a CEILING: a block hash (read as a 256-bit integer) must be
//! at or below it. HIGHER target = EASIER. Network limits are written as the
//! all-ones pattern shifted right, so `limit_from_shift(1)` is the easiest
//! usable target and larger shifts are harder.
//!
//! Headers carry targets in the compact "bits" form: one exponent byte
//! (length in bytes) followed by a 3-byte mantissa.

use primitive_types::U256;

/// Sign bit of the compact mantissa. Targets are never negative, so the
/// encoder avoids it by bumping the exponent.
const COMPACT_SIGN_BIT: u32 = 0x0080_0000;

/// `~0 >> shift`: the easiest target allowed by a network limit.
pub fn limit_from_shift(shift: u32) -> U256 {
    U256::MAX >> shift as usize
}

/// Encode a target in compact form.
pub fn to_compact(target: U256) -> u32 {
    let mut size = (target.bits() + 7) / 8;
    let mut compact = if size <= 3 {
        (target.low_u64() << (8 * (3 - size))) as u32
    } else {
        (target >> (8 * (size - 3))).low_u64() as u32
    };

    if compact & COMPACT_SIGN_BIT != 0 {
        compact >>= 8;
        size += 1;
    }

    compact | ((size as u32) << 24)
}

/// Decode a compact target. Negative or overflowing encodings yield `None`.
pub fn from_compact(bits: u32) -> Option<U256> {
    let size = (bits >> 24) as usize;
    let word = bits & 0x007F_FFFF;

    if word != 0 && bits & COMPACT_SIGN_BIT != 0 {
        return None;
    }

    if size <= 3 {
        return Some(U256::from(word >> (8 * (3 - size))));
    }

    let shift = 8 * (size - 3);
    let word = U256::from(word);
    if shift >= 256 || (word.bits() + shift) > 256 {
        return None;
    }
    Some(word << shift)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_network_limits_compact() {
        assert_eq!(to_compact(limit_from_shift(14)), 0x1f03_ffff);
        assert_eq!(to_compact(limit_from_shift(12)), 0x1f0f_ffff);
        assert_eq!(to_compact(limit_from_shift(1)), 0x207f_ffff);
        // Bitcoin's main limit, ~0 >> 32
        assert_eq!(to_compact(limit_from_shift(32)), 0x1d00_ffff);
    }

    #[test]
    fn test_larger_shift_is_harder() {
        assert!(limit_from_shift(16) < limit_from_shift(14));
        assert!(limit_from_shift(14) < limit_from_shift(1));
    }

    #[test]
    fn test_from_compact_known_values() {
        assert_eq!(
            from_compact(0x1d00_ffff),
            Some(U256::from(0xffffu64) << 208)
        );
        assert_eq!(from_compact(0x0300_0001), Some(U256::from(1u64)));
        assert_eq!(from_compact(0x0100_3456), Some(U256::zero()));
    }

    #[test]
    fn test_from_compact_rejects_negative_and_overflow() {
        assert_eq!(from_compact(0x0480_0001), None);
        assert_eq!(from_compact(0xff12_3456), None);
    }

    proptest! {
        #[test]
        fn compact_decoding_never_exceeds_original(shift in 0u32..250) {
            let limit = limit_from_shift(shift);
            let decoded = from_compact(to_compact(limit)).unwrap();
            // Compact form truncates low bits only.
            prop_assert!(decoded <= limit);
            prop_assert_eq!(decoded.bits(), limit.bits());
        }
    }
}
