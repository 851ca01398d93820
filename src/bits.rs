//! Bit-level helpers for the 32-way trie.
//!
//! A 32-bit key hash is consumed five bits at a time; each 5-bit fragment
//! selects one of 32 child positions at its trie level.

/// Bits consumed per trie level (2^5 = 32-way branching).
pub(crate) const BITS_PER_LEVEL: u32 = 5;

/// Mask isolating a single 5-bit fragment.
const FRAGMENT_MASK: u32 = 0b1_1111;

/// Extracts the 5-bit fragment of `hash` at bit offset `shift`.
///
/// The shift is logical: the hash is reinterpreted as unsigned first.
#[inline]
#[must_use]
pub(crate) const fn fragment(shift: u32, hash: i32) -> u32 {
    (hash as u32 >> shift) & FRAGMENT_MASK
}

/// Returns a bitmap with exactly bit `frag` set.
#[inline]
#[must_use]
pub(crate) const fn mask(frag: u32) -> u32 {
    1 << frag
}

/// Population count via the folded-shift SWAR method.
///
/// Multiply-free, so it costs the same on targets without a native
/// popcount instruction.
#[inline]
#[must_use]
pub(crate) const fn popcount(x: u32) -> u32 {
    let x = x - ((x >> 1) & 0x5555_5555);
    let x = (x & 0x3333_3333) + ((x >> 2) & 0x3333_3333);
    let x = (x + (x >> 4)) & 0x0f0f_0f0f;
    let x = x + (x >> 8);
    let x = x + (x >> 16);
    x & 0x3f
}

/// Compact index of the child for `bit` within a packed child sequence:
/// the number of occupied positions below `bit` in `bitmap`.
#[inline]
#[must_use]
pub(crate) const fn compact_index(bitmap: u32, bit: u32) -> usize {
    popcount(bitmap & (bit - 1)) as usize
}

#[cfg(test)]
mod tests {
    use super::{compact_index, fragment, mask, popcount};
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(0x8000_0000)]
    #[case(0xFFFF_FFFF)]
    #[case(0x5555_5555)]
    #[case(0xAAAA_AAAA)]
    #[case(0x0F0F_0F0F)]
    #[case(0xDEAD_BEEF)]
    fn popcount_agrees_with_count_ones(#[case] word: u32) {
        assert_eq!(popcount(word), word.count_ones());
    }

    #[rstest]
    fn fragment_is_a_logical_shift() {
        // The sign bit must not smear into lower fragments.
        assert_eq!(fragment(27, -1), 0b1_1111);
        assert_eq!(fragment(30, i32::MIN), 0b10);
        assert_eq!(fragment(0, 0b10_1010), 0b0_1010);
    }

    #[rstest]
    fn compact_index_counts_occupied_positions_below() {
        let bitmap = mask(1) | mask(4) | mask(9);
        assert_eq!(compact_index(bitmap, mask(1)), 0);
        assert_eq!(compact_index(bitmap, mask(4)), 1);
        assert_eq!(compact_index(bitmap, mask(9)), 2);
        assert_eq!(compact_index(bitmap, mask(31)), 3);
    }
}
