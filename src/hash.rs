//! The 32-bit structural hash layer.
//!
//! Every admissible key reduces to a single `i32` through [`Hash32`]. All
//! arithmetic wraps modulo 2^32; overflow is part of the definition, not a
//! defect. Hashes are deterministic within one process lifetime.
//!
//! Numbers of every width go through one rule: the value is widened to an
//! IEEE-754 double and its bit pattern is mixed. An `i64` key and the
//! `f64` key with the same numeric value therefore hash identically.

use std::sync::atomic::{AtomicI32, Ordering};

/// Hash of `false`.
pub const FALSE_HASH: i32 = 0x4210_8420;

/// Hash of `true`.
pub const TRUE_HASH: i32 = 0x4210_8421;

/// Hash of [`Value::Null`](crate::Value::Null).
pub const NULL_HASH: i32 = 0x4210_8422;

/// Hash of [`Value::Undefined`](crate::Value::Undefined).
pub const UNDEFINED_HASH: i32 = 0x4210_8423;

/// Multiplier for the double-bit-pattern rule.
const NUMBER_MULTIPLIER: i32 = 0x045d_9f3b;

/// Additive constant of the [`mix`] combiner.
#[allow(clippy::cast_possible_wrap)]
const GOLDEN_RATIO: i32 = 0x9e37_79b9_u32 as i32;

/// A total 32-bit structural hash.
///
/// Implementations must be deterministic within a process lifetime and
/// consistent with `Eq`: equal values hash equally. Collisions are
/// acceptable; the trie resolves them with collision nodes.
pub trait Hash32 {
    /// Returns the 32-bit hash of `self`.
    fn hash32(&self) -> i32;
}

/// Hashes a number by reinterpreting its IEEE-754 double bit pattern as
/// two 32-bit halves and mixing them.
///
/// `to_bits` gives a fixed-byte-order reinterpretation, so the result is
/// identical across platforms.
#[must_use]
pub fn hash_number(x: f64) -> i32 {
    let bits = x.to_bits();
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let high = (bits >> 32) as i32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let low = bits as i32;
    NUMBER_MULTIPLIER.wrapping_mul((high >> 16) ^ high) ^ low
}

/// Hashes a string with the standard 31-multiplier fold over codepoints.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn hash_str(s: &str) -> i32 {
    s.chars()
        .fold(0_i32, |h, c| h.wrapping_mul(31).wrapping_add(c as i32))
}

/// Non-commutative combiner for sub-hashes.
#[must_use]
pub fn mix(a: i32, b: i32) -> i32 {
    a ^ b
        .wrapping_add(GOLDEN_RATIO)
        .wrapping_add(a.wrapping_shl(6))
        .wrapping_add(a >> 2)
}

/// Sequential uid source for opaque references.
static NEXT_REFERENCE_UID: AtomicI32 = AtomicI32::new(0);

/// Allocates the next reference uid, wrapping to 0 past `0x7fffffff`.
pub(crate) fn next_reference_uid() -> i32 {
    NEXT_REFERENCE_UID
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |uid| {
            Some(if uid == i32::MAX { 0 } else { uid + 1 })
        })
        .unwrap_or_else(|previous| previous)
}

impl Hash32 for bool {
    fn hash32(&self) -> i32 {
        if *self { TRUE_HASH } else { FALSE_HASH }
    }
}

impl Hash32 for f64 {
    fn hash32(&self) -> i32 {
        hash_number(*self)
    }
}

impl Hash32 for f32 {
    fn hash32(&self) -> i32 {
        hash_number(f64::from(*self))
    }
}

macro_rules! impl_hash32_for_integers {
    ($($int:ty),* $(,)?) => {$(
        impl Hash32 for $int {
            #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
            fn hash32(&self) -> i32 {
                hash_number(*self as f64)
            }
        }
    )*};
}

impl_hash32_for_integers!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Hash32 for str {
    fn hash32(&self) -> i32 {
        hash_str(self)
    }
}

impl Hash32 for String {
    fn hash32(&self) -> i32 {
        hash_str(self)
    }
}

impl<T: Hash32 + ?Sized> Hash32 for &T {
    fn hash32(&self) -> i32 {
        (**self).hash32()
    }
}
