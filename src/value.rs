//! The dynamic key universe.
//!
//! [`Value`] closes the set of key shapes the hash layer understands:
//! sentinels, booleans, numbers, big integers, strings, byte buffers,
//! sequences, sets, mappings, records, dates, and opaque references.
//! Composite values share their payload through reference counting, so
//! cloning a `Value` is cheap.
//!
//! Equality is structural except for [`Value::Opaque`], which compares by
//! reference identity. Floats compare by bit pattern so that equality
//! stays consistent with the bit-pattern hash (`NaN` equals itself,
//! `0.0` and `-0.0` are distinct keys).

use std::fmt;

use crate::ReferenceCounter;
use crate::hash::{self, Hash32, NULL_HASH, UNDEFINED_HASH};

#[cfg(feature = "arc")]
type DynOpaque = dyn OpaqueKey + Send + Sync;

#[cfg(not(feature = "arc"))]
type DynOpaque = dyn OpaqueKey;

/// Hook for opaque keys that carry their own hash.
///
/// The default implementation returns `None`, which makes the wrapped
/// reference hash by identity; returning `Some(code)` overrides that.
pub trait OpaqueKey: fmt::Debug {
    /// Returns a caller-chosen 32-bit hash, or `None` to fall back to
    /// reference identity.
    fn hash_code(&self) -> Option<i32> {
        None
    }
}

/// An opaque reference wrapped for use as a map key.
///
/// Each handle is assigned a sequential uid at construction; the uid wraps
/// to 0 past `0x7fffffff`. Clones share the allocation and the uid, so a
/// reference always hashes the same way. Two handles are equal only when
/// they wrap the same allocation.
#[derive(Clone)]
pub struct OpaqueHandle {
    uid: i32,
    inner: ReferenceCounter<DynOpaque>,
}

impl OpaqueHandle {
    fn new(inner: ReferenceCounter<DynOpaque>) -> Self {
        Self {
            uid: hash::next_reference_uid(),
            inner,
        }
    }

    /// The sequential uid assigned to this reference.
    #[must_use]
    pub const fn uid(&self) -> i32 {
        self.uid
    }
}

impl PartialEq for OpaqueHandle {
    fn eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for OpaqueHandle {}

impl fmt::Debug for OpaqueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueHandle")
            .field("uid", &self.uid)
            .field("inner", &self.inner)
            .finish()
    }
}

/// A dynamically shaped key.
///
/// # Examples
///
/// ```rust
/// use hamt_map::{HamtMap, Value};
///
/// let map = HamtMap::new()
///     .insert(Value::Int(1), "one")
///     .insert(Value::string("two"), "two");
///
/// assert_eq!(map.get(&Value::Int(1)), Some(&"one"));
/// assert_eq!(map.get(&Value::string("two")), Some(&"two"));
/// ```
#[derive(Clone, Debug)]
pub enum Value {
    /// The null sentinel.
    Null,
    /// The undefined sentinel.
    Undefined,
    /// A boolean.
    Bool(bool),
    /// A 64-bit integer; hashed through the double rule, so `Int(2)` and
    /// `Float(2.0)` collide (they remain distinct keys).
    Int(i64),
    /// A double; hashed by its bit-pattern halves.
    Float(f64),
    /// An arbitrary-precision integer in decimal string form; hashed by
    /// the string rule over its digits.
    BigInt(ReferenceCounter<str>),
    /// A string.
    Str(ReferenceCounter<str>),
    /// A byte buffer; each byte hashes as a number.
    Bytes(ReferenceCounter<[u8]>),
    /// An ordered sequence of values.
    Seq(ReferenceCounter<[Value]>),
    /// An unordered collection; hashing ignores element order.
    Set(ReferenceCounter<[Value]>),
    /// Key/value pairs; hashing ignores pair order.
    Map(ReferenceCounter<[(Value, Value)]>),
    /// Named fields in declaration order.
    Record(ReferenceCounter<[(ReferenceCounter<str>, Value)]>),
    /// A date as epoch milliseconds; hashed as a number.
    Date(i64),
    /// An opaque reference; hashed by identity unless its
    /// [`OpaqueKey::hash_code`] says otherwise.
    Opaque(OpaqueHandle),
}

impl Value {
    /// Wraps a string.
    #[must_use]
    pub fn string(s: &str) -> Self {
        Self::Str(ReferenceCounter::from(s))
    }

    /// Wraps a decimal big-integer literal (an optional sign followed by
    /// digits).
    #[must_use]
    pub fn big_int(digits: &str) -> Self {
        Self::BigInt(ReferenceCounter::from(digits))
    }

    /// Wraps a byte buffer.
    #[must_use]
    pub fn bytes(bytes: &[u8]) -> Self {
        Self::Bytes(ReferenceCounter::from(bytes))
    }

    /// Wraps an ordered sequence.
    #[must_use]
    pub fn seq(items: Vec<Self>) -> Self {
        Self::Seq(ReferenceCounter::from(items))
    }

    /// Wraps an unordered collection.
    #[must_use]
    pub fn set(items: Vec<Self>) -> Self {
        Self::Set(ReferenceCounter::from(items))
    }

    /// Wraps key/value pairs.
    #[must_use]
    pub fn map(pairs: Vec<(Self, Self)>) -> Self {
        Self::Map(ReferenceCounter::from(pairs))
    }

    /// Wraps named fields, keeping the given declaration order.
    #[must_use]
    pub fn record(fields: Vec<(&str, Self)>) -> Self {
        let fields: Vec<(ReferenceCounter<str>, Self)> = fields
            .into_iter()
            .map(|(name, value)| (ReferenceCounter::from(name), value))
            .collect();
        Self::Record(ReferenceCounter::from(fields))
    }

    /// Wraps an opaque reference, assigning it the next reference uid.
    #[cfg(not(feature = "arc"))]
    pub fn opaque<T: OpaqueKey + 'static>(inner: T) -> Self {
        let inner: ReferenceCounter<DynOpaque> = ReferenceCounter::new(inner);
        Self::Opaque(OpaqueHandle::new(inner))
    }

    /// Wraps an opaque reference, assigning it the next reference uid.
    #[cfg(feature = "arc")]
    pub fn opaque<T: OpaqueKey + Send + Sync + 'static>(inner: T) -> Self {
        let inner: ReferenceCounter<DynOpaque> = ReferenceCounter::new(inner);
        Self::Opaque(OpaqueHandle::new(inner))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) | (Self::Undefined, Self::Undefined) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) | (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::BigInt(a), Self::BigInt(b)) | (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Seq(a), Self::Seq(b)) | (Self::Set(a), Self::Set(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Opaque(a), Self::Opaque(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash32 for Value {
    #[allow(clippy::cast_precision_loss)]
    fn hash32(&self) -> i32 {
        match self {
            Self::Null => NULL_HASH,
            Self::Undefined => UNDEFINED_HASH,
            Self::Bool(b) => b.hash32(),
            Self::Int(n) => hash::hash_number(*n as f64),
            Self::Float(x) => hash::hash_number(*x),
            Self::BigInt(digits) => hash::hash_str(digits),
            Self::Str(s) => hash::hash_str(s),
            Self::Bytes(bytes) => bytes.iter().fold(0_i32, |h, byte| {
                h.wrapping_mul(31).wrapping_add(hash::hash_number(f64::from(*byte)))
            }),
            Self::Seq(items) => items
                .iter()
                .fold(0_i32, |h, item| h.wrapping_mul(31).wrapping_add(item.hash32())),
            Self::Set(items) => items.iter().fold(0_i32, |h, item| h.wrapping_add(item.hash32())),
            Self::Map(pairs) => pairs.iter().fold(0_i32, |h, (key, value)| {
                h.wrapping_add(hash::mix(value.hash32(), key.hash32()))
            }),
            Self::Record(fields) => fields.iter().fold(0_i32, |h, (name, value)| {
                h.wrapping_add(hash::mix(value.hash32(), hash::hash_str(name)))
            }),
            Self::Date(ms) => hash::hash_number(*ms as f64),
            Self::Opaque(handle) => handle.inner.hash_code().unwrap_or(handle.uid),
        }
    }
}
