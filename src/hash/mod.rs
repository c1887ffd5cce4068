//! Hash policies that parameterize a filter.
//!
//! A [`HashDescriptor`] is a compile-time policy: it names the element type, the type (and
//! so the width) of the hash value, the number of bits in the target filter, and a pure
//! function from element to hash. It carries no runtime state and is never instantiated;
//! it only appears as the type parameter of [`HashBits`](crate::HashBits).
//!
//! The hash width and the filter width are independent knobs. A 64-bit hash feeding a
//! 1000-bit filter is fine: the position is `hash % BITS`, computed in the hash's own width.
//!
//! # Module Organization
//!
//! ```text
//! hash/
//! ├── mod.rs       - HashValue, HashDescriptor, hash_descriptor!
//! ├── std_hash.rs  - Descriptor over std's DefaultHasher
//! └── xxhash.rs    - Descriptor over XXH3 (feature `xxhash`)
//! ```
//!
//! # Examples
//!
//! Implementing the trait by hand:
//!
//! ```
//! use hashbits::hash::HashDescriptor;
//! use hashbits::HashBits;
//!
//! /// Port numbers, hashed by identity into a 1024-bit filter.
//! struct Ports;
//!
//! impl HashDescriptor for Ports {
//!     type Item = u16;
//!     type Hash = u16;
//!     const BITS: usize = 1024;
//!
//!     fn hash(port: &u16) -> u16 {
//!         *port
//!     }
//! }
//!
//! let mut open = HashBits::<Ports>::new();
//! open.insert_value(&443);
//! assert!(open.contains(&443));
//! assert!(!open.contains(&444));
//! ```

pub mod std_hash;

#[cfg(feature = "xxhash")]
#[cfg_attr(docsrs, doc(cfg(feature = "xxhash")))]
pub mod xxhash;

pub use std_hash::StdHashDescriptor;

#[cfg(feature = "xxhash")]
pub use xxhash::Xxh3Descriptor;

use std::fmt;

/// Unsigned integer types usable as a hash output.
///
/// Sealed: the reduction below relies on the primitive integer semantics of the
/// implementing types.
pub trait HashValue: Copy + Eq + fmt::Debug + sealed::Sealed {
    /// Bit width of the hash value itself (not of the filter).
    const WIDTH: u32;

    /// Reduce the hash into `[0, modulus)`.
    ///
    /// The modulo is taken in the wider of the hash type and `u64`, so no high hash bits
    /// are dropped before reduction.
    ///
    /// `modulus` must be non-zero.
    fn reduce(self, modulus: usize) -> usize;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! impl_hash_value {
    ($($ty:ty => $wide:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl HashValue for $ty {
                const WIDTH: u32 = <$ty>::BITS;

                #[inline]
                fn reduce(self, modulus: usize) -> usize {
                    // the remainder is < modulus, so it always fits back into usize
                    (<$wide>::from(self) % modulus as $wide) as usize
                }
            }
        )*
    };
}

impl_hash_value! {
    u8 => u64,
    u16 => u64,
    u32 => u64,
    u64 => u64,
    u128 => u128,
}

impl sealed::Sealed for usize {}

impl HashValue for usize {
    const WIDTH: u32 = usize::BITS;

    #[inline]
    fn reduce(self, modulus: usize) -> usize {
        self % modulus
    }
}

/// Compile-time hash policy for a [`HashBits`](crate::HashBits) filter.
///
/// # Requirements
///
/// - `hash` must be total and deterministic: the same value always yields the same hash
///   for the lifetime of every filter built with this descriptor.
/// - `hash` should spread outputs as uniformly as practical. Skew only raises the false
///   positive rate, it never causes a false negative.
/// - `BITS` must be positive. A zero width is rejected when `HashBits<Self>` is
///   instantiated, so it fails the build rather than a running program.
///
/// Choosing `BITS` is a memory versus false-positive trade-off left to the implementer.
pub trait HashDescriptor {
    /// Type of the elements being hashed.
    type Item: ?Sized;

    /// Type of the hash output; its width is `<Self::Hash as HashValue>::WIDTH`.
    type Hash: HashValue;

    /// Number of bits in the filter (not in the hash).
    const BITS: usize;

    /// Map an element to its hash value.
    fn hash(value: &Self::Item) -> Self::Hash;
}

/// Declare a unit struct implementing [`HashDescriptor`].
///
/// ```
/// use hashbits::{hash_descriptor, HashBits};
///
/// hash_descriptor! {
///     /// Identity hash into eight bits.
///     pub Mod8: u32 => u32, bits = 8, |value| *value
/// }
///
/// let mut filter = HashBits::<Mod8>::new();
/// filter.insert_value(&13);
/// assert_eq!(HashBits::<Mod8>::bit_for(&13).index(), 5);
/// assert!(filter.contains(&5));
/// ```
#[macro_export]
macro_rules! hash_descriptor {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident : $item:ty => $hash:ty, bits = $bits:expr, |$value:ident| $body:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        $vis struct $name;

        impl $crate::hash::HashDescriptor for $name {
            type Item = $item;
            type Hash = $hash;
            const BITS: usize = $bits;

            #[inline]
            fn hash($value: &Self::Item) -> Self::Hash {
                $body
            }
        }
    };
}
