//! hashbits: a fixed-width bit-set filter parameterized by a hash policy.
//!
//! `hashbits` provides [`HashBits<D>`], a Bloom-style probabilistic membership set in which
//! each element maps to one bit of a fixed-size bit vector. The filter answers "might
//! contain" queries with one-sided error:
//! - **False positives**: two elements can share a bit, so an absent element may test true
//! - **Zero false negatives**: if the filter says an element is absent, it is absent
//!
//! Its intended use is as a cheap pre-check in front of an expensive exact lookup, such as
//! a disk or network read that can be skipped when the filter proves absence.
//!
//! # Quick Start
//!
//! ```
//! use hashbits::hash::StdHashDescriptor;
//! use hashbits::HashBits;
//!
//! // 4096-bit filter over strings, hashed with std's DefaultHasher
//! let mut filter: HashBits<StdHashDescriptor<str, 4096>> = HashBits::new();
//!
//! filter.insert_value("hello");
//! filter.insert_value("world");
//!
//! assert!(filter.contains("hello"));
//! assert!(filter.contains("world"));
//! ```
//!
//! # Descriptors
//!
//! The element type, hash function and filter width are fixed at compile time by a
//! [`HashDescriptor`]. Implement the trait by hand, declare one with [`hash_descriptor!`],
//! or use a ready-made one from [`hash`]:
//!
//! ```
//! use hashbits::{hash_descriptor, HashBits};
//!
//! hash_descriptor! {
//!     /// User ids, identity-hashed into 64 bits.
//!     UserIds: u32 => u32, bits = 64, |id| *id
//! }
//!
//! let mut active = HashBits::<UserIds>::new();
//! let bit = HashBits::<UserIds>::bit_for(&1001);
//! active.insert(bit);
//! assert!(active.test(bit));
//! ```
//!
//! # Positions
//!
//! [`HashBits::bit_for`] hashes an element into a [`Bit<D>`]. A `Bit` can be reused for
//! [`insert`](HashBits::insert) and [`test`](HashBits::test) without hashing again, and it
//! has no public constructor, so a caller cannot set or test an arbitrary bit.
//!
//! # Merging
//!
//! Two filters with the same descriptor can be combined with
//! [`union`](HashBits::union) (or `|=`). Filters with different descriptors are different
//! types, so a width mismatch is a compile error rather than a runtime check.
//!
//! # Features
//!
//! - `trace` - emit `tracing` events on construction, insert and union
//! - `xxhash` - [`hash::Xxh3Descriptor`], backed by the `xxhash-rust` crate

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

/// Bit storage
pub mod core;

/// Error types and result aliases
pub mod error;

/// Filter implementations
pub mod filters;

/// Hash policies
pub mod hash;

pub use error::{HashBitsError, Result};
pub use filters::{Bit, HashBits};
pub use hash::{HashDescriptor, HashValue};

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use hashbits::prelude::*;
///
/// let mut filter: HashBits<StdHashDescriptor<u64, 256>> = HashBits::new();
/// filter.insert_value(&7);
/// assert!(filter.contains(&7));
/// ```
pub mod prelude {
    pub use crate::error::{HashBitsError, Result};
    pub use crate::filters::{Bit, HashBits};
    pub use crate::hash::{HashDescriptor, HashValue, StdHashDescriptor};

    #[cfg(feature = "xxhash")]
    pub use crate::hash::Xxh3Descriptor;

    pub use crate::hash_descriptor;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    hash_descriptor! {
        Bytes: [u8] => u8, bits = 16, |bytes| bytes.first().copied().unwrap_or(0)
    }

    #[test]
    fn test_prelude_imports() {
        let mut filter = HashBits::<StdHashDescriptor<String, 100>>::new();
        filter.insert_value(&"test".to_string());
        assert!(filter.contains(&"test".to_string()));
    }

    #[test]
    fn test_unsized_item_descriptor() {
        let mut filter = HashBits::<Bytes>::new();
        filter.insert_value(b"abc");
        // 'a' = 97, 97 % 16 = 1
        assert_eq!(filter.iter_ones().collect::<Vec<_>>(), vec![1]);
        assert!(filter.contains(b"q"));
        assert!(!filter.contains(b""));
    }

    #[test]
    fn test_generic_over_descriptor() {
        fn fill<D: HashDescriptor<Item = u64>>(values: &[u64]) -> HashBits<D> {
            let mut filter = HashBits::new();
            for v in values {
                filter.insert_value(v);
            }
            filter
        }

        let filter = fill::<StdHashDescriptor<u64, 512>>(&[1, 2, 3]);
        assert!(filter.contains(&2));
        assert_eq!(filter.bit_count(), 512);
    }

    #[cfg(feature = "xxhash")]
    #[test]
    fn test_xxhash_descriptor() {
        let mut filter = HashBits::<Xxh3Descriptor<str, 1024>>::new();
        filter.insert_value("key");
        assert!(filter.contains("key"));
    }
}
