//! Descriptor backed by XXH3 from the `xxhash-rust` crate.
//!
//! XXH3 output is stable across platforms and releases, unlike std's `DefaultHasher`,
//! and it is considerably faster on longer keys.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "xxhash")]
//! # {
//! use hashbits::hash::Xxh3Descriptor;
//! use hashbits::HashBits;
//!
//! let mut urls: HashBits<Xxh3Descriptor<str, 8192>> = HashBits::new();
//! urls.insert_value("https://example.com/");
//! assert!(urls.contains("https://example.com/"));
//! # }
//! ```

use super::HashDescriptor;
use std::marker::PhantomData;
use xxhash_rust::xxh3::xxh3_64;

/// Descriptor hashing the byte view of `T` with XXH3-64 into an `N`-bit filter.
pub struct Xxh3Descriptor<T: ?Sized, const N: usize> {
    _item: PhantomData<fn(&T)>,
}

impl<T, const N: usize> HashDescriptor for Xxh3Descriptor<T, N>
where
    T: AsRef<[u8]> + ?Sized,
{
    type Item = T;
    type Hash = u64;
    const BITS: usize = N;

    #[inline]
    fn hash(value: &T) -> u64 {
        xxh3_64(value.as_ref())
    }
}
