//! Descriptor backed by the standard library's `DefaultHasher`.
//!
//! `DefaultHasher::new()` is SipHash-1-3 with fixed zero keys, so the output is
//! deterministic within a process and across runs built with the same toolchain. It is
//! not guaranteed stable across Rust releases; filters are in-memory only, so that is
//! sufficient here.

use super::HashDescriptor;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Descriptor hashing any `T: Hash` with std's `DefaultHasher` into an `N`-bit filter.
///
/// # Examples
///
/// ```
/// use hashbits::hash::StdHashDescriptor;
/// use hashbits::HashBits;
///
/// let mut seen: HashBits<StdHashDescriptor<str, 4096>> = HashBits::new();
/// seen.insert_value("alice");
/// assert!(seen.contains("alice"));
/// ```
pub struct StdHashDescriptor<T: ?Sized, const N: usize> {
    _item: PhantomData<fn(&T)>,
}

impl<T, const N: usize> HashDescriptor for StdHashDescriptor<T, N>
where
    T: Hash + ?Sized,
{
    type Item = T;
    type Hash = u64;
    const BITS: usize = N;

    #[inline]
    fn hash(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }
}
