//! Single-position bit-set filter parameterized by a [`HashDescriptor`].
//!
//! Each element maps to exactly one bit, `D::hash(value) % D::BITS`. This is the simplest
//! member of the Bloom family: very cheap, and with a correspondingly high false positive
//! rate once the bit set fills up. It is meant as a pre-check in front of an exact lookup.
//!
//! # Algorithm
//!
//! ```text
//! bit_for(x)  = Bit(hash(x) mod BITS)
//! insert(b)   : bits[b] = 1
//! test(b)     : bits[b] == 1      (false => definitely absent)
//! union(o)    : bits |= o.bits
//! ```
//!
//! Hashing and bit access are split in two steps. A [`Bit`] can be computed once and used
//! for both a test and an insert, and because `Bit` has no public constructor, the only way
//! to touch a bit is through the descriptor's hash.
//!
//! # Examples
//!
//! ```
//! use hashbits::hash::StdHashDescriptor;
//! use hashbits::HashBits;
//!
//! type Keys = StdHashDescriptor<str, 1024>;
//!
//! let mut left = HashBits::<Keys>::new();
//! let mut right = HashBits::<Keys>::new();
//!
//! let alice = HashBits::<Keys>::bit_for("alice");
//! left.insert(alice);
//! right.insert_value("bob");
//!
//! left.union(&right);
//! assert!(left.test(alice));
//! assert!(left.contains("bob"));
//! ```
//!
//! Filters for different descriptors are different types, so merging them does not
//! compile:
//!
//! ```compile_fail
//! use hashbits::hash::StdHashDescriptor;
//! use hashbits::HashBits;
//!
//! let mut small = HashBits::<StdHashDescriptor<str, 64>>::new();
//! let large = HashBits::<StdHashDescriptor<str, 128>>::new();
//! small.union(&large);
//! ```
//!
//! A zero-width descriptor is rejected when the filter is built:
//!
//! ```compile_fail
//! use hashbits::hash::StdHashDescriptor;
//! use hashbits::HashBits;
//!
//! let filter = HashBits::<StdHashDescriptor<str, 0>>::new();
//! ```

use crate::core::BitVec;
use crate::hash::{HashDescriptor, HashValue};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{BitOr, BitOrAssign};

/// Position of one bit in a `HashBits<D>` filter.
///
/// Only [`HashBits::bit_for`] creates a `Bit`, so every position is the reduced hash of some
/// element and always lies in `[0, D::BITS)`. The descriptor type is part of the `Bit`'s
/// type: a position derived for one descriptor cannot be used on a filter for another.
///
/// A `Bit` keeps nothing of the element it came from; distinct elements may share a `Bit`.
///
/// ```compile_fail
/// use hashbits::hash::StdHashDescriptor;
/// use hashbits::Bit;
///
/// let forged: Bit<StdHashDescriptor<str, 64>> = Bit { pos: 3, _policy: std::marker::PhantomData };
/// ```
pub struct Bit<D> {
    pos: usize,
    _policy: PhantomData<fn() -> D>,
}

impl<D> Bit<D> {
    /// Index of this bit within the filter.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.pos
    }
}

impl<D: HashDescriptor> Bit<D> {
    #[inline]
    fn from_hash(hash: D::Hash) -> Self {
        Self {
            pos: hash.reduce(D::BITS),
            _policy: PhantomData,
        }
    }
}

// Manual impls: deriving would demand the same traits of the descriptor marker.
impl<D> Clone for Bit<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for Bit<D> {}

impl<D> PartialEq for Bit<D> {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl<D> Eq for Bit<D> {}

impl<D> Hash for Bit<D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

impl<D> fmt::Debug for Bit<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Bit").field(&self.pos).finish()
    }
}

/// Fixed-width bit-set filter whose width and hash come from the descriptor `D`.
///
/// # Guarantees
///
/// - **No false negatives**: once a bit is inserted it stays set until the filter is
///   dropped. There is no clear, reset or remove.
/// - **Idempotent inserts**: inserting the same position again leaves the filter unchanged.
/// - **Type-checked merges**: `union` only accepts a filter with the same descriptor.
///
/// # Thread Safety
///
/// `HashBits<D>` is `Send + Sync` and has no interior mutability. Mutation takes
/// `&mut self`; to fill from several threads, give each thread its own filter and
/// [`union`](Self::union) them afterwards, or wrap one filter in a lock.
///
/// # Examples
///
/// ```
/// use hashbits::{hash_descriptor, HashBits};
///
/// hash_descriptor! {
///     Mod4: u32 => u32, bits = 4, |value| *value
/// }
///
/// let mut filter = HashBits::<Mod4>::new();
/// filter.insert_value(&2);
///
/// // 6 % 4 == 2: a false positive, as expected for a lossy filter
/// assert!(filter.contains(&6));
/// assert!(!filter.contains(&3));
/// ```
pub struct HashBits<D: HashDescriptor> {
    bits: BitVec,
    _policy: PhantomData<fn() -> D>,
}

impl<D: HashDescriptor> HashBits<D> {
    /// Evaluated when a filter type is instantiated; a zero width fails the build.
    const NONZERO_WIDTH: () = assert!(D::BITS > 0, "HashDescriptor::BITS must be greater than 0");

    /// Create an empty filter with `D::BITS` clear bits.
    #[must_use]
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NONZERO_WIDTH;

        let bits = BitVec::zeroed(D::BITS);

        #[cfg(feature = "trace")]
        tracing::debug!(bits = D::BITS, words = bits.num_blocks(), "HashBits::new");

        Self {
            bits,
            _policy: PhantomData,
        }
    }

    /// Derive the position of `value`: `D::hash(value) % D::BITS`.
    ///
    /// Pure and infallible. The result can be reused for [`insert`](Self::insert) and
    /// [`test`](Self::test) without hashing again.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashbits::{hash_descriptor, HashBits};
    ///
    /// hash_descriptor! {
    ///     Mod8: u32 => u32, bits = 8, |value| *value
    /// }
    ///
    /// assert_eq!(HashBits::<Mod8>::bit_for(&5).index(), 5);
    /// assert_eq!(HashBits::<Mod8>::bit_for(&13).index(), 5);
    /// ```
    #[must_use]
    #[inline]
    pub fn bit_for(value: &D::Item) -> Bit<D> {
        #[allow(clippy::let_unit_value)]
        let () = Self::NONZERO_WIDTH;
        Bit::from_hash(D::hash(value))
    }

    /// Set the bit at `bit`. Setting an already-set bit has no effect.
    #[inline]
    pub fn insert(&mut self, bit: Bit<D>) {
        #[cfg(feature = "trace")]
        tracing::trace!(index = bit.pos, "HashBits::insert");

        self.bits.set(bit.pos);
    }

    /// Hash `value` and set its bit.
    #[inline]
    pub fn insert_value(&mut self, value: &D::Item) {
        self.insert(Self::bit_for(value));
    }

    /// Hash `value` once, set its bit, and report whether the bit was already set.
    ///
    /// Useful for "seen before?" checks: `false` means `value` was definitely new.
    ///
    /// ```
    /// use hashbits::hash::StdHashDescriptor;
    /// use hashbits::HashBits;
    ///
    /// let mut seen = HashBits::<StdHashDescriptor<u64, 4096>>::new();
    /// assert!(!seen.insert_and_check(&42));
    /// assert!(seen.insert_and_check(&42));
    /// ```
    pub fn insert_and_check(&mut self, value: &D::Item) -> bool {
        let bit = Self::bit_for(value);
        let was_set = self.test(bit);
        self.insert(bit);
        was_set
    }

    /// OR every bit of `other` into `self`.
    ///
    /// Both filters share `D`, hence the same width and hash; no runtime check is needed.
    /// Afterwards, `self.test(p)` is true exactly when it was true before or
    /// `other.test(p)` is true.
    pub fn union(&mut self, other: &Self) {
        #[cfg(feature = "trace")]
        let before = self.bits.count_ones();

        self.bits.or_words(&other.bits);

        #[cfg(feature = "trace")]
        tracing::trace!(
            bits = D::BITS,
            ones_before = before,
            ones_after = self.bits.count_ones(),
            "HashBits::union"
        );
    }

    /// Whether the bit at `bit` is set.
    ///
    /// `false` means no element hashing to this position was ever inserted. `true` means
    /// one might have been: another element may share the position.
    #[must_use]
    #[inline]
    pub fn test(&self, bit: Bit<D>) -> bool {
        self.bits.get(bit.pos)
    }

    /// Hash `value` and test its bit.
    #[must_use]
    #[inline]
    pub fn contains(&self, value: &D::Item) -> bool {
        self.test(Self::bit_for(value))
    }

    /// Width of the filter, `D::BITS`.
    #[must_use]
    #[inline]
    pub const fn bit_count(&self) -> usize {
        D::BITS
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// True until the first insert (or union with a non-empty filter).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Fraction of bits set, in `[0, 1]`.
    #[must_use]
    pub fn fill_ratio(&self) -> f64 {
        self.count_ones() as f64 / D::BITS as f64
    }

    /// Probability that an element never inserted tests positive.
    ///
    /// With one position per element this is the fill ratio, assuming the descriptor's
    /// hash spreads uniformly over the bits.
    #[must_use]
    pub fn estimated_false_positive_rate(&self) -> f64 {
        self.fill_ratio()
    }

    /// Indices of set bits in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Bytes used by the underlying bit vector.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.bits.memory_usage()
    }
}

impl<D: HashDescriptor> Default for HashBits<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: HashDescriptor> Clone for HashBits<D> {
    fn clone(&self) -> Self {
        Self {
            bits: self.bits.clone(),
            _policy: PhantomData,
        }
    }
}

impl<D: HashDescriptor> PartialEq for HashBits<D> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<D: HashDescriptor> Eq for HashBits<D> {}

impl<D: HashDescriptor> fmt::Debug for HashBits<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashBits")
            .field("bits", &D::BITS)
            .field("ones", &self.count_ones())
            .finish()
    }
}

impl<D: HashDescriptor> Extend<Bit<D>> for HashBits<D> {
    fn extend<I: IntoIterator<Item = Bit<D>>>(&mut self, iter: I) {
        for bit in iter {
            self.insert(bit);
        }
    }
}

impl<D: HashDescriptor> FromIterator<Bit<D>> for HashBits<D> {
    fn from_iter<I: IntoIterator<Item = Bit<D>>>(iter: I) -> Self {
        let mut filter = Self::new();
        filter.extend(iter);
        filter
    }
}

impl<D: HashDescriptor> BitOrAssign<&HashBits<D>> for HashBits<D> {
    fn bitor_assign(&mut self, rhs: &HashBits<D>) {
        self.union(rhs);
    }
}

impl<D: HashDescriptor> BitOr<&HashBits<D>> for &HashBits<D> {
    type Output = HashBits<D>;

    fn bitor(self, rhs: &HashBits<D>) -> HashBits<D> {
        let mut out = self.clone();
        out.union(rhs);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::StdHashDescriptor;

    crate::hash_descriptor! {
        Mod8: u32 => u32, bits = 8, |value| *value
    }

    crate::hash_descriptor! {
        Mod4: u32 => u32, bits = 4, |value| *value
    }

    crate::hash_descriptor! {
        Wide: u64 => u64, bits = 1000, |value| value.wrapping_mul(0x9e37_79b9_7f4a_7c15)
    }

    #[test]
    fn test_new_filter_is_empty() {
        let filter = HashBits::<Mod8>::new();
        assert!(filter.is_empty());
        assert_eq!(filter.count_ones(), 0);
        assert_eq!(filter.bit_count(), 8);
        for v in 0..8u32 {
            assert!(!filter.contains(&v));
        }
    }

    #[test]
    fn test_is_empty_follows_inserts_and_union() {
        let mut filter = HashBits::<Mod8>::new();
        filter.insert_value(&3);
        assert!(!filter.is_empty());

        let mut merged = HashBits::<Mod8>::new();
        merged |= &HashBits::<Mod8>::new();
        assert!(merged.is_empty());
        merged |= &filter;
        assert!(!merged.is_empty());
        assert_eq!(merged.is_empty(), merged.count_ones() == 0);
    }

    #[test]
    fn test_distribution_boundary() {
        let mut filter = HashBits::<Mod8>::new();
        filter.insert(HashBits::<Mod8>::bit_for(&5));

        assert!(filter.test(HashBits::<Mod8>::bit_for(&5)));
        assert!(!filter.test(HashBits::<Mod8>::bit_for(&3)));
        assert_eq!(filter.iter_ones().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn test_collision_is_a_false_positive() {
        let mut filter = HashBits::<Mod4>::new();
        filter.insert_value(&2);
        filter.insert_value(&6);

        assert!(filter.contains(&2));
        assert!(filter.contains(&6));
        assert_eq!(filter.count_ones(), 1);
        assert_eq!(HashBits::<Mod4>::bit_for(&2), HashBits::<Mod4>::bit_for(&6));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut once = HashBits::<Wide>::new();
        once.insert_value(&77);

        let mut many = HashBits::<Wide>::new();
        for _ in 0..5 {
            many.insert_value(&77);
        }
        assert_eq!(once, many);
    }

    #[test]
    fn test_insert_and_check() {
        let mut filter = HashBits::<Mod8>::new();
        assert!(!filter.insert_and_check(&1));
        assert!(filter.insert_and_check(&1));
        // 9 collides with 1
        assert!(filter.insert_and_check(&9));
        assert!(!filter.insert_and_check(&2));
    }

    #[test]
    fn test_bit_reuse_without_rehash() {
        let bit = HashBits::<Wide>::bit_for(&12345);
        let mut filter = HashBits::<Wide>::new();
        assert!(!filter.test(bit));
        filter.insert(bit);
        assert!(filter.test(bit));
        assert!(bit.index() < 1000);
    }

    #[test]
    fn test_union() {
        let mut a = HashBits::<Mod8>::new();
        let mut b = HashBits::<Mod8>::new();
        a.insert_value(&1);
        b.insert_value(&6);

        let before = a.clone();
        a.union(&b);
        for v in 0..8u32 {
            let bit = HashBits::<Mod8>::bit_for(&v);
            assert_eq!(a.test(bit), before.test(bit) || b.test(bit));
        }
        assert_eq!(a.iter_ones().collect::<Vec<_>>(), vec![1, 6]);
    }

    #[test]
    fn test_union_with_empty_is_noop() {
        let mut a = HashBits::<Wide>::new();
        a.insert_value(&3);
        let before = a.clone();
        a.union(&HashBits::new());
        assert_eq!(a, before);
    }

    #[test]
    fn test_bitor_operators() {
        let a: HashBits<Mod8> = [0u32, 2].iter().map(HashBits::<Mod8>::bit_for).collect();
        let b: HashBits<Mod8> = [2u32, 7].iter().map(HashBits::<Mod8>::bit_for).collect();

        let c = &a | &b;
        assert_eq!(c.iter_ones().collect::<Vec<_>>(), vec![0, 2, 7]);

        let mut d = a.clone();
        d |= &b;
        assert_eq!(c, d);
        // operands untouched
        assert_eq!(a.count_ones(), 2);
    }

    #[test]
    fn test_extend() {
        let mut filter = HashBits::<Mod8>::new();
        filter.extend((10u32..13).map(|v| HashBits::<Mod8>::bit_for(&v)));
        assert_eq!(filter.iter_ones().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_fill_ratio_and_fp_estimate() {
        let mut filter = HashBits::<Mod4>::new();
        assert_eq!(filter.fill_ratio(), 0.0);
        filter.insert_value(&0);
        filter.insert_value(&1);
        assert!((filter.fill_ratio() - 0.5).abs() < f64::EPSILON);
        assert!((filter.estimated_false_positive_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_std_hash_descriptor_unsized_item() {
        let mut filter = HashBits::<StdHashDescriptor<str, 512>>::new();
        filter.insert_value("alpha");
        filter.insert_value("beta");
        assert!(filter.contains("alpha"));
        assert!(filter.contains("beta"));
        assert!(filter.count_ones() <= 2);
    }

    #[test]
    fn test_debug_output() {
        let mut filter = HashBits::<Mod8>::new();
        filter.insert_value(&3);
        let debug = format!("{:?}", filter);
        assert!(debug.contains("bits: 8"));
        assert!(debug.contains("ones: 1"));
        assert_eq!(format!("{:?}", HashBits::<Mod8>::bit_for(&3)), "Bit(3)");
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HashBits<Mod8>>();
        assert_send_sync::<Bit<Mod8>>();
    }

    #[test]
    fn test_private_filters_merged_across_threads() {
        use std::thread;

        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                thread::spawn(move || {
                    let mut local = HashBits::<Wide>::new();
                    for i in 0..100 {
                        local.insert_value(&(t * 100 + i));
                    }
                    local
                })
            })
            .collect();

        let mut merged = HashBits::<Wide>::new();
        for h in handles {
            merged.union(&h.join().unwrap());
        }
        for v in 0..400u64 {
            assert!(merged.contains(&v), "false negative for {}", v);
        }
    }
}
