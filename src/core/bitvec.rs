//! Fixed-width bit vector backing every filter.
//!
//! `BitVec` is a bit array sized once at construction and backed by `Box<[u64]>`. Each
//! 64-bit word stores 64 bits. It never grows, shrinks or clears: the only mutations are
//! setting a single bit and OR-ing in another vector of the same width.
//!
//! # Memory Layout
//!
//! Bits are packed into 64-bit words in little-endian bit order:
//!
//! ```text
//! Word 0: [bit 0][bit 1]...[bit 63]
//! Word 1: [bit 64][bit 65]...[bit 127]
//! ```
//!
//! Padding bits in the last word past `len` are never set.
//!
//! # Performance Characteristics
//!
//! - Space: `⌈n/64⌉ * 8` bytes for `n` bits
//! - `set` / `get`: O(1)
//! - `union_with`, `count_ones`: O(n/64), `count_ones` uses the POPCNT instruction
//!
//! # Examples
//!
//! ```
//! use hashbits::core::BitVec;
//!
//! let mut a = BitVec::new(100).unwrap();
//! let mut b = BitVec::new(100).unwrap();
//! a.set(10);
//! b.set(99);
//!
//! a.union_with(&b).unwrap();
//! assert!(a.get(10));
//! assert!(a.get(99));
//! assert_eq!(a.count_ones(), 2);
//! ```

use crate::error::{HashBitsError, Result};

const WORD_BITS: usize = 64;

/// Fixed-width bit vector.
///
/// Unlike [`HashBits`](crate::HashBits), the width is a runtime value, so constructing a
/// zero-width vector and merging vectors of different widths are reported as errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitVec {
    /// Words, each storing 64 bits.
    blocks: Box<[u64]>,

    /// Total number of bits in the vector.
    len: usize,
}

impl BitVec {
    /// Create a new bit vector with the specified number of bits, all clear.
    ///
    /// # Errors
    ///
    /// Returns [`HashBitsError::InvalidBitCount`] if `num_bits` is 0, or so large that its
    /// word count cannot be computed or allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashbits::core::BitVec;
    ///
    /// let bv = BitVec::new(1000).unwrap();
    /// assert_eq!(bv.len(), 1000);
    /// assert_eq!(bv.count_ones(), 0);
    ///
    /// assert!(BitVec::new(0).is_err());
    /// ```
    pub fn new(num_bits: usize) -> Result<Self> {
        let fits = num_bits
            .checked_add(WORD_BITS - 1)
            .map(|padded| padded / WORD_BITS)
            .and_then(|words| words.checked_mul(std::mem::size_of::<u64>()))
            .map_or(false, |bytes| bytes <= isize::MAX as usize);
        if num_bits == 0 || !fits {
            return Err(HashBitsError::invalid_bit_count(num_bits));
        }
        Ok(Self::zeroed(num_bits))
    }

    /// Allocate `num_bits` clear bits without validating the width.
    ///
    /// Callers guarantee `num_bits > 0`; `HashBits` does so at compile time.
    pub(crate) fn zeroed(num_bits: usize) -> Self {
        let num_blocks = num_bits / WORD_BITS + usize::from(num_bits % WORD_BITS != 0);
        Self {
            blocks: vec![0u64; num_blocks].into_boxed_slice(),
            len: num_bits,
        }
    }

    /// Number of bits in the vector.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True while no bit is set. The width is unaffected; see [`len`](Self::len).
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|&block| block == 0)
    }

    /// Set a bit to 1. Setting an already-set bit has no effect.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`, matching slice indexing.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashbits::core::BitVec;
    ///
    /// let mut bv = BitVec::new(64).unwrap();
    /// bv.set(10);
    /// bv.set(10);
    /// assert!(bv.get(10));
    /// assert_eq!(bv.count_ones(), 1);
    /// ```
    #[inline]
    pub fn set(&mut self, index: usize) {
        assert!(
            index < self.len,
            "BitVec index out of bounds: index={} len={}",
            index,
            self.len
        );
        let (word, mask) = Self::locate(index);
        self.blocks[word] |= mask;
    }

    /// Read a bit.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        assert!(
            index < self.len,
            "BitVec index out of bounds: index={} len={}",
            index,
            self.len
        );
        let (word, mask) = Self::locate(index);
        self.blocks[word] & mask != 0
    }

    /// Set a bit, reporting an out-of-range index as an error instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`HashBitsError::IndexOutOfBounds`] if `index >= len`.
    pub fn try_set(&mut self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(HashBitsError::index_out_of_bounds(index, self.len));
        }
        self.set(index);
        Ok(())
    }

    /// Read a bit, reporting an out-of-range index as an error instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`HashBitsError::IndexOutOfBounds`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashbits::core::BitVec;
    ///
    /// let bv = BitVec::new(8).unwrap();
    /// assert_eq!(bv.try_get(3), Ok(false));
    /// assert!(bv.try_get(8).is_err());
    /// ```
    pub fn try_get(&self, index: usize) -> Result<bool> {
        if index >= self.len {
            return Err(HashBitsError::index_out_of_bounds(index, self.len));
        }
        Ok(self.get(index))
    }

    /// OR every bit of `other` into `self`.
    ///
    /// # Errors
    ///
    /// Returns [`HashBitsError::WidthMismatch`] if the widths differ; `self` is left
    /// untouched in that case.
    pub fn union_with(&mut self, other: &Self) -> Result<()> {
        if self.len != other.len {
            return Err(HashBitsError::width_mismatch(self.len, other.len));
        }
        self.or_words(other);
        Ok(())
    }

    /// Word-wise OR for vectors already known to share a width.
    #[inline]
    pub(crate) fn or_words(&mut self, other: &Self) {
        debug_assert_eq!(self.len, other.len);
        for (dst, src) in self.blocks.iter_mut().zip(other.blocks.iter()) {
            *dst |= *src;
        }
    }

    /// Count the set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.blocks
            .iter()
            .map(|block| block.count_ones() as usize)
            .sum()
    }

    /// Iterate over the indices of set bits in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashbits::core::BitVec;
    ///
    /// let mut bv = BitVec::new(200).unwrap();
    /// bv.set(3);
    /// bv.set(64);
    /// bv.set(199);
    /// assert_eq!(bv.iter_ones().collect::<Vec<_>>(), vec![3, 64, 199]);
    /// ```
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .flat_map(|(word_idx, &block)| {
                let mut rest = block;
                std::iter::from_fn(move || {
                    if rest == 0 {
                        return None;
                    }
                    let bit = rest.trailing_zeros() as usize;
                    // clear lowest set bit
                    rest &= rest - 1;
                    Some(word_idx * WORD_BITS + bit)
                })
            })
    }

    /// Number of 64-bit words allocated.
    #[must_use]
    #[inline]
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Heap plus inline size in bytes.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.blocks.len() * std::mem::size_of::<u64>() + std::mem::size_of::<Self>()
    }

    #[inline]
    const fn locate(index: usize) -> (usize, u64) {
        (index / WORD_BITS, 1u64 << (index % WORD_BITS))
    }
}
