//! Error types for hashbits operations.
//!
//! Steady-state filter operations on [`HashBits`](crate::HashBits) are total and never
//! return an error: a zero-width descriptor is rejected when the filter type is built, and
//! unions between filters of different widths do not type-check. The errors here come from
//! the dynamically sized [`BitVec`](crate::core::BitVec), where those guarantees have to be
//! checked at runtime instead.
//!
//! # Error Propagation
//!
//! ```
//! use hashbits::core::BitVec;
//! use hashbits::Result;
//!
//! fn merged(a: &BitVec, b: &BitVec) -> Result<BitVec> {
//!     let mut out = a.clone();
//!     out.union_with(b)?;
//!     Ok(out)
//! }
//! # let a = BitVec::new(64).unwrap();
//! # let b = BitVec::new(64).unwrap();
//! # assert!(merged(&a, &b).is_ok());
//! ```

#![allow(clippy::module_name_repetitions)]

use std::fmt;

/// Result type alias for hashbits operations.
pub type Result<T> = std::result::Result<T, HashBitsError>;

/// Errors that can occur while building or combining bit vectors.
///
/// `Clone` + `PartialEq` let tests compare errors directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashBitsError {
    /// A bit vector was requested with zero bits.
    ///
    /// A filter needs at least one bit to map positions into.
    InvalidBitCount {
        /// The requested number of bits.
        bits: usize,
    },

    /// Two bit vectors of different widths were combined.
    ///
    /// Positions reduced modulo one width are meaningless in the other, so the
    /// union is refused rather than truncated or wrapped.
    WidthMismatch {
        /// Width of the receiving bit vector.
        expected: usize,
        /// Width of the bit vector being merged in.
        found: usize,
    },

    /// A bit index at or beyond the vector's width was accessed.
    IndexOutOfBounds {
        /// The invalid index.
        index: usize,
        /// Width of the bit vector.
        length: usize,
    },
}

impl fmt::Display for HashBitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBitCount { bits } => {
                write!(
                    f,
                    "Invalid bit count: {} bits. A bit set must hold at least one bit.",
                    bits
                )
            }
            Self::WidthMismatch { expected, found } => {
                write!(
                    f,
                    "Bit set width mismatch: expected {} bits, found {} bits.",
                    expected, found
                )
            }
            Self::IndexOutOfBounds { index, length } => {
                write!(
                    f,
                    "Index {} out of bounds for bit vector of length {}.",
                    index, length
                )
            }
        }
    }
}

impl std::error::Error for HashBitsError {}

impl HashBitsError {
    /// Create an `InvalidBitCount` error.
    #[must_use]
    pub fn invalid_bit_count(bits: usize) -> Self {
        Self::InvalidBitCount { bits }
    }

    /// Create a `WidthMismatch` error.
    #[must_use]
    pub fn width_mismatch(expected: usize, found: usize) -> Self {
        Self::WidthMismatch { expected, found }
    }

    /// Create an `IndexOutOfBounds` error.
    #[must_use]
    pub fn index_out_of_bounds(index: usize, length: usize) -> Self {
        Self::IndexOutOfBounds { index, length }
    }
}
