//! Bit storage shared by the filters.
//!
//! ```text
//! core/
//! ├── bitvec.rs    - Fixed-width bit vector
//! └── mod.rs       - This file (public API)
//! ```
//!
//! [`BitVec`] is the runtime-sized counterpart of [`HashBits`](crate::HashBits)'s storage.
//! It is usable on its own when the width is only known at runtime, in which case the
//! zero-width and width-mismatch checks happen at runtime too.
//!
//! ```
//! use hashbits::core::BitVec;
//!
//! let mut bv = BitVec::new(1000).expect("non-zero width");
//! bv.set(42);
//! bv.set(999);
//!
//! assert!(bv.get(42));
//! assert!(!bv.get(43));
//! assert_eq!(bv.count_ones(), 2);
//! ```

pub mod bitvec;

pub use bitvec::BitVec;
