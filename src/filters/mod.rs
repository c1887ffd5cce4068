//! Filter implementations.
//!
//! - [`HashBits`]: one bit per element, width and hash fixed by a
//!   [`HashDescriptor`](crate::hash::HashDescriptor)

pub mod hash_bits;

pub use hash_bits::{Bit, HashBits};
