//! Bit storage and rank indexing.
//!
//! This module provides a packed fixed-size bit container and a two-level
//! index answering rank queries in O(1).
//!
//! # Data Structures
//!
//! - [`BitArray`] - Fixed-size bit vector packed into 64-bit words
//! - [`RankIndex`] - Super-block rank index over borrowed words
//!
//! # Example
//!
//! ```
//! use bitrank::bits::{BitArray, RankIndex512};
//!
//! let mut bits = BitArray::with_len(128);
//! bits.set(3, true);
//! bits.set(100, true);
//!
//! let index = RankIndex512::build(bits.words());
//! assert_eq!(index.rank1(4), 1);
//! assert_eq!(index.rank1(128), 2);
//! ```

mod bit_array;
pub(crate) mod popcount;
pub(crate) mod rank_index;

pub use bit_array::BitArray;
pub use popcount::{popcount_word, popcount_words};
pub use rank_index::{Block1024, Block512, BlockLayout, RankIndex, RankIndex1024, RankIndex512};
