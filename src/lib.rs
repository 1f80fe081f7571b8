//! # Bitrank
//!
//! Constant-time rank queries over packed bit vectors.
//!
//! This crate provides a fixed-size bit container and a small two-level
//! index answering `rank1` in O(1), optimized for both x86_64 and ARM
//! (NEON) architectures.
//!
//! ## Module Organization
//!
//! - [`bits`] - Bit storage, popcount strategies, and the rank index
//!
//! ## Quick Start
//!
//! ```
//! use bitrank::{BitArray, RankIndex512};
//!
//! // Create a bit array from u64 words
//! let bits = BitArray::from_words(vec![0b1010_1010_1010_1010u64; 8], 512);
//!
//! // Build a rank index over the packed words
//! let index = RankIndex512::build(bits.words());
//!
//! // Query rank (count of 1-bits in [0, i))
//! assert_eq!(index.rank1(8), 4);
//! assert_eq!(index.rank1(512), bits.count_ones());
//! ```
//!
//! ## Features
//!
//! Counting strategies (mutually exclusive, for benchmarking):
//! - Default: Uses Rust's `count_ones()` and scalar loops
//! - `simd` - Use explicit SIMD intrinsics (SSE2 on x86_64, NEON on ARM)
//! - `portable-popcount` - Use portable bitwise algorithm (no intrinsics)
//!
//! Other features:
//! - `serde` - Enable serialization/deserialization for [`BitArray`]

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

// =============================================================================
// Core modules
// =============================================================================

/// Bit storage and rank indexing.
pub mod bits;

/// Architecture-specific SIMD kernels (not part of public API).
pub(crate) mod simd;

// =============================================================================
// Public re-exports
// =============================================================================

pub use bits::BitArray;
pub use bits::{popcount_word, popcount_words};
pub use bits::{Block1024, Block512, BlockLayout, RankIndex, RankIndex1024, RankIndex512};

// =============================================================================
// Core traits
// =============================================================================

/// Trait for rank queries on bitvector indexes.
///
/// Rank is the fundamental counting operation for succinct data structures:
/// `rank1(i)` counts 1-bits in positions `[0, i)`. The bound is exclusive,
/// so `rank1(0)` is always 0 and `rank1(len)` is the total population count.
pub trait Rank {
    /// Count 1-bits in positions `[0, i)`.
    ///
    /// Returns 0 if `i == 0`.
    fn rank1(&self, i: usize) -> usize;
}
