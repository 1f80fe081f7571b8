//! Super-block rank index for O(1) rank queries over borrowed words.
//!
//! # Structure
//!
//! A flat table with one 16-byte entry per super-block:
//!
//! - **prefix**: Absolute cumulative rank at the super-block boundary (u64).
//! - **counts**: Popcount of each of the block's 8 slots (u8 each). A slot
//!   covers one word for [`Block512`], two words for [`Block1024`].
//!
//! Space: 16 bytes per 512 bits of bitmap (25%) for [`Block512`], 16 bytes
//! per 1024 bits (12.5%) for [`Block1024`]. The table is single-level, so a
//! query performs exactly one dependent load before touching source words.
//!
//! # Query
//!
//! `rank1(idx)` = `prefix + sum(counts[..slot]) + popcount(residual words)`
//! where the residual is at most `WORDS_PER_SLOT` source words, the last one
//! masked down to the queried position.
//!
//! The index borrows the word slice it was built over, so the borrow checker
//! rules out mutation of the source for the index's whole lifetime. A built
//! index is immutable and safe to share across threads.

#[cfg(not(test))]
use alloc::vec::Vec;

use core::marker::PhantomData;

use super::popcount::popcount_word;
use crate::Rank;

/// Sub-block slots per super-block.
const SLOTS_PER_BLOCK: usize = 8;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Block512 {}
    impl Sealed for super::Block1024 {}
}

/// Super-block geometry selector for [`RankIndex`].
///
/// Sealed: slot popcounts are stored as single bytes, which caps a slot at
/// 255 bits, so only the one- and two-word layouts are valid.
pub trait BlockLayout: sealed::Sealed {
    /// Words covered by one sub-block slot.
    const WORDS_PER_SLOT: usize;
    /// Words covered by one super-block.
    const WORDS_PER_BLOCK: usize = Self::WORDS_PER_SLOT * SLOTS_PER_BLOCK;
    /// Bits covered by one super-block.
    const BITS_PER_BLOCK: usize = Self::WORDS_PER_BLOCK * 64;
}

/// 512-bit super-blocks: one word per slot. The default layout.
#[derive(Debug)]
pub struct Block512;

impl BlockLayout for Block512 {
    const WORDS_PER_SLOT: usize = 1;
}

/// 1024-bit super-blocks: two words per slot.
///
/// Half the table memory of [`Block512`] at the cost of up to one extra
/// word popcount per query.
#[derive(Debug)]
pub struct Block1024;

impl BlockLayout for Block1024 {
    const WORDS_PER_SLOT: usize = 2;
}

/// One super-block's metadata (16 bytes).
#[derive(Clone, Copy, Debug)]
struct BlockEntry {
    /// Popcount of all super-blocks before this one.
    prefix: u64,
    /// Popcount of each slot in this super-block. Slot counts are
    /// independent, not cumulative.
    counts: [u8; SLOTS_PER_BLOCK],
}

/// Rank index with 512-bit super-blocks.
pub type RankIndex512<'a> = RankIndex<'a, Block512>;

/// Rank index with 1024-bit super-blocks.
pub type RankIndex1024<'a> = RankIndex<'a, Block1024>;

/// O(1) rank index over a borrowed `&[u64]` word slice.
///
/// Built once with [`RankIndex::build`]; queries never mutate. The addressable
/// range is the full word span, so `rank1` accepts any position up to and
/// including [`num_bits`](RankIndex::num_bits).
///
/// Use the [`RankIndex512`] and [`RankIndex1024`] aliases to pick a layout.
///
/// # Example
///
/// ```
/// use bitrank::{RankIndex1024, RankIndex512};
///
/// let words = [0xFFu64, 0, 0, 0, 0, 0, 0, 0, 0b11];
/// let index = RankIndex512::build(&words);
///
/// assert_eq!(index.rank1(0), 0);
/// assert_eq!(index.rank1(4), 4);
/// assert_eq!(index.rank1(512), 8); // everything before the last word
/// assert_eq!(index.rank1(576), 10); // total population
///
/// // Same answers from the wider layout
/// let wide = RankIndex1024::build(&words);
/// assert_eq!(wide.rank1(576), 10);
/// ```
#[derive(Debug)]
pub struct RankIndex<'a, B: BlockLayout = Block512> {
    /// The indexed words. Residual popcounts read straight from this slice.
    words: &'a [u64],
    /// One entry per super-block.
    table: Vec<BlockEntry>,
    _layout: PhantomData<B>,
}

impl<'a, B: BlockLayout> RankIndex<'a, B> {
    /// Build the index over `words` in one pass.
    ///
    /// The slice is borrowed, not copied; residual bits are read from it at
    /// query time. A trailing partial super-block is tallied as if padded
    /// with zero words, so every block gets a full entry and no read ever
    /// goes past the end of the slice.
    pub fn build(words: &'a [u64]) -> Self {
        let num_blocks = words.len().div_ceil(B::WORDS_PER_BLOCK);
        let mut table = Vec::with_capacity(num_blocks);

        let mut prefix: u64 = 0;
        let mut pos = 0;
        for _ in 0..num_blocks {
            let mut entry = BlockEntry {
                prefix,
                counts: [0u8; SLOTS_PER_BLOCK],
            };
            for slot in 0..SLOTS_PER_BLOCK {
                let mut ones = 0u32;
                for _ in 0..B::WORDS_PER_SLOT {
                    // Words past the end count as zero.
                    ones += popcount_word(words.get(pos).copied().unwrap_or(0));
                    pos += 1;
                }
                entry.counts[slot] = ones as u8;
                prefix += u64::from(ones);
            }
            table.push(entry);
        }

        Self {
            words,
            table,
            _layout: PhantomData,
        }
    }

    /// Number of addressable bit positions: `word_count() * 64`.
    ///
    /// Rank queries accept any position up to and including this value.
    #[inline]
    pub fn num_bits(&self) -> usize {
        self.words.len() * 64
    }

    /// Number of 64-bit words the index was built over.
    #[inline]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Heap memory used by the table, in bytes.
    pub fn heap_size(&self) -> usize {
        self.table.len() * core::mem::size_of::<BlockEntry>()
    }

    /// Count 1-bits in positions `[0, idx)`.
    ///
    /// The bound is exclusive: `rank1(0)` is 0, and `rank1(num_bits())` is
    /// the total number of set bits.
    ///
    /// # Panics
    ///
    /// Panics if `idx > num_bits()`.
    ///
    /// # Example
    ///
    /// ```
    /// use bitrank::RankIndex512;
    ///
    /// let words = [0b1001u64];
    /// let index = RankIndex512::build(&words);
    /// assert_eq!(index.rank1(1), 1);
    /// assert_eq!(index.rank1(3), 1);
    /// assert_eq!(index.rank1(4), 2);
    /// ```
    #[inline]
    pub fn rank1(&self, idx: usize) -> usize {
        assert!(
            idx <= self.num_bits(),
            "rank position {} out of bounds (num_bits={})",
            idx,
            self.num_bits()
        );
        if idx == 0 {
            return 0;
        }
        // Count through the last included position with an inclusive mask.
        let i = idx - 1;
        let word_idx = i / 64;

        let entry = &self.table[i / B::BITS_PER_BLOCK];
        let slot = (word_idx / B::WORDS_PER_SLOT) % SLOTS_PER_BLOCK;
        let mut count = entry.prefix as usize + sum_counts_before(&entry.counts, slot);

        // Whole words of i's slot that lie before i's word.
        let slot_start = word_idx - word_idx % B::WORDS_PER_SLOT;
        for &word in &self.words[slot_start..word_idx] {
            count += popcount_word(word) as usize;
        }

        // Low (i % 64) + 1 bits of i's word; wraps to all ones when
        // (i & 63) == 63.
        let mask = (2u64 << (i & 63)).wrapping_sub(1);
        count + popcount_word(self.words[word_idx] & mask) as usize
    }
}

impl<B: BlockLayout> Rank for RankIndex<'_, B> {
    #[inline]
    fn rank1(&self, i: usize) -> usize {
        RankIndex::rank1(self, i)
    }
}

/// Sum of `counts[..slot]`: bits set in the slots before the one holding
/// the queried position.
///
/// Strategy switching mirrors the popcount module: the `simd` feature
/// selects a platform kernel, everything else takes the scalar loop.
#[inline]
fn sum_counts_before(counts: &[u8; SLOTS_PER_BLOCK], slot: usize) -> usize {
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    {
        crate::simd::x86::masked_byte_sum(counts, slot) as usize
    }

    #[cfg(all(feature = "simd", target_arch = "aarch64"))]
    {
        crate::simd::neon::masked_byte_sum(counts, slot) as usize
    }

    #[cfg(not(all(
        feature = "simd",
        any(target_arch = "x86_64", target_arch = "aarch64")
    )))]
    {
        sum_counts_before_scalar(counts, slot)
    }
}

/// Reference implementation: a plain loop over at most seven byte counters.
#[allow(dead_code)]
#[inline]
pub(crate) fn sum_counts_before_scalar(counts: &[u8; SLOTS_PER_BLOCK], slot: usize) -> usize {
    let mut sum = 0usize;
    for &c in &counts[..slot] {
        sum += c as usize;
    }
    sum
}
