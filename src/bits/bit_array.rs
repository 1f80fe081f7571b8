//! Fixed-size bit storage packed into 64-bit words.
//!
//! This module provides `BitArray`, a plain bit container with LSB-first
//! addressing. It carries no query acceleration of its own; build a
//! [`RankIndex`](crate::bits::RankIndex) over [`BitArray::words`] for O(1)
//! rank queries.

#[cfg(not(test))]
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::popcount::popcount_words;

/// A fixed-size bit vector packed into 64-bit words.
///
/// Bit `i` lives in word `i / 64` at bit offset `i % 64`, so bit 0 is the
/// least significant bit of word 0. Unused high bits of the last word are
/// kept zero by every container operation.
///
/// # Example
///
/// ```
/// use bitrank::BitArray;
///
/// let mut bits = BitArray::with_len(100);
/// bits.set(0, true);
/// bits.set(99, true);
///
/// assert!(bits.get(0));
/// assert!(!bits.get(50));
/// assert_eq!(bits.count_ones(), 2);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BitArray {
    /// Raw bit storage
    words: Vec<u64>,
    /// Number of valid bits
    len: usize,
}

impl BitArray {
    /// Create an empty bit array.
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            len: 0,
        }
    }

    /// Create a bit array of `len` bits, all zero.
    pub fn with_len(len: usize) -> Self {
        let mut words = Vec::new();
        words.resize(len.div_ceil(64), 0u64);
        Self { words, len }
    }

    /// Create a bit array from raw u64 words.
    ///
    /// Bits at positions `len` and above are cleared, so the stored words
    /// never carry stray data past the end.
    ///
    /// # Arguments
    ///
    /// * `words` - The raw bit data as 64-bit words (little-endian bit order)
    /// * `len` - The number of valid bits (may be less than `words.len() * 64`)
    ///
    /// # Panics
    ///
    /// Panics if `len > words.len() * 64`.
    pub fn from_words(mut words: Vec<u64>, len: usize) -> Self {
        assert!(
            len <= words.len().saturating_mul(64),
            "len {} exceeds capacity {}",
            len,
            words.len().saturating_mul(64)
        );

        // Mask out unused bits: the partial last word, then any whole
        // words past it
        let keep = len.div_ceil(64);
        if len % 64 != 0 {
            words[keep - 1] &= (1u64 << (len % 64)) - 1;
        }
        for word in words.iter_mut().skip(keep) {
            *word = 0;
        }

        Self { words, len }
    }

    /// Resize to `len` bits, discarding the previous contents.
    ///
    /// All bits are zero afterwards.
    pub fn resize(&mut self, len: usize) {
        self.words.clear();
        self.words.resize(len.div_ceil(64), 0u64);
        self.len = len;
    }

    /// Number of bits in the array.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the array holds no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of 1-bits in the array.
    #[inline]
    pub fn count_ones(&self) -> usize {
        popcount_words(&self.words) as usize
    }

    /// Access the bit at position `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len`.
    #[inline]
    pub fn get(&self, i: usize) -> bool {
        assert!(i < self.len, "index {} out of bounds (len={})", i, self.len);
        let word_idx = i / 64;
        let bit_idx = i % 64;
        (self.words[word_idx] >> bit_idx) & 1 == 1
    }

    /// Access the bit at position `i` without bounds checking.
    ///
    /// # Safety
    ///
    /// Caller must ensure `i < len`.
    #[inline]
    pub unsafe fn get_unchecked(&self, i: usize) -> bool {
        let word_idx = i / 64;
        let bit_idx = i % 64;
        // SAFETY: Caller guarantees i is within bounds, so word_idx is valid
        unsafe { (*self.words.get_unchecked(word_idx) >> bit_idx) & 1 == 1 }
    }

    /// Set the bit at position `i` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len`.
    #[inline]
    pub fn set(&mut self, i: usize, value: bool) {
        assert!(i < self.len, "index {} out of bounds (len={})", i, self.len);
        let word = &mut self.words[i / 64];
        let bit = 1u64 << (i % 64);
        if value {
            *word |= bit;
        } else {
            *word &= !bit;
        }
    }

    /// Get the raw word at the given index.
    #[inline]
    pub fn word(&self, idx: usize) -> u64 {
        self.words[idx]
    }

    /// Number of 64-bit words in the array.
    #[inline]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Get a slice of all words.
    ///
    /// This is the input expected by
    /// [`RankIndex::build`](crate::bits::RankIndex::build).
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Get a mutable slice of all words.
    ///
    /// Bits at positions `len()` and above must be left zero; the container's
    /// own operations maintain this.
    #[inline]
    pub fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }
}

impl Default for BitArray {
    fn default() -> Self {
        Self::new()
    }
}
