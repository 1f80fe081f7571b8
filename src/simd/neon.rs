//! ARM NEON SIMD implementations.
//!
//! These implementations use NEON intrinsics for accelerated bit operations
//! on ARM/AArch64 platforms.

#[cfg(target_arch = "aarch64")]
use core::arch::aarch64::*;

/// Sum the low `slot` bytes of an 8-byte counter block.
///
/// `slot` must be at most 8.
#[cfg(target_arch = "aarch64")]
#[inline]
#[allow(dead_code)]
pub fn masked_byte_sum(counts: &[u8; 8], slot: usize) -> u32 {
    debug_assert!(slot <= 8);
    // SAFETY: NEON is mandatory on aarch64
    unsafe { masked_byte_sum_neon(counts, slot) }
}

/// UADDLV-based sum of the low `slot` bytes.
///
/// # Safety
///
/// CPU must support NEON (always true on aarch64).
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
#[inline]
unsafe fn masked_byte_sum_neon(counts: &[u8; 8], slot: usize) -> u32 {
    unsafe {
        // Keep the low `slot` bytes; the u128 shift lets slot == 8 keep all
        let keep = ((1u128 << (slot * 8)) - 1) as u64;
        let v = vcreate_u8(u64::from_le_bytes(*counts));
        let masked = vand_u8(v, vcreate_u8(keep));
        // UADDLV widens to u16, so a lane of 255s cannot overflow
        u32::from(vaddlv_u8(masked))
    }
}

/// Popcount a word slice using NEON 64-byte chunks.
#[cfg(target_arch = "aarch64")]
#[inline]
#[allow(dead_code)]
pub fn popcount_words(words: &[u64]) -> u32 {
    let mut total = 0u32;
    let ptr = words.as_ptr() as *const u8;
    let byte_len = words.len() * 8;
    let mut offset = 0;

    // Process 64-byte chunks with NEON
    while offset + 64 <= byte_len {
        // SAFETY: offset + 64 <= byte_len keeps the read in bounds
        total += unsafe { popcount_64bytes_neon(ptr.add(offset)) };
        offset += 64;
    }

    // Handle remaining words
    for &word in &words[offset / 8..] {
        total += word.count_ones();
    }

    total
}

/// Popcount of 64 bytes (512 bits) using NEON.
///
/// # Safety
///
/// - `ptr` must be valid for reading 64 bytes
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
#[inline]
unsafe fn popcount_64bytes_neon(ptr: *const u8) -> u32 {
    unsafe {
        // Load 4 x 128-bit chunks
        let v0 = vld1q_u8(ptr);
        let v1 = vld1q_u8(ptr.add(16));
        let v2 = vld1q_u8(ptr.add(32));
        let v3 = vld1q_u8(ptr.add(48));

        // Per-byte popcount using CNT instruction
        let c0 = vcntq_u8(v0);
        let c1 = vcntq_u8(v1);
        let c2 = vcntq_u8(v2);
        let c3 = vcntq_u8(v3);

        // Add pairs (max 16 per byte position)
        let sum01 = vaddq_u8(c0, c1);
        let sum23 = vaddq_u8(c2, c3);

        // Widen to u16 before the final sum to avoid overflow
        let wide01 = vpaddlq_u8(sum01);
        let wide23 = vpaddlq_u8(sum23);
        let wide_sum = vaddq_u16(wide01, wide23);

        vaddvq_u16(wide_sum) as u32
    }
}

#[cfg(all(test, target_arch = "aarch64"))]
mod tests {
    use super::*;
    use crate::bits::rank_index::sum_counts_before_scalar;

    #[test]
    fn test_masked_byte_sum_empty_prefix() {
        let counts = [0xFFu8; 8];
        assert_eq!(masked_byte_sum(&counts, 0), 0);
    }

    #[test]
    fn test_masked_byte_sum_full() {
        let counts = [64u8; 8];
        assert_eq!(masked_byte_sum(&counts, 8), 512);
    }

    #[test]
    fn test_masked_byte_sum_matches_scalar() {
        let patterns: &[[u8; 8]] = &[
            [0; 8],
            [255; 8],
            [64; 8],
            [128; 8],
            [3, 1, 4, 1, 5, 9, 2, 6],
            [0, 64, 0, 64, 0, 64, 0, 64],
            [1, 2, 3, 4, 5, 6, 7, 8],
        ];
        for counts in patterns {
            for slot in 0..=8 {
                assert_eq!(
                    masked_byte_sum(counts, slot) as usize,
                    sum_counts_before_scalar(counts, slot),
                    "counts={:?} slot={}",
                    counts,
                    slot
                );
            }
        }
    }

    #[test]
    fn test_popcount_words_matches_builtin() {
        for len in 0..20 {
            let words: Vec<u64> = (0..len)
                .map(|i| (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1)
                .collect();
            let expected: u32 = words.iter().map(|w| w.count_ones()).sum();
            assert_eq!(popcount_words(&words), expected, "len={}", len);
        }
    }

    #[test]
    fn test_popcount_words_chunk_boundaries() {
        // 8 words = exactly one 64-byte chunk, 16 = two, 9 = chunk + tail
        for &len in &[8usize, 9, 16] {
            let words = vec![0xAAAA_AAAA_AAAA_AAAAu64; len];
            assert_eq!(popcount_words(&words), (len * 32) as u32);
        }
    }
}
