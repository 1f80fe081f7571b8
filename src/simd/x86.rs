//! x86/x86_64 SIMD implementations.
//!
//! The rank query's slot-counter sum uses PSADBW, which adds the eight
//! bytes of a 64-bit lane against zero in a single instruction.

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

/// Sum the low `slot` bytes of an 8-byte counter block.
///
/// `slot` must be at most 8. The lane mask is built with a variable shift,
/// and shift counts of 64 clear the lane, so `slot == 0` yields 0 without
/// a branch.
#[cfg(target_arch = "x86_64")]
#[inline]
#[allow(dead_code)]
pub fn masked_byte_sum(counts: &[u8; 8], slot: usize) -> u32 {
    debug_assert!(slot <= 8);
    // SAFETY: SSE2 is mandatory on x86_64
    unsafe { masked_byte_sum_sse2(counts, slot) }
}

/// PSADBW-based sum of the low `slot` bytes.
///
/// # Safety
///
/// CPU must support SSE2 (always true on x86_64).
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
#[inline]
unsafe fn masked_byte_sum_sse2(counts: &[u8; 8], slot: usize) -> u32 {
    unsafe {
        // Keep the low `slot` bytes: shift an all-ones lane right by the
        // number of discarded bits. PSRLQ clears the lane for counts >= 64.
        let all_ones = _mm_set1_epi8(-1);
        let shift = _mm_cvtsi32_si128(((8 - slot) * 8) as i32);
        let mask = _mm_srl_epi64(all_ones, shift);

        let v = _mm_loadl_epi64(counts.as_ptr() as *const __m128i);
        let masked = _mm_and_si128(v, mask);

        // Byte sum lands in the low 16 bits of the lane
        let sums = _mm_sad_epu8(masked, _mm_setzero_si128());
        _mm_cvtsi128_si32(sums) as u32
    }
}

#[cfg(all(test, target_arch = "x86_64"))]
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
}
