//! Popcount implementations with compile-time switching.
//!
//! This module provides different popcount strategies that can be selected
//! via feature flags for benchmarking:
//!
//! - Default: Uses Rust's `count_ones()` which auto-vectorizes
//! - `simd`: Uses explicit SIMD intrinsics (NEON on ARM)
//! - `portable-popcount`: Uses portable bitwise algorithm (no intrinsics)
//!
//! Feature priority (when multiple enabled): portable-popcount > simd > default

/// Popcount a single u64 word.
#[inline(always)]
pub fn popcount_word(word: u64) -> u32 {
    // Priority: portable-popcount > simd > default
    #[cfg(feature = "portable-popcount")]
    {
        popcount_word_portable(word)
    }

    #[cfg(all(feature = "simd", not(feature = "portable-popcount")))]
    {
        // On both x86_64 and aarch64, count_ones compiles to efficient instructions
        word.count_ones()
    }

    #[cfg(not(any(feature = "portable-popcount", feature = "simd")))]
    {
        // Default: let Rust/LLVM choose the best implementation
        word.count_ones()
    }
}

/// Popcount multiple words, returning total.
#[inline]
pub fn popcount_words(words: &[u64]) -> u32 {
    // Priority: portable-popcount > simd > default
    #[cfg(feature = "portable-popcount")]
    {
        popcount_words_portable(words)
    }

    #[cfg(all(
        feature = "simd",
        target_arch = "aarch64",
        not(feature = "portable-popcount")
    ))]
    {
        crate::simd::neon::popcount_words(words)
    }

    #[cfg(all(
        feature = "simd",
        target_arch = "x86_64",
        not(feature = "portable-popcount")
    ))]
    {
        popcount_words_x86(words)
    }

    #[cfg(not(any(
        feature = "portable-popcount",
        all(
            feature = "simd",
            any(target_arch = "aarch64", target_arch = "x86_64")
        )
    )))]
    {
        // Default: simple loop, lets LLVM auto-vectorize
        popcount_words_default(words)
    }
}

/// Default implementation using Rust's count_ones.
#[inline]
#[cfg(not(any(
    feature = "portable-popcount",
    all(
        feature = "simd",
        any(target_arch = "aarch64", target_arch = "x86_64")
    )
)))]
fn popcount_words_default(words: &[u64]) -> u32 {
    let mut total = 0u32;
    for &word in words {
        total += word.count_ones();
    }
    total
}

/// Portable bitwise popcount (no intrinsics).
///
/// Uses the classic parallel bit-counting algorithm.
#[inline(always)]
#[cfg(feature = "portable-popcount")]
pub fn popcount_word_portable(mut x: u64) -> u32 {
    // Parallel bit count using magic constants
    const M1: u64 = 0x5555_5555_5555_5555; // 01010101...
    const M2: u64 = 0x3333_3333_3333_3333; // 00110011...
    const M4: u64 = 0x0f0f_0f0f_0f0f_0f0f; // 00001111...
    const H01: u64 = 0x0101_0101_0101_0101; // sum helper

    x = x - ((x >> 1) & M1);
    x = (x & M2) + ((x >> 2) & M2);
    x = (x + (x >> 4)) & M4;
    ((x.wrapping_mul(H01)) >> 56) as u32
}

/// Portable popcount for word slice.
#[inline]
#[cfg(feature = "portable-popcount")]
fn popcount_words_portable(words: &[u64]) -> u32 {
    let mut total = 0u32;
    for &word in words {
        total += popcount_word_portable(word);
    }
    total
}

/// x86_64 popcount using POPCNT instruction.
///
/// Uses Rust's `count_ones()` which LLVM compiles to POPCNT when available.
/// For benchmarking with explicit POPCNT, compile with `-C target-feature=+popcnt`.
#[cfg(all(
    feature = "simd",
    target_arch = "x86_64",
    not(feature = "portable-popcount")
))]
#[inline]
fn popcount_words_x86(words: &[u64]) -> u32 {
    // count_ones() compiles to POPCNT on x86_64 with appropriate target features.
    // This is the most portable approach for no_std environments.
    let mut total = 0u32;
    for &word in words {
        total += word.count_ones();
    }
    total
}
