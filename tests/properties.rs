//! Property-based tests for rank queries.

use bitrank::{BitArray, Rank, RankIndex1024, RankIndex512};
use proptest::prelude::*;

/// Reference implementation for comparison
fn reference_rank1(words: &[u64], i: usize) -> usize {
    let mut count = 0;
    for bit_pos in 0..i {
        let word_idx = bit_pos / 64;
        let bit_idx = bit_pos % 64;
        if (words[word_idx] >> bit_idx) & 1 == 1 {
            count += 1;
        }
    }
    count
}

/// Collect ranks through the trait, so both layouts go through one seam
fn scan_ranks<R: Rank>(index: &R, len: usize) -> Vec<usize> {
    (0..=len).map(|i| index.rank1(i)).collect()
}

proptest! {
    /// rank1 matches the reference implementation (512-bit blocks)
    #[test]
    fn prop_rank512_matches_reference(
        words in prop::collection::vec(any::<u64>(), 1..30),
    ) {
        let len = words.len() * 64;
        let index = RankIndex512::build(&words);

        for i in (0..=len).step_by(7) {
            prop_assert_eq!(index.rank1(i), reference_rank1(&words, i), "rank1({}) mismatch", i);
        }
        prop_assert_eq!(index.rank1(len), reference_rank1(&words, len));
    }

    /// rank1 matches the reference implementation (1024-bit blocks)
    #[test]
    fn prop_rank1024_matches_reference(
        words in prop::collection::vec(any::<u64>(), 1..40),
    ) {
        let len = words.len() * 64;
        let index = RankIndex1024::build(&words);

        for i in (0..=len).step_by(7) {
            prop_assert_eq!(index.rank1(i), reference_rank1(&words, i), "rank1({}) mismatch", i);
        }
        prop_assert_eq!(index.rank1(len), reference_rank1(&words, len));
    }

    /// Both layouts give identical answers at every position
    #[test]
    fn prop_layouts_agree(
        words in prop::collection::vec(any::<u64>(), 1..40),
    ) {
        let len = words.len() * 64;
        let narrow = RankIndex512::build(&words);
        let wide = RankIndex1024::build(&words);

        prop_assert_eq!(scan_ranks(&narrow, len), scan_ranks(&wide, len));
    }

    /// rank1 is monotonically increasing in steps of at most 1
    #[test]
    fn prop_rank_monotonic(
        words in prop::collection::vec(any::<u64>(), 1..20),
    ) {
        let len = words.len() * 64;
        let index = RankIndex512::build(&words);

        let mut prev_rank = 0;
        for i in 0..=len {
            let rank = index.rank1(i);
            prop_assert!(rank >= prev_rank,
                "rank1({}) = {} < rank1({}) = {}", i, rank, i.saturating_sub(1), prev_rank);
            prop_assert!(rank <= prev_rank + 1,
                "rank1 jumped by more than 1 at position {}", i);
            prev_rank = rank;
        }
    }

    /// The step from i to i+1 is exactly the bit at i
    #[test]
    fn prop_rank_increment_is_bit(
        words in prop::collection::vec(any::<u64>(), 1..20),
    ) {
        let len = words.len() * 64;
        let index = RankIndex1024::build(&words);

        for i in 0..len {
            let bit = (words[i / 64] >> (i % 64)) & 1;
            prop_assert_eq!(index.rank1(i + 1) - index.rank1(i), bit as usize,
                "increment mismatch at {}", i);
        }
    }

    /// rank1(num_bits) equals the total popcount
    #[test]
    fn prop_rank_at_end_is_total(
        words in prop::collection::vec(any::<u64>(), 0..100),
    ) {
        let expected: usize = words.iter().map(|w| w.count_ones() as usize).sum();
        let narrow = RankIndex512::build(&words);
        let wide = RankIndex1024::build(&words);

        prop_assert_eq!(narrow.rank1(narrow.num_bits()), expected);
        prop_assert_eq!(wide.rank1(wide.num_bits()), expected);
    }

    /// Indexing a BitArray's words is consistent with get()
    #[test]
    fn prop_bit_array_oracle(
        words in prop::collection::vec(any::<u64>(), 1..20),
        len_ratio in 0.0..1.0f64,
    ) {
        let capacity = words.len() * 64;
        let len = (len_ratio * capacity as f64) as usize;
        let bits = BitArray::from_words(words, len);
        let index = RankIndex512::build(bits.words());

        let mut expected = 0usize;
        for i in 0..len {
            prop_assert_eq!(index.rank1(i), expected, "rank1({}) mismatch", i);
            if bits.get(i) {
                expected += 1;
            }
        }
        prop_assert_eq!(expected, bits.count_ones());
        prop_assert_eq!(index.rank1(index.num_bits()), bits.count_ones());
    }

    /// get(i) matches direct word access
    #[test]
    fn prop_get_matches_words(
        words in prop::collection::vec(any::<u64>(), 1..20),
        i_ratio in 0.0..1.0f64,
    ) {
        let len = words.len() * 64;
        let bits = BitArray::from_words(words.clone(), len);
        let i = (i_ratio * len as f64) as usize;

        if i < len {
            let expected = (words[i / 64] >> (i % 64)) & 1 == 1;
            prop_assert_eq!(bits.get(i), expected);
        }
    }

    /// count_ones matches word-by-word count
    #[test]
    fn prop_count_ones(
        words in prop::collection::vec(any::<u64>(), 0..100),
    ) {
        let len = words.len() * 64;
        let expected: usize = words.iter().map(|w| w.count_ones() as usize).sum();
        let bits = BitArray::from_words(words, len);
        prop_assert_eq!(bits.count_ones(), expected);
    }
}
