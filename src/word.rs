//! Storage-unit helpers shared by [`BitSet`](crate::BitSet) and its iterators.

/// The fixed-width storage unit. Bit `b` of word `i` represents membership of
/// the integer `i * 64 + b`.
pub type Word = u64;

pub(crate) const WORD_SHIFT: usize = 6;
pub(crate) const WORD_MASK: usize = 0x3f;
pub(crate) const WORD_BITS: usize = Word::BITS as usize;

/// Index of the word holding `value`'s bit.
#[inline]
#[must_use]
pub(crate) fn word_index(value: usize) -> usize {
    value >> WORD_SHIFT
}

/// Single-bit mask for `value` within its word.
#[inline]
#[must_use]
pub(crate) fn bit_mask(value: usize) -> Word {
    1 << (value & WORD_MASK)
}

/// Number of words needed to hold values in `0..=max_value`.
#[inline]
#[must_use]
pub(crate) fn word_count(max_value: usize) -> usize {
    word_index(max_value) + 1
}

#[test]
fn word_index_test() {
    assert_eq!(word_index(0), 0);
    assert_eq!(word_index(63), 0);
    assert_eq!(word_index(64), 1);
    assert_eq!(word_index(200), 3);
}

#[test]
fn bit_mask_test() {
    assert_eq!(bit_mask(0), 1);
    assert_eq!(bit_mask(63), 1 << 63);
    assert_eq!(bit_mask(64), 1);
    assert_eq!(bit_mask(70), 1 << 6);
}

#[test]
fn word_count_test() {
    assert_eq!(word_count(0), 1);
    assert_eq!(word_count(63), 1);
    assert_eq!(word_count(64), 2);
}
