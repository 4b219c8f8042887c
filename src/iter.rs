use crate::word::{WORD_SHIFT, Word};

/// Iterator over the members of a [`BitSet`](crate::BitSet), in ascending
/// order.
///
/// Words are scanned low to high; within a word the least-significant set bit
/// is extracted first, so values come out strictly ascending. Produced by
/// [`BitSet::iter`](crate::BitSet::iter) and
/// [`BitSet::support`](crate::BitSet::support).
#[must_use]
#[derive(Clone, Debug)]
pub struct Support<'life> {
    words: &'life [Word],
    cursor: usize,
    current: Word,
}

impl<'life> Support<'life> {
    pub(crate) fn new(words: &'life [Word]) -> Support<'life> {
        Support {
            words,
            cursor: 0,
            current: words.first().copied().unwrap_or(0),
        }
    }
}

impl Iterator for Support<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        while self.current == 0 {
            self.cursor += 1;
            self.current = *self.words.get(self.cursor)?;
        }
        let bit = self.current.trailing_zeros() as usize;
        // Clear the lowest set bit.
        self.current &= self.current - 1;
        Some(((self.cursor << WORD_SHIFT) | bit) as i64)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.current.count_ones() as usize
            + self
                .words
                .get(self.cursor + 1..)
                .unwrap_or(&[])
                .iter()
                .map(|word| word.count_ones() as usize)
                .sum::<usize>();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Support<'_> {}

impl std::iter::FusedIterator for Support<'_> {}

#[test]
fn support_skips_zero_words() {
    let words: Vec<Word> = vec![0b101, 0, 1 << 63];
    let members: Vec<i64> = Support::new(&words).collect();
    assert_eq!(members, vec![0, 2, 191]);
}

#[test]
fn support_of_empty_storage() {
    let words: Vec<Word> = Vec::new();
    assert_eq!(Support::new(&words).next(), None);
}

#[test]
fn support_len() {
    let words: Vec<Word> = vec![0b1111, 0, 0b11];
    let mut support = Support::new(&words);
    assert_eq!(support.len(), 6);
    support.next();
    assert_eq!(support.len(), 5);
}
