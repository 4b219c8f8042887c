use std::hash::Hash;
use std::iter::zip;
use std::ops::{BitAnd, BitOr, Sub};

use sorted_iter::SortedIterator;
use sorted_iter::assume::AssumeSortedByItemExt;

use crate::iter::Support;
use crate::word::{WORD_BITS, WORD_SHIFT, Word, bit_mask, word_count, word_index};

/// A growable set of non-negative integers backed by a packed word vector.
///
/// Each bit of the backing store represents one integer, so the set is
/// compact and fast over dense domains. Membership, insertion, and removal
/// are O(1); the binary set operations and enumeration are O(word count).
///
/// Every operation is total: negative values and queries beyond the current
/// capacity degrade to no-ops or `false` rather than failing, so callers
/// never need to pre-validate input.
///
/// # Construction
///
/// ```
/// use setwise::BitSet;
///
/// let empty = BitSet::new();
/// let primes = BitSet::from_values(&[2, 3, 5, 7]);
/// let collected: BitSet = (0..10).filter(|n| n % 3 == 0).collect();
/// ```
///
/// # Mutation and membership
///
/// `insert` and `remove` mutate in place and return `&mut Self` for
/// chaining:
///
/// ```
/// use setwise::BitSet;
///
/// let mut set = BitSet::new();
/// set.insert(3).insert(200).remove(3);
/// assert!(set.contains(200));
/// assert!(!set.contains(3));
/// assert_eq!(set.len(), 1);
/// ```
///
/// # Set algebra
///
/// `intersection`, `union`, and `difference` leave both operands untouched
/// and return a fresh set; `&a & &b`, `&a | &b`, and `&a - &b` are sugar for
/// them:
///
/// ```
/// use setwise::BitSet;
///
/// let a = BitSet::from_values(&[1, 2, 3]);
/// let b = BitSet::from_values(&[1, 3, 4]);
/// let members: Vec<i64> = (&a & &b).iter().collect();
/// assert_eq!(members, vec![1, 3]);
/// ```
///
/// # Enumeration
///
/// [`iter`](BitSet::iter) yields members in ascending order;
/// [`visit`](BitSet::visit) drives a callback that can stop the scan early.
///
/// Equality and hashing consider membership only. Trailing all-zero words
/// left behind by `remove` are ignored.
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct BitSet {
    words: Vec<Word>,
    len: usize,
}

impl BitSet {
    /// Creates an empty set without allocating.
    pub fn new() -> BitSet {
        BitSet::default()
    }

    /// Creates a set from a slice of values.
    ///
    /// Duplicates are counted once and negative values are skipped. The
    /// backing store is sized from the largest non-negative value, so a mix
    /// of negative and non-negative input never over-allocates.
    ///
    /// ```
    /// use setwise::BitSet;
    ///
    /// let set = BitSet::from_values(&[8, -1, 3, 3]);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn from_values(values: &[i64]) -> BitSet {
        let max = values.iter().copied().max();
        let Some(max) = max.and_then(|max| usize::try_from(max).ok()) else {
            return BitSet::new();
        };

        let mut set = BitSet {
            words: vec![0; word_count(max)],
            len: 0,
        };
        for &value in values {
            set.insert(value);
        }
        set
    }

    /// Number of members currently in the set. O(1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Tests membership of `value`.
    ///
    /// `false` for negative values and for values beyond the backing store.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        let Ok(value) = usize::try_from(value) else {
            return false;
        };
        match self.words.get(word_index(value)) {
            Some(word) => word & bit_mask(value) != 0,
            None => false,
        }
    }

    /// Inserts `value`, growing the backing store if needed.
    ///
    /// Negative values are a silent no-op. The cardinality changes only on
    /// an actual 0 → 1 transition, so repeated inserts are idempotent.
    pub fn insert(&mut self, value: i64) -> &mut Self {
        let Ok(value) = usize::try_from(value) else {
            return self;
        };

        let index = word_index(value);
        if index >= self.words.len() {
            self.words.resize(index + 1, 0);
        }

        let mask = bit_mask(value);
        if self.words[index] & mask == 0 {
            self.words[index] |= mask;
            self.len += 1;
        }
        self
    }

    /// Removes `value` if present.
    ///
    /// Negative or out-of-range values are a silent no-op. The backing store
    /// never shrinks here; only binary operations trim their result.
    pub fn remove(&mut self, value: i64) -> &mut Self {
        let Ok(value) = usize::try_from(value) else {
            return self;
        };

        let index = word_index(value);
        let Some(word) = self.words.get_mut(index) else {
            return self;
        };

        let mask = bit_mask(value);
        if *word & mask != 0 {
            *word &= !mask;
            self.len -= 1;
        }
        self
    }

    /// Removes every member, keeping the allocated storage.
    pub fn clear_all(&mut self) {
        for word in &mut self.words {
            *word = 0;
        }
        self.len = 0;
    }

    /// Drops trailing all-zero words. Membership and cardinality are
    /// unchanged; repeated trims are idempotent.
    fn trim(&mut self) {
        let keep = self
            .words
            .iter()
            .rposition(|word| *word != 0)
            .map_or(0, |index| index + 1);
        self.words.truncate(keep);
    }

    /// Recomputes cardinality from the stored bits.
    ///
    /// Binary operations use this instead of combining the operands' cached
    /// counts, since masking can clear previously-set bits.
    fn recount(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    fn from_words(words: Vec<Word>) -> BitSet {
        let mut set = BitSet { words, len: 0 };
        set.len = set.recount();
        set.trim();
        set
    }

    /// Members present in both `self` and `other`. Commutative.
    pub fn intersection(&self, other: &BitSet) -> BitSet {
        let shared = self.words.len().min(other.words.len());
        let words = zip(&self.words[..shared], &other.words[..shared])
            .map(|(left, right)| left & right)
            .collect();
        BitSet::from_words(words)
    }

    /// Members present in either `self` or `other`. Commutative.
    pub fn union(&self, other: &BitSet) -> BitSet {
        let (longer, shorter) = if self.words.len() >= other.words.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut words = longer.words.clone();
        for (word, other_word) in zip(&mut words, &shorter.words) {
            *word |= other_word;
        }
        BitSet::from_words(words)
    }

    /// Members of `self` that are not members of `other`.
    ///
    /// `other`'s bits beyond `self`'s length have nothing to subtract from
    /// and are ignored.
    pub fn difference(&self, other: &BitSet) -> BitSet {
        let mut words = self.words.clone();
        for (word, other_word) in zip(&mut words, &other.words) {
            *word &= !other_word;
        }
        BitSet::from_words(words)
    }

    /// `true` if `self` and `other` share no members.
    #[must_use]
    pub fn is_disjoint(&self, other: &BitSet) -> bool {
        zip(&self.words, &other.words).all(|(left, right)| left & right == 0)
    }

    /// `true` if every member of `self` is a member of `other`.
    #[must_use]
    pub fn is_subset(&self, other: &BitSet) -> bool {
        let shared = self.words.len().min(other.words.len());
        zip(&self.words[..shared], &other.words[..shared]).all(|(left, right)| left & !right == 0)
            && self.words[shared..].iter().all(|word| *word == 0)
    }

    /// Iterates the members in ascending order.
    pub fn iter(&self) -> Support<'_> {
        Support::new(&self.words)
    }

    /// The members as a sorted iterator, for merging with other sorted
    /// sequences.
    pub fn support(&self) -> impl SortedIterator<Item = i64> {
        self.iter().assume_sorted_by_item()
    }

    /// Smallest member, or `None` if the set is empty.
    #[must_use]
    pub fn min_support(&self) -> Option<i64> {
        self.words
            .iter()
            .enumerate()
            .find(|(_, word)| **word != 0)
            .map(|(index, word)| ((index << WORD_SHIFT) | word.trailing_zeros() as usize) as i64)
    }

    /// Largest member, or `None` if the set is empty.
    #[must_use]
    pub fn max_support(&self) -> Option<i64> {
        self.words
            .iter()
            .enumerate()
            .rev()
            .find(|(_, word)| **word != 0)
            .map(|(index, word)| {
                ((index << WORD_SHIFT) + (WORD_BITS - 1 - word.leading_zeros() as usize)) as i64
            })
    }

    /// Calls `visitor` with each member in ascending order.
    ///
    /// The scan stops as soon as `visitor` returns `true`; the return value
    /// reports whether it was stopped early. Each call re-scans from the
    /// smallest member.
    ///
    /// ```
    /// use setwise::BitSet;
    ///
    /// let set = BitSet::from_values(&[1, 2, 10, 99]);
    /// let mut seen = Vec::new();
    /// let aborted = set.visit(|value| {
    ///     seen.push(value);
    ///     value >= 10
    /// });
    /// assert!(aborted);
    /// assert_eq!(seen, vec![1, 2, 10]);
    /// ```
    pub fn visit<Visitor>(&self, mut visitor: Visitor) -> bool
    where
        Visitor: FnMut(i64) -> bool,
    {
        for value in self.iter() {
            if visitor(value) {
                return true;
            }
        }
        false
    }

    /// Assigns each value in `0..bound` a random membership.
    pub fn assign_random(&mut self, bound: usize, random_number_generator: &mut impl rand::Rng) {
        for value in 0..bound {
            if random_number_generator.r#gen() {
                self.insert(value as i64);
            } else {
                self.remove(value as i64);
            }
        }
    }
}

impl PartialEq for BitSet {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        let shared = self.words.len().min(other.words.len());
        self.words[..shared] == other.words[..shared]
            && self.words[shared..].iter().all(|word| *word == 0)
            && other.words[shared..].iter().all(|word| *word == 0)
    }
}

impl Eq for BitSet {}

impl Hash for BitSet {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        let tail = self
            .words
            .iter()
            .rposition(|word| *word != 0)
            .map_or(0, |index| index + 1);
        self.words[..tail].hash(state);
    }
}

impl FromIterator<i64> for BitSet {
    fn from_iter<Iterator: IntoIterator<Item = i64>>(iterator: Iterator) -> Self {
        let mut set = BitSet::new();
        set.extend(iterator);
        set
    }
}

impl Extend<i64> for BitSet {
    fn extend<Iterator: IntoIterator<Item = i64>>(&mut self, iterator: Iterator) {
        for value in iterator {
            self.insert(value);
        }
    }
}

impl<'life> IntoIterator for &'life BitSet {
    type Item = i64;
    type IntoIter = Support<'life>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl BitAnd for &BitSet {
    type Output = BitSet;

    fn bitand(self, rhs: &BitSet) -> BitSet {
        self.intersection(rhs)
    }
}

impl BitOr for &BitSet {
    type Output = BitSet;

    fn bitor(self, rhs: &BitSet) -> BitSet {
        self.union(rhs)
    }
}

impl Sub for &BitSet {
    type Output = BitSet;

    fn sub(self, rhs: &BitSet) -> BitSet {
        self.difference(rhs)
    }
}
