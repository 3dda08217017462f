//! Merge iterator draining several iterators in sequence

use std::iter::FusedIterator;

/// Presents several iterators as one sequence
///
/// Iterator 0 is drained to exhaustion, then iterator 1, and so on. The
/// index of the active iterator never moves backwards, so each iterator is
/// drained at most once.
#[derive(Debug, Clone)]
pub struct MultiIterator<I> {
    iters: Vec<I>,
    index: usize,
}

impl<I: Iterator> MultiIterator<I> {
    pub fn new(iters: Vec<I>) -> Self {
        Self { iters, index: 0 }
    }

    /// Index of the iterator currently being drained
    pub fn active_index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.iters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iters.is_empty()
    }
}

impl<I: Iterator> Iterator for MultiIterator<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(iter) = self.iters.get_mut(self.index) {
            if let Some(item) = iter.next() {
                return Some(item);
            }
            self.index += 1;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iters
            .iter()
            .skip(self.index)
            .map(Iterator::size_hint)
            .fold((0, Some(0)), |(lo, hi), (l, h)| {
                let hi = match (hi, h) {
                    (Some(a), Some(b)) => a.checked_add(b),
                    _ => None,
                };
                (lo.saturating_add(l), hi)
            })
    }
}

impl<I: Iterator> FusedIterator for MultiIterator<I> {}

impl<I: Iterator> FromIterator<I> for MultiIterator<I> {
    fn from_iter<T: IntoIterator<Item = I>>(iters: T) -> Self {
        Self::new(iters.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drains_in_order() {
        let merged = MultiIterator::new(vec![vec![1, 2].into_iter(), vec![3].into_iter()]);
        assert_eq!(merged.collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_skips_empty_iterators() {
        let parts: Vec<Vec<i32>> = vec![vec![], vec![1], vec![], vec![2, 3], vec![]];
        let merged: MultiIterator<_> = parts
            .into_iter()
            .map(Vec::into_iter)
            .collect();
        assert_eq!(merged.size_hint(), (3, Some(3)));
        assert_eq!(merged.collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_index_is_monotonic() {
        let mut merged = MultiIterator::new(vec![vec![1].into_iter(), vec![2].into_iter()]);
        let mut last = merged.active_index();

        while merged.next().is_some() {
            assert!(merged.active_index() >= last);
            last = merged.active_index();
        }
        assert_eq!(merged.active_index(), 2);
        assert_eq!(merged.next(), None);
    }

    #[test]
    fn test_empty() {
        let mut merged: MultiIterator<std::vec::IntoIter<i32>> = MultiIterator::new(vec![]);
        assert!(merged.is_empty());
        assert_eq!(merged.next(), None);
    }
}
