//! Two-phase state machine behind every one-to-many traversal step

use crate::multi::MultiIterator;
use sluice_core::Direction;

/// What a fan-out step is doing between two `advance` calls
#[derive(Debug, Default)]
pub enum FanOutState<I> {
    /// No secondary iterator is open; the next pull goes upstream
    #[default]
    AwaitingUpstream,
    /// Emitting the related elements of the last upstream element
    Draining(I),
}

/// Buffered secondary iterator for one-to-many steps
///
/// For every upstream element a secondary iterator over its related elements
/// is opened and drained before the next upstream element is pulled.
/// Upstream elements with nothing related are skipped silently.
#[derive(Debug, Default)]
pub struct FanOut<I> {
    state: FanOutState<I>,
}

impl<I: Iterator> FanOut<I> {
    pub fn new() -> Self {
        Self {
            state: FanOutState::AwaitingUpstream,
        }
    }

    pub fn state(&self) -> &FanOutState<I> {
        &self.state
    }

    pub fn is_draining(&self) -> bool {
        matches!(self.state, FanOutState::Draining(_))
    }

    /// Produce the next related element
    ///
    /// `pull` yields upstream elements, `open` builds the secondary iterator
    /// for one of them. Returns `None` once upstream is exhausted.
    pub fn next_from<S>(
        &mut self,
        mut pull: impl FnMut() -> Option<S>,
        mut open: impl FnMut(&S) -> I,
    ) -> Option<I::Item> {
        loop {
            if let FanOutState::Draining(related) = &mut self.state {
                if let Some(item) = related.next() {
                    return Some(item);
                }
                self.state = FanOutState::AwaitingUpstream;
            }

            let upstream = pull()?;
            self.state = FanOutState::Draining(open(&upstream));
        }
    }

    /// Drop any open secondary iterator
    pub fn reset(&mut self) {
        self.state = FanOutState::AwaitingUpstream;
    }
}

/// Related elements selected by a [`Direction`]
///
/// `Outgoing` yields the first relation, `Incoming` the second, `Both` the
/// first followed by the second.
#[derive(Debug, Clone)]
pub enum Related<I> {
    Single(I),
    Merged(MultiIterator<I>),
}

impl<I: Iterator> Related<I> {
    pub fn select(direction: Direction, first: impl FnOnce() -> I, second: impl FnOnce() -> I) -> Self {
        match direction {
            Direction::Outgoing => Self::Single(first()),
            Direction::Incoming => Self::Single(second()),
            Direction::Both => Self::Merged(MultiIterator::new(vec![first(), second()])),
        }
    }
}

impl<I: Iterator> Iterator for Related<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Single(iter) => iter.next(),
            Self::Merged(iter) => iter.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn children(n: &u32) -> std::vec::IntoIter<u32> {
        (0..*n).map(|i| n * 10 + i).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_drains_each_upstream_element() {
        let mut upstream = vec![2u32, 1].into_iter();
        let mut fan_out = FanOut::new();

        let mut out = Vec::new();
        while let Some(x) = fan_out.next_from(|| upstream.next(), children) {
            out.push(x);
        }
        assert_eq!(out, vec![20, 21, 10]);
        assert!(!fan_out.is_draining());
    }

    #[test]
    fn test_skips_empty_relations() {
        let mut upstream = vec![0u32, 0, 3, 0].into_iter();
        let mut fan_out = FanOut::new();

        let mut out = Vec::new();
        while let Some(x) = fan_out.next_from(|| upstream.next(), children) {
            out.push(x);
        }
        assert_eq!(out, vec![30, 31, 32]);
    }

    #[test]
    fn test_state_transitions() {
        let mut upstream = vec![2u32].into_iter();
        let mut fan_out = FanOut::new();
        assert!(matches!(fan_out.state(), FanOutState::AwaitingUpstream));

        assert_eq!(fan_out.next_from(|| upstream.next(), children), Some(20));
        assert!(fan_out.is_draining());

        fan_out.reset();
        assert!(matches!(fan_out.state(), FanOutState::AwaitingUpstream));
        assert_eq!(fan_out.next_from(|| upstream.next(), children), None);
    }

    #[test]
    fn test_related_selection() {
        let first = || vec![1, 2].into_iter();
        let second = || vec![3].into_iter();

        let out: Vec<_> = Related::select(Direction::Outgoing, first, second).collect();
        assert_eq!(out, vec![1, 2]);
        let inc: Vec<_> = Related::select(Direction::Incoming, first, second).collect();
        assert_eq!(inc, vec![3]);
        let both: Vec<_> = Related::select(Direction::Both, first, second).collect();
        assert_eq!(both, vec![1, 2, 3]);
    }
}
