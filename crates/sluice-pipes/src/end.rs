//! Leaf pipe adapting plain values, sequences and iterators

use crate::pipe::{Path, PathItem, Pipe};

enum Feed<'a, E> {
    Value { value: E, emitted: bool },
    Sequence { items: Vec<E>, position: usize },
    Iter(Box<dyn Iterator<Item = E> + 'a>),
}

/// The start of every pipe chain
///
/// Wraps a single value, an owned sequence, or an external iterator. Values
/// and sequences rewind on [`Pipe::reset`]. External iterators are one-shot:
/// resetting them is a caller error, logged as a warning, after which the
/// pipe simply continues from wherever the iterator is.
pub struct EndPipe<'a, E> {
    feed: Feed<'a, E>,
    current: Option<E>,
}

impl<'a, E> EndPipe<'a, E> {
    pub fn from_value(value: E) -> Self {
        Self {
            feed: Feed::Value {
                value,
                emitted: false,
            },
            current: None,
        }
    }

    pub fn from_sequence(items: impl IntoIterator<Item = E>) -> Self {
        Self {
            feed: Feed::Sequence {
                items: items.into_iter().collect(),
                position: 0,
            },
            current: None,
        }
    }

    pub fn from_iterator<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = E>,
        I::IntoIter: 'a,
    {
        Self {
            feed: Feed::Iter(Box::new(iter.into_iter())),
            current: None,
        }
    }

    /// Whether `reset` can replay this pipe's elements
    pub fn is_resettable(&self) -> bool {
        !matches!(self.feed, Feed::Iter(_))
    }
}

impl<E: Clone + Into<PathItem>> Pipe for EndPipe<'_, E> {
    type Item = E;

    fn advance(&mut self) -> bool {
        self.current = match &mut self.feed {
            Feed::Value { value, emitted } => {
                if *emitted {
                    None
                } else {
                    *emitted = true;
                    Some(value.clone())
                }
            }
            Feed::Sequence { items, position } => {
                let item = items.get(*position).cloned();
                if item.is_some() {
                    *position += 1;
                }
                item
            }
            Feed::Iter(iter) => iter.next(),
        };
        self.current.is_some()
    }

    fn current(&self) -> Option<&E> {
        self.current.as_ref()
    }

    fn reset(&mut self) {
        match &mut self.feed {
            Feed::Value { emitted, .. } => *emitted = false,
            Feed::Sequence { position, .. } => *position = 0,
            Feed::Iter(_) => {
                tracing::warn!("Reset requested on a one-shot iterator source; it cannot be rewound")
            }
        }
        self.current = None;
    }

    fn path(&self) -> Path {
        self.current.iter().cloned().map(Into::into).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipe::PipeExt;

    #[test]
    fn test_value_emits_once() {
        let mut pipe = EndPipe::from_value(7i64);

        assert!(pipe.current().is_none());
        assert!(pipe.advance());
        assert_eq!(pipe.current(), Some(&7));
        assert!(!pipe.advance());
        assert!(pipe.current().is_none());
    }

    #[test]
    fn test_sequence_reset_replays() {
        let mut pipe = EndPipe::from_sequence(vec![1i64, 2, 3]);

        let first: Vec<_> = std::iter::from_fn(|| pipe.next_item()).collect();
        pipe.reset();
        let second: Vec<_> = pipe.iter().collect();

        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(second, first);
    }

    #[test]
    fn test_iterator_is_one_shot() {
        let mut pipe = EndPipe::from_iterator(vec![1i64, 2]);
        assert!(!pipe.is_resettable());

        assert_eq!(pipe.next_item(), Some(1));
        assert_eq!(pipe.next_item(), Some(2));
        assert_eq!(pipe.next_item(), None);

        pipe.reset();
        assert_eq!(pipe.next_item(), None);
    }

    #[test]
    fn test_path_is_current() {
        let mut pipe = EndPipe::from_sequence(vec![10i64, 20]);
        assert!(pipe.path().is_empty());

        pipe.advance();
        pipe.advance();
        assert_eq!(pipe.path(), vec![PathItem::from(20i64)]);
    }
}
