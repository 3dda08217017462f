//! Upstream binding shared by every transforming pipe

use crate::end::EndPipe;
use crate::pipe::{Path, PathItem, Pipe};

/// The upstream slot of a pipe
///
/// Exactly one of a single value, a sequence, an external iterator or
/// another pipe. Raw sources are wrapped in an [`EndPipe`], so the slot
/// always holds a pipe and reset/path requests are simply forwarded.
pub struct Source<'a, S> {
    pipe: Box<dyn Pipe<Item = S> + 'a>,
}

impl<'a, S: Clone + Into<PathItem> + 'a> Source<'a, S> {
    pub fn value(value: S) -> Self {
        Self::pipe(EndPipe::from_value(value))
    }

    pub fn sequence(items: impl IntoIterator<Item = S>) -> Self {
        Self::pipe(EndPipe::from_sequence(items))
    }

    /// Bind a one-shot iterator; see [`EndPipe`] for the reset caveat
    pub fn iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: 'a,
    {
        Self::pipe(EndPipe::from_iterator(iter))
    }

    pub fn pipe(pipe: impl Pipe<Item = S> + 'a) -> Self {
        Self {
            pipe: Box::new(pipe),
        }
    }

    pub fn boxed(pipe: Box<dyn Pipe<Item = S> + 'a>) -> Self {
        Self { pipe }
    }
}

impl<'a, S: Clone + Into<PathItem>> Source<'a, S> {
    /// Pull the next upstream element
    pub fn pull(&mut self) -> Option<S> {
        self.pipe.next_item()
    }

    pub fn current(&self) -> Option<&S> {
        self.pipe.current()
    }

    pub fn reset(&mut self) {
        self.pipe.reset();
    }

    pub fn path(&self) -> Path {
        self.pipe.path()
    }

    pub fn into_pipe(self) -> Box<dyn Pipe<Item = S> + 'a> {
        self.pipe
    }
}

impl<'a, S: Clone + Into<PathItem> + 'a> From<Vec<S>> for Source<'a, S> {
    fn from(items: Vec<S>) -> Self {
        Self::sequence(items)
    }
}

impl<'a, S> From<Box<dyn Pipe<Item = S> + 'a>> for Source<'a, S> {
    fn from(pipe: Box<dyn Pipe<Item = S> + 'a>) -> Self {
        Self { pipe }
    }
}

impl<S> std::fmt::Debug for Source<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source").finish_non_exhaustive()
    }
}

/// Rebinding the upstream of a single-source pipe
///
/// Implementors replace the old source and discard every piece of
/// intermediate state derived from it.
pub trait BindSource<'a, S: Clone + Into<PathItem> + 'a> {
    fn set_source(&mut self, source: Source<'a, S>);

    fn set_source_value(&mut self, value: S) {
        self.set_source(Source::value(value));
    }

    fn set_source_sequence(&mut self, items: Vec<S>) {
        self.set_source(Source::sequence(items));
    }

    fn set_source_iter<I>(&mut self, iter: I)
    where
        Self: Sized,
        I: IntoIterator<Item = S>,
        I::IntoIter: 'a,
    {
        self.set_source(Source::iter(iter));
    }

    fn set_source_pipe<P>(&mut self, pipe: P)
    where
        Self: Sized,
        P: Pipe<Item = S> + 'a,
    {
        self.set_source(Source::pipe(pipe));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kinds() {
        let mut single = Source::value(1i64);
        assert_eq!(single.pull(), Some(1));
        assert_eq!(single.pull(), None);

        let mut seq: Source<'_, i64> = vec![1, 2].into();
        assert_eq!(seq.pull(), Some(1));
        assert_eq!(seq.current(), Some(&1));
        seq.reset();
        assert_eq!(seq.pull(), Some(1));

        let mut iter = Source::iter((5i64..7).map(|x| x * 2));
        assert_eq!(iter.pull(), Some(10));
        assert_eq!(iter.path(), vec![PathItem::from(10i64)]);
    }

    #[test]
    fn test_pipe_source_forwards() {
        let mut source = Source::pipe(EndPipe::from_sequence(vec![3i64, 4]));
        assert_eq!(source.pull(), Some(3));
        assert_eq!(source.pull(), Some(4));
        assert_eq!(source.pull(), None);

        source.reset();
        assert_eq!(source.pull(), Some(3));
    }
}
