//! Pipes pulling from two or three sources in lockstep

use crate::pipe::{extend_path, Path, PathItem, Pipe};
use crate::source::Source;

/// Emits `(a, b)` pairs, one element from each source per advance
///
/// Exhausted as soon as either source is.
pub struct ZipPipe<'a, A, B> {
    first: Source<'a, A>,
    second: Source<'a, B>,
    current: Option<(A, B)>,
}

impl<'a, A, B> ZipPipe<'a, A, B>
where
    A: Clone + Into<PathItem> + 'a,
    B: Clone + Into<PathItem> + 'a,
{
    pub fn new(first: Source<'a, A>, second: Source<'a, B>) -> Self {
        Self {
            first,
            second,
            current: None,
        }
    }

    pub fn set_first_source(&mut self, source: Source<'a, A>) {
        self.first = source;
        self.current = None;
    }

    pub fn set_second_source(&mut self, source: Source<'a, B>) {
        self.second = source;
        self.current = None;
    }
}

impl<'a, A, B> Pipe for ZipPipe<'a, A, B>
where
    A: Clone + Into<PathItem> + 'a,
    B: Clone + Into<PathItem> + 'a,
{
    type Item = (A, B);

    fn advance(&mut self) -> bool {
        self.current = match (self.first.pull(), self.second.pull()) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        };
        self.current.is_some()
    }

    fn current(&self) -> Option<&(A, B)> {
        self.current.as_ref()
    }

    fn reset(&mut self) {
        self.current = None;
        self.first.reset();
        self.second.reset();
    }

    fn path(&self) -> Path {
        let mut path = self.first.path();
        path.extend(self.second.path());
        extend_path(path, self.current.as_ref())
    }
}

/// Emits `(a, b, c)` triples, one element from each source per advance
pub struct Zip3Pipe<'a, A, B, C> {
    first: Source<'a, A>,
    second: Source<'a, B>,
    third: Source<'a, C>,
    current: Option<(A, B, C)>,
}

impl<'a, A, B, C> Zip3Pipe<'a, A, B, C>
where
    A: Clone + Into<PathItem> + 'a,
    B: Clone + Into<PathItem> + 'a,
    C: Clone + Into<PathItem> + 'a,
{
    pub fn new(first: Source<'a, A>, second: Source<'a, B>, third: Source<'a, C>) -> Self {
        Self {
            first,
            second,
            third,
            current: None,
        }
    }

    pub fn set_first_source(&mut self, source: Source<'a, A>) {
        self.first = source;
        self.current = None;
    }

    pub fn set_second_source(&mut self, source: Source<'a, B>) {
        self.second = source;
        self.current = None;
    }

    pub fn set_third_source(&mut self, source: Source<'a, C>) {
        self.third = source;
        self.current = None;
    }
}

impl<'a, A, B, C> Pipe for Zip3Pipe<'a, A, B, C>
where
    A: Clone + Into<PathItem> + 'a,
    B: Clone + Into<PathItem> + 'a,
    C: Clone + Into<PathItem> + 'a,
{
    type Item = (A, B, C);

    fn advance(&mut self) -> bool {
        self.current = match (self.first.pull(), self.second.pull(), self.third.pull()) {
            (Some(a), Some(b), Some(c)) => Some((a, b, c)),
            _ => None,
        };
        self.current.is_some()
    }

    fn current(&self) -> Option<&(A, B, C)> {
        self.current.as_ref()
    }

    fn reset(&mut self) {
        self.current = None;
        self.first.reset();
        self.second.reset();
        self.third.reset();
    }

    fn path(&self) -> Path {
        let mut path = self.first.path();
        path.extend(self.second.path());
        path.extend(self.third.path());
        extend_path(path, self.current.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::modern;
    use crate::pipe::PipeExt;
    use crate::property::PropertyPipe;
    use sluice_core::Value;

    #[test]
    fn test_shortest_source_wins() {
        let pipe = ZipPipe::new(Source::sequence(vec![1i64, 2, 3]), Source::sequence(vec![true, false]));
        let pairs: Vec<_> = pipe.iter().collect();
        assert_eq!(pairs, vec![(1, true), (2, false)]);
    }

    #[test]
    fn test_names_with_ages() {
        let graph = modern();
        let people: Vec<_> = graph
            .vertices()
            .filter(|v| v.vertex().label == "person")
            .collect();

        let names = PropertyPipe::new(Source::sequence(people.clone()), ["name"]);
        let ages = PropertyPipe::new(Source::sequence(people), ["age"]);
        let mut pipe = ZipPipe::new(Source::pipe(names), Source::pipe(ages));

        assert!(pipe.advance());
        let marko = graph.vertex_by_name("marko").unwrap();
        assert_eq!(
            pipe.path(),
            vec![
                PathItem::from(marko),
                PathItem::from(Value::from("marko")),
                PathItem::from(marko),
                PathItem::from(Value::Int(29)),
                PathItem::Tuple(vec![Value::from("marko").into(), Value::Int(29).into()]),
            ]
        );
        assert_eq!(pipe.iter().count(), 3);
    }

    #[test]
    fn test_triples_reset_and_rebind() {
        let mut pipe = Zip3Pipe::new(
            Source::sequence(vec![1i64, 2]),
            Source::sequence(vec![10i64, 20]),
            Source::value(0.5),
        );
        assert_eq!(pipe.next_item(), Some((1, 10, 0.5)));
        assert_eq!(pipe.next_item(), None);

        pipe.reset();
        assert_eq!(pipe.next_item(), Some((1, 10, 0.5)));

        pipe.set_third_source(Source::sequence(vec![0.1, 0.2]));
        pipe.reset();
        let all: Vec<_> = pipe.iter().collect();
        assert_eq!(all, vec![(1, 10, 0.1), (2, 20, 0.2)]);
    }
}
