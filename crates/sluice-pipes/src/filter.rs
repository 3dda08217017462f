//! Label and property filters

use crate::pipe::{Path, PathItem, Pipe};
use crate::source::{BindSource, Source};
use sluice_core::{Comparison, Element, FromValue};
use std::marker::PhantomData;

/// Emits the elements whose label satisfies a comparison
///
/// Elements failing the test are consumed and never emitted. Order is
/// preserved and the path is the upstream path, since a filter adds no
/// traversal step of its own.
pub struct LabelFilterPipe<'a, E> {
    source: Source<'a, E>,
    label: String,
    comparison: Comparison,
    current: Option<E>,
}

impl<'a, E: Element + Clone + Into<PathItem> + 'a> LabelFilterPipe<'a, E> {
    pub fn new(source: Source<'a, E>, label: impl Into<String>, comparison: Comparison) -> Self {
        Self {
            source,
            label: label.into(),
            comparison,
            current: None,
        }
    }
}

impl<'a, E: Element + Clone + Into<PathItem> + 'a> Pipe for LabelFilterPipe<'a, E> {
    type Item = E;

    fn advance(&mut self) -> bool {
        self.current = None;
        while let Some(element) = self.source.pull() {
            if self.comparison.test(element.label(), self.label.as_str()) {
                self.current = Some(element);
                return true;
            }
        }
        false
    }

    fn current(&self) -> Option<&E> {
        self.current.as_ref()
    }

    fn reset(&mut self) {
        self.current = None;
        self.source.reset();
    }

    fn path(&self) -> Path {
        self.source.path()
    }
}

impl<'a, E: Element + Clone + Into<PathItem> + 'a> BindSource<'a, E> for LabelFilterPipe<'a, E> {
    fn set_source(&mut self, source: Source<'a, E>) {
        self.source = source;
        self.current = None;
    }
}

/// Emits the elements whose property satisfies a comparison
///
/// `T` is the type the property is read as. Elements without the key, or
/// whose value does not convert to `T`, are skipped.
pub struct PropertyFilterPipe<'a, E, T> {
    source: Source<'a, E>,
    key: String,
    expected: T,
    comparison: Comparison,
    current: Option<E>,
    _value: PhantomData<fn() -> T>,
}

impl<'a, E, T> PropertyFilterPipe<'a, E, T>
where
    E: Element + Clone + Into<PathItem> + 'a,
    T: FromValue + PartialOrd,
{
    pub fn new(source: Source<'a, E>, key: impl Into<String>, comparison: Comparison, expected: T) -> Self {
        Self {
            source,
            key: key.into(),
            expected,
            comparison,
            current: None,
            _value: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn accepts(&self, element: &E) -> bool {
        element
            .property(&self.key)
            .and_then(T::from_value)
            .is_some_and(|actual| self.comparison.test(&actual, &self.expected))
    }
}

impl<'a, E, T> Pipe for PropertyFilterPipe<'a, E, T>
where
    E: Element + Clone + Into<PathItem> + 'a,
    T: FromValue + PartialOrd,
{
    type Item = E;

    fn advance(&mut self) -> bool {
        self.current = None;
        while let Some(element) = self.source.pull() {
            if self.accepts(&element) {
                self.current = Some(element);
                return true;
            }
        }
        false
    }

    fn current(&self) -> Option<&E> {
        self.current.as_ref()
    }

    fn reset(&mut self) {
        self.current = None;
        self.source.reset();
    }

    fn path(&self) -> Path {
        self.source.path()
    }
}

impl<'a, E, T> BindSource<'a, E> for PropertyFilterPipe<'a, E, T>
where
    E: Element + Clone + Into<PathItem> + 'a,
    T: FromValue + PartialOrd,
{
    fn set_source(&mut self, source: Source<'a, E>) {
        self.source = source;
        self.current = None;
    }
}
