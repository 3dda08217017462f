//! Property projection

use crate::pipe::{extend_path, Path, PathItem, Pipe};
use crate::source::{BindSource, Source};
use sluice_core::{Element, Properties, Value};
use std::collections::VecDeque;

/// Emits property values of each element, one output per configured key
///
/// Keys are emitted in configuration order and the next element is pulled
/// only once every key of the current one is done. Missing keys are skipped.
/// With no keys configured, every property is emitted in key order.
pub struct PropertyPipe<'a, E> {
    source: Source<'a, E>,
    keys: Vec<String>,
    pending: VecDeque<Value>,
    current: Option<Value>,
}

impl<'a, E: Element + Clone + Into<PathItem> + 'a> PropertyPipe<'a, E> {
    pub fn new<K: Into<String>>(source: Source<'a, E>, keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            source,
            keys: keys.into_iter().map(Into::into).collect(),
            pending: VecDeque::new(),
            current: None,
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    fn buffer(&mut self, element: &E) {
        if self.keys.is_empty() {
            self.pending.extend(element.properties().values().cloned());
        } else {
            self.pending.extend(
                self.keys
                    .iter()
                    .filter_map(|key| element.property(key))
                    .cloned(),
            );
        }
    }
}

impl<'a, E: Element + Clone + Into<PathItem> + 'a> Pipe for PropertyPipe<'a, E> {
    type Item = Value;

    fn advance(&mut self) -> bool {
        loop {
            if let Some(value) = self.pending.pop_front() {
                self.current = Some(value);
                return true;
            }
            match self.source.pull() {
                Some(element) => self.buffer(&element),
                None => {
                    self.current = None;
                    return false;
                }
            }
        }
    }

    fn current(&self) -> Option<&Value> {
        self.current.as_ref()
    }

    fn reset(&mut self) {
        self.pending.clear();
        self.current = None;
        self.source.reset();
    }

    fn path(&self) -> Path {
        extend_path(self.source.path(), self.current.as_ref())
    }
}

impl<'a, E: Element + Clone + Into<PathItem> + 'a> BindSource<'a, E> for PropertyPipe<'a, E> {
    fn set_source(&mut self, source: Source<'a, E>) {
        self.source = source;
        self.pending.clear();
        self.current = None;
    }
}

/// Emits the property map of each element as one `Value::Map`
///
/// Restricted to the configured keys when any are given.
pub struct PropertiesPipe<'a, E> {
    source: Source<'a, E>,
    keys: Vec<String>,
    current: Option<Value>,
}

impl<'a, E: Element + Clone + Into<PathItem> + 'a> PropertiesPipe<'a, E> {
    pub fn new(source: Source<'a, E>) -> Self {
        Self {
            source,
            keys: Vec::new(),
            current: None,
        }
    }

    pub fn with_keys<K: Into<String>>(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    fn project(&self, element: &E) -> Properties {
        if self.keys.is_empty() {
            return element.properties().clone();
        }
        element
            .properties()
            .iter()
            .filter(|(key, _)| self.keys.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<'a, E: Element + Clone + Into<PathItem> + 'a> Pipe for PropertiesPipe<'a, E> {
    type Item = Value;

    fn advance(&mut self) -> bool {
        self.current = match self.source.pull() {
            Some(element) => Some(Value::Map(self.project(&element))),
            None => None,
        };
        self.current.is_some()
    }

    fn current(&self) -> Option<&Value> {
        self.current.as_ref()
    }

    fn reset(&mut self) {
        self.current = None;
        self.source.reset();
    }

    fn path(&self) -> Path {
        extend_path(self.source.path(), self.current.as_ref())
    }
}

impl<'a, E: Element + Clone + Into<PathItem> + 'a> BindSource<'a, E> for PropertiesPipe<'a, E> {
    fn set_source(&mut self, source: Source<'a, E>) {
        self.source = source;
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::modern;
    use crate::pipe::PipeExt;

    #[test]
    fn test_keys_in_order() {
        let graph = modern();
        let marko = graph.vertex_by_name("marko").unwrap();

        let values: Vec<_> = PropertyPipe::new(Source::value(marko), ["name", "age"])
            .iter()
            .collect();
        assert_eq!(values, vec![Value::from("marko"), Value::Int(29)]);
    }

    #[test]
    fn test_flattens_per_element_and_skips_missing() {
        let graph = modern();
        let vertices: Vec<_> = graph.vertices().collect();

        let pipe = PropertyPipe::new(Source::sequence(vertices), ["name", "age"]);
        let values: Vec<_> = pipe.iter().map(|v| v.to_string()).collect();
        assert_eq!(
            values,
            vec!["marko", "29", "vadas", "27", "lop", "josh", "32", "ripple", "peter", "35"]
        );
    }

    #[test]
    fn test_no_keys_emits_everything() {
        let graph = modern();
        let lop = graph.vertex_by_name("lop").unwrap();

        let values: Vec<_> = PropertyPipe::new(Source::value(lop), Vec::<String>::new())
            .iter()
            .collect();
        assert_eq!(values, vec![Value::from("java"), Value::from("lop")]);
    }

    #[test]
    fn test_path_and_reset() {
        let graph = modern();
        let josh = graph.vertex_by_name("josh").unwrap();

        let mut pipe = PropertyPipe::new(Source::value(josh), ["age", "name"]);
        assert!(pipe.advance());
        assert_eq!(pipe.path(), vec![PathItem::from(josh), PathItem::from(Value::Int(32))]);

        pipe.reset();
        let replay: Vec<_> = pipe.iter().collect();
        assert_eq!(replay, vec![Value::Int(32), Value::from("josh")]);
    }

    #[test]
    fn test_properties_map() {
        let graph = modern();
        let marko = graph.vertex_by_name("marko").unwrap();

        let mut pipe = PropertiesPipe::new(Source::value(marko)).with_keys(["age"]);
        assert!(pipe.advance());
        let map = pipe.current().and_then(Value::as_map).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["age"], Value::Int(29));
        assert!(!pipe.advance());
    }
}
