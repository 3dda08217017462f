//! Property values attached to vertices and edges

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Property map of an element, ordered by key
pub type Properties = BTreeMap<String, Value>;

/// A tagged property value
///
/// Serialized untagged, so a graph document can use plain JSON scalars:
/// `{"age": 29, "name": "marko"}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Properties),
}

impl Value {
    /// Parse a command-line literal: integer, float, boolean, else string
    ///
    /// Only finite numbers become floats, so words such as `nan` or `inf`
    /// stay strings.
    pub fn from_literal(s: &str) -> Self {
        if let Ok(i) = s.parse::<i64>() {
            return Self::Int(i);
        }
        if let Some(f) = s.parse::<f64>().ok().filter(|f| f.is_finite()) {
            return Self::Float(f);
        }
        match s {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            "null" => Self::Null,
            _ => Self::String(s.to_string()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view; integers widen to floats
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Properties> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}

/// Exact ordering of an integer against a float
///
/// Going through `i as f64` would round integers beyond 2^53 and make
/// equality intransitive.
fn cmp_int_float(i: i64, f: f64) -> Option<Ordering> {
    // 2^63, the first float past i64::MAX
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() {
        return None;
    }
    if f >= BOUND {
        return Some(Ordering::Less);
    }
    if f < -BOUND {
        return Some(Ordering::Greater);
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0f64.partial_cmp(&(f - whole)),
        unequal => Some(unequal),
    }
}

fn cmp_numbers(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
        (Value::Int(x), Value::Float(y)) => cmp_int_float(*x, *y),
        (Value::Float(x), Value::Int(y)) => cmp_int_float(*y, *x).map(Ordering::reverse),
        _ => None,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (a, b) => cmp_numbers(a, b) == Some(Ordering::Equal),
        }
    }
}

impl PartialOrd for Value {
    /// Same-kind values are ordered; `Int` and `Float` compare numerically.
    /// Anything else is unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => a.partial_cmp(b),
            (Self::String(a), Self::String(b)) => a.partial_cmp(b),
            (Self::List(a), Self::List(b)) => a.partial_cmp(b),
            (a, b) => cmp_numbers(a, b),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::String(s) => write!(f, "{}", s),
            Self::List(_) | Self::Map(_) => {
                let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
                write!(f, "{}", json)
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<Properties> for Value {
    fn from(map: Properties) -> Self {
        Self::Map(map)
    }
}

/// Type-checked extraction of a Rust value from a [`Value`]
///
/// Returns `None` when the value holds a different kind.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_literal() {
        assert_eq!(Value::from_literal("42"), Value::Int(42));
        assert_eq!(Value::from_literal("0.5"), Value::Float(0.5));
        assert_eq!(Value::from_literal("true"), Value::Bool(true));
        assert_eq!(Value::from_literal("lop"), Value::String("lop".to_string()));
    }

    #[test]
    fn test_non_finite_literals_are_strings() {
        for word in ["nan", "NaN", "inf", "-inf", "Infinity"] {
            assert_eq!(Value::from_literal(word), Value::from(word));
        }
        assert_eq!(Value::from_literal("1e3"), Value::Float(1000.0));
    }

    #[test]
    fn test_numeric_comparison() {
        assert_eq!(Value::Int(2), Value::Float(2.0));
        assert!(Value::Int(3) > Value::Float(2.5));
        assert!(Value::String("a".into()) < Value::String("b".into()));
        assert_eq!(Value::Int(1).partial_cmp(&Value::from("1")), None);
    }

    #[test]
    fn test_large_int_float_comparison_is_exact() {
        let big = 1i64 << 53;
        let float = Value::Float(big as f64);

        assert_eq!(Value::Int(big), float);
        assert_ne!(Value::Int(big + 1), float);
        assert!(Value::Int(big + 1) > float);
        assert!(float < Value::Int(big + 1));
        assert!(Value::Int(i64::MAX) < Value::Float(9.3e18));
        assert!(Value::Int(-3) > Value::Float(-3.5));
        assert!(Value::Int(2) < Value::Float(2.5));
        assert_eq!(Value::Int(0).partial_cmp(&Value::Float(f64::NAN)), None);
    }

    #[test]
    fn test_from_value_mismatch() {
        let name = Value::from("josh");
        assert_eq!(i64::from_value(&name), None);
        assert_eq!(String::from_value(&name), Some("josh".to_string()));
        assert_eq!(f64::from_value(&Value::Int(7)), Some(7.0));
    }

    #[test]
    fn test_untagged_json() {
        let props: Properties =
            serde_json::from_str(r#"{"age": 29, "weight": 0.4, "name": "marko", "tags": ["a"]}"#)
                .unwrap();
        assert_eq!(props["age"], Value::Int(29));
        assert_eq!(props["weight"], Value::Float(0.4));
        assert_eq!(props["name"].as_str(), Some("marko"));
        assert_eq!(props["tags"], Value::List(vec![Value::from("a")]));
    }
}
