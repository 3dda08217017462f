//! Comparison operators used by filters

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Relation a filter requires between an actual and an expected value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = "eq")]
    Equal,
    #[serde(rename = "ne")]
    NotEqual,
    #[serde(rename = "gt")]
    Greater,
    #[serde(rename = "ge")]
    GreaterEqual,
    #[serde(rename = "lt")]
    Less,
    #[serde(rename = "le")]
    LessEqual,
}

impl Comparison {
    /// Whether `actual <op> expected` holds
    ///
    /// Ordering operators fail on unordered pairs (e.g. a string against a
    /// number); `NotEqual` holds for them.
    pub fn test<T: PartialOrd + ?Sized>(self, actual: &T, expected: &T) -> bool {
        match self {
            Self::Equal => actual == expected,
            Self::NotEqual => actual != expected,
            _ => match actual.partial_cmp(expected) {
                Some(ordering) => self.accepts(ordering),
                None => false,
            },
        }
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Equal => ordering == Ordering::Equal,
            Self::NotEqual => ordering != Ordering::Equal,
            Self::Greater => ordering == Ordering::Greater,
            Self::GreaterEqual => ordering != Ordering::Less,
            Self::Less => ordering == Ordering::Less,
            Self::LessEqual => ordering != Ordering::Greater,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
        }
    }
}

impl FromStr for Comparison {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "eq" | "==" => Ok(Self::Equal),
            "ne" | "!=" => Ok(Self::NotEqual),
            "gt" | ">" => Ok(Self::Greater),
            "ge" | ">=" => Ok(Self::GreaterEqual),
            "lt" | "<" => Ok(Self::Less),
            "le" | "<=" => Ok(Self::LessEqual),
            _ => Err(Error::InvalidComparison(s.to_string())),
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_parse() {
        assert_eq!("eq".parse::<Comparison>().unwrap(), Comparison::Equal);
        assert_eq!("GE".parse::<Comparison>().unwrap(), Comparison::GreaterEqual);
        assert_eq!("<".parse::<Comparison>().unwrap(), Comparison::Less);
        assert!(matches!(
            "like".parse::<Comparison>(),
            Err(Error::InvalidComparison(_))
        ));
    }

    #[test]
    fn test_ordering_operators() {
        assert!(Comparison::Greater.test(&30, &29));
        assert!(!Comparison::Greater.test(&29, &29));
        assert!(Comparison::GreaterEqual.test(&29, &29));
        assert!(Comparison::Less.test("a", "b"));
        assert!(Comparison::LessEqual.test(&0.5, &0.5));
        assert!(Comparison::NotEqual.test("a", "b"));
    }

    #[test]
    fn test_unordered_values() {
        let name = Value::from("marko");
        let age = Value::Int(29);
        assert!(!Comparison::Less.test(&name, &age));
        assert!(!Comparison::GreaterEqual.test(&name, &age));
        assert!(!Comparison::Equal.test(&name, &age));
        assert!(Comparison::NotEqual.test(&name, &age));
        assert!(Comparison::Equal.test(&Value::Int(1), &Value::Float(1.0)));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Comparison::GreaterEqual).unwrap();
        assert_eq!(json, "\"ge\"");
    }
}
