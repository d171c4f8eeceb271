use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

use crate::executor::{StoredObject, Truth};
use crate::parser::literals::{Literal, TimestampParser};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ComparatorOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq
}

impl ComparatorOp {
    /// The operator with its operands swapped: `1 < x` is `x > 1`.
    pub fn flip(self) -> Self {
        match self {
            ComparatorOp::Lt => ComparatorOp::Gt,
            ComparatorOp::LtEq => ComparatorOp::GtEq,
            ComparatorOp::Gt => ComparatorOp::Lt,
            ComparatorOp::GtEq => ComparatorOp::LtEq,
            op => op,
        }
    }

    fn accepts(self, ord: Ordering) -> bool {
        match self {
            ComparatorOp::Eq => ord == Ordering::Equal,
            ComparatorOp::NotEq => ord != Ordering::Equal,
            ComparatorOp::Lt => ord == Ordering::Less,
            ComparatorOp::LtEq => ord != Ordering::Greater,
            ComparatorOp::Gt => ord == Ordering::Greater,
            ComparatorOp::GtEq => ord != Ordering::Less,
        }
    }
}

impl fmt::Display for ComparatorOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparatorOp::Eq => write!(f, "="),
            ComparatorOp::NotEq => write!(f, "<>"),
            ComparatorOp::Lt => write!(f, "<"),
            ComparatorOp::LtEq => write!(f, "<="),
            ComparatorOp::Gt => write!(f, ">"),
            ComparatorOp::GtEq => write!(f, ">="),
        }
    }
}

impl fmt::Debug for ComparatorOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComparatorOp({})", self)
    }
}

/// Left-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Property(String),
    Score,
}

/// One CONTAINS term; `excluded` terms were written with a leading `-`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTerm {
    pub text: String,
    pub excluded: bool,
}

/// Executable form of a WHERE clause.
#[derive(Debug, Clone)]
pub enum Filter {
    Compare { target: Target, op: ComparatorOp, value: Literal },
    Not(Box<Filter>),
    And(Box<Filter>, Box<Filter>),
    Or(Box<Filter>, Box<Filter>),
    In { property: String, values: Vec<Literal>, negated: bool },
    /// `ANY p [NOT] IN (...)` on a multi-valued property.
    InAny { property: String, values: Vec<Literal>, negated: bool },
    EqAny { property: String, value: Literal },
    IsNull { property: String, negated: bool },
    Like { property: String, pattern: Regex, negated: bool },
    Contains(Vec<SearchTerm>),
    InFolder(String),
    InTree(String),
}

/// Score reported for every match; there is no relevance ranking.
pub const DEFAULT_SCORE: f64 = 1.0;

impl Filter {
    /// Translate a CMISQL LIKE pattern. `%` and `_` are wildcards, a
    /// backslash escapes the next character.
    pub fn like_regex(pattern: &str) -> Result<Regex, regex::Error> {
        let mut regex = String::from("^");
        let mut chars = pattern.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '%' => regex.push_str(".*"),
                '_' => regex.push('.'),
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        regex.push_str(&regex::escape(&escaped.to_string()));
                    }
                }
                c => regex.push_str(&regex::escape(&c.to_string())),
            }
        }
        regex.push('$');
        Regex::new(&regex)
    }

    /// Split a full-text expression into terms.
    pub fn search_terms(expression: &str) -> Vec<SearchTerm> {
        expression.split_whitespace()
            .filter_map(|word| match word.strip_prefix('-') {
                Some("") => None,
                Some(rest) => Some(SearchTerm { text: rest.to_lowercase(), excluded: true }),
                None => Some(SearchTerm { text: word.to_lowercase(), excluded: false }),
            })
            .collect()
    }

    pub fn matches(&self, object: &StoredObject, objects: &IndexMap<String, StoredObject>) -> Truth {
        match self {
            Filter::Compare { target, op, value } => {
                let current = match target {
                    Target::Property(id) => object.property(id).clone(),
                    Target::Score => Value::from(DEFAULT_SCORE),
                };
                Self::compare(&current, *op, value)
            }
            Filter::Not(inner) => inner.matches(object, objects).not(),
            Filter::And(l, r) => l.matches(object, objects).and(r.matches(object, objects)),
            Filter::Or(l, r) => l.matches(object, objects).or(r.matches(object, objects)),
            Filter::In { property, values, negated } => {
                let current = object.property(property);
                let t = if current.is_null() {
                    Truth::Unknown
                } else {
                    Truth::from_bool(values.iter().any(|v| Self::compare(current, ComparatorOp::Eq, v).is_true()))
                };
                if *negated { t.not() } else { t }
            }
            Filter::InAny { property, values, negated } => {
                let items = Self::items(object.property(property));
                if items.is_empty() {
                    return Truth::Unknown;
                }
                let found = items.iter()
                    .any(|item| values.iter().any(|v| Self::compare(item, ComparatorOp::Eq, v).is_true()));
                let t = Truth::from_bool(found);
                if *negated { t.not() } else { t }
            }
            Filter::EqAny { property, value } => {
                let items = Self::items(object.property(property));
                if items.is_empty() {
                    return Truth::Unknown;
                }
                Truth::from_bool(items.iter().any(|item| Self::compare(item, ComparatorOp::Eq, value).is_true()))
            }
            Filter::IsNull { property, negated } => {
                let current = object.property(property);
                let null = current.is_null() || current.as_array().is_some_and(|a| a.is_empty());
                let t = Truth::from_bool(null);
                if *negated { t.not() } else { t }
            }
            Filter::Like { property, pattern, negated } => {
                let t = match object.property(property) {
                    Value::String(s) => Truth::from_bool(pattern.is_match(s)),
                    _ => Truth::Unknown,
                };
                if *negated { t.not() } else { t }
            }
            Filter::Contains(terms) => {
                let Some(content) = object.content.as_deref() else {
                    return Truth::False;
                };
                let content = content.to_lowercase();
                Truth::from_bool(terms.iter().all(|term| content.contains(&term.text) != term.excluded))
            }
            Filter::InFolder(folder_id) => Truth::from_bool(object.parent_ids.iter().any(|p| p == folder_id)),
            Filter::InTree(folder_id) => Truth::from_bool(Self::has_ancestor(object, folder_id, objects)),
        }
    }

    fn items(value: &Value) -> Vec<&Value> {
        match value {
            Value::Null => vec![],
            Value::Array(items) => items.iter().filter(|v| !v.is_null()).collect(),
            single => vec![single],
        }
    }

    fn has_ancestor(object: &StoredObject, folder_id: &str, objects: &IndexMap<String, StoredObject>) -> bool {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut frontier: Vec<&str> = object.parent_ids.iter().map(|s| s.as_str()).collect();
        while !frontier.is_empty() {
            if frontier.contains(&folder_id) {
                return true;
            }
            let mut next = vec![];
            for id in frontier {
                if !seen.insert(id) {
                    continue;
                }
                if let Some(parent) = objects.get(id) {
                    next.extend(parent.parent_ids.iter().map(|s| s.as_str()));
                }
            }
            frontier = next;
        }
        false
    }

    /// Compare a property value with a literal. Nulls, arrays and
    /// mismatched types are `Unknown`.
    pub fn compare(current: &Value, op: ComparatorOp, literal: &Literal) -> Truth {
        let ord = match (current, literal) {
            (Value::Bool(a), Literal::Bool(b)) => match op {
                ComparatorOp::Eq | ComparatorOp::NotEq => Some(a.cmp(b)),
                _ => None,
            },
            (Value::Number(a), Literal::Int(_) | Literal::Float(_)) => {
                match (a.as_f64(), literal.as_f64()) {
                    (Some(x), Some(y)) => x.partial_cmp(&y),
                    _ => None,
                }
            }
            (Value::String(a), Literal::String(b)) => Some(a.as_str().cmp(b.as_str())),
            (Value::String(a), Literal::DateTime(b)) => {
                TimestampParser::parse_datetime(a).map(|a| a.cmp(b))
            }
            _ => None,
        };
        match ord {
            Some(ord) => Truth::from_bool(op.accepts(ord)),
            None => Truth::Unknown,
        }
    }

    /// Ordering for ORDER BY. Nulls sort after everything else.
    pub fn sort_order(a: &Value, b: &Value) -> Ordering {
        match (a, b) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Greater,
            (_, Value::Null) => Ordering::Less,
            (Value::Number(x), Value::Number(y)) => {
                x.as_f64().partial_cmp(&y.as_f64()).unwrap_or(Ordering::Equal)
            }
            (Value::String(x), Value::String(y)) => {
                match (TimestampParser::parse_datetime(x), TimestampParser::parse_datetime(y)) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    _ => x.cmp(y),
                }
            }
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            _ => Ordering::Equal,
        }
    }
}
