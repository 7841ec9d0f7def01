//! The message tree model.
//!
//! Every supported file format decodes into [`Node`]; the resolver and the
//! deep-key lookup only ever see this type.

use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// A node of a parsed message tree or of caller-supplied substitution data.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Sequence(Vec<Node>),
    Mapping(BTreeMap<String, Node>),
}

impl Node {
    /// An empty mapping, the tree used when a catalog has no locales at all.
    pub fn empty() -> Self {
        Node::Mapping(BTreeMap::new())
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Number(_) => "number",
            Node::Text(_) => "string",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
        }
    }

    /// Whether this node can hold children (mapping or sequence).
    pub fn is_container(&self) -> bool {
        matches!(self, Node::Sequence(_) | Node::Mapping(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Renders a scalar the way it appears inside a message: strings as-is,
    /// numbers in their decimal form. Anything else has no text form.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Node::Text(text) => Some(text.clone()),
            Node::Number(number) => Some(number_text(number)),
            _ => None,
        }
    }

    /// Renders this node as message text.
    ///
    /// Sequences collapse to their string and number elements joined by a
    /// single space; other elements are dropped silently. Mappings, booleans
    /// and null have no text form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Node::Sequence(items) => Some(
                items
                    .iter()
                    .filter_map(Node::scalar_text)
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            other => other.scalar_text(),
        }
    }
}

/// Decimal form of a number. Whole floats drop their fractional part, so `2.0`
/// in a catalog reads as `2`.
fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(f) if number.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{:.0}", f)
            }
        }
        _ => number.to_string(),
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(flag) => Node::Bool(flag),
            Value::Number(number) => Node::Number(number),
            Value::String(text) => Node::Text(text),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => Node::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Node::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

/// Decodes through [`serde_json::Value`] so that every self-describing format
/// lands on the same shape.
impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Node::from)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Null => write!(f, "null"),
            Node::Bool(flag) => write!(f, "{}", flag),
            Node::Number(number) => write!(f, "{}", number),
            Node::Text(text) => write!(f, "{:?}", text),
            Node::Sequence(items) => write!(f, "[{} items]", items.len()),
            Node::Mapping(map) => write!(f, "{{{} keys}}", map.len()),
        }
    }
}
