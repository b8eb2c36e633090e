/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::HashMap;
use std::fmt;

/// Node value
///
/// Nodes are the format-agnostic values attached to shapes as trait values and
/// model metadata. They are accessed like JSON data: a tree of scalars, arrays,
/// and string-keyed objects.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Object node
    Object(HashMap<String, Node>),
    /// Array node
    Array(Vec<Node>),
    /// Number node
    Number(Number),
    /// String node
    String(String),
    /// Boolean node
    Bool(bool),
    /// Null node
    Null,
}

/// A number type that implements Javascript / JSON semantics, modeled on serde_json:
/// <https://docs.serde.rs/src/serde_json/number.rs.html#20-22>
///
/// Conversions from integers always produce [`Number::PosInt`] for non-negative values
/// so that the same literal compares equal regardless of its source type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Unsigned 64-bit integer value.
    PosInt(u64),
    /// Signed 64-bit integer value. Always less than zero when built from a conversion.
    NegInt(i64),
    /// 64-bit floating-point value.
    Float(f64),
}

impl Number {
    /// Returns the value as an `i64` if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::PosInt(v) => i64::try_from(v).ok(),
            Number::NegInt(v) => Some(v),
            Number::Float(_) => None,
        }
    }

    /// Returns the value as an `f64`, possibly losing precision.
    pub fn to_f64_lossy(&self) -> f64 {
        match *self {
            Number::PosInt(v) => v as f64,
            Number::NegInt(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    /// Returns true if this is a floating-point number.
    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Number::PosInt(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        if value < 0 {
            Number::NegInt(value)
        } else {
            Number::PosInt(value as u64)
        }
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::PosInt(v) => write!(f, "{v}"),
            Number::NegInt(v) => write!(f, "{v}"),
            Number::Float(v) => write!(f, "{v}"),
        }
    }
}

/// The kind of a [`Node`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Object node
    Object,
    /// Array node
    Array,
    /// Number node
    Number,
    /// String node
    String,
    /// Boolean node
    Boolean,
    /// Null node
    Null,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeType::Object => "object",
            NodeType::Array => "array",
            NodeType::Number => "number",
            NodeType::String => "string",
            NodeType::Boolean => "boolean",
            NodeType::Null => "null",
        })
    }
}

impl Node {
    /// Returns an empty object node.
    pub fn empty_object() -> Self {
        Node::Object(HashMap::new())
    }

    /// Returns the kind of this node.
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Object(_) => NodeType::Object,
            Node::Array(_) => NodeType::Array,
            Node::Number(_) => NodeType::Number,
            Node::String(_) => NodeType::String,
            Node::Bool(_) => NodeType::Boolean,
            Node::Null => NodeType::Null,
        }
    }

    /// Returns the string value, if this is a string node.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a boolean node.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the number, if this is a number node.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Node::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the elements, if this is an array node.
    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the entries, if this is an object node.
    pub fn as_object(&self) -> Option<&HashMap<String, Node>> {
        match self {
            Node::Object(values) => Some(values),
            _ => None,
        }
    }

    /// Returns true if this is the null node.
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_owned())
    }
}

impl From<Vec<Node>> for Node {
    fn from(values: Vec<Node>) -> Self {
        Node::Array(values)
    }
}

impl From<HashMap<String, Node>> for Node {
    fn from(values: HashMap<String, Node>) -> Self {
        Node::Object(values)
    }
}

impl From<Number> for Node {
    fn from(value: Number) -> Self {
        Node::Number(value)
    }
}

impl From<u64> for Node {
    fn from(value: u64) -> Self {
        Node::Number(Number::PosInt(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Number(value.into())
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Number((value as i64).into())
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Number(Number::Float(value))
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Node::Null,
            Value::Bool(value) => Node::Bool(value),
            Value::Number(value) => Node::Number(if let Some(v) = value.as_u64() {
                Number::PosInt(v)
            } else if let Some(v) = value.as_i64() {
                Number::NegInt(v)
            } else {
                Number::Float(value.as_f64().unwrap_or(f64::NAN))
            }),
            Value::String(value) => Node::String(value),
            Value::Array(values) => Node::Array(values.into_iter().map(Node::from).collect()),
            Value::Object(values) => Node::Object(
                values
                    .into_iter()
                    .map(|(key, value)| (key, Node::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&Node> for serde_json::Value {
    fn from(node: &Node) -> Self {
        use serde_json::Value;
        match node {
            Node::Null => Value::Null,
            Node::Bool(value) => Value::Bool(*value),
            Node::Number(Number::PosInt(v)) => Value::from(*v),
            Node::Number(Number::NegInt(v)) => Value::from(*v),
            // Non-finite floats have no JSON representation.
            Node::Number(Number::Float(v)) => serde_json::Number::from_f64(*v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Node::String(value) => Value::String(value.clone()),
            Node::Array(values) => Value::Array(values.iter().map(Value::from).collect()),
            Node::Object(values) => Value::Object(
                values
                    .iter()
                    .map(|(key, value)| (key.clone(), Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::Value::from(self))
    }
}

#[cfg(test)]
mod test {
    use super::{Node, NodeType, Number};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn integer_conversions_normalize_sign() {
        assert_eq!(Node::from(42), Node::from(42u64));
        assert_eq!(Node::from(42i64), Node::Number(Number::PosInt(42)));
        assert_eq!(Node::from(-7), Node::Number(Number::NegInt(-7)));
        assert_eq!(Number::from(-7i64).as_i64(), Some(-7));
        assert_eq!(Number::PosInt(u64::MAX).as_i64(), None);
        assert_eq!(Number::Float(1.5).as_i64(), None);
    }

    #[test]
    fn accessors() {
        let node = Node::from(vec![Node::from("a"), Node::Bool(true), Node::Null]);
        let items = node.as_array().unwrap();
        assert_eq!(items[0].as_str(), Some("a"));
        assert_eq!(items[1].as_bool(), Some(true));
        assert!(items[2].is_null());
        assert_eq!(node.node_type(), NodeType::Array);
        assert_eq!(node.as_object(), None);
        assert_eq!(Node::empty_object().node_type().to_string(), "object");
    }

    #[test]
    fn from_json_value() {
        let json = serde_json::json!({
            "name": "x",
            "count": 3,
            "delta": -2,
            "ratio": 0.25,
            "tags": ["a", null],
            "enabled": false
        });
        let mut expected = HashMap::new();
        expected.insert("name".to_string(), Node::from("x"));
        expected.insert("count".to_string(), Node::from(3));
        expected.insert("delta".to_string(), Node::from(-2));
        expected.insert("ratio".to_string(), Node::from(0.25));
        expected.insert(
            "tags".to_string(),
            Node::from(vec![Node::from("a"), Node::Null]),
        );
        expected.insert("enabled".to_string(), Node::from(false));
        assert_eq!(Node::from(json.clone()), Node::Object(expected));
        assert_eq!(serde_json::Value::from(&Node::from(json.clone())), json);
    }

    #[test]
    fn non_finite_float_renders_as_null() {
        assert_eq!(
            serde_json::Value::from(&Node::from(f64::INFINITY)),
            serde_json::Value::Null
        );
    }

    #[test]
    fn display_renders_json() {
        assert_eq!(Node::from(vec![Node::from(1), Node::from("a")]).to_string(), r#"[1,"a"]"#);
    }
}
