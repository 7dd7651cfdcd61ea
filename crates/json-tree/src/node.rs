//! The document model: an ordered tree of typed JSON nodes.
//!
//! Object key order is insertion order and is meaningful: it is what gets
//! listed, searched and serialized. Objects are backed by [`IndexMap`] so
//! positional inserts and removals keep the remaining keys in place.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Number;

use json_tree_path::parse_index;

/// Ordered key/value storage of an object node.
pub type ObjectMap = IndexMap<String, Node>;

/// One value in the document tree.
///
/// Equality is structural; two objects with the same entries in a different
/// order compare equal. Use [`Node::same_as`] when order matters.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    /// Keeps serde_json's integer/float distinction so `1` never comes back as `1.0`.
    Number(Number),
    String(String),
    Array(Vec<Node>),
    Object(ObjectMap),
}

/// The kind of a [`Node`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Null => "Null",
            NodeKind::Bool => "Bool",
            NodeKind::Number => "Number",
            NodeKind::String => "String",
            NodeKind::Array => "Array",
            NodeKind::Object => "Object",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Array | NodeKind::Object)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::Bool(_) => NodeKind::Bool,
            Node::Number(_) => NodeKind::Number,
            Node::String(_) => NodeKind::String,
            Node::Array(_) => NodeKind::Array,
            Node::Object(_) => NodeKind::Object,
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    /// Look up a direct child by path segment.
    ///
    /// Objects treat the segment as a key, arrays as a canonical index.
    /// Scalars have no children.
    pub fn child(&self, segment: &str) -> Option<&Node> {
        match self {
            Node::Object(map) => map.get(segment),
            Node::Array(items) => parse_index(segment).and_then(|idx| items.get(idx)),
            _ => None,
        }
    }

    /// Number of direct children; zero for scalars.
    pub fn len(&self) -> usize {
        match self {
            Node::Object(map) => map.len(),
            Node::Array(items) => items.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Equality that also requires object keys in the same order.
    pub fn same_as(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Object(a), Node::Object(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|((ka, va), (kb, vb))| ka == kb && va.same_as(vb))
            }
            (Node::Array(a), Node::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_as(y))
            }
            _ => self == other,
        }
    }

    /// Single-line JSON literal of this node, as shown in the value editor.
    pub fn to_compact_string(&self) -> String {
        self.to_string()
    }

    /// Keys of an object in order, or stringified indices of an array.
    pub fn child_keys(&self) -> Vec<String> {
        match self {
            Node::Object(map) => map.keys().cloned().collect(),
            Node::Array(items) => (0..items.len()).map(|i| i.to_string()).collect(),
            _ => Vec::new(),
        }
    }
}

// ── Conversions ───────────────────────────────────────────────────────────

impl From<serde_json::Value> for Node {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Node::Null,
            serde_json::Value::Bool(b) => Node::Bool(b),
            serde_json::Value::Number(n) => Node::Number(n),
            serde_json::Value::String(s) => Node::String(s),
            serde_json::Value::Array(arr) => Node::Array(arr.into_iter().map(Node::from).collect()),
            serde_json::Value::Object(obj) => {
                Node::Object(obj.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

impl From<Node> for serde_json::Value {
    fn from(n: Node) -> Self {
        match n {
            Node::Null => serde_json::Value::Null,
            Node::Bool(b) => serde_json::Value::Bool(b),
            Node::Number(n) => serde_json::Value::Number(n),
            Node::String(s) => serde_json::Value::String(s),
            Node::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Node::Object(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, serde_json::Value::from(v))).collect(),
            ),
        }
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Node {
                fn from(n: $ty) -> Self {
                    Node::Number(Number::from(n))
                }
            }
        )*
    };
}

from_integer!(i32, i64, u32, u64, usize);

/// Non-finite floats have no JSON form and become `null`.
impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Number::from_f64(f).map(Node::Number).unwrap_or(Node::Null)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Number(n) => n.serialize(serializer),
            Node::String(s) => serializer.serialize_str(s),
            Node::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_none<E>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Node, D::Error> {
        Deserialize::deserialize(d)
    }

    fn visit_bool<E>(self, b: bool) -> Result<Node, E> {
        Ok(Node::Bool(b))
    }

    fn visit_i64<E>(self, n: i64) -> Result<Node, E> {
        Ok(Node::Number(n.into()))
    }

    fn visit_u64<E>(self, n: u64) -> Result<Node, E> {
        Ok(Node::Number(n.into()))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> Result<Node, E> {
        Number::from_f64(n)
            .map(Node::Number)
            .ok_or_else(|| E::custom("non-finite number"))
    }

    fn visit_str<E>(self, s: &str) -> Result<Node, E> {
        Ok(Node::String(s.to_string()))
    }

    fn visit_string<E>(self, s: String) -> Result<Node, E> {
        Ok(Node::String(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Node::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Node, A::Error> {
        let mut map = ObjectMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((k, v)) = access.next_entry::<String, Node>()? {
            // Duplicate keys: last value wins, first position kept.
            map.insert(k, v);
        }
        Ok(Node::Object(map))
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Node, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

/// Compact single-line JSON: `"text"`, `42`, `null`, `{"a":1}`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_of_each_variant() {
        assert_eq!(Node::Null.kind(), NodeKind::Null);
        assert_eq!(Node::from(true).kind(), NodeKind::Bool);
        assert_eq!(Node::from(3).kind(), NodeKind::Number);
        assert_eq!(Node::from("x").kind(), NodeKind::String);
        assert_eq!(Node::from(json!([])).kind(), NodeKind::Array);
        assert_eq!(Node::from(json!({})).kind(), NodeKind::Object);
        assert!(NodeKind::Array.is_container());
        assert!(!NodeKind::String.is_container());
    }

    #[test]
    fn value_conversion_keeps_key_order() {
        let node = Node::from(json!({"z": 1, "a": 2, "m": 3}));
        assert_eq!(node.child_keys(), vec!["z", "a", "m"]);
        let back = serde_json::Value::from(node);
        assert_eq!(back.to_string(), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn child_lookup_by_key_and_index() {
        let node = Node::from(json!({"a": [10, 20]}));
        let arr = node.child("a").unwrap();
        assert_eq!(arr.child("1"), Some(&Node::from(20)));
        assert_eq!(arr.child("2"), None);
        assert_eq!(arr.child("01"), None);
        assert_eq!(arr.child("x"), None);
        assert_eq!(Node::from(5).child("0"), None);
    }

    #[test]
    fn display_is_compact_json() {
        assert_eq!(Node::Null.to_string(), "null");
        assert_eq!(Node::from("hi").to_string(), "\"hi\"");
        assert_eq!(Node::from(json!(1.5)).to_string(), "1.5");
        assert_eq!(Node::from(json!({"b": [1, true]})).to_string(), r#"{"b":[1,true]}"#);
    }

    #[test]
    fn deserialize_keeps_integers_and_order() {
        let node: Node = serde_json::from_str(r#"{"y": 1, "x": 2.0}"#).unwrap();
        assert_eq!(node.child_keys(), vec!["y", "x"]);
        assert_eq!(node.to_string(), r#"{"y":1,"x":2.0}"#);
    }

    #[test]
    fn same_as_respects_key_order() {
        let ab = Node::from(json!({"a": 1, "b": [{"x": 1, "y": 2}]}));
        let ba = Node::from(json!({"b": [{"x": 1, "y": 2}], "a": 1}));
        let nested = Node::from(json!({"a": 1, "b": [{"y": 2, "x": 1}]}));
        assert_eq!(ab, ba);
        assert!(!ab.same_as(&ba));
        assert!(!ab.same_as(&nested));
        assert!(ab.same_as(&ab.clone()));
        assert!(Node::from(1).same_as(&Node::from(1)));
    }

    #[test]
    fn duplicate_keys_keep_first_position() {
        let node: Node = serde_json::from_str(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        assert_eq!(node.to_string(), r#"{"a":3,"b":2}"#);
    }
}
