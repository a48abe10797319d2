//! Keys and values stored in a [`Node`](crate::Node).
//!
//! A child entry is either a [`Scalar`], a nested [`Node`], or a group of
//! repeated items ([`ItemGroups`]) created by [`Node::add_item`].

use crate::node::Node;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Number, Value as JsonValue};
use std::fmt;
use std::ops;

/// Flat attribute map of an element.
pub type Attributes = IndexMap<String, Scalar>;

/// Repeated sibling payloads, keyed by the tag every payload is rendered with.
pub type ItemGroups = IndexMap<String, Vec<Value>>;

pub(crate) static NULL: Value = Value::Scalar(Scalar::Null);

/// Key of a child entry.
///
/// String keys that spell a canonical non-negative integer (`"0"`, `"42"`, but
/// not `"042"`) become [`Key::Index`], so `{"0": "x"}` and `["x"]` address the
/// same child.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Positional key; renders with the enclosing element's name.
    Index(usize),
    /// Named key; renders as an element of the same name.
    Name(String),
}

impl Key {
    /// Returns true for positional keys.
    pub fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }

    /// Returns the name of a named key.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }
}

fn parse_index(s: &str) -> Option<usize> {
    if s == "0" {
        return Some(0);
    }
    if s.is_empty() || s.starts_with('0') || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        match parse_index(s) {
            Some(index) => Key::Index(index),
            None => Key::Name(s.to_string()),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match parse_index(&s) {
            Some(index) => Key::Index(index),
            None => Key::Name(s),
        }
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::from(s.as_str())
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{}", index),
            Key::Name(name) => write!(f, "{}", name),
        }
    }
}

/// A leaf value: text content of an element or the value of an attribute.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    /// Returns true for [`Scalar::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Returns the string slice of a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// String form used for XML text and attribute values.
    ///
    /// Null renders empty, `true` renders `1` and `false` renders empty.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Null => String::new(),
            Scalar::Bool(true) => "1".to_string(),
            Scalar::Bool(false) => String::new(),
            Scalar::Number(n) => n.to_string(),
            Scalar::String(s) => s.clone(),
        }
    }

    /// Converts a JSON leaf. Objects and arrays yield `None`.
    pub fn from_json(value: &JsonValue) -> Option<Scalar> {
        match value {
            JsonValue::Null => Some(Scalar::Null),
            JsonValue::Bool(b) => Some(Scalar::Bool(*b)),
            JsonValue::Number(n) => Some(Scalar::Number(n.clone())),
            JsonValue::String(s) => Some(Scalar::String(s.clone())),
            JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

macro_rules! scalar_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(n: $ty) -> Self {
                    Scalar::Number(Number::from(n))
                }
            }
        )*
    };
}

scalar_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl From<f64> for Scalar {
    /// Non-finite floats have no JSON number form and become null.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Scalar::Null, Scalar::Number)
    }
}

impl From<f32> for Scalar {
    fn from(n: f32) -> Self {
        Scalar::from(f64::from(n))
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// A child entry of a [`Node`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Node(Node),
    /// Repeated item lists, see [`Node::add_item`].
    Items(ItemGroups),
}

impl Value {
    /// Returns true for a null scalar.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Scalar(Scalar::Null))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Value::Node(_))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut Node> {
        match self {
            Value::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&ItemGroups> {
        match self {
            Value::Items(groups) => Some(groups),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Node(_) => "node",
            Value::Items(_) => "item group",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Scalar(Scalar::Null)
    }
}

macro_rules! value_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(value.into())
                }
            }
        )*
    };
}

value_from_scalar!(
    Scalar, &str, String, bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64
);

impl<T: Into<Scalar>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(node)
    }
}

impl From<ItemGroups> for Value {
    fn from(groups: ItemGroups) -> Self {
        Value::Items(groups)
    }
}

impl From<JsonValue> for Value {
    /// Leaves become scalars; objects and arrays are parsed into a node with
    /// the default root name. [`Node::add_item_value`] and [`Node::set`] parse
    /// under the receiving node's root name instead.
    fn from(value: JsonValue) -> Self {
        match Scalar::from_json(&value) {
            Some(scalar) => Value::Scalar(scalar),
            None => {
                let mut node = Node::default();
                node.parse(&value);
                Value::Node(node)
            }
        }
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

macro_rules! partial_eq_number {
    ($as_fn:ident as $wide:ty => $($ty:ty),*) => {
        $(
            impl PartialEq<$ty> for Value {
                fn eq(&self, other: &$ty) -> bool {
                    match self {
                        Value::Scalar(Scalar::Number(n)) => n.$as_fn() == Some(*other as $wide),
                        _ => false,
                    }
                }
            }
        )*
    };
}

partial_eq_number!(as_i64 as i64 => i8, i16, i32, i64, isize);
partial_eq_number!(as_u64 as u64 => u8, u16, u32, u64, usize);
partial_eq_number!(as_f64 as f64 => f64);

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Scalar(Scalar::Bool(b)) if b == other)
    }
}

/// Types usable with the `[]` operator on [`Node`] and [`Value`].
pub trait AsKey {
    fn to_key(&self) -> Key;
}

impl AsKey for str {
    fn to_key(&self) -> Key {
        Key::from(self)
    }
}

impl AsKey for String {
    fn to_key(&self) -> Key {
        Key::from(self.as_str())
    }
}

impl AsKey for usize {
    fn to_key(&self) -> Key {
        Key::Index(*self)
    }
}

impl AsKey for Key {
    fn to_key(&self) -> Key {
        self.clone()
    }
}

impl<T: AsKey + ?Sized> AsKey for &T {
    fn to_key(&self) -> Key {
        (**self).to_key()
    }
}

impl<I: AsKey> ops::Index<I> for Value {
    type Output = Value;

    /// Never creates entries; absent keys and non-node values yield null.
    fn index(&self, index: I) -> &Value {
        match self {
            Value::Node(node) => &node[index],
            _ => &NULL,
        }
    }
}

impl<I: AsKey> ops::IndexMut<I> for Value {
    /// Implicitly creates the child on a node.
    ///
    /// # Panics
    ///
    /// Panics when the value is a scalar or an item group.
    fn index_mut(&mut self, index: I) -> &mut Value {
        match self {
            Value::Node(node) => node.get(index.to_key()),
            other => panic!(
                "cannot index into a {} value with key `{}`",
                other.kind(),
                index.to_key()
            ),
        }
    }
}
