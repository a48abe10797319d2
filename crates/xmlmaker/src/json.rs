//! Ingestion of generic nested values and JSON renderings of a tree.
//!
//! Any value that serializes to JSON can be poured into a [`Node`]: objects
//! and arrays become child nodes, leaves become scalars, and an
//! `@attributes` entry becomes the node's attribute map.
//!
//! # Examples
//!
//! ```
//! use xmlmaker::Node;
//! use serde_json::json;
//!
//! let mut node = Node::new("order");
//! node.parse(&json!({"@attributes": {"id": 7}, "tags": ["a", "b"]}));
//!
//! assert_eq!(node.attributes()["id"].to_text(), "7");
//! assert_eq!(node.to_json_value()?, json!({"@attributes": {"id": 7}, "tags": {"0": "a", "1": "b"}}));
//! # Ok::<(), xmlmaker::XmlMakerError>(())
//! ```

use crate::error::{Result, XmlMakerError};
use crate::node::{ATTRIBUTES_KEY, Node};
use crate::value::{Attributes, Key, Scalar, Value};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::debug;

impl Node {
    /// Ingests an object or array into this node.
    ///
    /// Leaves replace the entry under their key; nested containers replace it
    /// with a freshly parsed child node; `@attributes` replaces the attribute
    /// map. Any other input is ignored. `@items` is stored as an ordinary
    /// child node; [`Node::to_plain`] reads it back as item lists, so the JSON
    /// form of a tree parses into a tree that renders the same way.
    pub fn parse(&mut self, value: &JsonValue) {
        match value {
            JsonValue::Object(map) => {
                for (key, entry) in map {
                    self.ingest(Key::from(key.as_str()), entry);
                }
            }
            JsonValue::Array(list) => {
                for (index, entry) in list.iter().enumerate() {
                    self.ingest(Key::Index(index), entry);
                }
            }
            _ => {}
        }
    }

    fn ingest(&mut self, key: Key, value: &JsonValue) {
        if key.as_name() == Some(ATTRIBUTES_KEY) {
            self.attributes = coerce_attributes(value);
            return;
        }
        let value = self.value_from_json(value);
        self.children.insert(key, value);
    }

    fn value_from_json(&self, value: &JsonValue) -> Value {
        match Scalar::from_json(value) {
            Some(scalar) => Value::Scalar(scalar),
            None => {
                let mut child = self.spawn();
                child.parse(value);
                Value::Node(child)
            }
        }
    }

    /// Assigns any serializable value under `key`.
    ///
    /// Leaves are stored as scalars, structs, maps and sequences become child
    /// nodes. Values that cannot be represented as JSON fail with
    /// [`XmlMakerError::UnsupportedValue`].
    pub fn set<T: Serialize + ?Sized>(&mut self, key: impl Into<Key>, value: &T) -> Result<()> {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(json) => {
                self.ingest(key, &json);
                Ok(())
            }
            Err(e) => Err(XmlMakerError::UnsupportedValue {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Bracket-style assignment: like [`Node::set`], except that a value
    /// which cannot be represented is not an error. The key is replaced with an
    /// empty child node instead.
    pub fn offset_set<T: Serialize + ?Sized>(&mut self, key: impl Into<Key>, value: &T) {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(json) => self.ingest(key, &json),
            Err(e) => {
                debug!(%key, error = %e, "unsupported value replaced with an empty node");
                let empty = self.spawn();
                self.children.insert(key, Value::Node(empty));
            }
        }
    }

    /// Appends a serializable payload to the item list `item_name`.
    ///
    /// Containers are parsed into nodes first, so an `@attributes` entry in the
    /// payload becomes the attributes of the rendered item element.
    pub fn add_item_value<T: Serialize + ?Sized>(
        &mut self,
        item_name: impl Into<String>,
        data: &T,
    ) -> Result<&mut Self> {
        let item_name = item_name.into();
        let json = serde_json::to_value(data).map_err(|e| XmlMakerError::UnsupportedValue {
            key: item_name.clone(),
            reason: e.to_string(),
        })?;
        let item = self.value_from_json(&json);
        Ok(self.add_item(item_name, item))
    }

    /// Builds a tree from any serializable value.
    pub fn from_serialize<T: Serialize + ?Sized>(
        root_name: impl Into<Arc<str>>,
        value: &T,
    ) -> Result<Node> {
        let mut node = Node::new(root_name);
        let json = serde_json::to_value(value).map_err(|e| XmlMakerError::UnsupportedValue {
            key: node.root_name().to_string(),
            reason: e.to_string(),
        })?;
        node.parse(&json);
        Ok(node)
    }

    /// Builds a tree from JSON text.
    pub fn from_json_str(root_name: impl Into<Arc<str>>, json: &str) -> Result<Node> {
        let value: JsonValue = serde_json::from_str(json)?;
        let mut node = Node::new(root_name);
        node.parse(&value);
        Ok(node)
    }

    /// The plain form of this tree as a `serde_json::Value`.
    pub fn to_json_value(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(self.to_plain())?)
    }

    /// The plain form of this tree as compact JSON text.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_plain())?)
    }

    /// The plain form of this tree as indented JSON text.
    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_plain())?)
    }
}

/// Flattens whatever was given as `@attributes` into a flat map.
///
/// Object entries keep their names, array entries are named by position and a
/// lone leaf is stored under `"0"`. Nested containers are kept as their
/// compact JSON text.
pub(crate) fn coerce_attributes(value: &JsonValue) -> Attributes {
    match value {
        JsonValue::Null => Attributes::new(),
        JsonValue::Object(map) => map
            .iter()
            .map(|(name, v)| (name.clone(), flatten(v)))
            .collect(),
        JsonValue::Array(list) => list
            .iter()
            .enumerate()
            .map(|(index, v)| (index.to_string(), flatten(v)))
            .collect(),
        leaf => std::iter::once(("0".to_string(), flatten(leaf))).collect(),
    }
}

fn flatten(value: &JsonValue) -> Scalar {
    Scalar::from_json(value).unwrap_or_else(|| Scalar::String(value.to_string()))
}
