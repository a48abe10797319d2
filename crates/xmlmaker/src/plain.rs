//! Node-free representation of a tree, consumed by the XML serializer.
//!
//! [`PlainMap`] keeps the attribute block and item groups as typed parts
//! instead of reserved keys. Its serde form surfaces them under the reserved
//! `@attributes` and `@items` keys, which makes it the JSON rendering of a tree:
//!
//! ```json
//! {"@attributes": {"id": "1"}, "name": "Test", "@items": {"row": [{"a": 1}]}}
//! ```

use crate::json::coerce_attributes;
use crate::node::{ATTRIBUTES_KEY, ITEMS_KEY, Node};
use crate::value::{Attributes, ItemGroups, Key, Scalar, Value};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value as JsonValue;

/// Plain item groups: tag name to ordered payloads.
pub type PlainItems = IndexMap<String, Vec<PlainValue>>;

/// A plain value: a scalar or a nested map.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum PlainValue {
    Scalar(Scalar),
    Map(PlainMap),
}

/// One ordered entry of a [`PlainMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlainEntry {
    /// A keyed child element.
    Field(Key, PlainValue),
    /// Repeated sibling elements grouped by tag.
    Items(PlainItems),
}

/// Plain form of a node: attributes plus ordered entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlainMap {
    pub attributes: Attributes,
    pub entries: Vec<PlainEntry>,
}

impl PlainMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when there are no entries. Attributes are not considered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the scalar of a map whose only entry is a non-null scalar at
    /// index `0`. Such a map renders as text content instead of a child element.
    pub fn single_text(&self) -> Option<&Scalar> {
        match self.entries.as_slice() {
            [PlainEntry::Field(Key::Index(0), PlainValue::Scalar(scalar))] if !scalar.is_null() => {
                Some(scalar)
            }
            _ => None,
        }
    }

    /// Looks up a keyed entry.
    pub fn get(&self, key: impl Into<Key>) -> Option<&PlainValue> {
        let key = key.into();
        self.entries.iter().find_map(|entry| match entry {
            PlainEntry::Field(k, v) if *k == key => Some(v),
            _ => None,
        })
    }
}

fn plain_items(groups: &ItemGroups) -> PlainItems {
    groups
        .iter()
        .map(|(tag, list)| (tag.clone(), list.iter().map(PlainValue::from).collect()))
        .collect()
}

/// Item lists read back from a plain map by `Node::parse`: each child is a tag
/// whose entries are the payloads.
fn parsed_items(groups: &Value) -> PlainItems {
    let Value::Node(groups) = groups else {
        return PlainItems::new();
    };
    groups
        .iter()
        .map(|(tag, list)| {
            let payloads = match list {
                Value::Node(list) => list.iter().map(|(_, item)| PlainValue::from(item)).collect(),
                single => vec![PlainValue::from(single)],
            };
            (tag.to_string(), payloads)
        })
        .collect()
}

/// Attributes assigned through the `@attributes` key, flattened the same way
/// `Node::parse` flattens them.
fn staged_attributes(staged: &Value) -> Attributes {
    let json = serde_json::to_value(PlainValue::from(staged)).unwrap_or(JsonValue::Null);
    coerce_attributes(&json)
}

impl From<&Node> for PlainMap {
    fn from(node: &Node) -> Self {
        let mut attributes = node.attributes().clone();
        let mut entries = Vec::with_capacity(node.len());
        for (key, value) in node {
            match (key.as_name(), value) {
                (Some(ATTRIBUTES_KEY), staged) => attributes.extend(staged_attributes(staged)),
                (_, Value::Items(groups)) => entries.push(PlainEntry::Items(plain_items(groups))),
                (Some(ITEMS_KEY), groups) => entries.push(PlainEntry::Items(parsed_items(groups))),
                (_, other) => entries.push(PlainEntry::Field(key.clone(), PlainValue::from(other))),
            }
        }
        PlainMap {
            attributes,
            entries,
        }
    }
}

impl From<&Value> for PlainValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Scalar(scalar) => PlainValue::Scalar(scalar.clone()),
            Value::Node(node) => PlainValue::Map(PlainMap::from(node)),
            // An item group used as a payload behaves like a map holding only `@items`.
            Value::Items(groups) => PlainValue::Map(PlainMap {
                attributes: Attributes::new(),
                entries: vec![PlainEntry::Items(plain_items(groups))],
            }),
        }
    }
}

impl Serialize for PlainMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let has_attributes = !self.attributes.is_empty();
        let mut map = serializer.serialize_map(Some(self.entries.len() + usize::from(has_attributes)))?;
        if has_attributes {
            map.serialize_entry(ATTRIBUTES_KEY, &self.attributes)?;
        }
        for entry in &self.entries {
            match entry {
                PlainEntry::Field(key, value) => map.serialize_entry(&key.to_string(), value)?,
                PlainEntry::Items(groups) => map.serialize_entry(ITEMS_KEY, groups)?,
            }
        }
        map.end()
    }
}
