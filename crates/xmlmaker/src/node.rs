//! The implicitly constructed XML tree.
//!
//! A [`Node`] owns an ordered map of children and a flat attribute map.
//! Reading an absent key through [`Node::get`] (or the `[]` operator on a
//! mutable node) stores an empty child node under that key and hands it back,
//! so whole paths can be built without declaring them first:
//!
//! ```
//! use xmlmaker::Node;
//!
//! let mut doc = Node::new("root");
//! doc["item"]["name"] = "Test".into();
//! doc.child("item")?.set_attribute("id", "1");
//!
//! assert!(doc.to_xml()?.contains(r#"<root><item id="1"><name>Test</name></item></root>"#));
//! # Ok::<(), xmlmaker::XmlMakerError>(())
//! ```

use crate::error::{Result, XmlMakerError};
use crate::plain::PlainMap;
use crate::value::{AsKey, Attributes, ItemGroups, Key, NULL, Scalar, Value};
use crate::xml;
use indexmap::IndexMap;
use indexmap::map::{Iter, IterMut};
use std::fmt;
use std::ops;
use std::sync::Arc;
use tracing::trace;

/// Root tag used when none is given.
pub const DEFAULT_ROOT_NAME: &str = "root";

/// Key under which [`Node::add_item`] keeps its item groups.
pub const ITEMS_KEY: &str = "@items";

/// Reserved name of the attribute block in plain and JSON representations.
pub const ATTRIBUTES_KEY: &str = "@attributes";

/// One vertex of the tree: ordered children, flat attributes, and the root
/// tag name shared with every node it creates.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) root_name: Arc<str>,
    pub(crate) attributes: Attributes,
    pub(crate) children: IndexMap<Key, Value>,
}

impl Node {
    /// Creates an empty root node.
    pub fn new(root_name: impl Into<Arc<str>>) -> Self {
        Self {
            root_name: root_name.into(),
            attributes: Attributes::new(),
            children: IndexMap::new(),
        }
    }

    /// Creates an empty node sharing this node's root tag name.
    pub(crate) fn spawn(&self) -> Node {
        Node::new(Arc::clone(&self.root_name))
    }

    /// Tag name used when this node is rendered as a document.
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Stores `value` under `key`, replacing any previous entry in place.
    ///
    /// Returns the replaced value.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.children.insert(key.into(), value.into())
    }

    /// Returns the entry under `key`, creating an empty child node first if the
    /// key is absent.
    ///
    /// The returned reference points into this node, so changes through it are
    /// visible on later reads. A present entry is returned as is, whatever its
    /// kind.
    ///
    /// Entries stored under `@attributes` this way are merged into the
    /// attribute map when the tree is converted, so
    /// `node["item"]["@attributes"]["id"] = "1".into()` renders as `<item id="1">`.
    pub fn get(&mut self, key: impl Into<Key>) -> &mut Value {
        let root_name = Arc::clone(&self.root_name);
        self.children.entry(key.into()).or_insert_with_key(|key| {
            trace!(%key, "creating implicit child node");
            Value::Node(Node::new(root_name))
        })
    }

    /// Like [`Node::get`] but returns the child node itself, for chaining.
    ///
    /// Fails with [`XmlMakerError::NotANode`] when `key` holds a scalar or an
    /// item group.
    pub fn child(&mut self, key: impl Into<Key>) -> Result<&mut Node> {
        let key = key.into();
        let label = key.to_string();
        match self.get(key) {
            Value::Node(node) => Ok(node),
            _ => Err(XmlMakerError::NotANode { key: label }),
        }
    }

    /// Returns the entry under `key` without creating it.
    pub fn peek(&self, key: impl Into<Key>) -> Option<&Value> {
        self.children.get(&key.into())
    }

    /// Mutable variant of [`Node::peek`].
    pub fn peek_mut(&mut self, key: impl Into<Key>) -> Option<&mut Value> {
        self.children.get_mut(&key.into())
    }

    /// Returns true if `key` is present. Never creates.
    pub fn has(&self, key: impl Into<Key>) -> bool {
        self.children.contains_key(&key.into())
    }

    /// Removes `key`, keeping the order of the remaining children.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.children.shift_remove(&key.into())
    }

    /// Attributes set directly on this node.
    ///
    /// Values staged under the `@attributes` child key are not included until
    /// the node is converted with [`Node::to_plain`].
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// The attribute map by reference; edits apply to this node.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Sets one attribute and returns the node for chaining.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<Scalar>) -> &mut Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Appends `data` to the item list `item_name`.
    ///
    /// Every payload of a list renders as a sibling element named `item_name`,
    /// in append order. Returns the node for chaining.
    ///
    /// A `serde_json::Value` container converts into a node with the default
    /// root name. Use [`Node::add_item_value`] to parse the payload with this
    /// node's root name instead.
    pub fn add_item(&mut self, item_name: impl Into<String>, data: impl Into<Value>) -> &mut Self {
        let item_name = item_name.into();
        let slot = self
            .children
            .entry(Key::from(ITEMS_KEY))
            .or_insert_with(|| Value::Items(ItemGroups::new()));
        if !matches!(slot, Value::Items(_)) {
            *slot = Value::Items(ItemGroups::new());
        }
        if let Value::Items(groups) = slot {
            trace!(item = %item_name, "appending item");
            groups.entry(item_name).or_default().push(data.into());
        }
        self
    }

    /// Number of direct children; attributes are not counted.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Children in insertion order.
    pub fn iter(&self) -> Iter<'_, Key, Value> {
        self.children.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, Key, Value> {
        self.children.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.children.keys()
    }

    /// Converts the tree into its node-free plain form. Does not modify the tree.
    pub fn to_plain(&self) -> PlainMap {
        PlainMap::from(self)
    }

    /// Renders the tree as an XML document rooted at [`Node::root_name`].
    pub fn to_xml(&self) -> Result<String> {
        xml::to_xml_string(&self.to_plain(), &self.root_name)
    }

    /// Renders the tree as an indented XML document.
    pub fn to_pretty_xml(&self) -> Result<String> {
        xml::prettify(&self.to_xml()?)
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::new(DEFAULT_ROOT_NAME)
    }
}

impl fmt::Display for Node {
    /// Writes [`Node::to_xml`]; a serialization failure becomes `fmt::Error`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = self.to_xml().map_err(|_| fmt::Error)?;
        f.write_str(&xml)
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Node {
    type Item = (&'a Key, &'a mut Value);
    type IntoIter = IterMut<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<I: AsKey> ops::Index<I> for Node {
    type Output = Value;

    /// Never creates entries; absent keys yield null.
    fn index(&self, index: I) -> &Value {
        self.children.get(&index.to_key()).unwrap_or(&NULL)
    }
}

impl<I: AsKey> ops::IndexMut<I> for Node {
    /// Same as [`Node::get`].
    fn index_mut(&mut self, index: I) -> &mut Value {
        self.get(index.to_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_read_back() {
        let mut node = Node::default();
        node.insert("s", "text");
        node.insert("n", 12);
        node.insert("b", false);
        node.insert("z", Scalar::Null);

        assert_eq!(*node.get("s"), "text");
        assert_eq!(*node.get("n"), 12);
        assert_eq!(*node.get("b"), false);
        assert!(node.get("z").is_null());
        assert_eq!(node.len(), 4);
    }

    #[test]
    fn test_implicit_creation_is_idempotent() {
        let mut node = Node::new("doc");
        assert!(!node.has("a"));

        node.get("a");
        assert!(node.has("a"));
        assert_eq!(node.len(), 1);

        node.child("a").unwrap().insert("marker", 1);
        let again = node.child("a").unwrap();
        assert_eq!(again["marker"], 1);
        assert_eq!(again.root_name(), "doc");
        assert_eq!(node.len(), 1);
    }

    #[test]
    fn test_chained_paths_materialize_left_to_right() {
        let mut node = Node::default();
        node["a"]["b"]["c"] = Value::from(1);

        let a = node.peek("a").and_then(Value::as_node).unwrap();
        let b = a.peek("b").and_then(Value::as_node).unwrap();
        assert_eq!(b["c"], 1);
        assert_eq!(node["a"]["b"]["c"], 1);
    }

    #[test]
    fn test_index_does_not_create() {
        let node = Node::default();
        assert!(node["missing"].is_null());
        assert!(node[3].is_null());
        assert!(node.is_empty());
    }

    #[test]
    fn test_assignment_replaces_type() {
        let mut node = Node::default();
        node["a"]["b"] = Value::from(1);
        assert!(node["a"].is_node());

        node.insert("a", "flat");
        assert_eq!(node["a"], "flat");

        node.insert("a", Node::default());
        assert!(node["a"].is_node());
    }

    #[test]
    fn test_child_on_scalar_fails() {
        let mut node = Node::default();
        node.insert("title", "x");
        let err = node.child("title").unwrap_err();
        assert!(matches!(err, XmlMakerError::NotANode { ref key } if key == "title"));
    }

    #[test]
    fn test_remove_and_order() {
        let mut node = Node::default();
        node.insert("a", 1);
        node.insert("b", 2);
        node.insert("c", 3);
        assert_eq!(node.remove("b"), Some(Value::from(2)));
        assert_eq!(node.remove("b"), None);

        let keys: Vec<String> = node.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["a", "c"]);

        // overwriting keeps the original position
        node.insert("a", 10);
        let keys: Vec<String> = node.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_attributes_are_separate_from_children() {
        let mut node = Node::default();
        node.set_attribute("id", "1").set_attribute("lang", "en");
        node.attributes_mut().insert("extra".to_string(), Scalar::from(2));

        assert_eq!(node.len(), 0);
        assert_eq!(node.attributes().len(), 3);
        assert_eq!(node.attributes()["id"], Scalar::from("1"));
    }

    #[test]
    fn test_add_item_appends_in_order() {
        let mut node = Node::default();
        node.add_item("row", "first").add_item("row", "second");
        node.add_item("other", 3);

        let groups = node.peek(ITEMS_KEY).and_then(Value::as_items).unwrap();
        assert_eq!(groups["row"], vec![Value::from("first"), Value::from("second")]);
        assert_eq!(groups["other"], vec![Value::from(3)]);
        assert_eq!(node.len(), 1);
    }

    #[test]
    fn test_add_item_replaces_non_group_entry() {
        let mut node = Node::default();
        node.insert(ITEMS_KEY, "oops");
        node.add_item("row", 1);
        assert!(node.peek(ITEMS_KEY).and_then(Value::as_items).is_some());
    }

    #[test]
    fn test_bracket_attributes_merge_on_conversion() {
        let mut node = Node::default();
        node["item"]["@attributes"]["id"] = "1".into();
        node["item"]["name"] = "Test".into();
        node.child("item").unwrap().set_attribute("lang", "en");

        // staging stays a child until conversion
        let item = node["item"].as_node().unwrap();
        assert!(item.has(ATTRIBUTES_KEY));
        assert_eq!(item.attributes().len(), 1);

        let plain = item.to_plain();
        assert_eq!(plain.attributes["id"], Scalar::from("1"));
        assert_eq!(plain.attributes["lang"], Scalar::from("en"));
        assert_eq!(plain.len(), 1);
        assert!(plain.get(ATTRIBUTES_KEY).is_none());
    }

    #[test]
    fn test_iteration_excludes_attributes() {
        let mut node = Node::default();
        node.set_attribute("id", "7");
        node.insert("x", 1);
        node.insert(0usize, "zero");

        let entries: Vec<(Key, Value)> =
            (&node).into_iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        assert_eq!(
            entries,
            vec![
                (Key::Name("x".to_string()), Value::from(1)),
                (Key::Index(0), Value::from("zero")),
            ]
        );
    }

    #[test]
    fn test_display_matches_to_xml() {
        let mut node = Node::new("doc");
        node.insert("a", "1");
        assert_eq!(node.to_string(), node.to_xml().unwrap());
    }
}
