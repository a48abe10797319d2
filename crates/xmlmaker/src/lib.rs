//! # xmlmaker
//!
//! Build XML documents by writing nested assignments instead of calling an
//! XML builder API.
//!
//! ## Features
//!
//! - **Implicit tree**: reading an absent key of a [`Node`] creates an empty
//!   child node under it, so `doc["a"]["b"]["c"] = 1.into()` works without
//!   declaring `a` or `b`.
//! - **Bulk ingestion**: anything implementing `serde::Serialize` can be poured
//!   into a node with [`Node::set`] or [`Node::parse`].
//! - **Attributes and repeated items**: every node carries a flat attribute
//!   map, and [`Node::add_item`] appends repeated sibling elements sharing one
//!   tag.
//! - **Output**: compact XML, indented XML, or the plain JSON form of a tree.
//!
//! ## Architecture
//!
//! ```text
//! Node tree ──to_plain()──▶ PlainMap ──xml::to_xml_string()──▶ XML text ──xml::prettify()──▶ indented XML
//!                              │
//!                              └──serde_json──▶ JSON text
//! ```
//!
//! ## Examples
//!
//! ```
//! use xmlmaker::Node;
//! use serde_json::json;
//!
//! let mut doc = Node::new("order");
//! doc.set_attribute("id", 42);
//! doc["customer"]["name"] = "Ada".into();
//! doc.set("tags", &["rush", "gift"])?;
//! doc.add_item_value("line", &json!({"sku": "A-1", "qty": 2}))?
//!     .add_item_value("line", &json!({"sku": "B-7", "qty": 1}))?;
//!
//! assert_eq!(
//!     doc.to_xml()?,
//!     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
//!      <order id=\"42\">\
//!      <customer><name>Ada</name></customer>\
//!      <tags><tags>rush</tags><tags>gift</tags></tags>\
//!      <line><sku>A-1</sku><qty>2</qty></line>\
//!      <line><sku>B-7</sku><qty>1</qty></line>\
//!      </order>\n"
//! );
//! # Ok::<(), xmlmaker::XmlMakerError>(())
//! ```

pub mod error;
pub mod json;
pub mod node;
pub mod plain;
pub mod value;
pub mod xml;

// Re-export common types at top level for convenience
pub use error::{Result, XmlMakerError};
pub use node::{ATTRIBUTES_KEY, DEFAULT_ROOT_NAME, ITEMS_KEY, Node};
pub use plain::{PlainEntry, PlainItems, PlainMap, PlainValue};
pub use value::{AsKey, Attributes, ItemGroups, Key, Scalar, Value};
