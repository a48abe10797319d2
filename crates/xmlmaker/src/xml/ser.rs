//! Plain mapping to XML text.
//!
//! The plain form of a tree is walked once to build an [`XmlElement`] tree,
//! which is then written by quick-xml. Structural cases are resolved while
//! walking:
//!
//! - positional keys take the enclosing element's name, or `item` directly
//!   under the root,
//! - attributes become XML attributes, skipping empty names and null values,
//! - item groups become repeated siblings sharing one tag,
//! - a map whose only entry is a scalar at index `0` collapses to text.

use super::element::XmlElement;
use super::utils;
use crate::error::Result;
use crate::node::DEFAULT_ROOT_NAME;
use crate::plain::{PlainEntry, PlainItems, PlainMap, PlainValue};
use crate::value::Attributes;
use tracing::debug;

/// Serializes a plain mapping as a UTF-8 XML document with root tag `root_name`.
///
/// An empty root name falls back to `root`.
///
/// # Examples
///
/// ```
/// use xmlmaker::Node;
/// use xmlmaker::xml::to_xml_string;
///
/// let mut node = Node::default();
/// node.set("tags", &["a", "b"])?;
///
/// let xml = to_xml_string(&node.to_plain(), "doc")?;
/// assert_eq!(
///     xml,
///     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<doc><tags><tags>a</tags><tags>b</tags></tags></doc>\n"
/// );
/// # Ok::<(), xmlmaker::XmlMakerError>(())
/// ```
pub fn to_xml_string(plain: &PlainMap, root_name: &str) -> Result<String> {
    let root = build_document(plain, root_name)?;
    let xml = root.to_document_string()?;
    debug!(root = root.name(), bytes = xml.len(), "serialized XML document");
    Ok(xml)
}

/// Builds the element tree of a document without writing it.
pub fn build_document(plain: &PlainMap, root_name: &str) -> Result<XmlElement> {
    let root_name = if root_name.is_empty() {
        DEFAULT_ROOT_NAME
    } else {
        root_name
    };
    let mut root = XmlElement::new(root_name)?;
    add_attributes(&mut root, &plain.attributes)?;
    // top-level positional keys have no parent name to borrow
    render_children(plain, &mut root, "")?;
    Ok(root)
}

fn add_attributes(element: &mut XmlElement, attributes: &Attributes) -> Result<()> {
    for (name, value) in attributes {
        if name.is_empty() || value.is_null() {
            continue;
        }
        element.add_attribute(name.as_str(), value.to_text())?;
    }
    Ok(())
}

fn render_children(map: &PlainMap, parent: &mut XmlElement, fallback: &str) -> Result<()> {
    for entry in &map.entries {
        match entry {
            PlainEntry::Items(groups) => render_items(groups, parent)?,
            PlainEntry::Field(key, value) => {
                let name = utils::element_name(key, fallback);
                render_field(name, value, parent)?;
            }
        }
    }
    Ok(())
}

fn render_items(groups: &PlainItems, parent: &mut XmlElement) -> Result<()> {
    for (tag, items) in groups {
        for item in items {
            let element = parent.add_child(tag.as_str())?;
            // Scalar items are written as bare elements without text.
            if let PlainValue::Map(map) = item {
                add_attributes(element, &map.attributes)?;
                if !map.is_empty() {
                    render_children(map, element, tag)?;
                }
            }
        }
    }
    Ok(())
}

fn render_field(name: &str, value: &PlainValue, parent: &mut XmlElement) -> Result<()> {
    let element = parent.add_child(name)?;
    match value {
        PlainValue::Scalar(scalar) => element.set_text(scalar.to_text()),
        PlainValue::Map(map) => {
            add_attributes(element, &map.attributes)?;
            if let Some(text) = map.single_text() {
                element.set_text(text.to_text());
            } else if !map.is_empty() {
                render_children(map, element, name)?;
            }
        }
    }
    Ok(())
}
