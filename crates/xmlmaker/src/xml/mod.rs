//! XML output for [`Node`](crate::Node) trees.
//!
//! ## Architecture
//!
//! - **Serialization** ([`to_xml_string`]): walks the plain form of a tree
//!   ([`PlainMap`](crate::PlainMap)) and builds an [`XmlElement`] tree, which
//!   quick-xml writes as a compact UTF-8 document.
//! - **Pretty printing** ([`prettify`]): reads XML text back with quick-xml,
//!   drops whitespace-only text and writes it again with two-space indentation.
//!
//! ## Mapping
//!
//! | Plain form | XML |
//! |------------|-----|
//! | `{"name": "Test"}` | `<name>Test</name>` |
//! | `{"tags": ["a", "b"]}` | `<tags><tags>a</tags><tags>b</tags></tags>` |
//! | `{"price": {"@attributes": {"cur": "EUR"}, "0": 10}}` | `<price cur="EUR">10</price>` |
//! | `{"@items": {"row": [{"a": 1}, {"a": 2}]}}` | `<row><a>1</a></row><row><a>2</a></row>` |
//! | `{"empty": {}}` | `<empty/>` |
//!
//! Attributes with an empty name or a null value are not written. Booleans
//! render as `1` and the empty string, null as the empty string.

mod element;
mod pretty;
mod ser;
mod utils;

pub use element::XmlElement;
pub use pretty::prettify;
pub use ser::{build_document, to_xml_string};
pub use utils::{DEFAULT_ITEM_TAG, INDENT_SIZE, is_valid_name};
