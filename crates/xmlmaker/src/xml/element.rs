//! In-memory element tree written out with quick-xml.

use super::utils;
use crate::error::{Result, XmlMakerError};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

/// One XML element with attributes, optional text and child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Creates an element, failing with [`XmlMakerError::InvalidName`] if
    /// `name` is not a valid XML name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !utils::is_valid_name(&name) {
            return Err(XmlMakerError::InvalidName(name));
        }
        Ok(Self {
            name,
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Adds an attribute; a repeated name overwrites the earlier value.
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let name = name.into();
        if !utils::is_valid_name(&name) {
            return Err(XmlMakerError::InvalidName(name));
        }
        let value = value.into();
        match self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        Ok(())
    }

    /// Appends a new child element and returns it.
    pub fn add_child(&mut self, name: impl Into<String>) -> Result<&mut XmlElement> {
        let child = XmlElement::new(name)?;
        self.children.push(child);
        let last = self.children.len() - 1;
        Ok(&mut self.children[last])
    }

    /// Sets the unescaped text content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Writes this element and its subtree.
    pub fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (name, value) in &self.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if self.text.is_none() && self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if let Some(text) = &self.text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            child.write(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }

    /// Serializes this element as a standalone UTF-8 document: the XML
    /// declaration, a newline, the element, and a trailing newline.
    pub fn to_document_string(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.get_mut().push(b'\n');
        self.write(&mut writer)?;
        writer.get_mut().push(b'\n');

        String::from_utf8(writer.into_inner())
            .map_err(|e| XmlMakerError::Custom(format!("document is not valid UTF-8: {}", e)))
    }
}
