//! Re-indentation of XML text.
//!
//! The input is read into a small element tree (start tags kept verbatim,
//! text kept in its escaped form, whitespace-only text dropped) and written
//! back with an indenting writer, so only formatting changes.

use super::utils::INDENT_SIZE;
use crate::error::Result;
use quick_xml::errors::{Error as QuickXmlError, IllFormedError};
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Write;
use tracing::debug;

#[derive(Debug)]
struct DomElement {
    start: BytesStart<'static>,
    children: Vec<DomNode>,
}

#[derive(Debug)]
enum DomNode {
    Element(DomElement),
    /// Escaped character data.
    Text(String),
}

#[derive(Debug, Default)]
struct Document {
    decl: Option<BytesDecl<'static>>,
    nodes: Vec<DomNode>,
}

/// Reformats an XML document with two-space indentation.
///
/// Elements without children are written as `<name/>`. The result ends with a
/// newline and has no blank lines.
///
/// # Examples
///
/// ```
/// let pretty = xmlmaker::xml::prettify("<a><b>x</b><c></c></a>")?;
/// assert_eq!(pretty, "<a>\n  <b>x</b>\n  <c/>\n</a>\n");
/// # Ok::<(), xmlmaker::XmlMakerError>(())
/// ```
pub fn prettify(xml: &str) -> Result<String> {
    let document = read_document(xml)?;

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
    if let Some(decl) = &document.decl {
        writer.write_event(Event::Decl(decl.clone()))?;
    }
    for node in &document.nodes {
        write_node(node, &mut writer)?;
    }
    writer.get_mut().push(b'\n');

    let pretty = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    debug!(input = xml.len(), output = pretty.len(), "pretty printed XML document");
    Ok(pretty)
}

fn read_document(xml: &str) -> Result<Document> {
    let mut reader = Reader::from_str(xml);
    let mut document = Document::default();
    let mut open: Vec<DomElement> = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Decl(decl) => document.decl = Some(decl.into_owned()),
            Event::Start(start) => {
                flush_text(&mut text, &mut open, &mut document.nodes);
                open.push(DomElement {
                    start: start.into_owned(),
                    children: Vec::new(),
                });
            }
            Event::Empty(start) => {
                flush_text(&mut text, &mut open, &mut document.nodes);
                let element = DomElement {
                    start: start.into_owned(),
                    children: Vec::new(),
                };
                append(DomNode::Element(element), &mut open, &mut document.nodes);
            }
            Event::End(end) => {
                flush_text(&mut text, &mut open, &mut document.nodes);
                let element = open.pop().ok_or_else(|| {
                    QuickXmlError::IllFormed(IllFormedError::UnmatchedEndTag(
                        String::from_utf8_lossy(end.name().as_ref()).into_owned(),
                    ))
                })?;
                append(DomNode::Element(element), &mut open, &mut document.nodes);
            }
            Event::Text(raw) => text.push_str(&String::from_utf8_lossy(raw.as_ref())),
            Event::GeneralRef(reference) => {
                text.push('&');
                text.push_str(&String::from_utf8_lossy(reference.as_ref()));
                text.push(';');
            }
            Event::CData(data) => {
                let data = String::from_utf8_lossy(&data).into_owned();
                text.push_str(&escape(data.as_str()));
            }
            Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(element) = open.pop() {
        let name = String::from_utf8_lossy(element.start.name().as_ref()).into_owned();
        return Err(QuickXmlError::IllFormed(IllFormedError::MissingEndTag(name)).into());
    }
    flush_text(&mut text, &mut open, &mut document.nodes);
    Ok(document)
}

fn is_whitespace_text(text: &str) -> bool {
    text.bytes().all(|b| matches!(b, b' ' | b'\n' | b'\r' | b'\t'))
}

fn flush_text(text: &mut String, open: &mut [DomElement], top: &mut Vec<DomNode>) {
    if text.is_empty() {
        return;
    }
    let pending = std::mem::take(text);
    if !is_whitespace_text(&pending) {
        append(DomNode::Text(pending), open, top);
    }
}

fn append(node: DomNode, open: &mut [DomElement], top: &mut Vec<DomNode>) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => top.push(node),
    }
}

fn write_node<W: Write>(node: &DomNode, writer: &mut Writer<W>) -> Result<()> {
    match node {
        DomNode::Text(text) => {
            writer.write_event(Event::Text(BytesText::from_escaped(text.as_str())))?;
        }
        DomNode::Element(element) if element.children.is_empty() => {
            writer.write_event(Event::Empty(element.start.borrow()))?;
        }
        DomNode::Element(element) => {
            writer.write_event(Event::Start(element.start.borrow()))?;
            for child in &element.children {
                write_node(child, writer)?;
            }
            writer.write_event(Event::End(element.start.to_end()))?;
        }
    }
    Ok(())
}
