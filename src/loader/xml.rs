//! Markup loader
//!
//! The XML document is converted into the same generic tree the JSON loader
//! reads, then handed to the shape search in `tree`.
//!
//! Conversion rules:
//! - the root element's own name is dropped; its content is the tree root
//! - an element with no child elements and no attributes becomes its trimmed text
//! - otherwise it becomes an object: attributes, then child elements in document order
//! - repeated child names collapse into an array, in document order
//! - text mixed in between child elements is ignored

use crate::question::Question;
use crate::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};
use super::framework::{Format, QuestionLoader};
use super::tree;

/// XML question loader
#[derive(Debug, Default)]
pub struct XmlLoader;

impl XmlLoader {
    pub fn new() -> Self {
        Self
    }
}

impl QuestionLoader for XmlLoader {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn parse(&self, content: &str) -> Result<Vec<Question>> {
        let root = xml_to_tree(content)?;
        Ok(tree::extract(&root).questions)
    }
}

/// An element whose end tag has not been reached yet
struct OpenElement {
    name: String,
    entries: Vec<(String, Value)>,
    text: String,
}

impl OpenElement {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let mut entries = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| Error::Parse(format!("invalid XML attribute: {}", e)))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::Parse(format!("invalid XML attribute value: {}", e)))?;
            entries.push((key, Value::String(value.into_owned())));
        }

        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            entries,
            text: String::new(),
        })
    }

    fn add_child(&mut self, name: String, value: Value) {
        self.entries.push((name, value));
    }

    fn close(self) -> (String, Value) {
        if self.entries.is_empty() {
            return (self.name, Value::String(self.text.trim().to_string()));
        }

        let mut map = Map::new();
        for (key, value) in self.entries {
            match map.get_mut(&key) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    map.insert(key, value);
                }
            }
        }
        (self.name, Value::Object(map))
    }
}

/// Convert an XML document into a generic tree.
///
/// A document without a root element converts to `null`.
pub fn xml_to_tree(content: &str) -> Result<Value> {
    let mut reader = Reader::from_str(content);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::Parse(format!("invalid XML at byte {}: {}", reader.buffer_position(), e)))?;

        match event {
            Event::Start(start) => stack.push(OpenElement::open(&start)?),
            Event::Empty(start) => {
                let (name, value) = OpenElement::open(&start)?.close();
                attach(&mut stack, &mut root, name, value);
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::Parse("unexpected closing tag".to_string()))?;
                let (name, value) = element.close();
                attach(&mut stack, &mut root, name, value);
            }
            Event::Text(text) => {
                if let Some(open) = stack.last_mut() {
                    let text = text
                        .unescape()
                        .map_err(|e| Error::Parse(format!("invalid XML text: {}", e)))?;
                    open.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Parse(format!("unclosed element <{}>", open.name)));
    }

    Ok(root.unwrap_or(Value::Null))
}

/// Hand a finished element to its parent, or make it the root
fn attach(stack: &mut [OpenElement], root: &mut Option<Value>, name: String, value: Value) {
    match stack.last_mut() {
        Some(parent) => parent.add_child(name, value),
        None => {
            if root.is_none() {
                *root = Some(value);
            }
        }
    }
}
