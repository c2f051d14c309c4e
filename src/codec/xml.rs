//! Conversion between [`Tree`] values and XML documents.
//!
//! Order management endpoints take a `<Req>` document as their request body
//! and most store endpoints answer with XML. Both directions go through
//! `quick_xml`'s event reader and writer.
//!
//! # Decoding rules
//!
//! - The root element's name is dropped; its content becomes the tree.
//! - Attributes appear under the reserved [`ATTRIBUTES_KEY`] map. Namespace
//!   declarations and prefixed attributes are skipped.
//! - An element with neither attributes nor child elements becomes a leaf.
//! - Text of an element that has attributes but no child elements is kept
//!   under [`TEXT_KEY`].
//! - A child name repeated under the same parent collapses into a list; a
//!   child that appears once stays bare.
//!
//! # Example
//!
//! ```rust
//! use yahoo_shopping_api::codec::xml;
//! use yahoo_shopping_api::Tree;
//!
//! let tree = xml::decode("<ResultSet><Result><Status>OK</Status></Result></ResultSet>").unwrap();
//! assert_eq!(tree.pointer(&["Result", "Status"]).and_then(Tree::as_str), Some("OK"));
//! ```

use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;
use thiserror::Error;

use crate::tree::Tree;

/// Reserved key holding an element's attributes.
pub const ATTRIBUTES_KEY: &str = "@attributes";

/// Reserved key holding the text of an element that also has attributes.
pub const TEXT_KEY: &str = "@text";

/// Errors produced while reading or writing XML.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// The input is not well-formed XML.
    #[error("Malformed XML: {reason}")]
    Malformed {
        /// Description from the XML reader.
        reason: String,
    },

    /// The document has no root element.
    #[error("XML document has no root element")]
    MissingRoot,

    /// Non-whitespace text or a second element appears outside the root.
    #[error("Unexpected content outside the XML root element")]
    ContentOutsideRoot,

    /// The document ended before every element was closed.
    #[error("XML element <{name}> is never closed")]
    Unclosed {
        /// Name of the innermost open element.
        name: String,
    },

    /// A list cannot be the root of a document.
    #[error("Cannot encode a list as the <{root}> root element")]
    ListAtRoot {
        /// The requested root tag.
        root: String,
    },

    /// Writing the document failed.
    #[error("Failed to write XML: {reason}")]
    Write {
        /// Description from the XML writer.
        reason: String,
    },
}

/// Builds an XML document with `root` as the root element and `params` as
/// its content.
///
/// Map keys become child elements in insertion order, each list item becomes
/// a sibling element under the same tag, and leaves become text elements.
///
/// # Errors
///
/// Returns [`XmlError::ListAtRoot`] if `params` is a list, or
/// [`XmlError::Write`] if the writer fails.
///
/// # Example
///
/// ```rust
/// use yahoo_shopping_api::codec::xml;
/// use yahoo_shopping_api::Tree;
///
/// let params = Tree::from_pairs([
///     ("Target", Tree::from_pairs([("OrderId", "order-1")])),
///     ("SellerId", Tree::leaf("store")),
/// ]);
/// let document = xml::encode("Req", &params).unwrap();
/// assert!(document.ends_with(
///     "<Req><Target><OrderId>order-1</OrderId></Target><SellerId>store</SellerId></Req>"
/// ));
/// ```
pub fn encode(root: &str, params: &Tree) -> Result<String, XmlError> {
    if matches!(params, Tree::List(_)) {
        return Err(XmlError::ListAtRoot {
            root: root.to_string(),
        });
    }

    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;
    write_element(&mut writer, root, params)?;

    String::from_utf8(writer.into_inner()).map_err(write_error)
}

fn write_children(writer: &mut Writer<Vec<u8>>, name: &str, value: &Tree) -> Result<(), XmlError> {
    match value {
        Tree::List(items) => items
            .iter()
            .try_for_each(|item| write_children(writer, name, item)),
        _ => write_element(writer, name, value),
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &Tree) -> Result<(), XmlError> {
    let mut start = BytesStart::new(name);
    let mut text = None;

    let children = match value {
        Tree::Leaf(value) => {
            text = Some(value.as_str());
            None
        }
        Tree::Map(map) => {
            if let Some(Tree::Map(attributes)) = map.get(ATTRIBUTES_KEY) {
                for (key, attribute) in attributes {
                    if let Some(attribute) = attribute.as_str() {
                        start.push_attribute((key.as_str(), attribute));
                    }
                }
            }
            text = map.get(TEXT_KEY).and_then(Tree::as_str);
            Some(map)
        }
        Tree::List(_) => None,
    };

    writer
        .write_event(Event::Start(start))
        .map_err(write_error)?;
    if let Some(text) = text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(write_error)?;
    }
    if let Some(children) = children {
        for (key, child) in children {
            if key == ATTRIBUTES_KEY || key == TEXT_KEY {
                continue;
            }
            write_children(writer, key, child)?;
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(write_error)?;

    Ok(())
}

#[allow(clippy::needless_pass_by_value)]
fn write_error(error: impl std::fmt::Display) -> XmlError {
    XmlError::Write {
        reason: error.to_string(),
    }
}

#[allow(clippy::needless_pass_by_value)]
fn malformed(error: impl std::fmt::Display) -> XmlError {
    XmlError::Malformed {
        reason: error.to_string(),
    }
}

/// An element being read.
#[derive(Debug, Default)]
struct Frame {
    name: String,
    attributes: IndexMap<String, Tree>,
    children: IndexMap<String, Tree>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let mut attributes = IndexMap::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(malformed)?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            if key == "xmlns" || key.contains(':') {
                continue;
            }
            let value = attribute.unescape_value().map_err(malformed)?;
            attributes.insert(key, Tree::Leaf(value.into_owned()));
        }

        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            ..Self::default()
        })
    }

    fn add_child(&mut self, name: String, value: Tree) {
        match self.children.get_mut(&name) {
            Some(Tree::List(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::take(existing);
                *existing = Tree::List(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }

    fn close(self) -> (String, Tree) {
        let has_text = !self.text.trim().is_empty();
        let value = if self.attributes.is_empty() && self.children.is_empty() {
            Tree::Leaf(if has_text { self.text } else { String::new() })
        } else {
            let mut map = IndexMap::new();
            if !self.attributes.is_empty() {
                map.insert(ATTRIBUTES_KEY.to_string(), Tree::Map(self.attributes));
            }
            if self.children.is_empty() && has_text {
                map.insert(TEXT_KEY.to_string(), Tree::Leaf(self.text));
            }
            map.extend(self.children);
            Tree::Map(map)
        };
        (self.name, value)
    }
}

/// Parses an XML document into a [`Tree`].
///
/// # Errors
///
/// Returns an [`XmlError`] if the input is not a single well-formed XML
/// document. JSON text, for example, is rejected with
/// [`XmlError::ContentOutsideRoot`].
pub fn decode(document: &str) -> Result<Tree, XmlError> {
    let mut reader = Reader::from_str(document);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Tree> = None;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(XmlError::ContentOutsideRoot);
                }
                stack.push(Frame::open(&start)?);
            }
            Event::Empty(start) => {
                if root.is_some() {
                    return Err(XmlError::ContentOutsideRoot);
                }
                let (name, value) = Frame::open(&start)?.close();
                match stack.last_mut() {
                    Some(parent) => parent.add_child(name, value),
                    None => root = Some(value),
                }
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or(XmlError::ContentOutsideRoot)?;
                let (name, value) = frame.close();
                match stack.last_mut() {
                    Some(parent) => parent.add_child(name, value),
                    None => root = Some(value),
                }
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(malformed)?;
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(XmlError::ContentOutsideRoot),
                }
            }
            Event::CData(data) => {
                let data = data.into_inner();
                let frame = stack.last_mut().ok_or(XmlError::ContentOutsideRoot)?;
                frame.text.push_str(&String::from_utf8_lossy(&data));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::Unclosed { name: open.name });
    }
    root.ok_or(XmlError::MissingRoot)
}
