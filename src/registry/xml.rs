//! Minimal owned element tree over `quick-xml`.
//!
//! Only what `modsettings.lsx` needs: element names, ordered attributes,
//! child elements, and optional text.  Comments, processing instructions and
//! the original declaration are dropped on read.
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

/// Failure to read or write an element tree.
#[derive(Error, Debug)]
pub enum XmlError {
    /// Tokenizer or escaping error reported by `quick-xml`.
    #[error(transparent)]
    Syntax(#[from] quick_xml::Error),

    /// Tree-level violation (no root, unclosed element, ...).
    #[error("{0}")]
    Structure(&'static str),

    /// Failure while writing the serialized document.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An XML element with its attributes and children, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name.
    pub name: String,
    /// Attributes as `(key, unescaped value)` pairs.
    pub attributes: Vec<(String, String)>,
    /// Child elements.
    pub children: Vec<Self>,
    /// Non-whitespace text content, if any.
    pub text: Option<String>,
}

impl Element {
    /// Create an element with no attributes or children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Builder-style attribute append.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Value of the first attribute named `key`.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First child element named `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    /// First child element named `name`, mutably.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Self> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// Visit this element and all descendants in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Parse a document into its root element.
///
/// # Errors
///
/// Returns an error if the text is not well-formed XML or does not have
/// exactly one root element.
pub fn parse(text: &str) -> Result<Element, XmlError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(open_element(&e)?),
            Event::Empty(e) => attach(&mut stack, &mut root, open_element(&e)?)?,
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or(XmlError::Structure("unexpected closing tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(e) => push_text(&mut stack, &e.unescape()?)?,
            Event::CData(e) => push_text(&mut stack, &String::from_utf8_lossy(&e.into_inner()))?,
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(XmlError::Structure("unexpected end of document"));
    }
    root.ok_or(XmlError::Structure("document has no root element"))
}

fn open_element(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_some() {
        return Err(XmlError::Structure("multiple root elements"));
    } else {
        *root = Some(element);
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<(), XmlError> {
    if text.trim().is_empty() {
        return Ok(());
    }
    let parent = stack
        .last_mut()
        .ok_or(XmlError::Structure("text outside the root element"))?;
    parent.text.get_or_insert_with(String::new).push_str(text);
    Ok(())
}

/// Serialize `root` with a UTF-8 declaration and four-space indentation.
///
/// # Errors
///
/// Returns an error if writing to the in-memory buffer fails.
pub fn to_bytes(root: &Element) -> Result<Vec<u8>, XmlError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root)?;
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), XmlError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() && element.text.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &element.text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
