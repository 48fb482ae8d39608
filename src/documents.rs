//! XML document tree
//!
//! A small owned element tree built with `quick-xml`. The XSD reader walks
//! this tree by local name; namespace prefixes on element and attribute names
//! are kept only for diagnostics.

use crate::error::{Error, Result};
use crate::limits::Limits;
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// XML element in the document tree
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Namespace prefix as written (`xs` in `xs:element`)
    pub prefix: Option<String>,
    /// Local name
    pub name: String,
    /// Attributes keyed by local name, in document order
    pub attributes: IndexMap<String, String>,
    /// Namespace declarations (`xmlns:prefix` → URI, `""` for the default)
    pub namespaces: IndexMap<String, String>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new element with the given local name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.name
    }

    /// Get an attribute value by local name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Get an attribute value, or the empty string when absent
    pub fn attribute_or_empty(&self, name: &str) -> String {
        self.get_attribute(name).unwrap_or_default().to_string()
    }

    /// Iterate child elements with the given local name
    pub fn children_named<'a>(&'a self, local_name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children
            .iter()
            .filter(move |e| e.local_name() == local_name)
    }

    /// Last child element with the given local name
    pub fn child(&self, local_name: &str) -> Option<&Element> {
        self.children.iter().rev().find(|c| c.local_name() == local_name)
    }
}

/// XML document representation
#[derive(Debug, Default)]
pub struct Document {
    /// Root element of the document
    pub root: Option<Element>,
}

impl Document {
    /// Parse an XML document from a string with default limits
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes(), &Limits::default())
    }

    /// Parse an XML document from bytes
    pub fn parse(xml: &[u8], limits: &Limits) -> Result<Self> {
        limits.check_xml_size(xml.len())?;

        let mut reader = Reader::from_reader(xml);
        reader.trim_text(true);

        let mut doc = Document::default();
        let mut element_stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    element_stack.push(Self::parse_element(&e)?);
                }
                Ok(Event::End(_)) => {
                    if let Some(current) = element_stack.pop() {
                        match element_stack.last_mut() {
                            Some(parent) => parent.children.push(current),
                            None => doc.root = Some(current),
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    let element = Self::parse_element(&e)?;
                    match element_stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => doc.root = Some(element),
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = element_stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::Xml(format!("Failed to unescape text: {}", e)))?;
                        if !text.trim().is_empty() {
                            current.text = Some(text.into_owned());
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "Error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {} // comments, declarations, processing instructions
            }
            buf.clear();
        }

        if !element_stack.is_empty() {
            return Err(Error::Xml("Unexpected end of document".to_string()));
        }

        Ok(doc)
    }

    fn parse_element(start: &BytesStart) -> Result<Element> {
        let raw_name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| Error::Xml(format!("Invalid element name: {}", e)))?
            .to_string();

        let mut element = match raw_name.split_once(':') {
            Some((prefix, local)) => Element {
                prefix: Some(prefix.to_string()),
                ..Element::new(local)
            },
            None => Element::new(raw_name),
        };

        for attr_result in start.attributes() {
            let attr =
                attr_result.map_err(|e| Error::Xml(format!("Failed to parse attribute: {}", e)))?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Xml(format!("Invalid attribute name: {}", e)))?
                .to_string();

            let attr_value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("Failed to unescape attribute value: {}", e)))?
                .into_owned();

            if attr_name == "xmlns" {
                element.namespaces.insert(String::new(), attr_value);
            } else if let Some(prefix) = attr_name.strip_prefix("xmlns:") {
                element.namespaces.insert(prefix.to_string(), attr_value);
            } else {
                let local = match attr_name.split_once(':') {
                    Some((_, local)) => local.to_string(),
                    None => attr_name,
                };
                element.attributes.insert(local, attr_value);
            }
        }

        Ok(element)
    }

    /// Get the root element
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefixed_elements() {
        let xml = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
            <xs:element name="person" type="xs:string"/>
        </xs:schema>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root().unwrap();
        assert_eq!(root.local_name(), "schema");
        assert_eq!(root.prefix.as_deref(), Some("xs"));
        assert_eq!(
            root.namespaces.get("xs").map(String::as_str),
            Some("http://www.w3.org/2001/XMLSchema")
        );
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].get_attribute("type"), Some("xs:string"));
    }

    #[test]
    fn test_children_named() {
        let xml = r#"<root><a/><b/><a/></root>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root().unwrap();
        assert_eq!(root.children_named("a").count(), 2);
        assert!(root.child("b").is_some());
        assert!(root.child("c").is_none());
    }

    #[test]
    fn test_child_returns_last_match() {
        let xml = r#"<root><a id="1"/><b/><a id="2"/></root>"#;
        let doc = Document::from_string(xml).unwrap();
        let root = doc.root().unwrap();

        // The lookup name does not need to outlive the returned element.
        let found = {
            let name = String::from("a");
            root.child(&name)
        };
        assert_eq!(found.and_then(|a| a.get_attribute("id")), Some("2"));
    }

    #[test]
    fn test_text_content() {
        let xml = r#"<root><doc>Hello &amp; welcome</doc></root>"#;
        let doc = Document::from_string(xml).unwrap();
        let root = doc.root().unwrap();
        assert_eq!(root.children[0].text.as_deref(), Some("Hello & welcome"));
    }

    #[test]
    fn test_empty_document_has_no_root() {
        let doc = Document::from_string("").unwrap();
        assert!(doc.root().is_none());
    }

    #[test]
    fn test_malformed_xml_fails() {
        let result = Document::from_string("<root><child></root>");
        assert!(matches!(result, Err(Error::Xml(_))));
    }

    #[test]
    fn test_depth_limit() {
        let limits = Limits {
            max_xml_depth: 2,
            ..Limits::default()
        };
        let result = Document::parse(b"<a><b><c><d/></c></b></a>", &limits);
        assert!(matches!(result, Err(Error::LimitExceeded(_))));
    }
}
