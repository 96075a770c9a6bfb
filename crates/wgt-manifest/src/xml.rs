//! Minimal owned XML element tree
//!
//! Manifests are tiny, so they are read fully into memory with `quick-xml`
//! and queried like a DOM. Element and attribute names are kept exactly as
//! written, prefix included: `ub:resizable` is looked up as the literal
//! string `"ub:resizable"` and no namespace resolution takes place.
//! Whitespace-only text nodes are dropped; other text is kept verbatim.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::errors::ManifestError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attribute value, or `default` when the attribute is absent
    pub fn attribute_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attribute(name).unwrap_or(default)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// All descendant elements named `tag`, in document order (self excluded)
    pub fn descendants(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(tag, &mut found);
        found
    }

    /// First descendant element named `tag`
    pub fn first_descendant(&self, tag: &str) -> Option<&Element> {
        for child in &self.children {
            if let Node::Element(element) = child {
                if element.name == tag {
                    return Some(element);
                }
                if let Some(nested) = element.first_descendant(tag) {
                    return Some(nested);
                }
            }
        }
        None
    }

    /// Concatenated text of all descendant text nodes
    pub fn text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_descendants<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if let Node::Element(element) = child {
                if element.name == tag {
                    found.push(element);
                }
                element.collect_descendants(tag, found);
            }
        }
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, ManifestError> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(ManifestError::xml)?
            .to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(ManifestError::xml)?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(ManifestError::xml)?
                .to_string();
            let value = attr.unescape_value().map_err(ManifestError::xml)?.into_owned();
            attributes.push((key, value));
        }

        Ok(Element {
            name,
            attributes,
            children: Vec::new(),
        })
    }
}

/// Parse a document and return its root element
pub fn parse_document(xml: &str) -> Result<Element, ManifestError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event().map_err(ManifestError::xml)? {
            Event::Start(start) => stack.push(Element::from_start(&start)?),
            Event::Empty(start) => {
                let element = Element::from_start(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(ManifestError::xml)?;
                push_text(&mut stack, &text);
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                push_text(&mut stack, &text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ManifestError::Xml(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    root.ok_or(ManifestError::EmptyDocument)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
    } else if root.is_none() {
        *root = Some(element);
    }
}

fn push_text(stack: &mut [Element], text: &str) {
    if text.trim().is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Text(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_prefixed_attribute_names() {
        let doc = parse_document(
            r#"<widget xmlns:ub="http://uniboard.mnemis.com/widgets" ub:resizable="true" width="10"/>"#,
        );
        let Ok(root) = doc else {
            panic!("document should parse");
        };
        assert_eq!(root.name(), "widget");
        assert_eq!(root.attribute("ub:resizable"), Some("true"));
        assert_eq!(root.attribute("resizable"), None);
        assert_eq!(root.attribute_or("height", "150"), "150");
    }

    #[test]
    fn test_descendants_in_document_order() {
        let doc = parse_document(
            "<a><b id=\"1\"/><c><b id=\"2\"><b id=\"3\"/></b></c><b id=\"4\"/></a>",
        );
        let Ok(root) = doc else {
            panic!("document should parse");
        };
        let ids: Vec<_> = root
            .descendants("b")
            .iter()
            .filter_map(|b| b.attribute("id"))
            .collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
        assert_eq!(
            root.first_descendant("b").and_then(|b| b.attribute("id")),
            Some("1")
        );
    }

    #[test]
    fn test_text_concatenates_and_unescapes() {
        let doc = parse_document("<name>Tom &amp; <b>Jerry</b><![CDATA[ <3]]></name>");
        let Ok(root) = doc else {
            panic!("document should parse");
        };
        assert_eq!(root.text(), "Tom & Jerry <3");
    }

    #[test]
    fn test_whitespace_only_text_is_dropped() {
        let doc = parse_document("<widget>\n  <name>Clock</name>\n</widget>");
        let Ok(root) = doc else {
            panic!("document should parse");
        };
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.text(), "Clock");
    }

    #[test]
    fn test_unclosed_element_is_an_error() {
        assert!(matches!(
            parse_document("<widget><name>Clock</name>"),
            Err(ManifestError::Xml(_))
        ));
    }

    #[test]
    fn test_mismatched_end_tag_is_an_error() {
        assert!(parse_document("<widget></name>").is_err());
    }

    #[test]
    fn test_empty_input_has_no_root() {
        assert!(matches!(
            parse_document("<?xml version=\"1.0\"?>"),
            Err(ManifestError::EmptyDocument)
        ));
    }
}
