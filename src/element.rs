//! minimal owned xml tree, streamed through quick-xml at save time
//!
//! The document accumulates `DataArray` nodes across many attach calls
//! before anything is serialized, so the tree is held in memory and only
//! turned into events once the file is written.

use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::Error;

/// One xml element: tag name, attributes in insertion order, optional text
/// content, and child elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// set an attribute, replacing any existing value for the same key
    pub fn set_attribute(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(existing) = self.attributes.iter_mut().find(|(k, _)| k == key) {
            existing.1 = value;
        } else {
            self.attributes.push((key.to_string(), value));
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// append a child and return a handle to it
    pub fn push_child(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// first child with the given tag name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// most recently added child with the given tag name
    pub fn last_child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().rev().find(|c| c.name == name)
    }

    /// find an existing child with the given tag name or create an empty one
    pub fn child_or_insert(&mut self, name: &str) -> &mut Element {
        match self.children.iter().position(|c| c.name == name) {
            Some(at) => &mut self.children[at],
            None => self.push_child(Element::new(name)),
        }
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// stream this element and its subtree as xml events
    pub fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
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
            child.write_xml(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_string(element: &Element) -> String {
        let mut writer = Writer::new(Vec::new());
        element.write_xml(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn empty_element_self_closes() {
        let mut element = Element::new("DataArray");
        element.set_attribute("Name", "u");
        assert_eq!(to_string(&element), r#"<DataArray Name="u"/>"#);
    }

    #[test]
    fn nested_elements_and_text() {
        let mut root = Element::new("PointData");
        let child = root.push_child(Element::new("DataArray"));
        child.set_attribute("format", "binary");
        child.set_text("AAAA");

        assert_eq!(
            to_string(&root),
            r#"<PointData><DataArray format="binary">AAAA</DataArray></PointData>"#
        );
    }

    #[test]
    fn set_attribute_replaces() {
        let mut element = Element::new("Piece");
        element.set_attribute("Extent", "0 1 0 1 0 1");
        element.set_attribute("Extent", "0 2 0 2 0 2");
        assert_eq!(element.attribute("Extent"), Some("0 2 0 2 0 2"));
        assert_eq!(to_string(&element), r#"<Piece Extent="0 2 0 2 0 2"/>"#);
    }

    #[test]
    fn child_or_insert_reuses() {
        let mut root = Element::new("Piece");
        root.child_or_insert("PointData").set_attribute("a", "1");
        root.child_or_insert("PointData").set_attribute("b", "2");

        assert_eq!(root.children().len(), 1);
        let child = root.child("PointData").unwrap();
        assert_eq!(child.attribute("a"), Some("1"));
        assert_eq!(child.attribute("b"), Some("2"));
    }

    #[test]
    fn last_child_mut_finds_latest() {
        let mut root = Element::new("Grid");
        root.push_child(Element::new("Piece")).set_attribute("n", "1");
        root.push_child(Element::new("Piece")).set_attribute("n", "2");

        let piece = root.last_child_mut("Piece").unwrap();
        assert_eq!(piece.attribute("n"), Some("2"));
    }
}
