//! Top-level sequence of parsed script elements.

use serde::Serialize;

use super::element::{find_by_key, Element};

/// A parsed script file: its top-level elements in source order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// First top-level element whose key matches `key` ignoring case.
    pub fn get(&self, key: &str) -> Option<&Element> {
        find_by_key(&self.elements, key)
    }

    /// Scalar payload of the first element keyed `key`, if it has one.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Element::value)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::new(vec![
            Element::scalar("name"),
            Element::key_value("Name", Some("first".into())),
            Element::key_block("name", vec![]),
            Element::key_value("path", None),
        ])
    }

    #[test]
    fn test_get_skips_scalars_and_takes_first() {
        let doc = sample();
        let found = doc.get("NAME").unwrap();
        assert!(found.is_key_value());
        assert_eq!(found.value(), Some("first"));
    }

    #[test]
    fn test_value_of_null_pair_is_none() {
        let doc = sample();
        assert!(doc.get("path").is_some());
        assert_eq!(doc.value("path"), None);
        assert_eq!(doc.value("archive"), None);
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::default();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
        assert!(doc.get("anything").is_none());
    }
}
