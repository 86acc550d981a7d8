//! Borrowed node handles that expose a [`Document`] to the XPath engine.

use crate::document::{Document, NodeId, NodeKey, NodeKind};
use metacat_xpath1::{DataSourceNode, NodeType, QName};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A tree node or an attribute, borrowed from a document.
#[derive(Clone, Copy)]
pub struct NodeRef<'d> {
    doc: &'d Document,
    id: NodeId,
    attribute: Option<usize>,
}

impl<'d> NodeRef<'d> {
    pub(crate) fn new(doc: &'d Document, id: NodeId, attribute: Option<usize>) -> Self {
        Self { doc, id, attribute }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> NodeKey {
        NodeKey {
            id: self.id,
            attribute: self.attribute,
        }
    }

    pub fn is_attribute(&self) -> bool {
        self.attribute.is_some()
    }

    /// The node read as a single field; see [`Document::value`].
    pub fn value(&self) -> &'d str {
        self.doc.value(self.key()).unwrap_or_default()
    }

    fn kind(&self) -> &'d NodeKind {
        &self.doc.nodes[self.id.0].kind
    }

    /// Document order: an element, then its attributes, then its content.
    fn sort_key(&self) -> (usize, usize) {
        (
            self.doc.order[self.id.0],
            self.attribute.map_or(0, |index| index + 1),
        )
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.attribute {
            Some(index) => write!(f, "NodeRef({}@{})", self.id, index),
            None => write!(f, "NodeRef({})", self.id),
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id && self.attribute == other.attribute
    }
}

impl Eq for NodeRef<'_> {}

impl PartialOrd for NodeRef<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeRef<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl Hash for NodeRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.attribute.hash(state);
    }
}

impl<'d> DataSourceNode<'d> for NodeRef<'d> {
    fn node_type(&self) -> NodeType {
        match (self.kind(), self.attribute) {
            (_, Some(_)) => NodeType::Attribute,
            (NodeKind::Root, None) => NodeType::Root,
            (NodeKind::Element(_), None) => NodeType::Element,
            (NodeKind::Text(_), None) => NodeType::Text,
        }
    }

    fn name(&self) -> Option<QName<'d>> {
        let NodeKind::Element(element) = self.kind() else {
            return None;
        };
        let name = match self.attribute {
            Some(index) => &element.attributes.get(index)?.name,
            None => &element.name,
        };
        Some(QName {
            prefix: name.prefix.as_deref(),
            namespace: name.namespace.as_deref(),
            local_part: &name.local,
        })
    }

    fn string_value(&self) -> String {
        match (self.kind(), self.attribute) {
            (NodeKind::Text(text), _) => text.clone(),
            (NodeKind::Element(_), Some(_)) => self.value().to_string(),
            _ => {
                let mut out = String::new();
                let mut stack = vec![self.id];
                while let Some(id) = stack.pop() {
                    if let NodeKind::Text(text) = &self.doc.nodes[id.0].kind {
                        out.push_str(text);
                    }
                    stack.extend(self.doc.children(id).iter().rev().copied());
                }
                out
            }
        }
    }

    fn attributes(&self) -> Box<dyn Iterator<Item = Self> + 'd> {
        match (self.kind(), self.attribute) {
            (NodeKind::Element(element), None) => {
                let doc = self.doc;
                let id = self.id;
                Box::new((0..element.attributes.len()).map(move |index| NodeRef::new(doc, id, Some(index))))
            }
            _ => Box::new(std::iter::empty()),
        }
    }

    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'd> {
        if self.attribute.is_some() {
            return Box::new(std::iter::empty());
        }
        let doc = self.doc;
        Box::new(doc.children(self.id).iter().map(move |id| NodeRef::new(doc, *id, None)))
    }

    fn parent(&self) -> Option<Self> {
        match self.attribute {
            Some(_) => Some(NodeRef::new(self.doc, self.id, None)),
            None => self.doc.nodes[self.id.0]
                .parent
                .map(|id| NodeRef::new(self.doc, id, None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<gmd:MD_Metadata xmlns:gmd="http://www.isotc211.org/2005/gmd" xmlns:gco="http://www.isotc211.org/2005/gco"><gmd:fileIdentifier><gco:CharacterString>abc-123</gco:CharacterString></gmd:fileIdentifier><gmd:language codeList="iso639" codeListValue="eng">English</gmd:language></gmd:MD_Metadata>"#;

    #[test]
    fn test_node_navigation() {
        let doc = Document::parse(XML).unwrap();
        let root = doc.root();
        assert_eq!(root.node_type(), NodeType::Root);

        let metadata = root.children().next().unwrap();
        let name = metadata.name().unwrap();
        assert_eq!(name.prefix, Some("gmd"));
        assert_eq!(name.namespace, Some("http://www.isotc211.org/2005/gmd"));
        assert_eq!(name.local_part, "MD_Metadata");
        assert_eq!(metadata.parent(), Some(root));
        assert_eq!(metadata.string_value(), "abc-123English");

        let language = metadata.children().nth(1).unwrap();
        let attrs: Vec<_> = language.attributes().collect();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[1].node_type(), NodeType::Attribute);
        assert_eq!(attrs[1].name().unwrap().local_part, "codeListValue");
        assert_eq!(attrs[1].string_value(), "eng");
        assert_eq!(attrs[1].parent(), Some(language));
        assert_eq!(attrs[0].children().count(), 0);
    }

    #[test]
    fn test_document_order() {
        let doc = Document::parse(XML).unwrap();
        let metadata = doc.document_element().unwrap();
        let file_identifier = metadata.children().next().unwrap();
        let language = metadata.children().nth(1).unwrap();
        let code_list = language.attributes().next().unwrap();
        let text = language.children().next().unwrap();

        let mut nodes = vec![text, code_list, language, file_identifier, metadata];
        nodes.sort();
        assert_eq!(nodes, vec![metadata, file_identifier, language, code_list, text]);
    }

    #[test]
    fn test_values_by_node_kind() {
        let doc = Document::parse(XML).unwrap();
        let metadata = doc.document_element().unwrap();
        // Elements report their leading text only.
        assert_eq!(metadata.value(), "");
        let language = metadata.children().nth(1).unwrap();
        assert_eq!(language.value(), "English");
        assert_eq!(language.attributes().next().unwrap().value(), "iso639");
    }
}
