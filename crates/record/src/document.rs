//! An owned, mutable XML tree built from `roxmltree` parse results.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Element content is
//! modelled as child nodes, so an element's leading text is its first child
//! when that child is a text node, and text following an element inside its
//! parent is the element's next sibling. Comments and processing instructions
//! are not retained.

use crate::error::RecordError;
use crate::node::NodeRef;

/// Index of a node in its document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Addresses either a tree node or one attribute of an element. Unlike a
/// [`NodeRef`], a key does not borrow the document and stays valid across
/// value updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub id: NodeId,
    pub attribute: Option<usize>,
}

/// A possibly namespaced XML name, keeping the prefix seen in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlName {
    pub prefix: Option<String>,
    pub namespace: Option<String>,
    pub local: String,
}

impl XmlName {
    /// The lexical `prefix:local` form.
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local),
            None => self.local.clone(),
        }
    }

    /// The `{uri}local` form, or `local` when not namespaced.
    pub fn clark(&self) -> String {
        match &self.namespace {
            Some(uri) => format!("{{{}}}{}", uri, self.local),
            None => self.local.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: XmlName,
    pub value: String,
}

/// A namespace declared on an element (`xmlns` or `xmlns:prefix`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    pub prefix: Option<String>,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: XmlName,
    pub attributes: Vec<Attribute>,
    pub namespaces: Vec<NamespaceDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub(crate) nodes: Vec<NodeData>,
    /// Document-order position of every node, indexed by id.
    pub(crate) order: Vec<usize>,
}

const ROOT: NodeId = NodeId(0);

impl Document {
    /// Parses XML text into an owned document.
    pub fn parse(text: &str) -> Result<Self, RecordError> {
        let source = roxmltree::Document::parse(text)?;
        let mut doc = Document {
            nodes: vec![NodeData {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
            order: Vec::new(),
        };
        for child in source.root().children() {
            doc.import(child, ROOT);
        }
        doc.reindex();
        log::trace!("Parsed document with {} nodes", doc.nodes.len());
        Ok(doc)
    }

    fn import(&mut self, node: roxmltree::Node<'_, '_>, parent: NodeId) {
        let kind = if node.is_element() {
            NodeKind::Element(Element {
                name: element_name(node),
                attributes: node
                    .attributes()
                    .map(|attr| Attribute {
                        name: XmlName {
                            prefix: attr
                                .namespace()
                                .and_then(|uri| node.lookup_prefix(uri))
                                .map(str::to_string),
                            namespace: attr.namespace().map(str::to_string),
                            local: attr.name().to_string(),
                        },
                        value: attr.value().to_string(),
                    })
                    .collect(),
                namespaces: declared_namespaces(node),
            })
        } else if node.is_text() {
            NodeKind::Text(node.text().unwrap_or_default().to_string())
        } else {
            return;
        };

        let id = self.push(kind, parent);
        for child in node.children() {
            self.import(child, id);
        }
    }

    fn push(&mut self, kind: NodeKind, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Recomputes document-order positions after a structural change.
    fn reindex(&mut self) {
        self.order = vec![0; self.nodes.len()];
        let mut position = 0;
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            self.order[id.0] = position;
            position += 1;
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
    }

    /// The document (root) node.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(self, ROOT, None)
    }

    /// The single top-level element.
    pub fn document_element(&self) -> Option<NodeRef<'_>> {
        self.nodes[ROOT.0]
            .children
            .iter()
            .find(|id| matches!(self.nodes[id.0].kind, NodeKind::Element(_)))
            .map(|id| NodeRef::new(self, *id, None))
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.0).map(|n| &n.kind)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Resolves a key back to a borrowed handle.
    pub fn node(&self, key: NodeKey) -> Option<NodeRef<'_>> {
        let data = self.nodes.get(key.id.0)?;
        if let Some(index) = key.attribute {
            match &data.kind {
                NodeKind::Element(e) if index < e.attributes.len() => {}
                _ => return None,
            }
        }
        Some(NodeRef::new(self, key.id, key.attribute))
    }

    /// The leading text of an element: its first child when that is a text node.
    pub fn element_text(&self, id: NodeId) -> Option<&str> {
        let first = self.nodes.get(id.0)?.children.first()?;
        match &self.nodes[first.0].kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The value a node reports when read as a single field: the leading text
    /// of an element (empty when absent), the value of an attribute, or the
    /// content of a text node.
    pub fn value(&self, key: NodeKey) -> Option<&str> {
        let data = self.nodes.get(key.id.0)?;
        match (&data.kind, key.attribute) {
            (NodeKind::Element(e), Some(index)) => e.attributes.get(index).map(|a| a.value.as_str()),
            (NodeKind::Element(_), None) => Some(self.element_text(key.id).unwrap_or_default()),
            (NodeKind::Text(text), None) => Some(text),
            _ => None,
        }
    }

    /// Sets the value of a node as read by [`Document::value`]. Returns whether
    /// the document changed; an equal value leaves the node untouched.
    pub fn set_value(&mut self, key: NodeKey, value: &str) -> Result<bool, RecordError> {
        if self.value(key).ok_or_else(|| RecordError::MissingNode(key.id.to_string()))? == value {
            return Ok(false);
        }
        let is_element = matches!(self.nodes[key.id.0].kind, NodeKind::Element(_));
        match (&mut self.nodes[key.id.0].kind, key.attribute) {
            (NodeKind::Element(e), Some(index)) => e.attributes[index].value = value.to_string(),
            (NodeKind::Text(text), None) => *text = value.to_string(),
            _ => {}
        }
        if is_element && key.attribute.is_none() {
            self.set_element_text(key.id, value);
        }
        log::trace!("Set value of node {} to '{}'", key.id, value);
        Ok(true)
    }

    fn set_element_text(&mut self, id: NodeId, value: &str) {
        if let Some(first) = self.nodes[id.0].children.first().copied() {
            if let NodeKind::Text(text) = &mut self.nodes[first.0].kind {
                *text = value.to_string();
                return;
            }
        }
        let text_id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind: NodeKind::Text(value.to_string()),
            parent: Some(id),
            children: Vec::new(),
        });
        self.nodes[id.0].children.insert(0, text_id);
        self.reindex();
    }

    /// Every text node and attribute value, in document order.
    pub fn text_values(&self) -> Vec<&str> {
        let mut values = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            let data = &self.nodes[id.0];
            match &data.kind {
                NodeKind::Text(text) => values.push(text.as_str()),
                NodeKind::Element(e) => values.extend(e.attributes.iter().map(|a| a.value.as_str())),
                NodeKind::Root => {}
            }
            stack.extend(data.children.iter().rev().copied());
        }
        values
    }
}

fn element_name(node: roxmltree::Node<'_, '_>) -> XmlName {
    let tag = node.tag_name();
    XmlName {
        prefix: tag
            .namespace()
            .and_then(|uri| node.lookup_prefix(uri))
            .map(str::to_string),
        namespace: tag.namespace().map(str::to_string),
        local: tag.name().to_string(),
    }
}

/// Namespaces in scope on `node` that are not inherited unchanged from its parent.
fn declared_namespaces(node: roxmltree::Node<'_, '_>) -> Vec<NamespaceDecl> {
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();
    let mut declared: Vec<NamespaceDecl> = node
        .namespaces()
        .filter(|ns| !inherited.contains(&(ns.name(), ns.uri())))
        .filter(|ns| ns.name() != Some("xml"))
        .map(|ns| NamespaceDecl {
            prefix: ns.name().map(str::to_string),
            uri: ns.uri().to_string(),
        })
        .collect();
    declared.sort_by(|a, b| a.prefix.cmp(&b.prefix));
    declared
}
