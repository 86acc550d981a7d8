//! The read-only tree interface the evaluator navigates.
use std::hash::Hash;

/// A namespace-qualified name. `prefix` is the lexical prefix used in the
/// source document and carries no meaning for matching; `namespace` is the
/// URI the prefix was bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QName<'a> {
    pub prefix: Option<&'a str>,
    pub namespace: Option<&'a str>,
    pub local_part: &'a str,
}

/// Node kinds of the XPath 1.0 data model, minus namespace nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Root,
    Element,
    Attribute,
    Text,
    Comment,
    ProcessingInstruction,
}

/// A node handle in a read-only document of lifetime `'a`.
///
/// Handles are `Copy` and their `Ord` is document order; attributes sort
/// after their owning element and before its children.
pub trait DataSourceNode<'a>:
    std::fmt::Debug + Clone + Copy + PartialEq + Eq + Hash + PartialOrd + Ord
{
    fn node_type(&self) -> NodeType;

    /// `None` for text and root nodes.
    fn name(&self) -> Option<QName<'a>>;

    /// Text content for text nodes, the value for attributes, and the
    /// concatenated descendant text for elements and the root.
    fn string_value(&self) -> String;

    fn attributes(&self) -> Box<dyn Iterator<Item = Self> + 'a>;

    /// Children in document order, attributes excluded.
    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a>;

    /// The owning element for attributes; `None` only for the root.
    fn parent(&self) -> Option<Self>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cmp::Ordering;
    use std::hash::Hasher;

    pub const CSW_NS: &str = "http://www.opengis.net/cat/csw/2.0.2";
    pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

    #[derive(Debug)]
    struct Slot<'a> {
        node_type: NodeType,
        name: Option<QName<'a>>,
        value: &'a str,
        parent: Option<usize>,
        children: Vec<usize>,
        attributes: Vec<usize>,
    }

    /// A hand-built tree whose slot indexes follow document order.
    #[derive(Debug, Default)]
    pub struct MockTree<'a> {
        slots: Vec<Slot<'a>>,
    }

    impl<'a> MockTree<'a> {
        fn push(&mut self, node_type: NodeType, name: Option<QName<'a>>, value: &'a str, parent: Option<usize>) -> usize {
            let id = self.slots.len();
            self.slots.push(Slot {
                node_type,
                name,
                value,
                parent,
                children: Vec::new(),
                attributes: Vec::new(),
            });
            if let Some(p) = parent {
                if node_type == NodeType::Attribute {
                    self.slots[p].attributes.push(id);
                } else {
                    self.slots[p].children.push(id);
                }
            }
            id
        }

        fn element(&mut self, parent: usize, prefix: &'a str, namespace: &'a str, local_part: &'a str, value: &'a str) -> usize {
            let name = QName {
                prefix: Some(prefix),
                namespace: Some(namespace),
                local_part,
            };
            self.push(NodeType::Element, Some(name), value, Some(parent))
        }

        fn text(&mut self, parent: usize, value: &'a str) -> usize {
            self.push(NodeType::Text, None, value, Some(parent))
        }
    }

    #[derive(Debug, Clone, Copy)]
    pub struct MockNode<'a> {
        pub id: usize,
        pub tree: &'a MockTree<'a>,
    }

    impl<'a> MockNode<'a> {
        fn slot(&self) -> &'a Slot<'a> {
            &self.tree.slots[self.id]
        }

        fn handles(&self, ids: &'a [usize]) -> Box<dyn Iterator<Item = Self> + 'a> {
            let tree = self.tree;
            Box::new(ids.iter().map(move |&id| MockNode { id, tree }))
        }
    }

    impl PartialEq for MockNode<'_> {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }
    impl Eq for MockNode<'_> {}

    impl PartialOrd for MockNode<'_> {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for MockNode<'_> {
        fn cmp(&self, other: &Self) -> Ordering {
            self.id.cmp(&other.id)
        }
    }

    impl Hash for MockNode<'_> {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.id.hash(state);
        }
    }

    impl<'a> DataSourceNode<'a> for MockNode<'a> {
        fn node_type(&self) -> NodeType {
            self.slot().node_type
        }

        fn name(&self) -> Option<QName<'a>> {
            self.slot().name
        }

        fn string_value(&self) -> String {
            self.slot().value.to_string()
        }

        fn attributes(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
            self.handles(&self.slot().attributes)
        }

        fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
            self.handles(&self.slot().children)
        }

        fn parent(&self) -> Option<Self> {
            self.slot().parent.map(|id| MockNode { id, tree: self.tree })
        }
    }

    /// ```text
    /// 0 root
    /// 1 csw:Record
    /// 2   dc:identifier  (3 @scheme="urn", 4 "rec-1")
    /// 5   dc:title       (6 "Alpha")
    /// 7   dc:title       (8 "Beta")
    /// 9   <!-- note -->
    /// ```
    pub fn create_test_tree<'a>() -> MockTree<'a> {
        let mut tree = MockTree::default();
        let root = tree.push(NodeType::Root, None, "rec-1AlphaBeta", None);
        let record = tree.element(root, "csw", CSW_NS, "Record", "rec-1AlphaBeta");

        let identifier = tree.element(record, "dc", DC_NS, "identifier", "rec-1");
        let scheme = QName {
            prefix: None,
            namespace: None,
            local_part: "scheme",
        };
        tree.push(NodeType::Attribute, Some(scheme), "urn", Some(identifier));
        tree.text(identifier, "rec-1");

        let alpha = tree.element(record, "dc", DC_NS, "title", "Alpha");
        tree.text(alpha, "Alpha");
        let beta = tree.element(record, "dc", DC_NS, "title", "Beta");
        tree.text(beta, "Beta");

        tree.push(NodeType::Comment, None, " note ", Some(record));
        tree
    }
}
