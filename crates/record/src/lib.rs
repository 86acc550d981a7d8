//! Owned XML metadata records.
//!
//! [`Document`] is a mutable tree parsed with `roxmltree` and written back with
//! `quick-xml`. Its nodes implement [`metacat_xpath1::DataSourceNode`] through
//! [`NodeRef`], so XPath expressions can select them; the selected nodes can
//! then be updated through their [`NodeKey`].

pub mod document;
pub mod error;
pub mod node;
mod serialize;

pub use document::{Attribute, Document, Element, NamespaceDecl, NodeId, NodeKey, NodeKind, XmlName};
pub use error::RecordError;
pub use node::NodeRef;
