//! A namespace-aware XPath 1.0 evaluator over any tree implementing [`DataSourceNode`].
//!
//! Expressions are parsed once with [`parse_expression`] and evaluated with
//! [`evaluate`] against an [`EvaluationContext`] carrying the context node, the
//! document root and a [`NamespaceResolver`] for prefixed name tests.

pub mod ast;
pub mod axes;
pub mod datasource;
pub mod engine;
pub mod error;
pub mod functions;
pub mod namespace;
pub mod operators;
pub mod parser;

pub use ast::{Axis, BinaryOperator, Expression, LocationPath, NodeTest, Step};
pub use datasource::{DataSourceNode, NodeType, QName};
pub use engine::{EvaluationContext, XPathValue, evaluate, format_number};
pub use error::XPathError;
pub use namespace::{NamespaceResolver, NoNamespaces, XML_NAMESPACE};
pub use parser::parse_expression;
