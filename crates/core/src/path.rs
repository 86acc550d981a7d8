//! Path queries over records: value extraction and in-place updates.
//!
//! Expressions are XPath 1.0 with prefixed element names. Every prefix must
//! be known to the namespace registry before anything is evaluated.

use crate::config::{self, NamespaceRegistry};
use crate::error::{ConfigurationError, QueryError};
use crate::record::Record;
use metacat_record::{Document, NodeKey, NodeRef};
use metacat_xpath1::{
    Axis, EvaluationContext, Expression, NamespaceResolver, XPathError, XPathValue, evaluate,
    parse_expression,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of resolving a path against a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedValue {
    /// Nothing matched.
    None,
    /// Exactly one node matched, or the expression produced a single value.
    Scalar(String),
    /// Several nodes matched; their values joined with `,`.
    Joined(String),
}

impl ResolvedValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResolvedValue::None => None,
            ResolvedValue::Scalar(s) | ResolvedValue::Joined(s) => Some(s),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ResolvedValue::None)
    }

    pub fn into_option(self) -> Option<String> {
        match self {
            ResolvedValue::None => None,
            ResolvedValue::Scalar(s) | ResolvedValue::Joined(s) => Some(s),
        }
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().unwrap_or_default())
    }
}

/// Sets every node selected by `path` to `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInstruction {
    #[serde(alias = "xpath")]
    pub path: String,
    pub value: String,
}

impl UpdateInstruction {
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

/// A parsed expression whose prefixes have been checked against a registry.
#[derive(Debug, Clone)]
pub struct CompiledPath<'r> {
    source: String,
    expression: Expression,
    registry: &'r NamespaceRegistry,
}

impl<'r> CompiledPath<'r> {
    pub fn compile(source: &str, registry: &'r NamespaceRegistry) -> Result<Self, QueryError> {
        let expression = parse_expression(source).map_err(|e| {
            log::debug!("Failed to compile path '{}': {}", source, e);
            QueryError::Parse {
                expression: source.to_string(),
                source: e,
            }
        })?;
        check_name_tests(&expression, registry)?;
        Ok(Self {
            source: source.to_string(),
            expression,
            registry,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates with the document element as context node.
    pub fn evaluate<'d>(&self, document: &'d Document) -> Result<XPathValue<NodeRef<'d>>, QueryError> {
        let root = document.root();
        let context = document.document_element().unwrap_or(root);
        let e_ctx = EvaluationContext::new(context, root, self.registry, 1, 1);
        evaluate(&self.expression, &e_ctx).map_err(|e| QueryError::Evaluation {
            expression: self.source.clone(),
            source: e,
        })
    }

    /// Nodes selected by the expression, in document order.
    pub fn select<'d>(&self, document: &'d Document) -> Result<Vec<NodeRef<'d>>, QueryError> {
        match self.evaluate(document)? {
            XPathValue::NodeSet(nodes) => Ok(nodes),
            other => Err(QueryError::Evaluation {
                expression: self.source.clone(),
                source: XPathError::TypeError(format!(
                    "Expected a node-set, got the value '{}'",
                    other
                )),
            }),
        }
    }

    pub fn resolve(&self, document: &Document) -> Result<ResolvedValue, QueryError> {
        let nodes = match self.evaluate(document)? {
            XPathValue::NodeSet(nodes) => nodes,
            scalar => return Ok(ResolvedValue::Scalar(scalar.to_string())),
        };
        Ok(match nodes.as_slice() {
            [] => ResolvedValue::None,
            [node] => ResolvedValue::Scalar(node.value().to_string()),
            many => ResolvedValue::Joined(
                many.iter().map(|n| n.value()).collect::<Vec<_>>().join(","),
            ),
        })
    }
}

/// Element name tests need a registered or built-in prefix; attribute name
/// tests may be bare.
fn check_name_tests(
    expression: &Expression,
    registry: &NamespaceRegistry,
) -> Result<(), ConfigurationError> {
    for (axis, name) in expression.name_tests() {
        match name.split_once(':') {
            Some((prefix, _)) if registry.resolve_or_builtin(prefix).is_none() => {
                return Err(ConfigurationError::UnknownPrefix(prefix.to_string()));
            }
            Some(_) => {}
            None if axis == Axis::Attribute => {}
            None => return Err(ConfigurationError::UnqualifiedName(name.to_string())),
        }
    }
    Ok(())
}

/// Resolves `expression` against a record using the process-wide registry.
pub fn resolve(record: &Record, expression: &str) -> Result<ResolvedValue, QueryError> {
    resolve_with(record.document()?, expression, config::global())
}

pub fn resolve_with(
    document: &Document,
    expression: &str,
    registry: &NamespaceRegistry,
) -> Result<ResolvedValue, QueryError> {
    CompiledPath::compile(expression, registry)?.resolve(document)
}

/// Applies `instructions` in order and returns the number of node values changed.
///
/// Nodes already holding the target value are left alone, so applying the
/// same batch twice changes nothing the second time. A failing instruction
/// stops the batch; changes made by earlier instructions are kept.
pub fn update_nodes(
    document: &mut Document,
    instructions: &[UpdateInstruction],
    registry: &NamespaceRegistry,
) -> Result<usize, QueryError> {
    let mut changed = 0;
    for instruction in instructions {
        let path = CompiledPath::compile(&instruction.path, registry)?;
        let keys: Vec<NodeKey> = path.select(document)?.iter().map(NodeRef::key).collect();
        for key in keys {
            if document.set_value(key, &instruction.value)? {
                changed += 1;
            }
        }
    }
    log::debug!(
        "Update batch of {} instructions changed {} nodes",
        instructions.len(),
        changed
    );
    Ok(changed)
}

/// Applies `instructions` to a record with the process-wide registry and
/// returns the serialized result.
pub fn apply_updates(
    record: &mut Record,
    instructions: &[UpdateInstruction],
) -> Result<String, QueryError> {
    let document = record.document_mut()?;
    update_nodes(document, instructions, config::global())?;
    Ok(document.to_xml_string()?)
}

/// Expands `prefix:name/prefix:name` to `{uri}name/{uri}name`.
pub fn nspath_eval(path: &str, registry: &NamespaceRegistry) -> Result<String, ConfigurationError> {
    let segments = path
        .split('/')
        .map(|segment| match segment.split_once(':') {
            Some((prefix, local)) => Ok(format!("{{{}}}{}", registry.uri(prefix)?, local)),
            None => Err(ConfigurationError::UnqualifiedName(segment.to_string())),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(segments.join("/"))
}
