//! Evaluates a parsed expression against any [`DataSourceNode`] tree.

use super::ast::{Axis, Expression, LocationPath, NodeTest, NodeTypeTest, Step, UnaryOperator};
use super::{axes, functions, operators};
use crate::datasource::{DataSourceNode, NodeType, QName};
use crate::error::XPathError;
use crate::namespace::NamespaceResolver;
use std::fmt;
use std::marker::PhantomData;

/// The four XPath 1.0 value types.
#[derive(Debug, Clone)]
pub enum XPathValue<N> {
    NodeSet(Vec<N>),
    String(String),
    Number(f64),
    Boolean(bool),
}

impl<'a, N: DataSourceNode<'a>> XPathValue<N> {
    /// `boolean()` conversion.
    pub fn to_bool(&self) -> bool {
        match self {
            XPathValue::Boolean(flag) => *flag,
            XPathValue::Number(n) => !(n.is_nan() || *n == 0.0),
            XPathValue::String(text) => !text.is_empty(),
            XPathValue::NodeSet(set) => !set.is_empty(),
        }
    }

    /// `number()` conversion; unparsable text is NaN.
    pub fn to_number(&self) -> f64 {
        let parse = |text: &str| text.trim().parse::<f64>().unwrap_or(f64::NAN);
        match self {
            XPathValue::Boolean(flag) => f64::from(u8::from(*flag)),
            XPathValue::Number(n) => *n,
            XPathValue::String(text) => parse(text),
            XPathValue::NodeSet(set) => parse(&first_string_value(set)),
        }
    }
}

fn first_string_value<'a, N: DataSourceNode<'a>>(set: &[N]) -> String {
    set.first().map(DataSourceNode::string_value).unwrap_or_default()
}

/// `string()` conversion.
impl<'a, N: DataSourceNode<'a>> fmt::Display for XPathValue<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XPathValue::Boolean(flag) => write!(f, "{}", flag),
            XPathValue::Number(n) => f.write_str(&format_number(*n)),
            XPathValue::String(text) => f.write_str(text),
            XPathValue::NodeSet(set) => f.write_str(&first_string_value(set)),
        }
    }
}

/// XPath number to string conversion: integers without a fraction, `NaN`, `Infinity`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == n.trunc() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Focus and static context for one evaluation. `'a` is the document
/// lifetime, `'d` the lifetime of the borrowed namespace resolver.
pub struct EvaluationContext<'a, 'd, N: DataSourceNode<'a>> {
    pub context_node: N,
    pub root_node: N,
    pub namespaces: &'d dyn NamespaceResolver,
    /// 1-based.
    pub context_position: usize,
    pub context_size: usize,
    _document: PhantomData<&'a ()>,
}

impl<'a, 'd, N: DataSourceNode<'a>> EvaluationContext<'a, 'd, N> {
    pub fn new(
        context_node: N,
        root_node: N,
        namespaces: &'d dyn NamespaceResolver,
        context_position: usize,
        context_size: usize,
    ) -> Self {
        Self {
            context_node,
            root_node,
            namespaces,
            context_position,
            context_size,
            _document: PhantomData,
        }
    }

    /// A context positioned on `node`, sharing root and namespaces.
    fn focus(&self, node: N, position: usize, size: usize) -> Self {
        Self::new(node, self.root_node, self.namespaces, position, size)
    }
}

pub fn evaluate<'a, N>(expr: &Expression, ctx: &EvaluationContext<'a, '_, N>) -> Result<XPathValue<N>, XPathError>
where
    N: DataSourceNode<'a> + 'a,
{
    Ok(match expr {
        Expression::Literal(text) => XPathValue::String(text.clone()),
        Expression::Number(n) => XPathValue::Number(*n),
        Expression::LocationPath(path) => XPathValue::NodeSet(select_path(path, ctx)?),
        Expression::UnaryOp {
            op: UnaryOperator::Minus,
            expr: operand,
        } => XPathValue::Number(-evaluate(operand, ctx)?.to_number()),
        Expression::BinaryOp { left, op, right } => {
            let lhs = evaluate(left, ctx)?;
            let rhs = evaluate(right, ctx)?;
            operators::evaluate(*op, lhs, rhs)?
        }
        Expression::FunctionCall { name, args } => {
            let values = args
                .iter()
                .map(|arg| evaluate(arg, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            functions::evaluate_function(name, values, ctx)?
        }
    })
}

fn select_path<'a, N>(path: &LocationPath, ctx: &EvaluationContext<'a, '_, N>) -> Result<Vec<N>, XPathError>
where
    N: DataSourceNode<'a> + 'a,
{
    let mut current = match &path.start_point {
        Some(start) => match evaluate(start, ctx)? {
            XPathValue::NodeSet(set) => set,
            other => {
                return Err(XPathError::TypeError(format!(
                    "Cannot continue a path from the non-node-set value '{}'",
                    other
                )));
            }
        },
        None if path.is_absolute => vec![ctx.root_node],
        None => vec![ctx.context_node],
    };
    for step in &path.steps {
        current = select_step(step, &current, ctx)?;
    }
    Ok(current)
}

/// Applies one step to every context node; the union comes back in
/// document order without duplicates.
fn select_step<'a, N>(step: &Step, context: &[N], ctx: &EvaluationContext<'a, '_, N>) -> Result<Vec<N>, XPathError>
where
    N: DataSourceNode<'a> + 'a,
{
    let mut selected = Vec::new();
    for &origin in context {
        let mut candidates = Vec::new();
        for node in axes::collect(step.axis, origin) {
            if passes_node_test(node, &step.node_test, step.axis, ctx.namespaces)? {
                candidates.push(node);
            }
        }
        selected.extend(filter_predicates(candidates, &step.predicates, ctx)?);
    }
    selected.sort();
    selected.dedup();
    Ok(selected)
}

/// `title`, `dc:title` or `dc:*` against a node name. Unprefixed tests only
/// match names in no namespace.
fn name_matches(name: QName<'_>, test: &str, namespaces: &dyn NamespaceResolver) -> Result<bool, XPathError> {
    let Some((prefix, local)) = test.split_once(':') else {
        return Ok(name.namespace.is_none() && name.local_part == test);
    };
    let uri = namespaces
        .resolve_or_builtin(prefix)
        .ok_or_else(|| XPathError::UnknownPrefix(prefix.to_string()))?;
    Ok(name.namespace == Some(uri) && (local == "*" || name.local_part == local))
}

fn passes_node_test<'a, N>(
    node: N,
    test: &NodeTest,
    axis: Axis,
    namespaces: &dyn NamespaceResolver,
) -> Result<bool, XPathError>
where
    N: DataSourceNode<'a>,
{
    // Name tests select the axis's principal node type only.
    let principal = if axis == Axis::Attribute {
        NodeType::Attribute
    } else {
        NodeType::Element
    };
    let kind = node.node_type();
    Ok(match test {
        NodeTest::Wildcard => kind == principal,
        NodeTest::Name(expected) => match node.name() {
            Some(name) if kind == principal => name_matches(name, expected, namespaces)?,
            _ => false,
        },
        NodeTest::NodeType(NodeTypeTest::Node) => true,
        NodeTest::NodeType(NodeTypeTest::Text) => kind == NodeType::Text,
        NodeTest::NodeType(NodeTypeTest::Comment) => kind == NodeType::Comment,
        NodeTest::NodeType(NodeTypeTest::ProcessingInstruction) => kind == NodeType::ProcessingInstruction,
    })
}

/// Each predicate filters the survivors of the previous one; a numeric
/// result is compared with the proximity position.
fn filter_predicates<'a, N>(
    mut nodes: Vec<N>,
    predicates: &[Expression],
    ctx: &EvaluationContext<'a, '_, N>,
) -> Result<Vec<N>, XPathError>
where
    N: DataSourceNode<'a> + 'a,
{
    for predicate in predicates {
        let size = nodes.len();
        let mut kept = Vec::with_capacity(size);
        for (index, node) in nodes.into_iter().enumerate() {
            let position = index + 1;
            let keep = match evaluate(predicate, &ctx.focus(node, position, size))? {
                XPathValue::Number(n) => n == position as f64,
                other => other.to_bool(),
            };
            if keep {
                kept.push(node);
            }
        }
        nodes = kept;
    }
    Ok(nodes)
}
