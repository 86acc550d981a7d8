//! Contains pure functions for evaluating XPath binary operators.

use crate::ast::BinaryOperator;
use crate::datasource::DataSourceNode;
use crate::engine::XPathValue;
use crate::error::XPathError;

pub fn evaluate<'a, N: DataSourceNode<'a> + 'a>(
    op: BinaryOperator,
    left: XPathValue<N>,
    right: XPathValue<N>,
) -> Result<XPathValue<N>, XPathError> {
    use BinaryOperator::*;
    match op {
        Or => Ok(XPathValue::Boolean(left.to_bool() || right.to_bool())),
        And => Ok(XPathValue::Boolean(left.to_bool() && right.to_bool())),
        Equals | NotEquals | LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual => {
            Ok(XPathValue::Boolean(compare(op, &left, &right)))
        }
        Plus => Ok(XPathValue::Number(left.to_number() + right.to_number())),
        Minus => Ok(XPathValue::Number(left.to_number() - right.to_number())),
        Multiply => Ok(XPathValue::Number(left.to_number() * right.to_number())),
        Divide => Ok(XPathValue::Number(left.to_number() / right.to_number())),
        Modulo => Ok(XPathValue::Number(left.to_number() % right.to_number())),
        Union => evaluate_union(left, right),
    }
}

/// Comparison with node-set semantics: a node-set compares true when any of
/// its members does.
fn compare<'a, N: DataSourceNode<'a> + 'a>(
    op: BinaryOperator,
    left: &XPathValue<N>,
    right: &XPathValue<N>,
) -> bool {
    match (left, right) {
        (XPathValue::NodeSet(l), XPathValue::NodeSet(r)) => {
            let r_values: Vec<String> = r.iter().map(|n| n.string_value()).collect();
            l.iter().any(|ln| {
                let lv = ln.string_value();
                r_values.iter().any(|rv| compare_atoms(op, &Atom::Str(&lv), &Atom::Str(rv)))
            })
        }
        (XPathValue::NodeSet(nodes), other) => nodes.iter().any(|n| {
            let value = n.string_value();
            compare_atoms(op, &Atom::Str(&value), &Atom::of(other))
        }),
        (other, XPathValue::NodeSet(nodes)) => nodes.iter().any(|n| {
            let value = n.string_value();
            compare_atoms(op, &Atom::of(other), &Atom::Str(&value))
        }),
        (l, r) => compare_atoms(op, &Atom::of(l), &Atom::of(r)),
    }
}

enum Atom<'v> {
    Str(&'v str),
    Num(f64),
    Bool(bool),
}

impl<'v> Atom<'v> {
    fn of<'a, N: DataSourceNode<'a> + 'a>(value: &'v XPathValue<N>) -> Self {
        match value {
            XPathValue::String(s) => Atom::Str(s),
            XPathValue::Number(n) => Atom::Num(*n),
            XPathValue::Boolean(b) => Atom::Bool(*b),
            XPathValue::NodeSet(_) => Atom::Bool(value.to_bool()),
        }
    }

    fn number(&self) -> f64 {
        match self {
            Atom::Str(s) => s.trim().parse().unwrap_or(f64::NAN),
            Atom::Num(n) => *n,
            Atom::Bool(b) => f64::from(u8::from(*b)),
        }
    }

    fn boolean(&self) -> bool {
        match self {
            Atom::Str(s) => !s.is_empty(),
            Atom::Num(n) => *n != 0.0 && !n.is_nan(),
            Atom::Bool(b) => *b,
        }
    }
}

fn compare_atoms(op: BinaryOperator, l: &Atom<'_>, r: &Atom<'_>) -> bool {
    use BinaryOperator::*;
    match op {
        Equals | NotEquals => {
            let equal = match (l, r) {
                (Atom::Bool(_), _) | (_, Atom::Bool(_)) => l.boolean() == r.boolean(),
                (Atom::Num(_), _) | (_, Atom::Num(_)) => l.number() == r.number(),
                (Atom::Str(a), Atom::Str(b)) => a == b,
            };
            if op == Equals { equal } else { !equal }
        }
        LessThan => l.number() < r.number(),
        LessThanOrEqual => l.number() <= r.number(),
        GreaterThan => l.number() > r.number(),
        GreaterThanOrEqual => l.number() >= r.number(),
        _ => false,
    }
}

fn evaluate_union<'a, N: DataSourceNode<'a> + 'a>(
    left: XPathValue<N>,
    right: XPathValue<N>,
) -> Result<XPathValue<N>, XPathError> {
    let XPathValue::NodeSet(l_nodes) = left else {
        return Err(XPathError::TypeError(
            "Left-hand side of '|' must be a node-set.".to_string(),
        ));
    };
    let XPathValue::NodeSet(r_nodes) = right else {
        return Err(XPathError::TypeError(
            "Right-hand side of '|' must be a node-set.".to_string(),
        ));
    };

    let mut merged = l_nodes;
    merged.extend(r_nodes);
    merged.sort();
    merged.dedup();
    Ok(XPathValue::NodeSet(merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::tests::{MockNode, create_test_tree};

    #[test]
    fn test_logical_operators() {
        let t = XPathValue::Boolean::<MockNode>(true);
        let f = XPathValue::Boolean::<MockNode>(false);
        assert!(evaluate(BinaryOperator::Or, t.clone(), f.clone()).unwrap().to_bool());
        assert!(!evaluate(BinaryOperator::And, t, f).unwrap().to_bool());
    }

    #[test]
    fn test_arithmetic_operators() {
        let left = XPathValue::Number::<MockNode>(10.0);
        let right = XPathValue::Number::<MockNode>(3.0);
        assert_eq!(
            evaluate(BinaryOperator::Minus, left.clone(), right.clone())
                .unwrap()
                .to_number(),
            7.0
        );
        assert_eq!(
            evaluate(BinaryOperator::Modulo, left, right).unwrap().to_number(),
            1.0
        );
    }

    #[test]
    fn test_node_set_comparison_is_existential() {
        let tree = create_test_tree();
        let alpha = MockNode { id: 5, tree: &tree };
        let beta = MockNode { id: 7, tree: &tree };
        let titles = XPathValue::NodeSet(vec![alpha, beta]);

        let beta_literal = XPathValue::String("Beta".to_string());
        assert!(evaluate(BinaryOperator::Equals, titles.clone(), beta_literal.clone())
            .unwrap()
            .to_bool());
        // Both titles differ from something, so != holds as well.
        assert!(evaluate(BinaryOperator::NotEquals, titles.clone(), beta_literal)
            .unwrap()
            .to_bool());
        let gamma = XPathValue::String("Gamma".to_string());
        assert!(!evaluate(BinaryOperator::Equals, titles, gamma).unwrap().to_bool());
    }

    #[test]
    fn test_mixed_equality() {
        let num = XPathValue::Number::<MockNode>(1.0);
        let s = XPathValue::String::<MockNode>("1.0".to_string());
        assert!(evaluate(BinaryOperator::Equals, num, s).unwrap().to_bool());
    }

    #[test]
    fn test_union_operator() {
        let tree = create_test_tree();
        let record = MockNode { id: 1, tree: &tree };
        let title = MockNode { id: 5, tree: &tree };
        let text = MockNode { id: 6, tree: &tree };

        let left = XPathValue::NodeSet(vec![title, record]);
        let right = XPathValue::NodeSet(vec![title, text]);

        let result = evaluate(BinaryOperator::Union, left, right).unwrap();
        if let XPathValue::NodeSet(nodes) = result {
            assert_eq!(nodes, vec![record, title, text]);
        } else {
            panic!("Expected NodeSet");
        }

        let not_nodes = XPathValue::Number::<MockNode>(1.0);
        assert!(evaluate(BinaryOperator::Union, not_nodes.clone(), not_nodes).is_err());
    }
}
