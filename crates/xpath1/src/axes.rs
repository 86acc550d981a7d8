//! Node collection along each XPath axis.
//!
//! Every collector appends to `results`, skipping nodes already in `seen`.
//! Forward axes append in document order; the engine sorts afterwards either way.

use crate::ast::Axis;
use crate::datasource::{DataSourceNode, NodeType};
use std::collections::HashSet;

/// The nodes on `axis` from `node` in proximity order: document order for
/// forward axes, reverse document order for reverse ones.
pub fn collect<'a, N: DataSourceNode<'a>>(axis: Axis, node: N) -> Vec<N> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let (seen_ref, out_ref) = (&mut seen, &mut out);
    match axis {
        Axis::SelfAxis => collect_self_nodes(node, seen_ref, out_ref),
        Axis::Child => collect_child_nodes(node, seen_ref, out_ref),
        Axis::Attribute => collect_attribute_nodes(node, seen_ref, out_ref),
        Axis::Descendant => collect_descendant_nodes(node, seen_ref, out_ref),
        Axis::DescendantOrSelf => collect_descendant_or_self_nodes(node, seen_ref, out_ref),
        Axis::Parent => collect_parent_nodes(node, seen_ref, out_ref),
        Axis::Ancestor => collect_ancestor_nodes(node, seen_ref, out_ref),
        Axis::AncestorOrSelf => {
            collect_self_nodes(node, seen_ref, out_ref);
            collect_ancestor_nodes(node, seen_ref, out_ref);
        }
        Axis::FollowingSibling => collect_following_sibling_nodes(node, seen_ref, out_ref),
        Axis::PrecedingSibling => collect_preceding_sibling_nodes(node, seen_ref, out_ref),
        Axis::Following => collect_following_nodes(node, seen_ref, out_ref),
        Axis::Preceding => collect_preceding_nodes(node, seen_ref, out_ref),
    }
    out.sort();
    if axis.is_reverse() {
        out.reverse();
    }
    out
}

fn push_unique<'a, N: DataSourceNode<'a>>(node: N, seen: &mut HashSet<N>, results: &mut Vec<N>) {
    if seen.insert(node) {
        results.push(node);
    }
}

pub fn collect_self_nodes<'a, N: DataSourceNode<'a>>(
    node: N,
    seen: &mut HashSet<N>,
    results: &mut Vec<N>,
) {
    push_unique(node, seen, results);
}

pub fn collect_child_nodes<'a, N: DataSourceNode<'a>>(
    node: N,
    seen: &mut HashSet<N>,
    results: &mut Vec<N>,
) {
    node.children().for_each(|child| push_unique(child, seen, results));
}

pub fn collect_attribute_nodes<'a, N: DataSourceNode<'a>>(
    node: N,
    seen: &mut HashSet<N>,
    results: &mut Vec<N>,
) {
    if node.node_type() == NodeType::Element {
        node.attributes().for_each(|attr| push_unique(attr, seen, results));
    }
}

/// Pre-order walk, so descendants come out in document order.
pub fn collect_descendant_nodes<'a, N: DataSourceNode<'a>>(
    node: N,
    seen: &mut HashSet<N>,
    results: &mut Vec<N>,
) {
    let mut stack: Vec<N> = node.children().collect();
    stack.reverse();
    while let Some(current) = stack.pop() {
        push_unique(current, seen, results);
        let mut children: Vec<N> = current.children().collect();
        children.reverse();
        stack.extend(children);
    }
}

pub fn collect_descendant_or_self_nodes<'a, N: DataSourceNode<'a>>(
    node: N,
    seen: &mut HashSet<N>,
    results: &mut Vec<N>,
) {
    push_unique(node, seen, results);
    collect_descendant_nodes(node, seen, results);
}

pub fn collect_parent_nodes<'a, N: DataSourceNode<'a>>(
    node: N,
    seen: &mut HashSet<N>,
    results: &mut Vec<N>,
) {
    if let Some(parent) = node.parent() {
        push_unique(parent, seen, results);
    }
}

pub fn collect_ancestor_nodes<'a, N: DataSourceNode<'a>>(
    node: N,
    seen: &mut HashSet<N>,
    results: &mut Vec<N>,
) {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        push_unique(ancestor, seen, results);
        current = ancestor.parent();
    }
}

/// Splits the children of `node`'s parent around `node`. Attributes and the
/// root have no siblings.
fn split_siblings<'a, N: DataSourceNode<'a>>(node: N) -> (Vec<N>, Vec<N>) {
    if node.node_type() == NodeType::Attribute {
        return (Vec::new(), Vec::new());
    }
    let Some(parent) = node.parent() else {
        return (Vec::new(), Vec::new());
    };
    let siblings: Vec<N> = parent.children().collect();
    match siblings.iter().position(|s| *s == node) {
        Some(idx) => (siblings[..idx].to_vec(), siblings[idx + 1..].to_vec()),
        None => (Vec::new(), Vec::new()),
    }
}

pub fn collect_following_sibling_nodes<'a, N: DataSourceNode<'a>>(
    node: N,
    seen: &mut HashSet<N>,
    results: &mut Vec<N>,
) {
    let (_, after) = split_siblings(node);
    after.into_iter().for_each(|s| push_unique(s, seen, results));
}

pub fn collect_preceding_sibling_nodes<'a, N: DataSourceNode<'a>>(
    node: N,
    seen: &mut HashSet<N>,
    results: &mut Vec<N>,
) {
    let (before, _) = split_siblings(node);
    before.into_iter().for_each(|s| push_unique(s, seen, results));
}

/// Everything after `node` in document order, excluding its descendants.
/// For an attribute this starts after its owning element's content begins.
pub fn collect_following_nodes<'a, N: DataSourceNode<'a>>(
    node: N,
    seen: &mut HashSet<N>,
    results: &mut Vec<N>,
) {
    let mut current = node;
    if node.node_type() == NodeType::Attribute {
        if let Some(owner) = node.parent() {
            collect_descendant_nodes(owner, seen, results);
            current = owner;
        }
    }
    loop {
        let (_, after) = split_siblings(current);
        for sibling in after {
            collect_descendant_or_self_nodes(sibling, seen, results);
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }
}

/// Everything before `node` in document order, excluding its ancestors.
pub fn collect_preceding_nodes<'a, N: DataSourceNode<'a>>(
    node: N,
    seen: &mut HashSet<N>,
    results: &mut Vec<N>,
) {
    let mut current = node;
    if node.node_type() == NodeType::Attribute {
        if let Some(owner) = node.parent() {
            current = owner;
        }
    }
    loop {
        let (before, _) = split_siblings(current);
        for sibling in before {
            collect_descendant_or_self_nodes(sibling, seen, results);
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }
}
