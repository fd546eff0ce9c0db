//! Pre-order traversal over [`Node`] trees.
//!
//! Callbacks run on a node before its children and see children in source
//! order, so the visiting order is document order.

use std::convert::Infallible;

use super::{Code, Node, NodeKind};

pub fn visit<'a, F>(node: &'a Node, kind: NodeKind, mut f: F)
where
    F: FnMut(&'a Node),
{
    fn go<'a, F: FnMut(&'a Node)>(node: &'a Node, kind: NodeKind, f: &mut F) {
        if node.kind() == kind {
            f(node);
        }
        node.children().iter().for_each(|child| go(child, kind, f));
    }
    go(node, kind, &mut f)
}

/// Calls `f` with exclusive access to every node of `kind`, stopping at the first error.
pub fn try_visit_mut<E, F>(node: &mut Node, kind: NodeKind, mut f: F) -> Result<(), E>
where
    F: FnMut(&mut Node) -> Result<(), E>,
{
    fn go<E, F>(node: &mut Node, kind: NodeKind, f: &mut F) -> Result<(), E>
    where
        F: FnMut(&mut Node) -> Result<(), E>,
    {
        if node.kind() == kind {
            f(node)?;
        }
        if let Some(children) = node.children_mut() {
            for child in children {
                go(child, kind, f)?;
            }
        }
        Ok(())
    }
    go(node, kind, &mut f)
}

pub fn visit_mut<F>(node: &mut Node, kind: NodeKind, mut f: F)
where
    F: FnMut(&mut Node),
{
    let result = try_visit_mut::<Infallible, _>(node, kind, |node| {
        f(node);
        Ok(())
    });
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

pub fn try_visit_code_mut<E, F>(node: &mut Node, mut f: F) -> Result<(), E>
where
    F: FnMut(&mut Code) -> Result<(), E>,
{
    try_visit_mut(node, NodeKind::Code, |node| match node.as_code_mut() {
        Some(code) => f(code),
        None => Ok(()),
    })
}

pub fn visit_code_mut<F>(node: &mut Node, mut f: F)
where
    F: FnMut(&mut Code),
{
    visit_mut(node, NodeKind::Code, |node| {
        if let Some(code) = node.as_code_mut() {
            f(code);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::root(vec![
            Code::new("a").into(),
            Node::element(
                "blockquote",
                vec![
                    Node::element("p", vec![Node::text("quoted")]),
                    Code::new("b").into(),
                ],
            ),
            Node::element(
                "ul",
                vec![Node::element("li", vec![Code::new("c").into()])],
            ),
            Code::new("d").into(),
        ])
    }

    #[test]
    fn test_visit_code_in_document_order() {
        let tree = sample();
        let mut values = Vec::new();
        visit(&tree, NodeKind::Code, |node| {
            values.push(node.as_code().unwrap().value.clone())
        });
        assert_eq!(values, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_visit_is_pre_order() {
        let tree = sample();
        let mut tags = Vec::new();
        visit(&tree, NodeKind::Element, |node| {
            if let Node::Element { tag, .. } = node {
                tags.push(*tag);
            }
        });
        assert_eq!(tags, vec!["blockquote", "p", "ul", "li"]);
    }

    #[test]
    fn test_visit_code_mut_mutates_in_place() {
        let mut tree = sample();
        visit_code_mut(&mut tree, |code| code.value.push('!'));
        let values = crate::mdast::code_blocks(&tree)
            .into_iter()
            .map(|code| code.value.as_str())
            .collect::<Vec<_>>();
        assert_eq!(values, vec!["a!", "b!", "c!", "d!"]);
    }

    #[test]
    fn test_try_visit_stops_at_first_error() {
        let mut tree = sample();
        let mut seen = Vec::new();
        let result = try_visit_code_mut(&mut tree, |code| {
            seen.push(code.value.clone());
            if code.value == "b" {
                return Err("stop");
            }
            code.value = code.value.to_uppercase();
            Ok(())
        });
        assert_eq!(result, Err("stop"));
        assert_eq!(seen, vec!["a", "b"]);
        let values = crate::mdast::code_blocks(&tree)
            .into_iter()
            .map(|code| code.value.as_str())
            .collect::<Vec<_>>();
        assert_eq!(values, vec!["A", "b", "c", "d"]);
    }

    #[test]
    fn test_visit_mut_leaves_structure_alone() {
        let mut tree = sample();
        let before = tree.clone();
        visit_mut(&mut tree, NodeKind::Text, |_| {});
        assert_eq!(tree, before);
    }
}
