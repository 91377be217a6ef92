//! Recursive search over project tree snapshots.
//!
//! Traversal is depth-first, pre-order: a node is tested before its
//! children, and children are visited in host order. Only containers are
//! descended into.

use crate::naming::{match_normalized, normalize, MatchKind};
use crate::project::Node;

/// Find the first node, in pre-order, for which `predicate` holds.
pub fn find<'a, P>(root: &'a Node, predicate: P) -> Option<&'a Node>
where
    P: Fn(&Node) -> bool,
{
    find_with(root, &predicate)
}

fn find_with<'a>(node: &'a Node, predicate: &dyn Fn(&Node) -> bool) -> Option<&'a Node> {
    if predicate(node) {
        return Some(node);
    }
    match node {
        Node::Container(container) => container
            .children
            .iter()
            .find_map(|child| find_with(child, predicate)),
        Node::Leaf(_) => None,
    }
}

/// Immediate children of `container` for which `predicate` holds.
///
/// Non-recursive. A leaf yields an empty list.
pub fn find_all_direct_children<'a, P>(container: &'a Node, predicate: P) -> Vec<&'a Node>
where
    P: Fn(&Node) -> bool,
{
    container
        .children()
        .iter()
        .filter(|child| predicate(*child))
        .collect()
}

/// Node found by name, with the quality of the match.
#[derive(Debug, Clone, Copy)]
pub struct NamedMatch<'a> {
    pub node: &'a Node,
    pub kind: MatchKind,
}

/// Find a node by normalized name among those accepted by `filter`.
///
/// An exact match anywhere in the tree wins over a partial match; among
/// equals the first one in pre-order is returned.
pub fn find_by_name<'a, F>(root: &'a Node, name: &str, filter: F) -> Option<NamedMatch<'a>>
where
    F: Fn(&Node) -> bool,
{
    let query = normalize(name);

    let exact = find(root, |node| {
        filter(node) && match_normalized(node.name(), &query) == Some(MatchKind::Exact)
    });
    if let Some(node) = exact {
        return Some(NamedMatch {
            node,
            kind: MatchKind::Exact,
        });
    }

    find(root, |node| {
        filter(node) && match_normalized(node.name(), &query).is_some()
    })
    .map(|node| NamedMatch {
        node,
        kind: MatchKind::Partial,
    })
}

/// Every node in the tree, in pre-order.
pub fn walk(root: &Node) -> Vec<&Node> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(node.children().iter().rev());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{Container, ItemId, ItemKind, Leaf};

    fn bin(id: u64, name: &str, children: Vec<Node>) -> Node {
        Node::Container(Container {
            id: ItemId(id),
            name: name.to_string(),
            children,
        })
    }

    fn clip(id: u64, name: &str) -> Node {
        Node::Leaf(Leaf {
            id: ItemId(id),
            name: name.to_string(),
            kind: ItemKind::Clip,
            sequence: None,
        })
    }

    // Root
    //   Outer
    //     Inner
    //       Cardio Blast Archive (4)
    //   Cardio_Blast (5)
    fn sample_tree() -> Node {
        bin(
            1,
            "Root",
            vec![
                bin(
                    2,
                    "Outer",
                    vec![bin(3, "Inner", vec![bin(4, "Cardio Blast Archive", vec![])])],
                ),
                bin(5, "Cardio_Blast", vec![clip(6, "w1.mp4")]),
            ],
        )
    }

    #[test]
    fn find_is_preorder() {
        let tree = sample_tree();
        let order: Vec<u64> = walk(&tree).iter().map(|n| n.id().0).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5, 6]);

        let first_bin_below_root = find(&tree, |n| n.is_container() && n.id() != ItemId(1));
        assert_eq!(first_bin_below_root.map(|n| n.id()), Some(ItemId(2)));
    }

    #[test]
    fn find_returns_none_without_match() {
        let tree = sample_tree();
        assert!(find(&tree, |n| n.name() == "missing").is_none());
    }

    #[test]
    fn find_locates_deeply_nested_partial_match() {
        let tree = sample_tree();
        let found = find_by_name(&tree, "archive", Node::is_container).unwrap();
        assert_eq!(found.node.id(), ItemId(4));
        assert_eq!(found.kind, MatchKind::Partial);
    }

    #[test]
    fn exact_match_wins_over_earlier_partial() {
        let tree = sample_tree();
        // The partial match at depth 3 comes first in pre-order.
        let found = find_by_name(&tree, "cardio blast", Node::is_container).unwrap();
        assert_eq!(found.node.id(), ItemId(5));
        assert_eq!(found.kind, MatchKind::Exact);
    }

    #[test]
    fn first_partial_in_preorder_breaks_ties() {
        let tree = bin(
            1,
            "Root",
            vec![
                bin(2, "X", vec![bin(3, "Leg Day Week 1", vec![])]),
                bin(4, "Leg Day Week 2", vec![]),
            ],
        );
        let found = find_by_name(&tree, "LEG_DAY", Node::is_container).unwrap();
        assert_eq!(found.node.id(), ItemId(3));
    }

    #[test]
    fn name_search_ignores_case_and_separators() {
        let tree = bin(1, "Root", vec![bin(2, "Leg Day", vec![])]);
        for query in ["legday", "LEG_DAY", "leg-day"] {
            let found = find_by_name(&tree, query, Node::is_container).unwrap();
            assert_eq!(found.node.id(), ItemId(2));
            assert_eq!(found.kind, MatchKind::Exact);
        }
    }

    #[test]
    fn filter_excludes_nodes() {
        let tree = sample_tree();
        assert!(find_by_name(&tree, "w1.mp4", Node::is_container).is_none());
        assert!(find_by_name(&tree, "w1.mp4", |n| !n.is_container()).is_some());
    }

    #[test]
    fn direct_children_are_not_recursive() {
        let tree = sample_tree();
        let bins = find_all_direct_children(&tree, Node::is_container);
        let ids: Vec<u64> = bins.iter().map(|n| n.id().0).collect();
        assert_eq!(ids, vec![2, 5]);

        assert!(find_all_direct_children(&clip(9, "x"), |_| true).is_empty());
    }
}
