//! ## Queries
//!
//! Window search, collision testing, and full enumeration. All three walk the tree with an
//! explicit stack rather than recursing, and share the same containment shortcut: once a
//! node's rectangle is fully contained by the query window, every item beneath it matches
//! and the subtree is collected directly rather than re-testing each descendant.

use crate::bbox::BoundingRect;
use crate::node::TreeNode;

/// Collects references to every item whose bbox intersects `bbox`.
pub fn search<'a, T>(root: &'a TreeNode<T>, bbox: &BoundingRect) -> Vec<&'a T> {
    let mut result = Vec::new();
    if !root.bbox.intersects(bbox) {
        return result;
    }

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        for child in &node.children {
            if !bbox.intersects(&child.bbox) {
                continue;
            }
            if let Some(data) = &child.data {
                result.push(data);
            } else if bbox.contains(&child.bbox) {
                collect_all(child, &mut result);
            } else {
                stack.push(child);
            }
        }
    }
    result
}

/// Whether any item's bbox intersects `bbox`. Short-circuits on the first match instead of
/// building a full result set.
pub fn collides<T>(root: &TreeNode<T>, bbox: &BoundingRect) -> bool {
    if !root.bbox.intersects(bbox) {
        return false;
    }

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        for child in &node.children {
            if !bbox.intersects(&child.bbox) {
                continue;
            }
            if child.data.is_some() || bbox.contains(&child.bbox) {
                return true;
            }
            stack.push(child);
        }
    }
    false
}

/// Every item currently stored, in no particular order.
pub fn all<T>(root: &TreeNode<T>) -> Vec<&T> {
    let mut result = Vec::new();
    collect_all(root, &mut result);
    result
}

fn collect_all<'a, T>(node: &'a TreeNode<T>, out: &mut Vec<&'a T>) {
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        for child in &node.children {
            if let Some(data) = &child.data {
                out.push(data);
            } else {
                stack.push(child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bulk::build_tree;

    fn leaf(x: f64, y: f64, id: i32) -> TreeNode<i32> {
        TreeNode::new_leaf(BoundingRect::new(x, y, x + 1.0, y + 1.0), id)
    }

    #[test]
    fn search_finds_only_intersecting_items() {
        let items = vec![leaf(0.0, 0.0, 1), leaf(5.0, 5.0, 2), leaf(100.0, 100.0, 3)];
        let root = TreeNode::new_parent(items, true);
        let found = search(&root, &BoundingRect::new(0.0, 0.0, 6.0, 6.0));
        let mut ids: Vec<i32> = found.into_iter().copied().collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn search_uses_containment_shortcut_on_large_tree() {
        let items: Vec<TreeNode<i32>> = (0..200).map(|i| leaf(i as f64, i as f64, i)).collect();
        let root = build_tree(items, 8);
        let found = search(&root, &BoundingRect::new(-1.0, -1.0, 300.0, 300.0));
        assert_eq!(found.len(), 200);
    }

    #[test]
    fn collides_short_circuits_on_first_hit() {
        let items: Vec<TreeNode<i32>> = (0..1000).map(|i| leaf(i as f64 * 10.0, 0.0, i)).collect();
        let root = build_tree(items, 9);
        assert!(collides(&root, &BoundingRect::new(0.0, 0.0, 1.0, 1.0)));
        assert!(!collides(&root, &BoundingRect::new(-100.0, 50.0, -99.0, 51.0)));
    }

    #[test]
    fn all_enumerates_every_item_regardless_of_position() {
        let items: Vec<TreeNode<i32>> = (0..37).map(|i| leaf(i as f64, -i as f64, i)).collect();
        let root = build_tree(items, 4);
        let mut ids: Vec<i32> = all(&root).into_iter().copied().collect();
        ids.sort();
        assert_eq!(ids, (0..37).collect::<Vec<_>>());
    }
}
