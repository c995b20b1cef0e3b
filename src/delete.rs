//! ## Deletion
//!
//! Removal is an iterative depth-first search with explicit backtracking: an internal
//! node's child is only descended into when its rectangle contains the target bbox, every
//! leaf child under an entered node is checked against the match predicate unconditionally,
//! and failed branches are abandoned by popping an explicit frame stack rather than
//! recursing. Once the matching entry is located and removed, `condense` walks the same
//! path back to the root, pruning any node that ends up with zero children and
//! recomputing bboxes along the way. No rebalancing beyond that pruning: underflowing
//! nodes are left underfull rather than reinserted, matching the index's append-only
//! approach to structural churn.

use crate::bbox::BoundingRect;
use crate::node::TreeNode;

/// Finds the index path from `root` down to a child whose `data` satisfies `matches`,
/// within a subtree reachable only through nodes whose bbox contains `bbox`. Internal
/// nodes are entered only when their own rectangle contains the target; once entered,
/// every leaf child is tested regardless of its own rectangle (the target bbox is expected
/// to be an exact copy of some entry's stored bbox, so a coarse containment search at the
/// internal level is enough to find it).
fn find_leaf_path<'a, T>(
    root: &'a TreeNode<T>,
    bbox: &BoundingRect,
    matches: &impl Fn(&T) -> bool,
) -> Option<Vec<usize>> {
    let mut frames: Vec<(&'a TreeNode<T>, usize)> = vec![(root, 0)];
    let mut node_path: Vec<usize> = Vec::new();

    loop {
        let (node, next_child) = frames.last_mut()?;

        if *next_child >= node.children.len() {
            frames.pop();
            node_path.pop();
            if frames.is_empty() {
                return None;
            }
            continue;
        }

        let idx = *next_child;
        *next_child += 1;
        let child = &node.children[idx];

        if let Some(data) = &child.data {
            if matches(data) {
                node_path.push(idx);
                return Some(node_path);
            }
            continue;
        }

        if child.bbox.contains(bbox) {
            node_path.push(idx);
            frames.push((child, 0));
        }
    }
}

/// Removes the first entry under `root` whose bbox is `bbox` and whose data satisfies
/// `matches`, condensing the tree on the way back up. Returns whether an entry was
/// removed.
pub fn remove<T>(root: &mut TreeNode<T>, bbox: &BoundingRect, matches: impl Fn(&T) -> bool) -> bool {
    let path = match find_leaf_path(root, bbox, &matches) {
        Some(p) => p,
        None => return false,
    };

    let item_index = *path.last().expect("find_leaf_path never returns an empty path");
    let container_path = path[..path.len() - 1].to_vec();

    {
        let mut cursor = &mut *root;
        for &idx in &container_path {
            cursor = &mut cursor.children[idx];
        }
        cursor.children.remove(item_index);
        cursor.recalc_bbox();
    }

    condense(root, &container_path);

    if root.children.is_empty() {
        *root = TreeNode::empty_root();
    }

    true
}

/// Walks `container_path` from the leaf container's parent back up to the root. At each
/// level, if the node one step deeper has been left with no children, it is pruned from
/// its own parent; otherwise the parent's bbox is recomputed to absorb whatever shrank
/// below it. Either way, every ancestor's bbox ends up correct by the time this returns.
fn condense<T>(root: &mut TreeNode<T>, container_path: &[usize]) {
    for depth in (0..container_path.len()).rev() {
        let parent_indices = &container_path[..depth];
        let child_idx = container_path[depth];

        let mut parent = &mut *root;
        for &idx in parent_indices {
            parent = &mut parent.children[idx];
        }

        if parent.children[child_idx].children.is_empty() {
            parent.children.remove(child_idx);
        }
        parent.recalc_bbox();
    }
}
