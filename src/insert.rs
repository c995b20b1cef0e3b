//! ## Insertion
//!
//! Single-item insertion: descend via [`choose_subtree`] to the leaf-level container,
//! attach the entry, then propagate overflow splits back up to the root. The split itself
//! picks an axis by summed margin over every valid split point, then a split index by
//! minimum overlap (area as a tie-breaker) along that axis — the same two-stage heuristic
//! the index was designed around.

use crate::bbox::BoundingRect;
use crate::node::TreeNode;

/// Picks the child of `node` that needs the least enlargement to accommodate `bbox`,
/// breaking ties by smaller existing area. Both comparisons are strict `<`: a later equal
/// candidate never displaces an earlier one.
pub fn choose_subtree<T>(node: &TreeNode<T>, bbox: &BoundingRect) -> usize {
    let mut best_index = 0;
    let mut found = false;
    let mut min_area = f64::INFINITY;
    let mut min_enlargement = f64::INFINITY;

    for (i, child) in node.children.iter().enumerate() {
        let area = child.bbox.area();
        let enlargement = child.bbox.enlarged_area(bbox) - area;
        if enlargement < min_enlargement || (enlargement == min_enlargement && area < min_area) {
            best_index = i;
            found = true;
        }
        min_area = min_area.min(area);
        min_enlargement = min_enlargement.min(enlargement);
    }

    debug_assert!(found || node.children.is_empty());
    best_index
}

/// Descends from `node` down `remaining_levels` more steps (chosen via [`choose_subtree`]
/// at each one) before attaching `item`, splitting any node left with more than
/// `max_entries` children on the way back up. The initial call passes
/// `remaining_levels = node.height - 1`, so the descent bottoms out exactly at the
/// leaf-level container regardless of how many internal levels sit above it. Returns the
/// new sibling produced by a split at `node`'s own level, if any — the caller is
/// responsible for pushing it into `node`'s parent (or growing a new root, at the top).
pub fn insert_recursive<T>(
    node: &mut TreeNode<T>,
    item: TreeNode<T>,
    remaining_levels: usize,
    max_entries: usize,
    min_entries: usize,
) -> Option<TreeNode<T>> {
    node.bbox.extend(&item.bbox);

    if remaining_levels == 0 {
        node.children.push(item);
        return overflow_split(node, max_entries, min_entries);
    }

    let idx = choose_subtree(node, &item.bbox);
    let split = insert_recursive(
        &mut node.children[idx],
        item,
        remaining_levels - 1,
        max_entries,
        min_entries,
    );

    if let Some(sibling) = split {
        node.children.push(sibling);
        return overflow_split(node, max_entries, min_entries);
    }

    None
}

fn overflow_split<T>(
    node: &mut TreeNode<T>,
    max_entries: usize,
    min_entries: usize,
) -> Option<TreeNode<T>> {
    if node.children.len() > max_entries {
        Some(split_node(node, min_entries))
    } else {
        None
    }
}

/// Splits `node` in place: chooses an axis, sorts `node.children` along it, chooses a split
/// index, then truncates `node.children` to the low group and returns the high group as a
/// new sibling node. Both resulting bboxes are recomputed from their (now final) children.
pub fn split_node<T>(node: &mut TreeNode<T>, min_entries: usize) -> TreeNode<T> {
    let m = min_entries;
    let count = node.children.len();

    choose_split_axis(node, m);
    let split_index = choose_split_index(node, m);

    let high = node.children.split_off(split_index);
    debug_assert_eq!(node.children.len() + high.len(), count);

    node.recalc_bbox();
    let mut sibling = TreeNode::new_parent(high, node.is_leaf);
    sibling.height = node.height;
    sibling
}

/// Sums `dist_bbox(0, m+i).margin() + dist_bbox(m+i, M).margin()` over every valid split
/// point `i`, for both the x-sort and the y-sort of `node.children`. Leaves `node.children`
/// sorted along whichever axis has the smaller total margin (re-sorting by `min_x` only if
/// the x-axis wins; the y-sort performed while probing is left in place otherwise).
fn choose_split_axis<T>(node: &mut TreeNode<T>, m: usize) {
    let x_margin = all_dist_margin(node, m, Axis::X);
    let y_margin = all_dist_margin(node, m, Axis::Y);

    if x_margin < y_margin {
        node.children
            .sort_by(|a, b| min_of(&a.bbox, Axis::X).total_cmp(&min_of(&b.bbox, Axis::X)));
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

fn min_of(bbox: &BoundingRect, axis: Axis) -> f64 {
    match axis {
        Axis::X => bbox.min_x,
        Axis::Y => bbox.min_y,
    }
}

fn all_dist_margin<T>(node: &mut TreeNode<T>, m: usize, axis: Axis) -> f64 {
    node.children.sort_by(|a, b| {
        min_of(&a.bbox, axis).total_cmp(&min_of(&b.bbox, axis))
    });

    let count = node.children.len();
    let mut margin = 0.0;
    for i in 0..=count - 2 * m {
        margin += node.dist_bbox(0, m + i).margin();
        margin += node.dist_bbox(m + i, count).margin();
    }
    margin
}

/// Scans every valid split point along the already-sorted axis and returns the index (in
/// `m..=M-m`) with the smallest overlap between the two resulting groups, breaking ties by
/// smaller combined area. `split_index` starts at `m`, so an all-tied scan (identical
/// overlap and area throughout) degenerates to the most balanced split.
fn choose_split_index<T>(node: &TreeNode<T>, m: usize) -> usize {
    let count = node.children.len();
    let mut split_index = m;
    let mut min_overlap = f64::INFINITY;
    let mut min_area = f64::INFINITY;

    for i in 0..=count - 2 * m {
        let k = m + i;
        let left = node.dist_bbox(0, k);
        let right = node.dist_bbox(k, count);
        let overlap = left.intersection_area(&right);
        let area = left.area() + right.area();

        if overlap < min_overlap || (overlap == min_overlap && area < min_area) {
            min_overlap = overlap;
            min_area = area;
            split_index = k;
        }
    }

    split_index
}

/// Grows a new root above `old_root` and `sibling`, both already at the same height.
pub fn split_root<T>(old_root: TreeNode<T>, sibling: TreeNode<T>) -> TreeNode<T> {
    TreeNode::new_parent(vec![old_root, sibling], false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> TreeNode<&'static str> {
        TreeNode::new_leaf(BoundingRect::new(min_x, min_y, max_x, max_y), "x")
    }

    #[test]
    fn choose_subtree_prefers_least_enlargement() {
        let small = leaf(0.0, 0.0, 1.0, 1.0);
        let big = leaf(0.0, 0.0, 10.0, 10.0);
        let parent = TreeNode::new_parent(vec![small, big], true);
        let bbox = BoundingRect::new(0.5, 0.5, 0.9, 0.9);
        assert_eq!(choose_subtree(&parent, &bbox), 0);
    }

    #[test]
    fn choose_subtree_breaks_ties_by_area() {
        let a = leaf(0.0, 0.0, 2.0, 2.0);
        let b = leaf(10.0, 10.0, 12.0, 13.0);
        let parent = TreeNode::new_parent(vec![a, b], true);
        let bbox = BoundingRect::new(-1.0, -1.0, 13.0, 14.0);
        assert_eq!(choose_subtree(&parent, &bbox), 0);
    }

    #[test]
    fn split_node_preserves_all_children_across_both_groups() {
        let children = vec![
            leaf(0.0, 0.0, 1.0, 1.0),
            leaf(2.0, 2.0, 3.0, 3.0),
            leaf(4.0, 4.0, 5.0, 5.0),
            leaf(6.0, 6.0, 7.0, 7.0),
            leaf(8.0, 8.0, 9.0, 9.0),
        ];
        let mut node = TreeNode::new_parent(children, true);
        let original_count = node.children.len();
        let sibling = split_node(&mut node, 2);
        assert_eq!(node.children.len() + sibling.children.len(), original_count);
        assert!(node.children.len() >= 2);
        assert!(sibling.children.len() >= 2);
        assert_eq!(sibling.height, node.height);
        assert!(node.bbox.is_well_formed());
        assert!(sibling.bbox.is_well_formed());
    }

    #[test]
    fn split_root_produces_internal_node_of_height_plus_one() {
        let left = TreeNode::new_parent(vec![leaf(0.0, 0.0, 1.0, 1.0)], true);
        let right = TreeNode::new_parent(vec![leaf(5.0, 5.0, 6.0, 6.0)], true);
        let root = split_root(left, right);
        assert_eq!(root.height, 2);
        assert!(!root.is_leaf);
        assert_eq!(root.children.len(), 2);
    }
}
