//! ## Bulk loading
//!
//! OMT (Overlap-Minimizing Top-down) bulk construction: given a full batch of leaf entries,
//! builds a tree bottom-up by recursively tiling the entries into roughly square groups
//! rather than inserting them one at a time. The groups are carved out with
//! [`multi_select`], which in turn calls [`quick_select`] (a Floyd-Rivest partition) to find
//! each cut point in expected linear time instead of sorting the whole batch.

use crate::node::TreeNode;

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

fn key<T>(node: &TreeNode<T>, axis: Axis) -> f64 {
    match axis {
        Axis::X => node.bbox.min_x,
        Axis::Y => node.bbox.min_y,
    }
}

fn div_ceil(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}

fn height_for(n: usize, max_entries: usize) -> usize {
    if n <= max_entries {
        return 1;
    }
    let h = (n as f64).ln() / (max_entries as f64).ln();
    h.ceil().max(1.0) as usize
}

/// Builds a full tree from a batch of already-wrapped leaf entries. Degenerates to a single
/// leaf-level container when `items` fits under `max_entries`, and to the canonical empty
/// root when `items` is empty.
pub fn build_tree<T>(items: Vec<TreeNode<T>>, max_entries: usize) -> TreeNode<T> {
    if items.is_empty() {
        return TreeNode::empty_root();
    }
    let n = items.len();
    if n <= max_entries {
        return TreeNode::new_parent(items, true);
    }

    let height = height_for(n, max_entries);
    let top_m = div_ceil(n, max_entries.pow((height - 1) as u32).max(1));
    build(items, max_entries, height, top_m)
}

/// Moves the first `take` elements of `v` out into their own `Vec`, leaving the rest behind
/// in `v` (in their original relative order). Used to carve owned tiles out of a
/// partitioned batch without requiring `T: Clone`.
fn split_front<T>(v: &mut Vec<TreeNode<T>>, take: usize) -> Vec<TreeNode<T>> {
    let mut tail = v.split_off(take);
    std::mem::swap(v, &mut tail);
    tail
}

/// Recursive OMT step: tiles `items` along x into groups of about `n1`, each of those along
/// y into groups of about `n2`, recursing into each group one level shorter, until a group
/// fits in a single leaf-level container.
fn build<T>(items: Vec<TreeNode<T>>, max_entries: usize, height: usize, m: usize) -> TreeNode<T> {
    let n = items.len();
    if n <= max_entries || height == 1 {
        return TreeNode::new_parent(items, true);
    }

    let n2 = div_ceil(n, m);
    let n1 = n2 * (m as f64).sqrt().ceil() as usize;

    let mut items = items;
    let top = items.len();
    multi_select(&mut items, 0, top - 1, n1, Axis::X);

    let mut children = Vec::with_capacity(div_ceil(n, n1));
    let mut remaining = items;
    while !remaining.is_empty() {
        let take = n1.min(remaining.len());
        let mut tile = split_front(&mut remaining, take);

        let tile_len = tile.len();
        if tile_len > 1 {
            multi_select(&mut tile, 0, tile_len - 1, n2, Axis::Y);
        }

        let mut tile_remaining = tile;
        while !tile_remaining.is_empty() {
            let group_take = n2.min(tile_remaining.len());
            let group = split_front(&mut tile_remaining, group_take);
            children.push(build(group, max_entries, height - 1, max_entries));
        }
    }

    TreeNode::new_parent(children, false)
}

/// Partitions `items[left..=right]` so that every `n`-th boundary (by the given axis's
/// coordinate) lands in its sorted position, without fully sorting the range. The building
/// block OMT uses to slice a batch into tiles without an `O(n log n)` sort.
///
/// Bisects the range at its middle `n`-multiple and recurses into both halves via an explicit
/// stack rather than direct recursion, so the call depth stays `O(log(range / n))` instead of
/// growing with the number of tiles (a batch of a few hundred thousand leaves with a tile size
/// of 2-3 would otherwise recurse thousands of frames deep).
fn multi_select<T>(items: &mut [TreeNode<T>], left: usize, right: usize, n: usize, axis: Axis) {
    if n == 0 {
        return;
    }
    let mut stack = vec![(left, right)];
    while let Some((left, right)) = stack.pop() {
        if right <= left || right - left <= n {
            continue;
        }
        let mid = left + div_ceil(div_ceil(right - left, n), 2) * n;
        quick_select(items, left, right, mid, axis);
        stack.push((left, mid));
        stack.push((mid, right));
    }
}

/// Floyd-Rivest selection: rearranges `items[left..=right]` so that `items[k]` holds the
/// value it would hold if the range were fully sorted by `axis`, with every smaller element
/// to its left and every larger element to its right. Runs in expected linear time in
/// `right - left`, unlike a full sort.
fn quick_select<T>(
    items: &mut [TreeNode<T>],
    mut left: usize,
    mut right: usize,
    k: usize,
    axis: Axis,
) {
    while right > left {
        if right - left > 600 {
            let n = (right - left + 1) as f64;
            let i = (k - left + 1) as f64;
            let z = n.ln();
            let s = 0.5 * (2.0 * z / 3.0).exp();
            let sd = 0.5 * (z * s * (n - s) / n).sqrt() * if i - n / 2.0 < 0.0 { -1.0 } else { 1.0 };
            let new_left = (left as f64).max(k as f64 - i * s / n + sd) as usize;
            let new_right = right.min(((k as f64) + (n - i) * s / n + sd) as usize);
            quick_select(items, new_left, new_right, k, axis);
        }

        let pivot = key(&items[k], axis);
        let mut i = left;
        let mut j = right;

        items.swap(left, k);
        if key(&items[right], axis) > pivot {
            items.swap(left, right);
        }

        while i < j {
            items.swap(i, j);
            i += 1;
            j -= 1;
            while key(&items[i], axis) < pivot {
                i += 1;
            }
            while key(&items[j], axis) > pivot {
                j -= 1;
            }
        }

        if key(&items[left], axis) == pivot {
            items.swap(left, j);
        } else {
            j += 1;
            items.swap(j, right);
        }

        if j <= k {
            left = j + 1;
        }
        if k <= j {
            if j == 0 {
                break;
            }
            right = j - 1;
        }
    }
}
