//! ## Tree Node
//!
//! A node is either an internal node (children are other nodes) or a leaf node (children
//! carry user payloads). Height counts leaves as 1, matching spec: `is_leaf(node) <=> height(node) == 1`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingRect;

/// A node in the R-tree. Owns its children exclusively; no parent back-references.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeNode<T> {
    pub bbox: BoundingRect,
    pub height: usize,
    pub is_leaf: bool,
    pub children: Vec<TreeNode<T>>,
    /// Present only on leaf children (nodes with `height == 1` that sit directly under a
    /// leaf-level parent); `None` on every internal node and on the synthetic empty root.
    pub data: Option<T>,
}

impl<T> TreeNode<T> {
    /// A single leaf entry wrapping one user item, with its own precomputed bbox.
    pub fn new_leaf(bbox: BoundingRect, item: T) -> Self {
        TreeNode {
            bbox,
            height: 1,
            is_leaf: true,
            children: Vec::new(),
            data: Some(item),
        }
    }

    /// An internal (or leaf-level container) node built from already-constructed children.
    /// `is_leaf` describes the *children* of this node: `true` means the children are leaf
    /// entries (carry `data`, themselves height 1); `false` means the children are
    /// themselves internal nodes one level further down.
    ///
    /// A leaf-level container takes height 1, same as the leaf entries it holds — the
    /// entries are terminal data carriers, not a separate tree level. An internal container
    /// takes `max(child height) + 1`, since its children are genuine sub-nodes.
    pub fn new_parent(children: Vec<TreeNode<T>>, is_leaf: bool) -> Self {
        let bbox = BoundingRect::union_all(children.iter().map(|c| &c.bbox));
        let height = if is_leaf {
            1
        } else {
            children.iter().map(|c| c.height).max().unwrap_or(0) + 1
        };
        TreeNode {
            bbox,
            height,
            is_leaf,
            children,
            data: None,
        }
    }

    /// The empty root: height 1, leaf, no children.
    pub fn empty_root() -> Self {
        TreeNode {
            bbox: BoundingRect::empty(),
            height: 1,
            is_leaf: true,
            children: Vec::new(),
            data: None,
        }
    }

    /// Recomputes `self.bbox` as the union of the children's bboxes. Called after any
    /// mutation of `children`.
    pub fn recalc_bbox(&mut self) {
        self.bbox = BoundingRect::union_all(self.children.iter().map(|c| &c.bbox));
    }

    /// Union of `children[start..end]`'s bboxes, used by the split-index search.
    pub fn dist_bbox(&self, start: usize, end: usize) -> BoundingRect {
        BoundingRect::union_all(self.children[start..end].iter().map(|c| &c.bbox))
    }
}
