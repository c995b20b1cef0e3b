//! ## RTree
//!
//! The public façade: bundles a [`TreeNode`] root with its capacity bounds and an
//! [`Extractor`], and wires together `insert`, `bulk`, `delete`, `query`, and `doc` behind a
//! small API surface.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingRect;
use crate::bulk;
use crate::delete;
use crate::error::RbushError;
use crate::extract::{DefaultExtractor, Extractor};
use crate::insert;
use crate::node::TreeNode;
use crate::query;

#[cfg(feature = "serde")]
use crate::doc;

/// `min_entries` per spec: never below 2, and normally `ceil(0.4 * max_entries)`.
fn min_entries_for(max_entries: usize) -> usize {
    ((max_entries as f64 * 0.4).ceil() as usize).max(2)
}

/// A packed R-tree over axis-aligned rectangles. Generic over the stored item type `T` and
/// the [`Extractor`] `X` used to map items to their bounding rectangles; `X` defaults to
/// [`DefaultExtractor`], which works for any `T` implementing [`crate::extract::RectItem`].
#[derive(Debug, Clone)]
pub struct RTree<T, X = DefaultExtractor> {
    root: TreeNode<T>,
    max_entries: usize,
    min_entries: usize,
    count: usize,
    extractor: X,
}

impl<T, X: Default> RTree<T, X> {
    /// Builds an empty tree with the given node capacity, floored at 4 (a node can't split
    /// into two valid groups below that). `min_entries` is derived, not chosen.
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(4);
        let min_entries = min_entries_for(max_entries);
        tracing::debug!(max_entries, min_entries, "creating new RTree");
        RTree {
            root: TreeNode::empty_root(),
            max_entries,
            min_entries,
            count: 0,
            extractor: X::default(),
        }
    }
}

impl<T, X: Default> Default for RTree<T, X> {
    fn default() -> Self {
        Self::new(9)
    }
}

impl<T, X> RTree<T, X> {
    /// Builds an empty tree using a caller-supplied extractor, for item types that don't
    /// implement [`crate::extract::RectItem`] directly.
    pub fn with_extractor(max_entries: usize, extractor: X) -> Self {
        let max_entries = max_entries.max(4);
        let min_entries = min_entries_for(max_entries);
        RTree {
            root: TreeNode::empty_root(),
            max_entries,
            min_entries,
            count: 0,
            extractor,
        }
    }

    /// Empties the tree, keeping its capacity bounds and extractor.
    pub fn clear(&mut self) {
        tracing::info!(previous_count = self.count, "clearing RTree");
        self.root = TreeNode::empty_root();
        self.count = 0;
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The root's height: 1 for an empty or single-level tree, more for deeper trees.
    #[doc(hidden)]
    pub fn height(&self) -> usize {
        self.root.height
    }
}

impl<T, X: Extractor<T>> RTree<T, X> {
    /// Inserts a single item, splitting overflowing nodes and growing the root as needed.
    pub fn insert(&mut self, item: T) -> Result<(), RbushError> {
        let bbox = self.extractor.to_bbox(&item)?;
        self.insert_leaf(TreeNode::new_leaf(bbox, item));
        self.count += 1;
        tracing::debug!(count = self.count, height = self.root.height, "inserted item");
        Ok(())
    }

    fn insert_leaf(&mut self, leaf: TreeNode<T>) {
        let remaining_levels = self.root.height - 1;
        if let Some(sibling) = insert::insert_recursive(
            &mut self.root,
            leaf,
            remaining_levels,
            self.max_entries,
            self.min_entries,
        ) {
            let old_root = std::mem::replace(&mut self.root, TreeNode::empty_root());
            self.root = insert::split_root(old_root, sibling);
            tracing::debug!(new_height = self.root.height, "root split, tree grew taller");
        }
    }

    /// Bulk-loads a batch of items, building a balanced subtree via OMT and merging it into
    /// the existing tree (or replacing the root outright if the tree was empty). Falls back
    /// to one-by-one insertion when the batch is too small to be worth bulk-building.
    pub fn load(&mut self, items: Vec<T>) -> Result<(), RbushError> {
        if items.is_empty() {
            return Ok(());
        }

        let mut leaves = Vec::with_capacity(items.len());
        for item in items {
            let bbox = self.extractor.to_bbox(&item)?;
            leaves.push(TreeNode::new_leaf(bbox, item));
        }
        let added = leaves.len();

        if leaves.len() < self.min_entries {
            for leaf in leaves {
                self.insert_leaf(leaf);
            }
            self.count += added;
            return Ok(());
        }

        let mut built = bulk::build_tree(leaves, self.max_entries);

        if self.root.children.is_empty() {
            self.root = built;
        } else if self.root.height == built.height {
            let old_root = std::mem::replace(&mut self.root, TreeNode::empty_root());
            self.root = insert::split_root(old_root, built);
        } else {
            if self.root.height < built.height {
                std::mem::swap(&mut self.root, &mut built);
            }
            let remaining_levels = self.root.height - built.height - 1;
            if let Some(sibling) = insert::insert_recursive(
                &mut self.root,
                built,
                remaining_levels,
                self.max_entries,
                self.min_entries,
            ) {
                let old_root = std::mem::replace(&mut self.root, TreeNode::empty_root());
                self.root = insert::split_root(old_root, sibling);
            }
        }

        self.count += added;
        tracing::debug!(batch_size = added, count = self.count, "bulk-loaded batch");
        Ok(())
    }

    /// Removes the first item equal to `item`, condensing the tree afterward. Returns
    /// whether anything was removed. If `item`'s bbox can't be extracted, nothing is
    /// removed.
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        let bbox = match self.extractor.to_bbox(item) {
            Ok(bbox) => bbox,
            Err(_) => return false,
        };
        self.remove_with(&bbox, |stored| stored == item)
    }

    /// Removes the first item within `bbox` satisfying `predicate`, for callers that don't
    /// have (or don't want to rely on) a `PartialEq` impl on `T`.
    pub fn remove_with(&mut self, bbox: &BoundingRect, predicate: impl Fn(&T) -> bool) -> bool {
        let removed = delete::remove(&mut self.root, bbox, predicate);
        if removed {
            self.count -= 1;
            tracing::debug!(count = self.count, "removed item");
        }
        removed
    }

    /// Every stored item whose bbox intersects `bbox`.
    pub fn search(&self, bbox: &BoundingRect) -> Vec<&T> {
        query::search(&self.root, bbox)
    }

    /// Whether any stored item's bbox intersects `bbox`.
    pub fn collides(&self, bbox: &BoundingRect) -> bool {
        query::collides(&self.root, bbox)
    }

    /// Every stored item, in no particular order.
    pub fn all(&self) -> Vec<&T> {
        query::all(&self.root)
    }
}

#[cfg(feature = "serde")]
impl<T, X> RTree<T, X> {
    /// Serializes the tree's data (not its extractor) to the portable document format.
    pub fn serialize(&self) -> Result<Vec<u8>, RbushError>
    where
        T: Serialize,
    {
        doc::serialize(self.max_entries, self.min_entries, &self.root)
    }
}

#[cfg(feature = "serde")]
impl<T, X: Default> RTree<T, X> {
    /// Rebuilds a tree from bytes previously produced by [`RTree::serialize`], validating
    /// structural invariants before accepting the result. The extractor is reconstructed
    /// via `Default`, since it isn't part of the serialized document.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, RbushError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let document = doc::deserialize::<T>(bytes)?;
        let count = count_items(&document.root);
        Ok(RTree {
            root: document.root,
            max_entries: document.max_entries,
            min_entries: document.min_entries,
            count,
            extractor: X::default(),
        })
    }
}

fn count_items<T>(node: &TreeNode<T>) -> usize {
    if node.data.is_some() {
        1
    } else {
        node.children.iter().map(count_items).sum()
    }
}
