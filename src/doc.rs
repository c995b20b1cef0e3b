//! ## Serialization document
//!
//! The portable shape the index reads and writes: `{max_entries, min_entries, root}`,
//! where `root` recurses as `{bbox, height, is_leaf, children, data}`. Field names are a
//! compatibility surface independent of this crate's internal `RTree`/`TreeNode` layout, so
//! a document written by one version can be validated and loaded by another. Gated behind
//! the `serde` feature, same as the teacher crate gates its own (de)serialization support.

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingRect;
use crate::error::RbushError;
use crate::node::TreeNode;

/// The owned, portable document shape. Returned by deserialization and accepted for
/// constructing a tree from previously-saved bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<T> {
    pub max_entries: usize,
    pub min_entries: usize,
    pub root: TreeNode<T>,
}

/// Borrowed counterpart of [`Document`], used to serialize a live tree without cloning it.
#[derive(Serialize)]
struct DocumentRef<'a, T> {
    max_entries: usize,
    min_entries: usize,
    root: &'a TreeNode<T>,
}

/// Serializes `root` and its capacity bounds to bytes, borrowing rather than cloning.
pub fn serialize<T: Serialize>(
    max_entries: usize,
    min_entries: usize,
    root: &TreeNode<T>,
) -> Result<Vec<u8>, RbushError> {
    let doc = DocumentRef {
        max_entries,
        min_entries,
        root,
    };
    bincode::serialize(&doc).map_err(|e| RbushError::MalformedDocument {
        reason: e.to_string(),
    })
}

/// Deserializes bytes into a [`Document`], structurally validating the result before
/// returning it. A document that fails validation never reaches the caller.
pub fn deserialize<T>(bytes: &[u8]) -> Result<Document<T>, RbushError>
where
    T: for<'de> Deserialize<'de>,
{
    let doc: Document<T> = bincode::deserialize(bytes).map_err(|e| RbushError::MalformedDocument {
        reason: e.to_string(),
    })?;
    validate(&doc)?;
    Ok(doc)
}

fn validate<T>(doc: &Document<T>) -> Result<(), RbushError> {
    if doc.max_entries < 4 {
        return Err(RbushError::MalformedDocument {
            reason: format!("max_entries ({}) must be at least 4", doc.max_entries),
        });
    }
    if doc.min_entries < 2 || doc.min_entries > doc.max_entries {
        return Err(RbushError::MalformedDocument {
            reason: format!(
                "min_entries ({}) must be between 2 and max_entries ({})",
                doc.min_entries, doc.max_entries
            ),
        });
    }
    validate_node(&doc.root)
}

fn validate_node<T>(node: &TreeNode<T>) -> Result<(), RbushError> {
    if node.height == 0 {
        return Err(RbushError::MalformedDocument {
            reason: "node height must be at least 1".to_string(),
        });
    }
    if node.is_leaf != (node.height == 1) {
        return Err(RbushError::MalformedDocument {
            reason: format!(
                "is_leaf ({}) inconsistent with height ({})",
                node.is_leaf, node.height
            ),
        });
    }

    if node.is_leaf {
        for child in &node.children {
            if child.data.is_none() {
                return Err(RbushError::MalformedDocument {
                    reason: "leaf child is missing its data payload".to_string(),
                });
            }
        }
    } else {
        for child in &node.children {
            if child.data.is_some() {
                return Err(RbushError::MalformedDocument {
                    reason: "internal child unexpectedly carries a data payload".to_string(),
                });
            }
            if child.height + 1 != node.height {
                return Err(RbushError::MalformedDocument {
                    reason: format!(
                        "child height ({}) does not decrease by exactly one under parent height ({})",
                        child.height, node.height
                    ),
                });
            }
            validate_node(child)?;
        }
    }

    if !node.children.is_empty() {
        let recomputed = BoundingRect::union_all(node.children.iter().map(|c| &c.bbox));
        if recomputed != node.bbox {
            return Err(RbushError::MalformedDocument {
                reason: "stored bbox does not match the union of its children".to_string(),
            });
        }
    }

    Ok(())
}
