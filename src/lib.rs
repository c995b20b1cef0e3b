//! A packed R-tree over axis-aligned rectangles, supporting incremental insertion, OMT bulk
//! loading, deletion, window queries, and (with the `serde` feature) serialization to a
//! portable document format.

pub mod bbox;
pub mod bulk;
pub mod delete;
#[cfg(feature = "serde")]
pub mod doc;
pub mod error;
pub mod extract;
pub mod insert;
pub mod node;
pub mod query;
pub mod rtree;
#[cfg(feature = "setup_tracing")]
mod settings;

pub use bbox::BoundingRect;
pub use error::RbushError;
pub use extract::{DefaultExtractor, Extractor, RectItem};
pub use node::TreeNode;
pub use rtree::RTree;
