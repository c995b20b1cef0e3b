//! ## Extractor
//!
//! The index is agnostic to what it stores: an `Extractor` is the capability that maps a
//! user item to its bounding rectangle. Modeled as a trait bound supplied at construction,
//! the same way the teacher crate's tree types are generic over an `RTreeObject`/
//! `RStarTreeObject` capability rather than subclassing the tree itself.

use crate::bbox::BoundingRect;
use crate::error::RbushError;

/// Maps a user item to its bounding rectangle. Fallible so that callers whose items carry
/// untrusted coordinates (parsed input, foreign data) can reject NaN or inverted rectangles
/// without the index having to guess at a recovery policy.
pub trait Extractor<T> {
    fn to_bbox(&self, item: &T) -> Result<BoundingRect, RbushError>;
}

/// Items that expose their bounding rectangle as four plain fields. Implementing this is
/// all a caller needs to do to get the default mapping-based extractor for free.
pub trait RectItem {
    fn min_x(&self) -> f64;
    fn min_y(&self) -> f64;
    fn max_x(&self) -> f64;
    fn max_y(&self) -> f64;
}

/// The built-in extractor for the common case: items that implement [`RectItem`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultExtractor;

impl<T: RectItem> Extractor<T> for DefaultExtractor {
    fn to_bbox(&self, item: &T) -> Result<BoundingRect, RbushError> {
        let rect = BoundingRect::new(item.min_x(), item.min_y(), item.max_x(), item.max_y());
        if !rect.is_well_formed() {
            return Err(RbushError::ExtractorFailure {
                reason: format!(
                    "ill-formed rectangle ({}, {}, {}, {})",
                    rect.min_x, rect.min_y, rect.max_x, rect.max_y
                ),
            });
        }
        Ok(rect)
    }
}
