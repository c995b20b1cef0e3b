//! ## Bounding Rectangle
//!
//! This module defines `BoundingRect`, the value type the R-tree is built on: an
//! axis-aligned rectangle with the handful of pure geometric operations the insertion,
//! bulk-load, and query engines all reduce to (area, margin, enlargement, intersection,
//! containment, extension).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, the bounding volume stored at every node.
///
/// The empty rectangle (`BoundingRect::empty()`) is the identity element for [`extend`](Self::extend):
/// extending it by any rectangle `r` yields `r` back.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingRect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingRect {
    /// Builds a rectangle from its four coordinates. Does not validate `min <= max`; callers
    /// that need that guarantee go through [`crate::extract::Extractor`].
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingRect {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The empty rectangle: identity for `extend`, and the starting point for every
    /// bottom-up bbox recomputation.
    pub fn empty() -> Self {
        BoundingRect {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn area(&self) -> f64 {
        (self.max_x - self.min_x) * (self.max_y - self.min_y)
    }

    pub fn margin(&self) -> f64 {
        (self.max_x - self.min_x) + (self.max_y - self.min_y)
    }

    pub fn contains(&self, other: &BoundingRect) -> bool {
        self.min_x <= other.min_x
            && other.max_x <= self.max_x
            && self.min_y <= other.min_y
            && other.max_y <= self.max_y
    }

    pub fn intersects(&self, other: &BoundingRect) -> bool {
        other.min_x <= self.max_x
            && other.min_y <= self.max_y
            && other.max_x >= self.min_x
            && other.max_y >= self.min_y
    }

    /// Area of the smallest rectangle enclosing `self` and `other`.
    pub fn enlarged_area(&self, other: &BoundingRect) -> f64 {
        (self.max_x.max(other.max_x) - self.min_x.min(other.min_x))
            * (self.max_y.max(other.max_y) - self.min_y.min(other.min_y))
    }

    /// Area of the geometric intersection, clamped to zero when disjoint.
    pub fn intersection_area(&self, other: &BoundingRect) -> f64 {
        let min_x = self.min_x.max(other.min_x);
        let min_y = self.min_y.max(other.min_y);
        let max_x = self.max_x.min(other.max_x);
        let max_y = self.max_y.min(other.max_y);
        (max_x - min_x).max(0.0) * (max_y - min_y).max(0.0)
    }

    /// Mutates `self` into the union of `self` and `other`.
    pub fn extend(&mut self, other: &BoundingRect) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Whether every coordinate is finite and `min <= max` on both axes.
    pub fn is_well_formed(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }

    /// The union of a non-empty slice of rectangles. Callers are responsible for checking
    /// non-emptiness; an empty slice returns the empty rectangle.
    pub fn union_all<'a, I: IntoIterator<Item = &'a BoundingRect>>(rects: I) -> BoundingRect {
        let mut acc = BoundingRect::empty();
        for r in rects {
            acc.extend(r);
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_identity_for_extend() {
        let mut e = BoundingRect::empty();
        let r = BoundingRect::new(1.0, 2.0, 3.0, 4.0);
        e.extend(&r);
        assert_eq!(e, r);
    }

    #[test]
    fn area_and_margin() {
        let r = BoundingRect::new(0.0, 0.0, 3.0, 2.0);
        assert_eq!(r.area(), 6.0);
        assert_eq!(r.margin(), 5.0);
    }

    #[test]
    fn contains_and_intersects() {
        let outer = BoundingRect::new(0.0, 0.0, 10.0, 10.0);
        let inner = BoundingRect::new(2.0, 2.0, 4.0, 4.0);
        let disjoint = BoundingRect::new(20.0, 20.0, 21.0, 21.0);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.intersects(&inner));
        assert!(!outer.intersects(&disjoint));
    }

    #[test]
    fn enlarged_area_and_intersection_area() {
        let a = BoundingRect::new(0.0, 0.0, 2.0, 2.0);
        let b = BoundingRect::new(1.0, 1.0, 3.0, 3.0);
        assert_eq!(a.enlarged_area(&b), 9.0);
        assert_eq!(a.intersection_area(&b), 1.0);

        let disjoint = BoundingRect::new(10.0, 10.0, 11.0, 11.0);
        assert_eq!(a.intersection_area(&disjoint), 0.0);
    }

    #[test]
    fn union_all_of_empty_slice_is_empty() {
        let rects: Vec<BoundingRect> = Vec::new();
        assert_eq!(BoundingRect::union_all(&rects), BoundingRect::empty());
    }

    #[test]
    fn well_formed_rejects_nan_and_inverted() {
        assert!(BoundingRect::new(0.0, 0.0, 1.0, 1.0).is_well_formed());
        assert!(!BoundingRect::new(f64::NAN, 0.0, 1.0, 1.0).is_well_formed());
        assert!(!BoundingRect::new(2.0, 0.0, 1.0, 1.0).is_well_formed());
    }
}
