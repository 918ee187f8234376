// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt::Debug;

/// Axis-aligned bounding box in 2D.
///
/// Degenerate boxes (zero width and/or height) are valid and describe a
/// point or an axis-aligned segment. Inverted boxes (`max < min`) match
/// nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x
    pub min_x: T,
    /// Minimum y
    pub min_y: T,
    /// Maximum x
    pub max_x: T,
    /// Maximum y
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    #[inline(always)]
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy> Aabb2D<T> {
    /// A zero-area AABB located at a single point.
    #[inline]
    pub const fn from_point(x: T, y: T) -> Self {
        Self::new(x, y, x, y)
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// The smallest AABB containing every point yielded by `points`.
    ///
    /// Returns `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = (T, T)>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let (x, y) = iter.next()?;
        Some(iter.fold(Self::from_point(x, y), |acc, (x, y)| {
            acc.union(Self::from_point(x, y))
        }))
    }

    /// Whether this AABB contains the point. Edges are inclusive.
    #[inline]
    pub fn contains_point(&self, x: T, y: T) -> bool {
        self.min_x <= x && self.min_y <= y && x <= self.max_x && y <= self.max_y
    }

    /// Whether `other` lies entirely inside this AABB. Edges are inclusive.
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// Determines whether this AABB overlaps with another in any way.
    ///
    /// The edge of an AABB is part of it, so boxes that only touch overlap,
    /// and a zero-area box overlaps any box containing its location.
    ///
    /// # Examples
    ///
    /// ```
    /// use understory_snap_index::Aabb2D;
    ///
    /// let a = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
    /// assert!(a.overlaps(&Aabb2D::new(10.0, 0.0, 20.0, 10.0)));
    /// assert!(a.overlaps(&Aabb2D::from_point(5.0, 5.0)));
    /// assert!(!a.overlaps(&Aabb2D::new(11.0, 0.0, 20.0, 10.0)));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// The smallest AABB enclosing two AABBs.
    #[inline]
    pub fn union(&self, other: Self) -> Self {
        Self {
            min_x: min_t(self.min_x, other.min_x),
            min_y: min_t(self.min_y, other.min_y),
            max_x: max_t(self.max_x, other.max_x),
            max_y: max_t(self.max_y, other.max_y),
        }
    }
}

impl<T: Scalar> Aabb2D<T> {
    /// Center of the box, used to order boxes during bulk loading.
    #[inline]
    pub fn center(&self) -> (T, T) {
        (
            T::mid(self.min_x, self.max_x),
            T::mid(self.min_y, self.max_y),
        )
    }
}

/// Numeric scalar abstraction for the index.
///
/// Only what bulk loading needs: midpoints for ordering by center. NaN
/// coordinates are not supported; callers must filter them out before
/// building an index.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Midpoint between a and b.
    fn mid(a: Self, b: Self) -> Self;
}

impl Scalar for f32 {
    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }
}

impl Scalar for f64 {
    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }
}

/// Total-enough ordering for bulk-load sorts. Incomparable values compare equal.
#[inline]
pub(crate) fn cmp_scalar<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

#[cfg(test)]
mod tests {
    use super::Aabb2D;

    #[test]
    fn degenerate_boxes_still_overlap() {
        let point = Aabb2D::from_point(3.0, 3.0);
        let segment = Aabb2D::new(0.0, 3.0, 10.0, 3.0);
        assert!(point.overlaps(&segment));
        assert!(segment.overlaps(&point));
        assert!(point.overlaps(&point));
        assert!(!point.overlaps(&Aabb2D::from_point(3.0, 3.5)));
    }

    #[test]
    fn from_points_encloses_every_vertex() {
        let pts = [(1.0, 5.0), (-2.0, 3.0), (4.0, -1.0)];
        let aabb = Aabb2D::from_points(pts).unwrap();
        assert_eq!(aabb, Aabb2D::new(-2.0, -1.0, 4.0, 5.0));
        for (x, y) in pts {
            assert!(aabb.contains_point(x, y));
        }
        assert!(Aabb2D::<f64>::from_points([]).is_none());
    }

    #[test]
    fn contains_is_inclusive() {
        let outer = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
        assert!(outer.contains(&outer));
        assert!(outer.contains(&Aabb2D::new(2.0, 2.0, 10.0, 4.0)));
        assert!(!outer.contains(&Aabb2D::new(2.0, 2.0, 10.5, 4.0)));
    }

    #[test]
    fn center_of_box() {
        let aabb = Aabb2D::new(0.0_f32, 2.0, 4.0, 6.0);
        assert_eq!(aabb.center(), (2.0, 4.0));
    }
}
