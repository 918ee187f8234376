// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen-space tolerance to map-space query windows.

use kurbo::{Line, Point, Vec2};
use understory_snap_index::Aabb2D;

use crate::calculator::project_onto_segment;
use crate::host::MapView;

/// Map-space search window around a cursor.
///
/// Built from the four corners of a `2 * tolerance` square of screen pixels
/// centred on the cursor, projected back into map coordinates. The
/// rectangle used for index queries is the bounding box of those corners
/// (and the cursor itself), so it is always closed, non-inverted, and
/// contains the cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueryExtent {
    cursor: Point,
    corners: [Point; 4],
    bounds: Aabb2D<f64>,
}

impl QueryExtent {
    /// A window holding only `cursor`.
    pub fn at_point(cursor: Point) -> Self {
        Self {
            cursor,
            corners: [cursor; 4],
            bounds: Aabb2D::from_point(cursor.x, cursor.y),
        }
    }

    /// The cursor the window is built around.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Projected screen-square corners: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        self.corners
    }

    /// Rectangle used for index queries.
    pub fn bounds(&self) -> Aabb2D<f64> {
        self.bounds
    }

    /// Whether `p` lies inside the query rectangle.
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains_point(p.x, p.y)
    }

    /// The tolerance in map units.
    ///
    /// This is the distance from the cursor to the nearest edge of the
    /// projected corner quadrilateral, capped by the distance to the edges
    /// of the query rectangle. On a rotated or scaled map it is the pixel
    /// tolerance in map units, and anything accepted at this distance is
    /// also found by the query.
    pub fn map_tolerance(&self) -> f64 {
        let b = &self.bounds;
        let c = self.cursor;
        let to_bounds = (c.x - b.min_x)
            .min(b.max_x - c.x)
            .min(c.y - b.min_y)
            .min(b.max_y - c.y);
        if !self.corners.iter().all(|p| p.is_finite()) {
            return to_bounds.max(0.0);
        }
        (0..4)
            .map(|i| {
                let edge = Line::new(self.corners[i], self.corners[(i + 1) % 4]);
                project_onto_segment(c, edge).distance
            })
            .fold(to_bounds, f64::min)
            .max(0.0)
    }
}

/// Converts a cursor and a pixel tolerance into a [`QueryExtent`].
#[derive(Clone, Copy, Debug)]
pub struct ExtentBuilder<'a, M: ?Sized> {
    map: &'a M,
}

impl<'a, M: MapView + ?Sized> ExtentBuilder<'a, M> {
    /// Build extents against `map`.
    pub fn new(map: &'a M) -> Self {
        Self { map }
    }

    /// Window of `tolerance_px` screen pixels around `cursor`.
    ///
    /// The zoom is read once and used for every projection. A tolerance of
    /// zero (or anything unusable) yields [`QueryExtent::at_point`]. Corners
    /// the host cannot project to finite coordinates are left out.
    pub fn build(&self, cursor: Point, tolerance_px: f64) -> QueryExtent {
        if !(tolerance_px.is_finite() && tolerance_px > 0.0) {
            return QueryExtent::at_point(cursor);
        }
        let zoom = self.map.zoom();
        let center = self.map.coordinate_to_screen(cursor, zoom);
        let t = tolerance_px;
        let corners = [(-t, -t), (t, -t), (t, t), (-t, t)].map(|(dx, dy)| {
            self.map
                .screen_to_coordinate(center + Vec2::new(dx, dy), zoom)
        });

        let mut bounds = Aabb2D::from_point(cursor.x, cursor.y);
        let mut dropped = 0;
        for p in &corners {
            if p.is_finite() {
                bounds = bounds.union(Aabb2D::from_point(p.x, p.y));
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::warn!(
                "{dropped} query corner(s) around {cursor:?} projected to non-finite coordinates"
            );
        }
        QueryExtent {
            cursor,
            corners,
            bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::SnapCalculator;
    use crate::geometry::{Boundary, GeometryId, IndexedGeometry, LayerId};
    use crate::testing::{AffineMap, ScaledMap};
    use kurbo::Affine;

    fn point_geometry(id: u64, at: (f64, f64)) -> IndexedGeometry {
        IndexedGeometry::new(GeometryId(id), LayerId(0), Boundary::point(at))
            .unwrap()
    }

    #[test]
    fn unit_scale_window_is_symmetric() {
        let map = ScaledMap::new(1.0);
        let extent = ExtentBuilder::new(&map).build(Point::new(5.0, 1.0), 10.0);
        assert_eq!(extent.bounds(), Aabb2D::new(-5.0, -9.0, 15.0, 11.0));
        assert_eq!(extent.map_tolerance(), 10.0);
        assert!(extent.contains(Point::new(5.0, 1.0)));
    }

    #[test]
    fn zoom_scales_the_window() {
        // 4 pixels per map unit: 10 px is 2.5 map units.
        let map = ScaledMap::new(4.0);
        let cursor = Point::new(100.0, 100.0);
        let extent = ExtentBuilder::new(&map).build(cursor, 10.0);
        assert_eq!(extent.bounds(), Aabb2D::new(97.5, 97.5, 102.5, 102.5));
        assert_eq!(extent.map_tolerance(), 2.5);
    }

    #[test]
    fn zero_tolerance_is_just_the_cursor() {
        let map = ScaledMap::new(3.0);
        let cursor = Point::new(0.1, 0.7);
        let extent = ExtentBuilder::new(&map).build(cursor, 0.0);
        assert_eq!(extent.bounds(), Aabb2D::from_point(0.1, 0.7));
        assert_eq!(extent.map_tolerance(), 0.0);
        assert!(extent.contains(cursor));
        assert_eq!(extent.corners(), [cursor; 4]);
    }

    #[test]
    fn uses_a_single_zoom_reading() {
        let map = ScaledMap::new(2.0);
        let _ = ExtentBuilder::new(&map).build(Point::new(1.0, 1.0), 5.0);
        assert_eq!(map.zoom_reads(), 1);
    }

    #[test]
    fn sheared_projection_still_encloses_corners() {
        let map = AffineMap::sheared();
        let cursor = Point::new(30.0, -12.0);
        let extent = ExtentBuilder::new(&map).build(cursor, 8.0);
        assert!(extent.contains(cursor));
        for c in extent.corners() {
            assert!(extent.contains(c));
        }
        assert!(extent.map_tolerance() > 0.0);
    }

    #[test]
    fn rotation_does_not_widen_the_tolerance() {
        let map = AffineMap::rotated(core::f64::consts::FRAC_PI_4);
        let cursor = Point::new(0.0, 0.0);
        let extent = ExtentBuilder::new(&map).build(cursor, 10.0);
        // The bounding box grows by sqrt(2); the accepted distance must not.
        assert!(extent.bounds().max_x > 14.0);
        assert!((extent.map_tolerance() - 10.0).abs() < 1e-9);

        let near = point_geometry(1, (0.0, 9.5));
        let far = point_geometry(2, (0.0, 13.0));
        let calc = SnapCalculator::new(extent.map_tolerance());
        assert!(extent.contains(far.boundary().vertices[0]));
        assert!(calc.nearest(cursor, [&far]).is_none());
        let snap = calc.nearest(cursor, [&near]).unwrap();
        assert_eq!(snap.geometry, GeometryId(1));
    }

    #[test]
    fn scaled_rotation_uses_the_map_scale() {
        // 2 px per map unit, rotated: 10 px is 5 map units in every direction.
        let map = AffineMap::new(Affine::rotate(0.3).then_scale(2.0));
        let extent = ExtentBuilder::new(&map).build(Point::new(7.0, -3.0), 10.0);
        assert!((extent.map_tolerance() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn non_finite_corners_are_dropped() {
        let mut map = ScaledMap::new(1.0);
        map.broken = true;
        let cursor = Point::new(2.0, 2.0);
        let extent = ExtentBuilder::new(&map).build(cursor, 10.0);
        assert_eq!(extent.bounds(), Aabb2D::from_point(2.0, 2.0));
    }
}
