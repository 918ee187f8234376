// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exact nearest-point search over candidate geometries.

use kurbo::{Line, Point};

use crate::geometry::{GeometryId, IndexedGeometry, LayerId};

/// Nearest point of a segment to a query point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentProjection {
    /// Nearest point on the segment.
    pub point: Point,
    /// Position of `point` along the segment, always in `[0, 1]`.
    pub t: f64,
    /// Euclidean distance from the query point to `point`.
    pub distance: f64,
}

/// Project `pt` onto `segment`, staying within the segment's endpoints.
///
/// Works for any orientation, including vertical and horizontal segments.
/// A zero-length segment projects everything onto its single point. `t`
/// stays in `[0, 1]` even when the segment is long enough to overflow its
/// squared length.
pub fn project_onto_segment(pt: Point, segment: Line) -> SegmentProjection {
    let from = segment.p0;
    let v = segment.p1 - from;
    let len2 = v.hypot2();
    if len2 == 0.0 {
        return SegmentProjection {
            point: from,
            t: 0.0,
            distance: pt.distance(from),
        };
    }
    let mut t = (pt - from).dot(v) / len2;
    if !t.is_finite() {
        // Overflowed. Half the segment vector is always finite.
        let half = segment.p1.to_vec2() * 0.5 - from.to_vec2() * 0.5;
        let len = half.hypot();
        t = (pt - from).dot(half / len) / len * 0.5;
    }
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let mut point = from + v * t;
    if !point.is_finite() {
        let weighted = from.to_vec2() * (1.0 - t) + segment.p1.to_vec2() * t;
        point = weighted.to_point();
    }
    SegmentProjection {
        point,
        t,
        distance: pt.distance(point),
    }
}

/// The best snap for one cursor sample.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapResult {
    /// Geometry snapped onto.
    pub geometry: GeometryId,
    /// Layer of that geometry.
    pub layer: LayerId,
    /// Snapped coordinate, in map units.
    pub point: Point,
    /// Distance from the cursor to `point`, in map units.
    pub distance: f64,
    /// Index of the winning segment within the geometry's boundary.
    pub segment: usize,
    /// Projection parameter along that segment.
    pub t: f64,
}

/// Closest boundary point of a single candidate.
#[derive(Clone, Copy, Debug)]
pub struct SnapCandidate<'a> {
    /// The candidate geometry.
    pub geometry: &'a IndexedGeometry,
    /// Index of the nearest segment.
    pub segment: usize,
    /// Projection onto that segment.
    pub projection: SegmentProjection,
}

impl SnapCandidate<'_> {
    /// Turn the candidate into a result.
    pub fn to_result(&self) -> SnapResult {
        SnapResult {
            geometry: self.geometry.id(),
            layer: self.geometry.layer(),
            point: self.projection.point,
            distance: self.projection.distance,
            segment: self.segment,
            t: self.projection.t,
        }
    }
}

/// Picks the closest point among candidate geometries, within a map-space tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapCalculator {
    max_distance: f64,
}

impl SnapCalculator {
    /// Accept snaps at most `max_distance` map units from the cursor.
    pub fn new(max_distance: f64) -> Self {
        Self { max_distance }
    }

    /// The acceptance distance.
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Closest point of one geometry's boundary, regardless of tolerance.
    ///
    /// Ties between segments keep the earliest one.
    pub fn evaluate<'a>(
        &self,
        cursor: Point,
        geometry: &'a IndexedGeometry,
    ) -> Option<SnapCandidate<'a>> {
        let mut best: Option<SnapCandidate<'a>> = None;
        for (segment, line) in geometry.boundary().segments().enumerate() {
            let projection = project_onto_segment(cursor, line);
            if !projection.distance.is_finite() {
                continue;
            }
            if best.is_none_or(|b| projection.distance < b.projection.distance) {
                best = Some(SnapCandidate {
                    geometry,
                    segment,
                    projection,
                });
            }
        }
        best
    }

    /// Nearest snap among `candidates`, or `None` when nothing is within tolerance.
    ///
    /// Candidates are visited in iteration order and only a strictly closer
    /// point replaces the current best, so equal distances resolve to the
    /// first candidate encountered. A non-finite cursor never snaps.
    pub fn nearest<'a, I>(&self, cursor: Point, candidates: I) -> Option<SnapResult>
    where
        I: IntoIterator<Item = &'a IndexedGeometry>,
    {
        if !cursor.is_finite() {
            log::debug!("ignoring non-finite cursor {cursor:?}");
            return None;
        }
        let mut best: Option<SnapCandidate<'a>> = None;
        for geometry in candidates {
            let Some(candidate) = self.evaluate(cursor, geometry) else {
                continue;
            };
            if best.is_none_or(|b| candidate.projection.distance < b.projection.distance) {
                best = Some(candidate);
            }
        }
        best.filter(|b| b.projection.distance <= self.max_distance)
            .map(|b| b.to_result())
    }
}
