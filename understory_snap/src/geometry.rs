// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry snapshots used for indexing and snapping.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Line, Point};
use understory_snap_index::Aabb2D;

use crate::error::InvalidGeometry;

/// Identifier of a host geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryId(pub u64);

impl fmt::Display for GeometryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "geometry#{}", self.0)
    }
}

/// Identifier of a host layer.
///
/// Geometries refer back to their layer only through this id; the session
/// never owns or holds on to host layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerId(pub u32);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// Shape class of a geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GeometryKind {
    /// One or more isolated vertices.
    Point,
    /// An open polyline.
    Line,
    /// A closed ring.
    Polygon,
}

impl GeometryKind {
    /// Fewest vertices a valid geometry of this kind can have.
    pub const fn min_vertices(self) -> usize {
        match self {
            Self::Point => 1,
            Self::Line => 2,
            Self::Polygon => 3,
        }
    }
}

/// Normalized boundary of a geometry: its kind and ordered vertices in map space.
#[derive(Clone, Debug, PartialEq)]
pub struct Boundary {
    /// Shape class.
    pub kind: GeometryKind,
    /// Ordered vertices in map coordinates.
    pub vertices: Vec<Point>,
}

impl Boundary {
    /// Boundary of a single point.
    pub fn point(p: impl Into<Point>) -> Self {
        Self {
            kind: GeometryKind::Point,
            vertices: alloc::vec![p.into()],
        }
    }

    /// Boundary of an open polyline.
    pub fn line<P: Into<Point>>(vertices: impl IntoIterator<Item = P>) -> Self {
        Self {
            kind: GeometryKind::Line,
            vertices: vertices.into_iter().map(Into::into).collect(),
        }
    }

    /// Boundary of a polygon ring. The ring may be given open or closed.
    pub fn polygon<P: Into<Point>>(vertices: impl IntoIterator<Item = P>) -> Self {
        Self {
            kind: GeometryKind::Polygon,
            vertices: vertices.into_iter().map(Into::into).collect(),
        }
    }

    /// Check the vertex count for the kind and that every coordinate is finite.
    pub fn validate(&self) -> Result<(), InvalidGeometry> {
        let required = self.kind.min_vertices();
        if self.vertices.len() < required {
            return Err(InvalidGeometry::TooFewVertices {
                kind: self.kind,
                required,
                found: self.vertices.len(),
            });
        }
        if let Some(index) = self.vertices.iter().position(|p| !p.is_finite()) {
            return Err(InvalidGeometry::NonFiniteCoordinate { index });
        }
        Ok(())
    }

    /// Axis-aligned box around every vertex, or `None` without vertices.
    pub fn bounding_box(&self) -> Option<Aabb2D<f64>> {
        Aabb2D::from_points(self.vertices.iter().map(|p| (p.x, p.y)))
    }

    /// Number of segments [`segments`][Self::segments] yields.
    pub fn segment_count(&self) -> usize {
        let n = self.vertices.len();
        match self.kind {
            GeometryKind::Point => n,
            GeometryKind::Line => n.saturating_sub(1),
            GeometryKind::Polygon if n < 2 => 0,
            GeometryKind::Polygon if self.vertices[0] == self.vertices[n - 1] => n - 1,
            GeometryKind::Polygon => n,
        }
    }

    /// The boundary as straight segments.
    ///
    /// Each point vertex is a zero-length segment, a polyline of `n` vertices
    /// gives `n - 1` segments, and a polygon also gets its closing segment
    /// when the ring is not explicitly closed.
    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        let n = self.vertices.len();
        (0..self.segment_count()).map(move |i| {
            let from = self.vertices[i];
            match self.kind {
                GeometryKind::Point => Line::new(from, from),
                GeometryKind::Line | GeometryKind::Polygon => {
                    Line::new(from, self.vertices[(i + 1) % n])
                }
            }
        })
    }
}

/// A validated geometry snapshot, as held by the snap index.
///
/// Immutable once built: later edits to the host geometry are only seen
/// after the index is rebuilt.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexedGeometry {
    id: GeometryId,
    layer: LayerId,
    boundary: Boundary,
    bounds: Aabb2D<f64>,
}

impl IndexedGeometry {
    /// Validate `boundary` and snapshot it.
    pub fn new(
        id: GeometryId,
        layer: LayerId,
        boundary: Boundary,
    ) -> Result<Self, InvalidGeometry> {
        boundary.validate()?;
        let bounds = boundary
            .bounding_box()
            .ok_or(InvalidGeometry::TooFewVertices {
                kind: boundary.kind,
                required: boundary.kind.min_vertices(),
                found: 0,
            })?;
        Ok(Self {
            id,
            layer,
            boundary,
            bounds,
        })
    }

    /// Host identifier.
    pub fn id(&self) -> GeometryId {
        self.id
    }

    /// Owning layer.
    pub fn layer(&self) -> LayerId {
        self.layer
    }

    /// Shape class.
    pub fn kind(&self) -> GeometryKind {
        self.boundary.kind
    }

    /// The snapshotted boundary.
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Bounding box of every vertex.
    pub fn bounds(&self) -> Aabb2D<f64> {
        self.bounds
    }
}
