// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits implemented by the host map runtime.
//!
//! The snapping core never renders, never converts coordinates itself and never
//! stores host geometry. It asks the host through these traits:
//!
//! - [`MapView`] – current zoom and screen↔map projection.
//! - [`HostMap`] – geometry listing, the vector-layer capability check,
//!   pointer-move hook registration, and snap feedback (the marker).
//! - [`SourceGeometry`] – a host geometry that can describe its own boundary.

use alloc::vec::Vec;

use kurbo::Point;

use crate::calculator::SnapResult;
use crate::geometry::{Boundary, GeometryId, LayerId};

/// Screen↔map projection of the host.
///
/// Both conversions take an explicit zoom so that several projections in one
/// query can be made against the same zoom level.
pub trait MapView {
    /// The current zoom level.
    fn zoom(&self) -> f64;

    /// Convert a map coordinate to a screen point at `zoom`.
    fn coordinate_to_screen(&self, coordinate: Point, zoom: f64) -> Point;

    /// Convert a screen point back to a map coordinate at `zoom`.
    fn screen_to_coordinate(&self, point: Point, zoom: f64) -> Point;
}

/// A host geometry that can be snapped to.
pub trait SourceGeometry {
    /// Stable identifier.
    fn id(&self) -> GeometryId;

    /// The layer holding this geometry.
    fn layer(&self) -> LayerId;

    /// Kind and ordered vertices in map coordinates.
    fn to_boundary(&self) -> Boundary;
}

/// The host map a [`SnapSession`][crate::SnapSession] is attached to.
pub trait HostMap: MapView {
    /// Geometry handle returned by [`list_geometries`][Self::list_geometries].
    type Geometry: SourceGeometry;

    /// Geometries available for snapping.
    ///
    /// With `Some(layer)`, only that layer's geometries; with `None`, the
    /// geometries of every vector layer on the map.
    fn list_geometries(&self, layer: Option<LayerId>) -> Vec<Self::Geometry>;

    /// Whether `layer` is a vector layer, i.e. can list its geometries.
    fn is_vector_layer(&self, layer: LayerId) -> bool;

    /// Start delivering pointer-move events to the session.
    fn listen_pointer_move(&mut self);

    /// Stop delivering pointer-move events to the session.
    ///
    /// No pointer-move may reach the session after this returns.
    fn unlisten_pointer_move(&mut self);

    /// Show the outcome of one pointer move, typically by moving a marker.
    ///
    /// `snap` is `None` when nothing is within tolerance; whether the marker
    /// then follows `cursor` or hides is up to the host.
    fn publish_snap(&mut self, cursor: Point, snap: Option<&SnapResult>);

    /// Remove any snap marker. Called when the session is disabled.
    fn clear_snap_marker(&mut self) {}
}

/// Owned geometry snapshot implementing [`SourceGeometry`].
///
/// Handy for hosts that already keep their shapes as vertex lists, and for
/// tests.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    /// Identifier.
    pub id: GeometryId,
    /// Owning layer.
    pub layer: LayerId,
    /// Boundary in map coordinates.
    pub boundary: Boundary,
}

impl Feature {
    /// Bundle an id, layer and boundary.
    pub fn new(id: u64, layer: u32, boundary: Boundary) -> Self {
        Self {
            id: GeometryId(id),
            layer: LayerId(layer),
            boundary,
        }
    }
}

impl SourceGeometry for Feature {
    fn id(&self) -> GeometryId {
        self.id
    }

    fn layer(&self) -> LayerId {
        self.layer
    }

    fn to_boundary(&self) -> Boundary {
        self.boundary.clone()
    }
}
