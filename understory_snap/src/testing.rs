// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test hosts.

use alloc::vec::Vec;
use core::cell::Cell;

use kurbo::{Affine, Point};

use crate::calculator::SnapResult;
use crate::geometry::LayerId;
use crate::host::{Feature, HostMap, MapView};

/// Linear map: `zoom` pixels per map unit, screen y pointing down.
#[derive(Debug)]
pub(crate) struct ScaledMap {
    pub(crate) zoom: f64,
    /// When set, screen→map conversions yield NaN.
    pub(crate) broken: bool,
    reads: Cell<usize>,
}

impl ScaledMap {
    pub(crate) fn new(zoom: f64) -> Self {
        Self {
            zoom,
            broken: false,
            reads: Cell::new(0),
        }
    }

    pub(crate) fn zoom_reads(&self) -> usize {
        self.reads.get()
    }
}

impl MapView for ScaledMap {
    fn zoom(&self) -> f64 {
        self.reads.set(self.reads.get() + 1);
        self.zoom
    }

    fn coordinate_to_screen(&self, coordinate: Point, zoom: f64) -> Point {
        Point::new(coordinate.x * zoom, -coordinate.y * zoom)
    }

    fn screen_to_coordinate(&self, point: Point, zoom: f64) -> Point {
        if self.broken {
            return Point::new(f64::NAN, f64::NAN);
        }
        Point::new(point.x / zoom, -point.y / zoom)
    }
}

/// Screen position is an affine image of the map coordinate.
#[derive(Debug)]
pub(crate) struct AffineMap {
    to_screen: Affine,
}

impl AffineMap {
    pub(crate) fn new(to_screen: Affine) -> Self {
        Self { to_screen }
    }

    /// Sheared, anisotropic projection.
    pub(crate) fn sheared() -> Self {
        Self::new(Affine::new([2.0, 0.1, 0.5, -3.0, 40.0, 15.0]))
    }

    /// Map rotated by `angle` radians, one pixel per map unit.
    pub(crate) fn rotated(angle: f64) -> Self {
        Self::new(Affine::rotate(angle))
    }
}

impl MapView for AffineMap {
    fn zoom(&self) -> f64 {
        1.0
    }

    fn coordinate_to_screen(&self, coordinate: Point, _zoom: f64) -> Point {
        self.to_screen * coordinate
    }

    fn screen_to_coordinate(&self, point: Point, _zoom: f64) -> Point {
        self.to_screen.inverse() * point
    }
}

/// In-memory host recording every interaction.
#[derive(Debug)]
pub(crate) struct MockHost {
    pub(crate) map: ScaledMap,
    pub(crate) features: Vec<Feature>,
    pub(crate) vector_layers: Vec<LayerId>,
    pub(crate) listening: bool,
    pub(crate) listen_calls: usize,
    pub(crate) published: Vec<(Point, Option<SnapResult>)>,
    pub(crate) marker_cleared: usize,
}

impl MockHost {
    pub(crate) fn new(zoom: f64, features: Vec<Feature>) -> Self {
        let mut vector_layers: Vec<LayerId> = features.iter().map(|f| f.layer).collect();
        vector_layers.sort();
        vector_layers.dedup();
        Self {
            map: ScaledMap::new(zoom),
            features,
            vector_layers,
            listening: false,
            listen_calls: 0,
            published: Vec::new(),
            marker_cleared: 0,
        }
    }
}

impl MapView for MockHost {
    fn zoom(&self) -> f64 {
        self.map.zoom()
    }

    fn coordinate_to_screen(&self, coordinate: Point, zoom: f64) -> Point {
        self.map.coordinate_to_screen(coordinate, zoom)
    }

    fn screen_to_coordinate(&self, point: Point, zoom: f64) -> Point {
        self.map.screen_to_coordinate(point, zoom)
    }
}

impl HostMap for MockHost {
    type Geometry = Feature;

    fn list_geometries(&self, layer: Option<LayerId>) -> Vec<Feature> {
        self.features
            .iter()
            .filter(|f| match layer {
                Some(layer) => f.layer == layer,
                None => self.vector_layers.contains(&f.layer),
            })
            .cloned()
            .collect()
    }

    fn is_vector_layer(&self, layer: LayerId) -> bool {
        self.vector_layers.contains(&layer)
    }

    fn listen_pointer_move(&mut self) {
        self.listening = true;
        self.listen_calls += 1;
    }

    fn unlisten_pointer_move(&mut self) {
        self.listening = false;
    }

    fn publish_snap(&mut self, cursor: Point, snap: Option<&SnapResult>) {
        self.published.push((cursor, snap.copied()));
    }

    fn clear_snap_marker(&mut self) {
        self.marker_cleared += 1;
    }
}
