// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_snap --heading-base-level=0

//! Understory Snap: snap a moving cursor onto nearby vector geometry.
//!
//! Every pointer move runs the same short pipeline:
//!
//! 1. [`ExtentBuilder`] turns the cursor and a tolerance in screen pixels into a map-space
//!    [`QueryExtent`], projecting through the host's [`MapView`].
//! 2. [`CandidateSelector`] queries a [`SnapIndex`] (an R-tree over geometry bounding boxes
//!    from `understory_snap_index`) for geometries whose boxes overlap that window.
//! 3. [`SnapCalculator`] projects the cursor onto every boundary segment of those candidates
//!    and keeps the closest point, if it is within tolerance.
//!
//! [`SnapSession`] wires this to a host map: it snapshots the host's geometries into the index
//! on [`enable`](SnapSession::enable), handles [`on_pointer_move`](SnapSession::on_pointer_move),
//! and publishes each outcome back to the host, which draws the marker.
//!
//! The crate never renders, never owns host layers, and never converts coordinates itself.
//! Hosts implement [`HostMap`].
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_snap::{
//!     Boundary, Feature, HostMap, LayerId, MapView, SnapConfig, SnapResult, SnapSession,
//! };
//!
//! /// One pixel per map unit, y up.
//! struct Canvas {
//!     features: Vec<Feature>,
//!     marker: Option<Point>,
//! }
//!
//! impl MapView for Canvas {
//!     fn zoom(&self) -> f64 { 1.0 }
//!     fn coordinate_to_screen(&self, c: Point, _zoom: f64) -> Point { Point::new(c.x, -c.y) }
//!     fn screen_to_coordinate(&self, p: Point, _zoom: f64) -> Point { Point::new(p.x, -p.y) }
//! }
//!
//! impl HostMap for Canvas {
//!     type Geometry = Feature;
//!     fn list_geometries(&self, _layer: Option<LayerId>) -> Vec<Feature> { self.features.clone() }
//!     fn is_vector_layer(&self, _layer: LayerId) -> bool { true }
//!     fn listen_pointer_move(&mut self) {}
//!     fn unlisten_pointer_move(&mut self) {}
//!     fn publish_snap(&mut self, cursor: Point, snap: Option<&SnapResult>) {
//!         self.marker = Some(snap.map_or(cursor, |s| s.point));
//!     }
//! }
//!
//! let canvas = Canvas {
//!     features: vec![Feature::new(1, 0, Boundary::line([(0.0, 0.0), (10.0, 0.0)]))],
//!     marker: None,
//! };
//!
//! let mut session = SnapSession::new(SnapConfig::default());
//! session.attach(canvas);
//! session.enable().unwrap();
//!
//! let snap = session.on_pointer_move(Point::new(5.0, 1.0)).unwrap().unwrap();
//! assert_eq!(snap.point, Point::new(5.0, 0.0));
//! assert_eq!(snap.distance, 1.0);
//! assert_eq!(session.host().unwrap().marker, Some(Point::new(5.0, 0.0)));
//!
//! assert!(session.on_pointer_move(Point::new(1000.0, 1000.0)).unwrap().is_none());
//! session.disable();
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: forwards to `kurbo/std`.
//! - `libm`: floating-point support through `libm` for `no_std` builds.
//! - `serde`: `Serialize`/`Deserialize` for [`SnapConfig`], [`SnapResult`] and the id types.
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade: skipped invalid geometries at `debug`/`warn`,
//! lifecycle transitions at `debug`, and each pointer-move outcome at `trace`.

#![no_std]

extern crate alloc;

mod calculator;
mod config;
mod error;
mod extent;
mod geometry;
mod host;
mod index;
mod selector;
mod session;

#[cfg(test)]
mod testing;

pub use calculator::{
    SegmentProjection, SnapCalculator, SnapCandidate, SnapResult, project_onto_segment,
};
pub use config::{DEFAULT_TOLERANCE, SnapConfig, SnapMode};
pub use error::{InvalidGeometry, SessionError};
pub use extent::{ExtentBuilder, QueryExtent};
pub use geometry::{Boundary, GeometryId, GeometryKind, IndexedGeometry, LayerId};
pub use host::{Feature, HostMap, MapView, SourceGeometry};
pub use index::{IndexSummary, SnapIndex};
pub use selector::CandidateSelector;
pub use session::{SessionState, SnapSession};
