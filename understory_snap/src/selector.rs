// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Broad-phase candidate retrieval around a cursor.

use alloc::vec::Vec;

use kurbo::Point;

use crate::extent::{ExtentBuilder, QueryExtent};
use crate::geometry::IndexedGeometry;
use crate::host::MapView;
use crate::index::SnapIndex;

/// Finds geometries whose bounding boxes fall inside the tolerance window of a cursor.
///
/// Holds only shared borrows, so a selection never changes the index:
/// the same cursor and tolerance against the same index always give the
/// same candidates in the same order.
#[derive(Debug)]
pub struct CandidateSelector<'a, M: ?Sized> {
    index: &'a SnapIndex,
    map: &'a M,
    tolerance_px: f64,
}

impl<'a, M: MapView + ?Sized> CandidateSelector<'a, M> {
    /// Select from `index`, projecting through `map`, with a default
    /// tolerance of `tolerance_px` screen pixels.
    pub fn new(index: &'a SnapIndex, map: &'a M, tolerance_px: f64) -> Self {
        Self {
            index,
            map,
            tolerance_px,
        }
    }

    /// Tolerance used for a query: the override when it is finite and not
    /// negative, otherwise the default.
    pub fn tolerance(&self, tolerance_override: Option<f64>) -> f64 {
        match tolerance_override {
            Some(t) if t.is_finite() && t >= 0.0 => t,
            _ => self.tolerance_px,
        }
    }

    /// The query window around `cursor`.
    pub fn extent(&self, cursor: Point, tolerance_override: Option<f64>) -> QueryExtent {
        let tolerance = self.tolerance(tolerance_override);
        ExtentBuilder::new(self.map).build(cursor, tolerance)
    }

    /// Candidates inside an already built window, in index order.
    pub fn select_in(&self, extent: &QueryExtent) -> Vec<&'a IndexedGeometry> {
        if !extent.cursor().is_finite() {
            return Vec::new();
        }
        self.index.query(extent)
    }

    /// Candidates around `cursor`.
    ///
    /// Empty when the index is empty, nothing overlaps, or the cursor is
    /// not finite.
    pub fn select(
        &self,
        cursor: Point,
        tolerance_override: Option<f64>,
    ) -> Vec<&'a IndexedGeometry> {
        if !cursor.is_finite() {
            return Vec::new();
        }
        self.select_in(&self.extent(cursor, tolerance_override))
    }
}
