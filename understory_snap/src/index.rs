// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot index over snappable geometries.

use alloc::vec::Vec;

use understory_snap_index::Index;

use crate::extent::QueryExtent;
use crate::geometry::{Boundary, GeometryId, IndexedGeometry, LayerId};
use crate::host::SourceGeometry;

/// Outcome of building a [`SnapIndex`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexSummary {
    /// Geometries that made it into the index.
    pub indexed: usize,
    /// Geometries skipped as invalid.
    pub skipped: usize,
}

/// Validated geometry snapshots plus an R-tree over their bounding boxes.
#[derive(Debug, Default)]
pub struct SnapIndex {
    geometries: Vec<IndexedGeometry>,
    tree: Index<f64, usize>,
}

impl SnapIndex {
    /// Build from `(id, layer, boundary)` triples.
    ///
    /// Invalid geometries are skipped and logged; the returned summary
    /// counts them. Iteration order of the input becomes the candidate order
    /// reported by [`query`][Self::query].
    pub fn build<I>(geometries: I) -> (Self, IndexSummary)
    where
        I: IntoIterator<Item = (GeometryId, LayerId, Boundary)>,
    {
        let mut summary = IndexSummary::default();
        let mut kept = Vec::new();
        for (id, layer, boundary) in geometries {
            match IndexedGeometry::new(id, layer, boundary) {
                Ok(g) => kept.push(g),
                Err(err) => {
                    summary.skipped += 1;
                    log::debug!("skipping {id} on {layer}: {err}");
                }
            }
        }
        summary.indexed = kept.len();
        if summary.skipped > 0 {
            log::warn!(
                "{} geometries skipped as invalid, {} indexed",
                summary.skipped,
                summary.indexed
            );
        }

        let tree = Index::from_entries(kept.iter().enumerate().map(|(i, g)| (g.bounds(), i)));
        (
            Self {
                geometries: kept,
                tree,
            },
            summary,
        )
    }

    /// Build from host geometries.
    pub fn from_sources<'a, G, I>(sources: I) -> (Self, IndexSummary)
    where
        G: SourceGeometry + 'a,
        I: IntoIterator<Item = &'a G>,
    {
        Self::build(
            sources
                .into_iter()
                .map(|g| (g.id(), g.layer(), g.to_boundary())),
        )
    }

    /// Number of indexed geometries.
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    /// Whether nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Every indexed geometry, in candidate order.
    pub fn geometries(&self) -> &[IndexedGeometry] {
        &self.geometries
    }

    /// Geometries whose bounding box intersects the extent, in candidate order.
    ///
    /// This is a box test only, so it may return geometries that are not
    /// actually near the cursor, but never misses one whose box overlaps.
    pub fn query(&self, extent: &QueryExtent) -> Vec<&IndexedGeometry> {
        self.tree
            .query_rect(extent.bounds())
            .filter_map(|(_, i)| self.geometries.get(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Feature;
    use alloc::vec;
    use kurbo::Point;

    #[test]
    fn invalid_geometries_are_counted_and_skipped() {
        let features = vec![
            Feature::new(1, 0, Boundary::line([(0.0, 0.0), (10.0, 0.0)])),
            Feature::new(2, 0, Boundary::line([(0.0, 0.0)])),
            Feature::new(3, 0, Boundary::point((f64::NAN, 0.0))),
            Feature::new(4, 0, Boundary::point((3.0, 3.0))),
        ];
        let (index, summary) = SnapIndex::from_sources(&features);
        assert_eq!(
            summary,
            IndexSummary {
                indexed: 2,
                skipped: 2
            }
        );
        let ids: Vec<_> = index.geometries().iter().map(|g| g.id().0).collect();
        assert_eq!(ids, [1, 4]);
    }

    #[test]
    fn empty_index_queries_nothing() {
        let (index, summary) = SnapIndex::build(core::iter::empty());
        assert_eq!(summary, IndexSummary::default());
        assert!(index.is_empty());
        let extent = QueryExtent::at_point(Point::new(0.0, 0.0));
        assert!(index.query(&extent).is_empty());
    }

    #[test]
    fn point_extent_hits_boxes_containing_it() {
        let features = vec![
            Feature::new(1, 0, Boundary::line([(0.0, 0.0), (10.0, 10.0)])),
            Feature::new(2, 0, Boundary::point((20.0, 20.0))),
        ];
        let (index, _) = SnapIndex::from_sources(&features);
        let hits = index.query(&QueryExtent::at_point(Point::new(2.0, 8.0)));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), GeometryId(1));
        assert_eq!(index.len(), 2);
    }
}
