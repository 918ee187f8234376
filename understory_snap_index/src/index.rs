// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Index` API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::{FlatVec, RTree};
use crate::types::Aabb2D;

#[derive(Clone, Debug)]
struct Entry<T, P> {
    aabb: Aabb2D<T>,
    payload: P,
}

/// A bulk-built AABB index parameterized by a spatial backend.
///
/// Entries are addressed by their position in the list passed to
/// [`build`][Self::build]. Query results are reported in that order, so
/// callers get a stable, deterministic iteration order independent of the
/// backend.
#[derive(Debug)]
pub struct IndexGeneric<T: Copy + PartialOrd + Debug, P: Copy + Debug, B: Backend<T>> {
    entries: Vec<Entry<T, P>>,
    backend: B,
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    P: Copy + Debug,
    B: Backend<T> + Default,
{
    /// Create an empty index using the backend's default constructor.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            backend: B::default(),
        }
    }

    /// Create an index populated in bulk from `(aabb, payload)` pairs.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Aabb2D<T>, P)>,
    {
        let mut idx = Self::new();
        idx.build(entries);
        idx
    }
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    P: Copy + Debug,
    B: Backend<T>,
{
    /// Create an empty index using an explicit backend instance.
    pub fn with_backend(mut backend: B) -> Self {
        backend.clear();
        Self {
            entries: Vec::new(),
            backend,
        }
    }

    /// Replace the whole contents of the index with `(aabb, payload)` pairs.
    ///
    /// Nothing of the previous contents survives; the new entries are
    /// loaded into the backend in one pass.
    pub fn build<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (Aabb2D<T>, P)>,
    {
        let entries: Vec<Entry<T, P>> = entries
            .into_iter()
            .map(|(aabb, payload)| Entry { aabb, payload })
            .collect();
        let pairs: Vec<(usize, Aabb2D<T>)> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (i, e.aabb))
            .collect();
        self.backend.bulk_load(&pairs);
        self.entries = entries;
    }

    /// Clear the index.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.backend.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The AABB and payload stored at `slot`, if any.
    pub fn get(&self, slot: usize) -> Option<(Aabb2D<T>, P)> {
        self.entries.get(slot).map(|e| (e.aabb, e.payload))
    }

    /// Query for entries whose AABB contains the point, in build order.
    pub fn query_point(&self, x: T, y: T) -> impl Iterator<Item = (usize, P)> + '_ {
        self.query_rect(Aabb2D::new(x, y, x, y))
    }

    /// Query for entries whose AABB intersects the given rectangle, in build order.
    pub fn query_rect(&self, rect: Aabb2D<T>) -> impl Iterator<Item = (usize, P)> + '_ {
        let mut slots = Vec::new();
        self.backend.visit_rect(rect, |i| slots.push(i));
        slots.sort_unstable();
        slots
            .into_iter()
            .filter_map(|i| self.entries.get(i).map(|e| (i, e.payload)))
    }

    /// Visit entries whose AABB intersects the given rectangle (does not allocate result storage).
    ///
    /// Calls `f(slot, payload)` for each match. The order is backend-dependent.
    pub fn visit_rect<F: FnMut(usize, P)>(&self, rect: Aabb2D<T>, mut f: F) {
        self.backend.visit_rect(rect, |i| {
            if let Some(e) = self.entries.get(i) {
                f(i, e.payload);
            }
        });
    }
}

/// Default index using the packed R-tree backend.
pub type Index<T, P> = IndexGeneric<T, P, RTree<T>>;

/// Index using the linear-scan backend.
pub type FlatIndex<T, P> = IndexGeneric<T, P, FlatVec<T>>;

impl<T, P, B> Default for IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    P: Copy + Debug,
    B: Backend<T> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}
