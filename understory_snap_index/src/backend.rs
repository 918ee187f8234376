// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use core::fmt::Debug;

use crate::types::Aabb2D;

/// Spatial backend abstraction used by [`IndexGeneric`][crate::IndexGeneric].
///
/// Backends are built in bulk from `(slot, aabb)` pairs. There is no
/// incremental insert: the owning index rebuilds the backend whenever its
/// contents change.
pub trait Backend<T: Copy + PartialOrd + Debug> {
    /// Replace all contents with the given `(slot, aabb)` pairs.
    fn bulk_load(&mut self, items: &[(usize, Aabb2D<T>)]);

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Number of slots held by the backend.
    fn len(&self) -> usize;

    /// Whether the backend holds no slots.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit slots whose AABB contains the point.
    fn visit_point<F: FnMut(usize)>(&self, x: T, y: T, f: F) {
        self.visit_rect(Aabb2D::new(x, y, x, y), f);
    }

    /// Visit slots whose AABB intersects the rectangle.
    ///
    /// Every overlapping slot must be visited exactly once; the order is
    /// backend-defined.
    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<T>, f: F);
}
