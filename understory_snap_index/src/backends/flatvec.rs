// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend: linear scans over every slot.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Linear-scan backend.
///
/// Queries are `O(n)`. Useful for a handful of boxes and as a reference
/// implementation when checking other backends.
#[derive(Clone, Debug)]
pub struct FlatVec<T> {
    items: Vec<(usize, Aabb2D<T>)>,
}

impl<T> Default for FlatVec<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Copy + PartialOrd + Debug> Backend<T> for FlatVec<T> {
    fn bulk_load(&mut self, items: &[(usize, Aabb2D<T>)]) {
        self.items.clear();
        self.items.extend_from_slice(items);
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<T>, mut f: F) {
        for (slot, aabb) in &self.items {
            if aabb.overlaps(&rect) {
                f(*slot);
            }
        }
    }
}
