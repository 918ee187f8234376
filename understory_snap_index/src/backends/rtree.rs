// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed R-tree backend built with STR bulk loading.

use alloc::vec::Vec;
use core::fmt::Debug;

use smallvec::{SmallVec, smallvec};

use crate::backend::Backend;
use crate::types::{Aabb2D, Scalar, cmp_scalar};

/// Maximum number of children per node.
pub const NODE_CAPACITY: usize = 16;

type Children = SmallVec<[usize; NODE_CAPACITY]>;

#[derive(Clone, Debug)]
struct Node<T> {
    aabb: Aabb2D<T>,
    leaf: bool,
    // Positions in `items` for leaves, positions in `nodes` otherwise.
    children: Children,
}

/// Static R-tree over AABBs.
///
/// The tree is packed once from all items (see the [module docs][crate::backends])
/// and never modified in place; [`Backend::bulk_load`] rebuilds it from scratch.
pub struct RTree<T: Scalar> {
    items: Vec<(usize, Aabb2D<T>)>,
    nodes: Vec<Node<T>>,
    root: Option<usize>,
}

/// R-tree over `f32` coordinates.
pub type RTreeF32 = RTree<f32>;
/// R-tree over `f64` coordinates.
pub type RTreeF64 = RTree<f64>;

impl<T: Scalar> Default for RTree<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            nodes: Vec::new(),
            root: None,
        }
    }
}

impl<T: Scalar> Debug for RTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("items", &self.items.len())
            .field("nodes", &self.nodes.len())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl<T: Scalar> RTree<T> {
    /// Build a tree from `(slot, aabb)` pairs.
    pub fn bulk_build(items: &[(usize, Aabb2D<T>)]) -> Self {
        let mut tree = Self {
            items: items.to_vec(),
            nodes: Vec::new(),
            root: None,
        };
        if tree.items.is_empty() {
            return tree;
        }

        let mut level: Vec<(usize, Aabb2D<T>)> = tree
            .items
            .iter()
            .enumerate()
            .map(|(pos, (_, aabb))| (pos, *aabb))
            .collect();
        let mut leaf = true;
        loop {
            let first = tree.nodes.len();
            for (aabb, children) in pack_level(&mut level) {
                tree.nodes.push(Node {
                    aabb,
                    leaf,
                    children,
                });
            }
            if tree.nodes.len() - first == 1 {
                tree.root = Some(first);
                break;
            }
            level = (first..tree.nodes.len())
                .map(|id| (id, tree.nodes[id].aabb))
                .collect();
            leaf = false;
        }
        tree
    }

    /// Number of levels, counting the leaf level. Zero for an empty tree.
    pub fn height(&self) -> usize {
        let Some(mut id) = self.root else {
            return 0;
        };
        let mut height = 1;
        while !self.nodes[id].leaf {
            id = self.nodes[id].children[0];
            height += 1;
        }
        height
    }
}

/// Group one level of entries into runs of at most [`NODE_CAPACITY`] using STR.
fn pack_level<T: Scalar>(entries: &mut [(usize, Aabb2D<T>)]) -> Vec<(Aabb2D<T>, Children)> {
    let node_count = entries.len().div_ceil(NODE_CAPACITY);
    let slice_len = ceil_sqrt(node_count) * NODE_CAPACITY;

    entries.sort_by(|a, b| cmp_scalar(&a.1.center().0, &b.1.center().0));
    let mut out = Vec::with_capacity(node_count);
    for slice in entries.chunks_mut(slice_len) {
        slice.sort_by(|a, b| cmp_scalar(&a.1.center().1, &b.1.center().1));
        for run in slice.chunks(NODE_CAPACITY) {
            let aabb = run[1..]
                .iter()
                .fold(run[0].1, |acc, (_, aabb)| acc.union(*aabb));
            out.push((aabb, run.iter().map(|(id, _)| *id).collect()));
        }
    }
    out
}

fn ceil_sqrt(n: usize) -> usize {
    let s = n.isqrt();
    if s * s < n { s + 1 } else { s }
}

impl<T: Scalar> Backend<T> for RTree<T> {
    fn bulk_load(&mut self, items: &[(usize, Aabb2D<T>)]) {
        *self = Self::bulk_build(items);
    }

    fn clear(&mut self) {
        self.items.clear();
        self.nodes.clear();
        self.root = None;
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<T>, mut f: F) {
        let Some(root) = self.root else {
            return;
        };
        let mut stack: SmallVec<[usize; 32]> = smallvec![root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if !node.aabb.overlaps(&rect) {
                continue;
            }
            if node.leaf {
                for &pos in &node.children {
                    let (slot, aabb) = self.items[pos];
                    if aabb.overlaps(&rect) {
                        f(slot);
                    }
                }
            } else {
                stack.extend(node.children.iter().copied());
            }
        }
    }
}
