// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `flatvec`: flat vector with linear scans (small, simple, and a handy
//!   reference when testing other backends).
//! - `rtree`: packed R-tree built with Sort-Tile-Recursive (STR) bulk loading.
//!
//! STR note
//! --------
//! For `n` boxes and node capacity `M`, the leaf level needs `P = ceil(n / M)`
//! nodes. Boxes are sorted by center x and cut into `S = ceil(sqrt(P))`
//! vertical slices of `S * M` boxes; each slice is sorted by center y and
//! packed into runs of `M`. The same pass is repeated on the resulting nodes
//! until a single root remains. Nodes come out nearly full and spatially
//! compact, which keeps small range queries shallow.

pub(crate) mod flatvec;
pub(crate) mod rtree;

pub use flatvec::FlatVec;
pub use rtree::{NODE_CAPACITY, RTree, RTreeF32, RTreeF64};
