// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_snap_index --heading-base-level=0

//! Understory Snap Index: a bulk-built 2D AABB index for snapping broad-phase.
//!
//! - Build an index in one pass from `(aabb, payload)` pairs with [`IndexGeneric::build`].
//! - Query by point or intersecting rectangle; results come back in build order.
//! - Rebuild at any time; a rebuild replaces the previous contents entirely.
//!
//! The index answers "which boxes overlap this rectangle?" and nothing more. It over-approximates
//! (a box overlapping the query does not mean the geometry inside it does), and it never misses
//! a box that overlaps. Exact geometric filtering belongs to the caller.
//!
//! It is generic over the scalar type `T` and does not depend on any geometry crate.
//!
//! # Example
//!
//! ```rust
//! use understory_snap_index::{Aabb2D, Index};
//!
//! let idx: Index<f64, u32> = Index::from_entries([
//!     (Aabb2D::new(0.0, 0.0, 10.0, 0.0), 1),  // horizontal segment
//!     (Aabb2D::from_point(3.0, 3.0), 2),      // single point
//!     (Aabb2D::new(50.0, 50.0, 60.0, 60.0), 3),
//! ]);
//!
//! let hits: Vec<_> = idx.query_rect(Aabb2D::new(2.0, -1.0, 4.0, 4.0)).collect();
//! assert_eq!(hits, [(0, 1), (1, 2)]);
//! ```
//!
//! ## Choosing a backend
//!
//! - [`RTree`](backends::RTree) (default, via [`Index`]): packed R-tree built with STR bulk
//!   loading. Range queries touch only the nodes overlapping the query, which keeps small
//!   tolerance windows cheap even with many entries.
//! - [`FlatVec`](backends::FlatVec) (via [`FlatIndex`]): linear scans. Smallest and simplest;
//!   fine for a handful of boxes.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Filter them out before building.

#![no_std]

extern crate alloc;

mod backend;
pub mod backends;
mod index;
mod types;

pub use backend::Backend;
pub use index::{FlatIndex, Index, IndexGeneric};
pub use types::{Aabb2D, Scalar};
