// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use crate::geometry::GeometryKind;

/// Why a geometry cannot take part in snapping.
///
/// These never abort anything: the offending geometry is skipped and the
/// reason is logged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidGeometry {
    /// Not enough vertices for the geometry kind.
    #[error("{kind:?} geometry needs at least {required} vertices, found {found}")]
    TooFewVertices {
        /// Kind of the rejected geometry.
        kind: GeometryKind,
        /// Minimum vertex count for that kind.
        required: usize,
        /// Vertex count actually supplied.
        found: usize,
    },
    /// A vertex has a NaN or infinite coordinate.
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Position of the vertex in the boundary.
        index: usize,
    },
}

/// Errors surfaced by [`SnapSession`][crate::SnapSession].
///
/// Only misuse of the session is reported; malformed geometry is recovered
/// from locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The operation needs a host map and none is attached.
    #[error("no host map is attached to the snap session")]
    Detached,
}
