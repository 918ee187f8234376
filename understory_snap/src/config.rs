// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session configuration.

/// Tolerance used when none (or an unusable one) is configured, in screen pixels.
pub const DEFAULT_TOLERANCE: f64 = 10.0;

/// What a snap session snaps onto.
///
/// Only point snapping exists today. The calculator does not branch on the
/// mode yet; new modes hook in at
/// [`SnapSession::on_pointer_move`][crate::SnapSession::on_pointer_move].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum SnapMode {
    /// Snap the cursor onto the nearest point of a nearby geometry.
    #[default]
    Point,
}

/// Configuration for a [`SnapSession`][crate::SnapSession].
///
/// Passed by value at construction; there is no process-wide default to
/// mutate. `tolerance` is in screen pixels and is coerced by
/// [`effective_tolerance`][Self::effective_tolerance] rather than rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SnapConfig {
    /// Snapping mode.
    pub mode: SnapMode,
    /// Search radius around the cursor, in screen pixels.
    pub tolerance: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            mode: SnapMode::Point,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SnapConfig {
    /// Configuration with the given tolerance and the default mode.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    /// The tolerance actually used, in screen pixels.
    ///
    /// Zero, negative and non-finite values fall back to [`DEFAULT_TOLERANCE`].
    pub fn effective_tolerance(&self) -> f64 {
        if self.tolerance.is_finite() && self.tolerance > 0.0 {
            self.tolerance
        } else {
            DEFAULT_TOLERANCE
        }
    }
}
