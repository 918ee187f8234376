// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap session lifecycle and per-pointer-move orchestration.

use kurbo::Point;

use crate::calculator::{SnapCalculator, SnapResult};
use crate::config::{SnapConfig, SnapMode};
use crate::error::SessionError;
use crate::geometry::LayerId;
use crate::host::HostMap;
use crate::index::{IndexSummary, SnapIndex};
use crate::selector::CandidateSelector;

/// Lifecycle state of a [`SnapSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Not listening to pointer moves; no index.
    Disabled,
    /// Building the index. Only observable from inside host callbacks made
    /// during [`SnapSession::enable`].
    Enabling,
    /// Listening to pointer moves against a built index.
    Active,
}

/// Snaps pointer moves onto the geometries of a host map.
///
/// The session owns its host adapter (see [`attach`][Self::attach]), its
/// configuration, and the index snapshot. The host drives it: after
/// [`enable`][Self::enable] registers the pointer-move hook, the host calls
/// [`on_pointer_move`][Self::on_pointer_move] for each event, in order.
///
/// The index is a snapshot taken at `enable`. Geometry edits made after that
/// are not seen until [`refresh`][Self::refresh] or another `enable`.
#[derive(Debug)]
pub struct SnapSession<H> {
    host: Option<H>,
    config: SnapConfig,
    snap_layer: Option<LayerId>,
    state: SessionState,
    index: Option<SnapIndex>,
    last_snap: Option<SnapResult>,
}

impl<H: HostMap> SnapSession<H> {
    /// A disabled, detached session.
    pub fn new(config: SnapConfig) -> Self {
        Self {
            host: None,
            config,
            snap_layer: None,
            state: SessionState::Disabled,
            index: None,
            last_snap: None,
        }
    }

    /// Attach to a host map, returning the previously attached one.
    ///
    /// An active session is disabled before the host is swapped.
    pub fn attach(&mut self, host: H) -> Option<H> {
        self.disable();
        self.host.replace(host)
    }

    /// Disable the session and hand the host back.
    pub fn detach(&mut self) -> Option<H> {
        self.disable();
        self.host.take()
    }

    /// The attached host, if any.
    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    /// The attached host, mutably.
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether pointer moves are being snapped.
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// The session configuration.
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Current snapping mode.
    pub fn mode(&self) -> SnapMode {
        self.config.mode
    }

    /// Change the snapping mode.
    pub fn set_mode(&mut self, mode: SnapMode) {
        self.config.mode = mode;
    }

    /// Restrict snapping to the geometries of one layer.
    ///
    /// Only vector layers are accepted; anything else is ignored and `false`
    /// returned. Takes effect at the next [`enable`][Self::enable] or
    /// [`refresh`][Self::refresh].
    pub fn set_snap_layer(&mut self, layer: LayerId) -> Result<bool, SessionError> {
        let host = self.host.as_ref().ok_or(SessionError::Detached)?;
        if !host.is_vector_layer(layer) {
            log::debug!("ignoring snap layer {layer}: not a vector layer");
            return Ok(false);
        }
        self.snap_layer = Some(layer);
        Ok(true)
    }

    /// Go back to snapping onto every vector layer.
    pub fn clear_snap_layer(&mut self) {
        self.snap_layer = None;
    }

    /// The layer snapping is restricted to, if any.
    pub fn snap_layer(&self) -> Option<LayerId> {
        self.snap_layer
    }

    /// Snapshot the host's geometries, build the index, and start listening.
    ///
    /// Calling this while already active rebuilds the index in place of the
    /// old one without registering the hook twice. An empty geometry set is
    /// fine: the session becomes active and never snaps.
    pub fn enable(&mut self) -> Result<IndexSummary, SessionError> {
        let host = self.host.as_mut().ok_or(SessionError::Detached)?;
        let was_active = self.state == SessionState::Active;
        self.state = SessionState::Enabling;

        let geometries = host.list_geometries(self.snap_layer);
        let (index, summary) = SnapIndex::from_sources(&geometries);
        self.index = Some(index);

        if !was_active {
            host.listen_pointer_move();
        }
        self.state = SessionState::Active;
        log::debug!(
            "snap session active: {} geometries indexed, {} skipped, layer {:?}",
            summary.indexed,
            summary.skipped,
            self.snap_layer
        );
        Ok(summary)
    }

    /// Rebuild the index from the host's current geometries.
    ///
    /// Returns `None` without touching the host when the session is not
    /// active.
    pub fn refresh(&mut self) -> Result<Option<IndexSummary>, SessionError> {
        if self.host.is_none() {
            return Err(SessionError::Detached);
        }
        if self.state != SessionState::Active {
            return Ok(None);
        }
        self.enable().map(Some)
    }

    /// Stop listening, drop the index, and clear the marker.
    ///
    /// Does nothing when already disabled.
    pub fn disable(&mut self) {
        if self.state == SessionState::Disabled {
            return;
        }
        if let Some(host) = self.host.as_mut() {
            host.unlisten_pointer_move();
            host.clear_snap_marker();
        }
        self.index = None;
        self.last_snap = None;
        self.state = SessionState::Disabled;
        log::debug!("snap session disabled");
    }

    /// The number of indexed geometries, or `None` while disabled.
    pub fn indexed_len(&self) -> Option<usize> {
        self.index.as_ref().map(SnapIndex::len)
    }

    /// The most recently published snap.
    pub fn last_snap(&self) -> Option<&SnapResult> {
        self.last_snap.as_ref()
    }

    /// Handle one pointer move at map coordinate `cursor`.
    ///
    /// Selects candidates inside the tolerance window, finds the nearest
    /// boundary point, and publishes the outcome to the host. Returns
    /// `Ok(None)` without publishing when the session is not active.
    pub fn on_pointer_move(&mut self, cursor: Point) -> Result<Option<SnapResult>, SessionError> {
        if self.state != SessionState::Active {
            return Ok(None);
        }
        let host = self.host.as_mut().ok_or(SessionError::Detached)?;
        let Some(index) = self.index.as_ref() else {
            return Ok(None);
        };

        let result = match self.config.mode {
            SnapMode::Point => {
                let selector =
                    CandidateSelector::new(index, &*host, self.config.effective_tolerance());
                let extent = selector.extent(cursor, None);
                let candidates = selector.select_in(&extent);
                let calculator = SnapCalculator::new(extent.map_tolerance());
                calculator.nearest(cursor, candidates)
            }
        };

        log::trace!("pointer move {cursor:?} -> {result:?}");
        host.publish_snap(cursor, result.as_ref());
        self.last_snap = result;
        Ok(result)
    }
}

impl<H: HostMap> Default for SnapSession<H> {
    fn default() -> Self {
        Self::new(SnapConfig::default())
    }
}
