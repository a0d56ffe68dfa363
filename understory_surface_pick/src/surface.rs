// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display surfaces and their picking configuration.

use glam::DVec3;

use crate::camera::Camera;
use crate::types::{BlockingGeometry, DEFAULT_PRIORITY, LayerMask, RenderMode, SurfaceId};

/// Picking configuration of a surface.
///
/// This is plain data: it may be filled in by hand or deserialized (with the
/// `serde` feature). [`Surface::new`] finalizes it, which is the point where
/// an unset priority becomes [`DEFAULT_PRIORITY`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SurfaceConfig {
    /// How the surface is presented.
    pub render_mode: RenderMode,
    /// Ordering hint for consumers merging results from several surfaces.
    ///
    /// Non-positive values mean "unset" until the configuration is finalized.
    pub priority: i32,
    /// Skip elements that face away from the viewer.
    pub ignore_reversed: bool,
    /// Scene geometry that can block the pointer.
    pub blocking: BlockingGeometry,
    /// Layers considered when looking for blocking geometry.
    pub blocking_mask: LayerMask,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::Overlay,
            priority: -1,
            ignore_reversed: true,
            blocking: BlockingGeometry::empty(),
            blocking_mask: LayerMask::ALL,
        }
    }
}

impl SurfaceConfig {
    /// Replace an unset or non-positive priority with [`DEFAULT_PRIORITY`].
    ///
    /// A positive priority is left untouched, so finalizing more than once is harmless.
    pub fn finalize(&mut self) {
        if self.priority <= 0 {
            log::debug!(
                "surface priority {} is not positive; using default {}",
                self.priority,
                DEFAULT_PRIORITY
            );
            self.priority = DEFAULT_PRIORITY;
        }
    }
}

/// A UI display context: the thing elements are registered against.
#[derive(Clone, Debug)]
pub struct Surface {
    id: SurfaceId,
    config: SurfaceConfig,
    /// Camera explicitly assigned to this surface, if any.
    pub world_camera: Option<Camera>,
    /// World-space position of the surface's root transform.
    pub position: DVec3,
    /// Whether the surface currently takes part in picking.
    pub receives_events: bool,
}

impl Surface {
    /// Create a surface, finalizing `config`.
    pub fn new(id: SurfaceId, mut config: SurfaceConfig) -> Self {
        config.finalize();
        Self {
            id,
            config,
            world_camera: None,
            position: DVec3::ZERO,
            receives_events: true,
        }
    }

    /// Attach an explicit camera.
    #[must_use]
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.world_camera = Some(camera);
        self
    }

    /// Set the world-space position.
    #[must_use]
    pub fn with_position(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }

    /// The surface identifier.
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// The finalized configuration.
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// How the surface is presented.
    pub fn render_mode(&self) -> RenderMode {
        self.config.render_mode
    }

    /// The finalized priority; always positive.
    pub fn priority(&self) -> i32 {
        self.config.priority
    }

    /// Camera used for picking on this surface.
    ///
    /// Overlay surfaces and camera-space surfaces without an explicit camera
    /// have none. Other surfaces use their own camera, falling back to `main`.
    pub fn event_camera<'a>(&'a self, main: Option<&'a Camera>) -> Option<&'a Camera> {
        match self.config.render_mode {
            RenderMode::Overlay => None,
            RenderMode::CameraSpace if self.world_camera.is_none() => None,
            RenderMode::CameraSpace | RenderMode::WorldSpace => {
                self.world_camera.as_ref().or(main)
            }
        }
    }
}
