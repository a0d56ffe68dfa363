// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The picking entry point.
//!
//! ## Overview
//!
//! [`SurfaceRaycaster`] answers one question per pointer event: which
//! elements of a surface are under the pointer, frontmost first. Each call:
//!
//! 1. Rejects surfaces that are missing or not receiving events.
//! 2. Maps the pointer to viewport coordinates and rejects points outside `[0, 1]`.
//! 3. For non-overlay surfaces with a blocking policy, asks the
//!    [`SceneGeometry`] provider for the nearest blocking hit.
//! 4. Collects candidates with [`find_candidates`].
//! 5. Drops candidates facing away from the viewer (when enabled) and
//!    candidates at or beyond the blocking distance.
//! 6. Appends the survivors to the caller's list.
//!
//! Nothing is retained between calls, and every degenerate input produces
//! an empty result rather than an error.
//!
//! ## Distances
//!
//! The distance of a hit is the distance from the camera to the surface's
//! position, shared by every element of that surface. It is not the depth
//! of the individual element.

use alloc::vec::Vec;

use glam::DVec3;
use kurbo::{Point, Size};

use crate::camera::Camera;
use crate::candidates::find_candidates;
use crate::element::{Element, ElementProvider};
use crate::occlusion::{NoGeometry, SceneGeometry, blocking_distance};
use crate::surface::Surface;
use crate::types::{HitResult, ModuleId, RenderMode};

/// Node type produced by a provider's elements.
pub type NodeOf<P> = <<P as ElementProvider>::Element as Element>::Node;

/// Picks elements of a surface under a pointer.
///
/// ## Usage
///
/// - Construct with [`SurfaceRaycaster::new`] when no scene geometry can
///   block the pointer, or with [`SurfaceRaycaster::with_geometry`].
/// - Keep the display size and main camera current with
///   [`SurfaceRaycaster::set_display_size`] and
///   [`SurfaceRaycaster::set_main_camera`].
/// - Call [`SurfaceRaycaster::raycast`] for each pointer event.
///
/// A raycaster holds no per-query state, so a shared reference can be used
/// from several places.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Rect, Size};
/// use understory_surface_pick::{
///     ElementRegistry, Graphic, ModuleId, RectTransform, Surface, SurfaceConfig, SurfaceId,
///     SurfaceRaycaster,
/// };
///
/// let surface = Surface::new(SurfaceId(0), SurfaceConfig::default());
///
/// let mut registry = ElementRegistry::new();
/// let button = RectTransform::from_rect(Rect::new(10.0, 10.0, 110.0, 40.0));
/// registry.register(surface.id(), Graphic::new("button", button).with_depth(1));
///
/// let mut raycaster = SurfaceRaycaster::new(ModuleId(0), &registry);
/// raycaster.set_display_size(Size::new(800.0, 600.0));
///
/// let mut hits = Vec::new();
/// raycaster.raycast(Some(&surface), Point::new(20.0, 20.0), &mut hits);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].node, "button");
/// ```
#[derive(Clone, Debug)]
pub struct SurfaceRaycaster<P, G = NoGeometry> {
    module: ModuleId,
    provider: P,
    geometry: G,
    display_size: Size,
    main_camera: Option<Camera>,
}

impl<P: ElementProvider> SurfaceRaycaster<P> {
    /// Create a raycaster that ignores scene geometry.
    pub fn new(module: ModuleId, provider: P) -> Self {
        Self::with_geometry(module, provider, NoGeometry)
    }
}

impl<P: ElementProvider, G: SceneGeometry> SurfaceRaycaster<P, G> {
    /// Create a raycaster that consults `geometry` for blocking hits.
    pub fn with_geometry(module: ModuleId, provider: P, geometry: G) -> Self {
        Self {
            module,
            provider,
            geometry,
            display_size: Size::ZERO,
            main_camera: None,
        }
    }

    /// Identifier written into every hit this raycaster produces.
    pub fn module(&self) -> ModuleId {
        self.module
    }

    /// Set the display size in pixels, used to normalize overlay pointers.
    pub fn set_display_size(&mut self, size: Size) {
        self.display_size = size;
    }

    /// Set the fallback camera for surfaces that need one but have none.
    pub fn set_main_camera(&mut self, camera: Option<Camera>) {
        self.main_camera = camera;
    }

    /// The element provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Camera used to pick on `surface`, if any.
    pub fn event_camera<'a>(&'a self, surface: &'a Surface) -> Option<&'a Camera> {
        surface.event_camera(self.main_camera.as_ref())
    }

    /// Append the elements of `surface` under `pointer` to `out`, frontmost first.
    ///
    /// Existing entries of `out` are left untouched. Each appended hit's
    /// `index` is the length of `out` at the time it was pushed.
    pub fn raycast(
        &self,
        surface: Option<&Surface>,
        pointer: Point,
        out: &mut Vec<HitResult<NodeOf<P>>>,
    ) {
        let Some(surface) = surface.filter(|s| s.receives_events) else {
            log::trace!("module {:?}: no surface receiving events", self.module);
            return;
        };
        let camera = self.event_camera(surface);

        let viewport = match camera {
            Some(cam) => cam.screen_to_viewport(pointer),
            None => Point::new(
                pointer.x / self.display_size.width,
                pointer.y / self.display_size.height,
            ),
        };
        if !in_unit_square(viewport) {
            log::trace!(
                "module {:?}: {pointer:?} is outside the viewport ({viewport:?})",
                self.module
            );
            return;
        }

        let config = surface.config();
        let overlay = config.render_mode == RenderMode::Overlay;

        let cutoff = match camera {
            Some(cam) if !overlay && !config.blocking.is_empty() => blocking_distance(
                &self.geometry,
                cam,
                pointer,
                config.blocking,
                config.blocking_mask,
            ),
            _ => f64::INFINITY,
        };

        let distance = match camera {
            Some(cam) if !overlay => cam.position.distance(surface.position),
            _ => 0.0,
        };
        let facing = camera.map_or(DVec3::Z, Camera::forward);

        let elements = self.provider.elements_for_surface(surface.id());
        for element in find_candidates(elements, camera, pointer) {
            if config.ignore_reversed && facing.dot(element.forward()) <= 0.0 {
                continue;
            }
            if distance >= cutoff {
                continue;
            }
            out.push(HitResult {
                node: element.node(),
                module: self.module,
                distance,
                index: out.len(),
            });
        }
    }
}

/// Whether both coordinates are in `0..=1`; non-finite coordinates are outside.
fn in_unit_square(p: Point) -> bool {
    (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)
}
