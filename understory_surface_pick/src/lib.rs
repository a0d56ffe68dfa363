// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_surface_pick --heading-base-level=0

//! Understory Surface Pick: depth-ordered pointer picking for UI surfaces.
//!
//! Given a pointer position in screen space, this crate finds the UI elements
//! of a surface under the pointer and reports them frontmost first. It handles:
//!
//! - Overlay surfaces (screen space), camera-space surfaces, and world-space surfaces.
//! - Elements facing away from the viewer, which can be skipped.
//! - Scene geometry in front of a surface, which blocks the pointer.
//!
//! It does not route events, recognize gestures, or lay out UI. The output is
//! a plain list of [`HitResult`] values for a dispatcher to consume (for
//! example the Understory responder).
//!
//! ## Collaborators
//!
//! The engine owns none of the data it looks at:
//!
//! - [`ElementProvider`] supplies the elements registered against a surface.
//!   [`ElementRegistry`] is a ready-made implementation.
//! - [`Element`] is the capability trait every pickable element implements:
//!   depth, orientation, bounds test, and a custom hit test.
//!   [`Graphic`] is a ready-made rectangular element with optional
//!   [`HitShape`]s for irregular or partly transparent content.
//! - [`SceneGeometry`] answers ray intersection queries against 3D and 2D
//!   scene geometry. Use [`NoGeometry`] when nothing can block the pointer.
//! - [`Camera`] describes how a camera-space or world-space surface is viewed.
//!
//! ## Query
//!
//! [`SurfaceRaycaster::raycast`] runs one query and appends to a caller-owned
//! list. Several raycasters can share the list; hit indices keep increasing
//! across them, which consumers can use as a final tie-breaker.
//!
//! ```rust
//! use glam::DVec3;
//! use kurbo::{Point, Rect, Size};
//! use understory_surface_pick::{
//!     Camera, ElementRegistry, Graphic, ModuleId, RectTransform, RenderMode, Surface,
//!     SurfaceConfig, SurfaceId, SurfaceRaycaster,
//! };
//!
//! // A world-space panel ten units in front of the camera.
//! let camera = Camera {
//!     pixel_rect: Rect::new(0.0, 0.0, 640.0, 480.0),
//!     ..Camera::default()
//! };
//! let config = SurfaceConfig {
//!     render_mode: RenderMode::WorldSpace,
//!     ..SurfaceConfig::default()
//! };
//! let panel = Surface::new(SurfaceId(1), config)
//!     .with_camera(camera)
//!     .with_position(DVec3::new(0.0, 0.0, 10.0));
//!
//! let mut registry = ElementRegistry::new();
//! let quad = RectTransform {
//!     rect: Rect::new(-2.0, -2.0, 2.0, 2.0),
//!     position: DVec3::new(0.0, 0.0, 10.0),
//!     ..RectTransform::default()
//! };
//! registry.register(panel.id(), Graphic::new(1_u32, quad).with_depth(0));
//!
//! let raycaster = SurfaceRaycaster::new(ModuleId(0), &registry);
//! let mut hits = Vec::new();
//! raycaster.raycast(Some(&panel), Point::new(320.0, 240.0), &mut hits);
//! assert_eq!(hits.len(), 1);
//! assert!((hits[0].distance - 10.0).abs() < 1e-9);
//! ```
//!
//! ## Configuration
//!
//! Per-surface behavior lives in [`SurfaceConfig`]: render mode, priority,
//! back-face culling, and the blocking policy with its layer mask. Enable
//! the `serde` feature to load it from data. [`Surface::new`] finalizes the
//! configuration, replacing an unset priority with [`DEFAULT_PRIORITY`].
//!
//! ## Concurrency
//!
//! Queries are synchronous and keep their scratch buffers on the stack, so a
//! raycaster can be shared freely as long as the provider and geometry are.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod camera;
mod candidates;
mod element;
mod graphic;
mod occlusion;
mod raycaster;
mod shape;
mod surface;
mod types;

pub use camera::{Camera, Projection, Ray};
pub use candidates::{Candidates, INLINE_CANDIDATES, find_candidates};
pub use element::{Element, ElementProvider, ElementRegistry};
pub use graphic::{Graphic, GraphicFlags, RectTransform};
pub use occlusion::{NoGeometry, RayHit, RayHit2D, SceneGeometry, blocking_distance};
pub use raycaster::{NodeOf, SurfaceRaycaster};
pub use shape::{AlphaMask, HitShape};
pub use surface::{Surface, SurfaceConfig};
pub use types::{
    BlockingGeometry, DEFAULT_PRIORITY, HitResult, LayerMask, ModuleId, RenderMode, SurfaceId,
    UNDRAWN_DEPTH,
};
