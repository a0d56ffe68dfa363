// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene geometry that can block the pointer before it reaches a surface.
//!
//! The engine does not own any scene geometry. It asks a [`SceneGeometry`]
//! provider for ray intersections and keeps only the nearest one.

use alloc::vec::Vec;

use kurbo::Point;

use crate::camera::{Camera, Ray};
use crate::types::{BlockingGeometry, LayerMask};

/// Intersection reported by a 3D geometry query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin.
    pub distance: f64,
}

/// Intersection reported by a 2D geometry query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit2D {
    /// Position along the ray as a fraction of the query's maximum distance.
    pub fraction: f64,
}

/// Provider of ray intersection tests against scene geometry.
///
/// Both queries default to "nothing hit", so implementors only need to
/// provide the kinds of geometry they actually have. Results may come in any
/// order.
pub trait SceneGeometry {
    /// All 3D intersections along `ray` within `max_distance` on the layers in `mask`.
    fn raycast_all(&self, ray: &Ray, max_distance: f64, mask: LayerMask) -> Vec<RayHit> {
        let _ = (ray, max_distance, mask);
        Vec::new()
    }

    /// All 2D intersections along `ray` within `max_distance` on the layers in `mask`.
    fn raycast_all_2d(&self, ray: &Ray, max_distance: f64, mask: LayerMask) -> Vec<RayHit2D> {
        let _ = (ray, max_distance, mask);
        Vec::new()
    }
}

impl<T: SceneGeometry + ?Sized> SceneGeometry for &T {
    fn raycast_all(&self, ray: &Ray, max_distance: f64, mask: LayerMask) -> Vec<RayHit> {
        (**self).raycast_all(ray, max_distance, mask)
    }

    fn raycast_all_2d(&self, ray: &Ray, max_distance: f64, mask: LayerMask) -> Vec<RayHit2D> {
        (**self).raycast_all_2d(ray, max_distance, mask)
    }
}

/// Scene without any blocking geometry.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoGeometry;

impl SceneGeometry for NoGeometry {}

/// Distance to the nearest blocking geometry under `pointer`.
///
/// The ray runs from `camera` through `pointer` for `far - near` units.
/// 2D hits are converted from fractions to distances along that length.
/// Returns [`f64::INFINITY`] when `blocking` is empty or nothing is hit.
pub fn blocking_distance<G: SceneGeometry + ?Sized>(
    geometry: &G,
    camera: &Camera,
    pointer: Point,
    blocking: BlockingGeometry,
    mask: LayerMask,
) -> f64 {
    let mut nearest = f64::INFINITY;
    if blocking.is_empty() {
        return nearest;
    }

    let ray = camera.screen_point_to_ray(pointer);
    let max_distance = camera.clip_range();

    if blocking.contains(BlockingGeometry::GEOMETRY_3D) {
        for hit in geometry.raycast_all(&ray, max_distance, mask) {
            nearest = nearest.min(hit.distance);
        }
    }
    if blocking.contains(BlockingGeometry::GEOMETRY_2D) {
        for hit in geometry.raycast_all_2d(&ray, max_distance, mask) {
            nearest = nearest.min(hit.fraction * max_distance);
        }
    }

    log::trace!("blocking distance under {pointer:?}: {nearest}");
    nearest
}
