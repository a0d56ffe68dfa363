// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cameras and rays.
//!
//! Screen space is in pixels with the origin at the top-left and `y` growing
//! downward. Viewport space has the same orientation, normalized to `[0, 1]`
//! over the camera's pixel rectangle. In view space the camera looks along
//! `+Z` with `+Y` up.

use glam::{DQuat, DVec3};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect};

/// A half-line in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Start of the ray.
    pub origin: DVec3,
    /// Unit direction of the ray.
    pub direction: DVec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Projection used to turn screen positions into rays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    /// Pinhole projection with a vertical field of view in radians.
    Perspective {
        /// Full vertical field of view, in radians.
        fov_y: f64,
    },
    /// Parallel projection covering `2 * half_height` world units vertically.
    Orthographic {
        /// Half of the visible height in world units.
        half_height: f64,
    },
}

/// A camera through which a surface is viewed.
///
/// The picking engine only reads cameras; keeping them in sync with the
/// renderer is the caller's job.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World-space position.
    pub position: DVec3,
    /// World-space orientation; identity looks along `+Z`.
    pub rotation: DQuat,
    /// Region of the screen this camera renders into, in pixels.
    pub pixel_rect: Rect,
    /// Projection model.
    pub projection: Projection,
    /// Distance to the near clip plane.
    pub near: f64,
    /// Distance to the far clip plane.
    pub far: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            pixel_rect: Rect::new(0.0, 0.0, 1.0, 1.0),
            projection: Projection::Perspective {
                fov_y: core::f64::consts::FRAC_PI_3,
            },
            near: 0.3,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// The direction the camera looks at.
    pub fn forward(&self) -> DVec3 {
        self.rotation * DVec3::Z
    }

    /// Length of the visible depth range (`far - near`).
    pub fn clip_range(&self) -> f64 {
        self.far - self.near
    }

    /// Map a screen position to normalized viewport coordinates.
    ///
    /// Points inside the camera's pixel rectangle map into `[0, 1]` on both
    /// axes. A degenerate pixel rectangle yields non-finite coordinates.
    pub fn screen_to_viewport(&self, screen: Point) -> Point {
        let r = self.pixel_rect;
        Point::new(
            (screen.x - r.x0) / r.width(),
            (screen.y - r.y0) / r.height(),
        )
    }

    /// Build the world-space ray through a screen position.
    ///
    /// The ray starts on the near clip plane.
    pub fn screen_point_to_ray(&self, screen: Point) -> Ray {
        let vp = self.screen_to_viewport(screen);
        let ndc_x = 2.0 * vp.x - 1.0;
        let ndc_y = 1.0 - 2.0 * vp.y;
        let aspect = self.pixel_rect.width() / self.pixel_rect.height();
        let (local_origin, local_dir) = match self.projection {
            Projection::Perspective { fov_y } => {
                let tan = (fov_y * 0.5).tan();
                let dir = DVec3::new(ndc_x * tan * aspect, ndc_y * tan, 1.0);
                (dir * self.near, dir)
            }
            Projection::Orthographic { half_height } => (
                DVec3::new(ndc_x * half_height * aspect, ndc_y * half_height, self.near),
                DVec3::Z,
            ),
        };
        Ray::new(
            self.position + self.rotation * local_origin,
            self.rotation * local_dir,
        )
    }
}
