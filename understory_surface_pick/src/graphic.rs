// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A ready-made rectangular [`Element`]: [`Graphic`].

use glam::{DAffine3, DQuat, DVec3};
use kurbo::{Insets, Point, Rect};

use crate::camera::{Camera, Ray};
use crate::element::Element;
use crate::shape::HitShape;
use crate::types::UNDRAWN_DEPTH;

/// Placement of a rectangle in world space.
///
/// `rect` lives in the local XY plane; the transform maps local space to
/// world space. For overlay surfaces, world space is screen space in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectTransform {
    /// Rectangle in local coordinates.
    pub rect: Rect,
    /// World-space translation.
    pub position: DVec3,
    /// World-space orientation.
    pub rotation: DQuat,
    /// Local scale.
    pub scale: DVec3,
}

impl Default for RectTransform {
    fn default() -> Self {
        Self {
            rect: Rect::ZERO,
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            scale: DVec3::ONE,
        }
    }
}

impl RectTransform {
    /// A transform placing `rect` at the origin with no rotation or scale.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            rect,
            ..Self::default()
        }
    }

    /// Local-to-world transform.
    pub fn world_from_local(&self) -> DAffine3 {
        DAffine3::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Project a screen position onto the rectangle's plane, in local coordinates.
    ///
    /// With a camera the pointer ray comes from the camera; without one it
    /// starts at the screen position and runs along `+Z`. Returns `None` when
    /// the ray is parallel to the plane, the plane is behind the ray origin,
    /// or the transform cannot be inverted.
    pub fn screen_point_to_local(&self, screen: Point, camera: Option<&Camera>) -> Option<Point> {
        let ray = match camera {
            Some(cam) => cam.screen_point_to_ray(screen),
            None => Ray::new(DVec3::new(screen.x, screen.y, 0.0), DVec3::Z),
        };
        let normal = self.rotation * DVec3::Z;
        let denom = ray.direction.dot(normal);
        if denom.abs() <= f64::EPSILON {
            return None;
        }
        let t = (self.position - ray.origin).dot(normal) / denom;
        if t.is_nan() || t < 0.0 {
            return None;
        }
        let local = self
            .world_from_local()
            .inverse()
            .transform_point3(ray.at(t));
        let local = Point::new(local.x, local.y);
        local.is_finite().then_some(local)
    }
}

bitflags::bitflags! {
    /// Flags controlling whether a graphic reacts to the pointer.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct GraphicFlags: u8 {
        /// The graphic is active in its hierarchy.
        const ACTIVE         = 0b0000_0001;
        /// The graphic wants pointer hits.
        const RAYCAST_TARGET = 0b0000_0010;
    }
}

impl Default for GraphicFlags {
    fn default() -> Self {
        Self::ACTIVE | Self::RAYCAST_TARGET
    }
}

/// A rectangular UI element with optional padding and hit shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Graphic<K> {
    /// Node reported in hit results.
    pub node: K,
    /// Paint order; [`UNDRAWN_DEPTH`] until the renderer assigns one.
    pub depth: i32,
    /// World placement of the rectangle.
    pub transform: RectTransform,
    /// Insets that shrink the rectangle for the bounds test. Negative values grow it.
    pub raycast_padding: Insets,
    /// Activity and pickability.
    pub flags: GraphicFlags,
    /// Optional refinement of the rectangle.
    pub hit_shape: Option<HitShape>,
}

impl<K> Graphic<K> {
    /// Create an undrawn graphic with default flags and no padding or hit shape.
    pub fn new(node: K, transform: RectTransform) -> Self {
        Self {
            node,
            depth: UNDRAWN_DEPTH,
            transform,
            raycast_padding: Insets::ZERO,
            flags: GraphicFlags::default(),
            hit_shape: None,
        }
    }

    /// Set the paint depth.
    #[must_use]
    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    /// Set the hit shape.
    #[must_use]
    pub fn with_hit_shape(mut self, shape: HitShape) -> Self {
        self.hit_shape = Some(shape);
        self
    }

    /// Rectangle used for the bounds test, after padding.
    pub fn padded_rect(&self) -> Rect {
        self.transform.rect - self.raycast_padding
    }
}

impl<K: Clone> Element for Graphic<K> {
    type Node = K;

    fn node(&self) -> K {
        self.node.clone()
    }

    fn depth(&self) -> i32 {
        self.depth
    }

    fn rotation(&self) -> DQuat {
        self.transform.rotation
    }

    fn contains_point(&self, pointer: Point, camera: Option<&Camera>) -> bool {
        self.transform
            .screen_point_to_local(pointer, camera)
            .is_some_and(|local| self.padded_rect().contains(local))
    }

    fn hit_test(&self, pointer: Point, camera: Option<&Camera>) -> bool {
        if !self
            .flags
            .contains(GraphicFlags::ACTIVE | GraphicFlags::RAYCAST_TARGET)
        {
            return false;
        }
        let Some(shape) = &self.hit_shape else {
            return true;
        };
        self.transform
            .screen_point_to_local(pointer, camera)
            .is_some_and(|local| shape.hit_local(local, self.transform.rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Circle;

    fn quad(rect: Rect) -> Graphic<u32> {
        Graphic::new(1, RectTransform::from_rect(rect)).with_depth(0)
    }

    #[test]
    fn overlay_point_maps_to_local() {
        let transform = RectTransform {
            rect: Rect::new(0.0, 0.0, 50.0, 20.0),
            position: DVec3::new(100.0, 40.0, 0.0),
            ..RectTransform::default()
        };
        let local = transform.screen_point_to_local(Point::new(110.0, 45.0), None);
        assert_eq!(local, Some(Point::new(10.0, 5.0)));
    }

    #[test]
    fn scale_is_undone() {
        let transform = RectTransform {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            scale: DVec3::new(2.0, 2.0, 1.0),
            ..RectTransform::default()
        };
        let local = transform
            .screen_point_to_local(Point::new(8.0, 8.0), None)
            .expect("plane faces the screen");
        assert!((local - Point::new(4.0, 4.0)).hypot() < 1e-12);
    }

    #[test]
    fn edge_on_rect_is_never_hit() {
        let transform = RectTransform {
            rect: Rect::new(-10.0, -10.0, 10.0, 10.0),
            rotation: DQuat::from_rotation_y(core::f64::consts::FRAC_PI_2),
            ..RectTransform::default()
        };
        assert!(transform.screen_point_to_local(Point::ZERO, None).is_none());
    }

    #[test]
    fn degenerate_scale_is_never_hit() {
        let g = Graphic::new(
            1_u32,
            RectTransform {
                rect: Rect::new(-10.0, -10.0, 10.0, 10.0),
                scale: DVec3::new(0.0, 1.0, 1.0),
                ..RectTransform::default()
            },
        )
        .with_depth(0);
        assert!(
            g.transform
                .screen_point_to_local(Point::ZERO, None)
                .is_none()
        );
        assert!(!g.contains_point(Point::ZERO, None));
    }

    #[test]
    fn plane_behind_ray_is_rejected() {
        let transform = RectTransform {
            rect: Rect::new(-10.0, -10.0, 10.0, 10.0),
            position: DVec3::new(0.0, 0.0, -5.0),
            ..RectTransform::default()
        };
        assert!(transform.screen_point_to_local(Point::ZERO, None).is_none());
    }

    #[test]
    fn camera_ray_hits_world_quad() {
        let camera = Camera {
            pixel_rect: Rect::new(0.0, 0.0, 100.0, 100.0),
            ..Camera::default()
        };
        let graphic = Graphic::new(
            7_u32,
            RectTransform {
                rect: Rect::new(-1.0, -1.0, 1.0, 1.0),
                position: DVec3::new(0.0, 0.0, 10.0),
                ..RectTransform::default()
            },
        );
        assert!(graphic.contains_point(Point::new(50.0, 50.0), Some(&camera)));
        assert!(!graphic.contains_point(Point::new(2.0, 2.0), Some(&camera)));
    }

    #[test]
    fn padding_shrinks_bounds() {
        let mut g = quad(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(g.contains_point(Point::new(1.0, 1.0), None));
        g.raycast_padding = Insets::uniform(2.0);
        assert!(!g.contains_point(Point::new(1.0, 1.0), None));
        assert!(g.contains_point(Point::new(5.0, 5.0), None));
    }

    #[test]
    fn flags_gate_hit_test() {
        let mut g = quad(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(g.hit_test(Point::new(5.0, 5.0), None));
        g.flags.remove(GraphicFlags::RAYCAST_TARGET);
        assert!(!g.hit_test(Point::new(5.0, 5.0), None));
        g.flags = GraphicFlags::RAYCAST_TARGET;
        assert!(!g.hit_test(Point::new(5.0, 5.0), None));
    }

    #[test]
    fn hit_shape_refines_bounds() {
        let g = quad(Rect::new(0.0, 0.0, 10.0, 10.0))
            .with_hit_shape(HitShape::Circle(Circle::new((5.0, 5.0), 5.0)));
        let corner = Point::new(0.5, 0.5);
        assert!(g.contains_point(corner, None));
        assert!(!g.hit_test(corner, None));
        assert!(g.hit_test(Point::new(5.0, 5.0), None));
    }

    #[test]
    fn new_graphic_is_undrawn() {
        let g = Graphic::new((), RectTransform::default());
        assert_eq!(g.depth, UNDRAWN_DEPTH);
        assert_eq!(g.forward(), DVec3::Z);
    }
}
