// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picking across an overlay HUD and a world-space panel partly hidden by a wall.
//!
//! This example shows how to combine:
//! - an [`ElementRegistry`] holding [`Graphic`]s for two surfaces,
//! - a [`SceneGeometry`] implementation standing in for a physics engine,
//! - two [`SurfaceRaycaster`]s appending into one shared hit list.
//!
//! Run:
//! - `cargo run -p understory_demos --example surface_pick`

use glam::DVec3;
use kurbo::{Circle, Point, Rect, Size};
use understory_surface_pick::{
    BlockingGeometry, Camera, ElementRegistry, Graphic, HitResult, HitShape, LayerMask,
    ModuleId, Ray, RayHit, RectTransform, RenderMode, SceneGeometry, Surface, SurfaceConfig,
    SurfaceId, SurfaceRaycaster,
};

/// An infinite wall covering the right half of the view, on layer 2.
struct Wall {
    z: f64,
}

impl SceneGeometry for Wall {
    fn raycast_all(&self, ray: &Ray, max_distance: f64, mask: LayerMask) -> Vec<RayHit> {
        if !mask.contains_layer(2) || ray.direction.z <= 0.0 {
            return Vec::new();
        }
        let t = (self.z - ray.origin.z) / ray.direction.z;
        if t < 0.0 || t > max_distance || ray.at(t).x < 0.0 {
            return Vec::new();
        }
        vec![RayHit { distance: t }]
    }
}

fn main() {
    let display = Size::new(800.0, 600.0);
    let camera = Camera {
        pixel_rect: Rect::from_origin_size(Point::ZERO, display),
        ..Camera::default()
    };

    let hud = Surface::new(SurfaceId(0), SurfaceConfig::default());
    let panel = Surface::new(
        SurfaceId(1),
        SurfaceConfig {
            render_mode: RenderMode::WorldSpace,
            priority: 1,
            blocking: BlockingGeometry::GEOMETRY_3D,
            blocking_mask: LayerMask::layer(2),
            ..SurfaceConfig::default()
        },
    )
    .with_camera(camera)
    .with_position(DVec3::new(0.0, 0.0, 20.0));

    let mut registry = ElementRegistry::new();

    // HUD: a round button in the top-left corner over a toolbar strip.
    let toolbar = RectTransform::from_rect(Rect::new(0.0, 0.0, 800.0, 60.0));
    registry.register(hud.id(), Graphic::new("toolbar", toolbar).with_depth(0));
    let button = RectTransform::from_rect(Rect::new(10.0, 10.0, 50.0, 50.0));
    registry.register(
        hud.id(),
        Graphic::new("round button", button)
            .with_depth(1)
            .with_hit_shape(HitShape::Circle(Circle::new((30.0, 30.0), 20.0))),
    );

    // World panel: a wide quad straddling the wall's edge.
    let quad = RectTransform {
        rect: Rect::new(-8.0, -4.0, 8.0, 4.0),
        position: DVec3::new(0.0, 0.0, 20.0),
        ..RectTransform::default()
    };
    registry.register(panel.id(), Graphic::new("panel", quad).with_depth(0));

    let mut hud_raycaster = SurfaceRaycaster::new(ModuleId(0), &registry);
    hud_raycaster.set_display_size(display);
    let mut world_raycaster =
        SurfaceRaycaster::with_geometry(ModuleId(1), &registry, Wall { z: 12.0 });
    world_raycaster.set_display_size(display);

    for (label, pt) in [
        ("round button", Point::new(30.0, 30.0)),
        ("button corner (toolbar only)", Point::new(12.0, 12.0)),
        ("panel, left of the wall", Point::new(300.0, 300.0)),
        ("panel, behind the wall", Point::new(500.0, 300.0)),
        ("off screen", Point::new(900.0, 300.0)),
    ] {
        println!("\n== Query: {} @ ({:.1}, {:.1}) ==", label, pt.x, pt.y);

        // Both raycasters append into the same list, higher priority first.
        let mut hits: Vec<HitResult<&str>> = Vec::new();
        if hud.priority() >= panel.priority() {
            hud_raycaster.raycast(Some(&hud), pt, &mut hits);
            world_raycaster.raycast(Some(&panel), pt, &mut hits);
        } else {
            world_raycaster.raycast(Some(&panel), pt, &mut hits);
            hud_raycaster.raycast(Some(&hud), pt, &mut hits);
        }

        if hits.is_empty() {
            println!("  nothing under the pointer");
        }
        for hit in &hits {
            println!(
                "  #{} {:<12} module={:?} distance={:.2}",
                hit.index, hit.node, hit.module, hit.distance
            );
        }
    }
}
