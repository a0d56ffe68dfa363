// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element contracts and the per-surface element registry.

use alloc::vec::Vec;

use glam::{DQuat, DVec3};
use hashbrown::HashMap;
use kurbo::Point;

use crate::camera::Camera;
use crate::types::SurfaceId;

/// A pickable UI element as seen by the picking engine.
///
/// Implemented by each concrete element kind. The engine never depends on
/// the concrete type; it only asks these questions.
pub trait Element {
    /// Handle of the node this element belongs to, reported in hit results.
    type Node: Clone;

    /// The node this element belongs to.
    fn node(&self) -> Self::Node;

    /// Paint order on its surface; higher values are drawn later.
    ///
    /// [`UNDRAWN_DEPTH`](crate::UNDRAWN_DEPTH) marks an element that has not
    /// been drawn yet.
    fn depth(&self) -> i32;

    /// World-space orientation of the element.
    fn rotation(&self) -> DQuat;

    /// Direction the element faces.
    fn forward(&self) -> DVec3 {
        self.rotation() * DVec3::Z
    }

    /// Whether the screen-space `pointer` falls inside the element's bounds.
    fn contains_point(&self, pointer: Point, camera: Option<&Camera>) -> bool;

    /// Element-specific acceptance test, run after [`Element::contains_point`].
    ///
    /// Use this for irregular shapes, transparency masks, or disabled states.
    fn hit_test(&self, pointer: Point, camera: Option<&Camera>) -> bool;
}

/// Source of the elements registered against each surface.
pub trait ElementProvider {
    /// Element type stored by this provider.
    type Element: Element;

    /// Every element currently registered against `surface`.
    ///
    /// Order carries no meaning; the engine sorts by depth.
    fn elements_for_surface(&self, surface: SurfaceId) -> &[Self::Element];
}

impl<T: ElementProvider + ?Sized> ElementProvider for &T {
    type Element = T::Element;

    fn elements_for_surface(&self, surface: SurfaceId) -> &[Self::Element] {
        (**self).elements_for_surface(surface)
    }
}

/// A simple [`ElementProvider`] keyed by surface.
///
/// Elements keep their registration order within a surface.
#[derive(Clone, Debug)]
pub struct ElementRegistry<E> {
    surfaces: HashMap<SurfaceId, Vec<E>>,
}

impl<E> Default for ElementRegistry<E> {
    fn default() -> Self {
        Self {
            surfaces: HashMap::new(),
        }
    }
}

impl<E: Element> ElementRegistry<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `element` against `surface`.
    pub fn register(&mut self, surface: SurfaceId, element: E) {
        self.surfaces.entry(surface).or_default().push(element);
    }

    /// Remove every element of `surface` whose node equals `node`.
    ///
    /// Returns the number of elements removed.
    pub fn unregister(&mut self, surface: SurfaceId, node: &E::Node) -> usize
    where
        E::Node: PartialEq,
    {
        let Some(elements) = self.surfaces.get_mut(&surface) else {
            return 0;
        };
        let before = elements.len();
        elements.retain(|e| e.node() != *node);
        let removed = before - elements.len();
        if elements.is_empty() {
            self.surfaces.remove(&surface);
        }
        removed
    }

    /// Mutable access to the elements of `surface`, e.g. to update depths after a repaint.
    pub fn elements_mut(&mut self, surface: SurfaceId) -> Option<&mut [E]> {
        self.surfaces.get_mut(&surface).map(Vec::as_mut_slice)
    }

    /// Drop every element registered against `surface`.
    pub fn clear_surface(&mut self, surface: SurfaceId) {
        self.surfaces.remove(&surface);
    }

    /// Total number of registered elements across all surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.values().map(Vec::len).sum()
    }

    /// Whether no element is registered.
    pub fn is_empty(&self) -> bool {
        self.surfaces.values().all(Vec::is_empty)
    }
}

impl<E: Element> ElementProvider for ElementRegistry<E> {
    type Element = E;

    fn elements_for_surface(&self, surface: SurfaceId) -> &[E] {
        self.surfaces
            .get(&surface)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
