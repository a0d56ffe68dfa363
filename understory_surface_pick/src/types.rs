// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types shared by the picking engine: identifiers, policies, and hit records.

/// Depth reported by an element that has not been drawn yet.
///
/// Elements at this depth never become candidates.
pub const UNDRAWN_DEPTH: i32 = -1;

/// Priority assigned to a surface whose configured priority is unset or non-positive.
pub const DEFAULT_PRIORITY: i32 = 3;

/// Identifier of a display surface.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceId(pub u32);

/// Identifier of the query module (raycaster) that produced a hit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub u32);

/// How a surface is presented on screen.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderMode {
    /// Drawn on top of everything in screen space; no camera is involved.
    #[default]
    Overlay,
    /// Drawn at a fixed distance in front of a camera.
    ///
    /// Without an explicit camera this behaves like [`RenderMode::Overlay`] for picking.
    CameraSpace,
    /// Placed in the world like any other object and seen through a camera.
    WorldSpace,
}

bitflags::bitflags! {
    /// Which kinds of scene geometry may block the pointer before it reaches a surface.
    ///
    /// The empty set disables occlusion entirely.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BlockingGeometry: u8 {
        /// Geometry known to the 3D intersection provider.
        const GEOMETRY_3D = 0b0000_0001;
        /// Geometry known to the 2D intersection provider.
        const GEOMETRY_2D = 0b0000_0010;
        /// Both 3D and 2D geometry.
        const ALL = Self::GEOMETRY_3D.bits() | Self::GEOMETRY_2D.bits();
    }
}

/// Set of scene layers, one bit per layer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Matches every layer.
    pub const ALL: Self = Self(u32::MAX);
    /// Matches no layer.
    pub const NONE: Self = Self(0);

    /// Mask containing only `layer`.
    ///
    /// Layers at or beyond 32 produce an empty mask.
    pub const fn layer(layer: u32) -> Self {
        if layer < 32 {
            Self(1 << layer)
        } else {
            Self::NONE
        }
    }

    /// Whether `layer` is part of this mask.
    pub const fn contains_layer(self, layer: u32) -> bool {
        layer < 32 && self.0 & (1 << layer) != 0
    }

    /// Union of two masks.
    #[must_use]
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// One element found under the pointer.
///
/// Results are appended to a caller-owned list in front-to-back order.
#[derive(Clone, Debug, PartialEq)]
pub struct HitResult<N> {
    /// The node that was hit.
    pub node: N,
    /// The module that produced this hit.
    pub module: ModuleId,
    /// Distance from the viewer; `0.0` for overlay surfaces.
    pub distance: f64,
    /// Position in the result list at the time of insertion.
    ///
    /// This keeps increasing across modules that share one list, so consumers
    /// can use it as a final tie-breaker.
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_mask_membership() {
        let mask = LayerMask::layer(3).with(LayerMask::layer(5));
        assert!(mask.contains_layer(3));
        assert!(mask.contains_layer(5));
        assert!(!mask.contains_layer(4));
        assert!(!mask.contains_layer(40));
        assert_eq!(LayerMask::layer(32), LayerMask::NONE);
        assert_eq!(LayerMask::default(), LayerMask::ALL);
    }

    #[test]
    fn blocking_defaults_to_none() {
        assert!(BlockingGeometry::default().is_empty());
        assert!(BlockingGeometry::ALL.contains(BlockingGeometry::GEOMETRY_3D));
        assert!(BlockingGeometry::ALL.contains(BlockingGeometry::GEOMETRY_2D));
    }
}
