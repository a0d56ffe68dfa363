// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Non-rectangular hit shapes for elements.
//!
//! A [`HitShape`] refines an element's rectangular bounds. It is evaluated in
//! the element's local coordinate space, after the bounds test has passed.

use alloc::vec::Vec;

use kurbo::{BezPath, Circle, Point, Rect, RoundedRect, Shape};

/// Per-texel coverage used to ignore transparent parts of an element.
///
/// The mask is stretched over the element's local rectangle. Rows are stored
/// top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct AlphaMask {
    /// Number of texels per row.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Row-major alpha values, `width * height` entries.
    pub alpha: Vec<u8>,
    /// Minimum normalized alpha (`0.0..=1.0`) a texel needs to count as a hit.
    pub threshold: f32,
}

impl AlphaMask {
    /// Whether the texel under `local` is opaque enough.
    ///
    /// A threshold at or below zero accepts every point inside `rect`, a
    /// threshold above one rejects everything. Points outside `rect` and
    /// masks with missing texels never hit.
    pub fn hit(&self, local: Point, rect: Rect) -> bool {
        if self.threshold > 1.0 {
            return false;
        }
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return false;
        }
        let u = (local.x - rect.x0) / rect.width();
        let v = (local.y - rect.y0) / rect.height();
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return false;
        }
        if self.threshold <= 0.0 {
            return true;
        }
        let Some(alpha) = self.texel(u, v) else {
            return false;
        };
        f32::from(alpha) / 255.0 >= self.threshold
    }

    fn texel(&self, u: f64, v: f64) -> Option<u8> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "u and v are in 0..=1, so the products are small and non-negative"
        )]
        let (x, y) = (
            ((u * self.width as f64) as usize).min(self.width - 1),
            ((v * self.height as f64) as usize).min(self.height - 1),
        );
        y.checked_mul(self.width)
            .and_then(|row| row.checked_add(x))
            .and_then(|i| self.alpha.get(i))
            .copied()
    }
}

/// Shape that decides which parts of an element's rectangle react to the pointer.
#[derive(Clone, Debug, PartialEq)]
pub enum HitShape {
    /// Filled circle.
    Circle(Circle),
    /// Filled rounded rectangle.
    RoundedRect(RoundedRect),
    /// Filled path, using `kurbo`'s fill rule for [`Shape::contains`].
    Path(BezPath),
    /// Texel coverage stretched over the element rectangle.
    Alpha(AlphaMask),
}

impl HitShape {
    /// Whether `local` (in the element's local space) lies on the shape.
    ///
    /// `rect` is the element's local rectangle, used by [`HitShape::Alpha`].
    pub fn hit_local(&self, local: Point, rect: Rect) -> bool {
        match self {
            Self::Circle(c) => contains_filled(c, local),
            Self::RoundedRect(r) => contains_filled(r, local),
            Self::Path(p) => contains_filled(p, local),
            Self::Alpha(mask) => mask.hit(local, rect),
        }
    }
}

fn contains_filled<S: Shape>(shape: &S, pt: Point) -> bool {
    // Cheap reject before the winding computation.
    shape.bounding_box().contains(pt) && shape.contains(pt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const RECT: Rect = Rect::new(0.0, 0.0, 10.0, 10.0);

    #[test]
    fn circle_hit_and_miss() {
        let shape = HitShape::Circle(Circle::new((5.0, 5.0), 5.0));
        assert!(shape.hit_local(Point::new(5.0, 5.0), RECT));
        // Corner of the rect lies outside the inscribed circle.
        assert!(!shape.hit_local(Point::new(0.5, 0.5), RECT));
    }

    #[test]
    fn rounded_rect_corner_is_cut() {
        let shape = HitShape::RoundedRect(RoundedRect::from_rect(RECT, 4.0));
        assert!(shape.hit_local(Point::new(5.0, 5.0), RECT));
        assert!(!shape.hit_local(Point::new(0.2, 0.2), RECT));
    }

    #[test]
    fn path_triangle() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((0.0, 10.0));
        path.close_path();
        let shape = HitShape::Path(path);
        assert!(shape.hit_local(Point::new(2.0, 2.0), RECT));
        assert!(!shape.hit_local(Point::new(8.0, 8.0), RECT));
    }

    fn checker() -> AlphaMask {
        // Left column opaque, right column transparent.
        AlphaMask {
            width: 2,
            height: 2,
            alpha: vec![255, 0, 255, 0],
            threshold: 0.5,
        }
    }

    #[test]
    fn alpha_samples_texels() {
        let mask = checker();
        assert!(mask.hit(Point::new(2.0, 8.0), RECT));
        assert!(!mask.hit(Point::new(8.0, 2.0), RECT));
        // The far edge maps onto the last texel.
        assert!(!mask.hit(Point::new(10.0, 10.0), RECT));
        assert!(!mask.hit(Point::new(-1.0, 5.0), RECT));
    }

    #[test]
    fn alpha_threshold_extremes() {
        let mut mask = checker();
        mask.threshold = 0.0;
        assert!(mask.hit(Point::new(8.0, 2.0), RECT));
        mask.threshold = 1.5;
        assert!(!mask.hit(Point::new(2.0, 2.0), RECT));
    }

    #[test]
    fn alpha_with_missing_texels_misses() {
        let mask = AlphaMask {
            width: 4,
            height: 4,
            alpha: vec![255; 2],
            threshold: 0.1,
        };
        assert!(mask.hit(Point::new(0.0, 0.0), RECT));
        assert!(!mask.hit(Point::new(9.0, 9.0), RECT));
    }

    #[test]
    fn alpha_with_huge_width_misses() {
        let mask = AlphaMask {
            width: usize::MAX / 2,
            height: 4,
            alpha: vec![255; 4],
            threshold: 0.5,
        };
        // Texel index overflows; treated as missing.
        assert!(!mask.hit(Point::new(5.0, 9.0), RECT));
        assert!(mask.hit(Point::new(0.0, 0.0), RECT));
    }
}
