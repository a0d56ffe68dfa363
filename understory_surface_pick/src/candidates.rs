// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate search: which elements of a surface lie under the pointer.

use kurbo::Point;
use smallvec::SmallVec;

use crate::camera::Camera;
use crate::element::Element;
use crate::types::UNDRAWN_DEPTH;

/// Inline capacity of candidate buffers; larger stacks spill to the heap.
pub const INLINE_CANDIDATES: usize = 16;

/// Elements under the pointer, frontmost first.
pub type Candidates<'a, E> = SmallVec<[&'a E; INLINE_CANDIDATES]>;

/// Collect the elements under `pointer`, sorted front to back.
///
/// An element is a candidate when it has been drawn, its bounds contain the
/// pointer, and its own hit test accepts the pointer. Candidates are ordered
/// by depth, highest first; equal depths keep their input order.
///
/// The buffer is local to the call, so concurrent searches never share state.
pub fn find_candidates<'a, E: Element>(
    elements: &'a [E],
    camera: Option<&Camera>,
    pointer: Point,
) -> Candidates<'a, E> {
    let mut found = Candidates::new();
    for element in elements {
        if element.depth() == UNDRAWN_DEPTH {
            continue;
        }
        if !element.contains_point(pointer, camera) {
            continue;
        }
        if element.hit_test(pointer, camera) {
            found.push(element);
        }
    }
    // Stable: ties stay in registration order.
    found.sort_by(|a, b| b.depth().cmp(&a.depth()));
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;
    use glam::DQuat;
    use kurbo::Rect;

    struct Probe {
        id: u32,
        depth: i32,
        bounds: Rect,
        accept: bool,
        predicate_calls: Cell<u32>,
    }

    impl Probe {
        fn new(id: u32, depth: i32) -> Self {
            Self {
                id,
                depth,
                bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
                accept: true,
                predicate_calls: Cell::new(0),
            }
        }
    }

    impl Element for Probe {
        type Node = u32;

        fn node(&self) -> u32 {
            self.id
        }

        fn depth(&self) -> i32 {
            self.depth
        }

        fn rotation(&self) -> DQuat {
            DQuat::IDENTITY
        }

        fn contains_point(&self, pointer: Point, _camera: Option<&Camera>) -> bool {
            self.bounds.contains(pointer)
        }

        fn hit_test(&self, _pointer: Point, _camera: Option<&Camera>) -> bool {
            self.predicate_calls.set(self.predicate_calls.get() + 1);
            self.accept
        }
    }

    fn ids(found: &Candidates<'_, Probe>) -> Vec<u32> {
        found.iter().map(|p| p.id).collect()
    }

    #[test]
    fn sorted_front_to_back() {
        let elements = vec![Probe::new(1, 2), Probe::new(2, 5), Probe::new(3, 3)];
        let found = find_candidates(&elements, None, Point::new(5.0, 5.0));
        assert_eq!(ids(&found), [2, 3, 1]);
    }

    #[test]
    fn equal_depths_keep_registration_order() {
        let elements = vec![
            Probe::new(1, 4),
            Probe::new(2, 9),
            Probe::new(3, 4),
            Probe::new(4, 4),
        ];
        let found = find_candidates(&elements, None, Point::new(5.0, 5.0));
        assert_eq!(ids(&found), [2, 1, 3, 4]);
    }

    #[test]
    fn undrawn_elements_are_skipped() {
        let elements = vec![Probe::new(1, UNDRAWN_DEPTH), Probe::new(2, 0)];
        let found = find_candidates(&elements, None, Point::new(5.0, 5.0));
        assert_eq!(ids(&found), [2]);
        assert_eq!(
            elements[0].predicate_calls.get(),
            0,
            "undrawn element must not be hit tested"
        );
    }

    #[test]
    fn predicate_runs_after_bounds() {
        let mut outside = Probe::new(1, 1);
        outside.bounds = Rect::new(20.0, 20.0, 30.0, 30.0);
        let mut rejecting = Probe::new(2, 2);
        rejecting.accept = false;
        let elements = vec![outside, rejecting, Probe::new(3, 0)];

        let found = find_candidates(&elements, None, Point::new(5.0, 5.0));
        assert_eq!(ids(&found), [3]);
        assert_eq!(elements[0].predicate_calls.get(), 0);
        assert_eq!(elements[1].predicate_calls.get(), 1);
    }

    #[test]
    fn repeated_searches_do_not_accumulate() {
        let elements: Vec<Probe> = (0..40).map(|i| Probe::new(i, i as i32)).collect();
        let first = find_candidates(&elements, None, Point::new(5.0, 5.0));
        let second = find_candidates(&elements, None, Point::new(5.0, 5.0));
        assert_eq!(first.len(), 40);
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(second[0].id, 39);
        assert!(find_candidates(&elements, None, Point::new(50.0, 5.0)).is_empty());
    }
}
