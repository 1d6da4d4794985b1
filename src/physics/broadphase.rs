//! Broadphase culling for swept box tests.

use glam::Vec2;

use crate::geometry::Rect;

/// Cheap rejection test: does the area `mover` sweeps along `velocity` overlap `target`?
///
/// Only pairs passing this test go on to the slab test in
/// [`narrowphase::sweep`](super::narrowphase::sweep).
#[inline]
pub fn swept_overlap(mover: &Rect, velocity: Vec2, target: &Rect) -> bool {
    mover.swept(velocity).intersects(target)
}
