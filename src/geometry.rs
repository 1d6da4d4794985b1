//! 2D geometry primitives shared by the collision code.
//!
//! Coordinates are y-down (screen space): [`UP`] points towards negative y.

use glam::Vec2;

/// Unit vector pointing up the screen.
pub const UP: Vec2 = Vec2::NEG_Y;
/// Unit vector pointing down the screen.
pub const DOWN: Vec2 = Vec2::Y;
/// Unit vector pointing left.
pub const LEFT: Vec2 = Vec2::NEG_X;
/// Unit vector pointing right.
pub const RIGHT: Vec2 = Vec2::X;

/// Axis-aligned rectangle stored as its minimum corner and its size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Minimum (top-left) corner.
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Rectangle of `size` centered on `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            position: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }

    /// Strict overlap test. Rectangles that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.position.x < other.position.x + other.size.x
            && self.position.x + self.size.x > other.position.x
            && self.position.y < other.position.y + other.size.y
            && self.position.y + self.size.y > other.position.y
    }

    /// Minkowski sum with a box of `size` centered on the origin.
    ///
    /// Testing a point against the result is equivalent to testing a box of
    /// `size` centered on that point against `self`.
    pub fn expanded_by(&self, size: Vec2) -> Rect {
        Rect {
            position: self.position - size / 2.0,
            size: self.size + size,
        }
    }

    /// Smallest rectangle covering `self` moved along `velocity`.
    pub fn swept(&self, velocity: Vec2) -> Rect {
        Rect {
            position: Vec2::new(
                if velocity.x > 0.0 {
                    self.position.x
                } else {
                    self.position.x + velocity.x
                },
                if velocity.y > 0.0 {
                    self.position.y
                } else {
                    self.position.y + velocity.y
                },
            ),
            size: self.size + velocity.abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(1.0, 2.0), Vec2::new(2.0, 4.0));
        assert_eq!(r.min(), Vec2::new(0.0, 0.0));
        assert_eq!(r.max(), Vec2::new(2.0, 4.0));
        assert_eq!(r.center(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_intersects_is_symmetric_and_strict() {
        let a = Rect::new(Vec2::ZERO, Vec2::ONE);
        let b = Rect::new(Vec2::new(0.5, 0.5), Vec2::ONE);
        let touching = Rect::new(Vec2::new(1.0, 0.0), Vec2::ONE);
        let far = Rect::new(Vec2::new(5.0, 5.0), Vec2::ONE);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&touching));
        assert!(!touching.intersects(&a));
        assert!(!a.intersects(&far));
    }

    #[test]
    fn test_expanded_by() {
        let r = Rect::from_center(Vec2::new(1.0, 0.0), Vec2::ONE);
        let e = r.expanded_by(Vec2::ONE);
        assert_eq!(e.min(), Vec2::new(0.0, -1.0));
        assert_eq!(e.size, Vec2::splat(2.0));
        assert_eq!(e.center(), r.center());
    }

    #[test]
    fn test_swept_covers_both_ends() {
        let r = Rect::new(Vec2::ZERO, Vec2::ONE);

        let forward = r.swept(Vec2::new(3.0, 2.0));
        assert_eq!(forward.min(), Vec2::ZERO);
        assert_eq!(forward.max(), Vec2::new(4.0, 3.0));

        let backward = r.swept(Vec2::new(-3.0, -2.0));
        assert_eq!(backward.min(), Vec2::new(-3.0, -2.0));
        assert_eq!(backward.max(), Vec2::ONE);

        let still = r.swept(Vec2::ZERO);
        assert_eq!(still, r);
    }
}
