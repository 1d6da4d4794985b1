//! Narrowphase swept test: ray versus axis-aligned box (slab method).

use glam::Vec2;

use crate::geometry::{Rect, DOWN, LEFT, RIGHT, UP};

/// First contact of a swept point with a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    /// Fraction of the velocity travelled before contact, in `[0, 1)`.
    pub time: f32,
    /// Contact normal pointing back towards the mover. Zero for an exact corner hit.
    pub normal: Vec2,
}

/// Sweep the point `origin` along `velocity` against `target`.
///
/// `target` is normally the obstacle already expanded by the mover's size
/// (see [`Rect::expanded_by`]), which turns box-vs-box into ray-vs-box.
/// Returns `None` when contact does not happen within this step, including
/// for a zero velocity and for axes that produce `0 / 0`.
pub fn sweep(origin: Vec2, velocity: Vec2, target: &Rect) -> Option<Sweep> {
    if velocity == Vec2::ZERO {
        return None;
    }

    // Division by a zero velocity component yields +-inf, which the slab
    // comparisons below handle; 0 / 0 yields NaN and means no contact.
    let mut near = (target.min() - origin) / velocity;
    let mut far = (target.max() - origin) / velocity;

    if near.is_nan() || far.is_nan() {
        return None;
    }

    if near.x > far.x {
        std::mem::swap(&mut near.x, &mut far.x);
    }
    if near.y > far.y {
        std::mem::swap(&mut near.y, &mut far.y);
    }

    if near.x > far.y || near.y > far.x {
        return None;
    }

    let time = near.x.max(near.y);
    let time_far = far.x.min(far.y);

    if time_far < 0.0 || time < 0.0 || time >= 1.0 {
        return None;
    }

    let normal = if near.x > near.y {
        if velocity.x < 0.0 {
            RIGHT
        } else {
            LEFT
        }
    } else if near.x < near.y {
        if velocity.y < 0.0 {
            DOWN
        } else {
            UP
        }
    } else {
        Vec2::ZERO
    };

    Some(Sweep { time, normal })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(center: Vec2) -> Rect {
        // A unit box expanded by a unit mover.
        Rect::from_center(center, Vec2::ONE).expanded_by(Vec2::ONE)
    }

    #[test]
    fn test_sweep_hits_wall_on_the_right() {
        let hit = sweep(Vec2::ZERO, Vec2::new(4.0, 0.0), &unit_at(Vec2::new(3.0, 0.0))).unwrap();
        assert!((hit.time - 0.5).abs() < 1e-6);
        assert_eq!(hit.normal, LEFT);
    }

    #[test]
    fn test_sweep_hits_wall_on_the_left() {
        let hit = sweep(Vec2::ZERO, Vec2::new(-4.0, 0.0), &unit_at(Vec2::new(-3.0, 0.0))).unwrap();
        assert!((hit.time - 0.5).abs() < 1e-6);
        assert_eq!(hit.normal, RIGHT);
    }

    #[test]
    fn test_sweep_vertical_normals() {
        let down = sweep(Vec2::ZERO, Vec2::new(0.0, 4.0), &unit_at(Vec2::new(0.0, 3.0))).unwrap();
        assert_eq!(down.normal, UP);

        let up = sweep(Vec2::ZERO, Vec2::new(0.0, -4.0), &unit_at(Vec2::new(0.0, -3.0))).unwrap();
        assert_eq!(up.normal, DOWN);
    }

    #[test]
    fn test_sweep_short_of_target() {
        assert!(sweep(Vec2::ZERO, Vec2::new(0.5, 0.0), &unit_at(Vec2::new(3.0, 0.0))).is_none());
    }

    #[test]
    fn test_sweep_moving_away() {
        assert!(sweep(Vec2::ZERO, Vec2::new(-4.0, 0.0), &unit_at(Vec2::new(3.0, 0.0))).is_none());
    }

    #[test]
    fn test_sweep_misses_sideways() {
        assert!(sweep(Vec2::ZERO, Vec2::new(4.0, 0.0), &unit_at(Vec2::new(3.0, 5.0))).is_none());
    }

    #[test]
    fn test_sweep_zero_velocity() {
        assert!(sweep(Vec2::ZERO, Vec2::ZERO, &unit_at(Vec2::new(1.0, 0.0))).is_none());
        assert!(sweep(Vec2::ZERO, Vec2::ZERO, &unit_at(Vec2::ZERO)).is_none());
    }

    #[test]
    fn test_sweep_nan_axis_is_no_contact() {
        // Moving horizontally exactly along the expanded box's top edge: 0 / 0 on y.
        let target = unit_at(Vec2::new(3.0, 1.0));
        assert_eq!(target.min().y, 0.0);
        assert!(sweep(Vec2::ZERO, Vec2::new(4.0, 0.0), &target).is_none());
    }

    #[test]
    fn test_sweep_exact_corner_has_zero_normal() {
        let hit = sweep(Vec2::ZERO, Vec2::new(2.0, 2.0), &unit_at(Vec2::new(2.0, 2.0))).unwrap();
        assert!((hit.time - 0.5).abs() < 1e-6);
        assert_eq!(hit.normal, Vec2::ZERO);
    }

    #[test]
    fn test_sweep_touching_reports_time_zero() {
        let hit = sweep(Vec2::ZERO, Vec2::new(2.0, 0.0), &unit_at(Vec2::new(1.0, 0.0))).unwrap();
        assert_eq!(hit.time, 0.0);
        assert_eq!(hit.normal, LEFT);
    }
}
