//! Placement components for ECS entities.

use glam::Vec2;

/// World-space position of a body. Colliders are placed relative to it.
///
/// Bodies driven by a [`Controller`](super::physics::Controller) should only be
/// moved through [`CollisionWorld::move_body`](crate::physics::CollisionWorld::move_body).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// Links a collider entity to the body that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attached(pub hecs::Entity);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_default_is_origin() {
        assert_eq!(Position::default().0, Vec2::ZERO);
    }

    #[test]
    fn test_attached_points_at_owner() {
        let mut world = hecs::World::new();
        let owner = world.spawn((Position(Vec2::new(1.0, 2.0)),));
        let collider = world.spawn((Attached(owner),));

        let linked = world.get::<&Attached>(collider).unwrap().0;
        assert_eq!(linked, owner);
        assert_eq!(world.get::<&Position>(linked).unwrap().0, Vec2::new(1.0, 2.0));
    }
}
