//! Spawn helpers for common body layouts.
//!
//! These spawn colliders directly and do not notify controller or trigger
//! caches. Colliders added to a body after it has moved should go through
//! [`CollisionWorld::attach`](crate::physics::CollisionWorld::attach).

use glam::Vec2;

use crate::ecs::components::physics::{BoxCollider, Controller};
use crate::ecs::components::transform::{Attached, Position};

/// Spawn a body with a position and no colliders.
pub fn spawn_body(world: &mut hecs::World, position: Vec2) -> hecs::Entity {
    world.spawn((Position(position),))
}

/// Spawn a static body with one box collider. Returns `(body, collider)`.
pub fn spawn_static_box(
    world: &mut hecs::World,
    position: Vec2,
    collider: BoxCollider,
) -> (hecs::Entity, hecs::Entity) {
    let body = spawn_body(world, position);
    let collider = world.spawn((collider, Attached(body)));
    (body, collider)
}

/// Spawn a controller-driven body with one box collider. Returns `(body, collider)`.
pub fn spawn_controlled(
    world: &mut hecs::World,
    position: Vec2,
    collider: BoxCollider,
) -> (hecs::Entity, hecs::Entity) {
    let body = world.spawn((Position(position), Controller::new()));
    let collider = world.spawn((collider, Attached(body)));
    (body, collider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_static_box_links_collider() {
        let mut world = hecs::World::new();
        let (body, collider) =
            spawn_static_box(&mut world, Vec2::new(2.0, 3.0), BoxCollider::default());

        assert_eq!(world.get::<&Attached>(collider).unwrap().0, body);
        assert_eq!(world.get::<&Position>(body).unwrap().0, Vec2::new(2.0, 3.0));
        assert!(world.get::<&Controller>(body).is_err());
    }

    #[test]
    fn test_spawn_controlled_has_controller() {
        let mut world = hecs::World::new();
        let (body, _) = spawn_controlled(&mut world, Vec2::ZERO, BoxCollider::default());
        let controller = world.get::<&Controller>(body).unwrap();
        assert_eq!(controller.velocity(), Vec2::ZERO);
        assert!(controller.colliders().is_none());
    }
}
