//! Scene builders shared by the collision benchmarks.

use glam::Vec2;
use slide::{spawn_controlled, spawn_static_box, BoxCollider, CollisionWorld};

/// A floor of `n` unit tiles along the x axis at y = 1, plus one controlled body at the origin.
pub fn setup_tile_floor(n: usize) -> (hecs::World, CollisionWorld, hecs::Entity) {
    let mut world = hecs::World::new();
    let physics = CollisionWorld::default();
    for i in 0..n {
        spawn_static_box(&mut world, Vec2::new(i as f32, 1.0), BoxCollider::default());
    }
    let (body, _) = spawn_controlled(&mut world, Vec2::ZERO, BoxCollider::default());
    (world, physics, body)
}

/// `n` unit boxes on a sparse grid, none touching.
pub fn setup_sparse_grid(n: usize) -> (hecs::World, CollisionWorld) {
    let mut world = hecs::World::new();
    let physics = CollisionWorld::default();
    let side = (n as f32).sqrt().ceil().max(1.0) as usize;
    for i in 0..n {
        let x = (i % side) as f32 * 4.0;
        let y = (i / side) as f32 * 4.0;
        spawn_static_box(&mut world, Vec2::new(x, y), BoxCollider::default());
    }
    (world, physics)
}

/// `movers` controlled bodies walking along a floor of `tiles` tiles.
pub fn setup_crowd(movers: usize, tiles: usize) -> (hecs::World, CollisionWorld, Vec<hecs::Entity>) {
    let (mut world, physics, first) = setup_tile_floor(tiles);
    let mut bodies = vec![first];
    for i in 1..movers {
        let (body, _) = spawn_controlled(
            &mut world,
            Vec2::new(i as f32 * 2.0, -2.0),
            BoxCollider::default(),
        );
        bodies.push(body);
    }
    (world, physics, bodies)
}

/// Step every body `frames` times with gravity-like downward motion and a constant walk.
pub fn run_crowd(
    world: &mut hecs::World,
    physics: &mut CollisionWorld,
    bodies: &[hecs::Entity],
    frames: usize,
) {
    let velocity = Vec2::new(0.1, 0.5);
    for _ in 0..frames {
        for &body in bodies {
            physics
                .move_body(world, body, velocity)
                .expect("bench scene is valid");
        }
        physics
            .update_triggers(world)
            .expect("bench scene is valid");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slide::Attached;

    #[test]
    fn test_crowd_lands_on_floor() {
        let (mut world, mut physics, bodies) = setup_crowd(4, 32);
        run_crowd(&mut world, &mut physics, &bodies, 10);
        for &body in &bodies {
            let position = slide::physics::body_position(&world, body).unwrap();
            assert!(position.y.abs() < 1e-4);
        }
    }

    #[test]
    #[should_panic(expected = "bench scene is valid")]
    fn test_crowd_panics_on_broken_scene() {
        let (mut world, mut physics, bodies) = setup_crowd(2, 8);
        let ghost = world.spawn(());
        world.spawn((BoxCollider::default(), Attached(ghost)));
        run_crowd(&mut world, &mut physics, &bodies, 1);
    }
}
