//! Kinematic movement of controller-driven bodies.

use glam::Vec2;
use tracing::{trace, warn};

use crate::ecs::components::physics::Controller;
use crate::ecs::components::transform::{Attached, Position};

use super::contact::Body;
use super::dispatch::{ColliderRef, ColliderRegistry};
use super::error::CollisionError;
use super::CollisionConfig;

/// Move `entity` by `velocity`, stopping and sliding against blocking colliders.
///
/// Each of the body's own blocking colliders is swept against every other
/// collider in the world and its collider kind resolves the resulting batch.
/// The body's position is only ever changed by those responses.
pub(crate) fn move_body(
    registry: &ColliderRegistry,
    config: &CollisionConfig,
    world: &mut hecs::World,
    entity: hecs::Entity,
    velocity: Vec2,
) -> Result<(), CollisionError> {
    let position = read_position(world, entity)?;
    let cached = world
        .get::<&Controller>(entity)
        .map_err(|_| CollisionError::MissingController(entity))?
        .colliders
        .clone();

    let mut colliders = match cached {
        Some(colliders) => colliders,
        None => registry.attached_to(world, entity, true),
    };
    prune_dead(world, entity, &mut colliders);

    let snapshot = registry.snapshot(world);
    registry.check_placed(world, &snapshot)?;
    let mut body = Body::new(entity, position);

    for own in &colliders {
        let batch: Vec<_> = snapshot
            .iter()
            .filter(|target| target.entity != own.entity && target.owner != entity)
            .filter_map(|target| registry.is_colliding_any(world, own, target, velocity))
            .collect();
        trace!(?entity, collider = ?own.entity, hits = batch.len(), "resolving move");

        registry.respond_any(own, &mut body, velocity, batch)?;
        // Later colliders of the same body sweep from the updated position.
        write_position(world, entity, body.position)?;
    }

    let up = config.up;
    let mut controller = world
        .get::<&mut Controller>(entity)
        .map_err(|_| CollisionError::MissingController(entity))?;
    controller.velocity = velocity;
    controller.on_floor = body.touched(up);
    controller.on_ceil = body.touched(-up);
    controller.on_wall = body
        .normals
        .iter()
        .any(|n| *n != Vec2::ZERO && n.dot(up).abs() < f32::EPSILON);
    controller.colliders = Some(colliders);
    Ok(())
}

pub(crate) fn read_position(world: &hecs::World, entity: hecs::Entity) -> Result<Vec2, CollisionError> {
    match world.get::<&Position>(entity) {
        Ok(position) => Ok(position.0),
        Err(hecs::ComponentError::NoSuchEntity) => Err(CollisionError::NoSuchEntity(entity)),
        Err(_) => Err(CollisionError::MissingPosition(entity)),
    }
}

fn write_position(
    world: &mut hecs::World,
    entity: hecs::Entity,
    position: Vec2,
) -> Result<(), CollisionError> {
    let mut current = world
        .get::<&mut Position>(entity)
        .map_err(|_| CollisionError::MissingPosition(entity))?;
    current.0 = position;
    Ok(())
}

/// Drop cached colliders that were despawned or re-parented behind our back.
pub(crate) fn prune_dead(world: &hecs::World, owner: hecs::Entity, colliders: &mut Vec<ColliderRef>) {
    colliders.retain(|c| {
        let alive = world
            .get::<&Attached>(c.entity)
            .is_ok_and(|attached| attached.0 == owner);
        if !alive {
            warn!(?owner, collider = ?c.entity, "dropping stale collider from cache");
        }
        alive
    });
}
