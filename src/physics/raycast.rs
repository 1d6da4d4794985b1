//! Ray queries against every raycastable collider in the world.
//!
//! A ray is answered by sweeping a small probe box from the ray origin along
//! the ray, reusing the same swept test movers use.

use glam::Vec2;

use super::dispatch::{Collidable, ColliderRegistry, Placed};
use super::error::CollisionError;
use super::layer::CollisionLayer;

/// A ray query hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Body owning the collider that was hit.
    pub entity: hecs::Entity,
    /// Collider entity that was hit.
    pub collider: hecs::Entity,
    /// World-space point where the probe stops.
    pub point: Vec2,
    pub normal: Vec2,
    /// Fraction of the ray travelled before contact.
    pub time: f32,
}

/// The synthetic mover used to answer a ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayProbe {
    pub origin: Vec2,
    /// `to - from`.
    pub velocity: Vec2,
    pub layer: CollisionLayer,
    pub size: Vec2,
}

impl RayProbe {
    pub fn between(from: Vec2, to: Vec2, layer: CollisionLayer, size: Vec2) -> Self {
        Self {
            origin: from,
            velocity: to - from,
            layer,
            size,
        }
    }
}

/// Capability of a collider kind to be hit by ray queries.
pub trait Raycast: Collidable {
    fn intersects(target: &Placed<Self>, probe: &RayProbe) -> Option<RaycastHit>;
}

/// Every hit along the probe, in entity order.
///
/// The collider set is captured before the first hit is produced; colliders
/// owned by an entity in `ignore` are skipped. Fails if a collider's owner has
/// no position.
pub fn intersects_all<'w>(
    registry: &ColliderRegistry,
    world: &'w hecs::World,
    probe: RayProbe,
    ignore: &'w [hecs::Entity],
) -> Result<impl Iterator<Item = RaycastHit> + 'w, CollisionError> {
    let targets = registry.snapshot_raycastable(world);
    registry.check_placed(world, targets.iter().map(|(target, _)| target))?;
    Ok(targets
        .into_iter()
        .filter(move |(target, _)| !ignore.contains(&target.owner))
        .filter_map(move |(target, raycast)| raycast(world, &target, &probe)))
}

/// The hit closest to the probe origin, if any.
pub fn intersects(
    registry: &ColliderRegistry,
    world: &hecs::World,
    probe: RayProbe,
    ignore: &[hecs::Entity],
) -> Result<Option<RaycastHit>, CollisionError> {
    let mut closest: Option<(f32, RaycastHit)> = None;
    for hit in intersects_all(registry, world, probe, ignore)? {
        let distance = hit.point.distance_squared(probe.origin);
        // Strict comparison keeps the first hit on ties.
        if closest.map_or(true, |(best, _)| distance < best) {
            closest = Some((distance, hit));
        }
    }
    Ok(closest.map(|(_, hit)| hit))
}
