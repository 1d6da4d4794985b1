//! Box collider capabilities: swept box-vs-box test, slide response, ray queries.

use glam::Vec2;

use crate::ecs::components::physics::BoxCollider;
use crate::geometry::Rect;

use super::broadphase::swept_overlap;
use super::contact::Body;
use super::dispatch::{Collidable, Collide, Placed};
use super::layer::CollisionLayer;
use super::narrowphase::sweep;
use super::raycast::{RayProbe, Raycast, RaycastHit};

/// One detected impact of a moving box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollisionInfo {
    /// Contact normal, axis aligned, pointing back towards the mover. Zero for an exact corner.
    pub normal: Vec2,
    /// Fraction of the requested velocity travelled before contact, in `[0, 1)`.
    pub time: f32,
    /// Collider entity that was hit.
    pub target: hecs::Entity,
    /// Body owning the collider that was hit.
    pub entity: hecs::Entity,
    /// Whether the hit collider blocks movement.
    pub blocks: bool,
}

impl BoxCollider {
    /// World-space bounds for a collider whose owner sits at `position`.
    #[inline]
    pub fn bounds(&self, position: Vec2) -> Rect {
        Rect::from_center(position + self.offset, self.size)
    }
}

impl Placed<BoxCollider> {
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.collider.bounds(self.position)
    }
}

impl Collidable for BoxCollider {
    type Info = BoxCollisionInfo;

    fn layer(&self) -> CollisionLayer {
        self.layer
    }

    fn blocks(&self) -> bool {
        self.block
    }

    /// Resolve collisions earliest first, sliding along every blocking surface.
    fn respond(body: &mut Body, mut velocity: Vec2, mut collisions: Vec<BoxCollisionInfo>) {
        collisions.sort_by(|a, b| {
            a.time
                .partial_cmp(&b.time)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let count = collisions.len();
        for info in &collisions {
            if !info.blocks {
                continue;
            }
            // A corner hit alongside other hits is a seam between two blocks;
            // the face hit next to it decides. A lone corner hit is a real corner.
            if info.normal == Vec2::ZERO && count != 1 {
                continue;
            }

            body.position += velocity * info.time;

            // Keep only the tangential part of the remaining movement.
            let remaining = 1.0 - info.time;
            let dot = (velocity.x * info.normal.y + velocity.y * info.normal.x) * remaining;
            velocity = Vec2::new(dot * info.normal.y, dot * info.normal.x);

            body.normals.push(info.normal);
        }

        body.position += velocity;
    }
}

impl Collide<BoxCollider> for BoxCollider {
    fn is_colliding(
        a: &Placed<BoxCollider>,
        b: &Placed<BoxCollider>,
        velocity: Vec2,
    ) -> Option<BoxCollisionInfo> {
        if !a.collider.layer.intersects(b.collider.layer) {
            return None;
        }

        let mover = a.bounds();
        let target = b.bounds();
        if !swept_overlap(&mover, velocity, &target) {
            return None;
        }

        let hit = sweep(mover.center(), velocity, &target.expanded_by(mover.size))?;
        Some(BoxCollisionInfo {
            normal: hit.normal,
            time: hit.time,
            target: b.entity,
            entity: b.owner,
            blocks: b.collider.block,
        })
    }

    fn is_still_colliding(a: &Placed<BoxCollider>, b: &Placed<BoxCollider>, velocity: Vec2) -> bool {
        if !a.collider.layer.intersects(b.collider.layer) {
            return false;
        }
        let mut moved = a.bounds();
        moved.position += velocity;
        moved.intersects(&b.bounds())
    }
}

impl Raycast for BoxCollider {
    fn intersects(target: &Placed<BoxCollider>, probe: &RayProbe) -> Option<RaycastHit> {
        let source = Placed {
            entity: hecs::Entity::DANGLING,
            owner: hecs::Entity::DANGLING,
            position: probe.origin,
            collider: BoxCollider {
                offset: Vec2::ZERO,
                size: probe.size,
                layer: probe.layer,
                block: true,
            },
        };

        let info = BoxCollider::is_colliding(&source, target, probe.velocity)?;
        Some(RaycastHit {
            entity: info.entity,
            collider: info.target,
            point: probe.origin + probe.velocity * info.time,
            normal: info.normal,
            time: info.time,
        })
    }
}
