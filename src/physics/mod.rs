//! Swept rectangle collision detection and kinematic response.
//!
//! # Architecture
//!
//! Bodies are hecs entities with a [`Position`]. Colliders live on their own
//! entities, linked to a body through [`Attached`]. A [`CollisionWorld`] owns
//! the [`ColliderRegistry`] that knows which collider kinds exist and which
//! pairs of kinds can interact.
//!
//! Moving a body with [`CollisionWorld::move_body`] runs, per own collider:
//!
//! 1. Snapshot every registered collider in the world
//! 2. Layer filter
//! 3. Broadphase: swept bounds versus target bounds
//! 4. Narrowphase: ray versus Minkowski-expanded box (slab method)
//! 5. Respond: resolve hits earliest first, sliding along blocking faces
//!
//! Ray queries reuse the same swept test with a small probe box.

pub mod broadphase;
pub mod collider;
pub mod contact;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod layer;
pub mod narrowphase;
pub mod raycast;
#[cfg(feature = "triggers")]
pub mod trigger;

use std::any::{type_name, TypeId};

use glam::Vec2;
use tracing::debug;

use crate::ecs::components::physics::{BoxCollider, Controller};
use crate::ecs::components::transform::{Attached, Position};

pub use self::collider::BoxCollisionInfo;
pub use self::contact::Body;
pub use self::dispatch::{Collidable, Collide, ColliderRef, ColliderRegistry, Placed};
pub use self::error::CollisionError;
pub use self::layer::CollisionLayer;
pub use self::raycast::{RayProbe, Raycast, RaycastHit};
#[cfg(feature = "triggers")]
pub use self::trigger::TriggerEvent;

/// Configuration for collision queries.
#[derive(Debug, Clone)]
pub struct CollisionConfig {
    /// Direction considered "up" when setting floor and ceiling flags. Default: (0, -1).
    pub up: Vec2,
    /// Size of the probe box swept by ray queries. Default: (1, 1).
    pub probe_size: Vec2,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            up: Vec2::NEG_Y,
            probe_size: Vec2::ONE,
        }
    }
}

/// A structural change to a body's collider set, applied to controller and
/// trigger caches on the next move or trigger update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderChange {
    Attached(ColliderRef),
    Detached {
        collider: hecs::Entity,
        owner: hecs::Entity,
    },
}

/// Collision state shared by every body in a [`hecs::World`].
pub struct CollisionWorld {
    config: CollisionConfig,
    registry: ColliderRegistry,
    changes: Vec<ColliderChange>,
}

impl CollisionWorld {
    /// Create a collision world with box colliders registered.
    pub fn new(config: CollisionConfig) -> Self {
        let mut registry = ColliderRegistry::new();
        registry
            .register_pair::<BoxCollider, BoxCollider>()
            .register_raycast::<BoxCollider>();
        Self {
            config,
            registry,
            changes: Vec::new(),
        }
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    pub fn registry(&self) -> &ColliderRegistry {
        &self.registry
    }

    /// Register additional collider kinds and pairs.
    pub fn registry_mut(&mut self) -> &mut ColliderRegistry {
        &mut self.registry
    }

    /// Attach a new collider to `owner`. Returns the collider entity.
    pub fn attach<T: Collidable>(
        &mut self,
        world: &mut hecs::World,
        owner: hecs::Entity,
        collider: T,
    ) -> Result<hecs::Entity, CollisionError> {
        if !self.registry.is_registered::<T>() {
            return Err(CollisionError::UnregisteredKind(type_name::<T>()));
        }
        controller::read_position(world, owner)?;

        let blocks = collider.blocks();
        let entity = world.spawn((collider, Attached(owner)));
        debug!(?owner, collider = ?entity, blocks, "attached collider");
        self.changes.push(ColliderChange::Attached(ColliderRef {
            entity,
            owner,
            kind: TypeId::of::<T>(),
            blocks,
        }));
        Ok(entity)
    }

    /// Despawn an attached collider entity.
    pub fn detach(
        &mut self,
        world: &mut hecs::World,
        collider: hecs::Entity,
    ) -> Result<(), CollisionError> {
        let owner = match world.get::<&Attached>(collider) {
            Ok(attached) => attached.0,
            Err(hecs::ComponentError::NoSuchEntity) => {
                return Err(CollisionError::NoSuchEntity(collider))
            }
            Err(_) => return Err(CollisionError::NotAttached(collider)),
        };
        world
            .despawn(collider)
            .map_err(|_| CollisionError::NoSuchEntity(collider))?;
        debug!(?owner, ?collider, "detached collider");
        self.changes
            .push(ColliderChange::Detached { collider, owner });
        Ok(())
    }

    /// Apply queued attach/detach changes to controller and trigger caches.
    pub fn flush_changes(&mut self, world: &mut hecs::World) {
        for change in self.changes.drain(..) {
            let owner = match change {
                ColliderChange::Attached(c) => c.owner,
                ColliderChange::Detached { owner, .. } => owner,
            };
            if let Ok(mut controller) = world.get::<&mut Controller>(owner) {
                match change {
                    ColliderChange::Attached(c) => controller.notify_attached(c),
                    ColliderChange::Detached { collider, .. } => {
                        controller.notify_detached(collider)
                    }
                }
            }
            #[cfg(feature = "triggers")]
            {
                use crate::ecs::components::physics::Trigger;
                if let Ok(mut trigger) = world.get::<&mut Trigger>(owner) {
                    match change {
                        ColliderChange::Attached(c) => trigger.notify_attached(c),
                        ColliderChange::Detached { collider, .. } => {
                            trigger.notify_detached(collider)
                        }
                    }
                }
            }
        }
    }

    /// Changes not yet applied to caches.
    pub fn pending_changes(&self) -> &[ColliderChange] {
        &self.changes
    }

    /// Move a controller-driven body by `velocity`, resolving collisions.
    ///
    /// The body needs a [`Position`] and a [`Controller`]. Its controller
    /// afterwards reports the velocity and the floor/wall/ceiling contacts.
    pub fn move_body(
        &mut self,
        world: &mut hecs::World,
        entity: hecs::Entity,
        velocity: Vec2,
    ) -> Result<(), CollisionError> {
        self.flush_changes(world);
        controller::move_body(&self.registry, &self.config, world, entity, velocity)
    }

    /// Closest collider hit by a probe swept from `from` to `to`.
    ///
    /// Fails if any raycastable collider is attached to a body without a
    /// [`Position`].
    pub fn raycast(
        &self,
        world: &hecs::World,
        from: Vec2,
        to: Vec2,
        layer: CollisionLayer,
        ignore: &[hecs::Entity],
    ) -> Result<Option<RaycastHit>, CollisionError> {
        let probe = RayProbe::between(from, to, layer, self.config.probe_size);
        raycast::intersects(&self.registry, world, probe, ignore)
    }

    /// Every collider hit by a probe swept from `from` to `to`, in entity order.
    pub fn raycast_all<'w>(
        &self,
        world: &'w hecs::World,
        from: Vec2,
        to: Vec2,
        layer: CollisionLayer,
        ignore: &'w [hecs::Entity],
    ) -> Result<impl Iterator<Item = RaycastHit> + 'w, CollisionError> {
        let probe = RayProbe::between(from, to, layer, self.config.probe_size);
        raycast::intersects_all(&self.registry, world, probe, ignore)
    }

    /// Update every [`Trigger`](crate::ecs::components::physics::Trigger) and
    /// report bodies that entered or left one.
    #[cfg(feature = "triggers")]
    pub fn update_triggers(
        &mut self,
        world: &mut hecs::World,
    ) -> Result<Vec<TriggerEvent>, CollisionError> {
        self.flush_changes(world);
        trigger::update_triggers(&self.registry, world)
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new(CollisionConfig::default())
    }
}

/// Position of a body, if it has one.
pub fn body_position(world: &hecs::World, entity: hecs::Entity) -> Option<Vec2> {
    world.get::<&Position>(entity).ok().map(|p| p.0)
}
