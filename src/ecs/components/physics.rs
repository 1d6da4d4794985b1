//! Collision components for ECS entities.

#[cfg(feature = "triggers")]
use std::collections::HashSet;

use glam::Vec2;

use crate::physics::dispatch::ColliderRef;
use crate::physics::layer::CollisionLayer;

/// Axis-aligned box collider.
///
/// Lives on its own entity next to an
/// [`Attached`](super::transform::Attached) naming its body; the box is centred
/// on the body's position plus `offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    /// Offset of the box centre from the body position.
    pub offset: Vec2,
    pub size: Vec2,
    pub layer: CollisionLayer,
    /// If false, the box is reported to triggers but never stops movement.
    pub block: bool,
}

impl BoxCollider {
    /// A blocking box of the given size on the default layer.
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// A non-blocking box of the given size, used by triggers.
    pub fn sensor(size: Vec2) -> Self {
        Self {
            size,
            block: false,
            ..Self::default()
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_layer(mut self, layer: CollisionLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_block(mut self, block: bool) -> Self {
        self.block = block;
        self
    }
}

impl Default for BoxCollider {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            size: Vec2::ONE,
            layer: CollisionLayer::DEFAULT,
            block: true,
        }
    }
}

/// Kinematic movement state of a body.
///
/// Bodies with a controller are moved by
/// [`CollisionWorld::move_body`](crate::physics::CollisionWorld::move_body).
#[derive(Debug, Clone, Default)]
pub struct Controller {
    pub(crate) velocity: Vec2,
    /// Own blocking colliders. Built on first move.
    pub(crate) colliders: Option<Vec<ColliderRef>>,
    pub(crate) on_floor: bool,
    pub(crate) on_wall: bool,
    pub(crate) on_ceil: bool,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Velocity passed to the last move.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Whether the last move ended against a floor.
    pub fn on_floor(&self) -> bool {
        self.on_floor
    }

    /// Whether the last move ended against a wall.
    pub fn on_wall(&self) -> bool {
        self.on_wall
    }

    /// Whether the last move ended against a ceiling.
    pub fn on_ceil(&self) -> bool {
        self.on_ceil
    }

    /// Cached blocking colliders, or `None` before the first move.
    pub fn colliders(&self) -> Option<&[ColliderRef]> {
        self.colliders.as_deref()
    }

    pub(crate) fn notify_attached(&mut self, collider: ColliderRef) {
        if !collider.blocks {
            return;
        }
        if let Some(colliders) = &mut self.colliders {
            if !colliders.iter().any(|c| c.entity == collider.entity) {
                colliders.push(collider);
            }
        }
    }

    pub(crate) fn notify_detached(&mut self, collider: hecs::Entity) {
        if let Some(colliders) = &mut self.colliders {
            colliders.retain(|c| c.entity != collider);
        }
    }
}

/// Overlap volume that reports controllers entering and leaving it.
///
/// The body's non-blocking colliders form the volume.
#[cfg(feature = "triggers")]
#[derive(Debug, Clone, Default)]
pub struct Trigger {
    /// Own non-blocking colliders. Built on first update.
    pub(crate) colliders: Option<Vec<ColliderRef>>,
    pub(crate) inside: HashSet<hecs::Entity>,
}

#[cfg(feature = "triggers")]
impl Trigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bodies currently inside the trigger.
    pub fn inside(&self) -> &HashSet<hecs::Entity> {
        &self.inside
    }

    pub fn contains(&self, entity: hecs::Entity) -> bool {
        self.inside.contains(&entity)
    }

    pub(crate) fn notify_attached(&mut self, collider: ColliderRef) {
        if collider.blocks {
            return;
        }
        if let Some(colliders) = &mut self.colliders {
            if !colliders.iter().any(|c| c.entity == collider.entity) {
                colliders.push(collider);
            }
        }
    }

    pub(crate) fn notify_detached(&mut self, collider: hecs::Entity) {
        if let Some(colliders) = &mut self.colliders {
            colliders.retain(|c| c.entity != collider);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::TypeId;

    fn collider_ref(world: &mut hecs::World, blocks: bool) -> ColliderRef {
        let owner = world.spawn(());
        ColliderRef {
            entity: world.spawn(()),
            owner,
            kind: TypeId::of::<BoxCollider>(),
            blocks,
        }
    }

    #[test]
    fn test_box_collider_defaults() {
        let collider = BoxCollider::default();
        assert_eq!(collider.size, Vec2::ONE);
        assert_eq!(collider.offset, Vec2::ZERO);
        assert_eq!(collider.layer, CollisionLayer::DEFAULT);
        assert!(collider.block);
        assert!(!BoxCollider::sensor(Vec2::ONE).block);
    }

    #[test]
    fn test_controller_cache_untouched_before_first_move() {
        let mut world = hecs::World::new();
        let mut controller = Controller::new();
        controller.notify_attached(collider_ref(&mut world, true));
        assert!(controller.colliders().is_none());
    }

    #[test]
    fn test_controller_cache_tracks_blocking_colliders() {
        let mut world = hecs::World::new();
        let mut controller = Controller::new();
        controller.colliders = Some(Vec::new());

        let solid = collider_ref(&mut world, true);
        let sensor = collider_ref(&mut world, false);
        controller.notify_attached(solid);
        controller.notify_attached(solid);
        controller.notify_attached(sensor);
        assert_eq!(controller.colliders().unwrap(), &[solid]);

        controller.notify_detached(solid.entity);
        assert!(controller.colliders().unwrap().is_empty());
    }

    #[cfg(feature = "triggers")]
    #[test]
    fn test_trigger_cache_tracks_sensors() {
        let mut world = hecs::World::new();
        let mut trigger = Trigger::new();
        trigger.colliders = Some(Vec::new());

        let solid = collider_ref(&mut world, true);
        let sensor = collider_ref(&mut world, false);
        trigger.notify_attached(solid);
        trigger.notify_attached(sensor);
        assert_eq!(trigger.colliders.as_deref().unwrap(), &[sensor]);

        trigger.notify_detached(sensor.entity);
        assert!(trigger.colliders.as_deref().unwrap().is_empty());
    }
}
