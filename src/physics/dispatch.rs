//! Capability-based double dispatch between collider kinds.
//!
//! A collider kind is any hecs component implementing [`Collidable`]. For each
//! ordered pair of kinds that can interact, the mover kind implements
//! [`Collide<Other>`]. The [`ColliderRegistry`] erases those strongly typed
//! implementations behind `(TypeId, TypeId)` keys so callers can iterate over
//! every collider in the world without knowing the concrete kinds.
//!
//! A pair that was never registered, or an entity whose components do not match
//! the kinds a handler was registered for, simply reports "no collision".

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use glam::Vec2;
use tracing::{debug, warn};

use crate::ecs::components::transform::{Attached, Position};

use super::contact::Body;
use super::error::CollisionError;
use super::layer::CollisionLayer;
use super::raycast::{RayProbe, Raycast, RaycastHit};

/// A collider kind.
///
/// Implementors are hecs components living on their own entity next to an
/// [`Attached`] component naming the body that owns them.
pub trait Collidable: hecs::Component + Copy {
    /// Collision record produced when a collider of this kind is the mover.
    type Info: Copy + 'static;

    fn layer(&self) -> CollisionLayer;

    /// Whether this collider physically stops movers.
    fn blocks(&self) -> bool;

    /// Apply a batch of collisions found for one mover collider in one step.
    ///
    /// Implementations update `body.position`; they are the only place a
    /// controlled body is moved.
    fn respond(body: &mut Body, velocity: Vec2, collisions: Vec<Self::Info>);
}

/// Pairwise capability: how a `Self` mover tests against an `Other` collider.
pub trait Collide<Other: Collidable>: Collidable {
    /// Would `a`, moving by `velocity`, touch `b` during this step?
    fn is_colliding(a: &Placed<Self>, b: &Placed<Other>, velocity: Vec2) -> Option<Self::Info>;

    /// Overlap check used for entities already known to be inside a trigger.
    ///
    /// Override when [`Collide::is_colliding`] assumes the pair starts apart.
    fn is_still_colliding(a: &Placed<Self>, b: &Placed<Other>, velocity: Vec2) -> bool {
        Self::is_colliding(a, b, velocity).is_some()
    }
}

/// A value snapshot of a collider, its owner, and the owner's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placed<T> {
    /// Entity holding the collider component.
    pub entity: hecs::Entity,
    /// Body the collider is attached to.
    pub owner: hecs::Entity,
    /// Position of the owner.
    pub position: Vec2,
    pub collider: T,
}

impl<T: Collidable> Placed<T> {
    /// Read a `T` collider and its owner's position from the world.
    ///
    /// Returns `None` when `entity` has no `T`, is not attached, or its owner
    /// has no position.
    pub fn fetch(world: &hecs::World, entity: hecs::Entity) -> Option<Self> {
        let collider = *world.get::<&T>(entity).ok()?;
        let owner = world.get::<&Attached>(entity).ok()?.0;
        let position = world.get::<&Position>(owner).ok()?.0;
        Some(Self {
            entity,
            owner,
            position,
            collider,
        })
    }
}

/// Type-erased handle to a collider entity of some registered kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColliderRef {
    pub entity: hecs::Entity,
    pub owner: hecs::Entity,
    pub kind: TypeId,
    /// Value of [`Collidable::blocks`] when the handle was taken.
    pub blocks: bool,
}

/// Collision record of an unknown kind, produced by [`ColliderRegistry::is_colliding_any`].
pub type ErasedInfo = Box<dyn Any>;

type CollectFn = fn(&hecs::World, &mut Vec<ColliderRef>);
type RespondFn = fn(&mut Body, Vec2, Vec<ErasedInfo>);
type PairFn = fn(&hecs::World, &ColliderRef, &ColliderRef, Vec2) -> Option<ErasedInfo>;
type StillFn = fn(&hecs::World, &ColliderRef, &ColliderRef, Vec2) -> bool;
type RaycastFn = fn(&hecs::World, &ColliderRef, &RayProbe) -> Option<RaycastHit>;

struct KindEntry {
    type_id: TypeId,
    name: &'static str,
    collect: CollectFn,
    respond: RespondFn,
    raycast: Option<RaycastFn>,
}

struct PairEntry {
    is_colliding: PairFn,
    is_still_colliding: StillFn,
}

/// Registry of collider kinds and the pairs that may interact.
#[derive(Default)]
pub struct ColliderRegistry {
    kinds: Vec<KindEntry>,
    pairs: HashMap<(TypeId, TypeId), PairEntry>,
}

impl ColliderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `T` known to the registry. Registering twice is a no-op.
    pub fn register_kind<T: Collidable>(&mut self) -> &mut Self {
        let type_id = TypeId::of::<T>();
        if self.kind(type_id).is_none() {
            debug!(kind = type_name::<T>(), "registered collider kind");
            self.kinds.push(KindEntry {
                type_id,
                name: type_name::<T>(),
                collect: collect_kind::<T>,
                respond: respond_kind::<T>,
                raycast: None,
            });
        }
        self
    }

    /// Allow `A` movers to collide with `B` colliders.
    pub fn register_pair<A, B>(&mut self) -> &mut Self
    where
        A: Collide<B>,
        B: Collidable,
    {
        self.register_kind::<A>();
        self.register_kind::<B>();
        self.pairs.insert(
            (TypeId::of::<A>(), TypeId::of::<B>()),
            PairEntry {
                is_colliding: pair_colliding::<A, B>,
                is_still_colliding: pair_still_colliding::<A, B>,
            },
        );
        debug!(
            mover = type_name::<A>(),
            target = type_name::<B>(),
            "registered collider pair"
        );
        self
    }

    /// Make colliders of kind `T` visible to ray queries.
    pub fn register_raycast<T: Raycast>(&mut self) -> &mut Self {
        self.register_kind::<T>();
        let type_id = TypeId::of::<T>();
        if let Some(entry) = self.kinds.iter_mut().find(|k| k.type_id == type_id) {
            entry.raycast = Some(raycast_kind::<T>);
        }
        self
    }

    pub fn is_registered<T: Collidable>(&self) -> bool {
        self.kind(TypeId::of::<T>()).is_some()
    }

    /// Whether `A` movers have a declared capability against `B` colliders.
    pub fn has_pair<A: Collidable, B: Collidable>(&self) -> bool {
        self.pairs
            .contains_key(&(TypeId::of::<A>(), TypeId::of::<B>()))
    }

    /// Materialize every collider of every registered kind, ordered by entity id.
    pub fn snapshot(&self, world: &hecs::World) -> Vec<ColliderRef> {
        let mut out = Vec::new();
        for kind in &self.kinds {
            (kind.collect)(world, &mut out);
        }
        out.sort_by_key(|c| c.entity.id());
        out
    }

    /// Colliders attached to `owner` whose blocking flag equals `blocks`.
    pub fn attached_to(
        &self,
        world: &hecs::World,
        owner: hecs::Entity,
        blocks: bool,
    ) -> Vec<ColliderRef> {
        let mut colliders = self.snapshot(world);
        colliders.retain(|c| c.owner == owner && c.blocks == blocks);
        colliders
    }

    /// Erased [`Collide::is_colliding`]. `None` for unregistered or mismatched pairs.
    pub fn is_colliding_any(
        &self,
        world: &hecs::World,
        a: &ColliderRef,
        b: &ColliderRef,
        velocity: Vec2,
    ) -> Option<ErasedInfo> {
        let pair = self.pairs.get(&(a.kind, b.kind))?;
        (pair.is_colliding)(world, a, b, velocity)
    }

    /// Erased [`Collide::is_still_colliding`]. `false` for unregistered or mismatched pairs.
    pub fn is_still_colliding_any(
        &self,
        world: &hecs::World,
        a: &ColliderRef,
        b: &ColliderRef,
        velocity: Vec2,
    ) -> bool {
        self.pairs
            .get(&(a.kind, b.kind))
            .is_some_and(|pair| (pair.is_still_colliding)(world, a, b, velocity))
    }

    /// Erased [`Collidable::respond`] for the kind of `mover`.
    pub fn respond_any(
        &self,
        mover: &ColliderRef,
        body: &mut Body,
        velocity: Vec2,
        collisions: Vec<ErasedInfo>,
    ) -> Result<(), CollisionError> {
        let kind = self
            .kind(mover.kind)
            .ok_or(CollisionError::UnknownKind(mover.kind))?;
        (kind.respond)(body, velocity, collisions);
        Ok(())
    }

    /// Reject colliders whose owner has no [`Position`].
    ///
    /// Every such collider is logged; the first one becomes the error.
    pub fn check_placed<'a>(
        &self,
        world: &hecs::World,
        colliders: impl IntoIterator<Item = &'a ColliderRef>,
    ) -> Result<(), CollisionError> {
        let mut first = None;
        for collider in colliders {
            if world.get::<&Position>(collider.owner).is_ok() {
                continue;
            }
            warn!(
                kind = self.kind_name(collider.kind).unwrap_or("unregistered"),
                collider = ?collider.entity,
                owner = ?collider.owner,
                "collider attached to a body without position"
            );
            first.get_or_insert(collider.owner);
        }
        match first {
            Some(owner) => Err(CollisionError::MissingPosition(owner)),
            None => Ok(()),
        }
    }

    /// Every collider whose kind answers ray queries, ordered by entity id.
    pub(crate) fn snapshot_raycastable(
        &self,
        world: &hecs::World,
    ) -> Vec<(ColliderRef, RaycastFn)> {
        let mut out = Vec::new();
        let mut scratch = Vec::new();
        for kind in &self.kinds {
            let Some(raycast) = kind.raycast else {
                continue;
            };
            scratch.clear();
            (kind.collect)(world, &mut scratch);
            out.extend(scratch.iter().map(|c| (*c, raycast)));
        }
        out.sort_by_key(|(c, _)| c.entity.id());
        out
    }

    pub(crate) fn kind_name(&self, kind: TypeId) -> Option<&'static str> {
        self.kind(kind).map(|k| k.name)
    }

    fn kind(&self, type_id: TypeId) -> Option<&KindEntry> {
        self.kinds.iter().find(|k| k.type_id == type_id)
    }
}

fn collect_kind<T: Collidable>(world: &hecs::World, out: &mut Vec<ColliderRef>) {
    for (entity, (collider, attached)) in world.query::<(&T, &Attached)>().iter() {
        out.push(ColliderRef {
            entity,
            owner: attached.0,
            kind: TypeId::of::<T>(),
            blocks: collider.blocks(),
        });
    }
}

fn respond_kind<T: Collidable>(body: &mut Body, velocity: Vec2, collisions: Vec<ErasedInfo>) {
    let collisions = collisions
        .into_iter()
        .filter_map(|info| info.downcast::<T::Info>().ok())
        .map(|info| *info)
        .collect();
    T::respond(body, velocity, collisions);
}

fn pair_colliding<A, B>(
    world: &hecs::World,
    a: &ColliderRef,
    b: &ColliderRef,
    velocity: Vec2,
) -> Option<ErasedInfo>
where
    A: Collide<B>,
    B: Collidable,
{
    let a = Placed::<A>::fetch(world, a.entity)?;
    let b = Placed::<B>::fetch(world, b.entity)?;
    A::is_colliding(&a, &b, velocity).map(|info| Box::new(info) as ErasedInfo)
}

fn pair_still_colliding<A, B>(
    world: &hecs::World,
    a: &ColliderRef,
    b: &ColliderRef,
    velocity: Vec2,
) -> bool
where
    A: Collide<B>,
    B: Collidable,
{
    match (
        Placed::<A>::fetch(world, a.entity),
        Placed::<B>::fetch(world, b.entity),
    ) {
        (Some(a), Some(b)) => A::is_still_colliding(&a, &b, velocity),
        _ => false,
    }
}

fn raycast_kind<T: Raycast>(
    world: &hecs::World,
    target: &ColliderRef,
    probe: &RayProbe,
) -> Option<RaycastHit> {
    let target = Placed::<T>::fetch(world, target.entity)?;
    T::intersects(&target, probe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::bridge::{spawn_body, spawn_static_box};
    use crate::ecs::components::physics::BoxCollider;
    use crate::physics::collider::BoxCollisionInfo;

    /// A collider kind with no declared capability against boxes.
    #[derive(Debug, Clone, Copy)]
    struct Marker;

    impl Collidable for Marker {
        type Info = ();

        fn layer(&self) -> CollisionLayer {
            CollisionLayer::ALL
        }

        fn blocks(&self) -> bool {
            true
        }

        fn respond(body: &mut Body, velocity: Vec2, _collisions: Vec<()>) {
            body.position += velocity;
        }
    }

    fn box_registry() -> ColliderRegistry {
        let mut registry = ColliderRegistry::new();
        registry.register_pair::<BoxCollider, BoxCollider>();
        registry
    }

    #[test]
    fn test_register_kind_is_idempotent() {
        let mut registry = ColliderRegistry::new();
        registry.register_kind::<BoxCollider>();
        registry.register_kind::<BoxCollider>();
        assert_eq!(registry.kinds.len(), 1);
        assert!(registry.is_registered::<BoxCollider>());
        assert!(!registry.is_registered::<Marker>());
    }

    #[test]
    fn test_snapshot_is_sorted_by_entity() {
        let mut world = hecs::World::new();
        let registry = box_registry();
        let (_, first) = spawn_static_box(&mut world, Vec2::ZERO, BoxCollider::default());
        let (_, second) = spawn_static_box(&mut world, Vec2::X * 3.0, BoxCollider::default());

        let snapshot = registry.snapshot(&world);
        let entities: Vec<_> = snapshot.iter().map(|c| c.entity).collect();
        assert_eq!(entities, vec![first, second]);
    }

    #[test]
    fn test_is_colliding_any_box_pair() {
        let mut world = hecs::World::new();
        let registry = box_registry();
        let (_, mover) = spawn_static_box(&mut world, Vec2::ZERO, BoxCollider::default());
        let (wall_body, wall) =
            spawn_static_box(&mut world, Vec2::new(3.0, 0.0), BoxCollider::default());

        let snapshot = registry.snapshot(&world);
        let a = snapshot.iter().find(|c| c.entity == mover).unwrap();
        let b = snapshot.iter().find(|c| c.entity == wall).unwrap();

        let info = registry
            .is_colliding_any(&world, a, b, Vec2::new(4.0, 0.0))
            .unwrap();
        let info = info.downcast::<BoxCollisionInfo>().unwrap();
        assert!((info.time - 0.5).abs() < 1e-6);
        assert_eq!(info.entity, wall_body);
        assert_eq!(info.target, wall);
    }

    #[test]
    fn test_unregistered_pair_never_collides() {
        let mut world = hecs::World::new();
        let mut registry = box_registry();
        registry.register_kind::<Marker>();

        let body = spawn_body(&mut world, Vec2::ZERO);
        let marker = world.spawn((Marker, Attached(body)));
        let (_, wall) = spawn_static_box(&mut world, Vec2::new(1.0, 0.0), BoxCollider::default());

        let snapshot = registry.snapshot(&world);
        let a = snapshot.iter().find(|c| c.entity == marker).unwrap();
        let b = snapshot.iter().find(|c| c.entity == wall).unwrap();

        assert!(!registry.has_pair::<Marker, BoxCollider>());
        assert!(registry
            .is_colliding_any(&world, a, b, Vec2::new(4.0, 0.0))
            .is_none());
        assert!(!registry.is_still_colliding_any(&world, a, b, Vec2::new(4.0, 0.0)));
    }

    #[test]
    fn test_mismatched_components_report_no_collision() {
        let mut world = hecs::World::new();
        let registry = box_registry();
        let body = spawn_body(&mut world, Vec2::ZERO);
        let marker = world.spawn((Marker, Attached(body)));
        let (_, wall) = spawn_static_box(&mut world, Vec2::new(1.0, 0.0), BoxCollider::default());

        // Handle claims to be a box but the entity holds a Marker.
        let forged = ColliderRef {
            entity: marker,
            owner: body,
            kind: TypeId::of::<BoxCollider>(),
            blocks: true,
        };
        let target = registry
            .snapshot(&world)
            .into_iter()
            .find(|c| c.entity == wall)
            .unwrap();
        assert!(registry
            .is_colliding_any(&world, &forged, &target, Vec2::new(4.0, 0.0))
            .is_none());
    }

    #[test]
    fn test_respond_any_unknown_kind_is_an_error() {
        let registry = box_registry();
        let mut world = hecs::World::new();
        let body = spawn_body(&mut world, Vec2::ZERO);
        let mover = ColliderRef {
            entity: body,
            owner: body,
            kind: TypeId::of::<Marker>(),
            blocks: true,
        };
        let mut state = Body::new(body, Vec2::ZERO);
        let result = registry.respond_any(&mover, &mut state, Vec2::ONE, Vec::new());
        assert_eq!(
            result,
            Err(CollisionError::UnknownKind(TypeId::of::<Marker>()))
        );
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("is not registered"));
    }
}
