//! Trigger volumes: report controller-driven bodies entering and leaving.

use glam::Vec2;
use tracing::debug;

use crate::ecs::components::physics::{Controller, Trigger};

use super::controller::prune_dead;
use super::dispatch::{ColliderRef, ColliderRegistry};
use super::error::CollisionError;

/// A body crossed a trigger boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Entered {
        trigger: hecs::Entity,
        entity: hecs::Entity,
    },
    Exited {
        trigger: hecs::Entity,
        entity: hecs::Entity,
    },
}

struct Mover {
    entity: hecs::Entity,
    velocity: Vec2,
    colliders: Vec<ColliderRef>,
}

/// Test every controller against every trigger and report transitions.
///
/// Bodies outside a trigger are tested with the swept test using their last
/// velocity; bodies already inside use the overlap test, since the swept test
/// reports nothing for boxes that start out overlapping.
pub(crate) fn update_triggers(
    registry: &ColliderRegistry,
    world: &mut hecs::World,
) -> Result<Vec<TriggerEvent>, CollisionError> {
    registry.check_placed(world, &registry.snapshot(world))?;
    let movers = collect_movers(registry, world);

    let mut triggers: Vec<hecs::Entity> = world
        .query::<&Trigger>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    triggers.sort_by_key(|e| e.id());

    let mut events = Vec::new();
    for trigger in triggers {
        let Ok(state) = world.get::<&Trigger>(trigger).map(|t| Trigger::clone(&t)) else {
            continue;
        };
        let mut sensors = state
            .colliders
            .unwrap_or_else(|| registry.attached_to(world, trigger, false));
        prune_dead(world, trigger, &mut sensors);
        let mut inside = state.inside;

        // Bodies that lost their controller or were despawned leave.
        let gone: Vec<_> = inside
            .iter()
            .copied()
            .filter(|e| !movers.iter().any(|m| m.entity == *e))
            .collect();
        for entity in gone {
            inside.remove(&entity);
            events.push(TriggerEvent::Exited { trigger, entity });
        }

        for mover in movers.iter().filter(|m| m.entity != trigger) {
            let was_inside = inside.contains(&mover.entity);
            let touching = mover.colliders.iter().any(|own| {
                sensors.iter().any(|sensor| {
                    if was_inside {
                        registry.is_still_colliding_any(world, own, sensor, mover.velocity)
                    } else {
                        registry
                            .is_colliding_any(world, own, sensor, mover.velocity)
                            .is_some()
                    }
                })
            });

            if touching && !was_inside {
                debug!(?trigger, entity = ?mover.entity, "entered trigger");
                inside.insert(mover.entity);
                events.push(TriggerEvent::Entered {
                    trigger,
                    entity: mover.entity,
                });
            } else if !touching && was_inside {
                debug!(?trigger, entity = ?mover.entity, "exited trigger");
                inside.remove(&mover.entity);
                events.push(TriggerEvent::Exited {
                    trigger,
                    entity: mover.entity,
                });
            }
        }

        if let Ok(mut state) = world.get::<&mut Trigger>(trigger) {
            state.colliders = Some(sensors);
            state.inside = inside;
        }
    }
    Ok(events)
}

fn collect_movers(registry: &ColliderRegistry, world: &hecs::World) -> Vec<Mover> {
    let mut movers: Vec<Mover> = world
        .query::<&Controller>()
        .iter()
        .map(|(entity, controller)| Mover {
            entity,
            velocity: controller.velocity,
            colliders: controller.colliders.clone().unwrap_or_default(),
        })
        .collect();
    for mover in &mut movers {
        if mover.colliders.is_empty() {
            mover.colliders = registry.attached_to(world, mover.entity, true);
        }
    }
    movers.sort_by_key(|m| m.entity.id());
    movers
}
