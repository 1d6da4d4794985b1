//! Headless platformer demo: a player falls onto a tiled floor, walks into a
//! wall, and passes through a pickup trigger on the way.
//!
//! Run with `RUST_LOG=debug` to see collider and trigger logs.

use anyhow::{Context, Result};
use glam::Vec2;
use slide::physics::body_position;
use slide::{
    spawn_body, spawn_controlled, spawn_static_box, BoxCollider, CollisionLayer, CollisionWorld,
    Controller, Trigger, TriggerEvent,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FRAMES: usize = 240;
const GRAVITY: f32 = 30.0;
const WALK_SPEED: f32 = 4.0;
const JUMP_SPEED: f32 = 12.0;

struct Player {
    entity: hecs::Entity,
    velocity: Vec2,
}

fn build_level(world: &mut hecs::World, physics: &mut CollisionWorld) -> Result<hecs::Entity> {
    // Floor tiles: the seams between them must not stop the player.
    for x in -2..12 {
        spawn_static_box(world, Vec2::new(x as f32, 2.0), BoxCollider::default());
    }
    // Wall at the right end.
    spawn_static_box(world, Vec2::new(10.0, 0.0), BoxCollider::new(Vec2::new(1.0, 4.0)));

    // Pickup halfway.
    let pickup = spawn_body(world, Vec2::new(4.0, 1.0));
    world
        .insert_one(pickup, Trigger::new())
        .context("pickup entity vanished")?;
    physics.attach(world, pickup, BoxCollider::sensor(Vec2::new(0.5, 0.5)))?;
    Ok(pickup)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let mut world = hecs::World::new();
    let mut physics = CollisionWorld::default();
    let pickup = build_level(&mut world, &mut physics)?;

    let (entity, _) = spawn_controlled(&mut world, Vec2::new(0.0, -3.0), BoxCollider::default());
    let mut player = Player {
        entity,
        velocity: Vec2::ZERO,
    };

    for frame in 0..FRAMES {
        let (on_floor, on_wall) = {
            let controller = world.get::<&Controller>(player.entity)?;
            (controller.on_floor(), controller.on_wall())
        };

        player.velocity.x = if on_wall { 0.0 } else { WALK_SPEED };
        if on_floor {
            player.velocity.y = if frame == 120 { -JUMP_SPEED } else { 0.0 };
        }
        player.velocity.y += GRAVITY * FIXED_TIMESTEP;

        physics.move_body(&mut world, player.entity, player.velocity * FIXED_TIMESTEP)?;

        for event in physics.update_triggers(&mut world)? {
            match event {
                TriggerEvent::Entered { trigger, .. } if trigger == pickup => {
                    info!(frame, "picked up item");
                }
                TriggerEvent::Entered { trigger, entity } => {
                    info!(frame, ?trigger, ?entity, "entered trigger");
                }
                TriggerEvent::Exited { trigger, entity } => {
                    info!(frame, ?trigger, ?entity, "left trigger");
                }
            }
        }

        if frame % 30 == 0 {
            let position = body_position(&world, player.entity)
                .context("player has no position")?;
            let controller = world.get::<&Controller>(player.entity)?;
            info!(
                frame,
                x = position.x,
                y = position.y,
                on_floor = controller.on_floor(),
                on_wall = controller.on_wall(),
                "player"
            );
        }
    }

    let position = body_position(&world, player.entity).context("player has no position")?;
    let below = physics.raycast(
        &world,
        position,
        position + Vec2::new(0.0, 10.0),
        CollisionLayer::DEFAULT,
        &[player.entity],
    )?;
    match below {
        Some(hit) => info!(
            point = ?hit.point,
            normal = ?hit.normal,
            "ground below player"
        ),
        None => info!("nothing below player"),
    }

    Ok(())
}
