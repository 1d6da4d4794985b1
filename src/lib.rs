//! slide
//!
//! Swept rectangle collision detection and kinematic response for 2D games,
//! built on hecs.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **geometry** - `Rect` and direction constants (y axis points down)
//! 2. **ecs** - Components (`Position`, `BoxCollider`, `Controller`, `Trigger`) and spawn helpers
//! 3. **physics** - Collision layers, capability dispatch, swept tests, movement, ray queries
//!
//! # Example
//!
//! ```
//! use slide::glam::Vec2;
//! use slide::{spawn_controlled, spawn_static_box, BoxCollider, CollisionWorld};
//!
//! let mut world = slide::hecs::World::new();
//! let mut physics = CollisionWorld::default();
//!
//! let (player, _) = spawn_controlled(&mut world, Vec2::ZERO, BoxCollider::default());
//! spawn_static_box(&mut world, Vec2::new(1.0, 0.0), BoxCollider::default());
//!
//! physics.move_body(&mut world, player, Vec2::new(2.0, 0.0)).unwrap();
//! assert_eq!(slide::physics::body_position(&world, player), Some(Vec2::ZERO));
//! ```

pub mod ecs;
pub mod geometry;
pub mod physics;

pub use geometry::{Rect, DOWN, LEFT, RIGHT, UP};

pub use ecs::prelude::*;

pub use physics::{
    BoxCollisionInfo, CollisionConfig, CollisionError, CollisionLayer, CollisionWorld,
    ColliderRegistry, RaycastHit,
};

#[cfg(feature = "triggers")]
pub use physics::TriggerEvent;

// Re-export glam and hecs for convenience
pub use glam;
pub use hecs;
