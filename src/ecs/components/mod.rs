//! ECS components (placement, colliders, movement).

pub mod physics;
pub mod transform;

pub use physics::*;
pub use transform::*;
