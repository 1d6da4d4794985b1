//! Entity Component System integration with hecs.

pub mod bridge;
pub mod components;

pub mod prelude {
    pub use super::bridge::*;
    pub use super::components::*;
}
