//! Errors raised when the collision API is misused.
//!
//! Geometry never fails: a miss, a layer mismatch or an unregistered pair is
//! simply "no collision". These errors cover the integration boundary only.

use std::any::TypeId;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollisionError {
    #[error("entity {0:?} does not exist")]
    NoSuchEntity(hecs::Entity),
    #[error("entity {0:?} has no Position component")]
    MissingPosition(hecs::Entity),
    #[error("entity {0:?} has no Controller component")]
    MissingController(hecs::Entity),
    #[error("entity {0:?} is not an attached collider")]
    NotAttached(hecs::Entity),
    #[error("collider kind `{0}` is not registered")]
    UnregisteredKind(&'static str),
    #[error("collider kind {0:?} is not registered")]
    UnknownKind(TypeId),
}
