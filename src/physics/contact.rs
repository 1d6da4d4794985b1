//! Mover state handed to collision responses.

use glam::Vec2;

/// A body being moved during one [`CollisionWorld::move_body`](super::CollisionWorld::move_body) call.
///
/// Responses read and update `position`; the controller writes it back to the
/// body's [`Position`](crate::ecs::components::transform::Position) afterwards.
#[derive(Debug, Clone)]
pub struct Body {
    pub entity: hecs::Entity,
    pub position: Vec2,
    /// Normals of every collision a response actually resolved, in order.
    pub normals: Vec<Vec2>,
}

impl Body {
    pub fn new(entity: hecs::Entity, position: Vec2) -> Self {
        Self {
            entity,
            position,
            normals: Vec::new(),
        }
    }

    /// Whether any resolved collision had exactly this normal.
    pub fn touched(&self, normal: Vec2) -> bool {
        self.normals.iter().any(|n| *n == normal)
    }
}
