use bevy::prelude::*;

use super::{
    shapes::{ColliderShape, ColliderShapeType},
    store::ALL_LAYERS,
};

/// Collision geometry attached to an entity. Positioned by the entity's `Transform`.
#[derive(Debug, Component, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Collider {
    pub shape_type: ColliderShapeType,
    /// Triggers are ignored by casts.
    pub is_trigger: bool,
    /// `local_offset` is added to the entity position to get the final position of the
    /// collider geometry.
    pub local_offset: Vec2,
    /// `physics_layer` is matched against the layer mask of casts. It is a bitmask.
    pub physics_layer: i32,
}

impl Default for Collider {
    fn default() -> Self {
        Self {
            shape_type: ColliderShapeType::None,
            is_trigger: false,
            local_offset: Vec2::ZERO,
            physics_layer: 1 << 0,
        }
    }
}

impl Collider {
    pub fn new(shape_type: ColliderShapeType) -> Self {
        Self {
            shape_type,
            ..default()
        }
    }

    pub fn with_layer(mut self, physics_layer: i32) -> Self {
        self.physics_layer = physics_layer;
        self
    }

    pub fn with_offset(mut self, local_offset: Vec2) -> Self {
        self.local_offset = local_offset;
        self
    }

    pub fn trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Builds the world-space shape for an entity located at `position`.
    pub fn shape_at(&self, position: Vec2) -> ColliderShape {
        ColliderShape::new(self.shape_type, position + self.local_offset)
    }

    /// Whether a cast filtered by `layer_mask` may hit this collider.
    pub fn accepts_mask(&self, layer_mask: i32) -> bool {
        !self.is_trigger && common::math::is_flag_set(layer_mask, self.physics_layer)
    }
}
