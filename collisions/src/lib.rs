use bevy::prelude::*;

pub mod colliders;
pub mod plugin;
pub mod prelude;
pub mod shapes;
mod spatial_hash;
pub mod store;

/// Result of a ray or line cast against the colliders in a `ColliderStore`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Entity owning the collider that was hit.
    pub entity: Option<Entity>,
    /// Fraction of the cast length at which the hit happened, in `[0, 1]`.
    pub fraction: f32,
    pub distance: f32,
    pub point: Vec2,
    pub normal: Vec2,
}
