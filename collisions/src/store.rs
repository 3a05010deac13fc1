use bevy::{prelude::*, utils::HashMap};

use super::{
    colliders::Collider,
    shapes::{collisions::line_to_shape, ColliderShape},
    spatial_hash::SpatialHash,
    RaycastHit,
};

pub const ALL_LAYERS: i32 = -1;

/// A collider registered in the store together with its world-space shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoredCollider {
    pub collider: Collider,
    pub shape: ColliderShape,
}

/// World-space registry of every `Collider`, queried by casts.
#[derive(Debug, Resource)]
pub struct ColliderStore {
    colliders: HashMap<Entity, StoredCollider>,
    spatial_hash: SpatialHash,
}

impl Default for ColliderStore {
    fn default() -> Self {
        Self::new(100)
    }
}

impl ColliderStore {
    pub fn new(cell_size: i32) -> Self {
        Self {
            colliders: HashMap::new(),
            spatial_hash: SpatialHash::new(cell_size),
        }
    }

    /// Registers `collider` for `entity` at `position`, replacing any previous registration.
    pub fn register(&mut self, entity: Entity, collider: Collider, position: Vec2) {
        self.remove(entity);

        let shape = collider.shape_at(position);
        self.spatial_hash.register(shape.bounds, entity);
        self.colliders
            .insert(entity, StoredCollider { collider, shape });
    }

    /// Moves an already registered collider. Returns `false` if `entity` is unknown.
    pub fn update_position(&mut self, entity: Entity, position: Vec2) -> bool {
        let Some(stored) = self.colliders.get(&entity).copied() else {
            return false;
        };

        self.register(entity, stored.collider, position);
        true
    }

    pub fn remove(&mut self, entity: Entity) -> Option<Collider> {
        let stored = self.colliders.remove(&entity)?;
        self.spatial_hash.remove(stored.shape.bounds, entity);

        Some(stored.collider)
    }

    pub fn get(&self, entity: Entity) -> Option<&StoredCollider> {
        self.colliders.get(&entity)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn clear(&mut self) {
        self.colliders.clear();
        self.spatial_hash.clear();
    }

    /// Casts a ray of `max_distance` from `origin` along `direction` and returns the
    /// nearest hit on a collider matching `layer_mask`.
    pub fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layer_mask: i32,
    ) -> Option<RaycastHit> {
        let direction = direction.try_normalize()?;
        self.linecast(origin, origin + direction * max_distance, layer_mask)
    }

    /// Nearest hit along the segment `start..end`. Ties are broken by entity order so
    /// the result does not depend on hash iteration order.
    pub fn linecast(&self, start: Vec2, end: Vec2, layer_mask: i32) -> Option<RaycastHit> {
        let ray_bounds = common::Ray2D::new(start, end).bounds();
        let mut nearest: Option<RaycastHit> = None;

        for entity in self.spatial_hash.get_nearby_bounds(ray_bounds) {
            let Some(stored) = self.colliders.get(&entity) else {
                continue;
            };
            if !stored.collider.accepts_mask(layer_mask) {
                continue;
            }
            if !stored.shape.bounds.intersects(ray_bounds) {
                continue;
            }

            let Some(mut hit) = line_to_shape(start, end, &stored.shape) else {
                continue;
            };
            hit.entity = Some(entity);

            let closer = match nearest {
                None => true,
                Some(best) => {
                    hit.distance < best.distance
                        || (hit.distance == best.distance && Some(entity) < best.entity)
                }
            };
            if closer {
                nearest = Some(hit);
            }
        }

        nearest
    }
}
