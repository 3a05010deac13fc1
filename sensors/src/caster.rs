use bevy::prelude::*;
use collisions::store::ColliderStore;

/// A single ray hit as seen by a probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    pub point: Vec2,
    pub normal: Vec2,
    pub distance: f32,
    /// Entity owning the collider that was struck.
    pub entity: Entity,
}

/// The ray-cast primitive probes are evaluated against.
///
/// Implementations return the nearest intersection of the ray starting at `origin` along
/// the unit vector `direction`, no further than `max_distance`, considering only colliders
/// whose layer is part of `layer_mask`.
pub trait RayCaster {
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layer_mask: i32,
    ) -> Option<ProbeHit>;
}

impl RayCaster for ColliderStore {
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layer_mask: i32,
    ) -> Option<ProbeHit> {
        let hit = self.raycast(origin, direction, max_distance, layer_mask)?;

        Some(ProbeHit {
            point: hit.point,
            normal: hit.normal,
            distance: hit.distance,
            entity: hit.entity?,
        })
    }
}
