use bevy::prelude::*;

use crate::{
    caster::{ProbeHit, RayCaster},
    config::ProbeGroupConfig,
    error::SensorError,
    surface::{RequiredHits, SurfaceId},
};

/// One probe of the last evaluation: where it was cast from, where it ended and what it
/// struck, if anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeCast {
    pub origin: Vec2,
    pub end: Vec2,
    pub hit: Option<ProbeHit>,
}

impl ProbeCast {
    pub fn is_hit(&self) -> bool {
        self.hit.is_some()
    }
}

/// A row of probes cast from a boundary segment in one direction, reduced to a single
/// boolean by its `RequiredHits` policy.
///
/// The results of the last evaluation are kept for detail queries. They are rebuilt from
/// scratch on every evaluation and replaced as a whole.
#[derive(Debug, Clone)]
pub struct ProbeGroup {
    config: ProbeGroupConfig,
    owner: Option<Entity>,
    casts: Vec<ProbeCast>,
    hits: Vec<ProbeHit>,
    colliding: bool,
}

impl ProbeGroup {
    pub fn new(config: ProbeGroupConfig) -> Result<Self, SensorError> {
        config.validate()?;

        Ok(Self {
            config,
            owner: None,
            casts: Vec::new(),
            hits: Vec::new(),
            colliding: false,
        })
    }

    /// Sets the entity whose hits are ignored when `filter_self` is enabled.
    pub fn with_owner(mut self, owner: Entity) -> Self {
        self.owner = Some(owner);
        self
    }

    pub(crate) fn set_owner(&mut self, owner: Entity) {
        self.owner = Some(owner);
    }

    pub fn surface(&self) -> SurfaceId {
        self.config.surface
    }

    pub fn config(&self) -> &ProbeGroupConfig {
        &self.config
    }

    /// World-space probe origins for an owner placed at `owner`. The first origin is the
    /// segment start, the last one sits level with the segment end, and spacing is uniform
    /// along the axis perpendicular to the cast direction.
    pub fn probe_origins(&self, owner: &Transform) -> Vec<Vec2> {
        let bounds = self.config.bounds.to_world(owner);
        let count = self.config.probe_count;
        let delta = bounds.end - bounds.start;

        let axis = if self.config.direction.is_horizontal() {
            Vec2::new(0.0, delta.y)
        } else {
            Vec2::new(delta.x, 0.0)
        };
        let step = axis / (count - 1) as f32;

        (0..count)
            .map(|i| bounds.start + step * i as f32)
            .collect()
    }

    /// Casts every probe against `world` in index order and returns whether the configured
    /// policy is satisfied.
    pub fn evaluate<W: RayCaster + ?Sized>(&mut self, owner: &Transform, world: &W) -> bool {
        let direction = self.config.direction.vector();
        let distance = self.config.distance;
        let mask = self.config.collision_mask;

        let casts: Vec<ProbeCast> = self
            .probe_origins(owner)
            .into_iter()
            .map(|origin| ProbeCast {
                origin,
                end: origin + direction * distance,
                hit: world.cast(origin, direction, distance, mask),
            })
            .collect();

        let hits: Vec<ProbeHit> = casts
            .iter()
            .filter_map(|cast| cast.hit)
            .filter(|hit| !self.is_self_hit(hit))
            .collect();

        let colliding = required_hits_met(self.config.required_hits, &casts, hits.len());

        self.casts = casts;
        self.hits = hits;
        self.colliding = colliding;

        colliding
    }

    /// Result of the last evaluation.
    pub fn is_colliding(&self) -> bool {
        self.colliding
    }

    /// Every probe of the last evaluation, hits and misses, in index order.
    pub fn last_casts(&self) -> &[ProbeCast] {
        &self.casts
    }

    /// Hits of the last evaluation after self filtering, in probe order.
    pub fn last_hits(&self) -> &[ProbeHit] {
        &self.hits
    }

    /// Whether the last evaluation hit `entity`. Does not cast.
    pub fn is_touching(&self, entity: Entity) -> bool {
        self.hits.iter().any(|hit| hit.entity == entity)
    }

    /// Whether `cast` contributes a hit after self filtering.
    pub fn is_counted(&self, cast: &ProbeCast) -> bool {
        cast.hit.map_or(false, |hit| !self.is_self_hit(&hit))
    }

    fn is_self_hit(&self, hit: &ProbeHit) -> bool {
        self.config.filter_self && Some(hit.entity) == self.owner
    }
}

/// Reduces a probe pattern to one boolean. `casts` are the raw results in index order,
/// `filtered_hits` the number of hits left after self filtering.
fn required_hits_met(required: RequiredHits, casts: &[ProbeCast], filtered_hits: usize) -> bool {
    if filtered_hits == 0 {
        return false;
    }

    let probe_count = casts.len();
    let half = probe_count / 2;

    match required {
        RequiredHits::One => filtered_hits >= 1,
        RequiredHits::Full => casts.iter().filter(|cast| cast.is_hit()).count() == probe_count,
        RequiredHits::AnyHalf => filtered_hits >= half,
        RequiredHits::FirstHalf => {
            let mut collision = false;
            for (i, cast) in casts.iter().enumerate() {
                if cast.is_hit() {
                    // a later hit in the second half overrides an earlier one in the first
                    collision = i < half;
                }
            }
            collision
        }
        RequiredHits::SecondHalf => {
            let mut collision = false;
            for (i, cast) in casts.iter().enumerate() {
                if !cast.is_hit() {
                    continue;
                }
                if i < half {
                    return false;
                }
                collision = true;
            }
            collision
        }
    }
}
