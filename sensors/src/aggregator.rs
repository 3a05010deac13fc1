use bevy::{prelude::*, utils::HashMap};

use crate::{
    caster::RayCaster,
    config::ProbeGroupConfig,
    error::SensorError,
    probe_group::ProbeGroup,
    surface::SurfaceId,
};

/// Collision state of every registered surface for the current step.
pub type CollisionStates = HashMap<SurfaceId, bool>;

/// Owns the probe groups of one entity and refreshes them once per step.
///
/// Group membership is fixed by `initialize`. Every query fails with
/// `SensorError::UninitializedAccess` until then.
#[derive(Component, Debug, Default)]
pub struct CollisionAggregator {
    groups: Vec<ProbeGroup>,
    states: CollisionStates,
    initialized: bool,
    /// Log the collision states after every update.
    pub debug_log: bool,
}

impl CollisionAggregator {
    /// Builds an initialized aggregator from `configs`. Fails on the first invalid config.
    pub fn from_configs(
        owner: Entity,
        configs: impl IntoIterator<Item = ProbeGroupConfig>,
    ) -> Result<Self, SensorError> {
        let groups = configs
            .into_iter()
            .map(ProbeGroup::new)
            .collect::<Result<Vec<_>, _>>()?;

        let mut aggregator = Self::default();
        aggregator.initialize(owner, groups)?;
        Ok(aggregator)
    }

    pub fn with_debug_log(mut self, debug_log: bool) -> Self {
        self.debug_log = debug_log;
        self
    }

    /// Registers `groups` in order, hands them `owner` for self filtering and marks the
    /// aggregator as initialized. Surfaces may be shared by several groups, single group
    /// lookups on such a surface fail with `AmbiguousLookup`.
    pub fn initialize(&mut self, owner: Entity, groups: Vec<ProbeGroup>) -> Result<(), SensorError> {
        if self.initialized {
            return Err(SensorError::AlreadyInitialized);
        }

        let mut states = CollisionStates::default();
        let mut registered = Vec::with_capacity(groups.len());
        for mut group in groups {
            group.set_owner(owner);
            states.insert(group.surface(), false);
            registered.push(group);
        }

        debug!(
            "collision aggregator of {:?} registered {} probe groups: {}",
            owner,
            registered.len(),
            registered
                .iter()
                .map(|g| g.surface().name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        self.groups = registered;
        self.states = states;
        self.initialized = true;

        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Evaluates every group in registration order, with probe segments placed by the
    /// `owner` transform, and returns the new state of every surface.
    pub fn update_collisions<W: RayCaster + ?Sized>(
        &mut self,
        owner: &Transform,
        world: &W,
    ) -> Result<&CollisionStates, SensorError> {
        self.ensure_initialized()?;

        let mut states = CollisionStates::with_capacity(self.states.len());
        for group in &mut self.groups {
            let colliding = group.evaluate(owner, world);
            states.insert(group.surface(), colliding);
        }
        self.states = states;

        if self.debug_log {
            info!("{}", self.describe());
        }

        Ok(&self.states)
    }

    /// States from the last `update_collisions`.
    pub fn collisions(&self) -> Result<&CollisionStates, SensorError> {
        self.ensure_initialized()?;
        Ok(&self.states)
    }

    pub fn is_colliding(&self, surface: SurfaceId) -> Result<bool, SensorError> {
        self.ensure_initialized()?;
        self.states
            .get(&surface)
            .copied()
            .ok_or(SensorError::NotFound(surface))
    }

    /// Registered surfaces, sorted.
    pub fn surfaces(&self) -> Result<Vec<SurfaceId>, SensorError> {
        self.ensure_initialized()?;
        Ok(self.sorted_surfaces())
    }

    /// All registered groups in registration order.
    pub fn all_groups(&self) -> Result<&[ProbeGroup], SensorError> {
        self.ensure_initialized()?;
        Ok(&self.groups)
    }

    /// Every group registered for `surface`, in registration order.
    pub fn groups(&self, surface: SurfaceId) -> Result<Vec<&ProbeGroup>, SensorError> {
        self.ensure_initialized()?;
        Ok(self
            .groups
            .iter()
            .filter(|group| group.surface() == surface)
            .collect())
    }

    /// The only group registered for `surface`.
    pub fn group(&self, surface: SurfaceId) -> Result<&ProbeGroup, SensorError> {
        let mut matching = self.groups(surface)?;
        match matching.len() {
            0 => Err(SensorError::NotFound(surface)),
            1 => Ok(matching.remove(0)),
            count => Err(SensorError::AmbiguousLookup { surface, count }),
        }
    }

    /// Hit points of the last evaluation of `surface`, in probe order.
    pub fn last_collision_points(&self, surface: SurfaceId) -> Result<Vec<Vec2>, SensorError> {
        let group = self.group(surface)?;
        Ok(group.last_hits().iter().map(|hit| hit.point).collect())
    }

    /// Entities struck during the last evaluation of `surface`, in probe order.
    pub fn last_collision_hits(&self, surface: SurfaceId) -> Result<Vec<Entity>, SensorError> {
        let group = self.group(surface)?;
        Ok(group.last_hits().iter().map(|hit| hit.entity).collect())
    }

    pub fn is_touching_specific(
        &self,
        entity: Entity,
        surface: SurfaceId,
    ) -> Result<bool, SensorError> {
        Ok(self.group(surface)?.is_touching(entity))
    }

    /// With `any`, true as soon as one of `surfaces` touches `entity`. Otherwise every
    /// surface has to touch it; all of them are looked up even after a miss. An empty
    /// list is never touching.
    pub fn is_touching_specific_many(
        &self,
        entity: Entity,
        surfaces: &[SurfaceId],
        any: bool,
    ) -> Result<bool, SensorError> {
        self.ensure_initialized()?;

        let mut touching = 0;
        for &surface in surfaces {
            if self.is_touching_specific(entity, surface)? {
                if any {
                    return Ok(true);
                }
                touching += 1;
            }
        }

        Ok(!any && !surfaces.is_empty() && touching == surfaces.len())
    }

    /// `"Current collisions: CEILING: false | GROUND: true |"`, surfaces sorted.
    /// Meant for logs, so it never fails: before `initialize` it lists no surfaces.
    pub fn describe(&self) -> String {
        let mut description = String::from("Current collisions:");
        for surface in self.sorted_surfaces() {
            let colliding = self.states.get(&surface).copied().unwrap_or_default();
            description.push_str(&format!(" {}: {} |", surface, colliding));
        }
        description
    }

    fn sorted_surfaces(&self) -> Vec<SurfaceId> {
        let mut surfaces: Vec<SurfaceId> = self.states.keys().copied().collect();
        surfaces.sort();
        surfaces
    }

    fn ensure_initialized(&self) -> Result<(), SensorError> {
        if self.initialized {
            Ok(())
        } else {
            Err(SensorError::UninitializedAccess)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        caster::ProbeHit,
        config::Segment,
        surface::{ProbeDirection, RequiredHits},
    };

    const OWNER: Entity = Entity::from_raw(1);
    const WALL: Entity = Entity::from_raw(2);
    const FLOOR: Entity = Entity::from_raw(3);

    /// Everything below y = 0 is floor, everything right of x = 2 is wall.
    struct Room;

    impl RayCaster for Room {
        fn cast(
            &self,
            origin: Vec2,
            direction: Vec2,
            max_distance: f32,
            _layer_mask: i32,
        ) -> Option<ProbeHit> {
            let end = origin + direction * max_distance;
            if direction.y < 0.0 && end.y <= 0.0 && origin.y >= 0.0 {
                let point = Vec2::new(origin.x, 0.0);
                return Some(ProbeHit {
                    point,
                    normal: Vec2::Y,
                    distance: origin.y,
                    entity: FLOOR,
                });
            }
            if direction.x > 0.0 && end.x >= 2.0 && origin.x <= 2.0 {
                let point = Vec2::new(2.0, origin.y);
                return Some(ProbeHit {
                    point,
                    normal: Vec2::NEG_X,
                    distance: 2.0 - origin.x,
                    entity: WALL,
                });
            }
            None
        }
    }

    fn ground() -> ProbeGroupConfig {
        ProbeGroupConfig::new(
            SurfaceId::Ground,
            ProbeDirection::Down,
            RequiredHits::Full,
            Segment::new(Vec2::new(-0.5, 0.0), Vec2::new(0.5, 0.0)),
        )
    }

    fn right_wall() -> ProbeGroupConfig {
        ProbeGroupConfig::new(
            SurfaceId::EntityRight,
            ProbeDirection::Right,
            RequiredHits::One,
            Segment::new(Vec2::new(0.5, 1.0), Vec2::new(0.5, 0.1)),
        )
    }

    fn ceiling() -> ProbeGroupConfig {
        ProbeGroupConfig::new(
            SurfaceId::Ceiling,
            ProbeDirection::Up,
            RequiredHits::One,
            Segment::new(Vec2::new(-0.5, 1.0), Vec2::new(0.5, 1.0)),
        )
    }

    fn aggregator() -> CollisionAggregator {
        CollisionAggregator::from_configs(OWNER, [ground(), right_wall(), ceiling()]).unwrap()
    }

    #[test]
    fn queries_fail_before_initialization() {
        let mut aggregator = CollisionAggregator::default();

        assert_eq!(
            aggregator.update_collisions(&Transform::IDENTITY, &Room).unwrap_err(),
            SensorError::UninitializedAccess
        );
        assert_eq!(
            aggregator.last_collision_points(SurfaceId::Ground),
            Err(SensorError::UninitializedAccess)
        );
        assert_eq!(
            aggregator.is_touching_specific_many(FLOOR, &[], false),
            Err(SensorError::UninitializedAccess)
        );
        assert!(aggregator.collisions().is_err());
        assert_eq!(aggregator.surfaces(), Err(SensorError::UninitializedAccess));
        assert!(matches!(
            aggregator.all_groups(),
            Err(SensorError::UninitializedAccess)
        ));
        assert_eq!(aggregator.describe(), "Current collisions:");
    }

    #[test]
    fn initialization_happens_once() {
        let mut aggregator = aggregator();
        let group = ProbeGroup::new(ceiling()).unwrap();

        assert_eq!(
            aggregator.initialize(OWNER, vec![group]),
            Err(SensorError::AlreadyInitialized)
        );
        assert_eq!(aggregator.all_groups().unwrap().len(), 3);
    }

    #[test]
    fn invalid_config_fails_construction() {
        let result = CollisionAggregator::from_configs(OWNER, [ground().with_probe_count(0)]);
        assert!(matches!(
            result,
            Err(SensorError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn states_start_false_for_every_surface() {
        let aggregator = aggregator();
        let states = aggregator.collisions().unwrap();

        assert_eq!(states.len(), 3);
        assert!(states.values().all(|colliding| !colliding));
        assert_eq!(
            aggregator.surfaces(),
            Ok(vec![SurfaceId::Ground, SurfaceId::Ceiling, SurfaceId::EntityRight])
        );
    }

    #[test]
    fn update_reports_each_surface() {
        let mut aggregator = aggregator();

        let states = aggregator
            .update_collisions(&Transform::from_xyz(1.6, 0.1, 0.0), &Room)
            .unwrap()
            .clone();

        assert_eq!(states.len(), 3);
        assert!(states[&SurfaceId::Ground]);
        assert!(!states[&SurfaceId::EntityRight]);
        assert!(!states[&SurfaceId::Ceiling]);

        for group in aggregator.all_groups().unwrap() {
            assert_eq!(states[&group.surface()], group.is_colliding());
        }
    }

    #[test]
    fn moving_owner_changes_state() {
        let mut aggregator = aggregator();

        aggregator.update_collisions(&Transform::from_xyz(0.0, 5.0, 0.0), &Room).unwrap();
        assert_eq!(aggregator.is_colliding(SurfaceId::Ground), Ok(false));

        aggregator.update_collisions(&Transform::from_xyz(1.4, 0.1, 0.0), &Room).unwrap();
        assert_eq!(aggregator.is_colliding(SurfaceId::Ground), Ok(true));
        assert_eq!(aggregator.is_colliding(SurfaceId::EntityRight), Ok(true));
        assert_eq!(
            aggregator.is_colliding(SurfaceId::Pow),
            Err(SensorError::NotFound(SurfaceId::Pow))
        );
    }

    #[test]
    fn detail_queries_follow_probe_order() {
        let mut aggregator = aggregator();
        aggregator.update_collisions(&Transform::from_xyz(1.0, 0.1, 0.0), &Room).unwrap();

        let points = aggregator.last_collision_points(SurfaceId::Ground).unwrap();
        assert_eq!(points.len(), 4);
        assert!(points.windows(2).all(|p| p[0].x < p[1].x));
        assert!(points.iter().all(|p| p.y == 0.0));

        let hits = aggregator.last_collision_hits(SurfaceId::Ground).unwrap();
        assert_eq!(hits, vec![FLOOR; 4]);

        assert_eq!(
            aggregator.last_collision_hits(SurfaceId::PlayerDown),
            Err(SensorError::NotFound(SurfaceId::PlayerDown))
        );
    }

    #[test]
    fn duplicate_surfaces_are_ambiguous() {
        let mut aggregator =
            CollisionAggregator::from_configs(OWNER, [ground(), ground().with_probe_count(2)])
                .unwrap();
        aggregator.update_collisions(&Transform::from_xyz(0.0, 0.1, 0.0), &Room).unwrap();

        assert_eq!(
            aggregator.last_collision_points(SurfaceId::Ground),
            Err(SensorError::AmbiguousLookup {
                surface: SurfaceId::Ground,
                count: 2
            })
        );
        assert_eq!(aggregator.groups(SurfaceId::Ground).unwrap().len(), 2);
        assert_eq!(aggregator.collisions().unwrap().len(), 1);
    }

    #[test]
    fn touching_all_requires_every_surface() {
        let mut aggregator = aggregator();
        aggregator.update_collisions(&Transform::from_xyz(1.0, 0.1, 0.0), &Room).unwrap();

        let surfaces = [SurfaceId::Ground, SurfaceId::Ceiling];
        assert_eq!(aggregator.is_touching_specific(FLOOR, SurfaceId::Ground), Ok(true));
        assert_eq!(aggregator.is_touching_specific_many(FLOOR, &surfaces, true), Ok(true));
        assert_eq!(aggregator.is_touching_specific_many(FLOOR, &surfaces, false), Ok(false));
        assert_eq!(
            aggregator.is_touching_specific_many(FLOOR, &[SurfaceId::Ground], false),
            Ok(true)
        );
        assert_eq!(aggregator.is_touching_specific_many(FLOOR, &[], false), Ok(false));
        assert_eq!(aggregator.is_touching_specific_many(FLOOR, &[], true), Ok(false));
    }

    #[test]
    fn touching_all_checks_every_surface_after_a_miss() {
        let mut aggregator = aggregator();
        aggregator.update_collisions(&Transform::from_xyz(1.0, 0.1, 0.0), &Room).unwrap();

        // Ceiling misses first, the unknown surface is still looked up
        assert_eq!(
            aggregator.is_touching_specific_many(
                FLOOR,
                &[SurfaceId::Ceiling, SurfaceId::Pow],
                false
            ),
            Err(SensorError::NotFound(SurfaceId::Pow))
        );
        // any stops at the first touching surface
        assert_eq!(
            aggregator.is_touching_specific_many(FLOOR, &[SurfaceId::Ground, SurfaceId::Pow], true),
            Ok(true)
        );
    }

    #[test]
    fn describe_lists_sorted_surfaces() {
        let mut aggregator = aggregator().with_debug_log(true);
        aggregator.update_collisions(&Transform::from_xyz(0.0, 0.1, 0.0), &Room).unwrap();

        assert_eq!(
            aggregator.describe(),
            "Current collisions: GROUND: true | CEILING: false | ENTITY_RIGHT: false |"
        );
    }
}
