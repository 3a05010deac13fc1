use bevy::{color::palettes::css::RED, prelude::*};
use collisions::{plugin::CollisionSet, store::ColliderStore};

use crate::{
    aggregator::CollisionAggregator,
    config::{ProbeGroupConfig, SensorRig, SensorRigLoader},
    probe_group::ProbeGroup,
};

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorSet {
    /// Registers the probe groups found under new aggregators.
    Discover,
    /// Refreshes every aggregator. Systems reading collision states run after this.
    Update,
}

#[derive(Resource, Debug, Default, Clone, Copy, Reflect)]
#[reflect(Resource)]
pub struct SensorSettings {
    /// Draw every probe, regardless of the per-group setting.
    pub draw_probes: bool,
    /// Log the states of every aggregator after each update.
    pub log_collisions: bool,
}

/// Children marked with this are skipped when an aggregator discovers its probe groups.
#[derive(Component, Debug, Default, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ProbeGroupDisabled;

/// Drives every `CollisionAggregator` once per fixed step. Requires `CollisionPlugin`.
pub struct SensorsPlugin;

impl Plugin for SensorsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SensorSettings>()
            .register_type::<SensorSettings>()
            .register_type::<ProbeGroupConfig>()
            .register_type::<ProbeGroupDisabled>()
            .configure_sets(
                FixedUpdate,
                (SensorSet::Discover, SensorSet::Update)
                    .chain()
                    .after(CollisionSet::Sync),
            )
            .add_systems(
                FixedUpdate,
                (
                    discover_probe_groups.in_set(SensorSet::Discover),
                    update_aggregators.in_set(SensorSet::Update),
                ),
            )
            .add_systems(Update, draw_probes);
    }
}

/// Registers the `SensorRig` asset and its JSON loader.
pub struct SensorRigAssetPlugin;

impl Plugin for SensorRigAssetPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<SensorRig>()
            .init_asset_loader::<SensorRigLoader>();
    }
}

fn discover_probe_groups(
    mut aggregators: Query<(Entity, &mut CollisionAggregator, &Children)>,
    configs: Query<&ProbeGroupConfig, Without<ProbeGroupDisabled>>,
) {
    for (owner, mut aggregator, children) in &mut aggregators {
        if aggregator.is_initialized() {
            continue;
        }

        let found: Vec<(Entity, &ProbeGroupConfig)> = children
            .iter()
            .filter_map(|&child| configs.get(child).ok().map(|config| (child, config)))
            .collect();
        if found.is_empty() {
            continue;
        }

        let mut groups = Vec::with_capacity(found.len());
        for (child, config) in found {
            match ProbeGroup::new(config.clone()) {
                Ok(group) => groups.push(group),
                Err(err) => error!("skipping probe group {:?} of {:?}: {}", child, owner, err),
            }
        }

        if let Err(err) = aggregator.initialize(owner, groups) {
            error!("could not initialize collision aggregator of {:?}: {}", owner, err);
        }
    }
}

fn update_aggregators(
    settings: Res<SensorSettings>,
    store: Res<ColliderStore>,
    mut aggregators: Query<(Entity, &mut CollisionAggregator, &Transform)>,
) {
    for (owner, mut aggregator, transform) in &mut aggregators {
        if !aggregator.is_initialized() {
            continue;
        }

        if let Err(err) = aggregator.update_collisions(transform, &*store) {
            error!("collision update of {:?} failed: {}", owner, err);
            continue;
        }

        if settings.log_collisions && !aggregator.debug_log {
            info!("{:?}: {}", owner, aggregator.describe());
        }
    }
}

fn draw_probes(
    mut gizmos: Gizmos,
    settings: Res<SensorSettings>,
    aggregators: Query<&CollisionAggregator>,
) {
    for aggregator in &aggregators {
        let Ok(groups) = aggregator.all_groups() else {
            continue;
        };
        for group in groups {
            if !settings.draw_probes && !group.config().show_debug_probes {
                continue;
            }

            for cast in group.last_casts() {
                let color = if group.is_counted(cast) {
                    Color::from(RED)
                } else {
                    group.config().debug_color()
                };
                gizmos.line_2d(cast.origin, cast.end, color);
            }
        }
    }
}
