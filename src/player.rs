use bevy::prelude::*;
use common::math::approach;
use collisions::prelude::*;
use sensors::prelude::*;

use crate::{input::PlayerInput, AppState};

const PLAYER_LAYER: i32 = 1 << 1;
const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 32.0);
const RIG_PATH: &str = "configs/player.sensors.json";

const RUN_SPEED: f32 = 220.0;
const RUN_ACCELERATION: f32 = 1800.0;
const JUMP_SPEED: f32 = 520.0;
const GRAVITY: f32 = -1400.0;
/// Keeps a falling player within probe reach of the ground on every fixed step.
const MAX_FALL_SPEED: f32 = 170.0;
/// Gap kept between the ground probes and the ground, so they never start inside it.
const SNAP_MARGIN: f32 = 0.25;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::LoadAssets), load_rig)
            .add_systems(
                Update,
                spawn_when_loaded.run_if(in_state(AppState::LoadAssets)),
            )
            .add_systems(
                FixedUpdate,
                movement
                    .after(SensorSet::Update)
                    .run_if(in_state(AppState::Playing)),
            );
    }
}

#[derive(Component)]
pub struct Player;

#[derive(Component, Debug, Default, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Velocity(pub Vec2);

#[derive(Resource)]
struct PlayerRig(Handle<SensorRig>);

fn load_rig(mut commands: Commands, asset_server: Res<AssetServer>) {
    info!("Loading sensor rig '{}'", RIG_PATH);
    commands.insert_resource(PlayerRig(asset_server.load(RIG_PATH)));
}

fn spawn_when_loaded(
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
    rig: Res<PlayerRig>,
    rigs: Res<Assets<SensorRig>>,
) {
    let Some(rig) = rigs.get(&rig.0) else {
        return;
    };

    commands
        .spawn((
            Player,
            Name::new("player"),
            Velocity::default(),
            CollisionAggregator::default(),
            SpriteBundle {
                sprite: Sprite {
                    color: Color::srgb(0.9, 0.6, 0.2),
                    custom_size: Some(PLAYER_SIZE),
                    ..default()
                },
                transform: Transform::from_xyz(0.0, 0.0, 1.0),
                ..default()
            },
            Collider::new(ColliderShapeType::Box {
                width: PLAYER_SIZE.x,
                height: PLAYER_SIZE.y,
            })
            .with_layer(PLAYER_LAYER),
        ))
        .with_children(|c| {
            for config in &rig.groups {
                c.spawn((
                    Name::new(format!("probes {}", config.surface)),
                    config.clone(),
                ));
            }
        });

    info!("Spawned player with {} probe groups", rig.groups.len());
    next_state.set(AppState::Playing);
}

fn movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut query: Query<(&mut Transform, &mut Velocity, &CollisionAggregator), With<Player>>,
) {
    let Ok((mut transform, mut velocity, sensors)) = query.get_single_mut() else {
        return;
    };
    let Ok(states) = sensors.collisions() else {
        return;
    };
    let touching = |surface| states.get(&surface).copied().unwrap_or(false);
    let dt = time.delta_seconds();

    let run = input.run * RUN_SPEED;
    velocity.0.x = approach(velocity.0.x, run, RUN_ACCELERATION * dt);
    if (velocity.0.x < 0.0 && touching(SurfaceId::EntityLeft))
        || (velocity.0.x > 0.0 && touching(SurfaceId::EntityRight))
    {
        velocity.0.x = 0.0;
    }

    if touching(SurfaceId::Ground) && velocity.0.y <= 0.0 {
        velocity.0.y = 0.0;
        snap_to_ground(&mut transform, sensors);

        if input.jump {
            velocity.0.y = JUMP_SPEED;
        }
    } else {
        velocity.0.y = (velocity.0.y + GRAVITY * dt).max(-MAX_FALL_SPEED);
    }

    if touching(SurfaceId::Ceiling) && velocity.0.y > 0.0 {
        velocity.0.y = 0.0;
    }

    transform.translation += (velocity.0 * dt).extend(0.0);
}

/// Rests the player slightly above the highest ground point its probes found.
fn snap_to_ground(transform: &mut Transform, sensors: &CollisionAggregator) {
    let (group, points) = match sensors
        .group(SurfaceId::Ground)
        .and_then(|group| Ok((group, sensors.last_collision_points(SurfaceId::Ground)?)))
    {
        Ok(found) => found,
        Err(err) => {
            warn!("no ground detail: {}", err);
            return;
        }
    };

    let foot = group.config().bounds.start.y;
    if let Some(top) = points.iter().map(|p| p.y).reduce(f32::max) {
        transform.translation.y = top - foot + SNAP_MARGIN;
    }

    if points.len() < group.config().probe_count {
        debug!("standing on a ledge, ground under {:?}", points);
    }
}
