use bevy::prelude::*;
use collisions::prelude::*;
use common::RangeInt;

/// Physics layer of static level geometry. Player probes only look at this layer.
pub const LEVEL_LAYER: i32 = 1 << 0;

const PLATFORM_COUNT: usize = 10;
const PLATFORM_X: RangeInt = RangeInt { min: -640, max: 640 };
const PLATFORM_Y: RangeInt = RangeInt { min: -140, max: 260 };
const PLATFORM_WIDTH: RangeInt = RangeInt { min: 80, max: 240 };

#[derive(Component)]
pub struct Platform;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_level);
    }
}

fn spawn_level(mut commands: Commands) {
    let mut rng = rand::thread_rng();

    // floor, walls and a roof around the play area
    spawn_block(&mut commands, Vec2::new(0.0, -240.0), Vec2::new(1600.0, 40.0));
    spawn_block(&mut commands, Vec2::new(-800.0, 60.0), Vec2::new(40.0, 640.0));
    spawn_block(&mut commands, Vec2::new(800.0, 60.0), Vec2::new(40.0, 640.0));
    spawn_block(&mut commands, Vec2::new(0.0, 360.0), Vec2::new(1600.0, 40.0));

    for _ in 0..PLATFORM_COUNT {
        let position = Vec2::new(
            PLATFORM_X.random_inclusive(&mut rng) as f32,
            PLATFORM_Y.random_inclusive(&mut rng) as f32,
        );
        let size = Vec2::new(PLATFORM_WIDTH.random_inclusive(&mut rng) as f32, 16.0);
        spawn_block(&mut commands, position, size);
    }

    info!("Spawned level with {} platforms", PLATFORM_COUNT);
}

fn spawn_block(commands: &mut Commands, position: Vec2, size: Vec2) {
    commands.spawn((
        Platform,
        Name::new("platform"),
        SpriteBundle {
            sprite: Sprite {
                color: Color::srgb(0.35, 0.3, 0.4),
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_translation(position.extend(0.0)),
            ..default()
        },
        Collider::new(ColliderShapeType::Box {
            width: size.x,
            height: size.y,
        })
        .with_layer(LEVEL_LAYER),
    ));
}
