use bevy::{diagnostic::FrameTimeDiagnosticsPlugin, prelude::*};
use collisions::plugin::CollisionPlugin;
use sensors::plugin::{SensorRigAssetPlugin, SensorsPlugin};

mod camera;
mod debug;
mod input;
mod level;
mod player;

use camera::CameraMovementPlugin;
#[cfg(debug_assertions)]
use debug::DebugPlugin;
use level::LevelPlugin;
use player::PlayerPlugin;

pub const FRAMERATE: f64 = 60.0;
pub const FIXED_TIMESTEP: f64 = 1.0 / FRAMERATE;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, States)]
pub enum AppState {
    #[default]
    LoadAssets,
    Playing,
}

fn main() {
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Ray Sensors".into(),
                    resolution: (1600., 900.).into(),
                    ..default()
                }),
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    )
    .init_state::<AppState>()
    .add_plugins(FrameTimeDiagnosticsPlugin)
    .add_plugins(bevy_framepace::FramepacePlugin)
    .add_plugins(CollisionPlugin)
    .add_plugins((SensorsPlugin, SensorRigAssetPlugin))
    .add_plugins(input::InputPlugin)
    .add_plugins(LevelPlugin)
    .add_plugins(PlayerPlugin)
    .add_plugins(CameraMovementPlugin)
    .add_systems(Startup, spawn_camera)
    .insert_resource(Time::<Fixed>::from_seconds(FIXED_TIMESTEP))
    .insert_resource(Msaa::Off);

    #[cfg(debug_assertions)]
    app.add_plugins(DebugPlugin);

    app.run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}
