#![cfg(debug_assertions)]
use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;
use sensors::prelude::*;

use crate::player::Velocity;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Velocity>();
        app.add_plugins(WorldInspectorPlugin::new());
        app.add_systems(Update, (close_on_esc, handle_input));
    }
}

fn close_on_esc(
    mut commands: Commands,
    focused_windows: Query<(Entity, &Window)>,
    input: Res<ButtonInput<KeyCode>>,
) {
    for (window, focus) in focused_windows.iter() {
        if !focus.focused {
            continue;
        }

        if input.just_pressed(KeyCode::Escape) {
            commands.entity(window).despawn();
        }
    }
}

/// F1 toggles probe drawing, F2 toggles collision state logging.
fn handle_input(keyboard_input: Res<ButtonInput<KeyCode>>, mut settings: ResMut<SensorSettings>) {
    if keyboard_input.just_pressed(KeyCode::F1) {
        settings.draw_probes = !settings.draw_probes;
        info!("probe drawing: {}", settings.draw_probes);
    }
    if keyboard_input.just_pressed(KeyCode::F2) {
        settings.log_collisions = !settings.log_collisions;
        info!("collision logging: {}", settings.log_collisions);
    }
}
