use bevy::{
    input::gamepad::{AxisSettings, GamepadSettings},
    prelude::*,
};

/// Player intent for the current frame, merged from keyboard and gamepads.
#[derive(Resource, Debug, Default, Clone, Copy, Reflect)]
#[reflect(Resource)]
pub struct PlayerInput {
    /// -1.0 (left) to 1.0 (right).
    pub run: f32,
    pub jump: bool,
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .register_type::<PlayerInput>()
            .add_systems(Startup, setup_gamepad_settings)
            .add_systems(PreUpdate, read_input.after(bevy::input::InputSystem));
    }
}

fn setup_gamepad_settings(mut gamepad_settings: ResMut<GamepadSettings>) {
    match AxisSettings::new(-1.0, -0.15, 0.15, 1.0, 0.1) {
        Ok(settings) => gamepad_settings.default_axis_settings = settings,
        Err(err) => error!("invalid gamepad axis settings: {}", err),
    }
}

fn read_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    gamepad_buttons: Res<ButtonInput<GamepadButton>>,
    gamepad_axes: Res<Axis<GamepadAxis>>,
    gamepads: Res<Gamepads>,
    mut input: ResMut<PlayerInput>,
) {
    let mut run = 0.0;
    let mut jump = false;

    for gamepad in gamepads.iter() {
        if let Some(x) = gamepad_axes.get(GamepadAxis::new(gamepad, GamepadAxisType::LeftStickX)) {
            run += x;
        }
        jump |= gamepad_buttons.pressed(GamepadButton::new(gamepad, GamepadButtonType::South));
    }

    if keyboard_input.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]) {
        run -= 1.0;
    }
    if keyboard_input.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]) {
        run += 1.0;
    }
    jump |= keyboard_input.any_pressed([KeyCode::Space, KeyCode::ArrowUp, KeyCode::KeyW]);

    input.run = f32::clamp(run, -1.0, 1.0);
    input.jump = jump;
}
