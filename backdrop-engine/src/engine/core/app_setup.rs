use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy::render::camera::PerspectiveProjection;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::hex_color;
use constants::render_settings::{
    AMBIENT_BRIGHTNESS, AMBIENT_LIGHT_COLOR, CAMERA_DISTANCE, CAMERA_FAR, CAMERA_FOV_DEGREES,
    CAMERA_NEAR, FILL_LIGHT_COLOR, FILL_LIGHT_LUX, FILL_LIGHT_POSITION, KEY_LIGHT_COLOR,
    KEY_LIGHT_LUX, KEY_LIGHT_POSITION,
};

use crate::engine::camera::PointerState;
use crate::engine::controller::BackgroundController;
use crate::engine::core::app_state::{AppState, setup_backdrop, transition_to_running};
use crate::engine::core::settings::{
    BackdropSettings, SettingsLoader, resolve_settings, start_loading,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::render::sync::{SpawnedScene, spawn_generation, sync_objects};
use crate::engine::systems::frame::tick_backdrop;
use crate::engine::systems::input::{handle_resize, track_pointer};
use crate::engine::systems::theme::{
    handle_theme_keyboard_shortcuts, handle_theme_requests, poll_theme_cycler,
};
use crate::rpc::web_rpc::WebRpcPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers BackdropSettings as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<BackdropSettings>::new(&["settings.json"]))
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(Color::NONE))
        .insert_resource(AmbientLight {
            color: hex_color(AMBIENT_LIGHT_COLOR),
            brightness: AMBIENT_BRIGHTNESS,
            ..default()
        });

    // Theme events are registered by WebRpcPlugin.
    app.init_resource::<SettingsLoader>()
        .init_resource::<PointerState>()
        .init_resource::<SpawnedScene>();

    app.add_systems(Startup, (setup, start_loading))
        .add_systems(
            Update,
            (resolve_settings, transition_to_running)
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnEnter(AppState::Running), setup_backdrop);

    // One ordered pass per frame: input, theme changes, tick, render sync.
    app.add_systems(
        Update,
        (
            track_pointer,
            handle_resize,
            handle_theme_keyboard_shortcuts,
            handle_theme_requests,
            poll_theme_cycler,
            tick_backdrop,
            spawn_generation,
            sync_objects,
        )
            .chain()
            .run_if(in_state(AppState::Running))
            .run_if(resource_exists::<BackgroundController>),
    );

    app
}

fn spawn_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn spawn_lighting(commands: &mut Commands) {
    for (color, lux, position) in [
        (KEY_LIGHT_COLOR, KEY_LIGHT_LUX, KEY_LIGHT_POSITION),
        (FILL_LIGHT_COLOR, FILL_LIGHT_LUX, FILL_LIGHT_POSITION),
    ] {
        commands.spawn((
            DirectionalLight {
                color: hex_color(color),
                illuminance: lux,
                ..default()
            },
            Transform::from_translation(Vec3::from_array(position))
                .looking_at(Vec3::ZERO, Vec3::Y),
        ));
    }
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_camera(&mut commands);
    spawn_lighting(&mut commands);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
