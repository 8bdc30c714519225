use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use crate::engine::core::lifecycle::{LifecycleState, NeuralBackgroundPlugin};
use crate::engine::core::window_config::create_window_config;
use crate::engine::mount::surface::MountedSurface;
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::rpc::web_rpc::WebRpcPlugin;

pub fn create_app(surface: MountedSurface) -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(NeuralBackgroundPlugin::default())
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(Color::NONE))
        .insert_non_send_resource(surface);

    app.add_systems(
        Update,
        fps_notification_system.run_if(in_state(LifecycleState::Running)),
    );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        // Teardown owns the exit.
        close_when_requested: false,
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: "wgpu=error,naga=warn,neural_background=info".into(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
