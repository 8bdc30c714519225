use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use constants::host::FPS_NOTIFY_INTERVAL_SECS;

use crate::rpc::web_rpc::WebRpcInterface;

/// Smoothed frame rate, if the diagnostic has samples yet.
pub fn current_fps(diagnostics: &DiagnosticsStore) -> Option<f32> {
    diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .map(|value| value as f32)
}

fn notify_due(now: f32, last_sent: f32) -> bool {
    now - last_sent >= FPS_NOTIFY_INTERVAL_SECS
}

pub fn fps_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    diagnostics: Res<DiagnosticsStore>,
    mut last_send_time: Local<f32>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();
    if !notify_due(current_time, *last_send_time) {
        return;
    }

    if let Some(fps) = current_fps(&diagnostics) {
        rpc_interface.send_notification("fps_update", serde_json::json!({ "fps": fps }));
        *last_send_time = current_time;
    }
}
