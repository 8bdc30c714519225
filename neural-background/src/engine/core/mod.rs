//! Core application setup and lifecycle management.
//!
//! Handles app construction, window configuration and the
//! mount → run → teardown state machine for native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
pub mod app_setup;

/// Lifecycle states, the regeneration timer and the plugin that wires the
/// simulation, scene and camera systems to them.
pub mod lifecycle;

/// Platform-specific window configuration for native and WASM builds.
///
/// Binds the primary window to the mounted canvas on web targets.
pub mod window_config;
