//! Runtime diagnostics reported to the host page.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to the host via RPC.
pub mod fps_tracking;
