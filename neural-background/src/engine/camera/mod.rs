//! Slowly wandering perspective camera framing the network.

/// Drift camera component, pose function and per-frame system.
pub mod drift_camera;
