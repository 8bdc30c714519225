//! Shared tunables for the neural background.
//!
//! Everything that shapes the network, its dynamics and its appearance lives
//! here so the engine crate stays free of magic numbers.

pub mod camera;
pub mod dynamics;
pub mod host;
pub mod network;
pub mod render_settings;
