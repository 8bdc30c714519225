//! Host page integration: the canvas the background renders into.

/// Mount errors, surface attach and detach.
pub mod surface;
