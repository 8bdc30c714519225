/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 75.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 1000.0;

/// Camera distance from the origin before the drift takes over.
pub const INITIAL_DISTANCE: f32 = 50.0;

/// Wall-clock seconds are scaled by this before feeding the drift sinusoids.
pub const DRIFT_TIME_SCALE: f32 = 0.2;

/// Resting depth of the drifting camera.
pub const DRIFT_BASE_DEPTH: f32 = 55.0;
