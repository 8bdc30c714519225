/// Per-tick chance that an input neuron receives a fresh random activation.
pub const INPUT_STIMULUS_PROBABILITY: f64 = 0.1;

/// Gain applied to summed incoming signal before it is added to activation.
pub const INPUT_GAIN: f32 = 0.1;

/// Multiplicative decay applied when a neuron receives no input.
pub const ACTIVATION_DECAY: f32 = 0.95;

/// Minimum seconds between two firings of the same neuron.
pub const REFRACTORY_SECS: f32 = 0.5;

/// Firing thresholds are drawn from `[min, min + span)`.
pub const FIRING_THRESHOLD_MIN: f32 = 0.7;
pub const FIRING_THRESHOLD_SPAN: f32 = 0.3;

/// Half-extent of the box neurons drift inside, per axis.
pub const BOUNDS: [f32; 3] = [50.0, 30.0, 15.0];

/// Velocity factor applied on reflection (sign flipped separately).
pub const BOUNCE_DAMPING: f32 = 0.7;

/// Initial drift speed per tick, per axis: components drawn from `±extent / 2`.
pub const DRIFT_EXTENT: [f32; 3] = [0.01, 0.01, 0.005];

/// An edge counts as active this many seconds after its source last fed it.
pub const EDGE_ACTIVE_SECS: f32 = 1.0;

/// Signal markers travel only within this window after activation.
pub const TRANSMISSION_WINDOW_SECS: f32 = 0.8;

/// Exponential decay rate of the edge glow after activation.
pub const EDGE_GLOW_DECAY: f32 = 2.0;

/// Marker progress per second along an edge.
pub const SIGNAL_SPEED: f32 = 2.0;

/// Progress head start per marker index so markers trail each other.
pub const SIGNAL_STAGGER: f32 = 0.2;
