/// Total neurons in a session. Index ranges below partition this count.
pub const NEURON_COUNT: usize = 18;

/// First index past the input layer.
pub const INPUT_END: usize = 4;

/// First index past the hidden layers.
pub const HIDDEN_END: usize = 14;

/// Neurons per hidden sub-layer; `(i - INPUT_END) / HIDDEN_LAYER_WIDTH` picks the sub-layer.
pub const HIDDEN_LAYER_WIDTH: usize = 5;

/// Layer index assigned to output neurons.
pub const OUTPUT_LAYER: u8 = 3;

/// Length of the rolling activation history kept per neuron.
pub const ACTIVATION_HISTORY_LEN: usize = 10;

/// Connection probability between adjacent layers.
pub const ADJACENT_LAYER_PROBABILITY: f64 = 0.7;

/// Connection probability for skip connections two layers apart.
pub const SKIP_LAYER_PROBABILITY: f64 = 0.3;

/// Edges longer than this are re-rolled at `LONG_EDGE_KEEP_PROBABILITY`.
pub const LONG_EDGE_DISTANCE: f32 = 40.0;
pub const LONG_EDGE_KEEP_PROBABILITY: f64 = 0.3;

/// Recurrent (backward or same-layer) edges injected per generation.
pub const RECURRENT_EDGE_COUNT: usize = 2;

/// Samples drawn per recurrent edge before giving up on it.
pub const RECURRENT_ATTEMPTS: usize = 10;

/// Forward edge strength range `[min, min + span)`.
pub const FORWARD_STRENGTH_MIN: f32 = 0.5;
pub const FORWARD_STRENGTH_SPAN: f32 = 0.5;

/// Recurrent edge strength range `[min, min + span)`.
pub const RECURRENT_STRENGTH_MIN: f32 = 0.3;
pub const RECURRENT_STRENGTH_SPAN: f32 = 0.4;

/// Seconds between wholesale edge regenerations.
pub const REGENERATION_INTERVAL_SECS: f32 = 15.0;
