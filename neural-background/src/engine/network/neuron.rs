use bevy::math::Vec3;
use constants::dynamics::{
    DRIFT_EXTENT, FIRING_THRESHOLD_MIN, FIRING_THRESHOLD_SPAN, REFRACTORY_SECS,
};
use constants::network::{
    ACTIVATION_HISTORY_LEN, HIDDEN_END, HIDDEN_LAYER_WIDTH, INPUT_END, OUTPUT_LAYER,
};
use constants::render_settings::{HIDDEN_HUE, INPUT_HUE, OUTPUT_HUE};
use rand::Rng;

/// Role of a neuron in the layered network. Drives placement and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeuronKind {
    Input,
    Hidden,
    Output,
}

/// Placement band and tint shared by every neuron of one kind.
///
/// A neuron sits at `x = x_origin + layer * x_per_layer`,
/// `y = (slot - y_centre) * y_spacing` and a random `z` within `±z_extent / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindProfile {
    pub base_hue: f32,
    pub x_origin: f32,
    pub x_per_layer: f32,
    pub y_spacing: f32,
    pub y_centre: f32,
    pub z_extent: f32,
}

const INPUT_PROFILE: KindProfile = KindProfile {
    base_hue: INPUT_HUE,
    x_origin: -35.0,
    x_per_layer: 0.0,
    y_spacing: 15.0,
    y_centre: 1.5,
    z_extent: 10.0,
};

const HIDDEN_PROFILE: KindProfile = KindProfile {
    base_hue: HIDDEN_HUE,
    x_origin: -10.0,
    x_per_layer: 15.0,
    y_spacing: 12.0,
    y_centre: 2.0,
    z_extent: 15.0,
};

const OUTPUT_PROFILE: KindProfile = KindProfile {
    base_hue: OUTPUT_HUE,
    x_origin: 35.0,
    x_per_layer: 0.0,
    y_spacing: 10.0,
    y_centre: 1.5,
    z_extent: 8.0,
};

impl NeuronKind {
    /// Kind, layer and slot-within-layer for a neuron index.
    pub fn for_index(index: usize) -> (Self, u8, usize) {
        if index < INPUT_END {
            (Self::Input, 0, index)
        } else if index < HIDDEN_END {
            let offset = index - INPUT_END;
            let layer = (offset / HIDDEN_LAYER_WIDTH) as u8 + 1;
            (Self::Hidden, layer, offset % HIDDEN_LAYER_WIDTH)
        } else {
            (Self::Output, OUTPUT_LAYER, index - HIDDEN_END)
        }
    }

    pub fn profile(self) -> &'static KindProfile {
        match self {
            Self::Input => &INPUT_PROFILE,
            Self::Hidden => &HIDDEN_PROFILE,
            Self::Output => &OUTPUT_PROFILE,
        }
    }
}

/// A simulated unit with activation, drift and firing behaviour.
#[derive(Debug, Clone)]
pub struct Neuron {
    pub id: usize,
    pub layer: u8,
    pub kind: NeuronKind,
    pub position: Vec3,
    /// Units per tick.
    pub velocity: Vec3,
    pub activation: f32,
    /// Rolling window of past activations, most recent last.
    pub activation_history: [f32; ACTIVATION_HISTORY_LEN],
    /// `None` until the neuron has fired or been stimulated.
    pub last_fired_at: Option<f64>,
    pub firing_threshold: f32,
}

impl Neuron {
    pub fn spawn(id: usize, rng: &mut impl Rng) -> Self {
        let (kind, layer, slot) = NeuronKind::for_index(id);
        let profile = kind.profile();

        let position = Vec3::new(
            profile.x_origin + f32::from(layer) * profile.x_per_layer,
            (slot as f32 - profile.y_centre) * profile.y_spacing,
            rng.gen_range(-0.5f32..0.5) * profile.z_extent,
        );
        let velocity = Vec3::new(
            rng.gen_range(-0.5f32..0.5) * DRIFT_EXTENT[0],
            rng.gen_range(-0.5f32..0.5) * DRIFT_EXTENT[1],
            rng.gen_range(-0.5f32..0.5) * DRIFT_EXTENT[2],
        );

        Self {
            id,
            layer,
            kind,
            position,
            velocity,
            activation: 0.0,
            activation_history: [0.0; ACTIVATION_HISTORY_LEN],
            last_fired_at: None,
            firing_threshold: FIRING_THRESHOLD_MIN
                + rng.gen_range(0.0f32..1.0) * FIRING_THRESHOLD_SPAN,
        }
    }

    pub fn is_above_threshold(&self) -> bool {
        self.activation > self.firing_threshold
    }

    /// How far activation overshoots the threshold, never negative.
    pub fn firing_intensity(&self) -> f32 {
        (self.activation - self.firing_threshold).max(0.0)
    }

    pub fn refractory_elapsed(&self, now: f64) -> bool {
        self.last_fired_at
            .is_none_or(|fired_at| (now - fired_at) as f32 >= REFRACTORY_SECS)
    }

    /// Drop the oldest history slot and append the current activation.
    pub fn record_history(&mut self) {
        self.activation_history.rotate_left(1);
        self.activation_history[ACTIVATION_HISTORY_LEN - 1] = self.activation;
    }
}
