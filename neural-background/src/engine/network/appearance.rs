//! Per-frame visual parameters derived from simulation state.
//!
//! Pure functions only; the scene layer copies the results onto entities and
//! materials.

use bevy::color::Color;
use bevy::math::Vec3;
use constants::dynamics::{EDGE_GLOW_DECAY, SIGNAL_SPEED, SIGNAL_STAGGER};
use constants::render_settings::{EDGE_LIGHTNESS, EDGE_SATURATION};

use super::neuron::Neuron;
use super::synapse::Synapse;

/// Hue as a fraction of the colour wheel, saturation and lightness in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub fn to_color(self, alpha: f32) -> Color {
        Color::hsla(
            self.hue.rem_euclid(1.0) * 360.0,
            self.saturation.clamp(0.0, 1.0),
            self.lightness.clamp(0.0, 1.0),
            alpha,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeuronAppearance {
    pub core_opacity: f32,
    pub core_colour: Hsl,
    pub glow_scale: f32,
    pub glow_opacity: f32,
    pub glow_colour: Hsl,
    pub shell_scale: f32,
}

pub fn neuron_appearance(neuron: &Neuron, time: f64) -> NeuronAppearance {
    let pulse = (time * 2.0 + neuron.id as f64).sin() as f32;
    let activation = neuron.activation;
    let intensity = neuron.firing_intensity();

    let glow_colour = Hsl {
        hue: neuron.kind.profile().base_hue + activation * 0.1,
        saturation: 0.7 + activation * 0.3,
        lightness: 0.4 + activation * 0.4,
    };

    NeuronAppearance {
        core_opacity: 0.3 + activation * 0.7,
        core_colour: Hsl {
            lightness: glow_colour.lightness + 0.2,
            ..glow_colour
        },
        glow_scale: 1.0 + intensity * 2.0,
        glow_opacity: 0.1 + intensity * 0.4,
        glow_colour,
        shell_scale: 0.8 + 0.3 * pulse + activation * 0.2,
    }
}

/// Where a signal marker sits and how visible it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalState {
    pub position: Vec3,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynapseAppearance {
    pub start: Vec3,
    pub end: Vec3,
    pub opacity: f32,
    pub colour: Hsl,
    pub active: bool,
    /// Seconds since activation while inside the transmission window.
    transmitting_for: Option<f32>,
}

impl SynapseAppearance {
    /// Marker `slot` along the line, or `None` when it should be hidden.
    pub fn signal(&self, slot: usize) -> Option<SignalState> {
        let since = self.transmitting_for?;
        let progress = (since * SIGNAL_SPEED + slot as f32 * SIGNAL_STAGGER).min(1.0);
        Some(SignalState {
            position: self.start + (self.end - self.start) * progress,
            opacity: (1.0 - progress) * 0.8,
        })
    }
}

pub fn synapse_appearance(synapse: &Synapse, start: Vec3, end: Vec3, now: f64) -> SynapseAppearance {
    let since = synapse.since_activation(now);
    let active = synapse.is_active(now);

    let mut opacity = synapse.strength * 0.1;
    if let (true, Some(since)) = (active, since) {
        opacity += 0.3 * (-since * EDGE_GLOW_DECAY).exp();
    }

    SynapseAppearance {
        start,
        end,
        opacity,
        colour: Hsl {
            hue: 0.6 + synapse.strength * 0.2,
            saturation: EDGE_SATURATION,
            lightness: EDGE_LIGHTNESS,
        },
        active,
        transmitting_for: since.filter(|_| synapse.is_transmitting(now)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::network::neuron::NeuronKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn neuron(id: usize, activation: f32, threshold: f32) -> Neuron {
        let mut neuron = Neuron::spawn(id, &mut StdRng::seed_from_u64(1));
        neuron.activation = activation;
        neuron.firing_threshold = threshold;
        neuron
    }

    #[test]
    fn resting_neuron_is_dim_and_unscaled() {
        let look = neuron_appearance(&neuron(6, 0.0, 0.8), 0.0);
        assert!((look.core_opacity - 0.3).abs() < 1e-6);
        assert_eq!(look.glow_scale, 1.0);
        assert!((look.glow_opacity - 0.1).abs() < 1e-6);
        assert_eq!(look.glow_colour.hue, 0.6);
        assert!((look.core_colour.lightness - 0.6).abs() < 1e-6);
    }

    #[test]
    fn firing_neuron_glows_from_overshoot() {
        let look = neuron_appearance(&neuron(15, 1.0, 0.75), 0.0);
        assert!((look.core_opacity - 1.0).abs() < 1e-6);
        assert!((look.glow_scale - 1.5).abs() < 1e-6);
        assert!((look.glow_opacity - 0.2).abs() < 1e-6);
        assert!((look.glow_colour.saturation - 1.0).abs() < 1e-6);
        assert!((look.glow_colour.lightness - 0.8).abs() < 1e-6);
    }

    #[test]
    fn hue_follows_kind() {
        let input = neuron_appearance(&neuron(0, 0.0, 0.8), 0.0);
        let output = neuron_appearance(&neuron(17, 0.0, 0.8), 0.0);
        assert_eq!(neuron(0, 0.0, 0.8).kind, NeuronKind::Input);
        assert_eq!(input.glow_colour.hue, 0.3);
        assert_eq!(output.glow_colour.hue, 0.0);
    }

    #[test]
    fn shell_pulses_around_baseline() {
        let n = neuron(0, 0.0, 0.8);
        let samples: Vec<f32> = (0..100)
            .map(|i| neuron_appearance(&n, i as f64 * 0.1).shell_scale)
            .collect();
        assert!(samples.iter().all(|s| (0.5..=1.1).contains(s)));
        assert!(samples.iter().any(|s| *s > 1.0));
        assert!(samples.iter().any(|s| *s < 0.6));
    }

    #[test]
    fn stale_synapse_shows_baseline_only() {
        let mut synapse = Synapse::new(0, 5, 0.6, 2, false);
        synapse.last_activation_at = Some(7.0);

        let look = synapse_appearance(&synapse, Vec3::ZERO, Vec3::X, 10.0);

        assert!(!look.active);
        assert!((look.opacity - 0.06).abs() < 1e-6);
        assert_eq!(look.signal(0), None);
        assert_eq!(look.signal(1), None);
    }

    #[test]
    fn fresh_synapse_adds_decaying_glow() {
        let mut synapse = Synapse::new(0, 5, 0.5, 1, false);
        synapse.last_activation_at = Some(10.0);

        let now = synapse_appearance(&synapse, Vec3::ZERO, Vec3::X, 10.0);
        let later = synapse_appearance(&synapse, Vec3::ZERO, Vec3::X, 10.5);

        assert!((now.opacity - 0.35).abs() < 1e-6);
        assert!(later.opacity < now.opacity);
        assert!(later.opacity > 0.05);
    }

    #[test]
    fn signals_travel_staggered_and_fade() {
        let mut synapse = Synapse::new(0, 5, 1.0, 2, false);
        synapse.last_activation_at = Some(0.0);
        let start = Vec3::new(-10.0, 0.0, 0.0);
        let end = Vec3::new(10.0, 0.0, 0.0);

        let look = synapse_appearance(&synapse, start, end, 0.2);
        let first = look.signal(0).expect("first marker visible");
        let second = look.signal(1).expect("second marker visible");

        assert!((first.position.x - -2.0).abs() < 1e-5);
        assert!((second.position.x - 2.0).abs() < 1e-5);
        assert!(second.opacity < first.opacity);
        assert!((first.opacity - 0.48).abs() < 1e-5);
    }

    #[test]
    fn signals_hide_after_transmission_window() {
        let mut synapse = Synapse::new(0, 5, 1.0, 1, false);
        synapse.last_activation_at = Some(0.0);

        let look = synapse_appearance(&synapse, Vec3::ZERO, Vec3::Y, 0.9);

        assert!(look.active);
        assert_eq!(look.signal(0), None);
    }

    #[test]
    fn line_hue_tracks_strength() {
        let weak = synapse_appearance(&Synapse::new(0, 5, 0.3, 1, true), Vec3::ZERO, Vec3::X, 0.0);
        let strong = synapse_appearance(&Synapse::new(0, 5, 1.0, 1, false), Vec3::ZERO, Vec3::X, 0.0);
        assert!(strong.colour.hue > weak.colour.hue);
        assert!((strong.colour.hue - 0.8).abs() < 1e-6);
    }
}
