use std::collections::HashSet;

use constants::network::{
    ADJACENT_LAYER_PROBABILITY, FORWARD_STRENGTH_MIN, FORWARD_STRENGTH_SPAN, LONG_EDGE_DISTANCE,
    LONG_EDGE_KEEP_PROBABILITY, NEURON_COUNT, RECURRENT_ATTEMPTS, RECURRENT_EDGE_COUNT,
    RECURRENT_STRENGTH_MIN, RECURRENT_STRENGTH_SPAN, SKIP_LAYER_PROBABILITY,
};
use rand::Rng;

use super::neuron::Neuron;
use super::synapse::Synapse;

/// Neurons and the synapses currently wiring them together.
///
/// Neurons live for the whole session; the synapse set is replaced wholesale
/// by [`NeuralNetwork::rebuild_synapses`].
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    pub neurons: Vec<Neuron>,
    pub synapses: Vec<Synapse>,
    generation: u32,
}

impl NeuralNetwork {
    pub fn generate(rng: &mut impl Rng) -> Self {
        let neurons = build_neurons(rng);
        let synapses = build_synapses(&neurons, rng);
        Self {
            neurons,
            synapses,
            generation: 1,
        }
    }

    /// Replace every synapse with a freshly rolled set. Neurons keep their state.
    pub fn rebuild_synapses(&mut self, rng: &mut impl Rng) {
        self.synapses = build_synapses(&self.neurons, rng);
        self.generation += 1;
    }

    /// Number of synapse sets built so far, starting at 1.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn has_synapse(&self, from: usize, to: usize) -> bool {
        self.synapses.iter().any(|s| s.from == from && s.to == to)
    }

    /// Total signal markers across all synapses.
    pub fn signal_count(&self) -> usize {
        self.synapses.iter().map(|s| s.signal_count).sum()
    }
}

pub fn build_neurons(rng: &mut impl Rng) -> Vec<Neuron> {
    (0..NEURON_COUNT).map(|id| Neuron::spawn(id, rng)).collect()
}

pub fn build_synapses(neurons: &[Neuron], rng: &mut impl Rng) -> Vec<Synapse> {
    let mut synapses = Vec::new();
    let mut connected = HashSet::new();

    for from in neurons {
        for to in neurons {
            if from.layer >= to.layer || !accept_forward(from, to, rng) {
                continue;
            }
            let signal_count = if rng.gen_bool(0.5) { 1 } else { 2 };
            let strength = FORWARD_STRENGTH_MIN + rng.gen_range(0.0f32..1.0) * FORWARD_STRENGTH_SPAN;
            connected.insert((from.id, to.id));
            synapses.push(Synapse::new(from.id, to.id, strength, signal_count, false));
        }
    }

    inject_recurrent(neurons, &mut connected, &mut synapses, rng);
    synapses
}

fn layer_probability(layer_gap: u8) -> f64 {
    match layer_gap {
        1 => ADJACENT_LAYER_PROBABILITY,
        2 => SKIP_LAYER_PROBABILITY,
        _ => 0.0,
    }
}

/// Layer roll first; long edges that pass get a second, compounding roll.
fn accept_forward(from: &Neuron, to: &Neuron, rng: &mut impl Rng) -> bool {
    let probability = layer_probability(to.layer - from.layer);
    if probability == 0.0 || !rng.gen_bool(probability) {
        return false;
    }
    if from.position.distance(to.position) > LONG_EDGE_DISTANCE {
        return rng.gen_bool(LONG_EDGE_KEEP_PROBABILITY);
    }
    true
}

fn inject_recurrent(
    neurons: &[Neuron],
    connected: &mut HashSet<(usize, usize)>,
    synapses: &mut Vec<Synapse>,
    rng: &mut impl Rng,
) {
    for _ in 0..RECURRENT_EDGE_COUNT {
        for _ in 0..RECURRENT_ATTEMPTS {
            let from = rng.gen_range(0..neurons.len());
            let to = rng.gen_range(0..neurons.len());
            if from == to
                || neurons[from].layer < neurons[to].layer
                || connected.contains(&(from, to))
            {
                continue;
            }

            let strength =
                RECURRENT_STRENGTH_MIN + rng.gen_range(0.0f32..1.0) * RECURRENT_STRENGTH_SPAN;
            connected.insert((from, to));
            synapses.push(Synapse::new(from, to, strength, 1, true));
            break;
        }
    }
}
