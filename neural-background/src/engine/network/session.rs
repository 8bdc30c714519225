use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::activation::{self, TickReport};
use super::graph::NeuralNetwork;
use super::motion;

/// All mutable simulation state for one mounted background.
///
/// The random source is injected at construction so tests can pin the
/// topology; production sessions seed from entropy.
#[derive(Resource)]
pub struct NeuralSession {
    pub network: NeuralNetwork,
    clock: f64,
    rng: StdRng,
}

impl NeuralSession {
    pub fn with_rng(mut rng: StdRng) -> Self {
        let network = NeuralNetwork::generate(&mut rng);
        Self {
            network,
            clock: 0.0,
            rng,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Seconds of simulated time, the sum of every `dt` ticked so far.
    pub fn now(&self) -> f64 {
        self.clock
    }

    /// Advance the simulation by `dt` seconds: activation first, then drift.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        self.clock += f64::from(dt);
        let report = activation::step(&mut self.network, self.clock, &mut self.rng);
        motion::step(&mut self.network.neurons);
        report
    }

    /// Roll a new synapse set. Callers own releasing the old render primitives first.
    pub fn regenerate_synapses(&mut self) {
        self.network.rebuild_synapses(&mut self.rng);
    }
}
