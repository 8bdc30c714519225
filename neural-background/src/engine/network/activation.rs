use constants::dynamics::{ACTIVATION_DECAY, INPUT_GAIN, INPUT_STIMULUS_PROBABILITY};
use rand::Rng;

use super::graph::NeuralNetwork;
use super::neuron::NeuronKind;

/// What happened during one activation step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Input neuron that received a random stimulus, if any.
    pub stimulated: Option<usize>,
    /// Neurons forced to full activation this step.
    pub fired: Vec<usize>,
}

/// Advance every neuron by one leaky integrate-and-fire step.
///
/// Incoming signal is computed from the activations as they stood at the
/// start of the step, so neuron order does not matter.
pub fn step(network: &mut NeuralNetwork, now: f64, rng: &mut impl Rng) -> TickReport {
    let mut report = TickReport {
        stimulated: stimulate_input(network, now, rng),
        ..Default::default()
    };

    let snapshot: Vec<(f32, bool)> = network
        .neurons
        .iter()
        .map(|n| (n.activation, n.is_above_threshold()))
        .collect();

    let mut incoming = vec![0.0f32; network.neurons.len()];
    for synapse in &mut network.synapses {
        let (source_activation, source_above) = snapshot[synapse.from];
        if source_above {
            incoming[synapse.to] += source_activation * synapse.strength;
            synapse.last_activation_at = Some(now);
        }
    }

    for (neuron, input) in network.neurons.iter_mut().zip(incoming) {
        neuron.record_history();

        if input > 0.0 {
            neuron.activation = (neuron.activation + input * INPUT_GAIN).min(1.0);
        } else {
            neuron.activation *= ACTIVATION_DECAY;
        }

        if neuron.is_above_threshold() && neuron.refractory_elapsed(now) {
            neuron.activation = 1.0;
            neuron.last_fired_at = Some(now);
            report.fired.push(neuron.id);
        }
    }

    report
}

fn stimulate_input(network: &mut NeuralNetwork, now: f64, rng: &mut impl Rng) -> Option<usize> {
    if !rng.gen_bool(INPUT_STIMULUS_PROBABILITY) {
        return None;
    }

    let inputs: Vec<usize> = network
        .neurons
        .iter()
        .filter(|n| n.kind == NeuronKind::Input)
        .map(|n| n.id)
        .collect();
    if inputs.is_empty() {
        return None;
    }

    let chosen = inputs[rng.gen_range(0..inputs.len())];
    let neuron = &mut network.neurons[chosen];
    neuron.activation = rng.gen_range(0.0f32..1.0);
    neuron.last_fired_at = Some(now);
    Some(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::network::synapse::Synapse;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    const DT: f64 = 1.0 / 60.0;

    fn quiet_network(seed: u64) -> (NeuralNetwork, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut network = NeuralNetwork::generate(&mut rng);
        network.synapses.clear();
        (network, rng)
    }

    #[test]
    fn activation_stays_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut network = NeuralNetwork::generate(&mut rng);

        for frame in 0..5_000 {
            step(&mut network, frame as f64 * DT, &mut rng);
            for neuron in &network.neurons {
                assert!(
                    (0.0..=1.0).contains(&neuron.activation),
                    "neuron {} left range at frame {frame}: {}",
                    neuron.id,
                    neuron.activation
                );
            }
        }
    }

    #[test]
    fn refractory_window_spaces_firings() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut network = NeuralNetwork::generate(&mut rng);
        // Saturate inputs so the downstream layers fire repeatedly.
        for neuron in network.neurons.iter_mut().take(4) {
            neuron.firing_threshold = 0.7;
        }

        let mut last_fire: HashMap<usize, f64> = HashMap::new();
        let mut total_fires = 0;
        for frame in 0..3_000 {
            let now = frame as f64 * DT;
            for id in 0..4 {
                network.neurons[id].activation = 1.0;
            }
            let report = step(&mut network, now, &mut rng);
            for id in report.fired {
                if let Some(previous) = last_fire.insert(id, now) {
                    assert!(
                        now - previous >= 0.5 - 1e-4,
                        "neuron {id} fired twice within {}s",
                        now - previous
                    );
                }
                total_fires += 1;
            }
        }
        assert!(total_fires > 0);
    }

    #[test]
    fn decays_without_input() {
        let (mut network, mut rng) = quiet_network(4);
        network.neurons[7].activation = 0.5;
        network.neurons[7].last_fired_at = Some(0.0);

        step(&mut network, 0.1, &mut rng);

        assert!((network.neurons[7].activation - 0.475).abs() < 1e-6);
        assert_eq!(network.neurons[7].activation_history[9], 0.5);
    }

    #[test]
    fn incoming_signal_accumulates_and_stamps_synapse() {
        let (mut network, mut rng) = quiet_network(5);
        network.neurons[4].activation = 0.95;
        network.neurons[4].firing_threshold = 0.7;
        network.neurons[4].last_fired_at = Some(10.0);
        network.neurons[9].firing_threshold = 0.99;
        network.synapses.push(Synapse::new(4, 9, 0.8, 1, false));

        step(&mut network, 10.0, &mut rng);

        let expected = 0.95 * 0.8 * INPUT_GAIN;
        assert!((network.neurons[9].activation - expected).abs() < 1e-6);
        assert_eq!(network.synapses[0].last_activation_at, Some(10.0));
    }

    #[test]
    fn below_threshold_source_does_not_feed_target() {
        let (mut network, mut rng) = quiet_network(6);
        network.neurons[4].activation = 0.5;
        network.neurons[4].firing_threshold = 0.9;
        network.synapses.push(Synapse::new(4, 9, 1.0, 1, false));

        step(&mut network, 1.0, &mut rng);

        assert_eq!(network.neurons[9].activation, 0.0);
        assert_eq!(network.synapses[0].last_activation_at, None);
    }

    #[test]
    fn crossing_threshold_fires_to_full_activation() {
        let (mut network, mut rng) = quiet_network(7);
        network.neurons[10].activation = 0.95;
        network.neurons[10].firing_threshold = 0.7;
        network.neurons[4].activation = 1.0;
        network.neurons[4].firing_threshold = 0.7;
        network.neurons[4].last_fired_at = Some(2.0);
        network.synapses.push(Synapse::new(4, 10, 1.0, 1, false));

        let report = step(&mut network, 2.0, &mut rng);

        assert!(report.fired.contains(&10));
        assert_eq!(network.neurons[10].activation, 1.0);
        assert_eq!(network.neurons[10].last_fired_at, Some(2.0));
    }

    #[test]
    fn stimulus_only_touches_input_neurons() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut network = NeuralNetwork::generate(&mut rng);
        let mut seen = 0;
        for frame in 0..500 {
            if let Some(id) = step(&mut network, frame as f64 * DT, &mut rng).stimulated {
                assert_eq!(network.neurons[id].kind, NeuronKind::Input);
                seen += 1;
            }
        }
        assert!(seen > 0);
    }
}
