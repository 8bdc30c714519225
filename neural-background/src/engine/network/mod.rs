//! Neural network simulation, independent of rendering.
//!
//! Builds the layered neuron graph, advances activation and drift once per
//! tick, and derives the visual parameters the scene layer applies.

/// Per-frame visual parameters for neurons, lines and signal markers.
pub mod appearance;

/// Leaky integrate-and-fire activation step.
pub mod activation;

/// Neuron and synapse generation, including periodic synapse rebuilds.
pub mod graph;

/// Velocity integration and boundary reflection.
pub mod motion;

pub mod neuron;

/// Session resource owning the network, simulated clock and random source.
pub mod session;

pub mod synapse;
