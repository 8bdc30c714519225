//! Render primitives for the network: shared geometry, per-element
//! materials, and the systems that keep them in step with the simulation.

/// Sphere, line and material factories.
pub mod primitives;

/// Handle bookkeeping for spawn and release of every primitive.
///
/// Tracks per-neuron, per-synapse and shared assets so regeneration and
/// teardown can free exactly what was created.
pub mod registry;

pub mod sync;
