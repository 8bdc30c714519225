use bevy::math::Vec3;
use constants::dynamics::{BOUNCE_DAMPING, BOUNDS};

use super::neuron::Neuron;

/// Drift every neuron by its velocity and keep it inside the bounding box.
pub fn step(neurons: &mut [Neuron]) {
    for neuron in neurons {
        neuron.position += neuron.velocity;
        contain(&mut neuron.position, &mut neuron.velocity);
    }
}

/// Per-axis elastic containment: an axis past its bound is clamped back onto
/// it and its velocity component flips with damping.
pub fn contain(position: &mut Vec3, velocity: &mut Vec3) {
    for (axis, bound) in BOUNDS.into_iter().enumerate() {
        if position[axis].abs() > bound {
            velocity[axis] *= -BOUNCE_DAMPING;
            position[axis] = position[axis].signum() * bound;
        }
    }
}
