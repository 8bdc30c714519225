//! Ownership of every entity, mesh and material the background creates.
//!
//! Each spawn path records its handles here and each release path removes
//! the matching assets explicitly, so a torn-down session leaves nothing in
//! `Assets<Mesh>` or `Assets<StandardMaterial>`.

use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;

use super::primitives::{
    SharedGeometry, core_material, glow_material, line_mesh, line_material, shell_material,
    signal_material,
};
use crate::engine::network::graph::NeuralNetwork;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeuronPart {
    Core,
    Glow,
    Shell,
}

#[derive(Component)]
pub struct NeuronPrimitive {
    pub neuron: usize,
    pub part: NeuronPart,
}

#[derive(Component)]
pub struct SynapseLine {
    pub synapse: usize,
}

#[derive(Component)]
pub struct SignalMarker {
    pub synapse: usize,
    pub slot: usize,
}

/// An entity together with the material only it uses.
pub struct Primitive {
    pub entity: Entity,
    pub material: Handle<StandardMaterial>,
}

impl Primitive {
    fn release(self, commands: &mut Commands, materials: &mut Assets<StandardMaterial>) {
        commands.entity(self.entity).despawn();
        materials.remove(&self.material);
    }
}

pub struct NeuronPrimitives {
    pub core: Primitive,
    pub glow: Primitive,
    pub shell: Primitive,
}

pub struct SynapsePrimitives {
    pub line: Primitive,
    pub line_mesh: Handle<Mesh>,
    pub signals: Vec<Primitive>,
}

/// Live primitive counts, used to check for leaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandleCounts {
    /// Neuron entities (three per neuron).
    pub neuron: usize,
    /// Line plus signal entities across all synapses.
    pub synapse: usize,
    /// Shared sphere meshes.
    pub shared: usize,
}

#[derive(Resource, Default)]
pub struct RenderHandles {
    geometry: Option<SharedGeometry>,
    neurons: Vec<NeuronPrimitives>,
    synapses: Vec<SynapsePrimitives>,
}

impl RenderHandles {
    pub fn neurons(&self) -> &[NeuronPrimitives] {
        &self.neurons
    }

    pub fn synapses(&self) -> &[SynapsePrimitives] {
        &self.synapses
    }

    pub fn counts(&self) -> HandleCounts {
        HandleCounts {
            neuron: self.neurons.len() * 3,
            synapse: self.synapses.iter().map(|s| 1 + s.signals.len()).sum(),
            shared: if self.geometry.is_some() {
                SharedGeometry::COUNT
            } else {
                0
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts() == HandleCounts::default()
    }

    pub fn spawn_neurons(
        &mut self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        network: &NeuralNetwork,
    ) {
        let geometry = self
            .geometry
            .get_or_insert_with(|| SharedGeometry::create(meshes));

        for neuron in &network.neurons {
            let transform = Transform::from_translation(neuron.position);
            let mut spawn_part = |part, mesh: &Handle<Mesh>, material: StandardMaterial| {
                let material = materials.add(material);
                let entity = commands
                    .spawn((
                        Mesh3d(mesh.clone()),
                        MeshMaterial3d(material.clone()),
                        transform,
                        NeuronPrimitive {
                            neuron: neuron.id,
                            part,
                        },
                    ))
                    .id();
                Primitive { entity, material }
            };

            let primitives = NeuronPrimitives {
                core: spawn_part(NeuronPart::Core, &geometry.core, core_material()),
                glow: spawn_part(NeuronPart::Glow, &geometry.glow, glow_material()),
                shell: spawn_part(NeuronPart::Shell, &geometry.shell, shell_material()),
            };
            self.neurons.push(primitives);
        }
    }

    /// Spawn a line and its signal markers for every synapse in `network`.
    /// Must follow [`RenderHandles::release_synapses`] when replacing a set.
    pub fn spawn_synapses(
        &mut self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        network: &NeuralNetwork,
    ) {
        debug_assert!(self.synapses.is_empty(), "previous synapse primitives not released");
        let geometry = self
            .geometry
            .get_or_insert_with(|| SharedGeometry::create(meshes));

        for (index, synapse) in network.synapses.iter().enumerate() {
            let start = network.neurons[synapse.from].position;
            let end = network.neurons[synapse.to].position;

            let line_mesh = meshes.add(line_mesh(start, end));
            let line_material = materials.add(line_material());
            let line_entity = commands
                .spawn((
                    Mesh3d(line_mesh.clone()),
                    MeshMaterial3d(line_material.clone()),
                    Transform::IDENTITY,
                    // Vertices move every frame, so the cached bounds go stale.
                    NoFrustumCulling,
                    SynapseLine { synapse: index },
                ))
                .id();

            let signals = (0..synapse.signal_count)
                .map(|slot| {
                    let material = materials.add(signal_material());
                    let entity = commands
                        .spawn((
                            Mesh3d(geometry.signal.clone()),
                            MeshMaterial3d(material.clone()),
                            Transform::from_translation(start),
                            Visibility::Hidden,
                            SignalMarker {
                                synapse: index,
                                slot,
                            },
                        ))
                        .id();
                    Primitive { entity, material }
                })
                .collect();

            self.synapses.push(SynapsePrimitives {
                line: Primitive {
                    entity: line_entity,
                    material: line_material,
                },
                line_mesh,
                signals,
            });
        }
    }

    pub fn release_synapses(
        &mut self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
    ) {
        for synapse in self.synapses.drain(..) {
            synapse.line.release(commands, materials);
            meshes.remove(&synapse.line_mesh);
            for signal in synapse.signals {
                signal.release(commands, materials);
            }
        }
    }

    /// Release every primitive and the shared geometry.
    pub fn release_all(
        &mut self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
    ) {
        self.release_synapses(commands, meshes, materials);
        for neuron in self.neurons.drain(..) {
            neuron.core.release(commands, materials);
            neuron.glow.release(commands, materials);
            neuron.shell.release(commands, materials);
        }
        if let Some(geometry) = self.geometry.take() {
            geometry.release(meshes);
        }
    }
}
