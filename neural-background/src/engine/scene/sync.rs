use bevy::prelude::*;

use super::registry::{NeuronPrimitive, Primitive, RenderHandles, SignalMarker};
use crate::engine::network::appearance::{neuron_appearance, synapse_appearance};
use crate::engine::network::session::NeuralSession;

/// Push neuron positions, pulse scales and activation colours onto their primitives.
pub fn sync_neuron_primitives(
    session: Res<NeuralSession>,
    handles: Res<RenderHandles>,
    mut transforms: Query<&mut Transform, With<NeuronPrimitive>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let time = session.now();

    for (neuron, primitives) in session.network.neurons.iter().zip(handles.neurons()) {
        let look = neuron_appearance(neuron, time);

        place(&mut transforms, &primitives.core, neuron.position, 1.0);
        place(&mut transforms, &primitives.glow, neuron.position, look.glow_scale);
        place(&mut transforms, &primitives.shell, neuron.position, look.shell_scale);

        tint(
            &mut materials,
            &primitives.core,
            look.core_colour.to_color(look.core_opacity),
        );
        tint(
            &mut materials,
            &primitives.glow,
            look.glow_colour.to_color(look.glow_opacity),
        );
    }
}

/// Move line endpoints with their neurons and animate in-flight signals.
pub fn sync_synapse_primitives(
    session: Res<NeuralSession>,
    handles: Res<RenderHandles>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut markers: Query<(&mut Transform, &mut Visibility), With<SignalMarker>>,
) {
    let now = session.now();
    let neurons = &session.network.neurons;

    for (synapse, primitives) in session.network.synapses.iter().zip(handles.synapses()) {
        let look = synapse_appearance(
            synapse,
            neurons[synapse.from].position,
            neurons[synapse.to].position,
            now,
        );

        if let Some(mesh) = meshes.get_mut(&primitives.line_mesh) {
            mesh.insert_attribute(
                Mesh::ATTRIBUTE_POSITION,
                vec![look.start.to_array(), look.end.to_array()],
            );
        }
        tint(
            &mut materials,
            &primitives.line,
            look.colour.to_color(look.opacity),
        );

        for (slot, marker) in primitives.signals.iter().enumerate() {
            let Ok((mut transform, mut visibility)) = markers.get_mut(marker.entity) else {
                continue;
            };
            match look.signal(slot) {
                Some(signal) => {
                    transform.translation = signal.position;
                    *visibility = Visibility::Visible;
                    tint(
                        &mut materials,
                        marker,
                        Color::srgba(1.0, 1.0, 1.0, signal.opacity),
                    );
                }
                None => *visibility = Visibility::Hidden,
            }
        }
    }
}

fn place(
    transforms: &mut Query<&mut Transform, With<NeuronPrimitive>>,
    primitive: &Primitive,
    translation: Vec3,
    scale: f32,
) {
    if let Ok(mut transform) = transforms.get_mut(primitive.entity) {
        transform.translation = translation;
        transform.scale = Vec3::splat(scale);
    }
}

fn tint(materials: &mut Assets<StandardMaterial>, primitive: &Primitive, colour: Color) {
    if let Some(material) = materials.get_mut(&primitive.material) {
        material.base_color = colour;
    }
}
