//! Geometry and material factories for neuron and synapse primitives.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use constants::render_settings::{
    CORE_RADIUS, CORE_RESOLUTION, GLOW_RADIUS, GLOW_RESOLUTION, SHELL_COLOUR, SHELL_OPACITY,
    SHELL_RADIUS, SHELL_RESOLUTION, SIGNAL_RADIUS, SIGNAL_RESOLUTION,
};

/// Sphere meshes shared by every neuron and signal marker.
pub struct SharedGeometry {
    pub core: Handle<Mesh>,
    pub glow: Handle<Mesh>,
    pub shell: Handle<Mesh>,
    pub signal: Handle<Mesh>,
}

impl SharedGeometry {
    pub const COUNT: usize = 4;

    pub fn create(meshes: &mut Assets<Mesh>) -> Self {
        Self {
            core: meshes.add(sphere(CORE_RADIUS, CORE_RESOLUTION)),
            glow: meshes.add(sphere(GLOW_RADIUS, GLOW_RESOLUTION)),
            shell: meshes.add(sphere(SHELL_RADIUS, SHELL_RESOLUTION)),
            signal: meshes.add(sphere(SIGNAL_RADIUS, SIGNAL_RESOLUTION)),
        }
    }

    pub fn release(self, meshes: &mut Assets<Mesh>) {
        for handle in [self.core, self.glow, self.shell, self.signal] {
            meshes.remove(&handle);
        }
    }
}

fn sphere(radius: f32, (sectors, stacks): (u32, u32)) -> Mesh {
    Sphere::new(radius).mesh().uv(sectors, stacks)
}

/// Two-vertex line list; positions are rewritten every frame.
pub fn line_mesh(start: Vec3, end: Vec3) -> Mesh {
    Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, vec![start.to_array(), end.to_array()])
}

fn unlit(base_color: Color, alpha_mode: AlphaMode) -> StandardMaterial {
    StandardMaterial {
        base_color,
        alpha_mode,
        unlit: true,
        ..default()
    }
}

pub fn core_material() -> StandardMaterial {
    unlit(Color::srgba(1.0, 1.0, 1.0, 0.9), AlphaMode::Blend)
}

pub fn glow_material() -> StandardMaterial {
    unlit(Color::srgba(0.0, 0.667, 1.0, 0.3), AlphaMode::Add)
}

pub fn shell_material() -> StandardMaterial {
    let [r, g, b] = SHELL_COLOUR;
    unlit(Color::srgba(r, g, b, SHELL_OPACITY), AlphaMode::Add)
}

pub fn line_material() -> StandardMaterial {
    unlit(Color::srgba(0.0, 0.667, 1.0, 0.15), AlphaMode::Add)
}

pub fn signal_material() -> StandardMaterial {
    unlit(Color::srgba(1.0, 1.0, 1.0, 0.9), AlphaMode::Add)
}
