/// Sphere radii for the three nested neuron primitives.
pub const CORE_RADIUS: f32 = 0.4;
pub const GLOW_RADIUS: f32 = 0.8;
pub const SHELL_RADIUS: f32 = 1.2;

/// Radius of a signal marker travelling along an edge.
pub const SIGNAL_RADIUS: f32 = 0.06;

/// UV sphere resolution (sectors, stacks) for each primitive.
pub const CORE_RESOLUTION: (u32, u32) = (16, 16);
pub const GLOW_RESOLUTION: (u32, u32) = (32, 32);
pub const SHELL_RESOLUTION: (u32, u32) = (16, 16);
pub const SIGNAL_RESOLUTION: (u32, u32) = (12, 12);

/// Base hue per neuron kind, as a fraction of the colour wheel.
pub const INPUT_HUE: f32 = 0.3;
pub const HIDDEN_HUE: f32 = 0.6;
pub const OUTPUT_HUE: f32 = 0.0;

/// Outer shell tint (`#004488`) and fixed opacity.
pub const SHELL_COLOUR: [f32; 3] = [0.0, 0.267, 0.533];
pub const SHELL_OPACITY: f32 = 0.1;

/// Edge line saturation and lightness; hue follows strength.
pub const EDGE_SATURATION: f32 = 0.8;
pub const EDGE_LIGHTNESS: f32 = 0.6;
