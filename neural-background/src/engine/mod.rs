pub mod camera;
pub mod core;
pub mod mount;
pub mod network;
pub mod scene;
pub mod systems;
