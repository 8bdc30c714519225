use bevy::prelude::*;
use bevy::window::{WindowCloseRequested, WindowResized};
use constants::network::REGENERATION_INTERVAL_SECS;

use crate::engine::camera::drift_camera::{
    DriftCamera, camera_drift_system, set_aspect_ratio, spawn_drift_camera,
};
use crate::engine::mount::surface::MountedSurface;
use crate::engine::network::session::NeuralSession;
use crate::engine::scene::registry::RenderHandles;
use crate::engine::scene::sync::{sync_neuron_primitives, sync_synapse_primitives};

/// Mount lifecycle. `TornDown` is terminal.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Running,
    TornDown,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Running => "running",
            LifecycleState::TornDown => "torn_down",
        }
    }
}

/// Fires every regeneration interval while running.
#[derive(Resource)]
pub struct RegenerationTimer(pub Timer);

/// Fixed seed for the session rng; `None` seeds from entropy.
#[derive(Resource, Default, Clone, Copy)]
pub struct SimulationSeed(pub Option<u64>);

/// Written after the synapse set has been replaced and re-spawned.
#[derive(Event, Debug, Clone, Copy)]
pub struct TopologyRegenerated {
    pub generation: u32,
    pub synapses: usize,
}

/// Simulation, scene and lifecycle wiring for one mounted background.
#[derive(Default)]
pub struct NeuralBackgroundPlugin {
    pub seed: Option<u64>,
}

impl Plugin for NeuralBackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<LifecycleState>()
            .init_resource::<RenderHandles>()
            .insert_resource(SimulationSeed(self.seed))
            .add_event::<TopologyRegenerated>()
            .add_event::<WindowResized>()
            .add_event::<WindowCloseRequested>()
            .add_systems(Startup, begin_session)
            .add_systems(OnEnter(LifecycleState::Running), enter_running)
            .add_systems(
                Update,
                (
                    regenerate_topology,
                    advance_simulation,
                    sync_neuron_primitives,
                    sync_synapse_primitives,
                    handle_resize,
                    close_requested,
                )
                    .chain()
                    .run_if(in_state(LifecycleState::Running)),
            )
            .add_systems(
                Update,
                camera_drift_system.run_if(in_state(LifecycleState::Running)),
            )
            .add_systems(
                OnEnter(LifecycleState::TornDown),
                (detach_surface, release_scene).chain(),
            );
    }
}

/// Start running only when the host mount produced a surface.
pub fn begin_session(
    surface: Option<NonSend<MountedSurface>>,
    mut next_state: ResMut<NextState<LifecycleState>>,
) {
    match surface {
        Some(surface) => {
            info!(
                "→ Starting neural background on {}x{} surface",
                surface.width, surface.height
            );
            next_state.set(LifecycleState::Running);
        }
        None => warn!("No mounted surface; neural background stays uninitialised"),
    }
}

pub fn enter_running(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut handles: ResMut<RenderHandles>,
    seed: Res<SimulationSeed>,
    surface: NonSend<MountedSurface>,
) {
    let session = match seed.0 {
        Some(seed) => NeuralSession::seeded(seed),
        None => NeuralSession::from_entropy(),
    };

    handles.spawn_neurons(&mut commands, &mut meshes, &mut materials, &session.network);
    handles.spawn_synapses(&mut commands, &mut meshes, &mut materials, &session.network);
    spawn_drift_camera(&mut commands, surface.aspect_ratio());

    let counts = handles.counts();
    info!(
        "Spawned {} neurons, {} synapses ({} neuron / {} synapse primitives)",
        session.network.neurons.len(),
        session.network.synapses.len(),
        counts.neuron,
        counts.synapse
    );

    commands.insert_resource(session);
    commands.insert_resource(RegenerationTimer(Timer::from_seconds(
        REGENERATION_INTERVAL_SECS,
        TimerMode::Repeating,
    )));
}

/// Replace the synapse set on each timer tick, releasing the old primitives first.
pub fn regenerate_topology(
    mut commands: Commands,
    time: Res<Time>,
    mut timer: ResMut<RegenerationTimer>,
    mut session: ResMut<NeuralSession>,
    mut handles: ResMut<RenderHandles>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut regenerated: EventWriter<TopologyRegenerated>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }

    handles.release_synapses(&mut commands, &mut meshes, &mut materials);
    session.regenerate_synapses();
    handles.spawn_synapses(&mut commands, &mut meshes, &mut materials, &session.network);

    let event = TopologyRegenerated {
        generation: session.network.generation(),
        synapses: session.network.synapses.len(),
    };
    info!(
        "Regenerated topology #{}: {} synapses",
        event.generation, event.synapses
    );
    regenerated.write(event);
}

pub fn advance_simulation(time: Res<Time>, mut session: ResMut<NeuralSession>) {
    let report = session.tick(time.delta_secs());
    if !report.fired.is_empty() {
        debug!("Fired: {:?}", report.fired);
    }
}

/// Track the surface size. Simulation state is untouched.
pub fn handle_resize(
    mut resized: EventReader<WindowResized>,
    surface: Option<NonSendMut<MountedSurface>>,
    mut projections: Query<&mut Projection, With<DriftCamera>>,
) {
    let Some(event) = resized.read().last() else {
        return;
    };

    if let Some(mut surface) = surface {
        surface.resize(event.width, event.height);
    }
    for mut projection in &mut projections {
        set_aspect_ratio(&mut projection, event.width, event.height);
    }
}

pub fn close_requested(
    mut requests: EventReader<WindowCloseRequested>,
    mut next_state: ResMut<NextState<LifecycleState>>,
) {
    if requests.read().next().is_some() {
        info!("→ Window close requested, tearing down");
        next_state.set(LifecycleState::TornDown);
    }
}

fn detach_surface(world: &mut World) {
    if let Some(surface) = world.remove_non_send_resource::<MountedSurface>() {
        surface.detach();
    }
}

/// Despawn and free everything `enter_running` created, then stop the app.
pub fn release_scene(
    mut commands: Commands,
    mut handles: ResMut<RenderHandles>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cameras: Query<Entity, With<DriftCamera>>,
    mut exit: EventWriter<AppExit>,
) {
    handles.release_all(&mut commands, &mut meshes, &mut materials);
    for camera in &cameras {
        commands.entity(camera).despawn();
    }
    commands.remove_resource::<RegenerationTimer>();
    commands.remove_resource::<NeuralSession>();

    info!(
        "Neural background torn down ({} meshes, {} materials remaining)",
        meshes.len(),
        materials.len()
    );
    exit.write(AppExit::Success);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::drift_camera;
    use crate::engine::scene::registry::{NeuronPrimitive, SignalMarker, SynapseLine};
    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn test_app(surface: Option<MountedSurface>) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), StatesPlugin))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .add_plugins(NeuralBackgroundPlugin { seed: Some(7) });
        if let Some(surface) = surface {
            app.insert_non_send_resource(surface);
        }
        app
    }

    fn running_app() -> App {
        let mut app = test_app(Some(MountedSurface::headless(800.0, 600.0)));
        app.update();
        app.update();
        app
    }

    fn state(app: &App) -> LifecycleState {
        *app.world().resource::<State<LifecycleState>>().get()
    }

    /// Meshes and materials the current session should own.
    fn expected_assets(app: &App) -> (usize, usize) {
        let network = &app.world().resource::<NeuralSession>().network;
        let synapses = network.synapses.len();
        let meshes = 4 + synapses;
        let materials = network.neurons.len() * 3 + synapses + network.signal_count();
        (meshes, materials)
    }

    fn asset_lengths(app: &App) -> (usize, usize) {
        (
            app.world().resource::<Assets<Mesh>>().len(),
            app.world().resource::<Assets<StandardMaterial>>().len(),
        )
    }

    fn entity_count<C: Component>(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<Entity, With<C>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn mounted_surface_enters_running_with_every_primitive() {
        let mut app = running_app();

        assert_eq!(state(&app), LifecycleState::Running);
        assert!(app.world().contains_resource::<RegenerationTimer>());
        assert_eq!(asset_lengths(&app), expected_assets(&app));

        let network = app.world().resource::<NeuralSession>().network.clone();
        let counts = app.world().resource::<RenderHandles>().counts();
        assert_eq!(counts.neuron, 54);
        assert_eq!(
            counts.synapse,
            network.synapses.len() + network.signal_count()
        );
        assert_eq!(counts.shared, 4);

        assert_eq!(entity_count::<NeuronPrimitive>(&mut app), 54);
        assert_eq!(
            entity_count::<SignalMarker>(&mut app),
            network.signal_count()
        );
        assert_eq!(entity_count::<DriftCamera>(&mut app), 1);
    }

    #[test]
    fn missing_mount_stays_uninitialised() {
        let mut app = test_app(None);
        app.update();
        app.update();

        assert_eq!(state(&app), LifecycleState::Uninitialized);
        assert!(!app.world().contains_resource::<NeuralSession>());
        assert_eq!(asset_lengths(&app), (0, 0));
        assert_eq!(entity_count::<DriftCamera>(&mut app), 0);
    }

    #[test]
    fn regeneration_replaces_synapse_primitives_without_leaks() {
        let mut app = running_app();
        let first_generation = app.world().resource::<NeuralSession>().network.generation();
        let old_lines: Vec<Entity> = app
            .world_mut()
            .query_filtered::<Entity, With<SynapseLine>>()
            .iter(app.world())
            .collect();
        assert!(!old_lines.is_empty());

        // 15 s of 100 ms frames, plus slack.
        let mut frames = 0;
        while app.world().resource::<NeuralSession>().network.generation() == first_generation {
            assert!(frames < 200, "topology never regenerated");
            app.update();
            frames += 1;
        }
        assert!(frames >= 140, "regenerated after only {frames} frames");

        let network = app.world().resource::<NeuralSession>().network.clone();
        assert_eq!(network.generation(), first_generation + 1);
        assert_eq!(network.neurons.len(), 18);
        assert_eq!(asset_lengths(&app), expected_assets(&app));

        let counts = app.world().resource::<RenderHandles>().counts();
        assert_eq!(counts.neuron, 54);
        assert_eq!(
            counts.synapse,
            network.synapses.len() + network.signal_count()
        );
        assert_eq!(counts.shared, 4);
        assert_eq!(
            entity_count::<SynapseLine>(&mut app),
            network.synapses.len()
        );
        assert_eq!(
            entity_count::<SignalMarker>(&mut app),
            network.signal_count()
        );
        for line in old_lines {
            assert!(app.world().get_entity(line).is_err());
        }
    }

    #[test]
    fn camera_follows_drift_pose_while_running() {
        let mut app = running_app();
        for _ in 0..20 {
            app.update();
        }

        let elapsed = app.world().resource::<Time>().elapsed_secs();
        let (expected, _) = drift_camera::drift_pose(elapsed);
        let position = app
            .world_mut()
            .query_filtered::<&Transform, With<DriftCamera>>()
            .single(app.world())
            .expect("one drift camera")
            .translation;
        assert!((position - expected).length() < 1e-4);
    }

    #[test]
    fn teardown_releases_everything_and_exits() {
        let mut app = running_app();
        app.world_mut()
            .resource_mut::<NextState<LifecycleState>>()
            .set(LifecycleState::TornDown);
        app.update();

        assert_eq!(state(&app), LifecycleState::TornDown);
        assert_eq!(asset_lengths(&app), (0, 0));
        assert!(app.world().resource::<RenderHandles>().is_empty());
        assert!(!app.world().contains_resource::<NeuralSession>());
        assert!(!app.world().contains_resource::<RegenerationTimer>());
        assert!(app.world().get_non_send_resource::<MountedSurface>().is_none());
        assert_eq!(entity_count::<NeuronPrimitive>(&mut app), 0);
        assert_eq!(entity_count::<SignalMarker>(&mut app), 0);
        assert_eq!(entity_count::<DriftCamera>(&mut app), 0);
        assert_eq!(app.should_exit(), Some(AppExit::Success));
    }

    #[test]
    fn close_request_tears_down() {
        let mut app = running_app();
        app.world_mut().send_event(WindowCloseRequested {
            window: Entity::PLACEHOLDER,
        });
        app.update();
        app.update();

        assert_eq!(state(&app), LifecycleState::TornDown);
        assert_eq!(asset_lengths(&app), (0, 0));
    }

    #[test]
    fn resize_updates_surface_and_camera_only() {
        let mut app = running_app();
        let generation = app.world().resource::<NeuralSession>().network.generation();

        app.world_mut().send_event(WindowResized {
            window: Entity::PLACEHOLDER,
            width: 1200.0,
            height: 400.0,
        });
        app.update();

        assert_eq!(state(&app), LifecycleState::Running);
        let surface = app.world().non_send_resource::<MountedSurface>();
        assert_eq!((surface.width, surface.height), (1200.0, 400.0));

        let aspect = app
            .world_mut()
            .query_filtered::<&Projection, With<DriftCamera>>()
            .iter(app.world())
            .find_map(|projection| match projection {
                Projection::Perspective(perspective) => Some(perspective.aspect_ratio),
                _ => None,
            });
        assert_eq!(aspect, Some(3.0));

        let session = app.world().resource::<NeuralSession>();
        assert_eq!(session.network.generation(), generation);
        assert_eq!(session.network.neurons.len(), 18);
        assert_eq!(asset_lengths(&app), expected_assets(&app));
    }
}
