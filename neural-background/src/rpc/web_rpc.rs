use std::sync::{Arc, Mutex};

use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use bevy::state::state::StateTransitionEvent;
use serde::{Deserialize, Serialize};

use crate::engine::core::lifecycle::{LifecycleState, TopologyRegenerated};
use crate::engine::network::session::NeuralSession;
use crate::engine::scene::registry::{HandleCounts, RenderHandles};
use crate::engine::systems::fps_tracking::current_fps;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing messages waiting for the end-of-frame flush.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Raw messages captured by the page listener, drained once per frame.
#[derive(Resource, Default, Clone)]
pub struct MessageQueue(Arc<Mutex<Vec<String>>>);

impl MessageQueue {
    pub fn push(&self, message: String) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(message);
        }
    }

    fn drain(&self) -> Vec<String> {
        self.0
            .lock()
            .map(|mut queue| std::mem::take(&mut *queue))
            .unwrap_or_default()
    }
}

/// Plugin establishing the host messaging layer.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .init_resource::<MessageQueue>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    notify_lifecycle_changes,
                    notify_topology_regenerated,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener)
            .add_systems(OnEnter(LifecycleState::TornDown), remove_message_listener);
    }
}

/// Page listener closure, kept alive until teardown.
#[cfg(target_arch = "wasm32")]
struct MessageListener(Closure<dyn FnMut(MessageEvent)>);

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(world: &mut World) {
    let queue = world.resource::<MessageQueue>().clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Only string payloads that look like JSON-RPC are queued.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            if message_str.contains("jsonrpc") {
                queue.push(message_str);
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, host messages disabled");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    world.insert_non_send_resource(MessageListener(closure));
}

#[cfg(target_arch = "wasm32")]
fn remove_message_listener(world: &mut World) {
    let Some(listener) = world.remove_non_send_resource::<MessageListener>() else {
        return;
    };
    if let Some(window) = window() {
        if let Err(e) = window
            .remove_event_listener_with_callback("message", listener.0.as_ref().unchecked_ref())
        {
            warn!("Failed to remove message listener: {:?}", e);
        }
    }
    info!("Host message listener detached");
}

/// Event representing an incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Res<MessageQueue>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    for message_str in message_queue.drain() {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Snapshot answered by `get_status`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostStatus {
    pub state: LifecycleState,
    pub neurons: usize,
    pub synapses: usize,
    pub generation: u32,
    pub primitives: HandleCounts,
    pub fps: Option<f32>,
}

impl HostStatus {
    fn collect(
        state: LifecycleState,
        session: Option<&NeuralSession>,
        handles: &RenderHandles,
        diagnostics: Option<&DiagnosticsStore>,
    ) -> Self {
        Self {
            state,
            primitives: handles.counts(),
            neurons: session.map_or(0, |s| s.network.neurons.len()),
            synapses: session.map_or(0, |s| s.network.synapses.len()),
            generation: session.map_or(0, |s| s.network.generation()),
            fps: diagnostics.and_then(current_fps),
        }
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    state: Res<State<LifecycleState>>,
    mut next_state: ResMut<NextState<LifecycleState>>,
    session: Option<Res<NeuralSession>>,
    handles: Res<RenderHandles>,
    diagnostics: Option<Res<DiagnosticsStore>>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                let status = HostStatus::collect(
                    *state.get(),
                    session.as_deref(),
                    &handles,
                    diagnostics.as_deref(),
                );

                if let Some(response) = handle_rpc_request(&request, &status, &mut next_state) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("RPC parse error: {}", parse_error);
                rpc_interface.queue_response(create_error_response(
                    serde_json::Value::Null,
                    -32700,
                    "Parse error",
                    Some(serde_json::json!({ "detail": parse_error.to_string() })),
                ));
            }
        }
    }
}

/// Run one request. Notifications (no id) are executed but get no response.
fn handle_rpc_request(
    request: &RpcRequest,
    status: &HostStatus,
    next_state: &mut NextState<LifecycleState>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "unmount" => handle_unmount(status.state, next_state),
        "get_status" => handle_get_status(status),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return request.id.clone().map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(serde_json::json!({ "method": request.method })),
                )
            });
        }
    };

    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

/// Request teardown. Only a running background can be torn down; repeats are no-ops.
fn handle_unmount(
    state: LifecycleState,
    next_state: &mut NextState<LifecycleState>,
) -> Result<serde_json::Value, RpcError> {
    let accepted = state == LifecycleState::Running;
    if accepted {
        info!("→ Unmount requested by host");
        next_state.set(LifecycleState::TornDown);
    } else {
        debug!("Ignoring unmount in state {:?}", state);
    }

    Ok(serde_json::json!({
        "accepted": accepted,
        "state": state.as_str()
    }))
}

fn handle_get_status(status: &HostStatus) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "state": status.state.as_str(),
        "neurons": status.neurons,
        "synapses": status.synapses,
        "generation": status.generation,
        "primitives": {
            "neuron": status.primitives.neuron,
            "synapse": status.primitives.synapse,
            "shared": status.primitives.shared
        },
        "fps": status.fps.unwrap_or(0.0)
    }))
}

fn notify_lifecycle_changes(
    mut transitions: EventReader<StateTransitionEvent<LifecycleState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for transition in transitions.read() {
        let Some(entered) = transition.entered else {
            continue;
        };
        rpc_interface.send_notification(
            "lifecycle_changed",
            serde_json::json!({
                "state": entered.as_str(),
                "previous": transition.exited.map(|s| s.as_str())
            }),
        );
    }
}

fn notify_topology_regenerated(
    mut regenerated: EventReader<TopologyRegenerated>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in regenerated.read() {
        rpc_interface.send_notification(
            "topology_regenerated",
            serde_json::json!({
                "generation": event.generation,
                "synapses": event.synapses
            }),
        );
    }
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Post a serialized message to the embedding window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    // Embedded pages answer their parent; top-level pages post to themselves.
                    let target = window.parent().ok().flatten().unwrap_or(window);
                    if let Err(e) = target.post_message(&JsValue::from_str(&json), "*") {
                        error!("Failed to send message to host: {:?}", e);
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Ok(json) = serde_json::to_string(message) {
            trace!("Outgoing RPC message: {}", json);
        }
    }
}
