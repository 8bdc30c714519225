//! JSON-RPC 2.0 communication layer for host page integration.
//!
//! Implements bidirectional messaging between the Bevy engine and the page
//! that mounted it via `postMessage`, supporting both request-response and
//! notification patterns.
//!
//! ## Message Flow
//!
//! ```text
//! Host page  <──postMessage──>  Bevy (canvas)
//!     │                               │
//!     ├─ Request (with ID) ─────────> │
//!     │                               ├─ Process request
//!     │ <──────── Response (with ID) ─┤
//!     │                               │
//!     │ <───── Notification (no ID) ──┤
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32700`: Parse error
//! - `-32601`: Method not found
//!
//! ## Methods
//!
//! - `unmount`: Tear the background down and release every resource
//! - `get_status`: Lifecycle state, neuron and synapse counts, fps
//!
//! ## Notifications
//!
//! - `lifecycle_changed`: Every lifecycle state transition
//! - `topology_regenerated`: Synapse set replaced
//! - `fps_update`: Smoothed frame rate, every 0.5 seconds while running

/// JSON-RPC 2.0 bidirectional communication system for the host page.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
