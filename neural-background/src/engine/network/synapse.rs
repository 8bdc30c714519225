use constants::dynamics::{EDGE_ACTIVE_SECS, TRANSMISSION_WINDOW_SECS};

/// Directed, weighted link between two neurons, referenced by index.
#[derive(Debug, Clone, PartialEq)]
pub struct Synapse {
    pub from: usize,
    pub to: usize,
    pub strength: f32,
    /// Last time the source was above threshold while this synapse was evaluated.
    pub last_activation_at: Option<f64>,
    /// Number of signal markers animated along the line (1 or 2).
    pub signal_count: usize,
    /// Injected backward or same-layer link.
    pub recurrent: bool,
}

impl Synapse {
    pub fn new(from: usize, to: usize, strength: f32, signal_count: usize, recurrent: bool) -> Self {
        Self {
            from,
            to,
            strength,
            last_activation_at: None,
            signal_count,
            recurrent,
        }
    }

    /// Seconds since the last activation. Small enough for `f32` even when
    /// the session clock is large.
    pub fn since_activation(&self, now: f64) -> Option<f32> {
        self.last_activation_at.map(|at| (now - at) as f32)
    }

    pub fn is_active(&self, now: f64) -> bool {
        self.since_activation(now)
            .is_some_and(|since| since < EDGE_ACTIVE_SECS)
    }

    pub fn is_transmitting(&self, now: f64) -> bool {
        self.since_activation(now)
            .is_some_and(|since| since < TRANSMISSION_WINDOW_SECS)
    }
}
