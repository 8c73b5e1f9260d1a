//! Debounced flame edge detector.
//!
//! ```text
//!            signal = true / Rising
//!   ┌──────┐ ─────────────────────▶ ┌─────────┐
//!   │ Idle │                        │ Alarmed │ ◀─┐ signal = true / (none)
//!   └──────┘ ◀───────────────────── └─────────┘ ──┘
//!     ▲  │     signal = false / Cleared
//!     └──┘ signal = false / (none)
//! ```
//!
//! A flame that keeps burning alarms once; the detector re-arms only after
//! the raw signal goes false.  There is no timeout.

/// Persistent detector state.  `Idle` is the explicit power-on state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlameState {
    #[default]
    Idle,
    Alarmed,
}

/// Edge produced by one [`FlameEdgeDetector::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlameEvent {
    /// Flame newly detected: raise the critical alert and flame alarm.
    Rising,
    /// Flame gone: informational only.
    Cleared,
}

/// Owns the only cross-cycle state of the monitor core.
///
/// One detector per sensor chassis.
#[derive(Debug, Default)]
pub struct FlameEdgeDetector {
    state: FlameState,
}

impl FlameEdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw flame reading; returns the edge, if any.
    pub fn update(&mut self, detected: bool) -> Option<FlameEvent> {
        let (next, event) = match (self.state, detected) {
            (FlameState::Idle, false) => (FlameState::Idle, None),
            (FlameState::Idle, true) => (FlameState::Alarmed, Some(FlameEvent::Rising)),
            (FlameState::Alarmed, true) => (FlameState::Alarmed, None),
            (FlameState::Alarmed, false) => (FlameState::Idle, Some(FlameEvent::Cleared)),
        };
        self.state = next;
        event
    }

    pub fn state(&self) -> FlameState {
        self.state
    }

    /// `true` while the last processed reading was "detected".
    pub fn previously_detected(&self) -> bool {
        self.state == FlameState::Alarmed
    }
}
