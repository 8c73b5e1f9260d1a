//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them; today that is the serial log.

use crate::monitor::{Alert, SampleSet};

/// Which buzzer pattern was driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmKind {
    /// Any non-flame alert.
    General,
    /// Flame rising edge.
    Flame,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The monitor has started (carries the heartbeat interval).
    Started { heartbeat_ms: u32 },

    /// Telemetry for one heartbeat was published.
    Telemetry(SampleSet),

    /// An alert was published on the notification topic.
    AlertRaised(Alert),

    /// The flame signal went away.
    FlameCleared,

    /// The buzzer ran a pattern.
    AlarmDriven(AlarmKind),

    /// A broker connection attempt failed; another follows after the backoff.
    TransportRetry { attempt: u32, backoff_ms: u32 },

    /// The broker session is up.
    TransportConnected { attempts: u32 },
}
