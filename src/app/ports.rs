//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (sensors, broker link, buzzer, clock, event sinks)
//! implement these traits.  The [`MonitorService`](super::service::MonitorService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.  Blocking delays use [`embedded_hal::delay::DelayNs`] rather
//! than a port of their own.

use core::fmt;

use crate::monitor::SampleSet;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per heartbeat.
///
/// Synchronous and non-blocking from the core's point of view.  Invalid
/// readings are reported as `None` in the sample; the core never retries.
pub trait SensorPort {
    /// Read every sensor and stamp the sample with `now_ms`.
    fn read_sample(&mut self, now_ms: u64) -> SampleSet;
}

// ───────────────────────────────────────────────────────────────
// Transport port (driven adapter: domain → broker)
// ───────────────────────────────────────────────────────────────

/// Publish/subscribe link to the broker.
///
/// `publish` is fire-and-forget: the core never sees a delivery result.
/// Adapters log their own failures.
pub trait TransportPort {
    /// Whether the broker session is currently up.
    fn is_connected(&self) -> bool;

    /// One connection attempt.  Retrying is the caller's job
    /// (see [`ensure_connected`](super::connect::ensure_connected)).
    fn try_connect(&mut self) -> Result<(), TransportError>;

    /// Best-effort publish of `body` on `topic`.
    fn publish(&mut self, topic: &str, body: &[u8]);
}

// ───────────────────────────────────────────────────────────────
// Alarm port (driven adapter: domain → buzzer)
// ───────────────────────────────────────────────────────────────

/// Binary audible alarm.
pub trait AlarmPort {
    /// Pulse the output `count` times; blocks for the whole pattern.
    fn pulse(&mut self, count: u8, on_ms: u32, off_ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.
pub trait ClockPort {
    /// Milliseconds since boot.
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → serial diagnostics)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`TransportPort`] connection handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The network link (WiFi) is down.
    LinkDown,
    /// The broker refused or did not answer.
    BrokerUnreachable,
    /// A bounded retry policy ran out of attempts.
    RetriesExhausted { attempts: u32 },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinkDown => write!(f, "network link down"),
            Self::BrokerUnreachable => write!(f, "broker unreachable"),
            Self::RetriesExhausted { attempts } => {
                write!(f, "gave up after {} attempts", attempts)
            }
        }
    }
}

impl From<TransportError> for crate::error::Error {
    fn from(e: TransportError) -> Self {
        use crate::error::CommsError;
        match e {
            TransportError::LinkDown => Self::Comms(CommsError::WifiDisconnected),
            TransportError::BrokerUnreachable | TransportError::RetriesExhausted { .. } => {
                Self::Comms(CommsError::MqttConnectFailed)
            }
        }
    }
}
