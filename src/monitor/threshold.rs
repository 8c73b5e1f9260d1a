//! Static threshold policy.
//!
//! [`evaluate`] compares one reading against one [`ThresholdSpec`] and yields
//! at most one [`Alert`].  It is pure: no state, no I/O, no logging.
//!
//! Invalid readings (`None`, NaN) never alert and never suppress anything;
//! the channel is simply skipped for this cycle.
//!
//! Every channel alerts strictly above its limit except vibration, which
//! is digital and alerts at its limit (a reading of 1).

use core::fmt::{self, Write as _};

use serde::Serialize;

use super::sample::{Channel, Value};
use crate::config::ThresholdConfig;

/// Capacity of an alert's human-readable message.
pub const MESSAGE_CAP: usize = 128;

/// Alert message text.
pub type Message = heapless::String<MESSAGE_CAP>;

// ---------------------------------------------------------------------------
// Severity / comparison
// ---------------------------------------------------------------------------

/// Alert severity, rendered as the `type` field of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Critical,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a reading is compared against its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Strictly above the limit; a reading equal to the limit is fine.
    GreaterThan,
    /// At or above the limit.  Used for digital channels whose limit is the
    /// active level itself (vibration trips at 1).
    AtLeast,
}

impl Comparison {
    fn trips(self, value: f32, limit: f32) -> bool {
        match self {
            Self::GreaterThan => value > limit,
            Self::AtLeast => value >= limit,
        }
    }
}

// ---------------------------------------------------------------------------
// ThresholdSpec
// ---------------------------------------------------------------------------

/// One static limit for one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdSpec {
    pub channel: Channel,
    pub limit: f32,
    pub comparison: Comparison,
    pub severity: Severity,
}

impl ThresholdSpec {
    /// Build the per-channel limits in wire order
    /// (temperature, humidity, gas, vibration, sound).
    pub fn table(cfg: &ThresholdConfig) -> [ThresholdSpec; 5] {
        [
            ThresholdSpec {
                channel: Channel::Temperature,
                limit: cfg.temperature_c,
                comparison: Comparison::GreaterThan,
                severity: Severity::Critical,
            },
            ThresholdSpec {
                channel: Channel::Humidity,
                limit: cfg.humidity_pct,
                comparison: Comparison::GreaterThan,
                severity: Severity::Warning,
            },
            ThresholdSpec {
                channel: Channel::Gas,
                limit: f32::from(cfg.gas_raw),
                comparison: Comparison::GreaterThan,
                severity: Severity::Critical,
            },
            ThresholdSpec {
                channel: Channel::Vibration,
                limit: f32::from(cfg.vibration),
                comparison: Comparison::AtLeast,
                severity: Severity::Warning,
            },
            ThresholdSpec {
                channel: Channel::Sound,
                limit: f32::from(cfg.sound_raw),
                comparison: Comparison::GreaterThan,
                severity: Severity::Warning,
            },
        ]
    }
}

// ---------------------------------------------------------------------------
// Alert
// ---------------------------------------------------------------------------

/// A fired alert, consumed by the codec and transport and then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub channel: Channel,
    pub value: Value,
    pub severity: Severity,
    pub message: Message,
}

impl Alert {
    pub fn new(channel: Channel, value: Value, severity: Severity) -> Self {
        Self {
            channel,
            value,
            severity,
            message: describe(channel, value, severity),
        }
    }

    /// The critical alert raised on a flame rising edge.
    pub fn flame() -> Self {
        Self::new(Channel::Flame, Value::Int(1), Severity::Critical)
    }
}

fn describe(channel: Channel, value: Value, severity: Severity) -> Message {
    let prefix = match severity {
        Severity::Warning => "Warning!",
        Severity::Critical => "Critical!",
    };
    let mut msg = Message::new();
    // Every template is far below MESSAGE_CAP; a failed write only shortens it.
    let _ = match channel {
        Channel::Temperature => {
            write!(msg, "{prefix} Datacenter temperature is {value}\u{00b0}C.")
        }
        Channel::Humidity => write!(msg, "{prefix} Datacenter humidity is {value}%."),
        Channel::Gas => write!(msg, "{prefix} Gas level is {value}, possible smoke or leak."),
        Channel::Vibration => write!(msg, "{prefix} Vibration detected on the rack."),
        Channel::Sound => write!(msg, "{prefix} Sound level is {value}."),
        Channel::Flame => write!(msg, "{prefix} Flame detected in the datacenter!"),
    };
    msg
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Evaluate one reading against one limit.
///
/// Returns `None` for invalid readings and for readings within the limit.
pub fn evaluate(spec: &ThresholdSpec, value: Option<Value>) -> Option<Alert> {
    let value = value.filter(|v| v.is_valid())?;
    spec.comparison
        .trips(value.as_f32(), spec.limit)
        .then(|| Alert::new(spec.channel, value, spec.severity))
}
